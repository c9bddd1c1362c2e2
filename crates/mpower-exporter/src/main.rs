//! mpower-exporter — Prometheus exporter for a Ubiquiti mPower strip.
//!
//! # Usage
//!
//! ```text
//! mpower-exporter --addr 0.0.0.0:9101 --mpower-addr 10.1.10.10:80 \
//!     --username ubnt --password ubnt
//! ```

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tracing::{error, info};

use mpower_client::{DeviceClient, DeviceConfig};
use mpower_metrics::{Exporter, Registry};

#[derive(Parser)]
#[command(name = "mpower-exporter", about = "Prometheus exporter for mPower power strips")]
struct Cli {
    /// Address to serve metrics on.
    #[arg(long, default_value = "0.0.0.0:9101")]
    addr: SocketAddr,

    /// Address (host:port) of the mPower being scraped.
    #[arg(long, default_value = "10.1.10.10:80")]
    mpower_addr: String,

    /// Username for the device.
    #[arg(long, default_value = "ubnt")]
    username: String,

    /// Password for the device.
    #[arg(long, default_value = "ubnt")]
    password: String,

    /// Per-request device timeout in seconds.
    #[arg(long, default_value = "10")]
    timeout: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("info,mpower=debug")
            }),
        )
        .init();

    let cli = Cli::parse();

    let device = DeviceConfig::new(cli.mpower_addr, cli.username, cli.password)
        .with_timeout(Duration::from_secs(cli.timeout));
    info!(device = %device.address, timeout_secs = cli.timeout, "device client configured");

    let registry = Arc::new(Registry::mpower());
    let exporter = Arc::new(Exporter::new(DeviceClient::new(device), registry));

    let router = mpower_exporter::build_router(exporter);

    info!(addr = %cli.addr, "metrics server starting");
    let listener = tokio::net::TcpListener::bind(cli.addr).await?;

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!(error = %e, "failed to install CTRL+C handler");
                std::future::pending::<()>().await;
            }
            info!("shutdown signal received");
        })
        .await?;

    info!("mpower exporter stopped");
    Ok(())
}
