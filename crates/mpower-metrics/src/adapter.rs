//! Scrape adapter: one device round trip per scrape, translated to gauges.
//!
//! Cycles are serialized: a scrape that arrives while another is talking to
//! the device waits for it, so login/fetch pairs never interleave.

use std::sync::Arc;
use std::time::Instant;

use tokio::sync::Mutex;
use tracing::{debug, error};

use mpower_client::{DeviceClient, DeviceError, SensorSnapshot};

use crate::descriptor::{OutletField, Registry};
use crate::prometheus::render_prometheus;

/// One gauge value for one outlet.
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    pub field: OutletField,
    /// Port number, rendered as the `port` label.
    pub port: String,
    pub value: f64,
}

/// Translate a snapshot into samples: one per descriptor per outlet, in
/// device order, values passed through unchanged.
pub fn translate(registry: &Registry, snapshot: &SensorSnapshot) -> Vec<Sample> {
    let descs = registry.descriptors();
    let mut samples = Vec::with_capacity(snapshot.len() * descs.len());

    for outlet in &snapshot.outlets {
        let port = outlet.port.to_string();
        for desc in descs {
            samples.push(Sample {
                field: desc.field,
                port: port.clone(),
                value: desc.field.value(outlet),
            });
        }
    }

    samples
}

/// Collects outlet metrics from a single device on demand.
pub struct Exporter {
    client: DeviceClient,
    registry: Arc<Registry>,
    /// Held for the whole login + fetch sequence.
    lane: Mutex<()>,
}

impl Exporter {
    pub fn new(client: DeviceClient, registry: Arc<Registry>) -> Self {
        Self {
            client,
            registry,
            lane: Mutex::new(()),
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Run one collection cycle.
    ///
    /// Any device error is logged and yields an empty sample set.
    pub async fn collect(&self) -> Vec<Sample> {
        let _lane = self.lane.lock().await;
        let started = Instant::now();
        let address = self.client.address();

        let session = match self.client.login().await {
            Ok(session) => session,
            Err(e) => {
                error!(error = %e, %address, "unable to log into device");
                return Vec::new();
            }
        };

        let snapshot = match self.client.fetch_sensors(&session).await {
            Ok(snapshot) => snapshot,
            Err(DeviceError::NoData) => {
                error!(%address, "unable to see data from device");
                return Vec::new();
            }
            Err(e @ DeviceError::Decode(_)) => {
                error!(error = %e, %address, "unable to parse data from device");
                return Vec::new();
            }
            Err(e) => {
                error!(error = %e, %address, "unable to get data from device");
                return Vec::new();
            }
        };

        let samples = translate(&self.registry, &snapshot);
        debug!(
            outlets = snapshot.len(),
            samples = samples.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "collection cycle complete"
        );
        samples
    }

    /// Run one collection cycle and render it for the `/metrics` endpoint.
    pub async fn scrape(&self) -> String {
        let samples = self.collect().await;
        render_prometheus(&self.registry, &samples)
    }
}
