//! mpower-metrics — turns mPower outlet readings into Prometheus gauges.
//!
//! # Architecture
//!
//! ```text
//! Registry (six outlet descriptors, built once at startup)
//!
//! Exporter
//!   ├── collect()  ← called per scrape
//!   │   ├── DeviceClient::login()
//!   │   ├── DeviceClient::fetch_sensors()
//!   │   └── translate() → Vec<Sample>
//!   └── scrape()   → render_prometheus() → text/plain for /metrics
//! ```
//!
//! A failed cycle yields no samples. Nothing is cached between scrapes.

pub mod adapter;
pub mod descriptor;
pub mod prometheus;

pub use adapter::{Exporter, Sample, translate};
pub use descriptor::{MetricDesc, OutletField, Registry};
pub use prometheus::{CONTENT_TYPE, render_prometheus};
