//! mpower-client — talks to a Ubiquiti mPower power strip.
//!
//! Logs into the device with a session cookie and reads the per-outlet
//! sensor table.
//!
//! # Protocol
//!
//! ```text
//! DeviceClient
//!   ├── login()         → POST /login.cgi  (form: username, password)
//!   │                     Cookie: AIROS_SESSIONID=<id>
//!   └── fetch_sensors() → GET  /sensors    → {"sensors": [OutletReading, ...]}
//! ```
//!
//! Each call is a single HTTP/1.1 exchange on a fresh connection, bounded by
//! [`DeviceConfig::timeout`]. Nothing is retried.

pub mod client;
pub mod error;
pub mod session;
pub mod types;

pub use client::{DeviceClient, DeviceConfig};
pub use error::{DeviceError, DeviceResult};
pub use session::Session;
pub use types::{OutletReading, SensorSnapshot};
