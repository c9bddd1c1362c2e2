//! Sensor payload types as reported by the device.

use serde::{Deserialize, Serialize};

use crate::error::{DeviceError, DeviceResult};

/// One outlet's readings at the time of a fetch.
///
/// Units are whatever the device firmware reports. Fields the device adds
/// beyond these (`enabled`, `relay`, `lock`) are ignored, and missing
/// numeric fields decode as zero.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutletReading {
    /// Outlet number, unique per device.
    pub port: u32,
    /// 1 when the outlet is switched on, 0 otherwise.
    pub output: f64,
    pub power: f64,
    pub energy: f64,
    pub current: f64,
    pub voltage: f64,
    #[serde(rename = "powerfactor")]
    pub power_factor: f64,
}

/// The outlet table from a single `/sensors` fetch, in device order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SensorSnapshot {
    #[serde(rename = "sensors", default)]
    pub outlets: Vec<OutletReading>,
}

impl SensorSnapshot {
    /// Decode a `/sensors` response body.
    ///
    /// A body without a `sensors` field, or with an empty one, is reported
    /// as [`DeviceError::NoData`].
    pub fn from_slice(body: &[u8]) -> DeviceResult<Self> {
        let snapshot: SensorSnapshot = serde_json::from_slice(body)?;
        if snapshot.outlets.is_empty() {
            return Err(DeviceError::NoData);
        }
        Ok(snapshot)
    }

    pub fn len(&self) -> usize {
        self.outlets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.outlets.is_empty()
    }
}
