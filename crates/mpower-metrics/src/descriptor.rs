//! The fixed set of outlet metric descriptors.

use mpower_client::OutletReading;

pub const NAMESPACE: &str = "mpower";
pub const SUBSYSTEM: &str = "exporter";

/// The only label every outlet metric carries.
pub const PORT_LABEL: &str = "port";

/// One measured field of an outlet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OutletField {
    Output,
    Power,
    Energy,
    Current,
    Voltage,
    PowerFactor,
}

impl OutletField {
    /// Every field, in emission order.
    pub const ALL: [OutletField; 6] = [
        OutletField::Output,
        OutletField::Power,
        OutletField::Energy,
        OutletField::Current,
        OutletField::Voltage,
        OutletField::PowerFactor,
    ];

    /// Metric name suffix.
    pub fn name(self) -> &'static str {
        match self {
            OutletField::Output => "output",
            OutletField::Power => "power",
            OutletField::Energy => "energy",
            OutletField::Current => "current",
            OutletField::Voltage => "voltage",
            OutletField::PowerFactor => "power_factor",
        }
    }

    pub fn help(self) -> &'static str {
        match self {
            OutletField::Output => "Whether the port is on or not.",
            OutletField::Power => "Unknown custom mPower 'power' metric",
            OutletField::Energy => "Unknown custom mPower 'energy' metric",
            OutletField::Current => "The current flowing through the outlet (unknown units)",
            OutletField::Voltage => "The voltage flowing through the outlet (unknown units)",
            OutletField::PowerFactor => "Unknown custom mPower 'powerFactor' metric",
        }
    }

    /// Raw value of this field on a reading.
    pub fn value(self, reading: &OutletReading) -> f64 {
        match self {
            OutletField::Output => reading.output,
            OutletField::Power => reading.power,
            OutletField::Energy => reading.energy,
            OutletField::Current => reading.current,
            OutletField::Voltage => reading.voltage,
            OutletField::PowerFactor => reading.power_factor,
        }
    }
}

/// Description of one gauge family.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricDesc {
    pub field: OutletField,
    /// Fully-qualified metric name.
    pub name: String,
    pub help: &'static str,
    pub label: &'static str,
}

/// Immutable set of descriptors, shared by every scrape.
#[derive(Debug, Clone)]
pub struct Registry {
    descs: Vec<MetricDesc>,
}

impl Registry {
    /// The six outlet gauges, labeled by port.
    pub fn mpower() -> Self {
        let descs = OutletField::ALL
            .iter()
            .map(|&field| MetricDesc {
                field,
                name: fq_name(NAMESPACE, SUBSYSTEM, field.name()),
                help: field.help(),
                label: PORT_LABEL,
            })
            .collect();
        Self { descs }
    }

    pub fn descriptors(&self) -> &[MetricDesc] {
        &self.descs
    }

    pub fn get(&self, field: OutletField) -> Option<&MetricDesc> {
        self.descs.iter().find(|d| d.field == field)
    }
}

/// Join the non-empty name parts with underscores.
pub fn fq_name(namespace: &str, subsystem: &str, name: &str) -> String {
    [namespace, subsystem, name]
        .iter()
        .filter(|part| !part.is_empty())
        .copied()
        .collect::<Vec<_>>()
        .join("_")
}
