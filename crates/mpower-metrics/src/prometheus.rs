//! Prometheus text exposition format.
//!
//! Renders outlet samples for scraping by a Prometheus server or
//! compatible agent.

use crate::adapter::Sample;
use crate::descriptor::Registry;

/// Content type of the text exposition format.
pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Render samples as GAUGE families, one per descriptor.
///
/// Families without samples are left out entirely, so an empty sample set
/// renders as an empty body.
pub fn render_prometheus(registry: &Registry, samples: &[Sample]) -> String {
    let mut out = String::new();

    for desc in registry.descriptors() {
        let mut family = samples.iter().filter(|s| s.field == desc.field).peekable();
        if family.peek().is_none() {
            continue;
        }

        out.push_str(&format!("# HELP {} {}\n", desc.name, escape_help(desc.help)));
        out.push_str(&format!("# TYPE {} gauge\n", desc.name));
        for s in family {
            out.push_str(&format!(
                "{}{{{}=\"{}\"}} {}\n",
                desc.name,
                desc.label,
                escape_label(&s.port),
                format_value(s.value)
            ));
        }
    }

    out
}

fn format_value(v: f64) -> String {
    if v.is_nan() {
        "NaN".to_string()
    } else if v == f64::INFINITY {
        "+Inf".to_string()
    } else if v == f64::NEG_INFINITY {
        "-Inf".to_string()
    } else {
        v.to_string()
    }
}

fn escape_help(s: &str) -> String {
    s.replace('\\', "\\\\").replace('\n', "\\n")
}

fn escape_label(s: &str) -> String {
    s.replace('\\', "\\\\")
        .replace('"', "\\\"")
        .replace('\n', "\\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::descriptor::OutletField;

    fn sample(field: OutletField, port: &str, value: f64) -> Sample {
        Sample {
            field,
            port: port.to_string(),
            value,
        }
    }

    #[test]
    fn render_empty() {
        assert_eq!(render_prometheus(&Registry::mpower(), &[]), "");
    }

    #[test]
    fn render_single_outlet() {
        let samples = vec![
            sample(OutletField::Output, "1", 1.0),
            sample(OutletField::Power, "1", 7.195),
            sample(OutletField::Energy, "1", 2.8),
            sample(OutletField::Current, "1", 0.105),
            sample(OutletField::Voltage, "1", 117.7),
            sample(OutletField::PowerFactor, "1", 0.58),
        ];
        let output = render_prometheus(&Registry::mpower(), &samples);

        assert!(output.contains("# HELP mpower_exporter_output Whether the port is on or not.\n"));
        assert!(output.contains("# TYPE mpower_exporter_output gauge\n"));
        assert!(output.contains("mpower_exporter_output{port=\"1\"} 1\n"));
        assert!(output.contains("mpower_exporter_power{port=\"1\"} 7.195\n"));
        assert!(output.contains("mpower_exporter_energy{port=\"1\"} 2.8\n"));
        assert!(output.contains("mpower_exporter_current{port=\"1\"} 0.105\n"));
        assert!(output.contains("mpower_exporter_voltage{port=\"1\"} 117.7\n"));
        assert!(output.contains("mpower_exporter_power_factor{port=\"1\"} 0.58\n"));
    }

    #[test]
    fn render_groups_by_family() {
        let samples = vec![
            sample(OutletField::Power, "1", 5.0),
            sample(OutletField::Voltage, "1", 120.0),
            sample(OutletField::Power, "2", 6.0),
            sample(OutletField::Voltage, "2", 121.0),
        ];
        let output = render_prometheus(&Registry::mpower(), &samples);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(
            lines,
            vec![
                "# HELP mpower_exporter_power Unknown custom mPower 'power' metric",
                "# TYPE mpower_exporter_power gauge",
                "mpower_exporter_power{port=\"1\"} 5",
                "mpower_exporter_power{port=\"2\"} 6",
                "# HELP mpower_exporter_voltage The voltage flowing through the outlet (unknown units)",
                "# TYPE mpower_exporter_voltage gauge",
                "mpower_exporter_voltage{port=\"1\"} 120",
                "mpower_exporter_voltage{port=\"2\"} 121",
            ]
        );
    }

    #[test]
    fn special_values() {
        assert_eq!(format_value(f64::NAN), "NaN");
        assert_eq!(format_value(f64::INFINITY), "+Inf");
        assert_eq!(format_value(f64::NEG_INFINITY), "-Inf");
        assert_eq!(format_value(-0.25), "-0.25");
    }

    #[test]
    fn label_values_are_escaped() {
        assert_eq!(escape_label("a\"b\\c\nd"), "a\\\"b\\\\c\\nd");
    }
}
