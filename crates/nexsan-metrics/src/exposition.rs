//! Prometheus text exposition format (version 0.0.4)

use nexsan_core::{FamilySet, MetricFamily};
use std::fmt::Write;

/// Content type of `encode`'s output
pub const CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// Render every family, including empty ones, in set order.
pub fn encode(families: &FamilySet) -> String {
    let mut out = String::new();
    for family in families {
        encode_family(&mut out, family);
    }
    out
}

fn encode_family(out: &mut String, family: &MetricFamily) {
    // Writing to a String cannot fail
    let _ = writeln!(out, "# HELP {} {}", family.name, escape_help(&family.help));
    let _ = writeln!(out, "# TYPE {} {}", family.name, family.kind);

    for sample in &family.samples {
        out.push_str(&family.name);
        if !family.labels.is_empty() {
            out.push('{');
            for (i, (name, value)) in family.sample_labels(sample).enumerate() {
                if i > 0 {
                    out.push(',');
                }
                let _ = write!(out, "{}=\"{}\"", name, escape_label_value(value));
            }
            out.push('}');
        }
        let _ = writeln!(out, " {}", format_value(sample.value));
    }
}

fn escape_help(help: &str) -> String {
    help.replace('\\', "\\\\").replace('\n', "\\n")
}

fn escape_label_value(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '\\' => escaped.push_str("\\\\"),
            '"' => escaped.push_str("\\\""),
            '\n' => escaped.push_str("\\n"),
            c => escaped.push(c),
        }
    }
    escaped
}

fn format_value(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value == f64::INFINITY {
        "+Inf".to_string()
    } else if value == f64::NEG_INFINITY {
        "-Inf".to_string()
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nexsan_core::{FamilySpec, MetricFamily};

    const INFO: FamilySpec =
        FamilySpec::gauge("test_info", "Identity", &["friendly_name", "system_name"]);
    const CLOCK: FamilySpec = FamilySpec::counter("test_clock", "Clock", &[]);

    #[test]
    fn test_encode_labeled_and_unlabeled() {
        let mut info = MetricFamily::new(&INFO);
        info.push(vec!["nnn".to_string(), "sss".to_string()], 1.0);
        let mut clock = MetricFamily::new(&CLOCK);
        clock.push(vec![], 1523963221.0);

        let text = encode(&FamilySet::new(vec![info, clock]));
        assert_eq!(
            text,
            "# HELP test_info Identity\n\
             # TYPE test_info gauge\n\
             test_info{friendly_name=\"nnn\",system_name=\"sss\"} 1\n\
             # HELP test_clock Clock\n\
             # TYPE test_clock counter\n\
             test_clock 1523963221\n"
        );
    }

    #[test]
    fn test_empty_family_still_described() {
        let text = encode(&FamilySet::new(vec![MetricFamily::new(&CLOCK)]));
        assert_eq!(text, "# HELP test_clock Clock\n# TYPE test_clock counter\n");
    }

    #[test]
    fn test_label_escaping() {
        assert_eq!(escape_label_value(r#"a"b\c"#), r#"a\"b\\c"#);
        assert_eq!(escape_label_value("line\nbreak"), "line\\nbreak");
        assert_eq!(escape_help("back\\slash"), "back\\\\slash");
    }

    #[test]
    fn test_value_formatting() {
        assert_eq!(format_value(0.45), "0.45");
        assert_eq!(format_value(546.0), "546");
        assert_eq!(format_value(f64::NAN), "NaN");
        assert_eq!(format_value(f64::INFINITY), "+Inf");
        assert_eq!(format_value(f64::NEG_INFINITY), "-Inf");
    }
}
