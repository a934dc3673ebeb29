//! Metric family model shared by the translation engine and its consumers

use std::collections::HashMap;

/// Numeric kind of a metric family, fixed for the family's lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetricKind {
    /// Monotonic counter
    Counter,
    /// Point-in-time value
    Gauge,
    Untyped,
}

impl std::fmt::Display for MetricKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Counter => write!(f, "counter"),
            Self::Gauge => write!(f, "gauge"),
            Self::Untyped => write!(f, "untyped"),
        }
    }
}

impl std::str::FromStr for MetricKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "counter" => Ok(Self::Counter),
            "gauge" => Ok(Self::Gauge),
            "untyped" => Ok(Self::Untyped),
            _ => Err(format!("Invalid metric kind: {}", s)),
        }
    }
}

/// Static schema of a metric family.
///
/// Names, label names and label order are what dashboards and alerts are
/// written against, so every family the exporter produces is declared once as
/// a `const FamilySpec` and never built ad hoc.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FamilySpec {
    pub name: &'static str,
    pub help: &'static str,
    pub kind: MetricKind,
    pub labels: &'static [&'static str],
}

impl FamilySpec {
    pub const fn counter(
        name: &'static str,
        help: &'static str,
        labels: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            help,
            kind: MetricKind::Counter,
            labels,
        }
    }

    pub const fn gauge(
        name: &'static str,
        help: &'static str,
        labels: &'static [&'static str],
    ) -> Self {
        Self {
            name,
            help,
            kind: MetricKind::Gauge,
            labels,
        }
    }
}

/// One labeled value within a family
#[derive(Debug, Clone, PartialEq)]
pub struct Sample {
    /// Label values, aligned with the owning family's label names
    pub label_values: Vec<String>,
    pub value: f64,
}

/// A uniquely-named collection of same-typed, same-labeled samples
#[derive(Debug, Clone, PartialEq)]
pub struct MetricFamily {
    pub name: String,
    pub help: String,
    pub kind: MetricKind,
    pub labels: Vec<String>,
    pub samples: Vec<Sample>,
}

impl MetricFamily {
    pub fn new(spec: &FamilySpec) -> Self {
        Self {
            name: spec.name.to_string(),
            help: spec.help.to_string(),
            kind: spec.kind,
            labels: spec.labels.iter().map(|l| l.to_string()).collect(),
            samples: Vec::new(),
        }
    }

    /// Append a sample. Returns `false` (and stores nothing) if the number of
    /// label values does not match the family's label names.
    pub fn push(&mut self, label_values: Vec<String>, value: f64) -> bool {
        if label_values.len() != self.labels.len() {
            return false;
        }
        self.samples.push(Sample {
            label_values,
            value,
        });
        true
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Label name/value pairs of a sample, in the family's label order
    pub fn sample_labels<'a>(
        &'a self,
        sample: &'a Sample,
    ) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(sample.label_values.iter().map(String::as_str))
    }

    /// First sample whose labels contain every given name/value pair
    pub fn find(&self, wanted: &[(&str, &str)]) -> Option<&Sample> {
        self.samples.iter().find(|sample| {
            let labels: HashMap<&str, &str> = self.sample_labels(sample).collect();
            wanted
                .iter()
                .all(|(name, value)| labels.get(name) == Some(value))
        })
    }
}

/// The completed, ordered output of one translation pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FamilySet {
    families: Vec<MetricFamily>,
}

impl FamilySet {
    pub fn new(families: Vec<MetricFamily>) -> Self {
        Self { families }
    }

    pub fn get(&self, name: &str) -> Option<&MetricFamily> {
        self.families.iter().find(|f| f.name == name)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, MetricFamily> {
        self.families.iter()
    }

    pub fn names(&self) -> Vec<&str> {
        self.families.iter().map(|f| f.name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.families.len()
    }

    pub fn is_empty(&self) -> bool {
        self.families.is_empty()
    }

    /// Total number of samples across all families
    pub fn sample_count(&self) -> usize {
        self.families.iter().map(MetricFamily::len).sum()
    }
}

impl IntoIterator for FamilySet {
    type Item = MetricFamily;
    type IntoIter = std::vec::IntoIter<MetricFamily>;

    fn into_iter(self) -> Self::IntoIter {
        self.families.into_iter()
    }
}

impl<'a> IntoIterator for &'a FamilySet {
    type Item = &'a MetricFamily;
    type IntoIter = std::slice::Iter<'a, MetricFamily>;

    fn into_iter(self) -> Self::IntoIter {
        self.families.iter()
    }
}
