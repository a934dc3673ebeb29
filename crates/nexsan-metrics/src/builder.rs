//! Per-pass accumulation of metric families

use nexsan_core::{FamilySet, FamilySpec, MetricFamily};
use std::collections::HashMap;
use tracing::warn;

/// Accumulates samples for one translation pass.
///
/// A builder is consumed by `finish`, so nothing it collected can leak into a
/// later pass.
#[derive(Debug, Default)]
pub struct FamilyBuilder {
    families: Vec<MetricFamily>,
    index: HashMap<&'static str, usize>,
}

impl FamilyBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the family if it does not exist yet. Declaring an existing
    /// family is a no-op.
    pub fn declare(&mut self, spec: &FamilySpec) -> usize {
        if let Some(&i) = self.index.get(spec.name) {
            let existing = &self.families[i];
            debug_assert!(
                existing.kind == spec.kind && existing.labels.len() == spec.labels.len(),
                "family {} declared with conflicting schema",
                spec.name
            );
            return i;
        }
        let i = self.families.len();
        self.families.push(MetricFamily::new(spec));
        self.index.insert(spec.name, i);
        i
    }

    pub fn declare_all(&mut self, specs: &[FamilySpec]) {
        for spec in specs {
            self.declare(spec);
        }
    }

    /// Append one sample to the family described by `spec`
    pub fn push(&mut self, spec: &FamilySpec, labels: &[&str], value: f64) {
        let i = self.declare(spec);
        let values = labels.iter().map(|l| l.to_string()).collect();
        if !self.families[i].push(values, value) {
            warn!(
                "Dropping sample for {}: got {} label values, expected {}",
                spec.name,
                labels.len(),
                spec.labels.len()
            );
        }
    }

    /// Append a sample only when a value is present
    pub fn maybe_push(&mut self, spec: &FamilySpec, labels: &[&str], value: Option<f64>) {
        if let Some(value) = value {
            self.push(spec, labels, value);
        }
    }

    pub fn finish(self) -> FamilySet {
        FamilySet::new(self.families)
    }
}
