//! The exporter's own metrics, served at `/metrics`
//!
//! Probe counters and timings, plus the standard `process_*` metrics on Linux.

use nexsan_core::{NexsanError, Result};
use prometheus::{Encoder, Histogram, HistogramOpts, IntCounterVec, Opts, Registry, TextEncoder};
use std::time::Duration;

/// Outcome of a single probe
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeOutcome {
    Success,
    Failure,
}

impl ProbeOutcome {
    fn as_label(self) -> &'static str {
        match self {
            ProbeOutcome::Success => "success",
            ProbeOutcome::Failure => "failure",
        }
    }
}

/// Registry of probe counters and timings
#[derive(Clone)]
pub struct ExporterMetrics {
    registry: Registry,
    probes: IntCounterVec,
    duration: Histogram,
}

impl ExporterMetrics {
    pub fn new() -> Result<Self> {
        let registry = Registry::new();

        let probes = IntCounterVec::new(
            Opts::new(
                "nexsan_exporter_probes_total",
                "Probes performed by this exporter, by result",
            ),
            &["result"],
        )
        .map_err(metrics_error)?;
        let duration = Histogram::with_opts(HistogramOpts::new(
            "nexsan_exporter_probe_duration_seconds",
            "Time taken to fetch and translate a status document",
        ))
        .map_err(metrics_error)?;

        registry
            .register(Box::new(probes.clone()))
            .map_err(metrics_error)?;
        registry
            .register(Box::new(duration.clone()))
            .map_err(metrics_error)?;

        #[cfg(target_os = "linux")]
        registry
            .register(Box::new(
                prometheus::process_collector::ProcessCollector::for_self(),
            ))
            .map_err(metrics_error)?;

        // Expose both series from the start
        for outcome in [ProbeOutcome::Success, ProbeOutcome::Failure] {
            probes.with_label_values(&[outcome.as_label()]);
        }

        Ok(Self {
            registry,
            probes,
            duration,
        })
    }

    /// Record one finished probe
    pub fn observe(&self, outcome: ProbeOutcome, elapsed: Duration) {
        self.probes.with_label_values(&[outcome.as_label()]).inc();
        self.duration.observe(elapsed.as_secs_f64());
    }

    pub fn probe_count(&self, outcome: ProbeOutcome) -> u64 {
        self.probes.with_label_values(&[outcome.as_label()]).get()
    }

    /// Render the registry in Prometheus text format
    pub fn encode(&self) -> Result<String> {
        let encoder = TextEncoder::new();
        let mut buffer = Vec::new();
        encoder
            .encode(&self.registry.gather(), &mut buffer)
            .map_err(metrics_error)?;
        String::from_utf8(buffer)
            .map_err(|e| NexsanError::Other(format!("Metrics are not UTF-8: {}", e)))
    }
}

fn metrics_error(e: prometheus::Error) -> NexsanError {
    NexsanError::Other(format!("Self metrics: {}", e))
}
