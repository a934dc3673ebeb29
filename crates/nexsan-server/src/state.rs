//! Shared state handed to every request handler

use crate::metrics::ExporterMetrics;
use nexsan_client::ProbeClient;
use nexsan_core::{ExporterConfig, Result};
use std::sync::Arc;

pub struct AppState {
    pub client: ProbeClient,
    pub metrics: ExporterMetrics,
}

pub type SharedState = Arc<AppState>;

impl AppState {
    pub fn new(client: ProbeClient, metrics: ExporterMetrics) -> SharedState {
        Arc::new(Self { client, metrics })
    }

    /// Build state from configuration
    pub fn from_config(config: &ExporterConfig) -> Result<SharedState> {
        let client = ProbeClient::new(config.probe_timeout())?;
        let metrics = ExporterMetrics::new()?;
        Ok(Self::new(client, metrics))
    }
}
