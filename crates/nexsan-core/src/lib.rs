//! # nexsan-core
//!
//! Core types for the Nexsan storage array exporter.
//!
//! - `MetricFamily` / `Sample` / `FamilySet`: the typed output of one probe
//! - `FamilySpec`: the static name, kind and label schema of a family
//! - `NexsanError`: the error type shared by every crate in the workspace
//! - `ExporterConfig`: listener and probe settings

pub mod config;
mod error;
mod types;

pub use config::ExporterConfig;
pub use error::{NexsanError, Result};
pub use types::*;
