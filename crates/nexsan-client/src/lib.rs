//! # nexsan-client
//!
//! Fetches the diagnostic status document from a Nexsan array.
//!
//! Each probe is a single authenticated GET of `/admin/opstats.asp`. Nothing
//! is cached between probes; every fetch returns a freshly parsed document.

mod auth;
mod client;

pub use auth::Credentials;
pub use client::{opstats_url, ProbeClient, OPSTATS_PATH};
