//! # nexsan-metrics
//!
//! Translation of Nexsan status documents into Prometheus metric families.
//!
//! This crate provides:
//! - `StatusTree`: the parsed status document
//! - `AncestryIndex`: nearest-enclosing-component lookups
//! - `translate`: one stateless pass from document to `FamilySet`
//! - `exposition`: Prometheus text rendering of a `FamilySet`

pub mod ancestry;
mod builder;
pub mod coerce;
mod collector;
pub mod exposition;
pub mod health;
pub mod sections;
pub mod tree;

pub use ancestry::AncestryIndex;
pub use builder::FamilyBuilder;
pub use collector::{translate, translate_str};
pub use sections::SectionKind;
pub use tree::{Node, NodeId, StatusTree};
