//! Section dispatchers
//!
//! Each top-level child of the status document is one section. A section is
//! translated by exactly one handler, chosen by its tag; tags the exporter
//! does not know are skipped so newer firmware keeps working.

mod env_status;
mod maid_stats;
mod perf_status;
mod sys_info;
mod vol_stats;

use crate::ancestry::AncestryIndex;
use crate::builder::FamilyBuilder;
use crate::tree::Node;
use nexsan_core::FamilySpec;

/// The known top-level sections
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    /// Device identity and clock
    SysInfo,
    /// PSUs, controllers and pods
    EnvStatus,
    /// Per-volume, per-path IO counters
    VolStats,
    /// Controller, port and array performance
    PerfStatus,
    /// MAID power-state ratios
    MaidStats,
}

impl SectionKind {
    pub const ALL: [SectionKind; 5] = [
        Self::SysInfo,
        Self::EnvStatus,
        Self::VolStats,
        Self::PerfStatus,
        Self::MaidStats,
    ];

    pub fn from_tag(tag: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.tag() == tag)
    }

    pub fn tag(self) -> &'static str {
        match self {
            Self::SysInfo => "nexsan_sys_info",
            Self::EnvStatus => "nexsan_env_status",
            Self::VolStats => "nexsan_vol_stats",
            Self::PerfStatus => "nexsan_perf_status",
            Self::MaidStats => "nexsan_maid_stats",
        }
    }

    /// Every family the section's handler can emit
    pub fn families(self) -> &'static [FamilySpec] {
        match self {
            Self::SysInfo => sys_info::FAMILIES,
            Self::EnvStatus => env_status::FAMILIES,
            Self::VolStats => vol_stats::FAMILIES,
            Self::PerfStatus => perf_status::FAMILIES,
            Self::MaidStats => maid_stats::FAMILIES,
        }
    }
}

impl std::fmt::Display for SectionKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.tag())
    }
}

/// Translate one section. All of the section's families are declared first so
/// that a section with no components still reports them, empty.
pub fn dispatch(
    kind: SectionKind,
    section: Node<'_>,
    ancestry: &AncestryIndex,
    out: &mut FamilyBuilder,
) {
    out.declare_all(kind.families());
    match kind {
        SectionKind::SysInfo => sys_info::collect(section, out),
        SectionKind::EnvStatus => env_status::collect(section, ancestry, out),
        SectionKind::VolStats => vol_stats::collect(section, ancestry, out),
        SectionKind::PerfStatus => perf_status::collect(section, ancestry, out),
        SectionKind::MaidStats => maid_stats::collect(section, out),
    }
}

/// `id` of the nearest enclosing node with the given tag, empty when there is none
fn enclosing_id(node: Node<'_>, ancestry: &AncestryIndex, tag: &str) -> String {
    ancestry
        .nearest(node, tag)
        .map(|n| crate::coerce::label(n, "id"))
        .unwrap_or_default()
}
