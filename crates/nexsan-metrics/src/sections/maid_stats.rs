//! `nexsan_maid_stats`: MAID (massive array of idle disks) power states

use crate::builder::FamilyBuilder;
use crate::coerce;
use crate::health;
use crate::tree::Node;
use nexsan_core::FamilySpec;

const MAID_GOOD: FamilySpec = FamilySpec::gauge(
    "nexsan_maid_good",
    "MAID power-state reporting is healthy",
    &[],
);

const GROUP_ACTIVE: FamilySpec = FamilySpec::gauge(
    "nexsan_maid_group_active_ratio",
    "Share of time the MAID group's disks were active",
    &["group"],
);
const GROUP_IDLE: FamilySpec = FamilySpec::gauge(
    "nexsan_maid_group_idle_ratio",
    "Share of time the MAID group's disks were idle",
    &["group"],
);
const GROUP_SLOW: FamilySpec = FamilySpec::gauge(
    "nexsan_maid_group_slow_ratio",
    "Share of time the MAID group's disks were spun down to reduced speed",
    &["group"],
);
const GROUP_STOPPED: FamilySpec = FamilySpec::gauge(
    "nexsan_maid_group_stopped_ratio",
    "Share of time the MAID group's disks were stopped",
    &["group"],
);
const GROUP_OFF: FamilySpec = FamilySpec::gauge(
    "nexsan_maid_group_off_ratio",
    "Share of time the MAID group's disks were powered off",
    &["group"],
);
const GROUP_STANDBY: FamilySpec = FamilySpec::gauge(
    "nexsan_maid_group_standby_ratio",
    "Share of time the MAID group's disks were in standby",
    &["group"],
);
const GROUP_EFFICIENCY: FamilySpec = FamilySpec::gauge(
    "nexsan_maid_group_efficiency_ratio",
    "MAID group power efficiency",
    &["group"],
);

pub(super) const FAMILIES: &[FamilySpec] = &[
    MAID_GOOD,
    GROUP_ACTIVE,
    GROUP_IDLE,
    GROUP_SLOW,
    GROUP_STOPPED,
    GROUP_OFF,
    GROUP_STANDBY,
    GROUP_EFFICIENCY,
];

const GROUP_STATES: [(FamilySpec, &str); 7] = [
    (GROUP_ACTIVE, "active"),
    (GROUP_IDLE, "idle"),
    (GROUP_SLOW, "slow"),
    (GROUP_STOPPED, "stopped"),
    (GROUP_OFF, "off"),
    (GROUP_STANDBY, "standby"),
    (GROUP_EFFICIENCY, "efficiency"),
];

pub(super) fn collect(section: Node<'_>, out: &mut FamilyBuilder) {
    out.maybe_push(&MAID_GOOD, &[], health::validity(section));

    for group in section.descendants_named("group") {
        let id = coerce::label(group, "id");
        for (spec, tag) in &GROUP_STATES {
            // absent states stay absent rather than reading as zero
            out.maybe_push(
                spec,
                &[id.as_str()],
                coerce::child_number(group, tag).map(coerce::ratio),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::StatusTree;

    #[test]
    fn test_absent_states_not_defaulted() {
        let tree = StatusTree::parse(
            r#"<nexsan_maid_stats version="1" good="yes">
                <group id="0"><active>50</active><idle>25</idle><off>25</off></group>
                <group id="1"><standby>100</standby></group>
            </nexsan_maid_stats>"#,
        )
        .unwrap();
        let mut out = FamilyBuilder::new();
        out.declare_all(FAMILIES);
        collect(tree.root(), &mut out);
        let set = out.finish();

        assert_eq!(set.get("nexsan_maid_good").unwrap().samples[0].value, 1.0);
        let active = set.get("nexsan_maid_group_active_ratio").unwrap();
        assert_eq!(active.len(), 1);
        assert_eq!(active.find(&[("group", "0")]).unwrap().value, 0.5);
        assert!(set.get("nexsan_maid_group_slow_ratio").unwrap().is_empty());
        assert_eq!(
            set.get("nexsan_maid_group_standby_ratio").unwrap().samples[0].value,
            1.0
        );
    }
}
