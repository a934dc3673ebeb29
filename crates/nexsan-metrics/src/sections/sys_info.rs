//! `nexsan_sys_info`: device identity and clock

use crate::builder::FamilyBuilder;
use crate::coerce;
use crate::tree::Node;
use nexsan_core::FamilySpec;

const SYS_INFO: FamilySpec = FamilySpec::gauge(
    "nexsan_sys_info",
    "Array identity; value is always 1",
    &["friendly_name", "system_name", "system_id", "firmware_version"],
);

const SYS_DATE_TIME: FamilySpec = FamilySpec::counter(
    "nexsan_sys_date_time",
    "Array clock at the time the status document was generated (seconds since the epoch)",
    &[],
);

pub(super) const FAMILIES: &[FamilySpec] = &[SYS_INFO, SYS_DATE_TIME];

pub(super) fn collect(section: Node<'_>, out: &mut FamilyBuilder) {
    let friendly_name = coerce::child_label(section, "friendly_name");
    let system_name = coerce::child_label(section, "system_name");
    let system_id = coerce::child_label(section, "system_id");
    let firmware_version = coerce::child_label(section, "firmware_version");

    out.push(
        &SYS_INFO,
        &[
            friendly_name.as_str(),
            system_name.as_str(),
            system_id.as_str(),
            firmware_version.as_str(),
        ],
        1.0,
    );
    out.maybe_push(
        &SYS_DATE_TIME,
        &[],
        coerce::child_number(section, "date_time"),
    );
}
