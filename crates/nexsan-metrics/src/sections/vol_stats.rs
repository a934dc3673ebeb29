//! `nexsan_vol_stats`: per-volume, per-access-path IO counters

use super::enclosing_id;
use crate::ancestry::AncestryIndex;
use crate::builder::FamilyBuilder;
use crate::coerce;
use crate::tree::Node;
use nexsan_core::FamilySpec;

const PATH_LABELS: &[&str] = &[
    "volume",
    "name",
    "array",
    "serial",
    "initiator",
    "target",
    "lun",
];

const VOL_OPS: FamilySpec =
    FamilySpec::counter("nexsan_vol_ops_total", "Total operations", PATH_LABELS);
const VOL_READ_OPS: FamilySpec =
    FamilySpec::counter("nexsan_vol_read_ops_total", "Read operations", PATH_LABELS);
const VOL_WRITE_OPS: FamilySpec =
    FamilySpec::counter("nexsan_vol_write_ops_total", "Write operations", PATH_LABELS);
const VOL_READ_BLOCKS: FamilySpec =
    FamilySpec::counter("nexsan_vol_read_blocks_total", "Blocks read", PATH_LABELS);
const VOL_WRITE_BLOCKS: FamilySpec =
    FamilySpec::counter("nexsan_vol_write_blocks_total", "Blocks written", PATH_LABELS);

pub(super) const FAMILIES: &[FamilySpec] = &[
    VOL_OPS,
    VOL_READ_OPS,
    VOL_WRITE_OPS,
    VOL_READ_BLOCKS,
    VOL_WRITE_BLOCKS,
];

/// Counter family and the path child element that feeds it
const PATH_COUNTERS: [(FamilySpec, &str); 5] = [
    (VOL_OPS, "total_ops"),
    (VOL_READ_OPS, "read_ops"),
    (VOL_WRITE_OPS, "write_ops"),
    (VOL_READ_BLOCKS, "read_blocks"),
    (VOL_WRITE_BLOCKS, "write_blocks"),
];

pub(super) fn collect(section: Node<'_>, ancestry: &AncestryIndex, out: &mut FamilyBuilder) {
    for volume in section.descendants_named("volume") {
        let id = coerce::label(volume, "id");
        let name = coerce::label(volume, "name");
        let serial = coerce::label(volume, "serial");
        // v1 names the array on the volume, later versions nest volumes in it
        let array = match volume.attr("array") {
            Some(array) => array.to_string(),
            None => enclosing_id(volume, ancestry, "array"),
        };

        for path in volume.descendants_named("path") {
            let initiator = coerce::label(path, "initiator");
            let target = coerce::label(path, "target");
            let lun = coerce::label(path, "lun");
            let labels = [
                id.as_str(),
                name.as_str(),
                array.as_str(),
                serial.as_str(),
                initiator.as_str(),
                target.as_str(),
                lun.as_str(),
            ];

            for (spec, tag) in &PATH_COUNTERS {
                out.maybe_push(spec, &labels, coerce::child_number(path, tag));
            }
        }
    }
}
