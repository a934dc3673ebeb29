//! `nexsan_perf_status`: controller, host port and array performance

use super::enclosing_id;
use crate::ancestry::AncestryIndex;
use crate::builder::FamilyBuilder;
use crate::coerce;
use crate::tree::Node;
use nexsan_core::FamilySpec;

/// Ports report throughput in MiB/s
const BYTES_PER_MEBIBYTE: f64 = 1_048_576.0;

const CPU_USAGE: FamilySpec = FamilySpec::gauge(
    "nexsan_perf_cpu_usage_percent",
    "Controller CPU usage",
    &["controller"],
);
const MEMORY_USAGE: FamilySpec = FamilySpec::gauge(
    "nexsan_perf_memory_usage_percent",
    "Controller memory usage",
    &["controller"],
);

const PORT_READ_BYTES: FamilySpec = FamilySpec::gauge(
    "nexsan_perf_port_read_bytes_per_second",
    "Host port read throughput",
    &["controller", "port"],
);
const PORT_WRITE_BYTES: FamilySpec = FamilySpec::gauge(
    "nexsan_perf_port_write_bytes_per_second",
    "Host port write throughput",
    &["controller", "port"],
);
const PORT_READ_IOS: FamilySpec = FamilySpec::counter(
    "nexsan_perf_port_read_ios_total",
    "Host port read IOs",
    &["controller", "port"],
);
const PORT_WRITE_IOS: FamilySpec = FamilySpec::counter(
    "nexsan_perf_port_write_ios_total",
    "Host port write IOs",
    &["controller", "port"],
);
const PORT_READ_BLOCKS: FamilySpec = FamilySpec::counter(
    "nexsan_perf_port_read_blocks_total",
    "Host port blocks read",
    &["controller", "port"],
);
const PORT_WRITE_BLOCKS: FamilySpec = FamilySpec::counter(
    "nexsan_perf_port_write_blocks_total",
    "Host port blocks written",
    &["controller", "port"],
);
const PORT_RESETS: FamilySpec = FamilySpec::counter(
    "nexsan_perf_port_resets_total",
    "Host port resets",
    &["controller", "port"],
);
const PORT_LUN_RESETS: FamilySpec = FamilySpec::counter(
    "nexsan_perf_port_lun_resets_total",
    "LUN resets received on the host port",
    &["controller", "port"],
);
const PORT_LINK_ERRORS: FamilySpec = FamilySpec::counter(
    "nexsan_perf_port_link_errors_total",
    "Host port link errors by kind",
    &["controller", "port", "error"],
);

const ARRAY_LOAD: FamilySpec = FamilySpec::gauge(
    "nexsan_perf_array_load_ratio",
    "RAID array load",
    &["array", "controller"],
);

pub(super) const FAMILIES: &[FamilySpec] = &[
    CPU_USAGE,
    MEMORY_USAGE,
    PORT_READ_BYTES,
    PORT_WRITE_BYTES,
    PORT_READ_IOS,
    PORT_WRITE_IOS,
    PORT_READ_BLOCKS,
    PORT_WRITE_BLOCKS,
    PORT_RESETS,
    PORT_LUN_RESETS,
    PORT_LINK_ERRORS,
    ARRAY_LOAD,
];

const PORT_COUNTERS: [(FamilySpec, &str); 6] = [
    (PORT_READ_IOS, "read_ios"),
    (PORT_WRITE_IOS, "write_ios"),
    (PORT_READ_BLOCKS, "read_blocks"),
    (PORT_WRITE_BLOCKS, "write_blocks"),
    (PORT_RESETS, "port_resets"),
    (PORT_LUN_RESETS, "lun_resets"),
];

pub(super) fn collect(section: Node<'_>, ancestry: &AncestryIndex, out: &mut FamilyBuilder) {
    for controller in section.descendants_named("controller") {
        collect_controller(controller, out);
    }

    for array in section.descendants_named("array") {
        let name = coerce::label(array, "name");
        let owner = match array.attr("owner") {
            Some(owner) => owner.to_string(),
            None => enclosing_id(array, ancestry, "controller"),
        };
        out.maybe_push(
            &ARRAY_LOAD,
            &[name.as_str(), owner.as_str()],
            coerce::child_number(array, "load_percent").map(coerce::ratio),
        );
    }
}

fn collect_controller(controller: Node<'_>, out: &mut FamilyBuilder) {
    let id = coerce::label(controller, "id");
    out.maybe_push(
        &CPU_USAGE,
        &[id.as_str()],
        coerce::child_number(controller, "cpu_percent"),
    );
    out.maybe_push(
        &MEMORY_USAGE,
        &[id.as_str()],
        coerce::child_number(controller, "memory_percent"),
    );

    for port in controller.descendants_named("port") {
        let port_id = port
            .attr("name")
            .or_else(|| port.attr("id"))
            .unwrap_or_default();
        let labels = [id.as_str(), port_id];

        out.maybe_push(
            &PORT_READ_BYTES,
            &labels,
            coerce::child_number(port, "read_mbps").map(|v| v * BYTES_PER_MEBIBYTE),
        );
        out.maybe_push(
            &PORT_WRITE_BYTES,
            &labels,
            coerce::child_number(port, "write_mbps").map(|v| v * BYTES_PER_MEBIBYTE),
        );
        for (spec, tag) in &PORT_COUNTERS {
            out.maybe_push(spec, &labels, coerce::child_number(port, tag));
        }

        let Some(errors) = port.child("link_errors") else {
            continue;
        };
        for error in errors.children().filter(|e| e.tag() == "error") {
            let kind = coerce::label(error, "name");
            out.maybe_push(
                &PORT_LINK_ERRORS,
                &[id.as_str(), port_id, kind.as_str()],
                coerce::text_number(error),
            );
        }
    }
}
