//! `nexsan_env_status`: PSU, controller and pod environmentals
//!
//! Components are found at any depth; schema version 1 lists them directly in
//! the section, later versions wrap them in `enclosure` elements.

use super::enclosing_id;
use crate::ancestry::AncestryIndex;
use crate::builder::FamilyBuilder;
use crate::coerce;
use crate::health;
use crate::tree::Node;
use nexsan_core::FamilySpec;

const PSU_POWER_GOOD: FamilySpec = FamilySpec::gauge(
    "nexsan_env_psu_power_good",
    "PSU power output is within range",
    &["psu", "enclosure"],
);
const PSU_POWER_WATTS: FamilySpec = FamilySpec::gauge(
    "nexsan_env_psu_power_watts",
    "PSU power draw",
    &["psu", "enclosure"],
);
const PSU_TEMP_CELSIUS: FamilySpec = FamilySpec::gauge(
    "nexsan_env_psu_temp_celsius",
    "PSU temperature",
    &["psu", "enclosure"],
);
const PSU_TEMP_GOOD: FamilySpec = FamilySpec::gauge(
    "nexsan_env_psu_temp_good",
    "PSU temperature is within range",
    &["psu", "enclosure"],
);
const PSU_BLOWER_RPM: FamilySpec = FamilySpec::gauge(
    "nexsan_env_psu_blower_rpm",
    "PSU cooling fan speed",
    &["psu", "enclosure", "blower"],
);
const PSU_BLOWER_GOOD: FamilySpec = FamilySpec::gauge(
    "nexsan_env_psu_blower_good",
    "PSU cooling fan is within range",
    &["psu", "enclosure", "blower"],
);

const CONTROLLER_VOLTAGE_VOLTS: FamilySpec = FamilySpec::gauge(
    "nexsan_env_controller_voltage_volts",
    "Controller supply voltage",
    &["controller", "enclosure", "voltage"],
);
const CONTROLLER_VOLTAGE_GOOD: FamilySpec = FamilySpec::gauge(
    "nexsan_env_controller_voltage_good",
    "Controller supply voltage is within range",
    &["controller", "enclosure", "voltage"],
);
const CONTROLLER_TEMP_CELSIUS: FamilySpec = FamilySpec::gauge(
    "nexsan_env_controller_temp_celsius",
    "Controller temperature",
    &["controller", "enclosure", "temp"],
);
const CONTROLLER_TEMP_GOOD: FamilySpec = FamilySpec::gauge(
    "nexsan_env_controller_temp_good",
    "Controller temperature is within range",
    &["controller", "enclosure", "temp"],
);
const CONTROLLER_BATTERY_CHARGE_GOOD: FamilySpec = FamilySpec::gauge(
    "nexsan_env_controller_battery_charge_good",
    "Controller cache battery charge is within range",
    &["controller", "enclosure", "battery"],
);

const POD_VOLTAGE_VOLTS: FamilySpec = FamilySpec::gauge(
    "nexsan_env_pod_voltage_volts",
    "Disk pod supply voltage",
    &["pod", "enclosure", "voltage"],
);
const POD_VOLTAGE_GOOD: FamilySpec = FamilySpec::gauge(
    "nexsan_env_pod_voltage_good",
    "Disk pod supply voltage is within range",
    &["pod", "enclosure", "voltage"],
);
const POD_TEMP_CELSIUS: FamilySpec = FamilySpec::gauge(
    "nexsan_env_pod_temp_celsius",
    "Disk pod temperature",
    &["pod", "enclosure", "temp"],
);
const POD_TEMP_GOOD: FamilySpec = FamilySpec::gauge(
    "nexsan_env_pod_temp_good",
    "Disk pod temperature is within range",
    &["pod", "enclosure", "temp"],
);
const POD_FRONT_BLOWER_RPM: FamilySpec = FamilySpec::gauge(
    "nexsan_env_pod_front_blower_rpm",
    "Disk pod front panel fan speed",
    &["pod", "enclosure", "blower"],
);
const POD_FRONT_BLOWER_GOOD: FamilySpec = FamilySpec::gauge(
    "nexsan_env_pod_front_blower_good",
    "Disk pod front panel fan is within range",
    &["pod", "enclosure", "blower"],
);
const POD_TRAY_BLOWER_RPM: FamilySpec = FamilySpec::gauge(
    "nexsan_env_pod_tray_blower_rpm",
    "Disk pod tray fan speed",
    &["pod", "enclosure", "blower"],
);
const POD_TRAY_BLOWER_GOOD: FamilySpec = FamilySpec::gauge(
    "nexsan_env_pod_tray_blower_good",
    "Disk pod tray fan is within range",
    &["pod", "enclosure", "blower"],
);

pub(super) const FAMILIES: &[FamilySpec] = &[
    PSU_POWER_GOOD,
    PSU_POWER_WATTS,
    PSU_TEMP_CELSIUS,
    PSU_TEMP_GOOD,
    PSU_BLOWER_RPM,
    PSU_BLOWER_GOOD,
    CONTROLLER_VOLTAGE_VOLTS,
    CONTROLLER_VOLTAGE_GOOD,
    CONTROLLER_TEMP_CELSIUS,
    CONTROLLER_TEMP_GOOD,
    CONTROLLER_BATTERY_CHARGE_GOOD,
    POD_VOLTAGE_VOLTS,
    POD_VOLTAGE_GOOD,
    POD_TEMP_CELSIUS,
    POD_TEMP_GOOD,
    POD_FRONT_BLOWER_RPM,
    POD_FRONT_BLOWER_GOOD,
    POD_TRAY_BLOWER_RPM,
    POD_TRAY_BLOWER_GOOD,
];

/// Value family and validity family for one kind of per-probe reading
struct Reading {
    tag: &'static str,
    value: FamilySpec,
    good: FamilySpec,
}

const CONTROLLER_VOLTAGE: Reading = Reading {
    tag: "voltage",
    value: CONTROLLER_VOLTAGE_VOLTS,
    good: CONTROLLER_VOLTAGE_GOOD,
};
const CONTROLLER_TEMP: Reading = Reading {
    tag: "temperature_deg_c",
    value: CONTROLLER_TEMP_CELSIUS,
    good: CONTROLLER_TEMP_GOOD,
};
const POD_VOLTAGE: Reading = Reading {
    tag: "voltage",
    value: POD_VOLTAGE_VOLTS,
    good: POD_VOLTAGE_GOOD,
};
const POD_TEMP: Reading = Reading {
    tag: "temperature_deg_c",
    value: POD_TEMP_CELSIUS,
    good: POD_TEMP_GOOD,
};
const PSU_BLOWER: Reading = Reading {
    tag: "blower",
    value: PSU_BLOWER_RPM,
    good: PSU_BLOWER_GOOD,
};
const POD_FRONT_BLOWER: Reading = Reading {
    tag: "blower",
    value: POD_FRONT_BLOWER_RPM,
    good: POD_FRONT_BLOWER_GOOD,
};
const POD_TRAY_BLOWER: Reading = Reading {
    tag: "blower",
    value: POD_TRAY_BLOWER_RPM,
    good: POD_TRAY_BLOWER_GOOD,
};

pub(super) fn collect(section: Node<'_>, ancestry: &AncestryIndex, out: &mut FamilyBuilder) {
    for node in section.descendants() {
        match node.tag() {
            "psu" => collect_psu(node, ancestry, out),
            "controller" => collect_controller(node, ancestry, out),
            "pod" => collect_pod(node, ancestry, out),
            _ => {}
        }
    }
}

fn collect_psu(psu: Node<'_>, ancestry: &AncestryIndex, out: &mut FamilyBuilder) {
    let id = coerce::label(psu, "id");
    let enclosure = enclosing_id(psu, ancestry, "enclosure");
    let labels = [id.as_str(), enclosure.as_str()];

    if let Some(power) = psu.child("power") {
        out.maybe_push(&PSU_POWER_GOOD, &labels, health::validity(power));
        // absent before schema version 2
        out.maybe_push(
            &PSU_POWER_WATTS,
            &labels,
            coerce::attr_number(power, "watts"),
        );
    }

    if let Some(temp) = psu.child("temperature_deg_c") {
        out.maybe_push(&PSU_TEMP_CELSIUS, &labels, coerce::text_number(temp));
        out.maybe_push(&PSU_TEMP_GOOD, &labels, health::validity(temp));
    }

    emit_readings(psu, &PSU_BLOWER, &labels, out);
}

fn collect_controller(controller: Node<'_>, ancestry: &AncestryIndex, out: &mut FamilyBuilder) {
    let id = coerce::label(controller, "id");
    let enclosure = enclosing_id(controller, ancestry, "enclosure");
    let owner = [id.as_str(), enclosure.as_str()];

    emit_readings(controller, &CONTROLLER_VOLTAGE, &owner, out);
    emit_readings(controller, &CONTROLLER_TEMP, &owner, out);

    for battery in controller.descendants_named("battery") {
        let battery_id = coerce::label(battery, "id");
        out.maybe_push(
            &CONTROLLER_BATTERY_CHARGE_GOOD,
            &[owner[0], owner[1], battery_id.as_str()],
            health::validity(battery),
        );
    }
}

fn collect_pod(pod: Node<'_>, ancestry: &AncestryIndex, out: &mut FamilyBuilder) {
    let id = coerce::label(pod, "id");
    let enclosure = enclosing_id(pod, ancestry, "enclosure");
    let owner = [id.as_str(), enclosure.as_str()];

    emit_readings(pod, &POD_VOLTAGE, &owner, out);
    emit_readings(pod, &POD_TEMP, &owner, out);

    for panel in pod.descendants_named("front_panel") {
        emit_readings(panel, &POD_FRONT_BLOWER, &owner, out);
    }
    for tray in pod.descendants_named("tray") {
        emit_readings(tray, &POD_TRAY_BLOWER, &owner, out);
    }
}

/// One value sample and one validity sample per matching probe directly under
/// `parent`, labeled by the owner labels plus the probe's own `id` (empty when
/// the firmware omits it). Probes inside sub-components belong to those.
fn emit_readings(parent: Node<'_>, reading: &Reading, owner: &[&str; 2], out: &mut FamilyBuilder) {
    for probe in parent.children().filter(|n| n.tag() == reading.tag) {
        let probe_id = coerce::label(probe, "id");
        let labels = [owner[0], owner[1], probe_id.as_str()];
        out.maybe_push(&reading.value, &labels, coerce::text_number(probe));
        out.maybe_push(&reading.good, &labels, health::validity(probe));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::StatusTree;

    fn run(xml: &str) -> nexsan_core::FamilySet {
        let tree = StatusTree::parse(xml).unwrap();
        let ancestry = AncestryIndex::build(&tree);
        let mut out = FamilyBuilder::new();
        out.declare_all(FAMILIES);
        collect(tree.root(), &ancestry, &mut out);
        out.finish()
    }

    #[test]
    fn test_psu_without_watts() {
        let set = run(r#"<nexsan_env_status version="1">
            <psu id="1"><power good="no"/><temperature_deg_c good="yes">39</temperature_deg_c></psu>
        </nexsan_env_status>"#);

        let power = set.get("nexsan_env_psu_power_good").unwrap();
        assert_eq!(power.find(&[("psu", "1"), ("enclosure", "")]).unwrap().value, 0.0);
        assert!(set.get("nexsan_env_psu_power_watts").unwrap().is_empty());
        assert_eq!(set.get("nexsan_env_psu_temp_celsius").unwrap().len(), 1);
    }

    #[test]
    fn test_controller_probes_without_ids() {
        let set = run(r#"<nexsan_env_status version="2">
            <enclosure id="1">
                <controller id="0">
                    <voltage good="yes">3.3</voltage>
                    <temperature_deg_c good="no">71</temperature_deg_c>
                    <battery id="1" good="no"/>
                </controller>
            </enclosure>
        </nexsan_env_status>"#);

        let volts = set.get("nexsan_env_controller_voltage_volts").unwrap();
        let sample = volts
            .find(&[("controller", "0"), ("enclosure", "1"), ("voltage", "")])
            .unwrap();
        assert_eq!(sample.value, 3.3);

        let temp_good = set.get("nexsan_env_controller_temp_good").unwrap();
        assert_eq!(temp_good.find(&[("temp", "")]).unwrap().value, 0.0);

        let battery = set.get("nexsan_env_controller_battery_charge_good").unwrap();
        assert_eq!(battery.find(&[("battery", "1")]).unwrap().value, 0.0);
    }

    #[test]
    fn test_pod_blower_groups_are_separate() {
        let set = run(r#"<nexsan_env_status version="3">
            <enclosure id="2">
                <pod id="1">
                    <voltage id="5v" good="yes">5.02</voltage>
                    <front_panel><blower id="1" good="yes">3100</blower></front_panel>
                    <tray>
                        <blower id="1" good="no">0</blower>
                        <blower id="2" good="yes">2900</blower>
                    </tray>
                </pod>
            </enclosure>
        </nexsan_env_status>"#);

        assert_eq!(set.get("nexsan_env_pod_front_blower_rpm").unwrap().len(), 1);
        assert_eq!(set.get("nexsan_env_pod_tray_blower_rpm").unwrap().len(), 2);
        let tray_good = set.get("nexsan_env_pod_tray_blower_good").unwrap();
        assert_eq!(
            tray_good
                .find(&[("pod", "1"), ("enclosure", "2"), ("blower", "1")])
                .unwrap()
                .value,
            0.0
        );
        let volts = set.get("nexsan_env_pod_voltage_volts").unwrap();
        assert_eq!(volts.find(&[("voltage", "5v")]).unwrap().value, 5.02);
    }

    #[test]
    fn test_nested_probes_stay_with_their_component() {
        let set = run(r#"<nexsan_env_status version="3">
            <enclosure id="1">
                <controller id="0">
                    <temperature_deg_c id="cpu" good="yes">52</temperature_deg_c>
                    <battery id="1" good="yes">
                        <temperature_deg_c id="cpu" good="no">99</temperature_deg_c>
                    </battery>
                </controller>
                <pod id="1">
                    <temperature_deg_c id="1" good="yes">29</temperature_deg_c>
                    <tray>
                        <temperature_deg_c id="1" good="yes">45</temperature_deg_c>
                        <blower id="1" good="yes">2900</blower>
                    </tray>
                </pod>
            </enclosure>
        </nexsan_env_status>"#);

        let controller_temp = set.get("nexsan_env_controller_temp_celsius").unwrap();
        assert_eq!(controller_temp.len(), 1);
        assert_eq!(controller_temp.samples[0].value, 52.0);

        let pod_temp = set.get("nexsan_env_pod_temp_celsius").unwrap();
        assert_eq!(pod_temp.len(), 1);
        assert_eq!(pod_temp.samples[0].value, 29.0);
        assert_eq!(set.get("nexsan_env_pod_tray_blower_rpm").unwrap().len(), 1);
    }
}
