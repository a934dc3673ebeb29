//! Validity marker normalization

use crate::tree::Node;

/// Attribute carrying a measurement's validity marker
pub const VALIDITY_ATTR: &str = "good";

/// Marker value meaning the measurement is within its healthy range
pub const GOOD_MARKER: &str = "yes";

/// `1.0` for the good marker, `0.0` for any other value.
pub fn normalize(marker: &str) -> f64 {
    if marker.trim() == GOOD_MARKER {
        1.0
    } else {
        0.0
    }
}

/// Normalized validity of a node, `None` when it carries no marker.
pub fn validity(node: Node<'_>) -> Option<f64> {
    node.attr(VALIDITY_ATTR).map(normalize)
}
