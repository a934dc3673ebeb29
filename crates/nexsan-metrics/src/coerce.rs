//! Value coercion from document text to sample values and label values
//!
//! Arrays report placeholder text (`N/A`, `--`) where a reading is
//! unavailable. Anything that is not a finite number coerces to `None` so the
//! caller skips that one sample.

use crate::tree::Node;

pub fn number(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Numeric text content of a node
pub fn text_number(node: Node<'_>) -> Option<f64> {
    number(node.text())
}

/// Numeric text content of the first child with the given tag
pub fn child_number(node: Node<'_>, tag: &str) -> Option<f64> {
    node.child(tag).and_then(text_number)
}

/// Numeric value of an attribute
pub fn attr_number(node: Node<'_>, name: &str) -> Option<f64> {
    node.attr(name).and_then(number)
}

/// Attribute value as a label, empty when absent
pub fn label(node: Node<'_>, name: &str) -> String {
    node.attr(name).unwrap_or_default().to_string()
}

/// Text of the first child with the given tag as a label, empty when absent
pub fn child_label(node: Node<'_>, tag: &str) -> String {
    node.child(tag)
        .map(|c| c.text().to_string())
        .unwrap_or_default()
}

/// Percentage to ratio
pub fn ratio(percent: f64) -> f64 {
    percent / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tree::StatusTree;

    #[test]
    fn test_number() {
        assert_eq!(number("41"), Some(41.0));
        assert_eq!(number(" 12.5 "), Some(12.5));
        assert_eq!(number("-3"), Some(-3.0));
        assert_eq!(number("N/A"), None);
        assert_eq!(number("--"), None);
        assert_eq!(number(""), None);
        assert_eq!(number("inf"), None);
        assert_eq!(number("NaN"), None);
    }

    #[test]
    fn test_node_helpers() {
        let tree = StatusTree::parse(
            r#"<r id="7"><power watts="546"/><temp>n/a</temp><name>array-1</name></r>"#,
        )
        .unwrap();
        let root = tree.root();
        assert_eq!(attr_number(root.child("power").unwrap(), "watts"), Some(546.0));
        assert_eq!(child_number(root, "temp"), None);
        assert_eq!(child_number(root, "absent"), None);
        assert_eq!(label(root, "id"), "7");
        assert_eq!(label(root, "serial"), "");
        assert_eq!(child_label(root, "name"), "array-1");
        assert_eq!(child_label(root, "absent"), "");
    }

    #[test]
    fn test_ratio() {
        assert_eq!(ratio(45.0), 0.45);
        assert_eq!(ratio(100.0), 1.0);
    }
}
