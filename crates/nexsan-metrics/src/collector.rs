//! Translation of one status document into metric families

use crate::ancestry::AncestryIndex;
use crate::builder::FamilyBuilder;
use crate::sections::{self, SectionKind};
use crate::tree::StatusTree;
use nexsan_core::{FamilySet, Result};
use tracing::debug;

/// Translate a parsed status document.
///
/// Every call starts from an empty builder and a freshly built ancestry index,
/// so the same tree always yields the same families and samples.
pub fn translate(tree: &StatusTree) -> FamilySet {
    let ancestry = AncestryIndex::build(tree);
    let mut builder = FamilyBuilder::new();

    for section in tree.root().children() {
        match SectionKind::from_tag(section.tag()) {
            Some(kind) => {
                debug!(
                    "Translating section {} (version {})",
                    kind,
                    section.attr("version").unwrap_or("unknown")
                );
                sections::dispatch(kind, section, &ancestry, &mut builder);
            }
            None => debug!("Ignoring unrecognised section <{}>", section.tag()),
        }
    }

    let families = builder.finish();
    debug!(
        "Translated {} families with {} samples",
        families.len(),
        families.sample_count()
    );
    families
}

/// Parse and translate a raw XML status document
pub fn translate_str(xml: &str) -> Result<FamilySet> {
    let tree = StatusTree::parse(xml)?;
    Ok(translate(&tree))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_sections_ignored() {
        let set = translate_str(
            r#"<nexsan_op_status><nexsan_future_stats version="9"><x/></nexsan_future_stats></nexsan_op_status>"#,
        )
        .unwrap();
        assert!(set.is_empty());
    }

    #[test]
    fn test_only_present_sections_declare_families() {
        let set = translate_str(
            r#"<nexsan_op_status><nexsan_maid_stats version="1"/></nexsan_op_status>"#,
        )
        .unwrap();
        assert_eq!(set.len(), SectionKind::MaidStats.families().len());
        assert!(set.get("nexsan_sys_info").is_none());
        assert_eq!(set.sample_count(), 0);
    }

    #[test]
    fn test_malformed_document_is_error() {
        assert!(translate_str("not xml at all").is_err());
    }
}
