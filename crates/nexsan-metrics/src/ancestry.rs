//! Parent lookup for a status document
//!
//! Firmware versions differ in how deeply components are nested (a PSU may sit
//! directly in its section or inside an `enclosure` wrapper), so enclosing
//! components are found by walking parent links rather than fixed paths.

use crate::tree::{Node, NodeId, StatusTree};

/// Map from every node of one document to its immediate parent
#[derive(Debug, Clone)]
pub struct AncestryIndex {
    parents: Vec<Option<NodeId>>,
}

impl AncestryIndex {
    pub fn build(tree: &StatusTree) -> Self {
        let mut parents = vec![None; tree.len()];
        for node in tree.nodes() {
            for child in node.children() {
                parents[child.id().index()] = Some(node.id());
            }
        }
        Self { parents }
    }

    /// Immediate parent, or `None` for the root
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.parents.get(node.index()).copied().flatten()
    }

    /// Proper ancestors, nearest first
    pub fn ancestors(&self, node: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(node), move |&id| self.parent(id))
    }

    /// Closest proper ancestor with the given tag
    pub fn nearest<'a>(&self, node: Node<'a>, tag: &str) -> Option<Node<'a>> {
        let tree = node.tree();
        self.ancestors(node.id())
            .map(|id| tree.node(id))
            .find(|n| n.tag() == tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"<nexsan_op_status>
        <nexsan_env_status version="3">
            <enclosure id="1"><psu id="2"/></enclosure>
            <psu id="3"/>
        </nexsan_env_status>
    </nexsan_op_status>"#;

    #[test]
    fn test_root_has_no_parent() {
        let tree = StatusTree::parse(DOC).unwrap();
        let index = AncestryIndex::build(&tree);
        assert_eq!(index.parent(tree.root().id()), None);
    }

    #[test]
    fn test_parent_links() {
        let tree = StatusTree::parse(DOC).unwrap();
        let index = AncestryIndex::build(&tree);
        let section = tree.root().child("nexsan_env_status").unwrap();
        let enclosure = section.child("enclosure").unwrap();
        let psu = enclosure.child("psu").unwrap();

        assert_eq!(index.parent(psu.id()), Some(enclosure.id()));
        assert_eq!(index.parent(enclosure.id()), Some(section.id()));
        assert_eq!(index.ancestors(psu.id()).count(), 3);
    }

    #[test]
    fn test_nearest_independent_of_depth() {
        let tree = StatusTree::parse(DOC).unwrap();
        let index = AncestryIndex::build(&tree);
        let psus: Vec<_> = tree.root().descendants_named("psu").collect();

        let wrapped = index.nearest(psus[0], "enclosure").unwrap();
        assert_eq!(wrapped.attr("id"), Some("1"));
        assert!(index.nearest(psus[1], "enclosure").is_none());
    }
}
