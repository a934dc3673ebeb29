//! Arena representation of a parsed status document
//!
//! Every element becomes one node in a flat vector; children are referenced by
//! index. Parents are deliberately not stored here, see `AncestryIndex`.

use nexsan_core::{NexsanError, Result};

/// Index of a node within its `StatusTree`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
struct NodeData {
    tag: String,
    attributes: Vec<(String, String)>,
    text: String,
    children: Vec<NodeId>,
}

/// A parsed status document. The root element is always node 0.
#[derive(Debug, Clone)]
pub struct StatusTree {
    nodes: Vec<NodeData>,
}

impl StatusTree {
    /// Parse an XML status document
    pub fn parse(xml: &str) -> Result<Self> {
        // Some firmware emits a DOCTYPE line ahead of the root element
        let options = roxmltree::ParsingOptions {
            allow_dtd: true,
            ..Default::default()
        };
        let document = roxmltree::Document::parse_with_options(xml, options)
            .map_err(|e| NexsanError::Malformed(e.to_string()))?;

        let mut tree = Self { nodes: Vec::new() };
        tree.insert(document.root_element());
        Ok(tree)
    }

    fn insert(&mut self, element: roxmltree::Node<'_, '_>) -> NodeId {
        let id = NodeId(self.nodes.len());
        let text: String = element
            .children()
            .filter(|n| n.is_text())
            .filter_map(|n| n.text())
            .collect();

        self.nodes.push(NodeData {
            tag: element.tag_name().name().to_string(),
            attributes: element
                .attributes()
                .map(|a| (a.name().to_string(), a.value().to_string()))
                .collect(),
            text: text.trim().to_string(),
            children: Vec::new(),
        });

        for child in element.children().filter(|n| n.is_element()) {
            let child_id = self.insert(child);
            self.nodes[id.0].children.push(child_id);
        }
        id
    }

    pub fn root(&self) -> Node<'_> {
        self.node(NodeId(0))
    }

    pub fn node(&self, id: NodeId) -> Node<'_> {
        Node { tree: self, id }
    }

    /// Every node in document (pre-)order
    pub fn nodes(&self) -> impl Iterator<Item = Node<'_>> {
        (0..self.nodes.len()).map(move |i| self.node(NodeId(i)))
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Borrowed handle to one element of a `StatusTree`
#[derive(Debug, Clone, Copy)]
pub struct Node<'a> {
    tree: &'a StatusTree,
    id: NodeId,
}

impl<'a> Node<'a> {
    fn data(&self) -> &'a NodeData {
        &self.tree.nodes[self.id.0]
    }

    pub fn id(&self) -> NodeId {
        self.id
    }

    pub fn tree(&self) -> &'a StatusTree {
        self.tree
    }

    pub fn tag(&self) -> &'a str {
        &self.data().tag
    }

    pub fn attr(&self, name: &str) -> Option<&'a str> {
        self.data()
            .attributes
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Direct text content, trimmed
    pub fn text(&self) -> &'a str {
        &self.data().text
    }

    pub fn children(&self) -> impl Iterator<Item = Node<'a>> + 'a {
        let tree = self.tree;
        self.data().children.iter().map(move |&id| tree.node(id))
    }

    /// First direct child with the given tag
    pub fn child(&self, tag: &str) -> Option<Node<'a>> {
        self.children().find(|c| c.tag() == tag)
    }

    /// All nodes below this one in document order, excluding itself
    pub fn descendants(&self) -> Descendants<'a> {
        let mut stack = self.data().children.clone();
        stack.reverse();
        Descendants {
            tree: self.tree,
            stack,
        }
    }

    /// Descendants with the given tag, at any depth
    pub fn descendants_named(&self, tag: &'a str) -> impl Iterator<Item = Node<'a>> + 'a {
        self.descendants().filter(move |n| n.tag() == tag)
    }
}

/// Pre-order walk below a node
pub struct Descendants<'a> {
    tree: &'a StatusTree,
    stack: Vec<NodeId>,
}

impl<'a> Iterator for Descendants<'a> {
    type Item = Node<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let id = self.stack.pop()?;
        let node = self.tree.node(id);
        self.stack
            .extend(node.data().children.iter().rev().copied());
        Some(node)
    }
}
