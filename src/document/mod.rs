//! In-memory document tree for form templates.
//!
//! The tree is DOM-shaped: every node has a name, an attribute map and an
//! ordered list of children. Non-element nodes use the DOM pseudo-names
//! (`#text`, `#comment`, ...) and keep their raw content. The substitution
//! pass only rewrites attribute text; it never inserts or removes nodes.

mod xml;

use indexmap::IndexMap;

use crate::error::DocumentError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Element,
    /// Character data, stored escaped exactly as read.
    Text,
    CData,
    Comment,
    ProcessingInstruction,
    DocType,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    pub kind: NodeKind,
    pub name: String,
    pub attributes: IndexMap<String, String>,
    pub children: Vec<Node>,
    pub content: Option<String>,
}

impl Node {
    pub fn element(name: impl Into<String>) -> Self {
        Self {
            kind: NodeKind::Element,
            name: name.into(),
            attributes: IndexMap::new(),
            children: Vec::new(),
            content: None,
        }
    }

    pub fn text(raw: impl Into<String>) -> Self {
        Self::leaf(NodeKind::Text, "#text", raw)
    }

    pub fn cdata(content: impl Into<String>) -> Self {
        Self::leaf(NodeKind::CData, "#cdata-section", content)
    }

    pub fn comment(content: impl Into<String>) -> Self {
        Self::leaf(NodeKind::Comment, "#comment", content)
    }

    pub fn processing_instruction(content: impl Into<String>) -> Self {
        Self::leaf(NodeKind::ProcessingInstruction, "#processing-instruction", content)
    }

    pub fn doctype(content: impl Into<String>) -> Self {
        Self::leaf(NodeKind::DocType, "#doctype", content)
    }

    fn leaf(kind: NodeKind, name: &str, content: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.to_string(),
            attributes: IndexMap::new(),
            children: Vec::new(),
            content: Some(content.into()),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    pub fn with_child(mut self, child: Node) -> Self {
        self.children.push(child);
        self
    }

    pub fn with_children(mut self, children: impl IntoIterator<Item = Node>) -> Self {
        self.children.extend(children);
        self
    }

    pub fn is_element(&self) -> bool {
        self.kind == NodeKind::Element
    }

    /// Case-insensitive element name check.
    pub fn is_named(&self, name: &str) -> bool {
        self.is_element() && self.name.eq_ignore_ascii_case(name)
    }

    pub fn attribute(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    /// Overwrites an existing attribute or appends a new one.
    pub fn set_attribute(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.attributes.insert(name.into(), value.into());
    }

    /// Number of nodes in this subtree, including `self`.
    pub fn node_count(&self) -> usize {
        1 + self.children.iter().map(Node::node_count).sum::<usize>()
    }

    /// First element named `name` (ignoring case), in depth-first pre-order.
    pub fn find_element(&self, name: &str) -> Option<&Node> {
        if self.is_named(name) {
            return Some(self);
        }
        self.children.iter().find_map(|child| child.find_element(name))
    }

    pub fn find_element_mut(&mut self, name: &str) -> Option<&mut Node> {
        if self.is_named(name) {
            return Some(self);
        }
        self.children
            .iter_mut()
            .find_map(|child| child.find_element_mut(name))
    }
}

/// The `<?xml ...?>` declaration, if the source had one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Declaration {
    pub version: String,
    pub encoding: Option<String>,
    pub standalone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Document {
    pub declaration: Option<Declaration>,
    /// Top-level nodes: the root element plus any surrounding comments,
    /// processing instructions, doctype and whitespace.
    pub nodes: Vec<Node>,
}

impl Document {
    pub fn new(root: Node) -> Self {
        Self {
            declaration: None,
            nodes: vec![root],
        }
    }

    pub fn parse(xml: &str) -> Result<Self, DocumentError> {
        xml::parse_document(xml)
    }

    pub fn to_xml_string(&self) -> Result<String, DocumentError> {
        xml::write_document(self)
    }

    pub fn root(&self) -> Option<&Node> {
        self.nodes.iter().find(|node| node.is_element())
    }

    pub fn find_element(&self, name: &str) -> Option<&Node> {
        self.nodes.iter().find_map(|node| node.find_element(name))
    }

    pub fn find_element_mut(&mut self, name: &str) -> Option<&mut Node> {
        self.nodes
            .iter_mut()
            .find_map(|node| node.find_element_mut(name))
    }
}
