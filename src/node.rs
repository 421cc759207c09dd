use crate::attributes::Attributes;
use askama_escape::{escape, Html};
use std::fmt::{self, Display};
use tracing::debug;

/// An element, or a fragment when `tag` is empty.
///
/// Nodes are only extended while they are being built; afterwards they are
/// read-only and can be rendered any number of times.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Node {
    tag: String,
    attributes: Attributes,
    children: Vec<Content>,
}

/// Anything that renders to markup
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Node(Node),
    /// Escaped on output
    Text(String),
    /// Written verbatim
    Raw(String),
    Comment(String),
}

/// Anything that can be folded into a node under construction: attributes
/// are merged, everything else is appended as a child.
#[derive(Debug, Clone, PartialEq)]
pub enum Datum {
    Attributes(Attributes),
    Node(Node),
    Text(String),
    Raw(String),
    Comment(String),
}

impl Node {
    pub(crate) fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: Attributes::new(),
            children: vec![],
        }
    }

    pub fn tag(&self) -> &str {
        &self.tag
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn children(&self) -> &[Content] {
        &self.children
    }

    pub fn is_fragment(&self) -> bool {
        self.tag.is_empty()
    }

    /// Fold one datum into this node. Fragments carry no attributes.
    pub(crate) fn push(&mut self, datum: Datum) {
        match datum {
            Datum::Attributes(attributes) if self.is_fragment() => {
                debug!(count = attributes.len(), "Dropping attributes given to a fragment");
            }
            Datum::Attributes(attributes) => self.attributes.merge(attributes),
            Datum::Node(node) => self.children.push(Content::Node(node)),
            Datum::Text(text) => self.children.push(Content::Text(text)),
            Datum::Raw(raw) => self.children.push(Content::Raw(raw)),
            Datum::Comment(comment) => self.children.push(Content::Comment(comment)),
        }
    }

    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl Content {
    pub fn render(&self) -> String {
        self.to_string()
    }
}

impl Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_fragment() {
            return self.children.iter().try_for_each(|child| Display::fmt(child, f));
        }
        write!(f, "<{}{}", self.tag, self.attributes)?;
        // Child count decides, not rendered length
        if self.children.is_empty() {
            return f.write_str(" />");
        }
        f.write_str(">")?;
        for child in &self.children {
            Display::fmt(child, f)?;
        }
        write!(f, "</{}>", self.tag)
    }
}

impl Display for Content {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Content::Node(node) => Display::fmt(node, f),
            Content::Text(text) => write!(f, "{}", escape(text, Html)),
            Content::Raw(raw) => f.write_str(raw),
            Content::Comment(comment) => write!(f, "<!-- {} -->", comment),
        }
    }
}

impl From<Node> for Content {
    fn from(node: Node) -> Self {
        Content::Node(node)
    }
}

impl From<Attributes> for Datum {
    fn from(attributes: Attributes) -> Self {
        Datum::Attributes(attributes)
    }
}

impl From<Node> for Datum {
    fn from(node: Node) -> Self {
        Datum::Node(node)
    }
}

impl From<Content> for Datum {
    fn from(content: Content) -> Self {
        match content {
            Content::Node(node) => Datum::Node(node),
            Content::Text(text) => Datum::Text(text),
            Content::Raw(raw) => Datum::Raw(raw),
            Content::Comment(comment) => Datum::Comment(comment),
        }
    }
}

#[cfg(test)]
#[test]
fn test_self_closing_by_child_count() {
    let mut node = Node::new("div");
    assert_eq!(node.render(), "<div />");
    node.push(Datum::Text(String::new()));
    assert_eq!(node.render(), "<div></div>");
    node.push(Datum::Node(Node::default()));
    assert_eq!(node.render(), "<div></div>");
}

#[cfg(test)]
#[test]
fn test_fragment_ignores_attributes() {
    let mut node = Node::default();
    node.push(Datum::Attributes(Attributes::new().set("id", "x")));
    node.push(Datum::Raw("<br>".to_string()));
    assert!(node.attributes().is_empty());
    assert_eq!(node.render(), "<br>");
}
