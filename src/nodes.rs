//! AST node model produced by the parser and consumed by the formatter and validator.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

/// A single node of a parsed message.
///
/// Serialized with an internal `type` tag, e.g. `{"type":"placeholder","name":"count"}`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Node {
    /// Literal content.
    Text { value: String },

    /// Paired markup such as `<a>...</a>`.
    Tag { name: String, children: Vec<Node> },

    /// Self-closing markup such as `<img/>`.
    VoidTag { name: String },

    /// A `%name%` token.
    Placeholder { name: String },
}

/// Kind of a [`Node`], without its payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Text,
    Tag,
    VoidTag,
    Placeholder,
}

impl Node {
    pub fn text(value: impl Into<String>) -> Self {
        Node::Text {
            value: value.into(),
        }
    }

    /// Creates a tag node; the name is trimmed.
    pub fn tag(name: &str, children: Vec<Node>) -> Self {
        Node::Tag {
            name: name.trim().to_string(),
            children,
        }
    }

    /// Creates a void tag node; the name is trimmed.
    pub fn void_tag(name: &str) -> Self {
        Node::VoidTag {
            name: name.trim().to_string(),
        }
    }

    pub fn placeholder(name: impl Into<String>) -> Self {
        Node::Placeholder { name: name.into() }
    }

    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Text { .. } => NodeKind::Text,
            Node::Tag { .. } => NodeKind::Tag,
            Node::VoidTag { .. } => NodeKind::VoidTag,
            Node::Placeholder { .. } => NodeKind::Placeholder,
        }
    }

    /// Tag or placeholder name; `None` for text nodes.
    pub fn name(&self) -> Option<&str> {
        match self {
            Node::Text { .. } => None,
            Node::Tag { name, .. } | Node::VoidTag { name } | Node::Placeholder { name } => {
                Some(name)
            }
        }
    }

    /// Children of a paired tag; `None` for every other kind.
    pub fn children(&self) -> Option<&[Node]> {
        match self {
            Node::Tag { children, .. } => Some(children),
            _ => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Node::Text { .. })
    }

    pub fn is_tag(&self) -> bool {
        matches!(self, Node::Tag { .. })
    }

    pub fn is_void_tag(&self) -> bool {
        matches!(self, Node::VoidTag { .. })
    }

    pub fn is_placeholder(&self) -> bool {
        matches!(self, Node::Placeholder { .. })
    }

    /// Depth of the deepest tag nesting under (and including) this node.
    pub fn depth(&self) -> usize {
        max_depth(std::slice::from_ref(self))
    }
}

/// Depth of the deepest tag nesting in a node sequence.
///
/// Walks the tree with an explicit stack, so caller-built trees of any depth are safe.
pub fn max_depth(nodes: &[Node]) -> usize {
    let mut deepest = 0;
    let mut pending: Vec<(&Node, usize)> = nodes.iter().map(|node| (node, 0)).collect();

    while let Some((node, parents)) = pending.pop() {
        if let Node::Tag { children, .. } = node {
            let depth = parents + 1;
            deepest = deepest.max(depth);
            pending.extend(children.iter().map(|child| (child, depth)));
        }
    }

    deepest
}

impl Display for Node {
    /// Writes the node back in message syntax. `%` inside text is written as `%%`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Node::Text { value } => write!(f, "{}", value.replace('%', "%%")),
            Node::Tag { name, children } => {
                write!(f, "<{}>", name)?;
                for child in children {
                    write!(f, "{}", child)?;
                }
                write!(f, "</{}>", name)
            }
            Node::VoidTag { name } => write!(f, "<{}/>", name),
            Node::Placeholder { name } => write!(f, "%{}%", name),
        }
    }
}
