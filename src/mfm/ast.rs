//! MFM syntax tree
//!
//! The parser produces a flat list of top-level [`Node`]s. Container variants
//! own their children; there are no back references. A node list never holds
//! two adjacent [`Node::Text`] siblings.

use serde::Serialize;
use std::collections::BTreeMap;

/// Ordered list of sibling nodes.
pub type Nodes = Vec<Node>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum QuoteLevel {
    L1,
    L2,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Node {
    Text(String),
    Quote { level: QuoteLevel, children: Nodes },
    Center(Nodes),
    Big(Nodes),
    Bold(Nodes),
    Small(Nodes),
    Italic(Nodes),
    Strike(Nodes),
    Function(FunctionNode),
    InlineCode(Nodes),
    EmojiCode(String),
    Mention(String),
    Url(String),
}

impl Node {
    pub fn text(value: impl Into<String>) -> Self {
        Node::Text(value.into())
    }

    /// Whether a renderer should lay this node out inline.
    ///
    /// Quotes and centered blocks are the only block-level nodes.
    pub fn is_inline(&self) -> bool {
        !matches!(self, Node::Quote { .. } | Node::Center(_))
    }

    /// Returns the text of a [`Node::Text`].
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Node::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Node::Text(_))
    }

    /// Returns nested nodes for container variants.
    pub fn children(&self) -> Option<&[Node]> {
        match self {
            Node::Quote { children, .. }
            | Node::Center(children)
            | Node::Big(children)
            | Node::Bold(children)
            | Node::Small(children)
            | Node::Italic(children)
            | Node::Strike(children)
            | Node::InlineCode(children) => Some(children),
            Node::Function(function) => Some(&function.children),
            Node::Text(_) | Node::EmojiCode(_) | Node::Mention(_) | Node::Url(_) => None,
        }
    }

    /// Short variant name, as used by the text formats.
    pub fn label(&self) -> &'static str {
        match self {
            Node::Text(_) => "Text",
            Node::Quote { .. } => "Quote",
            Node::Center(_) => "Center",
            Node::Big(_) => "Big",
            Node::Bold(_) => "Bold",
            Node::Small(_) => "Small",
            Node::Italic(_) => "Italic",
            Node::Strike(_) => "Strike",
            Node::Function(_) => "Function",
            Node::InlineCode(_) => "InlineCode",
            Node::EmojiCode(_) => "EmojiCode",
            Node::Mention(_) => "Mention",
            Node::Url(_) => "Url",
        }
    }
}

/// A `$[props children]` function call.
///
/// Only `props` is stored; [`FunctionNode::name`] and [`FunctionNode::args`]
/// are derived from it on demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunctionNode {
    pub props: String,
    pub children: Nodes,
}

impl FunctionNode {
    pub fn new(props: impl Into<String>, children: Nodes) -> Self {
        Self {
            props: props.into(),
            children,
        }
    }

    /// Everything before the first `.`.
    pub fn name(&self) -> &str {
        match self.props.split_once('.') {
            Some((name, _)) => name,
            None => &self.props,
        }
    }

    /// `key=value` pairs after the first `.`, separated by `,`.
    ///
    /// A key without `=` maps to the empty string.
    pub fn args(&self) -> BTreeMap<String, String> {
        let Some((_, rest)) = self.props.split_once('.') else {
            return BTreeMap::new();
        };
        rest.split(',')
            .filter(|piece| !piece.is_empty())
            .map(|piece| match piece.split_once('=') {
                Some((key, value)) => (key.to_string(), value.to_string()),
                None => (piece.to_string(), String::new()),
            })
            .collect()
    }
}
