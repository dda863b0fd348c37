//! Sibling list builder that keeps adjacent text merged.
use crate::mfm::ast::{Node, Nodes};

#[derive(Debug, Default)]
pub struct NodeBuilder {
    nodes: Nodes,
}

impl NodeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append text, extending a trailing `Text` node when there is one.
    pub fn append_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        match self.nodes.last_mut() {
            Some(Node::Text(last)) => last.push_str(text),
            _ => self.nodes.push(Node::text(text)),
        }
    }

    pub fn append_node(&mut self, node: Node) {
        match node {
            Node::Text(text) => self.append_text(&text),
            node => self.nodes.push(node),
        }
    }

    pub fn append_all(&mut self, nodes: Nodes) {
        for node in nodes {
            self.append_node(node);
        }
    }

    pub fn finish(self) -> Nodes {
        self.nodes
    }
}
