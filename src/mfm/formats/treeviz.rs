//! Treeviz formatter for MFM nodes
//!
//! Treeviz prints one line per node, so a parse result can be scanned quickly
//! in a terminal. Nesting is drawn with box connectors, two columns per level.
//!
//! The format is:
//! <prefix><connector> <icon> <label>
//!
//! Example:
//!
//!   ├─ ◦ "aaa"
//!   └─ 𝐁 Bold
//!     └─ ◦ "hoge"
//!
//! Icons
//!     Blocks:
//!         Quote: ❝
//!         Center: ≡
//!     Containers:
//!         Big: ⇑
//!         Bold: 𝐁
//!         Small: ˢ
//!         Italic: 𝐼
//!         Strike: ⌿
//!         Function: $
//!         InlineCode: ƒ
//!     Leaves:
//!         Text: ◦
//!         EmojiCode: ☺
//!         Mention: @
//!         Url: ⇗

use crate::mfm::ast::Node;

fn truncate(s: &str, max_chars: usize) -> String {
    if max_chars > 0 && s.chars().count() > max_chars {
        let mut truncated = s.chars().take(max_chars).collect::<String>();
        truncated.push_str("...");
        truncated
    } else {
        s.to_string()
    }
}

fn get_icon(node: &Node) -> &'static str {
    match node {
        Node::Text(_) => "◦",
        Node::Quote { .. } => "❝",
        Node::Center(_) => "≡",
        Node::Big(_) => "⇑",
        Node::Bold(_) => "𝐁",
        Node::Small(_) => "ˢ",
        Node::Italic(_) => "𝐼",
        Node::Strike(_) => "⌿",
        Node::Function(_) => "$",
        Node::InlineCode(_) => "ƒ",
        Node::EmojiCode(_) => "☺",
        Node::Mention(_) => "@",
        Node::Url(_) => "⇗",
    }
}

fn get_label(node: &Node, max_chars: usize) -> String {
    match node {
        Node::Text(value) => format!("{:?}", truncate(value, max_chars)),
        Node::Quote { level, .. } => format!("Quote {:?}", level),
        Node::Function(function) => format!("Function {}", function.props),
        Node::EmojiCode(value) | Node::Mention(value) | Node::Url(value) => {
            truncate(value, max_chars)
        }
        _ => node.label().to_string(),
    }
}

fn format_node(
    node: &Node,
    prefix: &str,
    child_index: usize,
    child_count: usize,
    max_chars: usize,
    output: &mut String,
) {
    let is_last = child_index == child_count - 1;
    let connector = if is_last { "└─" } else { "├─" };

    output.push_str(&format!(
        "{}{} {} {}\n",
        prefix,
        connector,
        get_icon(node),
        get_label(node, max_chars)
    ));

    if let Some(children) = node.children() {
        let child_prefix = format!("{}{}", prefix, if is_last { "  " } else { "│ " });
        for (i, child) in children.iter().enumerate() {
            format_node(child, &child_prefix, i, children.len(), max_chars, output);
        }
    }
}

/// Render nodes, cutting text labels after `max_chars` characters (0 = never).
pub fn to_treeviz_str_with(nodes: &[Node], max_chars: usize) -> String {
    let mut output = String::new();
    for (i, node) in nodes.iter().enumerate() {
        format_node(node, "", i, nodes.len(), max_chars, &mut output);
    }
    output
}

pub fn to_treeviz_str(nodes: &[Node]) -> String {
    to_treeviz_str_with(nodes, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("hello", 3), "hel...");
        assert_eq!(truncate("hello", 0), "hello");
        assert_eq!(truncate("ほげ", 5), "ほげ");
    }

    #[test]
    fn test_connectors() {
        let nodes = vec![
            Node::text("aaa"),
            Node::Bold(vec![Node::text("hoge")]),
        ];
        assert_eq!(
            to_treeviz_str(&nodes),
            "├─ ◦ \"aaa\"\n└─ 𝐁 Bold\n  └─ ◦ \"hoge\"\n"
        );
    }

    #[test]
    fn test_text_label_escapes_newlines() {
        let output = to_treeviz_str(&[Node::text("a\nb")]);
        assert_eq!(output, "└─ ◦ \"a\\nb\"\n");
    }
}
