//! Output formats
//!
//!     Nodes can be rendered as a treeviz listing (for humans), or serialized as
//!     JSON or YAML (for tools). Tokens have a simple one-per-line listing of
//!     `kind: [extracted] [whole]` plus JSON.

pub mod treeviz;

use crate::mfm::ast::Node;
use crate::mfm::token::Token;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

pub use treeviz::{to_treeviz_str, to_treeviz_str_with};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    Treeviz,
    Json,
    Yaml,
}

impl FromStr for OutputFormat {
    type Err = FormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "treeviz" => Ok(OutputFormat::Treeviz),
            "json" => Ok(OutputFormat::Json),
            "yaml" => Ok(OutputFormat::Yaml),
            other => Err(FormatError::UnknownFormat(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    UnknownFormat(String),
    Serialization(String),
}

impl fmt::Display for FormatError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormatError::UnknownFormat(name) => write!(f, "Unknown format '{}'", name),
            FormatError::Serialization(msg) => write!(f, "Serialization failed: {}", msg),
        }
    }
}

impl std::error::Error for FormatError {}

/// Render nodes in `format`; `truncate` only applies to treeviz.
pub fn serialize_nodes(
    nodes: &[Node],
    format: OutputFormat,
    truncate: usize,
) -> Result<String, FormatError> {
    match format {
        OutputFormat::Treeviz => Ok(to_treeviz_str_with(nodes, truncate)),
        OutputFormat::Json => serde_json::to_string_pretty(nodes)
            .map_err(|e| FormatError::Serialization(e.to_string())),
        OutputFormat::Yaml => {
            serde_yaml::to_string(nodes).map_err(|e| FormatError::Serialization(e.to_string()))
        }
    }
}

/// One line per token: `Kind: [extracted] [whole]`, newlines escaped.
pub fn format_tokens(tokens: &[Token]) -> String {
    tokens
        .iter()
        .map(|token| {
            format!(
                "{:?}: [{}] [{}]\n",
                token.kind,
                token.extracted.escape_debug(),
                token.whole.escape_debug()
            )
        })
        .collect()
}

pub fn tokens_to_json(tokens: &[Token]) -> Result<String, FormatError> {
    serde_json::to_string_pretty(tokens).map_err(|e| FormatError::Serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mfm::token::TokenKind;

    #[test]
    fn test_format_tokens() {
        let tokens = vec![
            Token::string("a\n"),
            Token::new(TokenKind::BoldAsta, "**"),
        ];
        assert_eq!(format_tokens(&tokens), "StringLit: [a\\n] [a\\n]\nBoldAsta: [**] [**]\n");
    }

    #[test]
    fn test_json_nodes() {
        let json = serialize_nodes(&[Node::Bold(vec![Node::text("a")])], OutputFormat::Json, 0)
            .unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value, serde_json::json!([{ "Bold": [{ "Text": "a" }] }]));
    }

    #[test]
    fn test_unknown_format() {
        assert_eq!(
            "xml".parse::<OutputFormat>(),
            Err(FormatError::UnknownFormat("xml".to_string()))
        );
    }
}
