//! # mfm
//!
//! Lexer and parser for Misskey-flavored markup (MFM).
//!
//! Text is scanned into [`Token`](mfm::Token)s and parsed into a tree of
//! [`Node`](mfm::Node)s. Malformed markup never fails; whatever does not form
//! a construct comes back as text.
//!
//! ```text
//! let nodes = mfm::parse_text("**hoge**", ParseOption::default());
//! ```

pub mod mfm;

pub use mfm::{parse, parse_text, tokenize, Node, ParseOption, SyntaxFamily, Token, TokenKind};
