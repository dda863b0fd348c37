//! Main module for mfm library functionality
//!
//! The pipeline is text -> [`lexing`] -> tokens -> [`parsing`] -> nodes.

pub mod ast;
pub mod config;
pub mod formats;
pub mod lexing;
pub mod parsing;
pub mod token;

pub use ast::{FunctionNode, Node, Nodes, QuoteLevel};
pub use lexing::{tokenize, LexError, MfmLexer, TokenizeResult};
pub use parsing::option::{ParseOption, SyntaxFamily};
pub use parsing::{parse, parse_text};
pub use token::{Token, TokenKind};
