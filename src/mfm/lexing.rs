//! Lexing
//!
//!     The lexer turns MFM source into a flat token stream. At every position the
//!     rules are tried in a fixed order and the first one that matches wins:
//!
//!         1. quote lines (`>>` before `>`)
//!         2. fixed-literal markers: center tags, `***`/`**`/`*`, the tag pairs,
//!            `__`/`_`, `~~` and the function closer `]`
//!         3. function openers `$[name `
//!         4. inline code spans
//!         5. emoji codes, mentions and URLs
//!         6. any single character
//!
//!     The lexer knows nothing about nesting. It only produces tokens; every
//!     structural decision is left to the parser.
//!
//!     After scanning, the transformations in [`transformations`] coalesce runs of
//!     single characters into string tokens and merge consecutive quote lines.
//!
//! Character classes
//!
//!     Quote lines and inline code only accept characters from a [`ContentClass`].
//!     The default class is printable ASCII plus the CJK punctuation, kana,
//!     full-width and common kanji blocks. Anything outside of it (for example
//!     `´`) makes the span fall through to plain text.

pub mod spans;
pub mod transformations;

use crate::mfm::token::marker::scan_marker;
use crate::mfm::token::{Token, TokenKind};
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

/// Errors that can occur during lexing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LexError {
    /// No rule matched at the given byte offset
    NoRuleMatched { offset: usize },
    /// A content class could not be turned into a pattern
    InvalidContentClass(String),
}

impl fmt::Display for LexError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexError::NoRuleMatched { offset } => {
                write!(f, "No lexer rule matched at offset {}", offset)
            }
            LexError::InvalidContentClass(msg) => write!(f, "Invalid content class: {}", msg),
        }
    }
}

impl std::error::Error for LexError {}

/// The set of characters allowed inside quote lines and inline code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentClass {
    ranges: Vec<(char, char)>,
}

impl ContentClass {
    pub fn new(ranges: Vec<(char, char)>) -> Result<Self, LexError> {
        if ranges.is_empty() {
            return Err(LexError::InvalidContentClass("no ranges".to_string()));
        }
        if let Some((lo, hi)) = ranges.iter().find(|(lo, hi)| lo > hi) {
            return Err(LexError::InvalidContentClass(format!(
                "range U+{:04X}-U+{:04X} is reversed",
                *lo as u32, *hi as u32
            )));
        }
        Ok(Self { ranges })
    }

    /// The ranges written as the body of a regex character class.
    fn pattern(&self) -> String {
        self.ranges
            .iter()
            .map(|(lo, hi)| format!("\\x{{{:X}}}-\\x{{{:X}}}", *lo as u32, *hi as u32))
            .collect()
    }
}

impl Default for ContentClass {
    fn default() -> Self {
        Self {
            ranges: vec![
                ('\u{0020}', '\u{007D}'),
                ('\u{3000}', '\u{303F}'),
                ('\u{3040}', '\u{309F}'),
                ('\u{30A0}', '\u{30FF}'),
                ('\u{FF00}', '\u{FFEF}'),
                ('\u{4E00}', '\u{9FCF}'),
            ],
        }
    }
}

static FUNCTION_START: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\$\[([\x21-\x7D]+) ").expect("valid function regex"));

static DEFAULT_LEXER: Lazy<MfmLexer> = Lazy::new(|| {
    MfmLexer::with_content_class(&ContentClass::default()).expect("default content class")
});

/// Outcome of [`tokenize`].
///
/// `success` is false only when no rule matched somewhere in the input; the
/// tokens produced up to that point are kept and `remainder` holds the rest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenizeResult {
    pub success: bool,
    pub tokens: Vec<Token>,
    pub remainder: String,
}

/// Tokenize with the default content class.
pub fn tokenize(text: &str) -> TokenizeResult {
    DEFAULT_LEXER.tokenize(text)
}

/// Rule-ordered MFM lexer.
#[derive(Debug, Clone)]
pub struct MfmLexer {
    quote_line2: Regex,
    quote_line1: Regex,
    inline_code: Regex,
}

impl MfmLexer {
    pub fn new() -> Self {
        DEFAULT_LEXER.clone()
    }

    pub fn with_content_class(class: &ContentClass) -> Result<Self, LexError> {
        let body = class.pattern();
        let compile = |pattern: String| {
            Regex::new(&pattern).map_err(|e| LexError::InvalidContentClass(e.to_string()))
        };
        Ok(Self {
            quote_line2: compile(format!(r"^>> ?([{}]+\n)", body))?,
            quote_line1: compile(format!(r"^> ?([{}]+\n)", body))?,
            inline_code: compile(format!(r"^`([{}&&[^`\n]]+)`", body))?,
        })
    }

    /// Scan `text` and run the post-lex transformations.
    pub fn tokenize(&self, text: &str) -> TokenizeResult {
        let mut tokens = Vec::new();
        let mut offset = 0;
        while offset < text.len() {
            let before = text[..offset].chars().next_back();
            match self.next_token(&text[offset..], before) {
                Some(token) => {
                    offset += token.len();
                    tokens.push(token);
                }
                None => break,
            }
        }

        let tokens = transformations::merge_quote_lines(transformations::coalesce_chars(tokens));
        log::debug!(
            "tokenized {} bytes into {} tokens",
            offset,
            tokens.len()
        );
        TokenizeResult {
            success: offset == text.len(),
            tokens,
            remainder: text[offset..].to_string(),
        }
    }

    /// Like [`MfmLexer::tokenize`], but a partial scan is an error.
    pub fn lex(&self, text: &str) -> Result<Vec<Token>, LexError> {
        let result = self.tokenize(text);
        if result.success {
            Ok(result.tokens)
        } else {
            Err(LexError::NoRuleMatched {
                offset: text.len() - result.remainder.len(),
            })
        }
    }

    /// `before` is the character preceding `rest` in the input, if any.
    fn next_token(&self, rest: &str, before: Option<char>) -> Option<Token> {
        self.scan_quote_line(rest)
            .or_else(|| scan_marker(rest))
            .or_else(|| scan_function_start(rest))
            .or_else(|| self.scan_inline_code(rest))
            .or_else(|| spans::scan_emoji_code(rest))
            .or_else(|| spans::scan_mention(rest, before))
            .or_else(|| spans::scan_url(rest))
            .or_else(|| scan_char(rest))
    }

    fn scan_quote_line(&self, rest: &str) -> Option<Token> {
        for (regex, kind) in [
            (&self.quote_line2, TokenKind::QuoteLine2),
            (&self.quote_line1, TokenKind::QuoteLine1),
        ] {
            if let Some(caps) = regex.captures(rest) {
                return Some(Token::with_whole(kind, &caps[1], &caps[0]));
            }
        }
        None
    }

    fn scan_inline_code(&self, rest: &str) -> Option<Token> {
        let caps = self.inline_code.captures(rest)?;
        Some(Token::with_whole(TokenKind::InlineCode, &caps[1], &caps[0]))
    }
}

impl Default for MfmLexer {
    fn default() -> Self {
        Self::new()
    }
}

fn scan_function_start(rest: &str) -> Option<Token> {
    let caps = FUNCTION_START.captures(rest)?;
    Some(Token::with_whole(TokenKind::FunctionStart, &caps[1], &caps[0]))
}

fn scan_char(rest: &str) -> Option<Token> {
    let c = rest.chars().next()?;
    Some(Token::new(TokenKind::Char, c.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(text: &str) -> Vec<TokenKind> {
        tokenize(text).tokens.iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_empty_input() {
        let result = tokenize("");
        assert!(result.success);
        assert!(result.tokens.is_empty());
        assert_eq!(result.remainder, "");
    }

    #[test]
    fn test_plain_text_is_one_string() {
        assert_eq!(tokenize("hoge").tokens, vec![Token::string("hoge")]);
    }

    #[test]
    fn test_bold_markers() {
        assert_eq!(
            kinds("**hoge**"),
            vec![TokenKind::BoldAsta, TokenKind::StringLit, TokenKind::BoldAsta]
        );
    }

    #[test]
    fn test_quote_needs_trailing_newline() {
        assert_eq!(kinds(">aaa\n"), vec![TokenKind::QuoteLine1]);
        assert_eq!(kinds(">aaa"), vec![TokenKind::StringLit]);
    }

    #[test]
    fn test_quote_level_two_before_one() {
        let tokens = tokenize(">> aaa\n").tokens;
        assert_eq!(tokens, vec![Token::quote_line2("aaa\n", ">> aaa\n")]);
    }

    #[test]
    fn test_function_start_requires_space() {
        assert_eq!(
            tokenize("$[x2 hoge]").tokens,
            vec![
                Token::function_start("x2"),
                Token::string("hoge"),
                Token::new(TokenKind::FunctionEnd, "]"),
            ]
        );
        assert_eq!(kinds("$[x2]"), vec![TokenKind::StringLit, TokenKind::FunctionEnd]);
    }

    #[test]
    fn test_inline_code_rejects_newline_and_acute() {
        assert_eq!(kinds("`in\nline`"), vec![TokenKind::StringLit]);
        assert_eq!(kinds("`foo´bar`"), vec![TokenKind::StringLit]);
        assert_eq!(kinds("`foo _bar_ baz`"), vec![TokenKind::InlineCode]);
    }

    #[test]
    fn test_custom_content_class() {
        let class = ContentClass::new(vec![('a', 'z'), ('\n', '\n')]).unwrap();
        let lexer = MfmLexer::with_content_class(&class).unwrap();
        let tokens = lexer.lex("`abc` `ABC`").unwrap();
        assert_eq!(tokens[0], Token::inline_code("abc"));
        assert_eq!(tokens[1], Token::string(" `ABC`"));
    }

    #[test]
    fn test_invalid_content_class() {
        assert!(ContentClass::new(vec![]).is_err());
        assert!(ContentClass::new(vec![('z', 'a')]).is_err());
    }

    #[test]
    fn test_lex_error_display() {
        let err = LexError::NoRuleMatched { offset: 3 };
        assert_eq!(err.to_string(), "No lexer rule matched at offset 3");
    }
}
