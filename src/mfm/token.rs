//! Token definitions for MFM
//!
//! A [`Token`] is one lexical unit: its kind, the semantically meaningful
//! `extracted` text, and the `whole` text the lexer consumed. Concatenating
//! the `whole` text of every token in a stream reproduces the input exactly.
//!
//! The fixed-literal markers (`**`, `<small>`, `~~`, ...) are recognised by the
//! logos scanner in [`marker`]; the rest of the rules live in the lexer.

pub mod marker;

use crate::mfm::parsing::option::SyntaxFamily;
use serde::Serialize;

/// Every kind of token the lexer can produce.
///
/// `Char` only exists between the scanning loop and the coalescing pass; it
/// never appears in a stream returned by the lexer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    Char,
    StringLit,
    QuoteLine1,
    QuoteLine2,
    CenterStart,
    CenterEnd,
    Big,
    BoldAsta,
    BoldTagStart,
    BoldTagEnd,
    BoldUnder,
    SmallStart,
    SmallEnd,
    ItalicTagStart,
    ItalicTagEnd,
    ItalicAsta,
    ItalicUnder,
    StrikeTagStart,
    StrikeTagEnd,
    StrikeWave,
    FunctionStart,
    FunctionEnd,
    InlineCode,
    EmojiCode,
    Mention,
    Url,
}

impl TokenKind {
    /// The syntax family this kind belongs to, `None` for plain text.
    pub fn family(self) -> Option<SyntaxFamily> {
        use TokenKind::*;
        let family = match self {
            Char | StringLit => return None,
            QuoteLine1 | QuoteLine2 => SyntaxFamily::Quote,
            CenterStart | CenterEnd => SyntaxFamily::Center,
            Big => SyntaxFamily::Big,
            BoldAsta | BoldTagStart | BoldTagEnd | BoldUnder => SyntaxFamily::Bold,
            SmallStart | SmallEnd => SyntaxFamily::Small,
            ItalicTagStart | ItalicTagEnd | ItalicAsta | ItalicUnder => SyntaxFamily::Italic,
            StrikeTagStart | StrikeTagEnd | StrikeWave => SyntaxFamily::Strike,
            FunctionStart | FunctionEnd => SyntaxFamily::Function,
            InlineCode => SyntaxFamily::InlineCode,
            EmojiCode => SyntaxFamily::Emoji,
            Mention => SyntaxFamily::Mention,
            Url => SyntaxFamily::Url,
        };
        Some(family)
    }

    /// Check if this kind is a quote line of either level
    pub fn is_quote(self) -> bool {
        matches!(self, TokenKind::QuoteLine1 | TokenKind::QuoteLine2)
    }
}

/// One lexical unit of MFM source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
    pub kind: TokenKind,
    pub extracted: String,
    pub whole: String,
}

impl Token {
    /// Token whose whole text equals its extracted text.
    pub fn new(kind: TokenKind, extracted: impl Into<String>) -> Self {
        let extracted = extracted.into();
        Self {
            kind,
            whole: extracted.clone(),
            extracted,
        }
    }

    pub fn with_whole(
        kind: TokenKind,
        extracted: impl Into<String>,
        whole: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            extracted: extracted.into(),
            whole: whole.into(),
        }
    }

    pub fn string(text: impl Into<String>) -> Self {
        Self::new(TokenKind::StringLit, text)
    }

    pub fn quote_line1(extracted: impl Into<String>, whole: impl Into<String>) -> Self {
        Self::with_whole(TokenKind::QuoteLine1, extracted, whole)
    }

    pub fn quote_line2(extracted: impl Into<String>, whole: impl Into<String>) -> Self {
        Self::with_whole(TokenKind::QuoteLine2, extracted, whole)
    }

    pub fn function_start(props: impl Into<String>) -> Self {
        let props = props.into();
        let whole = format!("$[{} ", props);
        Self::with_whole(TokenKind::FunctionStart, props, whole)
    }

    pub fn inline_code(code: impl Into<String>) -> Self {
        let code = code.into();
        let whole = format!("`{}`", code);
        Self::with_whole(TokenKind::InlineCode, code, whole)
    }

    /// Length of the consumed source text in bytes.
    pub fn len(&self) -> usize {
        self.whole.len()
    }

    pub fn is_empty(&self) -> bool {
        self.whole.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_defaults_whole_to_extracted() {
        let token = Token::string("hoge");
        assert_eq!(token.kind, TokenKind::StringLit);
        assert_eq!(token.extracted, "hoge");
        assert_eq!(token.whole, "hoge");
    }

    #[test]
    fn test_function_start_whole() {
        let token = Token::function_start("scale.x=2");
        assert_eq!(token.extracted, "scale.x=2");
        assert_eq!(token.whole, "$[scale.x=2 ");
    }

    #[test]
    fn test_family_mapping() {
        assert_eq!(TokenKind::StringLit.family(), None);
        assert_eq!(TokenKind::BoldUnder.family(), Some(SyntaxFamily::Bold));
        assert_eq!(TokenKind::ItalicUnder.family(), Some(SyntaxFamily::Italic));
        assert_eq!(TokenKind::FunctionEnd.family(), Some(SyntaxFamily::Function));
        assert_eq!(TokenKind::QuoteLine2.family(), Some(SyntaxFamily::Quote));
    }
}
