//! Fixed-literal markers
//!
//! The markers are all plain literals, so a logos scanner picks the longest
//! one at the current position: `***` beats `**` beats `*`, and `__` beats
//! `_`. The center tags additionally absorb one adjacent newline.
use super::{Token, TokenKind};
use logos::Logos;

#[derive(Logos, Debug, PartialEq, Clone, Copy)]
pub enum Marker {
    #[regex("<center>\n?")]
    CenterStart,
    #[regex("\n?</center>")]
    CenterEnd,

    #[token("***")]
    Big,
    #[token("**")]
    BoldAsta,
    #[token("*")]
    ItalicAsta,

    #[token("<b>")]
    BoldTagStart,
    #[token("</b>")]
    BoldTagEnd,
    #[token("<small>")]
    SmallStart,
    #[token("</small>")]
    SmallEnd,
    #[token("<i>")]
    ItalicTagStart,
    #[token("</i>")]
    ItalicTagEnd,
    #[token("<s>")]
    StrikeTagStart,
    #[token("</s>")]
    StrikeTagEnd,

    #[token("__")]
    BoldUnder,
    #[token("_")]
    ItalicUnder,

    #[token("~~")]
    StrikeWave,

    #[token("]")]
    FunctionEnd,
}

impl Marker {
    pub fn kind(self) -> TokenKind {
        match self {
            Marker::CenterStart => TokenKind::CenterStart,
            Marker::CenterEnd => TokenKind::CenterEnd,
            Marker::Big => TokenKind::Big,
            Marker::BoldAsta => TokenKind::BoldAsta,
            Marker::ItalicAsta => TokenKind::ItalicAsta,
            Marker::BoldTagStart => TokenKind::BoldTagStart,
            Marker::BoldTagEnd => TokenKind::BoldTagEnd,
            Marker::SmallStart => TokenKind::SmallStart,
            Marker::SmallEnd => TokenKind::SmallEnd,
            Marker::ItalicTagStart => TokenKind::ItalicTagStart,
            Marker::ItalicTagEnd => TokenKind::ItalicTagEnd,
            Marker::StrikeTagStart => TokenKind::StrikeTagStart,
            Marker::StrikeTagEnd => TokenKind::StrikeTagEnd,
            Marker::BoldUnder => TokenKind::BoldUnder,
            Marker::ItalicUnder => TokenKind::ItalicUnder,
            Marker::StrikeWave => TokenKind::StrikeWave,
            Marker::FunctionEnd => TokenKind::FunctionEnd,
        }
    }
}

/// Scan a marker at the very start of `rest`.
///
/// Only the first logos match is considered; anything else (including a
/// partial tag such as `<cent`) yields `None` so the lexer can try its
/// remaining rules.
pub fn scan_marker(rest: &str) -> Option<Token> {
    let mut lexer = Marker::lexer(rest);
    let marker = lexer.next()?.ok()?;
    let whole = lexer.slice();
    let extracted = match marker {
        Marker::CenterStart | Marker::CenterEnd => whole.trim_matches('\n'),
        _ => whole,
    };
    Some(Token::with_whole(marker.kind(), extracted, whole))
}
