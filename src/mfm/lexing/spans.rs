//! Atomic span scanners
//!
//! Emoji codes, mentions and URLs are recognised whole by the lexer and never
//! take part in nesting. Each scanner looks at the start of the remaining
//! input and returns the matched token, if any.

use crate::mfm::token::{Token, TokenKind};
use once_cell::sync::Lazy;
use regex::Regex;

static EMOJI_CODE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^:[A-Za-z0-9_+\-]+:").expect("valid emoji regex"));

static MENTION: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^@[A-Za-z0-9_]+(?:@[A-Za-z0-9_\-]+(?:\.[A-Za-z0-9_\-]+)*)?")
        .expect("valid mention regex")
});

const URL_SCHEMES: [&str; 2] = ["https://", "http://"];

pub fn scan_emoji_code(rest: &str) -> Option<Token> {
    let found = EMOJI_CODE.find(rest)?;
    Some(Token::new(TokenKind::EmojiCode, found.as_str()))
}

/// Scan `@user` or `@user@host`. A mention never starts in the middle of a
/// word, so `foo@example.com` is not one.
pub fn scan_mention(rest: &str, before: Option<char>) -> Option<Token> {
    if before.is_some_and(is_word_char) {
        return None;
    }
    let found = MENTION.find(rest)?;
    Some(Token::new(TokenKind::Mention, found.as_str()))
}

/// Scan an `http`/`https` URL.
///
/// Other schemes are left to the fallback rule, so `javascript:` and friends
/// stay plain text.
pub fn scan_url(rest: &str) -> Option<Token> {
    let scheme = URL_SCHEMES.iter().find(|scheme| rest.starts_with(*scheme))?;
    let body = &rest[scheme.len()..];
    let body = body[..url_body_len(body)].trim_end_matches(|c: char| c == '.' || c == ',');
    if body.is_empty() {
        return None;
    }
    let end = scheme.len() + body.len();
    Some(Token::new(TokenKind::Url, &rest[..end]))
}

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

fn is_url_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || ".,_/:%#@$&?!~=+-".contains(c)
}

/// Byte length of the URL body at the start of `body`.
///
/// Parentheses and square brackets are part of the URL only when balanced;
/// an unmatched closer, or a group left open, ends the URL before it.
fn url_body_len(body: &str) -> usize {
    let mut end = 0;
    let mut open: Vec<char> = Vec::new();
    for (index, c) in body.char_indices() {
        let next = index + c.len_utf8();
        match c {
            c if is_url_char(c) => {}
            '(' => open.push(')'),
            '[' => open.push(']'),
            ')' | ']' if open.last() == Some(&c) => {
                open.pop();
            }
            _ => break,
        }
        if open.is_empty() {
            end = next;
        }
    }
    end
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url(input: &str) -> Option<String> {
        scan_url(input).map(|token| token.whole)
    }

    #[test]
    fn test_emoji_code_keeps_colons() {
        let token = scan_emoji_code(":hoge_fuga:").unwrap();
        assert_eq!(token.extracted, ":hoge_fuga:");
        assert_eq!(scan_emoji_code(":ho ge:"), None);
        assert_eq!(scan_emoji_code("::"), None);
    }

    #[test]
    fn test_mention_forms() {
        assert_eq!(scan_mention("@hoge_fuga_ bar", None).unwrap().whole, "@hoge_fuga_");
        assert_eq!(
            scan_mention("@ai@misskey.io hi", Some(' ')).unwrap().whole,
            "@ai@misskey.io"
        );
        assert_eq!(scan_mention("@ こんにちは", None), None);
    }

    #[test]
    fn test_mention_needs_word_boundary() {
        assert_eq!(scan_mention("@example.com", Some('o')), None);
        assert_eq!(scan_mention("@example", Some('_')), None);
        assert_eq!(scan_mention("@ai", Some('(')).unwrap().whole, "@ai");
        assert_eq!(scan_mention("@ai", Some('あ')).unwrap().whole, "@ai");
    }

    #[test]
    fn test_url_trailing_punctuation() {
        assert_eq!(
            url("https://misskey.io/@ai.").as_deref(),
            Some("https://misskey.io/@ai")
        );
        assert_eq!(
            url("https://misskey.io/@ai...").as_deref(),
            Some("https://misskey.io/@ai")
        );
        assert_eq!(
            url("https://example.com/foo, bar").as_deref(),
            Some("https://example.com/foo")
        );
    }

    #[test]
    fn test_url_brackets() {
        assert_eq!(
            url("https://example.com/foo(bar))").as_deref(),
            Some("https://example.com/foo(bar)")
        );
        assert_eq!(
            url("https://example.com/foo] bar").as_deref(),
            Some("https://example.com/foo")
        );
        assert_eq!(
            url("https://example.com/a[b(c)]d").as_deref(),
            Some("https://example.com/a[b(c)]d")
        );
        assert_eq!(
            url("https://example.com/a(b").as_deref(),
            Some("https://example.com/a")
        );
    }

    #[test]
    fn test_url_rejections() {
        assert_eq!(url("javascript:alert(1)"), None);
        assert_eq!(url("https://"), None);
        assert_eq!(url("https://..."), None);
        assert_eq!(url("https://大石.jp"), None);
    }
}
