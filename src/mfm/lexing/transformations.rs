//! Post-lex transformations
//!
//!     Both passes are pure functions from token stream to token stream and run
//!     in this order:
//!
//!         1. `coalesce_chars`: every run of single `Char` tokens becomes one
//!            `StringLit`. No `Char` survives this pass.
//!         2. `merge_quote_lines`: consecutive quote lines of the same level
//!            become one token holding the concatenated text. A run broken by
//!            any other token stays split.

use crate::mfm::token::{Token, TokenKind};

pub fn coalesce_chars(tokens: Vec<Token>) -> Vec<Token> {
    let mut result: Vec<Token> = Vec::with_capacity(tokens.len());
    let mut buffer = String::new();

    for token in tokens {
        if token.kind == TokenKind::Char {
            buffer.push_str(&token.whole);
            continue;
        }
        if !buffer.is_empty() {
            result.push(Token::string(std::mem::take(&mut buffer)));
        }
        result.push(token);
    }
    if !buffer.is_empty() {
        result.push(Token::string(buffer));
    }
    result
}

pub fn merge_quote_lines(tokens: Vec<Token>) -> Vec<Token> {
    [TokenKind::QuoteLine1, TokenKind::QuoteLine2]
        .into_iter()
        .fold(tokens, merge_runs_of)
}

fn merge_runs_of(tokens: Vec<Token>, kind: TokenKind) -> Vec<Token> {
    if tokens.iter().filter(|t| t.kind == kind).count() < 2 {
        return tokens;
    }

    let mut result: Vec<Token> = Vec::with_capacity(tokens.len());
    for token in tokens {
        match result.last_mut() {
            Some(last) if last.kind == kind && token.kind == kind => {
                last.extracted.push_str(&token.extracted);
                last.whole.push_str(&token.whole);
            }
            _ => result.push(token),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ch(c: &str) -> Token {
        Token::new(TokenKind::Char, c)
    }

    #[test]
    fn test_coalesce_chars_around_markers() {
        let tokens = vec![
            ch("a"),
            ch("b"),
            Token::new(TokenKind::BoldAsta, "**"),
            ch("c"),
        ];
        assert_eq!(
            coalesce_chars(tokens),
            vec![
                Token::string("ab"),
                Token::new(TokenKind::BoldAsta, "**"),
                Token::string("c"),
            ]
        );
    }

    #[test]
    fn test_merge_consecutive_quote_lines() {
        let tokens = vec![
            Token::quote_line1("aaa\n", ">aaa\n"),
            Token::quote_line1("bbb\n", "> bbb\n"),
        ];
        assert_eq!(
            merge_quote_lines(tokens),
            vec![Token::quote_line1("aaa\nbbb\n", ">aaa\n> bbb\n")]
        );
    }

    #[test]
    fn test_interrupted_runs_stay_split() {
        let tokens = vec![
            Token::quote_line1("a\n", ">a\n"),
            Token::string("x"),
            Token::quote_line1("b\n", ">b\n"),
            Token::quote_line2("c\n", ">>c\n"),
            Token::quote_line1("d\n", ">d\n"),
        ];
        assert_eq!(merge_quote_lines(tokens.clone()), tokens);
    }

    #[test]
    fn test_levels_merge_independently() {
        let tokens = vec![
            Token::quote_line2("aaa\n", ">>aaa\n"),
            Token::quote_line2("bbb\n", ">> bbb\n"),
            Token::quote_line1("c\n", ">c\n"),
        ];
        assert_eq!(
            merge_quote_lines(tokens),
            vec![
                Token::quote_line2("aaa\nbbb\n", ">>aaa\n>> bbb\n"),
                Token::quote_line1("c\n", ">c\n"),
            ]
        );
    }
}
