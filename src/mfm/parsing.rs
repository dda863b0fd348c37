//! Parsing
//!
//!     The parser turns a token stream into a list of [`Node`]s. It is a single
//!     recursive function, [`Parser::parse_in`], that runs in one [`ParseState`]
//!     per open construct and shares a cursor into the token slice.
//!
//!     Per token, in state `S`:
//!
//!         - a token of a disabled family is echoed as text
//!         - text, emoji codes, mentions and URLs are appended as leaves
//!         - quote lines and inline code are complete units and become a
//!           `Quote` / `InlineCode` node straight away
//!         - a marker that closes `S` ends the recursion with `closed = true`
//!         - in a splice state, a marker that closes an enclosing construct
//!           ends the recursion with `closed = false` and is left unread for
//!           that construct
//!         - an opening marker recurses into the construct's state
//!         - anything else (a stray closer) is echoed as text
//!
//!     Reaching the end of the tokens is only a successful finish in `Normal`.
//!
//! Recovery
//!
//!     An opener whose construct never closes is echoed as text and then
//!     recovered in one of two ways:
//!
//!         Rewind: the cursor goes back to just after the opener and the
//!         enclosing state scans the content again, so inner constructs that
//!         did close are still recognised. Used by the tag pairs, `***`, `**`
//!         and `__`.
//!
//!         Splice: the nodes already collected by the failed recursion are
//!         appended as they are. Used by `*`, `_`, `~~` and functions.
//!
//!     Whether a construct closes depends only on where its content starts,
//!     its state, the nesting depth and the set of enclosing states. A rewind
//!     construct that failed once is remembered under that key and is not
//!     scanned again when an outer rewind replays the same tokens.
//!
//! Delimiter checks
//!
//!     The short symmetric delimiters only form a node when the closed content is
//!     exactly one text node of the right shape. Otherwise both delimiters are
//!     echoed around the content:
//!
//!         `*x*`, `_x_`     x matches [A-Za-z0-9]+
//!         `__x__`          x matches [A-Za-z0-9 ]+
//!         `~~x~~`          x has no newline
//!
//! Nesting limit
//!
//!     At most [`MAX_NEST_DEPTH`] constructs can be open at once. An opener past
//!     that limit is plain text. The limit keeps recursion shallow on hostile
//!     input such as hundreds of nested `<small>` tags.

pub mod builder;
pub mod option;

use crate::mfm::ast::{FunctionNode, Node, Nodes, QuoteLevel};
use crate::mfm::lexing::tokenize;
use crate::mfm::token::{Token, TokenKind};
use builder::NodeBuilder;
use once_cell::sync::Lazy;
use option::ParseOption;
use regex::Regex;
use std::collections::HashSet;

/// Maximum number of simultaneously open constructs.
pub const MAX_NEST_DEPTH: usize = 9;

static ALNUM: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9]+$").unwrap());
static ALNUM_OR_SPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9 ]+$").unwrap());

/// The construct a recursion level is parsing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParseState {
    Normal,
    Center,
    Big,
    BoldAsta,
    BoldTag,
    BoldUnder,
    Small,
    ItalicTag,
    ItalicAsta,
    ItalicUnder,
    StrikeTag,
    StrikeWave,
    Function,
}

/// How an unterminated construct is turned back into text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    Rewind,
    Splice,
}

impl ParseState {
    /// The state entered when `kind` opens a construct.
    pub fn opened_by(kind: TokenKind) -> Option<ParseState> {
        use TokenKind::*;
        let state = match kind {
            CenterStart => ParseState::Center,
            Big => ParseState::Big,
            BoldAsta => ParseState::BoldAsta,
            BoldTagStart => ParseState::BoldTag,
            BoldUnder => ParseState::BoldUnder,
            SmallStart => ParseState::Small,
            ItalicTagStart => ParseState::ItalicTag,
            ItalicAsta => ParseState::ItalicAsta,
            ItalicUnder => ParseState::ItalicUnder,
            StrikeTagStart => ParseState::StrikeTag,
            StrikeWave => ParseState::StrikeWave,
            FunctionStart => ParseState::Function,
            _ => return None,
        };
        Some(state)
    }

    /// Whether `kind` ends this construct.
    pub fn closed_by(self, kind: TokenKind) -> bool {
        use TokenKind::*;
        matches!(
            (self, kind),
            (ParseState::Center, CenterEnd)
                | (ParseState::Big, Big)
                | (ParseState::BoldAsta, BoldAsta)
                | (ParseState::BoldTag, BoldTagEnd)
                | (ParseState::BoldUnder, BoldUnder)
                | (ParseState::Small, SmallEnd)
                | (ParseState::ItalicTag, ItalicTagEnd)
                | (ParseState::ItalicAsta, ItalicAsta)
                | (ParseState::ItalicUnder, ItalicUnder)
                | (ParseState::StrikeTag, StrikeTagEnd)
                | (ParseState::StrikeWave, StrikeWave)
                | (ParseState::Function, FunctionEnd)
        )
    }

    pub fn recovery(self) -> Recovery {
        match self {
            ParseState::ItalicAsta
            | ParseState::ItalicUnder
            | ParseState::StrikeWave
            | ParseState::Function => Recovery::Splice,
            _ => Recovery::Rewind,
        }
    }

    fn bit(self) -> u16 {
        1 << self as u16
    }

    /// Whether closed content may form a node for this construct.
    fn accepts(self, children: &[Node]) -> bool {
        let only_text = match children {
            [Node::Text(text)] => Some(text.as_str()),
            _ => None,
        };
        match self {
            ParseState::ItalicAsta | ParseState::ItalicUnder => {
                only_text.is_some_and(|text| ALNUM.is_match(text))
            }
            ParseState::BoldUnder => only_text.is_some_and(|text| ALNUM_OR_SPACE.is_match(text)),
            ParseState::StrikeWave => only_text.is_some_and(|text| !text.contains('\n')),
            _ => true,
        }
    }

    /// Build the node for a closed construct, handing the children back for
    /// `Normal`, which has no node of its own.
    fn wrap(self, opener: &Token, children: Nodes) -> Result<Node, Nodes> {
        let node = match self {
            ParseState::Center => Node::Center(children),
            ParseState::Big => Node::Big(children),
            ParseState::BoldAsta | ParseState::BoldTag | ParseState::BoldUnder => {
                Node::Bold(children)
            }
            ParseState::Small => Node::Small(children),
            ParseState::ItalicTag | ParseState::ItalicAsta | ParseState::ItalicUnder => {
                Node::Italic(children)
            }
            ParseState::StrikeTag | ParseState::StrikeWave => Node::Strike(children),
            ParseState::Function => {
                Node::Function(FunctionNode::new(opener.extracted.clone(), children))
            }
            ParseState::Normal => return Err(children),
        };
        Ok(node)
    }
}

/// Context in which a construct's content is parsed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
struct OpenKey {
    start: usize,
    state: ParseState,
    depth: usize,
    enclosing: u16,
}

/// Result of one recursion level.
#[derive(Debug)]
struct Parsed {
    closed: bool,
    nodes: Nodes,
}

/// Recursive-descent parser over a token slice.
pub struct Parser<'a> {
    tokens: &'a [Token],
    option: ParseOption,
    pos: usize,
    open: Vec<ParseState>,
    unclosed: HashSet<OpenKey>,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [Token], option: ParseOption) -> Self {
        Self {
            tokens,
            option,
            pos: 0,
            open: Vec::with_capacity(MAX_NEST_DEPTH),
            unclosed: HashSet::new(),
        }
    }

    /// Parse the whole token stream. Never fails.
    pub fn parse(mut self) -> Nodes {
        self.parse_in(ParseState::Normal).nodes
    }

    fn parse_in(&mut self, state: ParseState) -> Parsed {
        let tokens = self.tokens;
        let mut out = NodeBuilder::new();

        while let Some(token) = tokens.get(self.pos) {
            self.pos += 1;

            if let Some(family) = token.kind.family() {
                if !self.option.is_enabled(family) {
                    out.append_text(&token.whole);
                    continue;
                }
            }

            match token.kind {
                TokenKind::Char | TokenKind::StringLit => out.append_text(&token.whole),
                TokenKind::EmojiCode => out.append_node(Node::EmojiCode(token.extracted.clone())),
                TokenKind::Mention => out.append_node(Node::Mention(token.extracted.clone())),
                TokenKind::Url => out.append_node(Node::Url(token.extracted.clone())),
                TokenKind::QuoteLine1 | TokenKind::QuoteLine2 => {
                    let level = if token.kind == TokenKind::QuoteLine2 {
                        QuoteLevel::L2
                    } else {
                        QuoteLevel::L1
                    };
                    out.append_node(Node::Quote {
                        level,
                        children: vec![Node::text(token.extracted.clone())],
                    });
                }
                TokenKind::InlineCode => {
                    out.append_node(Node::InlineCode(vec![Node::text(token.extracted.clone())]))
                }
                kind if state.closed_by(kind) => {
                    return Parsed {
                        closed: true,
                        nodes: out.finish(),
                    };
                }
                kind if state.recovery() == Recovery::Splice
                    && self.open.iter().any(|open| open.closed_by(kind)) =>
                {
                    self.pos -= 1;
                    return Parsed {
                        closed: false,
                        nodes: out.finish(),
                    };
                }
                kind => match ParseState::opened_by(kind) {
                    Some(child) if self.open.len() < MAX_NEST_DEPTH => {
                        self.open_construct(child, token, &mut out)
                    }
                    Some(child) => {
                        log::trace!("nesting limit reached, {:?} opener kept as text", child);
                        out.append_text(&token.whole);
                    }
                    None => out.append_text(&token.whole),
                },
            }
        }

        Parsed {
            closed: state == ParseState::Normal,
            nodes: out.finish(),
        }
    }

    fn open_construct(&mut self, child: ParseState, opener: &Token, out: &mut NodeBuilder) {
        let resume = self.pos;
        let key = OpenKey {
            start: resume,
            state: child,
            depth: self.open.len() + 1,
            enclosing: self.open.iter().fold(0, |mask, open| mask | open.bit()),
        };
        if self.unclosed.contains(&key) {
            out.append_text(&opener.whole);
            return;
        }

        self.open.push(child);
        let parsed = self.parse_in(child);
        self.open.pop();

        if parsed.closed {
            let wrapped = if child.accepts(&parsed.nodes) {
                child.wrap(opener, parsed.nodes)
            } else {
                Err(parsed.nodes)
            };
            match wrapped {
                Ok(node) => out.append_node(node),
                Err(children) => {
                    out.append_text(&opener.whole);
                    out.append_all(children);
                    out.append_text(&opener.whole);
                }
            }
            return;
        }

        let recovery = child.recovery();
        log::trace!("unterminated {:?} at token {}, recovering by {:?}", child, resume, recovery);
        out.append_text(&opener.whole);
        match recovery {
            Recovery::Rewind => {
                self.unclosed.insert(key);
                self.pos = resume;
            }
            Recovery::Splice => out.append_all(parsed.nodes),
        }
    }
}

/// Parse a token stream into nodes.
pub fn parse(tokens: &[Token], option: ParseOption) -> Nodes {
    let nodes = Parser::new(tokens, option).parse();
    log::debug!("parsed {} tokens into {} nodes", tokens.len(), nodes.len());
    nodes
}

/// Tokenize and parse `text` in one go.
pub fn parse_text(text: &str, option: ParseOption) -> Nodes {
    parse(&tokenize(text).tokens, option)
}
