//! Lexer for MSDscript
//!
//! Tokenizes source text using logos. Runs of text that start no token are
//! reported rather than skipped, since the grammar rejects them.

use logos::{Logos, Span};
use std::fmt;

/// Source location (byte offsets)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Loc {
    pub start: usize,
    pub end: usize,
}

impl Loc {
    pub fn new(start: usize, end: usize) -> Self {
        Loc { start, end }
    }

    pub fn from_span(span: Span) -> Self {
        Loc { start: span.start, end: span.end }
    }
}

/// Token with location
#[derive(Debug, Clone, PartialEq)]
pub struct Spanned<T> {
    pub value: T,
    pub loc: Loc,
}

impl<T> Spanned<T> {
    pub fn new(value: T, loc: Loc) -> Self {
        Spanned { value, loc }
    }
}

/// Token type
#[derive(Logos, Debug, Clone, PartialEq)]
#[logos(skip r"[ \t\r\n]+")]
pub enum Token {
    // ============ Literals ============
    #[regex(r"-?[0-9]+", lex_int)]
    Int(i64),

    #[regex(r"[a-zA-Z]+", |lex| lex.slice().to_string())]
    Ident(String),

    /// `_let`, `_in`, `_true`, ... with the underscore stripped
    #[regex(r"_[a-zA-Z]*", |lex| lex.slice()[1..].to_string())]
    Keyword(String),

    // ============ Punctuation ============
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("+")]
    Plus,
    #[token("*")]
    Star,
    #[token("==")]
    EqEq,
    #[token("=")]
    Assign,
}

/// Digits accumulate with wrapping, so oversized literals wrap like the
/// arithmetic does.
fn lex_int(lex: &mut logos::Lexer<Token>) -> i64 {
    let slice = lex.slice();
    let (negative, digits) = match slice.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, slice),
    };
    let magnitude = digits
        .bytes()
        .fold(0i64, |acc, d| acc.wrapping_mul(10).wrapping_add(i64::from(d - b'0')));
    if negative {
        magnitude.wrapping_neg()
    } else {
        magnitude
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::Int(n) => write!(f, "{}", n),
            Token::Ident(s) => write!(f, "{}", s),
            Token::Keyword(k) => write!(f, "_{}", k),
            Token::LParen => write!(f, "("),
            Token::RParen => write!(f, ")"),
            Token::Plus => write!(f, "+"),
            Token::Star => write!(f, "*"),
            Token::EqEq => write!(f, "=="),
            Token::Assign => write!(f, "="),
        }
    }
}

/// One lexed item. `None` marks text that starts no token.
pub type Lexeme = Spanned<Option<Token>>;

/// Lexer with one item of lookahead
pub struct Lexer<'a> {
    inner: logos::Lexer<'a, Token>,
    peeked: Option<Option<Lexeme>>,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Lexer {
            inner: Token::lexer(source),
            peeked: None,
        }
    }

    /// Peek at the next token; `None` at end of input or on unrecognised text
    pub fn peek(&mut self) -> Option<&Token> {
        self.peek_spanned().and_then(|s| s.value.as_ref())
    }

    /// Peek at the next item with location
    pub fn peek_spanned(&mut self) -> Option<&Lexeme> {
        if self.peeked.is_none() {
            let next = self.next_inner();
            self.peeked = Some(next);
        }
        self.peeked.as_ref().and_then(|p| p.as_ref())
    }

    /// Get the next token, stopping at end of input or unrecognised text
    pub fn next(&mut self) -> Option<Token> {
        self.next_spanned().and_then(|s| s.value)
    }

    /// Get the next item with location
    pub fn next_spanned(&mut self) -> Option<Lexeme> {
        match self.peeked.take() {
            Some(peeked) => peeked,
            None => self.next_inner(),
        }
    }

    fn next_inner(&mut self) -> Option<Lexeme> {
        let item = self.inner.next()?;
        let loc = Loc::from_span(self.inner.span());
        Some(Spanned::new(item.ok(), loc))
    }

    /// Check if there is any input left
    pub fn has_more(&mut self) -> bool {
        self.peek_spanned().is_some()
    }
}
