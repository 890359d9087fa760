//! Recursive-descent parser for MSDscript
//!
//! Grammar, loosest binding first:
//!
//! ```text
//! expr      = comparg ( "==" expr )?
//! comparg   = addend ( "+" comparg )?
//! addend    = multicand ( "*" addend )?
//! multicand = inner ( "(" expr ")" )*        -- no space before "("
//! inner     = NUM | VAR | "(" expr ")" | _true | _false
//!           | _let VAR = expr _in expr
//!           | _if expr _then expr _else expr
//!           | _fun ( VAR ) expr
//! ```
//!
//! All three binary operators are right-recursive.

use crate::lexer::{Lexeme, Lexer, Token};
use msd_ast::expr::Expr;
use thiserror::Error;
use tracing::trace;

/// Parse error
///
/// The messages are matched verbatim by callers and other tools.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid input")]
    InvalidInput,

    #[error("missing close parenthesis")]
    MissingCloseParen,

    #[error("consume mismatch")]
    ConsumeMismatch,

    #[error("consume mismatch for = \n")]
    MissingLetAssign,

    #[error("invalid let expression")]
    InvalidLet,
}

pub type ParseResult<T> = Result<T, ParseError>;

/// Parser
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    /// End offset of the last consumed item
    last_end: usize,
}

impl<'a> Parser<'a> {
    pub fn new(source: &'a str) -> Self {
        Parser { lexer: Lexer::new(source), last_end: 0 }
    }

    // ============ Utilities ============

    fn peek(&mut self) -> Option<&Token> {
        self.lexer.peek()
    }

    fn bump(&mut self) -> Option<Lexeme> {
        let item = self.lexer.next_spanned()?;
        self.last_end = item.loc.end;
        Some(item)
    }

    fn next(&mut self) -> Option<Token> {
        self.bump().and_then(|item| item.value)
    }

    /// Next item starts exactly where the last one ended
    fn adjacent(&mut self) -> bool {
        let end = self.last_end;
        self.lexer.peek_spanned().is_some_and(|item| item.loc.start == end)
    }

    fn eat(&mut self, token: &Token) -> bool {
        if self.peek() == Some(token) {
            self.bump();
            true
        } else {
            false
        }
    }

    /// Consume a variable name if one is next; binders may be empty
    fn take_ident(&mut self) -> String {
        if !matches!(self.peek(), Some(Token::Ident(_))) {
            return String::new();
        }
        match self.next() {
            Some(Token::Ident(name)) => name,
            _ => String::new(),
        }
    }

    fn expect_keyword(&mut self, keyword: &str) -> ParseResult<()> {
        match self.next() {
            Some(Token::Keyword(k)) if k == keyword => Ok(()),
            _ => Err(ParseError::ConsumeMismatch),
        }
    }

    /// A number or variable may only be followed directly by an operator,
    /// a parenthesis or nothing at all, which rejects `x1`, `2x` and `x_`.
    fn check_terminated(&mut self) -> ParseResult<()> {
        if !self.adjacent() {
            return Ok(());
        }
        match self.peek() {
            Some(Token::LParen | Token::RParen | Token::Plus | Token::Star | Token::EqEq | Token::Assign) => Ok(()),
            _ => Err(ParseError::InvalidInput),
        }
    }

    /// Whether anything but whitespace remains
    pub fn at_end(&mut self) -> bool {
        !self.lexer.has_more()
    }

    // ============ Operators ============

    /// Equality layer, the loosest
    pub fn parse_expr(&mut self) -> ParseResult<Expr> {
        let lhs = self.parse_comparg()?;
        match self.peek() {
            Some(Token::EqEq) => {
                self.bump();
                let rhs = self.parse_expr()?;
                Ok(Expr::eq(lhs, rhs))
            }
            Some(Token::Assign) => Err(ParseError::InvalidInput),
            _ => Ok(lhs),
        }
    }

    /// Addition layer
    pub fn parse_comparg(&mut self) -> ParseResult<Expr> {
        let lhs = self.parse_addend()?;
        if self.eat(&Token::Plus) {
            let rhs = self.parse_comparg()?;
            return Ok(Expr::add(lhs, rhs));
        }
        Ok(lhs)
    }

    /// Multiplication layer
    pub fn parse_addend(&mut self) -> ParseResult<Expr> {
        let lhs = self.parse_multicand()?;
        if self.eat(&Token::Star) {
            let rhs = self.parse_addend()?;
            return Ok(Expr::mult(lhs, rhs));
        }
        Ok(lhs)
    }

    /// Application: `f(x)(y)` is `Call(Call(f, x), y)`
    pub fn parse_multicand(&mut self) -> ParseResult<Expr> {
        let mut expr = self.parse_inner()?;
        while self.peek() == Some(&Token::LParen) && self.adjacent() {
            self.bump();
            let arg = self.parse_expr()?;
            if !self.eat(&Token::RParen) {
                return Err(ParseError::ConsumeMismatch);
            }
            expr = Expr::call(expr, arg);
        }
        Ok(expr)
    }

    // ============ Atoms and keyword forms ============

    pub fn parse_inner(&mut self) -> ParseResult<Expr> {
        match self.next() {
            Some(Token::Int(n)) => {
                self.check_terminated()?;
                Ok(Expr::num(n))
            }
            Some(Token::Ident(name)) => {
                self.check_terminated()?;
                Ok(Expr::var(name))
            }
            Some(Token::LParen) => {
                let inner = self.parse_expr()?;
                if !self.eat(&Token::RParen) {
                    return Err(ParseError::MissingCloseParen);
                }
                Ok(inner)
            }
            Some(Token::Keyword(k)) => match k.as_str() {
                "true" => Ok(Expr::bool(true)),
                "false" => Ok(Expr::bool(false)),
                "let" => self.parse_let(),
                "if" => self.parse_if(),
                "fun" => self.parse_fun(),
                _ => Err(ParseError::ConsumeMismatch),
            },
            _ => Err(ParseError::InvalidInput),
        }
    }

    /// After `_let`: `VAR = expr _in expr`
    ///
    /// The body must mention the bound name somewhere in its canonical
    /// text; a plain substring test, so `x` is found inside `xy` too.
    pub fn parse_let(&mut self) -> ParseResult<Expr> {
        let name = self.take_ident();
        if !self.eat(&Token::Assign) {
            return Err(ParseError::MissingLetAssign);
        }
        let value = self.parse_expr()?;
        self.expect_keyword("in")?;
        let body = self.parse_expr()?;
        if !body.to_string().contains(name.as_str()) {
            return Err(ParseError::InvalidLet);
        }
        Ok(Expr::let_(name, value, body))
    }

    /// After `_if`: `expr _then expr _else expr`
    pub fn parse_if(&mut self) -> ParseResult<Expr> {
        let test = self.parse_expr()?;
        self.expect_keyword("then")?;
        let then_ = self.parse_expr()?;
        self.expect_keyword("else")?;
        let else_ = self.parse_expr()?;
        Ok(Expr::if_(test, then_, else_))
    }

    /// After `_fun`: `( VAR ) expr`, parentheses optional
    pub fn parse_fun(&mut self) -> ParseResult<Expr> {
        self.eat(&Token::LParen);
        let param = self.take_ident();
        self.eat(&Token::RParen);
        let body = self.parse_expr()?;
        Ok(Expr::fun(param, body))
    }
}

// ============ Convenience Functions ============

/// Parse a complete program; trailing input is an error
pub fn parse(source: &str) -> ParseResult<Expr> {
    let mut parser = Parser::new(source);
    let expr = parser.parse_expr()?;
    if !parser.at_end() {
        return Err(ParseError::InvalidInput);
    }
    trace!(%expr, "parsed");
    Ok(expr)
}

/// Parse the leading expression, ignoring anything after it
pub fn parse_expr(source: &str) -> ParseResult<Expr> {
    Parser::new(source).parse_expr()
}
