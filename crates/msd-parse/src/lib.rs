//! # MSDscript Parse
//!
//! Lexer and parser for MSDscript.
//!
//! ## Example
//!
//! ```rust
//! use msd_parse::prelude::*;
//!
//! let expr = parse("f(1) + 2 * 3").unwrap();
//! assert_eq!(expr.to_string(), "(f 1+(2*3))");
//! ```

pub mod lexer;
pub mod parser;

pub mod prelude {
    pub use crate::lexer::{Lexeme, Lexer, Loc, Spanned, Token};
    pub use crate::parser::{parse, parse_expr, ParseError, ParseResult, Parser};
}
