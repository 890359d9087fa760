//! # MSDscript AST
//!
//! Abstract syntax tree for MSDscript, a small expression language with
//! integers, booleans, `_let`, `_if` and first-class functions.
//!
//! An expression renders two ways:
//! - canonical text via [`std::fmt::Display`], fully parenthesized
//! - pretty text via [`pretty::print_expr`], multi-line with aligned keywords
//!
//! ## Example
//!
//! ```rust
//! use msd_ast::prelude::*;
//!
//! let e = Expr::let_("x", Expr::num(5), Expr::add(Expr::var("x"), Expr::num(1)));
//! assert_eq!(e.to_string(), "(_let x=5 _in (x+1))");
//! assert_eq!(pretty::print_expr(&e), "_let x = 5\n_in  x + 1");
//! ```

pub mod expr;
pub mod pretty;
pub mod ser;

pub mod prelude {
    pub use crate::expr::Expr;
    pub use crate::pretty::{self, Pretty, Prec};
    pub use crate::ser::{self, SerError};
}

#[cfg(test)]
mod tests {
    use super::prelude::*;

    #[test]
    fn test_both_renderings() {
        // 1 + 2 * 3
        let e = Expr::add(Expr::num(1), Expr::mult(Expr::num(2), Expr::num(3)));
        assert_eq!(e.to_string(), "(1+(2*3))");
        assert_eq!(e.to_pretty_string(), "1 + 2 * 3");

        // (1 + 2) * 3
        let e = Expr::mult(Expr::add(Expr::num(1), Expr::num(2)), Expr::num(3));
        assert_eq!(e.to_string(), "((1+2)*3)");
        assert_eq!(e.to_pretty_string(), "(1 + 2) * 3");
    }

    #[test]
    fn test_factorial_shape() {
        // _let factrl = _fun (factrl) _fun (x) _if x == 1 _then 1 _else x * factrl(factrl)(x + -1)
        // _in  factrl(factrl)(10)
        let rec_call = Expr::call(
            Expr::call(Expr::var("factrl"), Expr::var("factrl")),
            Expr::add(Expr::var("x"), Expr::num(-1)),
        );
        let body = Expr::if_(
            Expr::eq(Expr::var("x"), Expr::num(1)),
            Expr::num(1),
            Expr::mult(Expr::var("x"), rec_call),
        );
        let factrl = Expr::fun("factrl", Expr::fun("x", body));
        let e = Expr::let_(
            "factrl",
            factrl,
            Expr::call(Expr::call(Expr::var("factrl"), Expr::var("factrl")), Expr::num(10)),
        );

        let text = pretty::print_expr(&e);
        assert!(text.starts_with("_let factrl = _fun (factrl)\n"));
        assert!(text.contains("x * factrl(factrl)(x + -1)"));
        assert!(text.ends_with("_in  factrl(factrl)(10)"));
    }
}
