//! Expressions in MSDscript
//!
//! The whole language is ten node kinds. Trees are immutable once built;
//! every rewrite returns a fresh tree.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Expression (the only AST node)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Expr {
    // ============ Atoms ============

    /// Integer literal, wrapping 64-bit arithmetic
    Num(i64),

    /// Variable reference
    Var(Box<str>),

    /// `_true` / `_false`
    Bool(bool),

    // ============ Operators ============

    /// `l + r`
    Add(Box<Expr>, Box<Expr>),

    /// `l * r`
    Mult(Box<Expr>, Box<Expr>),

    /// `l == r`, defined across value kinds
    Eq(Box<Expr>, Box<Expr>),

    // ============ Binding forms ============

    /// `_if test _then then_ _else else_`
    If {
        test: Box<Expr>,
        then_: Box<Expr>,
        else_: Box<Expr>,
    },

    /// `_let name = value _in body`, non-recursive
    Let {
        name: Box<str>,
        value: Box<Expr>,
        body: Box<Expr>,
    },

    /// `_fun (param) body`
    Fun {
        param: Box<str>,
        body: Box<Expr>,
    },

    /// `callee(arg)`
    Call(Box<Expr>, Box<Expr>),
}

// ============ Constructors ============

impl Expr {
    pub fn num(n: i64) -> Self {
        Expr::Num(n)
    }

    pub fn var(name: impl Into<Box<str>>) -> Self {
        Expr::Var(name.into())
    }

    pub fn bool(b: bool) -> Self {
        Expr::Bool(b)
    }

    pub fn add(l: Expr, r: Expr) -> Self {
        Expr::Add(Box::new(l), Box::new(r))
    }

    pub fn mult(l: Expr, r: Expr) -> Self {
        Expr::Mult(Box::new(l), Box::new(r))
    }

    pub fn eq(l: Expr, r: Expr) -> Self {
        Expr::Eq(Box::new(l), Box::new(r))
    }

    pub fn if_(test: Expr, then_: Expr, else_: Expr) -> Self {
        Expr::If {
            test: Box::new(test),
            then_: Box::new(then_),
            else_: Box::new(else_),
        }
    }

    pub fn let_(name: impl Into<Box<str>>, value: Expr, body: Expr) -> Self {
        Expr::Let {
            name: name.into(),
            value: Box::new(value),
            body: Box::new(body),
        }
    }

    pub fn fun(param: impl Into<Box<str>>, body: Expr) -> Self {
        Expr::Fun {
            param: param.into(),
            body: Box::new(body),
        }
    }

    pub fn call(callee: Expr, arg: Expr) -> Self {
        Expr::Call(Box::new(callee), Box::new(arg))
    }

    /// Numbers, variables and booleans
    pub fn is_atom(&self) -> bool {
        matches!(self, Expr::Num(_) | Expr::Var(_) | Expr::Bool(_))
    }

    /// Layout-aware rendering, see [`crate::pretty`]
    pub fn to_pretty_string(&self) -> String {
        crate::pretty::print_expr(self)
    }
}

// ============ Substitution ============

impl Expr {
    /// Replace every free `Var(name)` with `replacement`.
    ///
    /// A `_fun` whose parameter is `name` is left untouched. A `_let` that
    /// binds `name` still rewrites its bound expression, since that is
    /// evaluated in the outer scope, but not its body.
    pub fn subst(&self, name: &str, replacement: &Expr) -> Self {
        match self {
            Expr::Num(_) | Expr::Bool(_) => self.clone(),
            Expr::Var(v) => {
                if v.as_ref() == name {
                    replacement.clone()
                } else {
                    self.clone()
                }
            }
            Expr::Add(l, r) => Expr::add(l.subst(name, replacement), r.subst(name, replacement)),
            Expr::Mult(l, r) => Expr::mult(l.subst(name, replacement), r.subst(name, replacement)),
            Expr::Eq(l, r) => Expr::eq(l.subst(name, replacement), r.subst(name, replacement)),
            Expr::If { test, then_, else_ } => Expr::if_(
                test.subst(name, replacement),
                then_.subst(name, replacement),
                else_.subst(name, replacement),
            ),
            Expr::Let { name: bound, value, body } => {
                let body = if bound.as_ref() == name {
                    body.as_ref().clone()
                } else {
                    body.subst(name, replacement)
                };
                Expr::Let {
                    name: bound.clone(),
                    value: Box::new(value.subst(name, replacement)),
                    body: Box::new(body),
                }
            }
            Expr::Fun { param, body } => {
                if param.as_ref() == name {
                    self.clone()
                } else {
                    Expr::fun(param.clone(), body.subst(name, replacement))
                }
            }
            Expr::Call(callee, arg) => {
                Expr::call(callee.subst(name, replacement), arg.subst(name, replacement))
            }
        }
    }
}

// ============ Display ============

/// Canonical form: fully parenthesized, no optional whitespace.
impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Num(n) => write!(f, "{}", n),
            Expr::Var(name) => write!(f, "{}", name),
            Expr::Bool(true) => write!(f, "_true"),
            Expr::Bool(false) => write!(f, "_false"),
            Expr::Add(l, r) => write!(f, "({}+{})", l, r),
            Expr::Mult(l, r) => write!(f, "({}*{})", l, r),
            Expr::Eq(l, r) => write!(f, "({}=={})", l, r),
            Expr::If { test, then_, else_ } => {
                write!(f, "(_if {} _then {} _else {})", test, then_, else_)
            }
            Expr::Let { name, value, body } => write!(f, "(_let {}={} _in {})", name, value, body),
            Expr::Fun { param, body } => write!(f, "(_fun ({}) {})", param, body),
            Expr::Call(callee, arg) => write!(f, "{} {}", callee, arg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_is_tag_aware() {
        assert_ne!(Expr::num(2), Expr::var("2"));
        assert_ne!(Expr::add(Expr::num(1), Expr::num(2)), Expr::mult(Expr::num(1), Expr::num(2)));
        assert_eq!(
            Expr::let_("x", Expr::num(1), Expr::var("x")),
            Expr::let_("x", Expr::num(1), Expr::var("x"))
        );
        assert_ne!(
            Expr::fun("x", Expr::var("x")),
            Expr::fun("y", Expr::var("x"))
        );
    }

    #[test]
    fn test_canonical_atoms() {
        assert_eq!(Expr::num(-42).to_string(), "-42");
        assert_eq!(Expr::var("abc").to_string(), "abc");
        assert_eq!(Expr::bool(true).to_string(), "_true");
        assert_eq!(Expr::bool(false).to_string(), "_false");
    }

    #[test]
    fn test_canonical_operators() {
        let e = Expr::add(Expr::num(1), Expr::mult(Expr::num(2), Expr::var("x")));
        assert_eq!(e.to_string(), "(1+(2*x))");
        assert_eq!(Expr::eq(Expr::num(0), Expr::bool(false)).to_string(), "(0==_false)");
    }

    #[test]
    fn test_canonical_binding_forms() {
        let l = Expr::let_("x", Expr::num(5), Expr::add(Expr::var("x"), Expr::num(7)));
        assert_eq!(l.to_string(), "(_let x=5 _in (x+7))");

        let i = Expr::if_(Expr::bool(true), Expr::num(1), Expr::num(2));
        assert_eq!(i.to_string(), "(_if _true _then 1 _else 2)");

        let f = Expr::fun("x", Expr::add(Expr::var("x"), Expr::num(4)));
        assert_eq!(f.to_string(), "(_fun (x) (x+4))");
    }

    #[test]
    fn test_canonical_call() {
        let c = Expr::call(
            Expr::fun("x", Expr::add(Expr::var("x"), Expr::num(4))),
            Expr::add(Expr::num(3), Expr::num(8)),
        );
        assert_eq!(c.to_string(), "(_fun (x) (x+4)) (3+8)");
        assert_eq!(Expr::call(Expr::var("f"), Expr::num(1)).to_string(), "f 1");
    }

    #[test]
    fn test_subst_var() {
        assert_eq!(Expr::var("x").subst("x", &Expr::num(3)), Expr::num(3));
        assert_eq!(Expr::var("y").subst("x", &Expr::num(3)), Expr::var("y"));
        assert_eq!(Expr::num(7).subst("x", &Expr::num(3)), Expr::num(7));
        assert_eq!(Expr::bool(true).subst("x", &Expr::num(3)), Expr::bool(true));
    }

    #[test]
    fn test_subst_nested() {
        let e = Expr::add(Expr::var("x"), Expr::mult(Expr::var("y"), Expr::var("x")));
        let expected = Expr::add(Expr::num(3), Expr::mult(Expr::var("y"), Expr::num(3)));
        assert_eq!(e.subst("x", &Expr::num(3)), expected);

        let c = Expr::call(Expr::var("f"), Expr::eq(Expr::var("x"), Expr::num(1)));
        let expected = Expr::call(Expr::var("g"), Expr::eq(Expr::var("x"), Expr::num(1)));
        assert_eq!(c.subst("f", &Expr::var("g")), expected);
    }

    #[test]
    fn test_subst_fun_param_shadows() {
        let e = Expr::let_(
            "x",
            Expr::num(5),
            Expr::fun("x", Expr::add(Expr::var("x"), Expr::num(7))),
        );
        assert_eq!(e.subst("x", &Expr::num(4)), e);

        let f = Expr::fun("y", Expr::add(Expr::var("x"), Expr::var("y")));
        assert_eq!(
            f.subst("x", &Expr::num(4)),
            Expr::fun("y", Expr::add(Expr::num(4), Expr::var("y")))
        );
    }

    #[test]
    fn test_subst_let_rewrites_bound_value_only() {
        let e = Expr::let_("x", Expr::var("x"), Expr::add(Expr::var("x"), Expr::num(1)));
        let expected = Expr::let_("x", Expr::num(9), Expr::add(Expr::var("x"), Expr::num(1)));
        assert_eq!(e.subst("x", &Expr::num(9)), expected);

        let e = Expr::let_("y", Expr::var("x"), Expr::add(Expr::var("x"), Expr::var("y")));
        let expected = Expr::let_("y", Expr::num(9), Expr::add(Expr::num(9), Expr::var("y")));
        assert_eq!(e.subst("x", &Expr::num(9)), expected);
    }

    #[test]
    fn test_subst_does_not_mutate() {
        let e = Expr::if_(Expr::var("b"), Expr::num(1), Expr::num(2));
        let _ = e.subst("b", &Expr::bool(true));
        assert_eq!(e, Expr::if_(Expr::var("b"), Expr::num(1), Expr::num(2)));
    }
}
