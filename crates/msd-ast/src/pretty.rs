//! Pretty printing for MSDscript
//!
//! Renders an expression with the fewest parentheses that still re-parse to
//! the same tree. `_let`, `_if` and `_fun` break across lines, and every
//! continuation keyword (`_in`, `_then`, `_else`, a function body) lines up
//! under the column where its opening keyword was written. The printer
//! therefore tracks the output column as it goes.

use crate::expr::Expr;

/// Binding strength of the context an expression is printed in.
///
/// `Operand` is the left side of `*`: anything looser than an atom needs
/// parentheses there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Prec {
    None,
    Add,
    Mult,
    Operand,
}

/// Where an expression sits relative to its neighbours.
#[derive(Debug, Clone, Copy)]
struct Ctx {
    prec: Prec,
    /// An enclosing `(` closes right after this expression ends.
    parent_has_paren: bool,
    /// More operator text follows on the same line.
    trailing: bool,
}

impl Ctx {
    const TOP: Ctx = Ctx { prec: Prec::None, parent_has_paren: false, trailing: false };

    fn at(prec: Prec) -> Self {
        Ctx { prec, parent_has_paren: false, trailing: false }
    }

    fn left(prec: Prec) -> Self {
        Ctx { prec, parent_has_paren: false, trailing: true }
    }

    /// Context for the right-most child of a node printed in `self`.
    fn tail(self, prec: Prec, parens: bool) -> Self {
        Ctx {
            prec,
            parent_has_paren: parens || self.parent_has_paren,
            trailing: !parens && self.trailing,
        }
    }

    /// Context for a `_let` body, `_else` branch or function body.
    fn body(self, parens: bool) -> Self {
        Ctx {
            prec: Prec::None,
            parent_has_paren: parens || self.parent_has_paren,
            trailing: false,
        }
    }
}

/// Pretty printer
pub struct Pretty {
    output: String,
    column: usize,
}

impl Default for Pretty {
    fn default() -> Self {
        Pretty::new()
    }
}

impl Pretty {
    pub fn new() -> Self {
        Pretty { output: String::new(), column: 0 }
    }

    /// Pretty print an expression at top level
    pub fn print_expr(&mut self, expr: &Expr) {
        self.print_at(expr, Ctx::TOP);
    }

    fn print_at(&mut self, expr: &Expr, ctx: Ctx) {
        match expr {
            Expr::Num(n) => self.write(&n.to_string()),
            Expr::Var(name) => self.write(name),
            Expr::Bool(true) => self.write("_true"),
            Expr::Bool(false) => self.write("_false"),

            Expr::Add(l, r) => self.print_binop(l, " + ", r, Prec::Add, Prec::Mult, ctx),
            Expr::Mult(l, r) => self.print_binop(l, " * ", r, Prec::Mult, Prec::Operand, ctx),
            Expr::Eq(l, r) => self.print_binop(l, " == ", r, Prec::None, Prec::Add, ctx),

            Expr::Let { name, value, body } => {
                let parens = self.open_block(ctx);
                let col = self.column;
                self.write("_let ");
                self.write(name);
                self.write(" = ");
                self.print_at(value, Ctx::TOP);
                self.newline_to(col);
                self.write("_in  ");
                self.print_at(body, ctx.body(parens));
                self.close(parens);
            }

            Expr::If { test, then_, else_ } => {
                let parens = self.open_block(ctx);
                let col = self.column;
                self.write("_if   ");
                self.print_at(test, Ctx::TOP);
                self.newline_to(col);
                self.write("_then ");
                self.print_at(then_, Ctx::TOP);
                self.newline_to(col);
                self.write("_else ");
                self.print_at(else_, ctx.body(parens));
                self.close(parens);
            }

            Expr::Fun { param, body } => {
                let parens = self.open_block(ctx);
                let col = self.column;
                self.write("_fun (");
                self.write(param);
                self.write(")");
                self.newline_to(col + 2);
                self.print_at(body, ctx.body(parens));
                self.close(parens);
            }

            Expr::Call(callee, arg) => {
                if callee.is_atom() || matches!(callee.as_ref(), Expr::Call(..)) {
                    self.print_at(callee, Ctx::at(Prec::None));
                } else {
                    self.write("(");
                    self.print_at(callee, Ctx::TOP.body(true));
                    self.write(")");
                }
                self.write("(");
                self.print_at(arg, Ctx::TOP.body(true));
                self.write(")");
            }
        }
    }

    fn print_binop(&mut self, l: &Expr, op: &str, r: &Expr, prec: Prec, lhs: Prec, ctx: Ctx) {
        let parens = ctx.prec > prec;
        if parens {
            self.write("(");
        }
        self.print_at(l, Ctx::left(lhs));
        self.write(op);
        self.print_at(r, ctx.tail(prec, parens));
        self.close(parens);
    }

    /// Open a `_let`/`_if`/`_fun`, returning whether it was parenthesized.
    ///
    /// These forms swallow everything to their right, so they need
    /// parentheses whenever text follows them or they sit under an
    /// operator tighter than `+` that nothing else closes.
    fn open_block(&mut self, ctx: Ctx) -> bool {
        let parens = (ctx.prec > Prec::Add && !ctx.parent_has_paren) || ctx.trailing;
        if parens {
            self.write("(");
        }
        parens
    }

    // ============ Helpers ============

    fn write(&mut self, s: &str) {
        self.output.push_str(s);
        self.column += s.chars().count();
    }

    fn newline_to(&mut self, col: usize) {
        self.output.push('\n');
        self.output.extend(std::iter::repeat(' ').take(col));
        self.column = col;
    }

    fn close(&mut self, parens: bool) {
        if parens {
            self.write(")");
        }
    }

    /// Current output column (characters since the last newline)
    pub fn column(&self) -> usize {
        self.column
    }

    /// Get the output string
    pub fn finish(self) -> String {
        self.output
    }
}

// ============ Convenience Functions ============

/// Pretty print an expression
pub fn print_expr(expr: &Expr) -> String {
    let mut p = Pretty::new();
    p.print_expr(expr);
    p.finish()
}
