//! Environment-based evaluator for MSDscript
//!
//! Call-by-value, lexically scoped. Functions close over the environment
//! they were created in; there is no other mutable state.

use msd_ast::expr::Expr;
use tracing::trace;

use crate::env::Env;
use crate::error::EvalResult;
use crate::value::Value;

/// Evaluate a closed expression
pub fn eval(expr: &Expr) -> EvalResult<Value> {
    eval_in(expr, &Env::empty())
}

/// Evaluate an expression under `env`
pub fn eval_in(expr: &Expr, env: &Env) -> EvalResult<Value> {
    trace!(%expr, "eval");
    let value = match expr {
        Expr::Num(n) => Value::Num(*n),
        Expr::Bool(b) => Value::Bool(*b),
        Expr::Var(name) => env.lookup(name)?,

        Expr::Add(l, r) => {
            let lhs = eval_in(l, env)?;
            lhs.add_to(&eval_in(r, env)?)?
        }
        Expr::Mult(l, r) => {
            let lhs = eval_in(l, env)?;
            lhs.mult_with(&eval_in(r, env)?)?
        }
        // Defined for every pair of kinds
        Expr::Eq(l, r) => {
            let lhs = eval_in(l, env)?;
            Value::Bool(lhs == eval_in(r, env)?)
        }

        Expr::If { test, then_, else_ } => {
            if eval_in(test, env)?.is_true()? {
                eval_in(then_, env)?
            } else {
                eval_in(else_, env)?
            }
        }
        Expr::Let { name, value, body } => {
            let bound = eval_in(value, env)?;
            eval_in(body, &env.extend(name.clone(), bound))?
        }
        Expr::Fun { param, body } => Value::closure(param.clone(), body.as_ref().clone(), env.clone()),
        Expr::Call(callee, arg) => {
            let f = eval_in(callee, env)?;
            f.call(eval_in(arg, env)?)?
        }
    };
    trace!(%value, "=>");
    Ok(value)
}

/// `interp` as a method on expressions
pub trait Interp {
    fn interp(&self) -> EvalResult<Value>;
    fn interp_in(&self, env: &Env) -> EvalResult<Value>;
}

impl Interp for Expr {
    fn interp(&self) -> EvalResult<Value> {
        eval(self)
    }

    fn interp_in(&self, env: &Env) -> EvalResult<Value> {
        eval_in(self, env)
    }
}
