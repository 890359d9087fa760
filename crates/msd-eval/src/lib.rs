//! # MSDscript Eval - Interpreter for MSDscript
//!
//! Evaluates [`msd_ast::expr::Expr`] trees to [`Value`]s against a
//! persistent [`Env`] chain.

pub mod env;
pub mod error;
pub mod eval;
pub mod value;

pub mod prelude {
    pub use crate::env::Env;
    pub use crate::error::{EvalError, EvalResult};
    pub use crate::eval::{eval, eval_in, Interp};
    pub use crate::value::{Closure, Value};
}
