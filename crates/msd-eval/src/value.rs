//! Runtime values for MSDscript

use std::fmt;
use std::rc::Rc;

use msd_ast::expr::Expr;

use crate::env::Env;
use crate::error::{EvalError, EvalResult};

/// Result of evaluation
#[derive(Debug, Clone)]
pub enum Value {
    Num(i64),
    Bool(bool),
    Closure(Rc<Closure>),
}

/// A function value: parameter, body and the environment it was defined in
#[derive(Debug)]
pub struct Closure {
    pub param: Box<str>,
    pub body: Expr,
    pub env: Env,
}

impl Value {
    pub fn closure(param: impl Into<Box<str>>, body: Expr, env: Env) -> Self {
        Value::Closure(Rc::new(Closure { param: param.into(), body, env }))
    }

    /// Kind name as it appears in error messages
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Num(_) => "NumVal",
            Value::Bool(_) => "BoolVal",
            Value::Closure(_) => "FunVal",
        }
    }

    /// `self + other`. Which error is raised depends on `self`.
    pub fn add_to(&self, other: &Value) -> EvalResult<Value> {
        match (self, other) {
            (Value::Num(a), Value::Num(b)) => Ok(Value::Num(a.wrapping_add(*b))),
            (Value::Num(_), _) => Err(EvalError::AddNonNumber),
            (lhs, _) => Err(EvalError::AddUnsupported(lhs.type_name())),
        }
    }

    /// `self * other`, same error rules as [`Value::add_to`]
    pub fn mult_with(&self, other: &Value) -> EvalResult<Value> {
        match (self, other) {
            (Value::Num(a), Value::Num(b)) => Ok(Value::Num(a.wrapping_mul(*b))),
            (Value::Num(_), _) => Err(EvalError::MultNonNumber),
            (lhs, _) => Err(EvalError::MultUnsupported(lhs.type_name())),
        }
    }

    pub fn is_true(&self) -> EvalResult<bool> {
        match self {
            Value::Bool(b) => Ok(*b),
            other => Err(EvalError::NotBoolean(other.type_name())),
        }
    }

    /// Apply a function value: its body runs in the captured environment
    /// extended with the parameter.
    pub fn call(&self, arg: Value) -> EvalResult<Value> {
        match self {
            Value::Closure(c) => {
                let env = c.env.extend(c.param.clone(), arg);
                crate::eval::eval_in(&c.body, &env)
            }
            other => Err(EvalError::NotCallable(other.type_name())),
        }
    }

    /// Back to syntax. A closure becomes its `_fun` and loses its environment.
    pub fn to_expr(&self) -> Expr {
        match self {
            Value::Num(n) => Expr::Num(*n),
            Value::Bool(b) => Expr::Bool(*b),
            Value::Closure(c) => Expr::fun(c.param.clone(), c.body.clone()),
        }
    }
}

/// Same kind and same payload. Closures compare parameter and body only.
impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Num(a), Value::Num(b)) => a == b,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Closure(a), Value::Closure(b)) => a.param == b.param && a.body == b.body,
            _ => false,
        }
    }
}

impl Eq for Value {}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Num(n) => write!(f, "{}", n),
            Value::Bool(true) => write!(f, "_true"),
            Value::Bool(false) => write!(f, "_false"),
            Value::Closure(c) => write!(f, "[_fun ({}) {}]", c.param, c.body),
        }
    }
}
