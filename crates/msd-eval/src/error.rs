//! Error handling for MSDscript evaluation
//!
//! Messages are load-bearing: tests and differential tools compare them
//! verbatim.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    #[error("free variable: {0}")]
    FreeVariable(String),

    #[error("Trying to add a non-number!")]
    AddNonNumber,
    #[error("Trying to perform multiplication with a non-number!")]
    MultNonNumber,

    /// The receiver of `+` is not a number
    #[error("Cannot perform add operation on {0}!")]
    AddUnsupported(&'static str),
    /// The receiver of `*` is not a number
    #[error("Cannot perform multiplication operation on {0}!")]
    MultUnsupported(&'static str),

    #[error("{0} is not of type boolean")]
    NotBoolean(&'static str),
    #[error("{0} cannot call")]
    NotCallable(&'static str),
}

pub type EvalResult<T> = Result<T, EvalError>;

impl EvalError {
    pub fn free_variable(name: impl Into<String>) -> Self {
        EvalError::FreeVariable(name.into())
    }
}
