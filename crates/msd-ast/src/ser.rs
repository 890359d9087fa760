//! Serialization for MSDscript ASTs
//!
//! Two machine formats next to the text syntax:
//! - JSON (via serde_json), for tooling and `--ast` dumps
//! - Binary (via bincode), for caching parsed programs

use crate::expr::Expr;
use thiserror::Error;

/// Serialization error
#[derive(Error, Debug)]
pub enum SerError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Binary error: {0}")]
    Binary(#[from] bincode::Error),
}

pub type Result<T> = std::result::Result<T, SerError>;

// ============ JSON ============

/// Serialize expression to indented JSON
pub fn to_json(expr: &Expr) -> Result<String> {
    Ok(serde_json::to_string_pretty(expr)?)
}

/// Serialize expression to compact JSON (no whitespace)
pub fn to_json_compact(expr: &Expr) -> Result<String> {
    Ok(serde_json::to_string(expr)?)
}

/// Deserialize expression from JSON
pub fn from_json(json: &str) -> Result<Expr> {
    Ok(serde_json::from_str(json)?)
}

// ============ Binary ============

pub fn to_binary(expr: &Expr) -> Result<Vec<u8>> {
    Ok(bincode::serialize(expr)?)
}

pub fn from_binary(bytes: &[u8]) -> Result<Expr> {
    Ok(bincode::deserialize(bytes)?)
}
