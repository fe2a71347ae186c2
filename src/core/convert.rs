//! core::convert
//!
//! Conversion of console tokens into typed JSON-RPC parameters.
//!
//! Tokens arrive as plain strings. Each RPC parameter declares a
//! [`ParamKind`] that decides how its token becomes a `serde_json::Value`.

use serde_json::Value;
use thiserror::Error;

/// A token could not be converted to the expected type.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConversionError {
    #[error("{0} cannot be converted to bool")]
    Bool(String),

    #[error("{0} cannot be converted to an integer")]
    Int(String),

    #[error("{0} cannot be converted to a number")]
    Float(String),

    #[error("{token} is not valid JSON: {message}")]
    Json { token: String, message: String },
}

/// Parse a boolean-like token.
///
/// Accepts `yes/true/1/y` and `no/false/0/n`, case-insensitively.
///
/// # Example
///
/// ```
/// use sbtc::core::convert::to_bool;
///
/// assert_eq!(to_bool("Yes"), Ok(true));
/// assert_eq!(to_bool("0"), Ok(false));
/// assert!(to_bool("maybe").is_err());
/// ```
pub fn to_bool(token: &str) -> Result<bool, ConversionError> {
    match token.to_lowercase().as_str() {
        "yes" | "true" | "1" | "y" => Ok(true),
        "no" | "false" | "0" | "n" => Ok(false),
        _ => Err(ConversionError::Bool(token.to_string())),
    }
}

pub fn to_int(token: &str) -> Result<i64, ConversionError> {
    token
        .trim()
        .parse()
        .map_err(|_| ConversionError::Int(token.to_string()))
}

pub fn to_float(token: &str) -> Result<f64, ConversionError> {
    token
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|f| f.is_finite())
        .ok_or_else(|| ConversionError::Float(token.to_string()))
}

pub fn to_json(token: &str) -> Result<Value, ConversionError> {
    serde_json::from_str(token).map_err(|e| ConversionError::Json {
        token: token.to_string(),
        message: e.to_string(),
    })
}

/// Parse as JSON when possible, otherwise keep the raw string.
pub fn to_json_or_string(token: &str) -> Value {
    serde_json::from_str(token).unwrap_or_else(|_| Value::String(token.to_string()))
}

/// How a token maps onto a JSON-RPC parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    /// Sent verbatim as a JSON string.
    Str,
    /// Signed integer.
    Int,
    /// Floating-point amount.
    Float,
    /// Boolean-like token sent as `true`/`false`.
    Bool,
    /// Boolean-like token sent as `1`/`0` (legacy verbose flags).
    BoolAsInt,
    /// Raw JSON document (arrays, objects).
    Json,
}

impl ParamKind {
    /// Convert `token` according to this kind.
    pub fn convert(self, token: &str) -> Result<Value, ConversionError> {
        match self {
            ParamKind::Str => Ok(Value::String(token.to_string())),
            ParamKind::Int => to_int(token).map(Value::from),
            ParamKind::Float => to_float(token).map(Value::from),
            ParamKind::Bool => to_bool(token).map(Value::Bool),
            ParamKind::BoolAsInt => to_bool(token).map(|b| Value::from(i64::from(b))),
            ParamKind::Json => to_json(token),
        }
    }
}
