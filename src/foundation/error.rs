use crate::expression::error::{ParsingError, RuntimeError};
use crate::function::error::FunctionError;

/// Convenience result type used across the crate.
pub type StyleResult<T> = Result<T, StyleError>;

/// Top-level error taxonomy used by the public entry points.
#[derive(thiserror::Error, Debug)]
pub enum StyleError {
    /// One compilation pass collected these expression errors.
    #[error("parse error: {}", render_parse_errors(.0))]
    Parse(Vec<ParsingError>),

    /// Evaluation of a compiled expression failed.
    #[error("runtime error: {0}")]
    Runtime(#[from] RuntimeError),

    /// A legacy stop function could not be constructed.
    #[error("function error: {0}")]
    Function(#[from] FunctionError),

    /// Errors when serializing or deserializing style data.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl StyleError {
    /// Build a [`StyleError::Runtime`] value.
    pub fn runtime(msg: impl Into<String>) -> Self {
        Self::Runtime(RuntimeError::new(msg))
    }

    /// Build a [`StyleError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

impl From<Vec<ParsingError>> for StyleError {
    fn from(errors: Vec<ParsingError>) -> Self {
        Self::Parse(errors)
    }
}

impl From<serde_json::Error> for StyleError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serde(e.to_string())
    }
}

fn render_parse_errors(errors: &[ParsingError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
