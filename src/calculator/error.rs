//! Error types for expression evaluation.

use thiserror::Error;

/// Broad class of an evaluation failure.
///
/// Both kinds collapse into the same error sentinel on the display; the
/// distinction only matters for logging and tests.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The expression text could not be parsed.
    Malformed,
    /// The expression parsed but the arithmetic has no finite answer.
    Domain,
}

/// Evaluation errors.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum EvalError {
    #[error("Empty expression")]
    Empty,

    #[error("Disallowed input in expression: {0}")]
    Disallowed(String),

    #[error("Malformed expression: {0}")]
    Syntax(String),

    #[error("Unbalanced parentheses")]
    UnbalancedParens,

    #[error("Division by zero")]
    DivisionByZero,

    #[error("{function} is undefined for {value}")]
    Domain { function: &'static str, value: f64 },

    #[error("Result is not a finite number")]
    NonFinite,
}

impl EvalError {
    pub fn syntax(msg: impl Into<String>) -> Self {
        Self::Syntax(msg.into())
    }

    pub fn disallowed(input: impl Into<String>) -> Self {
        Self::Disallowed(input.into())
    }

    pub fn domain(function: &'static str, value: f64) -> Self {
        Self::Domain { function, value }
    }

    /// Classify this error as malformed input or an arithmetic domain failure.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Empty | Self::Disallowed(_) | Self::Syntax(_) | Self::UnbalancedParens => {
                ErrorKind::Malformed
            }
            Self::DivisionByZero | Self::Domain { .. } | Self::NonFinite => ErrorKind::Domain,
        }
    }
}

pub type Result<T> = std::result::Result<T, EvalError>;
