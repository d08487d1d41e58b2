//! Error types for the minimization engine.
//!
//! Every error is local to one operation and recoverable by the caller;
//! nothing here poisons engine-wide state.

use thiserror::Error;

/// Result type for all engine operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while parsing, evaluating, or minimizing a
/// Boolean function.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Grammar or bracket violation in the input text.
    #[error("syntax error: {message}")]
    Syntax { message: String },

    /// A declared variable name collides with a reserved operator symbol.
    #[error("variable `{name}` collides with a reserved symbol")]
    VariableConflict { name: String },

    /// The expression uses a variable that is not in the variable list.
    #[error("undeclared variable `{name}`")]
    UndeclaredVariable { name: String },

    /// The declared variable list does not cover the variables actually
    /// used by the expression.
    #[error("declared variables do not cover the expression (missing `{name}`)")]
    DimensionMismatch { name: String },

    /// The residual boolean expression was malformed during evaluation.
    #[error("evaluation error: {message}")]
    Evaluation { message: String },

    /// A substitution key lies outside the function's domain.
    #[error("assignment outside the function's domain: {message}")]
    Domain { message: String },

    /// The prime-implicant reduction exceeded a configured bound.
    #[error("reduction exceeded configured bound: {message}")]
    ResourceExceeded { message: String },

    /// The requested operation is a documented gap, not implemented.
    #[error("unsupported operation: {operation}")]
    Unsupported { operation: String },
}

impl Error {
    pub fn syntax(message: impl Into<String>) -> Self {
        Error::Syntax {
            message: message.into(),
        }
    }

    pub fn evaluation(message: impl Into<String>) -> Self {
        Error::Evaluation {
            message: message.into(),
        }
    }

    pub fn domain(message: impl Into<String>) -> Self {
        Error::Domain {
            message: message.into(),
        }
    }

    pub fn resource(message: impl Into<String>) -> Self {
        Error::ResourceExceeded {
            message: message.into(),
        }
    }
}
