use thiserror::Error;

use crate::language::Symbol;

/// Errors raised while reading or transforming grammars.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    #[error("Parse error on line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Grammar is malformed: variable {variable} {reason}")]
    Malformed { variable: Symbol, reason: String },

    #[error("Precondition violated: {0}")]
    Precondition(String),
}

/// Result type for grammar operations
pub type Result<T> = std::result::Result<T, GrammarError>;

impl GrammarError {
    pub(crate) fn underivable(variable: &Symbol) -> Self {
        GrammarError::Malformed {
            variable: variable.clone(),
            reason: "cannot be derived".to_string(),
        }
    }
}
