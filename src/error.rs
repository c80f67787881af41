use thiserror::Error;

use crate::value::Kind;

#[derive(Debug, Error)]
pub enum ConfError {
    #[error("invalid value {raw:?} for env var {env_var}: {source}")]
    InvalidEnvironmentValue {
        env_var: String,
        raw: String,
        source: ParseError,
    },

    /// Rejected command line, including `--help` display requests.
    /// `clap::Error::exit` prints the right thing for either.
    #[error(transparent)]
    InvalidArgumentValue(#[from] clap::Error),

    #[error("option name {name:?} {reason}")]
    InvalidOptionName { name: String, reason: &'static str },

    #[error("option {0:?} is defined more than once")]
    DuplicateOption(String),

    #[error("redact called on {kind} (only structs are acceptable)")]
    NotARecord { kind: &'static str },
}

impl ConfError {
    /// Errors caused by the values an operator supplied. The same program
    /// succeeds with different input.
    pub fn is_operator_error(&self) -> bool {
        matches!(
            self,
            ConfError::InvalidEnvironmentValue { .. } | ConfError::InvalidArgumentValue(_)
        )
    }

    /// Errors in how the configuration type or the library is used. No input
    /// can fix these.
    pub fn is_author_error(&self) -> bool {
        !self.is_operator_error()
    }
}

/// A string that does not parse as an option's primitive kind.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind} value: {reason}")]
pub struct ParseError {
    pub kind: Kind,
    pub reason: String,
}

impl ParseError {
    pub(crate) fn new(kind: Kind, reason: impl Into<String>) -> Self {
        Self {
            kind,
            reason: reason.into(),
        }
    }
}
