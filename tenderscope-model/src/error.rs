use std::fmt::{self, Display};

/// Errors produced by model constructors and parsing routines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModelError {
    /// A query-string or config value did not name a known variant.
    InvalidValue { key: &'static str, value: String },
    /// A record identifier was empty or whitespace.
    EmptyId,
}

impl Display for ModelError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModelError::InvalidValue { key, value } => {
                write!(f, "invalid value for {key}: {value:?}")
            }
            ModelError::EmptyId => write!(f, "record id must not be empty"),
        }
    }
}

impl std::error::Error for ModelError {}

pub type Result<T> = std::result::Result<T, ModelError>;
