use thiserror::Error;

use crate::types::FilterKey;

/// Failures reported by the external collaborator (result fetch, suggestion
/// corpus, shortlist persistence, session check).
///
/// These never escape the engine: every call site converts them into local
/// state (an error string, an empty suggestion list, a reverted flag).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ServiceError {
    #[error("Transport error: {0}")]
    Transport(String),
    #[error("Not authorised: {0}")]
    Unauthorized(String),
    #[error("Server error: {0}")]
    Server(String),
    #[error("Response could not be decoded: {0}")]
    Decode(String),
}

pub type ServiceResult<T> = std::result::Result<T, ServiceError>;

/// Misuse of the engine itself (as opposed to collaborator failures).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    #[error("Field {0} is not configured on this surface")]
    UnknownField(FilterKey),
    #[error("Invalid engine configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, EngineError>;
