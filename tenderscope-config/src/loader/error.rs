use std::path::PathBuf;

use tenderscope_core::EngineError;
use thiserror::Error;

/// Guard-rail failures raised after a config was read successfully.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("config file {0} does not exist")]
    MissingFile(PathBuf),
    #[error("{origin}: toml error: {toml}; json error: {json}")]
    Unparseable {
        origin: String,
        toml: String,
        json: String,
    },
    #[error("config from {origin} is invalid: {source}")]
    Invalid {
        origin: String,
        #[source]
        source: EngineError,
    },
}
