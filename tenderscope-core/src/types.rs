//! Re-export of the model vocabulary so engine users need a single import.

pub use tenderscope_model::prelude::*;
pub use tenderscope_model::{ModelError, SERVER_ERROR_PREFIX};
