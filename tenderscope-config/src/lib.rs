//! Configuration for the Tenderscope engine.
//!
//! Resolves an [`EngineConfig`](tenderscope_core::EngineConfig) from the
//! environment, a config file or the built-in defaults, and installs the
//! tracing subscriber used by the binaries in this workspace.

pub mod loader;
pub mod telemetry;

pub use loader::{ConfigLoad, ConfigLoader, ConfigSource, error::ConfigLoadError};
pub use telemetry::init_tracing;
