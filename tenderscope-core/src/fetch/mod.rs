//! Race-safe result loading.

pub mod orchestrator;


pub use orchestrator::{FetchOrchestrator, FetchOutcome, FetchToken};
