//! One browsing session: the message/update state machine that ties the
//! field controllers, filter composer, URL sync, fetch orchestrator and
//! shortlist together, plus the tokio loop that executes its effects.

pub mod effects;
pub mod messages;
pub mod runtime;
pub mod state;
pub mod update;


pub use effects::{Effect, TimerKey};
pub use messages::Message;
pub use runtime::{SessionHandle, SessionRuntime};
pub use state::{AuthGate, BrowseSession};
pub use update::update;
