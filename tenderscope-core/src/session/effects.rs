use std::time::Duration;

use super::messages::Message;
use crate::fetch::FetchToken;
use crate::filter::{CanonicalFilter, UrlUpdate};
use crate::types::{FilterKey, RecordId};

/// Named timer slot. Scheduling into an occupied slot cancels what was there.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKey {
    Debounce(FilterKey),
    Suggest(FilterKey),
    AuthPrompt,
    ShortlistRefetch,
}

/// Work the update step asks the runtime to do. Pure data, so the state
/// machine can be driven and inspected without a runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Deliver `message` after `delay`, replacing any timer in the same slot.
    Schedule {
        timer: TimerKey,
        delay: Duration,
        message: Box<Message>,
    },
    Cancel(TimerKey),
    Fetch {
        token: FetchToken,
        filter: CanonicalFilter,
    },
    FetchSuggestions {
        field: FilterKey,
        query: String,
        generation: u64,
    },
    LoadCorpus,
    PersistShortlist(RecordId),
    CheckAuth,
    WriteUrl(UrlUpdate),
    Focus(FilterKey),
}

impl Effect {
    pub fn schedule(timer: TimerKey, delay: Duration, message: Message) -> Self {
        Effect::Schedule {
            timer,
            delay,
            message: Box::new(message),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Schedule { .. } => "Schedule",
            Self::Cancel(_) => "Cancel",
            Self::Fetch { .. } => "Fetch",
            Self::FetchSuggestions { .. } => "FetchSuggestions",
            Self::LoadCorpus => "LoadCorpus",
            Self::PersistShortlist(_) => "PersistShortlist",
            Self::CheckAuth => "CheckAuth",
            Self::WriteUrl(_) => "WriteUrl",
            Self::Focus(_) => "Focus",
        }
    }
}
