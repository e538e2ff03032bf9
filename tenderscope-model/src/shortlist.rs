/// Reason prefix the persistence layer uses when a toggle was not stored
/// because of a server-side failure.
pub const SERVER_ERROR_PREFIX: &str = "server-error";

/// Result of asking the host to persist a shortlist toggle.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ToggleOutcome {
    pub persisted: bool,
    #[cfg_attr(feature = "serde", serde(default))]
    pub reason: Option<String>,
}

impl ToggleOutcome {
    pub fn persisted() -> Self {
        Self {
            persisted: true,
            reason: None,
        }
    }

    pub fn not_persisted(reason: impl Into<String>) -> Self {
        Self {
            persisted: false,
            reason: Some(reason.into()),
        }
    }

    /// True when the outcome explicitly asks the caller to undo the local flip.
    pub fn is_rollback_signal(&self) -> bool {
        !self.persisted
            && self
                .reason
                .as_deref()
                .is_some_and(|reason| reason.starts_with(SERVER_ERROR_PREFIX))
    }
}
