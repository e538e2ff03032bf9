use std::collections::{HashMap, VecDeque};

use tracing::{debug, info, warn};

use crate::error::ServiceResult;
use crate::types::{Record, RecordId, ToggleOutcome};

/// How a persistence response was folded back into the rendered rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciliation {
    /// Stored; the local flip stands.
    Confirmed,
    /// Not stored, but not a server failure either (e.g. guest session);
    /// the local flip stands.
    Kept { reason: Option<String> },
    /// The call failed or the server reported an error; the flag was negated
    /// back on that record.
    RolledBack,
    /// The record is no longer on screen; nothing to reconcile.
    Missing,
    /// Rollback was due, but the row no longer shows what this toggle wrote
    /// (a later click or a reload replaced it); left as is.
    Superseded,
}

/// Flips shortlist flags immediately and reconciles them with the host's
/// persistence call.
///
/// Rapid repeat clicks on one record are not serialised: each click flips
/// the flag and each response is reconciled on its own, so the last write
/// wins. Records are independent of each other.
///
/// Every outstanding call remembers the value it wrote. A rollback only
/// undoes that write, and only while the row still shows it.
#[derive(Debug, Clone, Default)]
pub struct OptimisticShortlist {
    in_flight: HashMap<RecordId, VecDeque<bool>>,
}

impl OptimisticShortlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Negate the flag on `id`. Returns the new value, or `None` when the
    /// record is not in `items`.
    pub fn begin(&mut self, items: &mut [Record], id: &RecordId) -> Option<bool> {
        let record = items.iter_mut().find(|record| &record.id == id)?;
        record.is_shortlisted = !record.is_shortlisted;
        self.in_flight
            .entry(id.clone())
            .or_default()
            .push_back(record.is_shortlisted);
        debug!(record = %id, shortlisted = record.is_shortlisted, "optimistic toggle");
        Some(record.is_shortlisted)
    }

    /// Fold the persistence response for `id` back into `items`.
    pub fn reconcile(
        &mut self,
        items: &mut [Record],
        id: &RecordId,
        result: ServiceResult<ToggleOutcome>,
    ) -> Reconciliation {
        let written = self.settle(id);

        // `None` means the local flip has to be undone.
        let verdict = match result {
            Err(err) => {
                warn!(record = %id, error = %err, "shortlist toggle failed");
                None
            }
            Ok(outcome) if outcome.is_rollback_signal() => {
                warn!(record = %id, reason = ?outcome.reason, "shortlist toggle rejected");
                None
            }
            Ok(ToggleOutcome {
                persisted: true, ..
            }) => Some(Reconciliation::Confirmed),
            Ok(ToggleOutcome { reason, .. }) => {
                info!(record = %id, reason = ?reason, "toggle kept locally without persisting");
                Some(Reconciliation::Kept { reason })
            }
        };

        let Some(record) = items.iter_mut().find(|record| &record.id == id) else {
            debug!(record = %id, "toggle response for a record no longer shown");
            return Reconciliation::Missing;
        };

        if let Some(reconciliation) = verdict {
            return reconciliation;
        }
        match written {
            Some(value) if record.is_shortlisted == value => {
                record.is_shortlisted = !value;
                Reconciliation::RolledBack
            }
            _ => {
                debug!(record = %id, "row no longer shows this toggle, rollback skipped");
                Reconciliation::Superseded
            }
        }
    }

    /// Whether a persistence call for `id` is still outstanding.
    pub fn is_pending(&self, id: &RecordId) -> bool {
        self.in_flight.contains_key(id)
    }

    /// Retire the oldest outstanding call for `id`, returning what it wrote.
    fn settle(&mut self, id: &RecordId) -> Option<bool> {
        let pending = self.in_flight.get_mut(id)?;
        let written = pending.pop_front();
        if pending.is_empty() {
            self.in_flight.remove(id);
        }
        written
    }
}
