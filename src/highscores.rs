//! Best score tracking
//!
//! A single all-time best, loaded from a [`ScoreStore`] at startup and written
//! back whenever a finished round beats it. A best that failed to save is
//! retried at the next round end.

use serde::{Deserialize, Serialize};

use crate::persistence::PersistError;
use crate::platform::ScoreStore;

/// All-time best score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestScore {
    pub value: u64,
    /// `value` is newer than what the store holds
    #[serde(skip)]
    unsaved: bool,
}

impl BestScore {
    pub fn new(value: u64) -> Self {
        Self { value, unsaved: false }
    }

    pub fn is_unsaved(&self) -> bool {
        self.unsaved
    }

    /// Load from the store (0 when absent or unreadable)
    pub fn load(store: &dyn ScoreStore) -> Self {
        Self::new(store.load_best_score())
    }

    /// Check if a score beats the current best
    pub fn qualifies(&self, score: u64) -> bool {
        score > self.value
    }

    /// Record a finished round's score
    ///
    /// Returns `Ok(true)` when a new best was set and persisted. If the write
    /// fails the new best is still kept in memory and written on a later call.
    pub fn record(&mut self, store: &mut dyn ScoreStore, score: u64) -> Result<bool, PersistError> {
        let improved = self.qualifies(score);
        if improved {
            self.value = score;
            self.unsaved = true;
        }
        if !self.unsaved {
            return Ok(false);
        }
        store.persist_best_score(self.value)?;
        self.unsaved = false;
        Ok(improved)
    }
}
