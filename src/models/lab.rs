//! Lab session model.
//!
//! A lab occurs exactly once per week and occupies `duration_slots`
//! consecutive slots on a single day. It may name a preferred start slot,
//! which is honoured on whichever day still has that block free.

use serde::{Deserialize, Serialize};

/// A lab session to be scheduled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lab {
    /// Unique lab name.
    pub name: String,
    /// Number of consecutive slots the session needs (1..=slots per day).
    pub duration_slots: usize,
    /// Preferred start slot label. `None` = any start.
    #[serde(default)]
    pub preferred_slot: Option<String>,
}

impl Lab {
    /// Creates a lab with no start preference.
    pub fn new(name: impl Into<String>, duration_slots: usize) -> Self {
        Self {
            name: name.into(),
            duration_slots,
            preferred_slot: None,
        }
    }

    /// Sets the preferred start slot (by label).
    pub fn with_preferred_slot(mut self, label: impl Into<String>) -> Self {
        self.preferred_slot = Some(label.into());
        self
    }
}
