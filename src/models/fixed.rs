//! Fixed class model.
//!
//! A fixed class pins one subject to one cell before any lab or theory
//! placement runs. It does not count toward a subject's weekly target.

use serde::{Deserialize, Serialize};

use super::Day;

/// A class pinned to a specific day and slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FixedClass {
    /// Label shown in the cell.
    pub subject: String,
    /// Day of the class.
    pub day: Day,
    /// Slot label.
    pub slot: String,
}

impl FixedClass {
    /// Creates a fixed class.
    pub fn new(subject: impl Into<String>, day: Day, slot: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            day,
            slot: slot.into(),
        }
    }
}
