//! Classroom model.
//!
//! Classrooms are accepted and carried through to the generated timetable,
//! but placement never consults them: the grid is a single teaching group's
//! week, not a room-allocation problem.

use serde::{Deserialize, Serialize};

/// A classroom available to the timetable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Classroom {
    /// Unique room name (e.g. "Room 101").
    pub name: String,
}

impl Classroom {
    /// Creates a classroom.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}
