//! Conflict reporting.
//!
//! A conflict records demand a run could not meet. Conflicts are warnings:
//! a timetable with conflicts is still a complete, usable result.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::Day;

/// Classification of unmet demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConflictKind {
    /// No day offered a block for the lab.
    UnplacedLab,
    /// A subject ended the run below its weekly target.
    SubjectShortfall { allocated: u32, target: u32 },
    /// A fixed class named a cell already reserved (lunch or another fixed class).
    FixedClassClash {
        day: Day,
        slot: String,
        occupant: String,
    },
}

/// One recorded instance of unmet demand.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    /// Type of conflict.
    pub kind: ConflictKind,
    /// Subject, lab, or fixed-class name.
    pub entity: String,
    /// Human-readable description.
    pub message: String,
}

impl Conflict {
    /// A lab that could not be placed anywhere.
    pub fn unplaced_lab(name: impl Into<String>) -> Self {
        let entity = name.into();
        Self {
            message: format!("Could not schedule lab: {entity}"),
            kind: ConflictKind::UnplacedLab,
            entity,
        }
    }

    /// A subject that received fewer classes than its target.
    pub fn subject_shortfall(name: impl Into<String>, allocated: u32, target: u32) -> Self {
        let entity = name.into();
        Self {
            message: format!("{entity}: {allocated}/{target} classes scheduled"),
            kind: ConflictKind::SubjectShortfall { allocated, target },
            entity,
        }
    }

    /// A fixed class whose cell was already taken.
    pub fn fixed_class_clash(
        name: impl Into<String>,
        day: Day,
        slot: impl Into<String>,
        occupant: impl Into<String>,
    ) -> Self {
        let entity = name.into();
        let slot = slot.into();
        let occupant = occupant.into();
        Self {
            message: format!("Could not place fixed class {entity} on {day} {slot}: taken by {occupant}"),
            kind: ConflictKind::FixedClassClash {
                day,
                slot,
                occupant,
            },
            entity,
        }
    }
}

impl fmt::Display for Conflict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Append-only conflict list, in detection order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConflictLog {
    entries: Vec<Conflict>,
}

impl ConflictLog {
    /// Creates an empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a conflict.
    pub fn push(&mut self, conflict: Conflict) {
        self.entries.push(conflict);
    }

    /// Conflicts in detection order.
    pub fn entries(&self) -> &[Conflict] {
        &self.entries
    }

    /// Iterates conflicts in detection order.
    pub fn iter(&self) -> std::slice::Iter<'_, Conflict> {
        self.entries.iter()
    }

    /// Messages in detection order.
    pub fn messages(&self) -> Vec<&str> {
        self.entries.iter().map(|c| c.message.as_str()).collect()
    }

    /// Number of recorded conflicts.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the run met all demand.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<'a> IntoIterator for &'a ConflictLog {
    type Item = &'a Conflict;
    type IntoIter = std::slice::Iter<'a, Conflict>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conflict_messages() {
        let lab = Conflict::unplaced_lab("Physics Lab");
        assert_eq!(lab.message, "Could not schedule lab: Physics Lab");
        assert_eq!(lab.kind, ConflictKind::UnplacedLab);
        assert_eq!(lab.entity, "Physics Lab");

        let short = Conflict::subject_shortfall("Math", 5, 6);
        assert_eq!(short.to_string(), "Math: 5/6 classes scheduled");
        assert_eq!(
            short.kind,
            ConflictKind::SubjectShortfall {
                allocated: 5,
                target: 6
            }
        );

        let fixed = Conflict::fixed_class_clash("Seminar", Day::Tuesday, "12:00-13:00", "Lunch Break");
        assert_eq!(
            fixed.message,
            "Could not place fixed class Seminar on Tuesday 12:00-13:00: taken by Lunch Break"
        );
        assert_eq!(fixed.entity, "Seminar");
    }

    #[test]
    fn test_log_keeps_detection_order() {
        let mut log = ConflictLog::new();
        assert!(log.is_empty());

        log.push(Conflict::unplaced_lab("B"));
        log.push(Conflict::unplaced_lab("A"));
        log.push(Conflict::unplaced_lab("B")); // no dedup

        assert_eq!(log.len(), 3);
        assert_eq!(
            log.messages(),
            vec![
                "Could not schedule lab: B",
                "Could not schedule lab: A",
                "Could not schedule lab: B",
            ]
        );
        assert_eq!((&log).into_iter().count(), 3);
    }
}
