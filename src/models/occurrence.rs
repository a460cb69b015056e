//! Grid occupants.
//!
//! An occurrence is one placed class, lab period, or reservation in a single
//! cell. Labels are produced here and nowhere else, so every lab cell reads
//! the same way regardless of how the placer found its block.

use serde::{Deserialize, Serialize};

/// Cell label of the daily lunch reservation.
pub const LUNCH_LABEL: &str = "Lunch Break";

/// What kind of demand produced an occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OccurrenceKind {
    /// Single-slot theory class.
    Theory,
    /// One period of a (possibly multi-slot) lab session.
    Lab,
    /// Class pinned to a cell before placement.
    Fixed,
    /// Lunch reservation, present on every day.
    Lunch,
}

/// A placed occurrence: display label plus kind tag.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Occurrence {
    /// Text shown in the cell.
    pub label: String,
    /// Origin of the occurrence.
    pub kind: OccurrenceKind,
}

impl Occurrence {
    /// A theory class, labelled with the subject name.
    pub fn theory(subject: &str) -> Self {
        Self {
            label: subject.to_string(),
            kind: OccurrenceKind::Theory,
        }
    }

    /// A lab period, labelled `"<name> (Lab)"`.
    pub fn lab(name: &str) -> Self {
        Self {
            label: lab_label(name),
            kind: OccurrenceKind::Lab,
        }
    }

    /// A fixed class, labelled with its subject.
    pub fn fixed(subject: &str) -> Self {
        Self {
            label: subject.trim().to_string(),
            kind: OccurrenceKind::Fixed,
        }
    }

    /// The lunch reservation.
    pub fn lunch() -> Self {
        Self {
            label: LUNCH_LABEL.to_string(),
            kind: OccurrenceKind::Lunch,
        }
    }
}

/// Cell label for a lab session.
pub fn lab_label(name: &str) -> String {
    format!("{name} (Lab)")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_theory_label_is_subject_name() {
        let o = Occurrence::theory("Math");
        assert_eq!(o.label, "Math");
        assert_eq!(o.kind, OccurrenceKind::Theory);
    }

    #[test]
    fn test_lab_label_format() {
        let o = Occurrence::lab("Physics Lab");
        assert_eq!(o.label, "Physics Lab (Lab)");
        assert_eq!(o.kind, OccurrenceKind::Lab);
        assert_eq!(o.label, lab_label("Physics Lab"));
    }

    #[test]
    fn test_reservations() {
        let f = Occurrence::fixed(" Seminar ");
        assert_eq!(f.label, "Seminar");
        assert_eq!(f.kind, OccurrenceKind::Fixed);

        let l = Occurrence::lunch();
        assert_eq!(l.label, "Lunch Break");
        assert_eq!(l.kind, OccurrenceKind::Lunch);
    }
}
