//! Theory subject model.
//!
//! A subject asks for a fixed number of single-slot classes per week.
//! The subject itself is immutable input; how many classes a generation run
//! actually placed is reported separately in `SubjectAllocation`.

use serde::{Deserialize, Serialize};

/// A theory subject to be scheduled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    /// Unique subject name. Also the label of its occurrences on the grid.
    pub name: String,
    /// Required number of classes per week (must be positive).
    pub weekly_target: u32,
}

impl Subject {
    /// Creates a subject with the given weekly target.
    pub fn new(name: impl Into<String>, weekly_target: u32) -> Self {
        Self {
            name: name.into(),
            weekly_target,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_subject_new() {
        let s = Subject::new("Math", 5);
        assert_eq!(s.name, "Math");
        assert_eq!(s.weekly_target, 5);
    }

    #[test]
    fn test_subject_deserialize() {
        let s: Subject = serde_json::from_str(r#"{"name":"Physics","weekly_target":3}"#).unwrap();
        assert_eq!(s, Subject::new("Physics", 3));
    }
}
