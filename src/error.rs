//! Error types.
//!
//! Only two things can stop a generation run: input that fails validation,
//! and a grid write that would break the one-occupant-per-cell invariant.
//! Demand that cannot be met is not an error; it is reported through the
//! run's `ConflictLog`.

use thiserror::Error;

use crate::models::Day;
use crate::validation::ValidationError;

/// Result alias for timetable operations.
pub type Result<T> = std::result::Result<T, TimetableError>;

/// Errors raised by the timetable engine.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TimetableError {
    /// The request failed validation; nothing was scheduled.
    #[error("invalid configuration: {}", summarize(.0))]
    InvalidConfiguration(Vec<ValidationError>),

    /// A write targeted a cell that already holds an occurrence.
    #[error("cell {day} {slot} is already occupied by '{occupant}'")]
    CellOccupied {
        day: Day,
        slot: String,
        occupant: String,
    },

    /// A write named a slot label that is not part of the grid.
    #[error("unknown time slot '{0}'")]
    UnknownSlot(String),
}

impl TimetableError {
    /// Validation problems carried by `InvalidConfiguration`, if any.
    pub fn validation_errors(&self) -> Option<&[ValidationError]> {
        match self {
            TimetableError::InvalidConfiguration(errors) => Some(errors),
            _ => None,
        }
    }
}

fn summarize(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationErrorKind;

    #[test]
    fn test_invalid_configuration_message_lists_all_problems() {
        let err = TimetableError::InvalidConfiguration(vec![
            ValidationError::new(ValidationErrorKind::NoTimeSlots, "No time slots defined"),
            ValidationError::new(
                ValidationErrorKind::InvalidWeeklyTarget,
                "Subject 'Math' has a weekly target of 0",
            ),
        ]);
        assert_eq!(
            err.to_string(),
            "invalid configuration: No time slots defined; Subject 'Math' has a weekly target of 0"
        );
        assert_eq!(err.validation_errors().map(|e| e.len()), Some(2));
    }

    #[test]
    fn test_cell_occupied_message() {
        let err = TimetableError::CellOccupied {
            day: Day::Tuesday,
            slot: "09:00-10:00".into(),
            occupant: "Math".into(),
        };
        assert_eq!(
            err.to_string(),
            "cell Tuesday 09:00-10:00 is already occupied by 'Math'"
        );
        assert!(err.validation_errors().is_none());
    }
}
