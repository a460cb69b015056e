//! Input validation for timetable requests.
//!
//! Checks structural integrity of slots, subjects, labs, and classrooms
//! before anything is placed. Detects:
//! - Missing or malformed time slots
//! - Duplicate names (slots, subjects, labs, classrooms)
//! - A subject whose name equals a lab's cell label (`"<lab> (Lab)"`)
//! - Non-positive weekly targets
//! - Lab durations that cannot fit in one day
//! - Lunch or fixed-class slots that name no defined slot
//!
//! A preferred lab slot that names no known slot is not an error: the
//! placer simply skips the preferred attempt for that lab.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{lab_label, TimeSlot};
use crate::scheduler::TimetableRequest;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ValidationErrorKind {
    /// The slot list is empty.
    NoTimeSlots,
    /// A slot label is not `HH:MM-HH:MM` with start before end.
    MalformedSlot,
    /// Two entities of the same type share a name.
    DuplicateId,
    /// A subject, lab, or classroom has a blank name.
    EmptyName,
    /// A subject's weekly target is zero.
    InvalidWeeklyTarget,
    /// A lab's duration is zero or longer than the day.
    InvalidLabDuration,
    /// A lunch or fixed-class slot is not one of the defined slots.
    UnknownSlotReference,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

/// Validates a timetable request.
///
/// Checks:
/// 1. At least one time slot
/// 2. Every slot label parses, and no label repeats
/// 3. Subject names are non-blank and unique; targets are positive
/// 4. Lab names are non-blank and unique; `1 <= duration <= slots per day`;
///    no subject is named like a lab's cell label
/// 5. Classroom names are non-blank and unique
/// 6. The lunch slot and every fixed-class slot name a defined slot; fixed
///    classes have a non-blank subject
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_input(request: &TimetableRequest) -> ValidationResult {
    let mut errors = Vec::new();

    // Slots
    if request.slots.is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::NoTimeSlots,
            "No time slots defined",
        ));
    }

    let mut slot_labels = HashSet::new();
    for raw in &request.slots {
        match TimeSlot::parse(raw) {
            Ok(slot) => {
                if !slot_labels.insert(slot.label().to_string()) {
                    errors.push(ValidationError::new(
                        ValidationErrorKind::DuplicateId,
                        format!("Duplicate time slot: {}", slot.label()),
                    ));
                }
            }
            Err(e) => errors.push(ValidationError::new(
                ValidationErrorKind::MalformedSlot,
                e.to_string(),
            )),
        }
    }
    let slots_per_day = request.slots.len();

    // Subjects
    let mut subject_names = HashSet::new();
    for subject in &request.subjects {
        check_name("Subject", &subject.name, &mut subject_names, &mut errors);
        if subject.weekly_target == 0 {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidWeeklyTarget,
                format!("Subject '{}' has a weekly target of 0", subject.name),
            ));
        }
    }

    // Labs
    let mut lab_names = HashSet::new();
    for lab in &request.labs {
        check_name("Lab", &lab.name, &mut lab_names, &mut errors);
        if lab.duration_slots == 0 || lab.duration_slots > slots_per_day {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidLabDuration,
                format!(
                    "Lab '{}' needs {} slot(s) but a day has {}",
                    lab.name, lab.duration_slots, slots_per_day
                ),
            ));
        }
        let label = lab_label(&lab.name);
        if subject_names.contains(label.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Subject '{label}' collides with the cells of lab '{}'", lab.name),
            ));
        }
    }

    // Classrooms
    let mut room_names = HashSet::new();
    for room in &request.classrooms {
        check_name("Classroom", &room.name, &mut room_names, &mut errors);
    }

    // Reservations
    let is_defined = |label: &str| slot_labels.contains(label.trim());
    if let Some(lunch) = &request.lunch_slot {
        if !is_defined(lunch) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownSlotReference,
                format!("Lunch slot '{lunch}' is not a defined time slot"),
            ));
        }
    }
    for fixed in &request.fixed_classes {
        if fixed.subject.trim().is_empty() {
            errors.push(ValidationError::new(
                ValidationErrorKind::EmptyName,
                "Fixed class subject must not be blank",
            ));
        }
        if !is_defined(&fixed.slot) {
            errors.push(ValidationError::new(
                ValidationErrorKind::UnknownSlotReference,
                format!(
                    "Fixed class '{}' on {} names unknown slot '{}'",
                    fixed.subject, fixed.day, fixed.slot
                ),
            ));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_name<'a>(
    entity: &str,
    name: &'a str,
    seen: &mut HashSet<&'a str>,
    errors: &mut Vec<ValidationError>,
) {
    if name.trim().is_empty() {
        errors.push(ValidationError::new(
            ValidationErrorKind::EmptyName,
            format!("{entity} name must not be blank"),
        ));
    } else if !seen.insert(name) {
        errors.push(ValidationError::new(
            ValidationErrorKind::DuplicateId,
            format!("Duplicate {} name: {name}", entity.to_lowercase()),
        ));
    }
}
