//! Timetable domain models.
//!
//! Provides the input types (slots, subjects, labs, fixed classes,
//! classrooms) and the output surface (grid, occurrences, conflicts) of a
//! generation run.
//!
//! # Lifecycle
//!
//! Input models are immutable during a run. A run creates a fresh
//! `TimeGrid` and `ConflictLog`; nothing carries over between runs.

mod classroom;
mod conflict;
mod day;
mod fixed;
mod grid;
mod lab;
mod occurrence;
mod slot;
mod subject;

pub use classroom::Classroom;
pub use conflict::{Conflict, ConflictKind, ConflictLog};
pub use day::Day;
pub use fixed::FixedClass;
pub use grid::TimeGrid;
pub use lab::Lab;
pub use occurrence::{lab_label, Occurrence, OccurrenceKind, LUNCH_LABEL};
pub use slot::{SlotParseError, TimeSlot};
pub use subject::Subject;
