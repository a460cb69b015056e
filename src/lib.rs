//! Weekly timetable allocation.
//!
//! Places recurring weekly demand onto a fixed five-day × N-slot grid:
//! theory subjects with a weekly class target, and single-session labs
//! that need a contiguous block, optionally at a preferred start slot.
//! A lunch slot and fixed classes can be reserved before placement.
//! Demand that cannot be met is reported as conflicts rather than errors.
//!
//! # Modules
//!
//! - **`models`**: Domain types (`TimeSlot`, `Day`, `Subject`, `Lab`,
//!   `FixedClass`, `Classroom`, `TimeGrid`, `Occurrence`, `ConflictLog`)
//! - **`validation`**: Input integrity checks (slot format, duplicate names,
//!   targets, lab durations, reservation slots)
//! - **`scheduler`**: `TimetableGenerator`, the reservation, lab and theory
//!   placers, and KPIs
//! - **`error`**: `TimetableError`
//!
//! # Determinism
//!
//! All randomness flows through an explicit `rand::Rng`. A fixed seed
//! reproduces the grid and conflict log exactly.
//!
//! # Logging
//!
//! Runs emit `tracing` events (`info` per run, `debug` per placement,
//! `warn` per conflict). Installing a subscriber is up to the caller.

pub mod error;
pub mod models;
pub mod scheduler;
pub mod validation;

pub use error::{Result, TimetableError};
pub use scheduler::{Timetable, TimetableGenerator, TimetableRequest};
