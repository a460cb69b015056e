//! Timetable generation entry point.
//!
//! # Algorithm
//!
//! 1. Validate the request; fail fast on any problem.
//! 2. Build an empty grid over the request's slots.
//! 3. Reserve lunch and fixed classes, then place labs, then theory
//!    subjects, into the same grid.
//! 4. Return the grid, conflict log, and per-run allocation counts.
//!
//! Every run starts from scratch: allocation counts live in the returned
//! `Timetable`, never in the request or the generator, so repeated runs
//! are independent.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use super::{LabAllocation, LabPlacer, ReservationPlacer, SubjectAllocation, TheoryPlacer};
use crate::error::{Result, TimetableError};
use crate::models::{Classroom, ConflictLog, FixedClass, Lab, Subject, TimeGrid, TimeSlot};
use crate::validation::{validate_input, ValidationError, ValidationErrorKind};

/// Input container for generation.
///
/// Deserializable, so the input layer can load it from any serde format.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimetableRequest {
    /// Slot labels (`HH:MM-HH:MM`) in column order.
    pub slots: Vec<String>,
    /// Theory subjects, in registration order.
    #[serde(default)]
    pub subjects: Vec<Subject>,
    /// Labs, in registration order.
    #[serde(default)]
    pub labs: Vec<Lab>,
    /// Classrooms. Carried to the output, not used for placement.
    #[serde(default)]
    pub classrooms: Vec<Classroom>,
    /// Classes pinned to a cell before placement.
    #[serde(default)]
    pub fixed_classes: Vec<FixedClass>,
    /// Slot reserved for lunch on every day.
    #[serde(default)]
    pub lunch_slot: Option<String>,
}

impl TimetableRequest {
    /// Creates an empty request.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a slot label.
    pub fn with_slot(mut self, label: impl Into<String>) -> Self {
        self.slots.push(label.into());
        self
    }

    /// Appends several slot labels.
    pub fn with_slots<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.slots.extend(labels.into_iter().map(Into::into));
        self
    }

    /// Registers a subject.
    pub fn with_subject(mut self, subject: Subject) -> Self {
        self.subjects.push(subject);
        self
    }

    /// Registers a lab.
    pub fn with_lab(mut self, lab: Lab) -> Self {
        self.labs.push(lab);
        self
    }

    /// Registers a classroom.
    pub fn with_classroom(mut self, classroom: Classroom) -> Self {
        self.classrooms.push(classroom);
        self
    }

    /// Pins a class to a cell.
    pub fn with_fixed_class(mut self, fixed: FixedClass) -> Self {
        self.fixed_classes.push(fixed);
        self
    }

    /// Reserves a slot for lunch on every day.
    pub fn with_lunch_slot(mut self, label: impl Into<String>) -> Self {
        self.lunch_slot = Some(label.into());
        self
    }
}

/// Result of one generation run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Timetable {
    /// Seed that reproduces this run, when generated through `generate`.
    pub seed: Option<u64>,
    /// Filled grid.
    pub grid: TimeGrid,
    /// Unmet demand, in detection order.
    pub conflicts: ConflictLog,
    /// Per-subject counts, in registration order.
    pub subjects: Vec<SubjectAllocation>,
    /// Per-lab outcomes, in registration order.
    pub labs: Vec<LabAllocation>,
    /// Classrooms from the request.
    pub classrooms: Vec<Classroom>,
}

impl Timetable {
    /// Whether any demand went unmet.
    pub fn has_conflicts(&self) -> bool {
        !self.conflicts.is_empty()
    }

    /// Allocation for a subject by name.
    pub fn subject(&self, name: &str) -> Option<&SubjectAllocation> {
        self.subjects.iter().find(|s| s.name == name)
    }

    /// Allocation for a lab by name.
    pub fn lab(&self, name: &str) -> Option<&LabAllocation> {
        self.labs.iter().find(|l| l.name == name)
    }
}

/// Greedy timetable generator.
///
/// # Example
///
/// ```
/// use u_timetable::models::{Lab, Subject};
/// use u_timetable::scheduler::{TimetableGenerator, TimetableRequest};
///
/// let request = TimetableRequest::new()
///     .with_slots(["09:00-10:00", "10:00-11:00", "11:00-12:00"])
///     .with_subject(Subject::new("Math", 4))
///     .with_lab(Lab::new("Physics Lab", 2).with_preferred_slot("09:00-10:00"));
///
/// let timetable = TimetableGenerator::new().with_seed(7).generate(&request).unwrap();
/// assert_eq!(timetable.seed, Some(7));
/// assert_eq!(timetable.grid.filled_cells(), 6);
/// assert!(!timetable.has_conflicts());
/// ```
#[derive(Debug, Clone, Default)]
pub struct TimetableGenerator {
    seed: Option<u64>,
    reservation_placer: ReservationPlacer,
    lab_placer: LabPlacer,
    theory_placer: TheoryPlacer,
}

impl TimetableGenerator {
    /// Creates a generator that draws a fresh seed per run.
    pub fn new() -> Self {
        Self::default()
    }

    /// Fixes the seed used by `generate`.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Runs generation with a seeded ChaCha8 stream.
    ///
    /// Without a configured seed, one is drawn from the thread RNG. Either
    /// way the seed is recorded in the result.
    pub fn generate(&self, request: &TimetableRequest) -> Result<Timetable> {
        let seed = self.seed.unwrap_or_else(|| rand::rng().random());
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut timetable = self.generate_with_rng(request, &mut rng)?;
        timetable.seed = Some(seed);
        Ok(timetable)
    }

    /// Runs generation with a caller-supplied random source.
    ///
    /// # Errors
    /// `InvalidConfiguration` if the request fails validation. Unmet demand
    /// is not an error; see `Timetable::conflicts`.
    pub fn generate_with_rng<R: Rng + ?Sized>(
        &self,
        request: &TimetableRequest,
        rng: &mut R,
    ) -> Result<Timetable> {
        validate_input(request).map_err(TimetableError::InvalidConfiguration)?;
        let slots = parse_slots(&request.slots)?;

        info!(
            slots = slots.len(),
            subjects = request.subjects.len(),
            labs = request.labs.len(),
            classrooms = request.classrooms.len(),
            fixed = request.fixed_classes.len(),
            lunch = request.lunch_slot.as_deref().unwrap_or("-"),
            "generating timetable"
        );

        let mut grid = TimeGrid::new(slots);
        let mut conflicts = ConflictLog::new();

        if let Some(lunch) = request.lunch_slot.as_deref() {
            self.reservation_placer.place_lunch(lunch, &mut grid)?;
        }
        self.reservation_placer
            .place_fixed(&request.fixed_classes, &mut grid, &mut conflicts)?;

        let labs = self
            .lab_placer
            .place_all(&request.labs, &mut grid, &mut conflicts, rng)?;
        let subjects = self
            .theory_placer
            .place_all(&request.subjects, &mut grid, &mut conflicts, rng)?;

        info!(
            filled = grid.filled_cells(),
            total = grid.total_cells(),
            conflicts = conflicts.len(),
            "timetable generated"
        );

        Ok(Timetable {
            seed: None,
            grid,
            conflicts,
            subjects,
            labs,
            classrooms: request.classrooms.clone(),
        })
    }
}

fn parse_slots(labels: &[String]) -> Result<Vec<TimeSlot>> {
    labels
        .iter()
        .map(|label| {
            TimeSlot::parse(label).map_err(|e| {
                TimetableError::InvalidConfiguration(vec![ValidationError::new(
                    ValidationErrorKind::MalformedSlot,
                    e.to_string(),
                )])
            })
        })
        .collect()
}
