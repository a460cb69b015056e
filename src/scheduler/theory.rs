//! Theory class placement.
//!
//! # Algorithm
//!
//! Subjects are processed by weekly target, highest first (stable: ties
//! keep registration order). For each subject, repeat rounds until the
//! target is met or a round places nothing:
//! 1. **Pair** (only if at least two classes are still needed): on the first
//!    day in a shuffled order where the subject has no class yet and two
//!    adjacent slots are free, place both.
//! 2. **Single** (only if the pair attempt placed nothing): on the first day
//!    in a fresh shuffled order where the subject has fewer than
//!    `MAX_DAILY_CLASSES`, take the earliest free slot.
//!
//! Day counts consider only the subject's own theory classes; a fixed class
//! or lab with the same label does not use up its daily cap.
//!
//! A subject left short of its target is recorded as
//! `<subject>: <allocated>/<target> classes scheduled`.
//!
//! # Termination
//! Every productive round places at least one class, so `target` rounds
//! always suffice. Rounds are additionally capped at `2 * ceil(target / 2)`,
//! saturating at `u32::MAX`.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::shuffled_days;
use crate::error::Result;
use crate::models::{Conflict, ConflictLog, Occurrence, Subject, TimeGrid};

/// Most classes one subject may have on a single day.
pub const MAX_DAILY_CLASSES: usize = 2;

const PAIR_LEN: usize = 2;

/// Per-run outcome for one subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubjectAllocation {
    /// Subject name.
    pub name: String,
    /// Requested classes per week.
    pub weekly_target: u32,
    /// Classes actually placed this run.
    pub allocated: u32,
}

impl SubjectAllocation {
    /// Whether the weekly target was met.
    #[inline]
    pub fn is_satisfied(&self) -> bool {
        self.allocated >= self.weekly_target
    }

    /// Classes still missing.
    #[inline]
    pub fn shortfall(&self) -> u32 {
        self.weekly_target.saturating_sub(self.allocated)
    }
}

/// Upper bound on placement rounds for a subject.
#[inline]
pub fn round_limit(weekly_target: u32) -> u32 {
    weekly_target.div_ceil(2).saturating_mul(2)
}

/// Fills remaining grid cells to meet each subject's weekly target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TheoryPlacer;

impl TheoryPlacer {
    /// Creates a theory placer.
    pub fn new() -> Self {
        Self
    }

    /// Places every subject, highest target first.
    ///
    /// Returns one allocation per subject, in input order.
    pub fn place_all<R: Rng + ?Sized>(
        &self,
        subjects: &[Subject],
        grid: &mut TimeGrid,
        conflicts: &mut ConflictLog,
        rng: &mut R,
    ) -> Result<Vec<SubjectAllocation>> {
        let mut allocations: Vec<SubjectAllocation> = subjects
            .iter()
            .map(|s| SubjectAllocation {
                name: s.name.clone(),
                weekly_target: s.weekly_target,
                allocated: 0,
            })
            .collect();

        for idx in processing_order(subjects) {
            let subject = &subjects[idx];
            let allocated = self.place_subject(subject, grid, rng)?;
            allocations[idx].allocated = allocated;

            if allocated < subject.weekly_target {
                let conflict =
                    Conflict::subject_shortfall(&subject.name, allocated, subject.weekly_target);
                warn!(subject = %subject.name, allocated, target = subject.weekly_target, "{}", conflict);
                conflicts.push(conflict);
            }
        }

        Ok(allocations)
    }

    /// Runs placement rounds for one subject; returns the number placed.
    pub fn place_subject<R: Rng + ?Sized>(
        &self,
        subject: &Subject,
        grid: &mut TimeGrid,
        rng: &mut R,
    ) -> Result<u32> {
        let target = subject.weekly_target;
        let limit = round_limit(target);
        let occurrence = Occurrence::theory(&subject.name);
        let mut allocated = 0u32;
        let mut rounds = 0u32;

        while allocated < target {
            if rounds == limit {
                warn!(subject = %subject.name, rounds, allocated, target, "round limit reached");
                break;
            }
            rounds += 1;

            let need = target - allocated;
            let mut placed = 0;
            if need >= PAIR_LEN as u32 {
                placed = self.place_pair(&occurrence, grid, rng)?;
            }
            if placed == 0 {
                placed = self.place_single(&occurrence, grid, rng)?;
            }
            if placed == 0 {
                debug!(subject = %subject.name, allocated, target, "no cell available");
                break;
            }
            allocated += placed;
        }

        Ok(allocated)
    }

    /// Adjacent pair on a day the subject does not yet use.
    fn place_pair<R: Rng + ?Sized>(
        &self,
        occurrence: &Occurrence,
        grid: &mut TimeGrid,
        rng: &mut R,
    ) -> Result<u32> {
        for day in shuffled_days(rng) {
            // A pair on a day that already has one would exceed the daily cap
            if grid.count_matching_on_day(day, occurrence) > 0 {
                continue;
            }
            if let Some(block) = grid.find_contiguous_free_block(day, PAIR_LEN) {
                grid.place(day, &block, occurrence)?;
                debug!(subject = %occurrence.label, %day, slots = ?block, "pair placed");
                return Ok(PAIR_LEN as u32);
            }
        }
        Ok(0)
    }

    /// Earliest free slot on a day still under the daily cap.
    fn place_single<R: Rng + ?Sized>(
        &self,
        occurrence: &Occurrence,
        grid: &mut TimeGrid,
        rng: &mut R,
    ) -> Result<u32> {
        for day in shuffled_days(rng) {
            if grid.count_matching_on_day(day, occurrence) >= MAX_DAILY_CLASSES {
                continue;
            }
            if let Some(block) = grid.find_contiguous_free_block(day, 1) {
                grid.place(day, &block, occurrence)?;
                debug!(subject = %occurrence.label, %day, slot = %block[0], "single placed");
                return Ok(1);
            }
        }
        Ok(0)
    }
}

/// Subject indices by weekly target, descending; ties keep input order.
fn processing_order(subjects: &[Subject]) -> Vec<usize> {
    let mut order: Vec<usize> = (0..subjects.len()).collect();
    // sort_by is stable
    order.sort_by(|&a, &b| subjects[b].weekly_target.cmp(&subjects[a].weekly_target));
    order
}
