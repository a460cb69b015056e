//! Timetable generation and KPI evaluation.
//!
//! # Algorithm
//!
//! A generation run is a greedy fill of an empty grid:
//! 1. `ReservationPlacer` reserves the lunch slot on every day and pins
//!    fixed classes to their cells.
//! 2. `LabPlacer` claims contiguous blocks for each lab (preferred start
//!    first, then first fit).
//! 3. `TheoryPlacer` fills remaining cells toward each subject's weekly
//!    target, preferring adjacent pairs and capping classes per day.
//!
//! Unmet demand becomes a `Conflict`; it never aborts the run. There is no
//! backtracking, so a feasible timetable may exist that the run misses.
//!
//! # Randomness
//!
//! Day order is shuffled for every placement attempt. The generator is
//! passed in explicitly, so a fixed seed reproduces the grid and conflict
//! log exactly.

mod generator;
mod kpi;
mod lab;
mod reservation;
mod theory;

use rand::seq::SliceRandom;
use rand::Rng;

use crate::models::Day;

pub use generator::{Timetable, TimetableGenerator, TimetableRequest};
pub use kpi::TimetableKpi;
pub use lab::{LabAllocation, LabPlacement, LabPlacer};
pub use reservation::ReservationPlacer;
pub use theory::{round_limit, SubjectAllocation, TheoryPlacer, MAX_DAILY_CLASSES};

/// All days in a fresh random order.
pub(crate) fn shuffled_days<R: Rng + ?Sized>(rng: &mut R) -> [Day; Day::COUNT] {
    let mut days = Day::ALL;
    days.shuffle(rng);
    days
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_shuffled_days_is_permutation() {
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        for _ in 0..10 {
            let mut days = shuffled_days(&mut rng).to_vec();
            days.sort();
            assert_eq!(days, Day::ALL.to_vec());
        }
    }

    #[test]
    fn test_shuffled_days_reproducible() {
        let mut a = ChaCha8Rng::seed_from_u64(7);
        let mut b = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..5 {
            assert_eq!(shuffled_days(&mut a), shuffled_days(&mut b));
        }
    }
}
