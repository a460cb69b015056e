//! Lab placement.
//!
//! # Algorithm
//!
//! Labs are placed before any theory class, in registration order:
//! 1. **Preferred block**: if the lab names a known start slot and the block
//!    `[start, start + duration)` fits in the day, try that fixed block on
//!    each day in a shuffled order. First free day wins.
//! 2. **First fit**: otherwise, shuffle the days again and take the first
//!    day offering any `duration` consecutive free slots (lowest start).
//! 3. If both fail, record `Could not schedule lab: <name>`.
//!
//! Each lab is placed at most once per week.

use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::shuffled_days;
use crate::error::Result;
use crate::models::{Conflict, ConflictLog, Day, Lab, Occurrence, TimeGrid};

/// Where a lab landed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabPlacement {
    /// Day of the session.
    pub day: Day,
    /// Occupied slot labels, in column order.
    pub slots: Vec<String>,
    /// Whether the preferred start slot was honoured.
    pub used_preferred_slot: bool,
}

/// Per-run outcome for one lab.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabAllocation {
    /// Lab name.
    pub name: String,
    /// Requested duration in slots.
    pub duration_slots: usize,
    /// `None` if the lab could not be placed.
    pub placement: Option<LabPlacement>,
}

impl LabAllocation {
    /// Whether the weekly session was placed.
    #[inline]
    pub fn is_allocated(&self) -> bool {
        self.placement.is_some()
    }
}

/// Places each lab's single weekly session.
#[derive(Debug, Clone, Copy, Default)]
pub struct LabPlacer;

impl LabPlacer {
    /// Creates a lab placer.
    pub fn new() -> Self {
        Self
    }

    /// Places every lab, in order, recording a conflict for each failure.
    ///
    /// Returns one allocation per lab, in input order.
    pub fn place_all<R: Rng + ?Sized>(
        &self,
        labs: &[Lab],
        grid: &mut TimeGrid,
        conflicts: &mut ConflictLog,
        rng: &mut R,
    ) -> Result<Vec<LabAllocation>> {
        let mut allocations = Vec::with_capacity(labs.len());

        for lab in labs {
            let placement = self.place(lab, grid, rng)?;

            match &placement {
                Some(p) => debug!(
                    lab = %lab.name,
                    day = %p.day,
                    slots = ?p.slots,
                    preferred = p.used_preferred_slot,
                    "lab placed"
                ),
                None => {
                    let conflict = Conflict::unplaced_lab(&lab.name);
                    warn!(lab = %lab.name, duration = lab.duration_slots, "{}", conflict);
                    conflicts.push(conflict);
                }
            }

            allocations.push(LabAllocation {
                name: lab.name.clone(),
                duration_slots: lab.duration_slots,
                placement,
            });
        }

        Ok(allocations)
    }

    /// Places a single lab: preferred block first, then first fit.
    pub fn place<R: Rng + ?Sized>(
        &self,
        lab: &Lab,
        grid: &mut TimeGrid,
        rng: &mut R,
    ) -> Result<Option<LabPlacement>> {
        if let Some(placement) = self.place_preferred(lab, grid, rng)? {
            return Ok(Some(placement));
        }
        self.place_first_fit(lab, grid, rng)
    }

    fn place_preferred<R: Rng + ?Sized>(
        &self,
        lab: &Lab,
        grid: &mut TimeGrid,
        rng: &mut R,
    ) -> Result<Option<LabPlacement>> {
        let Some(preferred) = lab.preferred_slot.as_deref() else {
            return Ok(None);
        };
        let Some(start) = grid.slot_index(preferred) else {
            warn!(lab = %lab.name, slot = preferred, "preferred slot is not a grid slot; ignoring");
            return Ok(None);
        };
        // Block must fit inside the day
        let Some(block) = grid.block_labels(start, lab.duration_slots) else {
            debug!(lab = %lab.name, slot = preferred, "preferred block runs past the end of the day");
            return Ok(None);
        };

        let occurrence = Occurrence::lab(&lab.name);
        for day in shuffled_days(rng) {
            if grid.is_block_free(day, start, lab.duration_slots) {
                grid.place(day, &block, &occurrence)?;
                return Ok(Some(LabPlacement {
                    day,
                    slots: block,
                    used_preferred_slot: true,
                }));
            }
        }
        Ok(None)
    }

    fn place_first_fit<R: Rng + ?Sized>(
        &self,
        lab: &Lab,
        grid: &mut TimeGrid,
        rng: &mut R,
    ) -> Result<Option<LabPlacement>> {
        let occurrence = Occurrence::lab(&lab.name);
        for day in shuffled_days(rng) {
            if let Some(block) = grid.find_contiguous_free_block(day, lab.duration_slots) {
                grid.place(day, &block, &occurrence)?;
                return Ok(Some(LabPlacement {
                    day,
                    slots: block,
                    used_preferred_slot: false,
                }));
            }
        }
        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{OccurrenceKind, TimeSlot};
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn grid(labels: &[&str]) -> TimeGrid {
        TimeGrid::new(labels.iter().map(|l| TimeSlot::parse(l).unwrap()).collect())
    }

    fn two_slot_grid() -> TimeGrid {
        grid(&["09:00-10:00", "10:00-11:00"])
    }

    fn lab_cells(g: &TimeGrid, name: &str) -> usize {
        g.cells_for(&crate::models::lab_label(name)).len()
    }

    #[test]
    fn test_preferred_slot_exact_fit() {
        let mut g = two_slot_grid();
        let mut log = ConflictLog::new();
        let mut rng = ChaCha8Rng::seed_from_u64(42);
        let labs = vec![Lab::new("Physics Lab", 2).with_preferred_slot("09:00-10:00")];

        let allocs = LabPlacer::new()
            .place_all(&labs, &mut g, &mut log, &mut rng)
            .unwrap();

        let p = allocs[0].placement.as_ref().unwrap();
        assert!(p.used_preferred_slot);
        assert_eq!(p.slots, vec!["09:00-10:00", "10:00-11:00"]);
        assert_eq!(g.filled_on_day(p.day), 2);
        assert_eq!(g.filled_cells(), 2);
        assert!(log.is_empty());
    }

    #[test]
    fn test_preferred_start_is_honoured_mid_day() {
        let mut g = grid(&["08:00-09:00", "09:00-10:00", "10:00-11:00", "11:00-12:00"]);
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let lab = Lab::new("Chem", 2).with_preferred_slot("10:00-11:00");

        let p = LabPlacer::new().place(&lab, &mut g, &mut rng).unwrap().unwrap();
        assert!(p.used_preferred_slot);
        assert_eq!(p.slots, vec!["10:00-11:00", "11:00-12:00"]);
        assert_eq!(g.get(p.day, "10:00-11:00").unwrap().kind, OccurrenceKind::Lab);
    }

    #[test]
    fn test_padded_preferred_slot_is_honoured() {
        let mut g = grid(&["08:00-09:00", "09:00-10:00", "10:00-11:00", "11:00-12:00"]);
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let lab = Lab::new("Chem", 2).with_preferred_slot(" 10:00-11:00 ");

        let p = LabPlacer::new().place(&lab, &mut g, &mut rng).unwrap().unwrap();
        assert!(p.used_preferred_slot);
        assert_eq!(p.slots, vec!["10:00-11:00", "11:00-12:00"]);
    }

    #[test]
    fn test_lab_block_does_not_span_lunch() {
        let mut g = grid(&["09:00-10:00", "10:00-11:00", "12:00-13:00", "13:00-14:00"]);
        for day in Day::ALL {
            g.place(day, &["10:00-11:00"], &Occurrence::lunch()).unwrap();
        }
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let lab = Lab::new("Bio", 2).with_preferred_slot("09:00-10:00");

        let p = LabPlacer::new().place(&lab, &mut g, &mut rng).unwrap().unwrap();
        assert!(!p.used_preferred_slot);
        assert_eq!(p.slots, vec!["12:00-13:00", "13:00-14:00"]);
    }

    #[test]
    fn test_preferred_block_past_end_of_day_falls_back() {
        let mut g = grid(&["08:00-09:00", "09:00-10:00", "10:00-11:00"]);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let lab = Lab::new("Bio", 2).with_preferred_slot("10:00-11:00");

        let p = LabPlacer::new().place(&lab, &mut g, &mut rng).unwrap().unwrap();
        assert!(!p.used_preferred_slot);
        // First fit on an empty day starts at column 0
        assert_eq!(p.slots, vec!["08:00-09:00", "09:00-10:00"]);
    }

    #[test]
    fn test_unknown_preferred_slot_falls_back() {
        let mut g = two_slot_grid();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let lab = Lab::new("Bio", 1).with_preferred_slot("15:00-16:00");

        let p = LabPlacer::new().place(&lab, &mut g, &mut rng).unwrap().unwrap();
        assert!(!p.used_preferred_slot);
        assert_eq!(p.slots, vec!["09:00-10:00"]);
    }

    #[test]
    fn test_preferred_taken_everywhere_uses_first_fit_then_conflicts() {
        let mut g = two_slot_grid();
        let mut log = ConflictLog::new();
        let mut rng = ChaCha8Rng::seed_from_u64(11);

        // Five morning labs claim the first slot on every day
        let mut labs: Vec<Lab> = (1..=5)
            .map(|i| Lab::new(format!("Morning {i}"), 1).with_preferred_slot("09:00-10:00"))
            .collect();
        labs.push(Lab::new("Late", 1).with_preferred_slot("09:00-10:00"));
        labs.push(Lab::new("Double", 2));

        let allocs = LabPlacer::new()
            .place_all(&labs, &mut g, &mut log, &mut rng)
            .unwrap();

        for alloc in &allocs[..5] {
            assert!(alloc.placement.as_ref().unwrap().used_preferred_slot);
        }
        let late = allocs[5].placement.as_ref().unwrap();
        assert!(!late.used_preferred_slot);
        assert_eq!(late.slots, vec!["10:00-11:00"]);

        // No day has two free slots left
        assert!(!allocs[6].is_allocated());
        assert_eq!(log.messages(), vec!["Could not schedule lab: Double"]);
        assert_eq!(lab_cells(&g, "Double"), 0);
    }

    #[test]
    fn test_every_lab_placed_at_most_once_and_contiguously() {
        let labels = ["08:00-09:00", "09:00-10:00", "10:00-11:00", "11:00-12:00", "13:00-14:00"];
        for seed in 0..20 {
            let mut g = grid(&labels);
            let mut log = ConflictLog::new();
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let labs = vec![
                Lab::new("A", 3).with_preferred_slot("09:00-10:00"),
                Lab::new("B", 2),
                Lab::new("C", 5),
                Lab::new("D", 1).with_preferred_slot("13:00-14:00"),
            ];

            let allocs = LabPlacer::new()
                .place_all(&labs, &mut g, &mut log, &mut rng)
                .unwrap();

            for (lab, alloc) in labs.iter().zip(&allocs) {
                let cells = g.cells_for(&crate::models::lab_label(&lab.name));
                match &alloc.placement {
                    Some(p) => {
                        assert_eq!(cells.len(), lab.duration_slots);
                        assert!(cells.iter().all(|(d, _)| *d == p.day));
                        let start = g.slot_index(&p.slots[0]).unwrap();
                        for (offset, label) in p.slots.iter().enumerate() {
                            assert_eq!(g.slot_index(label), Some(start + offset));
                        }
                    }
                    None => assert!(cells.is_empty()),
                }
            }
            let unplaced = allocs.iter().filter(|a| !a.is_allocated()).count();
            assert_eq!(unplaced, log.len());
        }
    }

    #[test]
    fn test_same_seed_same_placement() {
        let labs = vec![Lab::new("A", 2), Lab::new("B", 1).with_preferred_slot("10:00-11:00")];
        let run = |seed| {
            let mut g = two_slot_grid();
            let mut log = ConflictLog::new();
            let mut rng = ChaCha8Rng::seed_from_u64(seed);
            let allocs = LabPlacer::new()
                .place_all(&labs, &mut g, &mut log, &mut rng)
                .unwrap();
            (g, allocs)
        };
        assert_eq!(run(99), run(99));
    }
}
