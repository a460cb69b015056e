//! Grid reservations applied before any demand is placed.
//!
//! # Algorithm
//!
//! 1. **Lunch**: if a lunch slot is configured, it is reserved on every day.
//! 2. **Fixed classes**: each entry is written to its cell, in input order.
//!    An entry whose cell is already held (by lunch or an earlier fixed
//!    class) is dropped and recorded as a conflict.
//!
//! Labs and theory classes then see these cells as occupied. Fixed classes
//! do not count toward any subject's weekly target.

use tracing::{debug, warn};

use crate::error::Result;
use crate::models::{Conflict, ConflictLog, Day, FixedClass, Occurrence, TimeGrid};

/// Places the lunch reservation and fixed classes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ReservationPlacer;

impl ReservationPlacer {
    /// Creates a reservation placer.
    pub fn new() -> Self {
        Self
    }

    /// Reserves `slot` on every day. Returns the number of cells reserved.
    ///
    /// # Errors
    /// `UnknownSlot` if the label is not a grid column; `CellOccupied` if
    /// the grid is not empty at that slot.
    pub fn place_lunch(&self, slot: &str, grid: &mut TimeGrid) -> Result<usize> {
        let lunch = Occurrence::lunch();
        for day in Day::ALL {
            grid.place(day, &[slot], &lunch)?;
        }
        debug!(slot, "lunch reserved");
        Ok(Day::COUNT)
    }

    /// Writes each fixed class into its cell, recording a conflict for
    /// every entry whose cell is taken. Returns the number placed.
    ///
    /// # Errors
    /// `UnknownSlot` if an entry names a slot that is not a grid column.
    pub fn place_fixed(
        &self,
        fixed: &[FixedClass],
        grid: &mut TimeGrid,
        conflicts: &mut ConflictLog,
    ) -> Result<usize> {
        let mut placed = 0;
        for entry in fixed {
            if let Some(occupant) = grid.get(entry.day, &entry.slot) {
                let conflict = Conflict::fixed_class_clash(
                    entry.subject.trim(),
                    entry.day,
                    entry.slot.trim(),
                    occupant.label.as_str(),
                );
                warn!(subject = %entry.subject, day = %entry.day, slot = %entry.slot, "{}", conflict);
                conflicts.push(conflict);
                continue;
            }
            grid.place(entry.day, &[entry.slot.as_str()], &Occurrence::fixed(&entry.subject))?;
            debug!(subject = %entry.subject, day = %entry.day, slot = %entry.slot, "fixed class placed");
            placed += 1;
        }
        Ok(placed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TimetableError;
    use crate::models::{ConflictKind, OccurrenceKind, TimeSlot};

    fn grid() -> TimeGrid {
        TimeGrid::new(
            ["09:00-10:00", "10:00-11:00", "12:00-13:00", "13:00-14:00"]
                .iter()
                .map(|l| TimeSlot::parse(l).unwrap())
                .collect(),
        )
    }

    #[test]
    fn test_lunch_reserved_every_day() {
        let mut g = grid();
        let n = ReservationPlacer::new().place_lunch("12:00-13:00", &mut g).unwrap();
        assert_eq!(n, 5);
        for day in Day::ALL {
            let cell = g.get(day, "12:00-13:00").unwrap();
            assert_eq!(cell.kind, OccurrenceKind::Lunch);
            assert_eq!(cell.label, "Lunch Break");
        }
        assert_eq!(g.filled_cells(), 5);
    }

    #[test]
    fn test_lunch_unknown_slot() {
        let mut g = grid();
        let err = ReservationPlacer::new().place_lunch("11:00-12:00", &mut g).unwrap_err();
        assert_eq!(err, TimetableError::UnknownSlot("11:00-12:00".into()));
        assert_eq!(g.filled_cells(), 0);
    }

    #[test]
    fn test_fixed_classes_placed_in_order() {
        let mut g = grid();
        let mut log = ConflictLog::new();
        let fixed = vec![
            FixedClass::new("Seminar", Day::Monday, "09:00-10:00"),
            FixedClass::new("Assembly", Day::Friday, " 13:00-14:00"),
        ];
        let n = ReservationPlacer::new().place_fixed(&fixed, &mut g, &mut log).unwrap();
        assert_eq!(n, 2);
        assert!(log.is_empty());
        assert_eq!(g.get(Day::Monday, "09:00-10:00"), Some(&Occurrence::fixed("Seminar")));
        assert_eq!(g.get(Day::Friday, "13:00-14:00").unwrap().kind, OccurrenceKind::Fixed);
    }

    #[test]
    fn test_fixed_class_clashes_become_conflicts() {
        let mut g = grid();
        let mut log = ConflictLog::new();
        let placer = ReservationPlacer::new();
        placer.place_lunch("12:00-13:00", &mut g).unwrap();

        let fixed = vec![
            FixedClass::new("Seminar", Day::Tuesday, "12:00-13:00"),
            FixedClass::new("Club", Day::Monday, "10:00-11:00"),
            FixedClass::new("Choir", Day::Monday, "10:00-11:00"),
        ];
        let n = placer.place_fixed(&fixed, &mut g, &mut log).unwrap();
        assert_eq!(n, 1);
        assert_eq!(
            log.messages(),
            vec![
                "Could not place fixed class Seminar on Tuesday 12:00-13:00: taken by Lunch Break",
                "Could not place fixed class Choir on Monday 10:00-11:00: taken by Club",
            ]
        );
        assert!(matches!(log.entries()[1].kind, ConflictKind::FixedClassClash { .. }));
        // First entry wins the contested cell
        assert_eq!(g.get(Day::Monday, "10:00-11:00").unwrap().label, "Club");
    }
}
