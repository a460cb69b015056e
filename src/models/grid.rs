//! Weekly assignment grid.
//!
//! A `TimeGrid` is the day × slot surface a generation run fills. Every
//! cell holds at most one `Occurrence`; `place` refuses to overwrite.
//!
//! # Layout
//! Rows follow `Day::ALL`, columns follow the slot list in input order.
//! Contiguity is by column position only.

use serde::Serialize;

use super::{Day, Occurrence, OccurrenceKind, TimeSlot};
use crate::error::{Result, TimetableError};

/// The week's occupancy grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimeGrid {
    slots: Vec<TimeSlot>,
    /// `cells[day.index()][slot_index]`
    cells: Vec<Vec<Option<Occurrence>>>,
}

impl TimeGrid {
    /// Creates an empty grid over the given slots.
    pub fn new(slots: Vec<TimeSlot>) -> Self {
        let cells = vec![vec![None; slots.len()]; Day::COUNT];
        Self { slots, cells }
    }

    /// Slots in canonical column order.
    pub fn slots(&self) -> &[TimeSlot] {
        &self.slots
    }

    /// Number of slots per day.
    #[inline]
    pub fn slot_count(&self) -> usize {
        self.slots.len()
    }

    /// Column position of a slot label.
    ///
    /// Surrounding whitespace is ignored, as in `TimeSlot::parse`.
    pub fn slot_index(&self, label: &str) -> Option<usize> {
        let label = label.trim();
        self.slots.iter().position(|s| s.label() == label)
    }

    /// Whether the cell is empty.
    ///
    /// An unknown label is never free.
    pub fn is_free(&self, day: Day, label: &str) -> bool {
        self.slot_index(label)
            .is_some_and(|idx| self.is_free_at(day, idx))
    }

    /// Whether the cell at a column position is empty.
    #[inline]
    pub fn is_free_at(&self, day: Day, index: usize) -> bool {
        matches!(self.cells[day.index()].get(index), Some(None))
    }

    /// Whether `len` columns starting at `start` are all empty on `day`.
    pub fn is_block_free(&self, day: Day, start: usize, len: usize) -> bool {
        match start.checked_add(len) {
            Some(end) if len > 0 && end <= self.slot_count() => {
                (start..end).all(|idx| self.is_free_at(day, idx))
            }
            _ => false,
        }
    }

    /// Labels of `len` consecutive slots starting at column `start`.
    ///
    /// Returns `None` if the block runs past the end of the day.
    pub fn block_labels(&self, start: usize, len: usize) -> Option<Vec<String>> {
        let end = start.checked_add(len)?;
        let block = self.slots.get(start..end)?;
        Some(block.iter().map(|s| s.label().to_string()).collect())
    }

    /// First-fit search for `duration` consecutive free slots on `day`.
    ///
    /// Scans start positions from column 0; the lowest start wins.
    /// Returns the block's labels in column order, or `None` if no window
    /// fits (including `duration == 0` or `duration > slot_count`).
    pub fn find_contiguous_free_block(&self, day: Day, duration: usize) -> Option<Vec<String>> {
        if duration == 0 || duration > self.slot_count() {
            return None;
        }
        (0..=self.slot_count() - duration)
            .find(|&start| self.is_block_free(day, start, duration))
            .and_then(|start| self.block_labels(start, duration))
    }

    /// Number of cells on `day` whose occupant label equals `label`.
    pub fn count_occurrences_on_day(&self, day: Day, label: &str) -> usize {
        self.cells[day.index()]
            .iter()
            .flatten()
            .filter(|o| o.label == label)
            .count()
    }

    /// Number of cells on `day` holding an equal occurrence (label and kind).
    pub fn count_matching_on_day(&self, day: Day, occurrence: &Occurrence) -> usize {
        self.cells[day.index()]
            .iter()
            .flatten()
            .filter(|o| *o == occurrence)
            .count()
    }

    /// Writes `occurrence` into each named cell of `day`.
    ///
    /// Every target must exist and be empty. The check covers all targets
    /// before anything is written, so a refused call leaves the grid as it was.
    ///
    /// # Errors
    /// - `UnknownSlot` if a label is not a grid column.
    /// - `CellOccupied` if a target already holds an occurrence, or is named twice.
    pub fn place<S: AsRef<str>>(&mut self, day: Day, slots: &[S], occurrence: &Occurrence) -> Result<()> {
        let mut targets = Vec::with_capacity(slots.len());
        for label in slots {
            let label = label.as_ref();
            let idx = self
                .slot_index(label)
                .ok_or_else(|| TimetableError::UnknownSlot(label.to_string()))?;

            let occupant = match &self.cells[day.index()][idx] {
                Some(existing) => Some(existing.label.clone()),
                None if targets.contains(&idx) => Some(occurrence.label.clone()),
                None => None,
            };
            if let Some(occupant) = occupant {
                return Err(TimetableError::CellOccupied {
                    day,
                    slot: label.to_string(),
                    occupant,
                });
            }
            targets.push(idx);
        }

        let row = &mut self.cells[day.index()];
        for idx in targets {
            row[idx] = Some(occurrence.clone());
        }
        Ok(())
    }

    /// Occupant of a cell, if any.
    pub fn get(&self, day: Day, label: &str) -> Option<&Occurrence> {
        let idx = self.slot_index(label)?;
        self.cells[day.index()][idx].as_ref()
    }

    /// One day's row in column order.
    pub fn day_row(&self, day: Day) -> impl Iterator<Item = (&TimeSlot, Option<&Occurrence>)> {
        self.slots
            .iter()
            .zip(self.cells[day.index()].iter().map(Option::as_ref))
    }

    /// All occupied cells, row by row.
    pub fn occupied(&self) -> impl Iterator<Item = (Day, &TimeSlot, &Occurrence)> {
        Day::ALL.into_iter().flat_map(move |day| {
            self.day_row(day)
                .filter_map(move |(slot, occ)| occ.map(|o| (day, slot, o)))
        })
    }

    /// Cells whose occupant label equals `label`.
    pub fn cells_for(&self, label: &str) -> Vec<(Day, &TimeSlot)> {
        self.occupied()
            .filter(|(_, _, o)| o.label == label)
            .map(|(day, slot, _)| (day, slot))
            .collect()
    }

    /// Number of occupied cells.
    pub fn filled_cells(&self) -> usize {
        self.occupied().count()
    }

    /// Number of occupied cells of a given kind.
    pub fn filled_cells_of(&self, kind: OccurrenceKind) -> usize {
        self.occupied().filter(|(_, _, o)| o.kind == kind).count()
    }

    /// Number of occupied cells on one day.
    pub fn filled_on_day(&self, day: Day) -> usize {
        self.cells[day.index()].iter().flatten().count()
    }

    /// Total cells (days × slots).
    pub fn total_cells(&self) -> usize {
        Day::COUNT * self.slot_count()
    }
}
