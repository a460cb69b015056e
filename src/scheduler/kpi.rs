//! Timetable quality metrics (KPIs).
//!
//! Computes fill and demand indicators from a finished run.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Utilization | filled cells / total cells |
//! | Filled by day | occupied cells per weekday |
//! | Demand coverage | classes placed / classes requested |
//! | Subject fulfilment | fraction of subjects meeting their target |
//! | Total shortfall | sum of missing classes |
//! | Labs placed | labs with a session on the grid |
//! | Reserved cells | fixed-class and lunch cells |

use std::collections::HashMap;

use super::Timetable;
use crate::models::{Day, OccurrenceKind};

/// Timetable performance indicators.
#[derive(Debug, Clone)]
pub struct TimetableKpi {
    /// Days × slots.
    pub total_cells: usize,
    /// Occupied cells.
    pub filled_cells: usize,
    /// Cells holding theory classes.
    pub theory_cells: usize,
    /// Cells holding lab periods.
    pub lab_cells: usize,
    /// Cells held by fixed classes.
    pub fixed_cells: usize,
    /// Cells held by the lunch reservation.
    pub lunch_cells: usize,
    /// Fraction of the grid in use (0.0..1.0).
    pub utilization: f64,
    /// Occupied cells per day.
    pub filled_by_day: HashMap<Day, usize>,
    /// Classes placed over classes requested, across all subjects (0.0..1.0).
    pub demand_coverage: f64,
    /// Fraction of subjects meeting their weekly target (0.0..1.0).
    pub subject_fulfilment_rate: f64,
    /// Classes requested but not placed.
    pub total_shortfall: u64,
    /// Labs with a placed session.
    pub labs_placed: usize,
    /// Labs left off the grid.
    pub labs_unplaced: usize,
}

impl TimetableKpi {
    /// Computes KPIs from a generated timetable.
    pub fn calculate(timetable: &Timetable) -> Self {
        let grid = &timetable.grid;
        let total_cells = grid.total_cells();
        let filled_cells = grid.filled_cells();

        let filled_by_day = Day::ALL
            .into_iter()
            .map(|day| (day, grid.filled_on_day(day)))
            .collect();

        let utilization = if total_cells == 0 {
            0.0
        } else {
            filled_cells as f64 / total_cells as f64
        };

        // Each target fits a u32; their sum need not
        let requested: u64 = timetable
            .subjects
            .iter()
            .map(|s| u64::from(s.weekly_target))
            .sum();
        let placed: u64 = timetable
            .subjects
            .iter()
            .map(|s| u64::from(s.allocated))
            .sum();
        let demand_coverage = if requested == 0 {
            1.0
        } else {
            placed as f64 / requested as f64
        };

        let satisfied = timetable.subjects.iter().filter(|s| s.is_satisfied()).count();
        let subject_fulfilment_rate = if timetable.subjects.is_empty() {
            1.0
        } else {
            satisfied as f64 / timetable.subjects.len() as f64
        };

        let labs_placed = timetable.labs.iter().filter(|l| l.is_allocated()).count();

        Self {
            total_cells,
            filled_cells,
            theory_cells: grid.filled_cells_of(OccurrenceKind::Theory),
            lab_cells: grid.filled_cells_of(OccurrenceKind::Lab),
            fixed_cells: grid.filled_cells_of(OccurrenceKind::Fixed),
            lunch_cells: grid.filled_cells_of(OccurrenceKind::Lunch),
            utilization,
            filled_by_day,
            demand_coverage,
            subject_fulfilment_rate,
            total_shortfall: requested - placed,
            labs_placed,
            labs_unplaced: timetable.labs.len() - labs_placed,
        }
    }

    /// Whether every subject target was met and every lab placed.
    pub fn is_complete(&self) -> bool {
        self.total_shortfall == 0 && self.labs_unplaced == 0
    }

    /// Whether the timetable meets the given coverage and utilization floors.
    pub fn meets_thresholds(&self, min_coverage: f64, min_utilization: f64) -> bool {
        self.demand_coverage >= min_coverage && self.utilization >= min_utilization
    }
}
