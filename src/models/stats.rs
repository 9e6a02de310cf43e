//! Derived training aggregates.
//!
//! Nothing here is stored: every value is recomputed from the event log.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::models::TrainingEvent;

/// Summed count and duration for one exercise.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ExerciseTotals {
    pub total_count: u64,
    pub total_duration: u64,
}

impl ExerciseTotals {
    /// Fold one event in, treating missing amounts as zero.
    pub fn add(&mut self, event: &TrainingEvent) {
        self.total_count += event.count_or_zero();
        self.total_duration += event.duration_or_zero();
    }

    /// Progress units contributed to the grand total.
    pub fn units(&self) -> u64 {
        self.total_count + self.total_duration
    }
}

/// Per-exercise totals keyed by exercise name.
pub type ExerciseTotalsMap = BTreeMap<String, ExerciseTotals>;

/// Snapshot returned by the stats aggregator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrainingStats {
    /// Lifetime totals per exercise
    pub lifetime: ExerciseTotalsMap,
    /// Totals restricted to the reference day; absent exercises have no entry
    pub today: ExerciseTotalsMap,
    /// Consecutive active days ending today or yesterday
    pub streak_days: u32,
}

impl TrainingStats {
    pub fn progress(&self) -> ProgressTotals {
        ProgressTotals::from_lifetime(self.lifetime.clone())
    }
}

/// The values reward rules compare before and after an event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProgressTotals {
    /// Σ (count + duration) over every exercise
    pub grand_total: u64,
    pub exercises: ExerciseTotalsMap,
}

impl ProgressTotals {
    pub fn from_lifetime(exercises: ExerciseTotalsMap) -> Self {
        let grand_total = exercises.values().map(ExerciseTotals::units).sum();
        Self {
            grand_total,
            exercises,
        }
    }

    /// Totals for one exercise, zero if it was never logged.
    pub fn exercise(&self, name: &str) -> ExerciseTotals {
        self.exercises.get(name).copied().unwrap_or_default()
    }

    /// The totals after appending `event`.
    pub fn with_event(&self, event: &TrainingEvent) -> Self {
        let mut next = self.clone();
        next.exercises
            .entry(event.exercise_name.clone())
            .or_default()
            .add(event);
        next.grand_total += event.count_or_zero() + event.duration_or_zero();
        next
    }
}
