// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Stats aggregation over a user's event history.
//!
//! Everything here is a pure function of the events passed in, so the same
//! snapshot always yields the same totals and streak.

use chrono::NaiveDate;
use std::collections::BTreeSet;

use crate::models::stats::ExerciseTotalsMap;
use crate::models::{TrainingEvent, TrainingStats};
use crate::time_utils::ReferenceDay;

/// Lifetime totals per exercise.
pub fn lifetime_totals(events: &[TrainingEvent]) -> ExerciseTotalsMap {
    totals_where(events, |_| true)
}

/// Lifetime totals, today's totals and the current streak.
pub fn compute_stats(events: &[TrainingEvent], day: &ReferenceDay) -> TrainingStats {
    let active_days = events.iter().map(|e| day.local_date(e.performed_at));

    TrainingStats {
        lifetime: lifetime_totals(events),
        today: totals_where(events, |e| day.is_today(e.performed_at)),
        streak_days: streak_days(active_days, day.today),
    }
}

fn totals_where<F>(events: &[TrainingEvent], keep: F) -> ExerciseTotalsMap
where
    F: Fn(&TrainingEvent) -> bool,
{
    let mut totals = ExerciseTotalsMap::new();
    for event in events.iter().filter(|e| keep(e)) {
        totals
            .entry(event.exercise_name.clone())
            .or_default()
            .add(event);
    }
    totals
}

/// Length of the run of consecutive active days ending at the most recent
/// one, or 0 if that day is neither `today` nor yesterday.
///
/// Duplicate dates count once.
pub fn streak_days<I>(active_days: I, today: NaiveDate) -> u32
where
    I: IntoIterator<Item = NaiveDate>,
{
    let distinct: BTreeSet<NaiveDate> = active_days.into_iter().collect();
    let mut newest_first = distinct.into_iter().rev();

    let Some(latest) = newest_first.next() else {
        return 0;
    };
    if latest != today && Some(latest) != today.pred_opt() {
        return 0;
    }

    let mut streak = 1;
    let mut cursor = latest;
    for day in newest_first {
        if Some(day) != cursor.pred_opt() {
            break;
        }
        streak += 1;
        cursor = day;
    }
    streak
}
