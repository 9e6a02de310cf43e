// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Reward unlock evaluation.
//!
//! Compares progress totals from before and after a single event against a
//! priority-ordered rule table. The first rule whose trigger fired decides
//! the outcome, so one event grants at most one reward.

use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashSet;

use crate::models::event::exercises;
use crate::models::reward::{
    self, RewardId, Tier, SECRET_GRAND_TOTAL, SR_PLANK, SR_PUSHUP, SR_SQUAT, UR_GRAND_TOTAL,
};
use crate::models::ProgressTotals;

/// Which tracked scalar a rule watches, and how.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Grand total reaches `bound` with this event.
    GrandTotalReaches(u64),
    /// Lifetime count of one exercise reaches `bound`.
    CountReaches { exercise: &'static str, bound: u64 },
    /// Lifetime duration of one exercise reaches `bound`.
    DurationReaches { exercise: &'static str, bound: u64 },
    /// Grand total passes into a new multiple of the step.
    GrandTotalEvery(u64),
}

impl Trigger {
    pub fn fired(&self, old: &ProgressTotals, new: &ProgressTotals) -> bool {
        match *self {
            Trigger::GrandTotalReaches(bound) => crosses(old.grand_total, new.grand_total, bound),
            Trigger::CountReaches { exercise, bound } => crosses(
                old.exercise(exercise).total_count,
                new.exercise(exercise).total_count,
                bound,
            ),
            Trigger::DurationReaches { exercise, bound } => crosses(
                old.exercise(exercise).total_duration,
                new.exercise(exercise).total_duration,
                bound,
            ),
            Trigger::GrandTotalEvery(step) => new.grand_total / step > old.grand_total / step,
        }
    }
}

/// How a winning rule picks its reward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Fixed(RewardId),
    /// Uniform draw from the tier's ids the user does not own yet.
    RandomUnowned(Tier),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnlockRule {
    pub tier: Tier,
    pub trigger: Trigger,
    pub selection: Selection,
}

/// Rules in priority order; earlier entries win.
pub static UNLOCK_RULES: [UnlockRule; 7] = [
    UnlockRule {
        tier: Tier::Secret,
        trigger: Trigger::GrandTotalReaches(3000),
        selection: Selection::Fixed(SECRET_GRAND_TOTAL),
    },
    UnlockRule {
        tier: Tier::UltraRare,
        trigger: Trigger::GrandTotalReaches(1000),
        selection: Selection::Fixed(UR_GRAND_TOTAL),
    },
    UnlockRule {
        tier: Tier::SuperRare,
        trigger: Trigger::CountReaches {
            exercise: exercises::PUSHUP,
            bound: 300,
        },
        selection: Selection::Fixed(SR_PUSHUP),
    },
    UnlockRule {
        tier: Tier::SuperRare,
        trigger: Trigger::CountReaches {
            exercise: exercises::SQUAT,
            bound: 300,
        },
        selection: Selection::Fixed(SR_SQUAT),
    },
    UnlockRule {
        tier: Tier::SuperRare,
        trigger: Trigger::DurationReaches {
            exercise: exercises::PLANK,
            bound: 300,
        },
        selection: Selection::Fixed(SR_PLANK),
    },
    UnlockRule {
        tier: Tier::Rare,
        trigger: Trigger::GrandTotalEvery(100),
        selection: Selection::RandomUnowned(Tier::Rare),
    },
    UnlockRule {
        tier: Tier::Normal,
        trigger: Trigger::GrandTotalEvery(30),
        selection: Selection::RandomUnowned(Tier::Normal),
    },
];

/// `old < bound <= new`
fn crosses(old: u64, new: u64, bound: u64) -> bool {
    old < bound && bound <= new
}

/// The highest-priority rule whose trigger fired, if any.
pub fn winning_rule(old: &ProgressTotals, new: &ProgressTotals) -> Option<&'static UnlockRule> {
    UNLOCK_RULES.iter().find(|rule| rule.trigger.fired(old, new))
}

/// Decide which reward, if any, the transition `old -> new` unlocks.
///
/// Returns `None` when no rule fired, when a randomized tier has nothing
/// left to draw, or when the selected id is already owned.
pub fn evaluate_unlock<R>(
    old: &ProgressTotals,
    new: &ProgressTotals,
    owned: &HashSet<RewardId>,
    rng: &mut R,
) -> Option<RewardId>
where
    R: Rng + ?Sized,
{
    let rule = winning_rule(old, new)?;

    let picked = match rule.selection {
        Selection::Fixed(id) => id,
        Selection::RandomUnowned(tier) => {
            let pool: Vec<RewardId> = reward::ids_in_tier(tier)
                .filter(|id| !owned.contains(id))
                .collect();
            *pool.choose(rng)?
        }
    };

    if owned.contains(&picked) {
        return None;
    }
    Some(picked)
}
