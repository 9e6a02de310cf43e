// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Data models for the application.

pub mod event;
pub mod reward;
pub mod stats;

pub use event::{NewEvent, TrainingEvent};
pub use reward::{CatalogEntry, OwnedReward, RewardId, Tier};
pub use stats::{ExerciseTotals, ProgressTotals, TrainingStats};
