// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Services module - business logic layer.

pub mod progress;
pub mod stats;
pub mod unlock;

pub use progress::{ProgressService, RecordOutcome};
pub use stats::compute_stats;
pub use unlock::evaluate_unlock;
