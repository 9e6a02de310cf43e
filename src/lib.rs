// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@kernel.org>

//! Training Tracker: exercise logging with streaks and collectible rewards
//!
//! This crate provides the backend API for recording exercise events,
//! deriving per-exercise totals and day streaks from the history, and
//! unlocking rewards when cumulative totals cross thresholds.

pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod time_utils;

use config::Config;
use services::ProgressService;

/// Shared application state.
pub struct AppState {
    pub config: Config,
    pub progress: ProgressService,
}
