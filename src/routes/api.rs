// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Training log routes for authenticated users.

use crate::error::{AppError, Result};
use crate::middleware::auth::AuthUser;
use crate::models::reward::{self, CatalogEntry};
use crate::models::{ExerciseTotals, NewEvent, TrainingEvent};
use crate::time_utils::{format_utc_rfc3339, offset_from_minutes, ReferenceDay};
use crate::AppState;
use axum::{
    extract::{Query, State},
    routing::get,
    Extension, Json, Router,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Training routes (require authentication via JWT).
/// The auth middleware is applied in routes/mod.rs for these routes.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route(
            "/api/training-logs",
            get(get_training_logs).post(create_training_log),
        )
        .route("/api/training-logs/stats", get(get_training_stats))
}

// ─── Training Logs ───────────────────────────────────────────

/// One stored training event.
#[derive(Serialize, Clone, Debug)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TrainingLogResponse {
    pub id: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub user_id: u64,
    pub performed_at: String,
    pub exercise_name: String,
    pub count: Option<u32>,
    pub duration: Option<u32>,
    pub created_at: String,
}

impl From<TrainingEvent> for TrainingLogResponse {
    fn from(event: TrainingEvent) -> Self {
        Self {
            id: event.id,
            user_id: event.user_id,
            performed_at: format_utc_rfc3339(event.performed_at),
            exercise_name: event.exercise_name,
            count: event.count,
            duration: event.duration,
            created_at: format_utc_rfc3339(event.created_at),
        }
    }
}

/// Response for a newly logged event.
#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CreateTrainingLogResponse {
    #[serde(flatten)]
    pub log: TrainingLogResponse,
    /// Reward granted by this event, if any
    pub unlocked_reward: Option<CatalogEntry>,
}

/// Log one exercise and evaluate reward unlocks.
async fn create_training_log(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Json(body): Json<NewEvent>,
) -> Result<Json<CreateTrainingLogResponse>> {
    tracing::debug!(
        user_id = user.user_id,
        exercise = %body.exercise_name,
        "Recording training event"
    );

    let outcome = state
        .progress
        .record_event_and_evaluate(user.user_id, body, chrono::Utc::now())
        .await?;

    Ok(Json(CreateTrainingLogResponse {
        log: outcome.event.into(),
        unlocked_reward: outcome.unlocked.and_then(reward::lookup).copied(),
    }))
}

#[derive(Deserialize)]
struct TrainingLogsQuery {
    /// Pagination: page number (1-indexed)
    #[serde(default = "default_page")]
    page: u32,
    /// Pagination: items per page
    #[serde(default = "default_per_page")]
    per_page: u32,
}

fn default_page() -> u32 {
    1
}
fn default_per_page() -> u32 {
    50
}

const MAX_PER_PAGE: u32 = 100;

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TrainingLogsResponse {
    pub logs: Vec<TrainingLogResponse>,
    pub page: u32,
    pub per_page: u32,
    pub total: u32,
}

/// Get the user's training history, newest first.
async fn get_training_logs(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<TrainingLogsQuery>,
) -> Result<Json<TrainingLogsResponse>> {
    if params.page < 1 {
        return Err(AppError::BadRequest(
            "Page must be greater than 0".to_string(),
        ));
    }
    let limit = params.per_page.clamp(1, MAX_PER_PAGE);

    let events = state.progress.history(user.user_id).await?;
    let total = events.len() as u32;

    // Use checked multiplication to prevent overflow
    let start = (params.page as usize - 1)
        .checked_mul(limit as usize)
        .ok_or_else(|| AppError::BadRequest("Page number causes overflow".to_string()))?;

    let logs: Vec<TrainingLogResponse> = events
        .into_iter()
        .skip(start)
        .take(limit as usize)
        .map(TrainingLogResponse::from)
        .collect();

    Ok(Json(TrainingLogsResponse {
        logs,
        page: params.page,
        per_page: limit,
        total,
    }))
}

// ─── Training Stats ──────────────────────────────────────────

#[derive(Deserialize)]
struct StatsQuery {
    /// Overrides the configured reference timezone (minutes east of UTC)
    utc_offset_minutes: Option<i32>,
}

/// Totals for one exercise.
#[derive(Serialize, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct ExerciseStats {
    pub exercise_name: String,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub total_count: u64,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub total_duration: u64,
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct TrainingStatsResponse {
    pub streak_days: u32,
    /// Only exercises logged today appear here
    pub today_stats: Vec<ExerciseStats>,
    pub total_stats: Vec<ExerciseStats>,
    #[cfg_attr(feature = "binding-generation", ts(type = "number"))]
    pub grand_total: u64,
}

fn to_exercise_stats(totals: BTreeMap<String, ExerciseTotals>) -> Vec<ExerciseStats> {
    totals
        .into_iter()
        .map(|(exercise_name, t)| ExerciseStats {
            exercise_name,
            total_count: t.total_count,
            total_duration: t.total_duration,
        })
        .collect()
}

/// Get lifetime totals, today's totals and the current streak.
async fn get_training_stats(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
    Query(params): Query<StatsQuery>,
) -> Result<Json<TrainingStatsResponse>> {
    let offset = match params.utc_offset_minutes {
        Some(minutes) => offset_from_minutes(minutes).ok_or_else(|| {
            AppError::BadRequest(
                "Invalid 'utc_offset_minutes': must be between -720 and 840".to_string(),
            )
        })?,
        None => state.config.reference_offset(),
    };
    let day = ReferenceDay::at(chrono::Utc::now(), offset);

    tracing::debug!(user_id = user.user_id, today = %day.today, "Fetching training stats");

    let stats = state.progress.get_stats(user.user_id, day).await?;
    let grand_total = stats.progress().grand_total;

    Ok(Json(TrainingStatsResponse {
        streak_days: stats.streak_days,
        today_stats: to_exercise_stats(stats.today),
        total_stats: to_exercise_stats(stats.lifetime),
        grand_total,
    }))
}
