// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Reward collection and catalog routes.

use crate::error::Result;
use crate::middleware::auth::AuthUser;
use crate::models::reward::{CatalogEntry, Tier, CATALOG};
use crate::models::OwnedReward;
use crate::time_utils::format_utc_rfc3339;
use crate::AppState;
use axum::{extract::State, routing::get, Extension, Json, Router};
use serde::Serialize;
use std::sync::Arc;
#[cfg(feature = "binding-generation")]
use ts_rs::TS;

/// Catalog listing, no authentication needed.
pub fn public_routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/rewards/catalog", get(get_catalog))
}

/// The caller's own collection (requires authentication).
pub fn routes() -> Router<Arc<AppState>> {
    Router::new().route("/api/rewards", get(get_collection))
}

async fn get_catalog() -> Json<&'static [CatalogEntry]> {
    Json(CATALOG)
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct OwnedRewardResponse {
    pub reward_id: u32,
    pub name: String,
    /// `None` for ids no longer in the catalog
    pub tier: Option<Tier>,
    pub obtained_at: String,
}

impl From<OwnedReward> for OwnedRewardResponse {
    fn from(reward: OwnedReward) -> Self {
        Self {
            tier: reward.tier(),
            reward_id: reward.reward_id,
            name: reward.display_name,
            obtained_at: format_utc_rfc3339(reward.obtained_at),
        }
    }
}

#[derive(Serialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct CollectionResponse {
    pub rewards: Vec<OwnedRewardResponse>,
    pub total_owned: u32,
    pub total_available: u32,
}

/// Get the rewards the user has collected, oldest first.
async fn get_collection(
    State(state): State<Arc<AppState>>,
    Extension(user): Extension<AuthUser>,
) -> Result<Json<CollectionResponse>> {
    let rewards: Vec<OwnedRewardResponse> = state
        .progress
        .collection(user.user_id)
        .await?
        .into_iter()
        .map(OwnedRewardResponse::from)
        .collect();

    tracing::debug!(user_id = user.user_id, owned = rewards.len(), "Fetched collection");

    Ok(Json(CollectionResponse {
        total_owned: rewards.len() as u32,
        total_available: CATALOG.len() as u32,
        rewards,
    }))
}
