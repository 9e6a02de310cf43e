// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Training progress service.
//!
//! Handles the core workflow for a new event:
//! 1. Validate the event (no store access on failure)
//! 2. Acquire the per-user lock
//! 3. Load history and owned rewards, derive "before" and "after" totals
//! 4. Evaluate the reward unlock
//! 5. Commit the event and any reward atomically

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::{Arc, Mutex as StdMutex};
use std::time::Duration;
use tokio::sync::Mutex;

use crate::db::ProgressStore;
use crate::error::{AppError, Result};
use crate::models::reward;
use crate::models::{
    NewEvent, OwnedReward, ProgressTotals, RewardId, TrainingEvent, TrainingStats,
};
use crate::services::stats::{compute_stats, lifetime_totals};
use crate::services::unlock::{evaluate_unlock, winning_rule};
use crate::time_utils::ReferenceDay;

/// Per-user write locks, shared by every clone of the service.
pub type UserLocks = Arc<DashMap<u64, Arc<Mutex<()>>>>;

/// Result of recording one event.
#[derive(Debug, Clone)]
pub struct RecordOutcome {
    pub event: TrainingEvent,
    pub unlocked: Option<RewardId>,
}

/// Records events and derives stats and rewards from the stored history.
#[derive(Clone)]
pub struct ProgressService {
    store: Arc<dyn ProgressStore>,
    locks: UserLocks,
    lock_timeout: Duration,
    rng: Arc<StdMutex<StdRng>>,
}

impl ProgressService {
    pub fn new(store: Arc<dyn ProgressStore>, lock_timeout: Duration) -> Self {
        Self {
            store,
            locks: Arc::new(DashMap::new()),
            lock_timeout,
            rng: Arc::new(StdMutex::new(StdRng::from_entropy())),
        }
    }

    /// Replace the randomness source used for reward draws.
    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = Arc::new(StdMutex::new(rng));
        self
    }

    /// Record one event for `user_id` and grant at most one reward.
    ///
    /// The read-evaluate-write sequence runs under the user's lock, so two
    /// concurrent events for the same user never evaluate against the same
    /// "before" snapshot.
    pub async fn record_event_and_evaluate(
        &self,
        user_id: u64,
        new_event: NewEvent,
        now: DateTime<Utc>,
    ) -> Result<RecordOutcome> {
        let event = new_event.into_event(user_id, now)?;

        let lock = self
            .locks
            .entry(user_id)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();

        let _guard = tokio::time::timeout(self.lock_timeout, lock.lock())
            .await
            .map_err(|_| AppError::ConcurrencyConflict { user_id })?;

        let history = self
            .store
            .events_for_user(user_id)
            .await
            .map_err(|e| e.during("load history"))?;
        let owned = self
            .store
            .owned_reward_ids(user_id)
            .await
            .map_err(|e| e.during("load owned rewards"))?;

        let before = ProgressTotals::from_lifetime(lifetime_totals(&history));
        let after = before.with_event(&event);

        let unlocked = {
            let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
            evaluate_unlock(&before, &after, &owned, &mut *rng)
        };

        let reward = unlocked.map(|id| OwnedReward::grant(user_id, id, now));

        self.store
            .commit_event(&event, reward.as_ref())
            .await
            .map_err(|e| e.during("commit event"))?;

        match unlocked {
            Some(reward_id) => tracing::info!(
                user_id,
                event_id = %event.id,
                reward_id,
                tier = reward::lookup(reward_id).map(|e| e.tier.as_str()),
                grand_total = after.grand_total,
                "Reward unlocked"
            ),
            None => tracing::debug!(
                user_id,
                event_id = %event.id,
                grand_total = after.grand_total,
                rule_fired = winning_rule(&before, &after).is_some(),
                "Event recorded without unlock"
            ),
        }

        Ok(RecordOutcome { event, unlocked })
    }

    /// Lifetime totals, today's totals and streak for `user_id`.
    pub async fn get_stats(&self, user_id: u64, day: ReferenceDay) -> Result<TrainingStats> {
        let history = self
            .store
            .events_for_user(user_id)
            .await
            .map_err(|e| e.during("load history"))?;
        Ok(compute_stats(&history, &day))
    }

    /// All events for `user_id`, newest first.
    pub async fn history(&self, user_id: u64) -> Result<Vec<TrainingEvent>> {
        let mut events = self
            .store
            .events_for_user(user_id)
            .await
            .map_err(|e| e.during("load history"))?;
        events.sort_by(|a, b| {
            b.performed_at
                .cmp(&a.performed_at)
                .then_with(|| b.created_at.cmp(&a.created_at))
        });
        Ok(events)
    }

    /// Rewards owned by `user_id`, oldest first.
    pub async fn collection(&self, user_id: u64) -> Result<Vec<OwnedReward>> {
        let mut rewards = self
            .store
            .owned_rewards(user_id)
            .await
            .map_err(|e| e.during("load owned rewards"))?;
        rewards.sort_by(|a, b| {
            a.obtained_at
                .cmp(&b.obtained_at)
                .then_with(|| a.reward_id.cmp(&b.reward_id))
        });
        Ok(rewards)
    }
}
