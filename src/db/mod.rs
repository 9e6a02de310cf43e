//! Storage layer: collaborator traits plus Firestore and in-memory backends.

pub mod firestore;
pub mod memory;

pub use firestore::FirestoreDb;
pub use memory::MemoryStore;

use async_trait::async_trait;
use std::collections::HashSet;

use crate::error::AppError;
use crate::models::{OwnedReward, RewardId, TrainingEvent};

/// Collection names as constants.
pub mod collections {
    pub const TRAINING_LOGS: &str = "training_logs";
    /// Owned rewards, one document per (user, reward)
    pub const USER_REWARDS: &str = "user_rewards";
}

/// Append-only log of training events.
#[async_trait]
pub trait EventLog: Send + Sync {
    async fn append_event(&self, event: &TrainingEvent) -> Result<TrainingEvent, AppError>;

    /// Every event for the user, in no particular order.
    async fn events_for_user(&self, user_id: u64) -> Result<Vec<TrainingEvent>, AppError>;
}

/// Append-only record of rewards each user owns.
#[async_trait]
pub trait RewardStore: Send + Sync {
    async fn owned_rewards(&self, user_id: u64) -> Result<Vec<OwnedReward>, AppError>;

    async fn owned_reward_ids(&self, user_id: u64) -> Result<HashSet<RewardId>, AppError> {
        Ok(self
            .owned_rewards(user_id)
            .await?
            .into_iter()
            .map(|r| r.reward_id)
            .collect())
    }

    async fn insert_reward(&self, reward: &OwnedReward) -> Result<OwnedReward, AppError>;
}

/// Both stores, plus a write that lands an event and its unlock together.
#[async_trait]
pub trait ProgressStore: EventLog + RewardStore {
    /// Persist `event` and, if present, `reward` as one atomic write.
    async fn commit_event(
        &self,
        event: &TrainingEvent,
        reward: Option<&OwnedReward>,
    ) -> Result<(), AppError>;
}
