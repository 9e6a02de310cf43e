// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! In-memory store for local development and tests.
//!
//! Each user's events and rewards live under one map entry, so a commit
//! holds a single shard lock for both writes.

use async_trait::async_trait;
use dashmap::DashMap;
use std::sync::Arc;

use crate::db::{EventLog, ProgressStore, RewardStore};
use crate::error::AppError;
use crate::models::{OwnedReward, TrainingEvent};

#[derive(Debug, Default)]
struct UserLedger {
    events: Vec<TrainingEvent>,
    rewards: Vec<OwnedReward>,
}

impl UserLedger {
    fn push_reward(&mut self, reward: &OwnedReward) {
        // Same document ID overwrites, matching Firestore
        self.rewards.retain(|r| r.reward_id != reward.reward_id);
        self.rewards.push(reward.clone());
    }
}

/// Process-local store. Clones share the same data.
#[derive(Clone, Default)]
pub struct MemoryStore {
    users: Arc<DashMap<u64, UserLedger>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EventLog for MemoryStore {
    async fn append_event(&self, event: &TrainingEvent) -> Result<TrainingEvent, AppError> {
        self.users
            .entry(event.user_id)
            .or_default()
            .events
            .push(event.clone());
        Ok(event.clone())
    }

    async fn events_for_user(&self, user_id: u64) -> Result<Vec<TrainingEvent>, AppError> {
        Ok(self
            .users
            .get(&user_id)
            .map(|ledger| ledger.events.clone())
            .unwrap_or_default())
    }
}

#[async_trait]
impl RewardStore for MemoryStore {
    async fn owned_rewards(&self, user_id: u64) -> Result<Vec<OwnedReward>, AppError> {
        Ok(self
            .users
            .get(&user_id)
            .map(|ledger| ledger.rewards.clone())
            .unwrap_or_default())
    }

    async fn insert_reward(&self, reward: &OwnedReward) -> Result<OwnedReward, AppError> {
        self.users
            .entry(reward.user_id)
            .or_default()
            .push_reward(reward);
        Ok(reward.clone())
    }
}

#[async_trait]
impl ProgressStore for MemoryStore {
    async fn commit_event(
        &self,
        event: &TrainingEvent,
        reward: Option<&OwnedReward>,
    ) -> Result<(), AppError> {
        let mut ledger = self.users.entry(event.user_id).or_default();
        ledger.events.push(event.clone());
        if let Some(reward) = reward {
            ledger.push_reward(reward);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn make_event(user_id: u64, count: u32) -> TrainingEvent {
        TrainingEvent {
            id: uuid::Uuid::new_v4().to_string(),
            user_id,
            performed_at: Utc::now(),
            exercise_name: "squat".to_string(),
            count: Some(count),
            duration: None,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn test_users_are_isolated() {
        let store = MemoryStore::new();
        store.append_event(&make_event(1, 10)).await.unwrap();
        store.append_event(&make_event(2, 20)).await.unwrap();

        let events = store.events_for_user(1).await.unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].count, Some(10));
        assert!(store.events_for_user(3).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_commit_writes_event_and_reward() {
        let store = MemoryStore::new();
        let event = make_event(5, 30);
        let reward = OwnedReward::grant(5, 3, Utc::now());

        store.commit_event(&event, Some(&reward)).await.unwrap();

        assert_eq!(store.events_for_user(5).await.unwrap(), vec![event]);
        let ids = store.owned_reward_ids(5).await.unwrap();
        assert!(ids.contains(&3));
    }

    #[tokio::test]
    async fn test_reinserting_reward_keeps_one_record() {
        let store = MemoryStore::new();
        let reward = OwnedReward::grant(9, 301, Utc::now());

        store.insert_reward(&reward).await.unwrap();
        store.insert_reward(&reward).await.unwrap();

        assert_eq!(store.owned_rewards(9).await.unwrap().len(), 1);
    }
}
