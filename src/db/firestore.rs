// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Firestore client wrapper with typed operations.
//!
//! Provides high-level operations for:
//! - Training logs (append-only exercise events)
//! - User rewards (collected rewards, one document per user and reward)

use async_trait::async_trait;

use crate::db::{collections, EventLog, ProgressStore, RewardStore};
use crate::error::AppError;
use crate::models::{OwnedReward, TrainingEvent};

/// Firestore database client.
#[derive(Clone)]
pub struct FirestoreDb {
    client: Option<firestore::FirestoreDb>,
}

impl FirestoreDb {
    /// Create a new Firestore client.
    ///
    /// For local development with emulator, set FIRESTORE_EMULATOR_HOST.
    pub async fn new(project_id: &str) -> Result<Self, AppError> {
        // If the emulator environment variable is set, use unauthenticated connection
        // to avoid local credential warnings and leakage.
        if std::env::var("FIRESTORE_EMULATOR_HOST").is_ok() {
            return Self::create_emulator_client(project_id).await;
        }

        let client = firestore::FirestoreDb::new(project_id)
            .await
            .map_err(|e| AppError::Database(format!("Failed to connect to Firestore: {}", e)))?;

        tracing::info!(project = project_id, "Connected to Firestore");

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a Firestore client for the emulator with unauthenticated access.
    async fn create_emulator_client(project_id: &str) -> Result<Self, AppError> {
        tracing::info!("Using unauthenticated connection for Firestore Emulator");

        let token_source = gcloud_sdk::ExternalJwtFunctionSource::new(|| async {
            Ok(gcloud_sdk::Token {
                token_type: "Bearer".to_string(),
                token: gcloud_sdk::SecretValue::new(
                    "eyJhbGciOiJub25lIn0.eyJ1aWQiOiJ0ZXN0In0."
                        .to_string()
                        .into(),
                ),
                expiry: chrono::Utc::now() + chrono::Duration::hours(1),
            })
        });

        let options = firestore::FirestoreDbOptions::new(project_id.to_string());

        let client = firestore::FirestoreDb::with_options_token_source(
            options,
            gcloud_sdk::GCP_DEFAULT_SCOPES.clone(),
            gcloud_sdk::TokenSourceType::ExternalSource(Box::new(token_source)),
        )
        .await
        .map_err(|e| {
            AppError::Database(format!("Failed to connect to Firestore Emulator: {}", e))
        })?;

        tracing::info!(
            project = project_id,
            "Connected to Firestore (Emulator/Unauthenticated)"
        );

        Ok(Self {
            client: Some(client),
        })
    }

    /// Create a mock Firestore client for testing (offline mode).
    ///
    /// All database operations will return an error if called.
    pub fn new_mock() -> Self {
        Self { client: None }
    }

    /// Helper to get the client or return an error if offline.
    fn get_client(&self) -> Result<&firestore::FirestoreDb, AppError> {
        self.client
            .as_ref()
            .ok_or_else(|| AppError::Database("Database not connected (offline mode)".to_string()))
    }
}

// ─── Training Log Operations ─────────────────────────────────────

#[async_trait]
impl EventLog for FirestoreDb {
    async fn append_event(&self, event: &TrainingEvent) -> Result<TrainingEvent, AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::TRAINING_LOGS)
            .document_id(&event.id)
            .object(event)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(event.clone())
    }

    async fn events_for_user(&self, user_id: u64) -> Result<Vec<TrainingEvent>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::TRAINING_LOGS)
            .filter(|q| q.for_all([q.field("user_id").eq(user_id)]))
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }
}

// ─── Reward Operations ───────────────────────────────────────────

#[async_trait]
impl RewardStore for FirestoreDb {
    async fn owned_rewards(&self, user_id: u64) -> Result<Vec<OwnedReward>, AppError> {
        self.get_client()?
            .fluent()
            .select()
            .from(collections::USER_REWARDS)
            .filter(|q| q.for_all([q.field("user_id").eq(user_id)]))
            .obj()
            .query()
            .await
            .map_err(|e| AppError::Database(e.to_string()))
    }

    async fn insert_reward(&self, reward: &OwnedReward) -> Result<OwnedReward, AppError> {
        let _: () = self
            .get_client()?
            .fluent()
            .update()
            .in_col(collections::USER_REWARDS)
            .document_id(reward.document_id())
            .object(reward)
            .execute()
            .await
            .map_err(|e| AppError::Database(e.to_string()))?;
        Ok(reward.clone())
    }
}

// ─── Atomic Event Commit ─────────────────────────────────────────

#[async_trait]
impl ProgressStore for FirestoreDb {
    /// Write the event and its unlocked reward in a single Firestore transaction.
    ///
    /// Either both documents land or neither does, so a reward is never
    /// granted for an event that was not stored (or the reverse).
    async fn commit_event(
        &self,
        event: &TrainingEvent,
        reward: Option<&OwnedReward>,
    ) -> Result<(), AppError> {
        let client = self.get_client()?;

        let mut transaction = client
            .begin_transaction()
            .await
            .map_err(|e| AppError::Database(format!("Failed to begin transaction: {}", e)))?;

        client
            .fluent()
            .update()
            .in_col(collections::TRAINING_LOGS)
            .document_id(&event.id)
            .object(event)
            .add_to_transaction(&mut transaction)
            .map_err(|e| {
                AppError::Database(format!("Failed to add event to transaction: {}", e))
            })?;

        if let Some(reward) = reward {
            client
                .fluent()
                .update()
                .in_col(collections::USER_REWARDS)
                .document_id(reward.document_id())
                .object(reward)
                .add_to_transaction(&mut transaction)
                .map_err(|e| {
                    AppError::Database(format!("Failed to add reward to transaction: {}", e))
                })?;
        }

        transaction
            .commit()
            .await
            .map_err(|e| AppError::Database(format!("Transaction commit failed: {}", e)))?;

        tracing::debug!(
            user_id = event.user_id,
            event_id = %event.id,
            reward_id = ?reward.map(|r| r.reward_id),
            "Event committed"
        );

        Ok(())
    }
}
