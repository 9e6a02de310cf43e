// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Training event model for storage and API.

use crate::error::AppError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

/// Exercise names with reward rules of their own.
pub mod exercises {
    pub const PUSHUP: &str = "pushup";
    pub const SQUAT: &str = "squat";
    pub const PLANK: &str = "plank";
}

/// Upper bound for a single count or duration value.
const MAX_EVENT_AMOUNT: i64 = 100_000;

/// Stored training event. Immutable once written.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainingEvent {
    /// UUID, also used as document ID
    pub id: String,
    /// Owning user
    pub user_id: u64,
    /// When the exercise was performed
    pub performed_at: DateTime<Utc>,
    pub exercise_name: String,
    /// Repetitions, if the exercise is counted
    pub count: Option<u32>,
    /// Seconds, if the exercise is timed
    pub duration: Option<u32>,
    /// When the server recorded the event
    pub created_at: DateTime<Utc>,
}

impl TrainingEvent {
    pub fn count_or_zero(&self) -> u64 {
        self.count.map(u64::from).unwrap_or(0)
    }

    pub fn duration_or_zero(&self) -> u64 {
        self.duration.map(u64::from).unwrap_or(0)
    }
}

/// Request body for logging one exercise.
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct NewEvent {
    /// RFC3339 timestamp
    #[serde(default)]
    pub performed_at: String,
    #[serde(default)]
    #[validate(length(min = 1, max = 64))]
    pub exercise_name: String,
    #[validate(range(min = 0, max = MAX_EVENT_AMOUNT))]
    pub count: Option<i64>,
    #[validate(range(min = 0, max = MAX_EVENT_AMOUNT))]
    pub duration: Option<i64>,
}

impl NewEvent {
    /// Validate the request and build the event to be stored.
    ///
    /// Nothing is written here; a failure leaves the stores untouched.
    pub fn into_event(self, user_id: u64, now: DateTime<Utc>) -> Result<TrainingEvent, AppError> {
        self.validate()?;

        let exercise_name = self.exercise_name.trim();
        if exercise_name.is_empty() {
            return Err(AppError::Validation(
                "exercise_name must not be blank".to_string(),
            ));
        }

        let performed_at = DateTime::parse_from_rfc3339(self.performed_at.trim())
            .map_err(|_| {
                AppError::Validation("performed_at must be an RFC3339 datetime".to_string())
            })?
            .with_timezone(&Utc);

        Ok(TrainingEvent {
            id: uuid::Uuid::new_v4().to_string(),
            user_id,
            performed_at,
            exercise_name: exercise_name.to_string(),
            count: self.count.map(to_amount).transpose()?,
            duration: self.duration.map(to_amount).transpose()?,
            created_at: now,
        })
    }
}

fn to_amount(value: i64) -> Result<u32, AppError> {
    u32::try_from(value)
        .map_err(|_| AppError::Validation(format!("amount out of range: {}", value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_event(name: &str, count: Option<i64>, duration: Option<i64>) -> NewEvent {
        NewEvent {
            performed_at: "2024-01-15T10:00:00+09:00".to_string(),
            exercise_name: name.to_string(),
            count,
            duration,
        }
    }

    #[test]
    fn test_into_event_normalizes_to_utc() {
        let now = Utc::now();
        let event = new_event(exercises::PUSHUP, Some(20), None)
            .into_event(7, now)
            .unwrap();

        assert_eq!(event.user_id, 7);
        assert_eq!(event.exercise_name, "pushup");
        assert_eq!(event.count, Some(20));
        assert_eq!(event.duration, None);
        assert_eq!(event.performed_at.to_rfc3339(), "2024-01-15T01:00:00+00:00");
        assert_eq!(event.created_at, now);
        assert!(uuid::Uuid::parse_str(&event.id).is_ok());
    }

    #[test]
    fn test_negative_amounts_rejected() {
        let err = new_event("squat", Some(-1), None)
            .into_event(1, Utc::now())
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));

        let err = new_event("plank", None, Some(-30))
            .into_event(1, Utc::now())
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_missing_or_blank_name_rejected() {
        let err = new_event("", Some(1), None)
            .into_event(1, Utc::now())
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(ref msg) if msg.contains("exercise_name")));

        let err = new_event("   ", Some(1), None)
            .into_event(1, Utc::now())
            .unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_unparseable_timestamp_rejected() {
        let mut event = new_event("squat", Some(10), None);
        event.performed_at = "yesterday".to_string();
        let err = event.into_event(1, Utc::now()).unwrap_err();
        assert!(matches!(err, AppError::Validation(ref msg) if msg.contains("performed_at")));
    }

    #[test]
    fn test_missing_fields_deserialize_to_invalid_event() {
        let body: NewEvent = serde_json::from_str(r#"{"count": 5}"#).unwrap();
        assert!(body.into_event(1, Utc::now()).is_err());
    }

    #[test]
    fn test_null_amounts_count_as_zero() {
        let event = new_event("walk", None, None)
            .into_event(1, Utc::now())
            .unwrap();
        assert_eq!(event.count_or_zero(), 0);
        assert_eq!(event.duration_or_zero(), 0);
    }
}
