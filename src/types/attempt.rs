// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::collections::BTreeMap;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ValidationError;
use crate::fsrs::Grade;
use crate::types::card_id::CardId;
use crate::types::timestamp::Timestamp;

/// One graded interaction with one card, as recorded by the grading service.
///
/// The time and rating are kept in their wire form and validated when the
/// attempt is folded, so a bad record fails only its own card.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GradedAttempt {
    pub card_id: CardId,
    /// Seconds since the Unix epoch.
    pub graded_at: i64,
    /// The rating code.
    pub rating: i64,
}

impl GradedAttempt {
    pub fn new(card_id: CardId, graded_at: Timestamp, grade: Grade) -> Self {
        Self {
            card_id,
            graded_at: graded_at.as_unix(),
            rating: i64::from(grade.code()),
        }
    }

    pub fn grade(&self) -> Result<Grade, ValidationError> {
        Grade::try_from(self.rating)
    }

    pub fn timestamp(&self) -> Result<Timestamp, ValidationError> {
        Timestamp::from_unix(self.graded_at)
    }
}

/// Attempts grouped by card. Each card's list keeps the order the attempts
/// were supplied in.
#[derive(Default)]
pub struct AttemptLog {
    by_card: BTreeMap<CardId, Vec<GradedAttempt>>,
}

impl AttemptLog {
    pub fn new(attempts: impl IntoIterator<Item = GradedAttempt>) -> Self {
        let mut by_card: BTreeMap<CardId, Vec<GradedAttempt>> = BTreeMap::new();
        for attempt in attempts {
            by_card
                .entry(attempt.card_id.clone())
                .or_default()
                .push(attempt);
        }
        Self { by_card }
    }

    /// The attempts for the given card. Empty if it was never attempted.
    pub fn get(&self, card_id: &CardId) -> &[GradedAttempt] {
        self.by_card
            .get(card_id)
            .map(|v| v.as_slice())
            .unwrap_or(&[])
    }

    /// The earliest valid attempt time for the given card, if any.
    pub fn first_attempt(&self, card_id: &CardId) -> Option<Timestamp> {
        self.get(card_id)
            .iter()
            .filter_map(|a| a.timestamp().ok())
            .min()
    }

    pub fn card_ids(&self) -> impl Iterator<Item = &CardId> {
        self.by_card.keys()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attempt(id: &str, at: i64, rating: i64) -> GradedAttempt {
        GradedAttempt {
            card_id: CardId::new(id),
            graded_at: at,
            rating,
        }
    }

    #[test]
    fn test_grade() {
        assert_eq!(attempt("a", 0, 3).grade(), Ok(Grade::Good));
        assert_eq!(
            attempt("a", 0, 7).grade(),
            Err(ValidationError::UnknownRating(7))
        );
        assert_eq!(
            attempt("a", 0, 256).grade(),
            Err(ValidationError::UnknownRating(256))
        );
        assert_eq!(
            attempt("a", 0, -1).grade(),
            Err(ValidationError::UnknownRating(-1))
        );
    }

    #[test]
    fn test_timestamp() {
        assert_eq!(
            attempt("a", 1000, 3).timestamp(),
            Timestamp::from_unix(1000)
        );
        assert_eq!(
            attempt("a", -5, 3).timestamp(),
            Err(ValidationError::TimestampOutOfRange(-5))
        );
    }

    #[test]
    fn test_log_groups_and_keeps_order() {
        let log = AttemptLog::new(vec![
            attempt("b", 30, 3),
            attempt("a", 20, 1),
            attempt("b", 10, 4),
        ]);
        let b: Vec<i64> = log
            .get(&CardId::new("b"))
            .iter()
            .map(|a| a.graded_at)
            .collect();
        assert_eq!(b, vec![30, 10]);
        assert_eq!(
            log.first_attempt(&CardId::new("b")),
            Some(Timestamp::from_unix(10).unwrap())
        );
        assert!(log.get(&CardId::new("c")).is_empty());
        assert_eq!(log.first_attempt(&CardId::new("c")), None);
        // A negative time is skipped, not treated as the first attempt.
        let log = AttemptLog::new(vec![attempt("d", -1, 3), attempt("d", 50, 3)]);
        assert_eq!(
            log.first_attempt(&CardId::new("d")),
            Some(Timestamp::from_unix(50).unwrap())
        );
        let ids: Vec<&str> = log.card_ids().map(|id| id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
    }

    #[test]
    fn test_deserialize() {
        let json = r#"{"cardId": "line-42", "gradedAt": 1000, "rating": 3}"#;
        let a: GradedAttempt = serde_json::from_str(json).unwrap();
        assert_eq!(a, attempt("line-42", 1000, 3));
        // Out-of-range values still parse; they are rejected per card.
        let json = r#"{"cardId": "x", "gradedAt": -10, "rating": 256}"#;
        let a: GradedAttempt = serde_json::from_str(json).unwrap();
        assert_eq!(a, attempt("x", -10, 256));
    }
}
