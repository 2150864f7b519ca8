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

//! The whole pipeline for one learner: attempts to states, states to the due
//! set, and the due set to a session. A card with a broken history is
//! reported and left out; it never blocks the rest of the session.

use std::collections::BTreeSet;
use std::fmt::Display;
use std::time::Instant;

use serde::Serialize;
use serde::Serializer;

use crate::config::SchedulerConfig;
use crate::due::select_due;
use crate::error::Fallible;
use crate::error::ValidationError;
use crate::memory::compute_state;
use crate::session::DailyBudget;
use crate::session::Session;
use crate::session::compose;
use crate::types::attempt::AttemptLog;
use crate::types::attempt::GradedAttempt;
use crate::types::card_id::CardId;
use crate::types::exercise_type::ExerciseType;
use crate::types::study_card::CardDefinition;
use crate::types::study_card::StudyCard;
use crate::types::timestamp::Timestamp;

/// A card that could not be scheduled.
#[derive(Clone, PartialEq, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardFailure {
    pub card_id: CardId,
    #[serde(serialize_with = "serialize_display")]
    pub error: ValidationError,
}

/// Every card the learner has, with memory states attached.
pub struct Universe {
    pub cards: Vec<StudyCard>,
    pub failures: Vec<CardFailure>,
}

impl Universe {
    pub fn build(
        definitions: Vec<CardDefinition>,
        log: &AttemptLog,
        config: &SchedulerConfig,
    ) -> Self {
        let mut seen: BTreeSet<CardId> = BTreeSet::new();
        let mut cards = Vec::with_capacity(definitions.len());
        let mut failures = Vec::new();
        for definition in definitions {
            if !seen.insert(definition.id.clone()) {
                log::warn!("Duplicate definition for card {}.", definition.id);
                failures.push(CardFailure {
                    card_id: definition.id.clone(),
                    error: ValidationError::DuplicateCard(definition.id),
                });
                continue;
            }
            let scheduled = ExerciseType::try_from(definition.exercise_type.as_str())
                .and_then(|exercise_type| {
                    let memory = compute_state(&definition.id, log.get(&definition.id), config)?;
                    Ok((exercise_type, memory))
                });
            match scheduled {
                Ok((exercise_type, memory)) => {
                    cards.push(StudyCard::new(definition, exercise_type, memory))
                }
                Err(error) => {
                    log::warn!("Skipping card {}: {error}", definition.id);
                    failures.push(CardFailure {
                        card_id: definition.id,
                        error,
                    });
                }
            }
        }
        Self { cards, failures }
    }
}

#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct SessionPlan {
    #[serde(flatten)]
    pub session: Session,
    /// Cards left out because their history is malformed.
    pub failures: Vec<CardFailure>,
    /// Ids that have attempts but no card definition.
    pub orphans: Vec<CardId>,
}

/// Plan a study session at `now` for a learner's cards and attempt log.
pub fn plan_session(
    definitions: Vec<CardDefinition>,
    attempts: Vec<GradedAttempt>,
    now: Timestamp,
    config: &SchedulerConfig,
) -> Fallible<SessionPlan> {
    let start = Instant::now();
    let log = AttemptLog::new(attempts);

    let known: BTreeSet<CardId> = definitions.iter().map(|d| d.id.clone()).collect();
    let orphans: Vec<CardId> = log
        .card_ids()
        .filter(|id| !known.contains(*id))
        .cloned()
        .collect();
    if !orphans.is_empty() {
        log::debug!("{} attempted card ids have no definition.", orphans.len());
    }

    let budget = DailyBudget::compute(
        known.iter().filter_map(|id| log.first_attempt(id)),
        now,
        config,
    )?;
    let universe = Universe::build(definitions, &log, config);
    let due = select_due(&universe.cards, now);
    let session = compose(&universe.cards, due, budget);

    let duration = start.elapsed().as_millis();
    log::debug!(
        "Planned session over {} cards in {duration}ms.",
        universe.cards.len()
    );
    Ok(SessionPlan {
        session,
        failures: universe.failures,
        orphans,
    })
}

fn serialize_display<T, S>(value: &T, serializer: S) -> Result<S::Ok, S::Error>
where
    T: Display,
    S: Serializer,
{
    serializer.collect_str(value)
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;
    use crate::fsrs::Grade;
    use crate::types::memory_state::CardState;

    const DAY: i64 = 86_400;

    fn ts(secs: i64) -> Timestamp {
        Timestamp::from_unix(secs).unwrap()
    }

    fn def(id: &str, exercise_type: ExerciseType) -> CardDefinition {
        tagged(id, exercise_type.as_str())
    }

    fn tagged(id: &str, tag: &str) -> CardDefinition {
        CardDefinition {
            id: CardId::new(id),
            exercise_type: tag.to_string(),
            content: Value::Null,
        }
    }

    fn attempt(id: &str, at: i64, rating: i64) -> GradedAttempt {
        GradedAttempt {
            card_id: CardId::new(id),
            graded_at: at,
            rating,
        }
    }

    fn ids(cards: &[StudyCard]) -> Vec<&str> {
        cards.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn test_bad_card_is_isolated() -> Fallible<()> {
        let definitions = vec![
            def("good", ExerciseType::SayItBack),
            def("bad", ExerciseType::SayItBack),
            def("fresh", ExerciseType::TranslationMultipleChoice),
        ];
        let attempts = vec![attempt("good", 0, 3), attempt("bad", 0, 9)];
        let plan = plan_session(definitions, attempts, ts(30 * DAY), &SchedulerConfig::default())?;
        assert_eq!(
            plan.failures,
            vec![CardFailure {
                card_id: CardId::new("bad"),
                error: ValidationError::UnknownRating(9),
            }]
        );
        assert_eq!(ids(&plan.session.queue), vec!["good", "fresh"]);
        assert_eq!(plan.session.stats.total, 2);
        Ok(())
    }

    #[test]
    fn test_malformed_records_fail_only_their_card() -> Fallible<()> {
        let definitions = vec![
            def("good", ExerciseType::SayItBack),
            def("big-rating", ExerciseType::SayItBack),
            def("negative-rating", ExerciseType::SayItBack),
            def("negative-time", ExerciseType::SayItBack),
            tagged("dance", "DANCE"),
            def("fresh", ExerciseType::TriviaMultipleChoice),
        ];
        let attempts = vec![
            attempt("good", 0, 3),
            attempt("big-rating", 0, 256),
            attempt("negative-rating", 0, -1),
            attempt("negative-time", -30, 3),
            attempt("dance", 0, 3),
        ];
        let plan = plan_session(definitions, attempts, ts(30 * DAY), &SchedulerConfig::default())?;
        let failures: Vec<(&str, ValidationError)> = plan
            .failures
            .iter()
            .map(|f| (f.card_id.as_str(), f.error.clone()))
            .collect();
        assert_eq!(
            failures,
            vec![
                ("big-rating", ValidationError::UnknownRating(256)),
                ("negative-rating", ValidationError::UnknownRating(-1)),
                ("negative-time", ValidationError::TimestampOutOfRange(-30)),
                (
                    "dance",
                    ValidationError::UnknownExerciseType("DANCE".to_string())
                ),
            ]
        );
        assert_eq!(ids(&plan.session.queue), vec!["good", "fresh"]);
        assert_eq!(plan.session.stats.total, 2);
        Ok(())
    }

    #[test]
    fn test_all_cards_failing_is_an_empty_session() -> Fallible<()> {
        let definitions = vec![def("a", ExerciseType::SayItBack)];
        let attempts = vec![attempt("a", 100, 3), attempt("a", 50, 3)];
        let plan = plan_session(definitions, attempts, ts(DAY), &SchedulerConfig::default())?;
        assert!(plan.session.queue.is_empty());
        assert_eq!(plan.session.stats.total, 0);
        assert_eq!(plan.failures.len(), 1);
        Ok(())
    }

    #[test]
    fn test_duplicate_definition() -> Fallible<()> {
        let definitions = vec![
            def("a", ExerciseType::SayItBack),
            def("a", ExerciseType::TriviaMultipleChoice),
        ];
        let plan = plan_session(definitions, vec![], ts(DAY), &SchedulerConfig::default())?;
        assert_eq!(plan.session.queue.len(), 1);
        assert_eq!(
            plan.session.queue[0].exercise_type,
            ExerciseType::SayItBack
        );
        assert_eq!(
            plan.failures[0].error,
            ValidationError::DuplicateCard(CardId::new("a"))
        );
        Ok(())
    }

    #[test]
    fn test_orphans_are_reported() -> Fallible<()> {
        let definitions = vec![def("a", ExerciseType::SayItBack)];
        let attempts = vec![attempt("ghost", 0, 3)];
        let plan = plan_session(definitions, attempts, ts(DAY), &SchedulerConfig::default())?;
        assert_eq!(plan.orphans, vec![CardId::new("ghost")]);
        assert_eq!(plan.session.stats.new_cards_introduced_today, 0);
        Ok(())
    }

    #[test]
    fn test_budget_includes_cards_not_due() -> Fallible<()> {
        // Two cards started today and are now in learning; only one new card
        // may be added under a limit of three.
        let config = SchedulerConfig {
            daily_new_limit: 3,
            ..SchedulerConfig::default()
        };
        let now = ts(DAY + 100);
        let definitions = vec![
            def("started-1", ExerciseType::SayItBack),
            def("started-2", ExerciseType::SayItBack),
            def("n1", ExerciseType::TranslationMultipleChoice),
            def("n2", ExerciseType::TriviaMultipleChoice),
        ];
        let attempts = vec![attempt("started-1", DAY, 3), attempt("started-2", DAY + 90, 3)];
        let plan = plan_session(definitions, attempts, now, &config)?;
        assert_eq!(plan.session.stats.new_cards_introduced_today, 2);
        assert_eq!(plan.session.stats.new_cards_remaining, 1);
        assert_eq!(ids(&plan.session.queue), vec!["n1"]);
        assert_eq!(plan.session.stats.learning, 2);
        assert_eq!(plan.session.stats.new, 2);
        Ok(())
    }

    #[test]
    fn test_due_review_cards_come_before_new() -> Fallible<()> {
        let definitions = vec![
            def("new", ExerciseType::SayItBack),
            def("old", ExerciseType::SayItBack),
        ];
        let attempts = vec![
            GradedAttempt::new(CardId::new("old"), ts(0), Grade::Easy),
        ];
        let plan = plan_session(definitions, attempts, ts(60 * DAY), &SchedulerConfig::default())?;
        assert_eq!(ids(&plan.session.queue), vec!["old", "new"]);
        assert_eq!(plan.session.queue[0].memory.state, CardState::Review);
        Ok(())
    }

    #[test]
    fn test_plan_serializes() -> Fallible<()> {
        let definitions = vec![def("a", ExerciseType::SayItBack)];
        let attempts = vec![attempt("a", 0, 0)];
        let plan = plan_session(definitions, attempts, ts(DAY), &SchedulerConfig::default())?;
        let json = serde_json::to_value(&plan)?;
        assert!(json.get("queue").is_some());
        assert!(json.get("stats").is_some());
        assert_eq!(json["failures"][0]["cardId"], "a");
        assert_eq!(json["failures"][0]["error"], "unknown rating code: 0");
        Ok(())
    }
}
