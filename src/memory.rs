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

//! Folds a card's attempt history into its memory state.

use serde::Serialize;

use crate::config::SchedulerConfig;
use crate::error::ValidationError;
use crate::fsrs::Grade;
use crate::fsrs::R;
use crate::fsrs::Stability;
use crate::fsrs::initial_difficulty;
use crate::fsrs::initial_stability;
use crate::fsrs::interval;
use crate::fsrs::new_difficulty;
use crate::fsrs::new_stability;
use crate::fsrs::retrievability;
use crate::fsrs::short_term_stability;
use crate::types::attempt::GradedAttempt;
use crate::types::card_id::CardId;
use crate::types::memory_state::CardMemoryState;
use crate::types::memory_state::CardState;
use crate::types::timestamp::Timestamp;

const SECONDS_PER_DAY: i64 = 86_400;

/// The minimum review interval in days.
const MIN_INTERVAL: f64 = 1.0;

/// Compute a card's memory state from its attempts, oldest first.
pub fn compute_state(
    card_id: &CardId,
    attempts: &[GradedAttempt],
    config: &SchedulerConfig,
) -> Result<CardMemoryState, ValidationError> {
    let mut state = CardMemoryState::new_card();
    let mut previous: Option<Timestamp> = None;
    for attempt in attempts {
        if &attempt.card_id != card_id {
            return Err(ValidationError::ForeignAttempt {
                expected: card_id.clone(),
                found: attempt.card_id.clone(),
            });
        }
        let at = attempt.timestamp()?;
        if let Some(previous) = previous {
            if at < previous {
                return Err(ValidationError::OutOfOrder {
                    previous: previous.as_unix(),
                    next: at.as_unix(),
                });
            }
        }
        let grade = attempt.grade()?;
        state = review(&state, grade, at, config)?;
        log::debug!(
            "{} {} S={:.2}d D={:.2}% due={}",
            card_id.short(),
            grade.as_str(),
            state.stability,
            ((state.difficulty - 1.0) / 9.0) * 100.0,
            state.due
        );
        previous = Some(at);
    }
    Ok(state)
}

/// Apply a single graded attempt made at `at` to a memory state.
pub fn review(
    state: &CardMemoryState,
    grade: Grade,
    at: Timestamp,
    config: &SchedulerConfig,
) -> Result<CardMemoryState, ValidationError> {
    let (stability, difficulty) = match (state.state, state.last_review) {
        (CardState::New, _) | (_, None) => (initial_stability(grade), initial_difficulty(grade)),
        (_, Some(last_review)) => {
            let elapsed = at.days_since(last_review);
            let stability = if elapsed < 1 {
                short_term_stability(state.stability, grade)
            } else {
                let retr = retrievability(elapsed as f64, state.stability);
                new_stability(state.difficulty, state.stability, retr, grade)
            };
            (stability, new_difficulty(state.difficulty, grade))
        }
    };

    let (next, step, delay) = match state.state {
        CardState::New => step_through(
            CardState::Learning,
            0,
            &config.learning_steps,
            grade,
            stability,
            config,
        ),
        CardState::Learning => step_through(
            CardState::Learning,
            state.step.unwrap_or(0),
            &config.learning_steps,
            grade,
            stability,
            config,
        ),
        CardState::Relearning => step_through(
            CardState::Relearning,
            state.step.unwrap_or(0),
            &config.relearning_steps,
            grade,
            stability,
            config,
        ),
        CardState::Review => match (grade, config.relearning_steps.first()) {
            (Grade::Again, Some(first)) => (CardState::Relearning, Some(0), *first as i64),
            _ => (CardState::Review, None, review_delay(stability, config)),
        },
    };

    Ok(CardMemoryState {
        state: next,
        stability,
        difficulty,
        due: at.checked_add_seconds(delay)?,
        review_count: state.review_count.saturating_add(1),
        last_review: Some(at),
        step,
    })
}

/// Transition within the learning or relearning steps. Returns the next
/// state, the next step, and the delay until the card is due, in seconds.
fn step_through(
    current: CardState,
    step: usize,
    steps: &[u32],
    grade: Grade,
    stability: Stability,
    config: &SchedulerConfig,
) -> (CardState, Option<usize>, i64) {
    let graduate = (CardState::Review, None, review_delay(stability, config));
    if steps.is_empty() || (step >= steps.len() && grade != Grade::Again) {
        return graduate;
    }
    match grade {
        Grade::Again => (current, Some(0), steps[0] as i64),
        Grade::Hard => {
            let delay = if step == 0 && steps.len() == 1 {
                (steps[0] as f64 * 1.5).round() as i64
            } else if step == 0 {
                (steps[0] as i64 + steps[1] as i64) / 2
            } else {
                steps[step] as i64
            };
            (current, Some(step), delay)
        }
        Grade::Good => {
            if step + 1 == steps.len() {
                graduate
            } else {
                (current, Some(step + 1), steps[step + 1] as i64)
            }
        }
        Grade::Easy => graduate,
    }
}

/// The FSRS interval for a review card, in seconds.
fn review_delay(stability: Stability, config: &SchedulerConfig) -> i64 {
    let days = interval(config.desired_retention, stability)
        .round()
        .clamp(MIN_INTERVAL, config.maximum_interval as f64);
    days as i64 * SECONDS_PER_DAY
}

/// The probability the card is recalled at `now`. New cards count as fully
/// retrievable.
pub fn retrievability_at(state: &CardMemoryState, now: Timestamp) -> R {
    match state.last_review {
        Some(last_review) if state.state != CardState::New && state.stability > 0.0 => {
            retrievability(now.days_since(last_review) as f64, state.stability)
        }
        _ => 1.0,
    }
}

/// The state each grade would produce if the card were graded at `at`.
#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct Preview {
    pub again: CardMemoryState,
    pub hard: CardMemoryState,
    pub good: CardMemoryState,
    pub easy: CardMemoryState,
}

pub fn preview(
    state: &CardMemoryState,
    at: Timestamp,
    config: &SchedulerConfig,
) -> Result<Preview, ValidationError> {
    Ok(Preview {
        again: review(state, Grade::Again, at, config)?,
        hard: review(state, Grade::Hard, at, config)?,
        good: review(state, Grade::Good, at, config)?,
        easy: review(state, Grade::Easy, at, config)?,
    })
}
