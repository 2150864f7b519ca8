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

//! Turns the due set into the queue a learner actually sees: new cards are
//! rationed by a daily budget and interleaved by exercise type.

use std::collections::VecDeque;

use serde::Serialize;

use crate::config::SchedulerConfig;
use crate::error::Fallible;
use crate::types::exercise_type::ExerciseType;
use crate::types::memory_state::CardState;
use crate::types::study_card::StudyCard;
use crate::types::timestamp::Timestamp;

/// How many new cards may still be introduced today.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyBudget {
    pub new_cards_introduced_today: usize,
    pub new_cards_remaining: usize,
}

impl DailyBudget {
    /// Count the cards whose first-ever attempt falls within the current
    /// calendar day, up to `now`, given each card's first attempt time.
    pub fn compute(
        first_attempts: impl IntoIterator<Item = Timestamp>,
        now: Timestamp,
        config: &SchedulerConfig,
    ) -> Fallible<Self> {
        let today = now.start_of_day(config.offset()?);
        let introduced = first_attempts
            .into_iter()
            .filter(|first| today <= *first && *first <= now)
            .count();
        Ok(Self {
            new_cards_introduced_today: introduced,
            new_cards_remaining: config.daily_new_limit.saturating_sub(introduced),
        })
    }
}

/// Summary numbers for a progress header.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStats {
    pub total: usize,
    pub new: usize,
    pub learning: usize,
    pub review: usize,
    pub relearning: usize,
    pub new_cards_introduced_today: usize,
    pub new_cards_remaining: usize,
    pub due_today: usize,
}

#[derive(Clone, PartialEq, Debug, Serialize)]
pub struct Session {
    pub queue: Vec<StudyCard>,
    pub stats: SessionStats,
}

/// Build the session queue from the ordered due set.
///
/// Non-new cards are never rationed and come first, in due order. New cards
/// are interleaved by exercise type and then truncated to the budget.
/// `universe` is every card known for the learner, due or not, and is only
/// used for the state counts.
pub fn compose(universe: &[StudyCard], due: Vec<StudyCard>, budget: DailyBudget) -> Session {
    let (new, mut queue): (Vec<StudyCard>, Vec<StudyCard>) =
        due.into_iter().partition(|card| card.memory.is_new());
    let new_due = new.len();
    let admitted = new_due.min(budget.new_cards_remaining);
    queue.extend(interleave_new(new).into_iter().take(admitted));
    log::debug!(
        "Composed session: {} cards, {admitted} of {new_due} new cards admitted.",
        queue.len()
    );

    let mut stats = SessionStats {
        total: universe.len(),
        new_cards_introduced_today: budget.new_cards_introduced_today,
        new_cards_remaining: budget.new_cards_remaining,
        due_today: queue.len(),
        ..SessionStats::default()
    };
    for card in universe {
        match card.memory.state {
            CardState::New => stats.new += 1,
            CardState::Learning => stats.learning += 1,
            CardState::Review => stats.review += 1,
            CardState::Relearning => stats.relearning += 1,
        }
    }
    Session { queue, stats }
}

/// Slot in the repeating onboarding pattern.
#[derive(Clone, Copy)]
enum Slot {
    Translation,
    Trivia,
    SayItBack,
}

/// One of each kind to open the session.
const INTRO: [Slot; 3] = [Slot::Translation, Slot::Trivia, Slot::SayItBack];

/// Recognition most often, a knowledge check now and then, production least.
const PATTERN: [Slot; 6] = [
    Slot::Translation,
    Slot::Translation,
    Slot::Trivia,
    Slot::Translation,
    Slot::Translation,
    Slot::SayItBack,
];

/// Order new cards so a new learner meets easier exercise types more often.
///
/// Each exercise type keeps its own relative order.
pub fn interleave_new(cards: Vec<StudyCard>) -> Vec<StudyCard> {
    if cards.len() <= 1 {
        return cards;
    }
    let total = cards.len();
    let mut translation: VecDeque<StudyCard> = VecDeque::new();
    let mut trivia: VecDeque<StudyCard> = VecDeque::new();
    let mut say_it_back: VecDeque<StudyCard> = VecDeque::new();
    for card in cards {
        match card.exercise_type {
            ExerciseType::TranslationMultipleChoice => translation.push_back(card),
            ExerciseType::TriviaMultipleChoice => trivia.push_back(card),
            ExerciseType::SayItBack => say_it_back.push_back(card),
        }
    }

    let mut out = Vec::with_capacity(total);
    let mut take = |slot: Slot, out: &mut Vec<StudyCard>| {
        let bucket = match slot {
            Slot::Translation => &mut translation,
            Slot::Trivia => &mut trivia,
            Slot::SayItBack => &mut say_it_back,
        };
        if let Some(card) = bucket.pop_front() {
            out.push(card);
        }
    };
    for slot in INTRO {
        take(slot, &mut out);
    }
    // Every pass over the pattern visits all three buckets, so each pass
    // consumes at least one card until all are empty.
    while out.len() < total {
        for slot in PATTERN {
            take(slot, &mut out);
        }
    }
    out
}
