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

use serde::Serialize;

use crate::fsrs::Difficulty;
use crate::fsrs::Grade;
use crate::fsrs::Stability;
use crate::fsrs::initial_difficulty;
use crate::types::timestamp::Timestamp;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CardState {
    /// Never attempted.
    New,
    /// Working through the learning steps.
    Learning,
    /// Graduated; scheduled by the FSRS interval.
    Review,
    /// Forgotten during review; working through the relearning steps.
    Relearning,
}

impl CardState {
    /// Rank used to break ties between cards due at the same instant. Lower
    /// ranks come first.
    pub fn priority(self) -> u8 {
        match self {
            CardState::Review => 0,
            CardState::Learning => 1,
            CardState::Relearning => 2,
            CardState::New => 3,
        }
    }
}

/// A card's memory state, derived from its attempt history.
#[derive(Clone, PartialEq, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardMemoryState {
    pub state: CardState,
    /// The card's stability (an FSRS parameter).
    pub stability: Stability,
    /// The card's difficulty (an FSRS parameter).
    pub difficulty: Difficulty,
    /// When the card next becomes eligible.
    pub due: Timestamp,
    /// The number of times the card has been attempted.
    pub review_count: u32,
    /// The timestamp of the most recent attempt.
    pub last_review: Option<Timestamp>,
    /// Index into the learning or relearning steps, while in those states.
    pub step: Option<usize>,
}

impl CardMemoryState {
    /// The state of a card that has never been attempted. Due immediately.
    pub fn new_card() -> Self {
        Self {
            state: CardState::New,
            stability: 0.0,
            difficulty: initial_difficulty(Grade::Good),
            due: Timestamp::EPOCH,
            review_count: 0,
            last_review: None,
            step: None,
        }
    }

    pub fn is_new(&self) -> bool {
        self.state == CardState::New
    }

    pub fn is_due(&self, now: Timestamp) -> bool {
        self.due <= now
    }
}
