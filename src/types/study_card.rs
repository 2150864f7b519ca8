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

use serde::Deserialize;
use serde::Serialize;
use serde_json::Value;

use crate::types::card_id::CardId;
use crate::types::exercise_type::ExerciseType;
use crate::types::memory_state::CardMemoryState;

/// A card as supplied by the content layer, before scheduling.
#[derive(Clone, PartialEq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardDefinition {
    pub id: CardId,
    /// The exercise type tag, checked when the card is scheduled.
    pub exercise_type: String,
    /// Line text, audio URIs, and so on. Passed through untouched.
    #[serde(default)]
    pub content: Value,
}

/// A card with its memory state attached.
#[derive(Clone, PartialEq, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudyCard {
    pub id: CardId,
    pub exercise_type: ExerciseType,
    pub memory: CardMemoryState,
    pub content: Value,
}

impl StudyCard {
    pub fn new(
        definition: CardDefinition,
        exercise_type: ExerciseType,
        memory: CardMemoryState,
    ) -> Self {
        let CardDefinition { id, content, .. } = definition;
        Self {
            id,
            exercise_type,
            memory,
            content,
        }
    }
}
