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

use crate::types::study_card::StudyCard;
use crate::types::timestamp::Timestamp;

/// Find the cards due at `now`.
///
/// Earlier due dates come first. Cards due at the same instant are ordered
/// review, learning, relearning, new; remaining ties are broken by card id.
pub fn select_due(cards: &[StudyCard], now: Timestamp) -> Vec<StudyCard> {
    let mut due: Vec<StudyCard> = cards
        .iter()
        .filter(|card| card.memory.is_due(now))
        .cloned()
        .collect();
    due.sort_by(|a, b| {
        a.memory
            .due
            .cmp(&b.memory.due)
            .then_with(|| a.memory.state.priority().cmp(&b.memory.state.priority()))
            .then_with(|| a.id.cmp(&b.id))
    });
    due
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::*;
    use crate::types::card_id::CardId;
    use crate::types::exercise_type::ExerciseType;
    use crate::types::memory_state::CardMemoryState;
    use crate::types::memory_state::CardState;

    fn card(id: &str, state: CardState, due: i64) -> StudyCard {
        StudyCard {
            id: CardId::new(id),
            exercise_type: ExerciseType::SayItBack,
            memory: CardMemoryState {
                state,
                due: Timestamp::from_unix(due).unwrap(),
                ..CardMemoryState::new_card()
            },
            content: Value::Null,
        }
    }

    fn ids(cards: &[StudyCard]) -> Vec<&str> {
        cards.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn test_excludes_future_cards() {
        let cards = vec![
            card("past", CardState::Review, 10),
            card("now", CardState::Review, 100),
            card("future", CardState::Review, 101),
        ];
        let now = Timestamp::from_unix(100).unwrap();
        assert_eq!(ids(&select_due(&cards, now)), vec!["past", "now"]);
    }

    #[test]
    fn test_orders_by_due() {
        let cards = vec![
            card("c", CardState::Review, 30),
            card("a", CardState::New, 10),
            card("b", CardState::Learning, 20),
        ];
        let now = Timestamp::from_unix(1000).unwrap();
        assert_eq!(ids(&select_due(&cards, now)), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_ties_broken_by_state() {
        let cards = vec![
            card("n", CardState::New, 50),
            card("rl", CardState::Relearning, 50),
            card("l", CardState::Learning, 50),
            card("r", CardState::Review, 50),
        ];
        let now = Timestamp::from_unix(50).unwrap();
        assert_eq!(ids(&select_due(&cards, now)), vec!["r", "l", "rl", "n"]);
    }

    #[test]
    fn test_input_order_does_not_matter() {
        let mut cards = vec![
            card("x", CardState::Review, 5),
            card("y", CardState::Review, 5),
            card("z", CardState::New, 0),
        ];
        let now = Timestamp::from_unix(5).unwrap();
        let first = select_due(&cards, now);
        cards.reverse();
        let second = select_due(&cards, now);
        assert_eq!(first, second);
    }

    #[test]
    fn test_empty() {
        assert!(select_due(&[], Timestamp::EPOCH).is_empty());
    }
}
