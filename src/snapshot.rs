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

use std::fs::read_to_string;
use std::path::Path;
use std::time::Instant;

use serde::Deserialize;

use crate::error::Fallible;
use crate::error::fail;
use crate::types::attempt::GradedAttempt;
use crate::types::study_card::CardDefinition;

/// A learner's cards and attempt log, as exported by the calling layer.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub cards: Vec<CardDefinition>,
    #[serde(default)]
    pub attempts: Vec<GradedAttempt>,
}

impl Snapshot {
    pub fn load(path: &Path) -> Fallible<Self> {
        if !path.exists() {
            return fail("input file does not exist.");
        }
        log::debug!("Loading snapshot...");
        let start = Instant::now();
        let content = read_to_string(path)?;
        let snapshot: Snapshot = serde_json::from_str(&content)?;
        let duration = start.elapsed().as_millis();
        log::debug!(
            "Loaded {} cards and {} attempts in {duration}ms.",
            snapshot.cards.len(),
            snapshot.attempts.len()
        );
        Ok(snapshot)
    }
}
