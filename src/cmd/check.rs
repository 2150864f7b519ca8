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

use std::path::Path;

use crate::cmd::load_config;
use crate::error::Fallible;
use crate::error::fail;
use crate::plan::Universe;
use crate::snapshot::Snapshot;
use crate::types::attempt::AttemptLog;

pub fn check_snapshot(input: &Path, config: Option<&Path>) -> Fallible<()> {
    let config = load_config(config)?;
    let snapshot = Snapshot::load(input)?;
    let log = AttemptLog::new(snapshot.attempts);
    let universe = Universe::build(snapshot.cards, &log, &config);
    if !universe.failures.is_empty() {
        let details: Vec<String> = universe
            .failures
            .iter()
            .map(|f| format!("{} ({})", f.card_id, f.error))
            .collect();
        return fail(format!(
            "{} card(s) cannot be scheduled: {}",
            universe.failures.len(),
            details.join(", ")
        ));
    }
    println!("ok");
    Ok(())
}
