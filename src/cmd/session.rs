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
use crate::cmd::resolve_now;
use crate::error::Fallible;
use crate::plan::SessionPlan;
use crate::plan::plan_session;
use crate::snapshot::Snapshot;

pub fn print_session(input: &Path, now: Option<i64>, config: Option<&Path>) -> Fallible<()> {
    let plan = load_plan(input, now, config)?;
    let json = serde_json::to_string_pretty(&plan)?;
    println!("{json}");
    Ok(())
}

pub(crate) fn load_plan(
    input: &Path,
    now: Option<i64>,
    config: Option<&Path>,
) -> Fallible<SessionPlan> {
    let config = load_config(config)?;
    let now = resolve_now(now)?;
    let snapshot = Snapshot::load(input)?;
    plan_session(snapshot.cards, snapshot.attempts, now, &config)
}
