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

use crate::cmd::session::load_plan;
use crate::error::Fallible;

pub fn print_stats(input: &Path, now: Option<i64>, config: Option<&Path>) -> Fallible<()> {
    let plan = load_plan(input, now, config)?;
    if !plan.failures.is_empty() {
        eprintln!(
            "{} card(s) skipped due to invalid input.",
            plan.failures.len()
        );
    }
    let stats_json = serde_json::to_string_pretty(&plan.session.stats)?;
    println!("{}", stats_json);
    Ok(())
}
