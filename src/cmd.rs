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

use crate::config::SchedulerConfig;
use crate::error::Fallible;
use crate::types::timestamp::Timestamp;

pub mod check;
pub mod session;
pub mod stats;

fn load_config(path: Option<&Path>) -> Fallible<SchedulerConfig> {
    match path {
        Some(path) => SchedulerConfig::load(path),
        None => Ok(SchedulerConfig::default()),
    }
}

fn resolve_now(now: Option<i64>) -> Fallible<Timestamp> {
    match now {
        Some(secs) => Ok(Timestamp::from_unix(secs)?),
        None => Ok(Timestamp::now()),
    }
}
