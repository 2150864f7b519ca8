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

use chrono::FixedOffset;
use serde::Deserialize;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;

/// Scheduler settings. Every field may be omitted from the configuration
/// file, in which case the default is used.
#[derive(Clone, PartialEq, Debug, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SchedulerConfig {
    /// The maximum number of cards introduced per calendar day.
    pub daily_new_limit: usize,
    /// The target probability of recall when a review card comes due.
    pub desired_retention: f64,
    /// The maximum review interval in days.
    pub maximum_interval: u32,
    /// Delays between learning steps, in seconds.
    pub learning_steps: Vec<u32>,
    /// Delays between relearning steps, in seconds.
    pub relearning_steps: Vec<u32>,
    /// Offset of the learner's reference timezone from UTC. Days start at
    /// local midnight in this timezone.
    pub utc_offset_minutes: i32,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            daily_new_limit: 15,
            desired_retention: 0.9,
            maximum_interval: 36_500,
            learning_steps: vec![60, 600],
            relearning_steps: vec![600],
            utc_offset_minutes: 0,
        }
    }
}

impl SchedulerConfig {
    pub fn load(path: &Path) -> Fallible<Self> {
        if !path.exists() {
            return fail("configuration file does not exist.");
        }
        let content = read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Fallible<Self> {
        let config: SchedulerConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Fallible<()> {
        if !(self.desired_retention > 0.0 && self.desired_retention < 1.0) {
            return fail("desired_retention must be between 0 and 1.");
        }
        if self.maximum_interval < 1 {
            return fail("maximum_interval must be at least one day.");
        }
        self.offset()?;
        Ok(())
    }

    /// The reference timezone as a chrono offset.
    pub fn offset(&self) -> Fallible<FixedOffset> {
        self.utc_offset_minutes
            .checked_mul(60)
            .and_then(FixedOffset::east_opt)
            .ok_or_else(|| ErrorReport::new("utc_offset_minutes is out of range."))
    }
}
