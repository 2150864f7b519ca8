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

//! linecards: an FSRS scheduling core for karaoke and quiz study cards.
//!
//! - `memory`: attempt history to memory state
//! - `due`: the ordered set of due cards
//! - `session`: daily new-card budget and onboarding interleaving
//! - `plan`: the whole pipeline with per-card failure isolation

pub mod cli;
mod cmd;
pub mod config;
pub mod due;
pub mod error;
pub mod fsrs;
pub mod memory;
pub mod plan;
pub mod session;
pub mod snapshot;
pub mod types;

pub use config::SchedulerConfig;
pub use due::select_due;
pub use error::ErrorReport;
pub use error::Fallible;
pub use error::ValidationError;
pub use error::fail;
pub use fsrs::Grade;
pub use memory::compute_state;
pub use memory::preview;
pub use memory::retrievability_at;
pub use memory::review;
pub use plan::CardFailure;
pub use plan::SessionPlan;
pub use plan::Universe;
pub use plan::plan_session;
pub use session::DailyBudget;
pub use session::Session;
pub use session::SessionStats;
pub use session::compose;
pub use session::interleave_new;
pub use types::attempt::AttemptLog;
pub use types::attempt::GradedAttempt;
pub use types::card_id::CardId;
pub use types::exercise_type::ExerciseType;
pub use types::memory_state::CardMemoryState;
pub use types::memory_state::CardState;
pub use types::study_card::CardDefinition;
pub use types::study_card::StudyCard;
pub use types::timestamp::Timestamp;
