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

use std::path::PathBuf;

use clap::Parser;

use crate::cmd::check::check_snapshot;
use crate::cmd::session::print_session;
use crate::cmd::stats::print_stats;
use crate::error::Fallible;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Plan a study session and print it as JSON.
    Session {
        /// Path to the JSON snapshot of cards and attempts.
        input: PathBuf,
        /// The current time, in seconds since the Unix epoch. Defaults to now.
        #[arg(long)]
        now: Option<i64>,
        /// Optional path to a TOML scheduler configuration.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Print session statistics as JSON.
    Stats {
        /// Path to the JSON snapshot of cards and attempts.
        input: PathBuf,
        /// The current time, in seconds since the Unix epoch. Defaults to now.
        #[arg(long)]
        now: Option<i64>,
        /// Optional path to a TOML scheduler configuration.
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Check that every card's attempt history can be scheduled.
    Check {
        /// Path to the JSON snapshot of cards and attempts.
        input: PathBuf,
        /// Optional path to a TOML scheduler configuration.
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

pub fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Session { input, now, config } => print_session(&input, now, config.as_deref()),
        Command::Stats { input, now, config } => print_stats(&input, now, config.as_deref()),
        Command::Check { input, config } => check_snapshot(&input, config.as_deref()),
    }
}
