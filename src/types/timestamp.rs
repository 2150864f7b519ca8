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

use std::fmt::Display;
use std::fmt::Formatter;

use chrono::DateTime;
use chrono::Duration;
use chrono::FixedOffset;
use chrono::Utc;
use serde::Serialize;
use serde::Serializer;

use crate::error::ValidationError;

const SECONDS_PER_DAY: i64 = 86_400;

/// A point in time with whole-second precision. Never before the Unix epoch.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    pub const EPOCH: Timestamp = Timestamp(DateTime::<Utc>::UNIX_EPOCH);

    pub fn from_unix(secs: i64) -> Result<Self, ValidationError> {
        if secs < 0 {
            return Err(ValidationError::TimestampOutOfRange(secs));
        }
        DateTime::from_timestamp(secs, 0)
            .map(Timestamp)
            .ok_or(ValidationError::TimestampOutOfRange(secs))
    }

    pub fn now() -> Self {
        let secs = Utc::now().timestamp().max(0);
        Self(DateTime::from_timestamp(secs, 0).unwrap_or(DateTime::<Utc>::UNIX_EPOCH))
    }

    pub fn as_unix(self) -> i64 {
        self.0.timestamp()
    }

    /// The instant the calendar day containing this timestamp began, in the
    /// given reference timezone. Clamped to the epoch.
    pub fn start_of_day(self, offset: FixedOffset) -> Timestamp {
        let offset_secs = offset.local_minus_utc() as i64;
        let local = self.as_unix() + offset_secs;
        let start = local - local.rem_euclid(SECONDS_PER_DAY) - offset_secs;
        Timestamp::from_unix(start).unwrap_or(Timestamp::EPOCH)
    }

    pub fn checked_add_seconds(self, secs: i64) -> Result<Self, ValidationError> {
        let overflow = ValidationError::TimestampOutOfRange(self.as_unix().saturating_add(secs));
        let delta = Duration::try_seconds(secs).ok_or(overflow.clone())?;
        let sum = self.0.checked_add_signed(delta).ok_or(overflow.clone())?;
        if sum < DateTime::<Utc>::UNIX_EPOCH {
            return Err(overflow);
        }
        Ok(Self(sum))
    }

    /// Whole days elapsed since `earlier`, rounded down. Zero if `earlier`
    /// is in the future.
    pub fn days_since(self, earlier: Timestamp) -> i64 {
        (self.0 - earlier.0).num_days().max(0)
    }
}

impl Display for Timestamp {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%dT%H:%M:%SZ"))
    }
}

impl Serialize for Timestamp {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_i64(self.as_unix())
    }
}
