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

use std::error::Error;
use std::fmt::Display;
use std::fmt::Formatter;

use crate::types::card_id::CardId;

/// A user-facing error with a human-readable message.
#[derive(Debug, PartialEq)]
pub struct ErrorReport {
    message: String,
}

impl ErrorReport {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl Display for ErrorReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "error: {}", self.message)
    }
}

impl Error for ErrorReport {}

pub type Fallible<T> = Result<T, ErrorReport>;

pub fn fail<T>(message: impl Into<String>) -> Fallible<T> {
    Err(ErrorReport::new(message))
}

impl From<std::io::Error> for ErrorReport {
    fn from(value: std::io::Error) -> Self {
        ErrorReport::new(format!("I/O error: {value}"))
    }
}

impl From<serde_json::Error> for ErrorReport {
    fn from(value: serde_json::Error) -> Self {
        ErrorReport::new(format!("JSON error: {value}"))
    }
}

impl From<toml::de::Error> for ErrorReport {
    fn from(value: toml::de::Error) -> Self {
        ErrorReport::new(format!("invalid configuration: {value}"))
    }
}

impl From<ValidationError> for ErrorReport {
    fn from(value: ValidationError) -> Self {
        ErrorReport::new(value.to_string())
    }
}

/// Malformed scheduler input. These are reported per card and never abort a
/// whole session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ValidationError {
    /// The rating code is not one of 1 (Again), 2 (Hard), 3 (Good), 4 (Easy).
    UnknownRating(i64),
    /// An attempt is older than the attempt before it.
    OutOfOrder { previous: i64, next: i64 },
    /// An attempt in a card's history belongs to a different card.
    ForeignAttempt { expected: CardId, found: CardId },
    /// A timestamp is negative or outside the supported calendar range.
    TimestampOutOfRange(i64),
    /// The exercise type tag is not recognized.
    UnknownExerciseType(String),
    /// The same card id was defined more than once.
    DuplicateCard(CardId),
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::UnknownRating(code) => {
                write!(f, "unknown rating code: {code}")
            }
            ValidationError::OutOfOrder { previous, next } => {
                write!(
                    f,
                    "attempt at {next} is older than the preceding attempt at {previous}"
                )
            }
            ValidationError::ForeignAttempt { expected, found } => {
                write!(f, "attempt for card {found} found in history of card {expected}")
            }
            ValidationError::TimestampOutOfRange(secs) => {
                write!(f, "timestamp out of range: {secs}")
            }
            ValidationError::UnknownExerciseType(tag) => {
                write!(f, "unknown exercise type: {tag}")
            }
            ValidationError::DuplicateCard(id) => {
                write!(f, "duplicate card definition: {id}")
            }
        }
    }
}

impl Error for ValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_display() {
        let err = ErrorReport::new("input file does not exist.");
        assert_eq!(err.to_string(), "error: input file does not exist.");
    }

    #[test]
    fn test_fail() {
        let result: Fallible<()> = fail("nope");
        assert_eq!(result, Err(ErrorReport::new("nope")));
    }

    #[test]
    fn test_validation_into_report() {
        let err: ErrorReport = ValidationError::UnknownRating(9).into();
        assert_eq!(err.to_string(), "error: unknown rating code: 9");
    }
}
