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

use serde::Serialize;

use crate::error::ValidationError;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize)]
#[serde(into = "&'static str")]
pub enum ExerciseType {
    /// Sing or speak a karaoke line back.
    SayItBack,
    /// Pick the translation of a line.
    TranslationMultipleChoice,
    /// Answer a question about the song or artist.
    TriviaMultipleChoice,
}

impl ExerciseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExerciseType::SayItBack => "SAY_IT_BACK",
            ExerciseType::TranslationMultipleChoice => "TRANSLATION_MULTIPLE_CHOICE",
            ExerciseType::TriviaMultipleChoice => "TRIVIA_MULTIPLE_CHOICE",
        }
    }
}

impl TryFrom<&str> for ExerciseType {
    type Error = ValidationError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value {
            "SAY_IT_BACK" => Ok(ExerciseType::SayItBack),
            "TRANSLATION_MULTIPLE_CHOICE" => Ok(ExerciseType::TranslationMultipleChoice),
            "TRIVIA_MULTIPLE_CHOICE" => Ok(ExerciseType::TriviaMultipleChoice),
            _ => Err(ValidationError::UnknownExerciseType(value.to_string())),
        }
    }
}

impl From<ExerciseType> for &'static str {
    fn from(value: ExerciseType) -> Self {
        value.as_str()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse() {
        assert_eq!(
            ExerciseType::try_from("SAY_IT_BACK"),
            Ok(ExerciseType::SayItBack)
        );
        assert_eq!(
            ExerciseType::try_from("karaoke"),
            Err(ValidationError::UnknownExerciseType("karaoke".to_string()))
        );
    }

    #[test]
    fn test_serializes_as_tag() {
        for ty in [
            ExerciseType::SayItBack,
            ExerciseType::TranslationMultipleChoice,
            ExerciseType::TriviaMultipleChoice,
        ] {
            let json = serde_json::to_string(&ty).unwrap();
            assert_eq!(json, format!("\"{}\"", ty.as_str()));
            assert_eq!(ExerciseType::try_from(ty.as_str()), Ok(ty));
        }
    }
}
