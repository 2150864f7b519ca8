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

use serde::Deserialize;
use serde::Serialize;

/// A stable card identifier. Derived from content and position, never from a
/// storage row id, so that attempt history survives re-indexing.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(String);

impl CardId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derive an identifier from a content source (e.g. a track id) and the
    /// card's position within it.
    pub fn derive(source: &str, index: usize) -> Self {
        let mut hasher = Hasher::new();
        hasher.update(source.as_bytes());
        hasher.update(&[0]);
        hasher.update(&(index as u64).to_le_bytes());
        hasher.finalize()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// A short prefix for log lines.
    pub fn short(&self) -> &str {
        match self.0.char_indices().nth(8) {
            Some((end, _)) => &self.0[..end],
            None => &self.0,
        }
    }
}

impl Display for CardId {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

struct Hasher {
    inner: blake3::Hasher,
}

impl Hasher {
    fn new() -> Self {
        Self {
            inner: blake3::Hasher::new(),
        }
    }

    fn update(&mut self, data: &[u8]) {
        self.inner.update(data);
    }

    fn finalize(self) -> CardId {
        CardId(self.inner.finalize().to_hex().to_string())
    }
}
