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

//! The FSRS-5 memory model. Every due date in the system is a function of
//! these weights, so changing them reschedules every card retroactively.

use serde::Serialize;

use crate::error::ValidationError;

/// Retrievability: the probability of recall, in `[0, 1]`.
pub type R = f64;

/// Stability, in days.
pub type Stability = f64;

/// Difficulty, in `[1, 10]`.
pub type Difficulty = f64;

/// Time, in days.
pub type T = f64;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Grade {
    Again,
    Hard,
    Good,
    Easy,
}

impl Grade {
    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::Again => "again",
            Grade::Hard => "hard",
            Grade::Good => "good",
            Grade::Easy => "easy",
        }
    }

    pub fn code(self) -> u8 {
        match self {
            Grade::Again => 1,
            Grade::Hard => 2,
            Grade::Good => 3,
            Grade::Easy => 4,
        }
    }
}

impl TryFrom<i64> for Grade {
    type Error = ValidationError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            1 => Ok(Grade::Again),
            2 => Ok(Grade::Hard),
            3 => Ok(Grade::Good),
            4 => Ok(Grade::Easy),
            _ => Err(ValidationError::UnknownRating(code)),
        }
    }
}

impl From<Grade> for f64 {
    fn from(g: Grade) -> f64 {
        g.code() as f64
    }
}

/// FSRS-5 default parameters.
const W: [f64; 19] = [
    0.40255, 1.18385, 3.173, 15.69105, 7.1949, 0.5345, 1.4604, 0.0046, 1.54575, 0.1192, 1.01925,
    1.9395, 0.11, 0.29605, 2.2698, 0.2315, 2.9898, 0.51655, 0.6621,
];

/// Forgetting curve exponent.
const DECAY: f64 = -0.5;

/// Chosen so that `R(S, S) = 0.9`.
const FACTOR: f64 = 19.0 / 81.0;

pub const MIN_STABILITY: Stability = 0.001;

const MIN_DIFFICULTY: Difficulty = 1.0;

const MAX_DIFFICULTY: Difficulty = 10.0;

pub fn retrievability(t: T, s: Stability) -> R {
    (1.0 + FACTOR * (t / s)).powf(DECAY)
}

/// The number of days after which retrievability falls to `r_d`.
pub fn interval(r_d: R, s: Stability) -> T {
    (s / FACTOR) * (r_d.powf(1.0 / DECAY) - 1.0)
}

pub fn initial_stability(g: Grade) -> Stability {
    match g {
        Grade::Again => W[0],
        Grade::Hard => W[1],
        Grade::Good => W[2],
        Grade::Easy => W[3],
    }
}

pub fn initial_difficulty(g: Grade) -> Difficulty {
    clamp_d(raw_initial_difficulty(g))
}

fn raw_initial_difficulty(g: Grade) -> Difficulty {
    let g: f64 = g.into();
    W[4] - f64::exp(W[5] * (g - 1.0)) + 1.0
}

/// Stability after a review at least one day after the previous one.
pub fn new_stability(d: Difficulty, s: Stability, r: R, g: Grade) -> Stability {
    let s = if g == Grade::Again {
        s_fail(d, s, r)
    } else {
        s_success(d, s, r, g)
    };
    s.max(MIN_STABILITY)
}

/// Stability after a review on the same day as the previous one.
pub fn short_term_stability(s: Stability, g: Grade) -> Stability {
    let gf: f64 = g.into();
    let next = s * f64::exp(W[17] * (gf - 3.0 + W[18]));
    let next = match g {
        Grade::Good | Grade::Easy => next.max(s),
        Grade::Again | Grade::Hard => next,
    };
    next.max(MIN_STABILITY)
}

fn s_success(d: Difficulty, s: Stability, r: R, g: Grade) -> Stability {
    let t_d = 11.0 - d;
    let t_s = s.powf(-W[9]);
    let t_r = f64::exp(W[10] * (1.0 - r)) - 1.0;
    let h = if g == Grade::Hard { W[15] } else { 1.0 };
    let b = if g == Grade::Easy { W[16] } else { 1.0 };
    let c = f64::exp(W[8]);
    let alpha = 1.0 + t_d * t_s * t_r * h * b * c;
    s * alpha
}

fn s_fail(d: Difficulty, s: Stability, r: R) -> Stability {
    let d_f = d.powf(-W[12]);
    let s_f = (s + 1.0).powf(W[13]) - 1.0;
    let r_f = f64::exp(W[14] * (1.0 - r));
    let long_term = W[11] * d_f * s_f * r_f;
    let short_term = s / f64::exp(W[17] * W[18]);
    long_term.min(short_term)
}

pub fn new_difficulty(d: Difficulty, g: Grade) -> Difficulty {
    clamp_d(W[7] * raw_initial_difficulty(Grade::Easy) + (1.0 - W[7]) * dp(d, g))
}

fn dp(d: Difficulty, g: Grade) -> f64 {
    d + delta_d(g) * ((MAX_DIFFICULTY - d) / 9.0)
}

fn delta_d(g: Grade) -> f64 {
    let g: f64 = g.into();
    -W[6] * (g - 3.0)
}

fn clamp_d(d: Difficulty) -> Difficulty {
    d.clamp(MIN_DIFFICULTY, MAX_DIFFICULTY)
}
