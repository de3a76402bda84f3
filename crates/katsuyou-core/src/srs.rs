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

//! Streak-driven scheduling.
//!
//! There is no ease factor: the streak indexes a fixed interval table and
//! that is the whole model. Existing schedules depend on the table, so it
//! must not change.

use chrono::Duration;
use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;
use crate::error::fail;
use crate::types::timestamp::Timestamp;

/// How well the learner recalled the answer.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Feedback {
    Again,
    Hard,
    Good,
    Easy,
}

impl Feedback {
    pub fn as_str(&self) -> &'static str {
        match self {
            Feedback::Again => "again",
            Feedback::Hard => "hard",
            Feedback::Good => "good",
            Feedback::Easy => "easy",
        }
    }

    /// Good and easy count as a successful recall.
    pub fn is_success(&self) -> bool {
        matches!(self, Feedback::Good | Feedback::Easy)
    }
}

impl TryFrom<&str> for Feedback {
    type Error = ErrorReport;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.trim().to_lowercase().as_str() {
            "again" | "forgot" => Ok(Feedback::Again),
            "hard" => Ok(Feedback::Hard),
            "good" => Ok(Feedback::Good),
            "easy" => Ok(Feedback::Easy),
            _ => fail(format!("invalid feedback string: '{value}'")),
        }
    }
}

/// Minutes until the next review. Index 0 is only reached by `again`;
/// every other answer starts one slot further along, so a first `good`
/// lands on the one-day entry. The last entry covers every longer streak.
const INTERVAL_MINUTES: [i64; 7] = [
    0,
    10,
    24 * 60,
    3 * 24 * 60,
    7 * 24 * 60,
    14 * 24 * 60,
    30 * 24 * 60,
];

/// Position in the interval table for a review that produced `streak`.
pub fn interval_index(streak: u32, feedback: Feedback) -> usize {
    let last = INTERVAL_MINUTES.len() - 1;
    match feedback {
        Feedback::Again => 0,
        _ => (streak as usize).saturating_add(1).min(last),
    }
}

pub fn interval(streak: u32, feedback: Feedback) -> Duration {
    Duration::minutes(INTERVAL_MINUTES[interval_index(streak, feedback)])
}

pub fn next_streak(streak: u32, feedback: Feedback) -> u32 {
    match feedback {
        Feedback::Again => 0,
        Feedback::Hard => streak.saturating_sub(1),
        Feedback::Good => streak.saturating_add(1),
        Feedback::Easy => streak.saturating_add(2),
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct SrsState {
    pub streak: u32,
    pub due_at: Timestamp,
}

pub fn next_state(streak: u32, feedback: Feedback, now: Timestamp) -> SrsState {
    let streak = next_streak(streak, feedback);
    SrsState {
        streak,
        due_at: now + interval(streak, feedback),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Fallible;
    use crate::types::timestamp::ts;

    fn now() -> Timestamp {
        ts("2024-03-01T08:00:00.000")
    }

    #[test]
    fn test_good_from_zero() {
        let state = next_state(0, Feedback::Good, now());
        assert_eq!(state.streak, 1);
        assert_eq!(state.due_at.since(now()), Duration::days(1));
    }

    #[test]
    fn test_good_from_one_is_three_days() {
        let state = next_state(1, Feedback::Good, now());
        assert_eq!(state.streak, 2);
        assert_eq!(state.due_at.since(now()), Duration::days(3));
    }

    #[test]
    fn test_again_resets() {
        let state = next_state(2, Feedback::Again, now());
        assert_eq!(state.streak, 0);
        assert_eq!(state.due_at, now());
    }

    #[test]
    fn test_easy_clamps_to_last_interval() {
        let state = next_state(5, Feedback::Easy, now());
        assert_eq!(state.streak, 7);
        assert_eq!(state.due_at.since(now()), Duration::days(30));
    }

    #[test]
    fn test_hard_never_goes_negative() {
        let state = next_state(0, Feedback::Hard, now());
        assert_eq!(state.streak, 0);
        assert_eq!(state.due_at.since(now()), Duration::minutes(10));
        assert_eq!(next_state(3, Feedback::Hard, now()).streak, 2);
    }

    #[test]
    fn test_table_is_strictly_increasing() {
        for pair in INTERVAL_MINUTES.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        assert_eq!(interval(5, Feedback::Good), interval(100, Feedback::Good));
        assert_eq!(interval(u32::MAX, Feedback::Easy), Duration::days(30));
        assert_eq!(interval(9, Feedback::Again), Duration::zero());
    }

    #[test]
    fn test_feedback_round_trip() -> Fallible<()> {
        for feedback in [Feedback::Again, Feedback::Hard, Feedback::Good, Feedback::Easy] {
            assert_eq!(Feedback::try_from(feedback.as_str())?, feedback);
        }
        assert!(Feedback::try_from("").is_err());
        assert!(Feedback::try_from("perfect").is_err());
        Ok(())
    }

    #[test]
    fn test_feedback_serialization_format() -> Fallible<()> {
        assert_eq!(serde_json::to_string(&Feedback::Again)?, "\"again\"");
        assert_eq!(serde_json::to_string(&Feedback::Easy)?, "\"easy\"");
        Ok(())
    }
}
