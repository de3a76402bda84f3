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
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;
use crate::srs::SrsState;
use crate::types::form::Form;
use crate::types::item::Category;
use crate::types::item::ItemId;
use crate::types::timestamp::Timestamp;

/// How the learner answers. Each mode is tracked separately.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PracticeMode {
    /// The learner types the conjugated form.
    Quiz,
    /// The learner reveals the answer and grades themselves.
    Flashcard,
}

impl PracticeMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            PracticeMode::Quiz => "quiz",
            PracticeMode::Flashcard => "flashcard",
        }
    }
}

impl Display for PracticeMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PracticeMode {
    type Err = ErrorReport;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "quiz" => Ok(PracticeMode::Quiz),
            "flashcard" | "flashcards" | "card" => Ok(PracticeMode::Flashcard),
            _ => Err(ErrorReport::new(format!("invalid practice mode: '{s}'"))),
        }
    }
}

/// The composite key of a review record. The store enforces uniqueness.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct ReviewKey {
    pub user: String,
    pub category: Category,
    pub item_id: ItemId,
    pub form: Form,
    pub mode: PracticeMode,
}

/// Tracking state for one (user, item, form, mode).
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub key: ReviewKey,
    pub attempts: u32,
    /// Never exceeds `attempts`.
    pub correct: u32,
    pub streak: u32,
    /// `None` sorts before every timestamp.
    pub due_at: Option<Timestamp>,
    pub last_reviewed_at: Option<Timestamp>,
}

impl ReviewRecord {
    /// A record created on first presentation: due immediately, no streak.
    pub fn new(key: ReviewKey, now: Timestamp) -> Self {
        Self {
            key,
            attempts: 0,
            correct: 0,
            streak: 0,
            due_at: Some(now),
            last_reviewed_at: None,
        }
    }

    /// Whether the learner has never answered this pair.
    pub fn is_new(&self) -> bool {
        self.attempts == 0
    }

    /// The record after one answered review.
    pub fn reviewed(&self, correct: bool, state: SrsState, now: Timestamp) -> Self {
        Self {
            key: self.key.clone(),
            attempts: self.attempts + 1,
            correct: self.correct + u32::from(correct),
            streak: state.streak,
            due_at: Some(state.due_at),
            last_reviewed_at: Some(now),
        }
    }
}
