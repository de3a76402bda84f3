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

use crate::collection::Collection;
use crate::error::Fallible;
use crate::error::fail;
use crate::srs::Feedback;
use crate::trainer::Response;
use crate::trainer::SubmitOutcome;
use crate::trainer::Submission;
use crate::types::form::Form;
use crate::types::item::Category;
use crate::types::item::ItemId;
use crate::types::record::PracticeMode;
use crate::types::timestamp::Timestamp;
use crate::utils::to_json;

pub struct SubmitConfig {
    pub directory: Option<String>,
    pub user: String,
    pub category: Category,
    pub item: ItemId,
    pub form: Form,
    pub mode: PracticeMode,
    pub answer: Option<String>,
    pub feedback: Option<Feedback>,
    pub json: bool,
}

/// Record one answer and print the outcome.
pub fn submit_answer(config: SubmitConfig) -> Fallible<()> {
    let response = match (config.answer, config.feedback) {
        (Some(answer), None) => Response::Answer(answer),
        (None, Some(feedback)) => Response::Feedback(feedback),
        (Some(_), Some(_)) => return fail("give either an answer or a feedback, not both."),
        (None, None) => return fail("give an answer (quiz) or a feedback (flashcard)."),
    };
    let (mut trainer, _) = Collection::new(config.directory)?.into_trainer();
    let submission = Submission {
        user: config.user,
        category: config.category,
        item_id: config.item,
        form: config.form,
        mode: config.mode,
        response,
    };
    let outcome = trainer.submit_answer(&submission, Timestamp::now())?;
    if config.json {
        println!("{}", to_json(&outcome)?);
    } else {
        print!("{}", render_outcome(&outcome));
    }
    Ok(())
}

pub fn render_outcome(outcome: &SubmitOutcome) -> String {
    let verdict = if outcome.correct { "Correct" } else { "Incorrect" };
    format!(
        "{verdict}: {}\n{}\nStreak {} -> {}, next review {}\n",
        outcome.canonical_answer,
        outcome.explanation,
        outcome.previous_streak,
        outcome.new_streak,
        outcome.due_at
    )
}

/// Parse a feedback grade on the command line.
pub fn parse_feedback(s: &str) -> Fallible<Feedback> {
    Feedback::try_from(s)
}
