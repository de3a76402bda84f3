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

//! The two operations a front end calls: ask for a question, then submit
//! the learner's response to it.

use serde::Deserialize;
use serde::Serialize;

use crate::conjugation::conjugate_item;
use crate::conjugation::explain;
use crate::error::ErrorKind;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::rng::TinyRng;
use crate::selector::NextQuestion;
use crate::selector::QuestionRequest;
use crate::selector::select_next;
use crate::srs::Feedback;
use crate::srs::next_state;
use crate::store::Catalog;
use crate::store::ReviewStore;
use crate::types::form::Form;
use crate::types::item::Category;
use crate::types::item::ItemId;
use crate::types::record::PracticeMode;
use crate::types::record::ReviewKey;
use crate::types::record::ReviewRecord;
use crate::types::timestamp::Timestamp;
use crate::validator::validate;

/// What the learner sent back.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Response {
    /// A typed answer, for quizzes.
    Answer(String),
    /// Self-graded recall, for flashcards.
    Feedback(Feedback),
}

#[derive(Clone, Debug, PartialEq)]
pub struct Submission {
    pub user: String,
    pub category: Category,
    pub item_id: ItemId,
    pub form: Form,
    pub mode: PracticeMode,
    pub response: Response,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SubmitOutcome {
    pub correct: bool,
    pub canonical_answer: String,
    pub explanation: String,
    pub previous_streak: u32,
    pub new_streak: u32,
    pub due_at: Timestamp,
}

pub struct Trainer<C: Catalog, S: ReviewStore> {
    catalog: C,
    store: S,
}

impl<C: Catalog, S: ReviewStore> Trainer<C, S> {
    pub fn new(catalog: C, store: S) -> Self {
        Self { catalog, store }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn get_next_question(
        &mut self,
        request: &QuestionRequest,
        now: Timestamp,
        rng: &mut TinyRng,
    ) -> Fallible<NextQuestion> {
        select_next(&self.catalog, &mut self.store, request, now, rng)
    }

    pub fn submit_answer(&mut self, submission: &Submission, now: Timestamp) -> Fallible<SubmitOutcome> {
        let item = self.catalog.get_item(submission.item_id)?.ok_or_else(|| {
            ErrorReport::not_found(format!("no item with id {}", submission.item_id))
        })?;
        if item.category != submission.category {
            return Err(ErrorReport::new(format!(
                "item {} is a {}, not a {}",
                item.id, item.category, submission.category
            )));
        }
        if !submission.form.applies_to(item.category) {
            return Err(ErrorReport::with_kind(
                ErrorKind::UnknownForm,
                format!("{} has no {} form", item.category, submission.form),
            ));
        }

        let (feedback, answer) = match (submission.mode, &submission.response) {
            (PracticeMode::Flashcard, Response::Feedback(feedback)) => (Some(*feedback), ""),
            (PracticeMode::Flashcard, Response::Answer(text)) => {
                (Some(Feedback::try_from(text.as_str())?), "")
            }
            (PracticeMode::Quiz, Response::Answer(text)) => (None, text.as_str()),
            (PracticeMode::Quiz, Response::Feedback(_)) => {
                return Err(ErrorReport::new("quiz submissions need a typed answer"));
            }
        };
        let correct = validate(submission.mode, feedback, answer, &item, submission.form);
        let feedback = match feedback {
            Some(feedback) => feedback,
            None if correct => Feedback::Good,
            None => Feedback::Again,
        };

        let key = ReviewKey {
            user: submission.user.clone(),
            category: submission.category,
            item_id: submission.item_id,
            form: submission.form,
            mode: submission.mode,
        };
        let mut previous_streak = 0;
        let updated = self.store.update_record(&key, &mut |existing: Option<ReviewRecord>| {
            let record = existing.unwrap_or_else(|| ReviewRecord::new(key.clone(), now));
            previous_streak = record.streak;
            record.reviewed(correct, next_state(record.streak, feedback, now), now)
        })?;
        log::debug!(
            "{} answered ({}, {}) with {}: streak {} -> {}",
            submission.user,
            item.primary(),
            submission.form,
            feedback.as_str(),
            previous_streak,
            updated.streak
        );

        Ok(SubmitOutcome {
            correct,
            canonical_answer: conjugate_item(&item, submission.form),
            explanation: explain(&item, submission.form),
            previous_streak,
            new_streak: updated.streak,
            due_at: updated.due_at.unwrap_or(now),
        })
    }
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::policy::Preferences;
    use crate::store::MemoryCatalog;
    use crate::store::MemoryStore;
    use crate::types::item::Classification;
    use crate::types::item::LexicalItem;
    use crate::types::item::VerbGroup;
    use crate::types::timestamp::ts;

    fn trainer() -> Fallible<Trainer<MemoryCatalog, MemoryStore>> {
        let catalog = MemoryCatalog::new(vec![LexicalItem {
            id: 1,
            kana: "よむ".to_string(),
            kanji: Some("読む".to_string()),
            category: Category::Verb,
            subtype: Some(Classification::Verb(VerbGroup::GroupI)),
            meaning: "to read".to_string(),
            particle: None,
        }])?;
        Ok(Trainer::new(catalog, MemoryStore::new()))
    }

    fn submission(mode: PracticeMode, response: Response) -> Submission {
        Submission {
            user: "alice".to_string(),
            category: Category::Verb,
            item_id: 1,
            form: Form::Ta,
            mode,
            response,
        }
    }

    #[test]
    fn test_end_to_end() -> Fallible<()> {
        let mut trainer = trainer()?;
        let mut rng = TinyRng::from_seed(0);
        let now = ts("2024-03-01T10:00:00.000");
        let request = QuestionRequest {
            user: "alice".to_string(),
            category: Category::Verb,
            mode: PracticeMode::Quiz,
            forms: vec![Form::Ta],
            preferences: Preferences::default(),
        };
        let NextQuestion::Question(question) = trainer.get_next_question(&request, now, &mut rng)? else {
            panic!("expected a question");
        };
        assert!(question.is_new);
        assert_eq!(question.item.id, 1);
        assert_eq!(question.canonical_answer, "読んだ");

        let answered = now + Duration::seconds(20);
        let outcome = trainer.submit_answer(
            &submission(PracticeMode::Quiz, Response::Answer("読んだ".to_string())),
            answered,
        )?;
        assert!(outcome.correct);
        assert_eq!(outcome.canonical_answer, "読んだ");
        assert_eq!(outcome.previous_streak, 0);
        assert_eq!(outcome.new_streak, 1);
        assert_eq!(outcome.due_at, answered + Duration::days(1));

        let key = ReviewKey {
            user: "alice".to_string(),
            category: Category::Verb,
            item_id: 1,
            form: Form::Ta,
            mode: PracticeMode::Quiz,
        };
        let record = trainer.store().get_record(&key)?.expect("record");
        assert_eq!(record.attempts, 1);
        assert_eq!(record.correct, 1);
        assert!(!record.is_new());
        Ok(())
    }

    #[test]
    fn test_wrong_answer_resets() -> Fallible<()> {
        let mut trainer = trainer()?;
        let now = ts("2024-03-01T10:00:00.000");
        let right = submission(PracticeMode::Quiz, Response::Answer("よんだ".to_string()));
        trainer.submit_answer(&right, now)?;
        trainer.submit_answer(&right, now)?;
        let wrong = submission(PracticeMode::Quiz, Response::Answer("よみた".to_string()));
        let outcome = trainer.submit_answer(&wrong, now)?;
        assert!(!outcome.correct);
        assert_eq!(outcome.previous_streak, 2);
        assert_eq!(outcome.new_streak, 0);
        assert_eq!(outcome.due_at, now);
        assert!(outcome.explanation.contains("読んだ"));
        Ok(())
    }

    #[test]
    fn test_flashcard_feedback() -> Fallible<()> {
        let mut trainer = trainer()?;
        let now = ts("2024-03-01T10:00:00.000");
        let easy = submission(PracticeMode::Flashcard, Response::Feedback(Feedback::Easy));
        let outcome = trainer.submit_answer(&easy, now)?;
        assert!(outcome.correct);
        assert_eq!(outcome.new_streak, 2);
        assert_eq!(outcome.due_at, now + Duration::days(3));

        let hard = submission(PracticeMode::Flashcard, Response::Answer("hard".to_string()));
        let outcome = trainer.submit_answer(&hard, now)?;
        assert!(!outcome.correct);
        assert_eq!(outcome.new_streak, 1);
        Ok(())
    }

    #[test]
    fn test_unknown_item() -> Fallible<()> {
        let mut trainer = trainer()?;
        let mut missing = submission(PracticeMode::Quiz, Response::Answer("x".to_string()));
        missing.item_id = 42;
        let err = trainer.submit_answer(&missing, ts("2024-03-01T10:00:00.000"));
        assert_eq!(err.map_err(|e| e.kind()), Err(ErrorKind::NotFound));
        Ok(())
    }

    #[test]
    fn test_form_outside_category() -> Fallible<()> {
        let mut trainer = trainer()?;
        let mut bad = submission(PracticeMode::Quiz, Response::Answer("x".to_string()));
        bad.form = Form::Rentai;
        let err = trainer.submit_answer(&bad, ts("2024-03-01T10:00:00.000"));
        assert_eq!(err.map_err(|e| e.kind()), Err(ErrorKind::UnknownForm));
        Ok(())
    }
}
