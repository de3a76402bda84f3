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

//! Picks the next (item, form) pair to present.
//!
//! Existing records come first, most urgent first. When none qualify, an
//! untracked pair is drawn at random from the catalog and a record is
//! created for it. Either way the served record is stamped as presented,
//! so it sits out the exclusion window.

use serde::Serialize;

use crate::conjugation::conjugate_item;
use crate::error::Fallible;
use crate::policy::CandidateQuery;
use crate::policy::Preferences;
use crate::policy::resolve_forms;
use crate::rng::TinyRng;
use crate::store::Catalog;
use crate::store::ReviewStore;
use crate::types::form::Form;
use crate::types::item::Category;
use crate::types::item::LexicalItem;
use crate::types::record::PracticeMode;
use crate::types::record::ReviewKey;
use crate::types::record::ReviewRecord;
use crate::types::timestamp::Timestamp;

/// What the caller wants drilled.
#[derive(Clone, Debug, PartialEq)]
pub struct QuestionRequest {
    pub user: String,
    pub category: Category,
    pub mode: PracticeMode,
    /// Overrides the preferred forms when non-empty.
    pub forms: Vec<Form>,
    pub preferences: Preferences,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Question {
    pub item: LexicalItem,
    pub form: Form,
    pub canonical_answer: String,
    pub is_new: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum NextQuestion {
    Question(Question),
    /// Every eligible pair is either excluded or not due. Not an error.
    NoItemsAvailable,
}

pub fn select_next<C: Catalog, S: ReviewStore>(
    catalog: &C,
    store: &mut S,
    request: &QuestionRequest,
    now: Timestamp,
    rng: &mut TinyRng,
) -> Fallible<NextQuestion> {
    let forms = resolve_forms(request.category, &request.forms, &request.preferences);
    let mut query = CandidateQuery {
        user: request.user.clone(),
        category: request.category,
        mode: request.mode,
        forms: forms.clone(),
        now,
        due_only: request.preferences.due_only,
        skip_items: Vec::new(),
    };

    while let Some(record) = store.next_candidate(&query)? {
        let Some(item) = catalog.get_item(record.key.item_id)? else {
            log::warn!(
                "review record points at missing item {}, skipping it",
                record.key.item_id
            );
            query.skip_items.push(record.key.item_id);
            continue;
        };
        log::debug!(
            "serving tracked pair ({}, {}) for {}",
            item.primary(),
            record.key.form,
            request.user
        );
        store.mark_presented(&record.key, now)?;
        return Ok(question(item, &record));
    }

    let tracked = store.tracked(&request.user, request.category, request.mode)?;
    let mut untracked: Vec<(LexicalItem, Form)> = Vec::new();
    for item in catalog.items(request.category)? {
        for form in forms.iter() {
            if !tracked.contains(&(item.id, *form)) {
                untracked.push((item.clone(), *form));
            }
        }
    }
    let Some((item, form)) = rng.choose(&untracked).cloned() else {
        log::debug!("nothing to serve for {} in {}", request.user, request.category);
        return Ok(NextQuestion::NoItemsAvailable);
    };

    let key = ReviewKey {
        user: request.user.clone(),
        category: request.category,
        item_id: item.id,
        form,
        mode: request.mode,
    };
    let mut record = ReviewRecord::new(key, now);
    record.last_reviewed_at = Some(now);
    let (stored, created) = store.create_if_absent(&record)?;
    if !created {
        // Someone else created it between `tracked` and now.
        store.mark_presented(&stored.key, now)?;
    }
    log::debug!(
        "serving new pair ({}, {form}) for {}",
        item.primary(),
        request.user
    );
    Ok(question(item, &stored))
}

fn question(item: LexicalItem, record: &ReviewRecord) -> NextQuestion {
    let form = record.key.form;
    let canonical_answer = conjugate_item(&item, form);
    NextQuestion::Question(Question {
        item,
        form,
        canonical_answer,
        is_new: record.is_new(),
    })
}

#[cfg(test)]
mod tests {
    use chrono::Duration;

    use super::*;
    use crate::store::MemoryCatalog;
    use crate::store::MemoryStore;
    use crate::types::item::Classification;
    use crate::types::item::VerbGroup;
    use crate::types::timestamp::ts;

    fn catalog() -> Fallible<MemoryCatalog> {
        MemoryCatalog::new(vec![LexicalItem {
            id: 1,
            kana: "よむ".to_string(),
            kanji: Some("読む".to_string()),
            category: Category::Verb,
            subtype: Some(Classification::Verb(VerbGroup::GroupI)),
            meaning: "to read".to_string(),
            particle: None,
        }])
    }

    fn request(forms: Vec<Form>) -> QuestionRequest {
        QuestionRequest {
            user: "alice".to_string(),
            category: Category::Verb,
            mode: PracticeMode::Quiz,
            forms,
            preferences: Preferences::default(),
        }
    }

    fn pair(next: &NextQuestion) -> Option<(i64, Form)> {
        match next {
            NextQuestion::Question(q) => Some((q.item.id, q.form)),
            NextQuestion::NoItemsAvailable => None,
        }
    }

    #[test]
    fn test_first_question_is_new() -> Fallible<()> {
        let catalog = catalog()?;
        let mut store = MemoryStore::new();
        let mut rng = TinyRng::from_seed(3);
        let now = ts("2024-01-01T09:00:00.000");
        let next = select_next(&catalog, &mut store, &request(vec![Form::Ta]), now, &mut rng)?;
        let NextQuestion::Question(question) = next else {
            panic!("expected a question");
        };
        assert!(question.is_new);
        assert_eq!(question.form, Form::Ta);
        assert_eq!(question.canonical_answer, "読んだ");
        assert_eq!(store.len(), 1);
        Ok(())
    }

    #[test]
    fn test_no_repeat_within_window() -> Fallible<()> {
        let catalog = catalog()?;
        let mut store = MemoryStore::new();
        let mut rng = TinyRng::from_seed(11);
        let now = ts("2024-01-01T09:00:00.000");
        let request = request(vec![Form::Te, Form::Ta]);

        let first = select_next(&catalog, &mut store, &request, now, &mut rng)?;
        let later = now + Duration::minutes(5);
        let second = select_next(&catalog, &mut store, &request, later, &mut rng)?;
        assert!(pair(&first).is_some());
        assert!(pair(&second).is_some());
        assert_ne!(pair(&first), pair(&second));

        // Both pairs are now inside the window.
        let third = select_next(&catalog, &mut store, &request, later, &mut rng)?;
        assert_eq!(third, NextQuestion::NoItemsAvailable);
        Ok(())
    }

    #[test]
    fn test_tracked_pair_returns_after_window() -> Fallible<()> {
        let catalog = catalog()?;
        let mut store = MemoryStore::new();
        let mut rng = TinyRng::from_seed(5);
        let now = ts("2024-01-01T09:00:00.000");
        let request = request(vec![Form::Te]);

        let first = select_next(&catalog, &mut store, &request, now, &mut rng)?;
        let after = now + Duration::minutes(31);
        let again = select_next(&catalog, &mut store, &request, after, &mut rng)?;
        assert_eq!(pair(&first), pair(&again));
        let NextQuestion::Question(question) = again else {
            panic!("expected a question");
        };
        // Presented but never answered.
        assert!(question.is_new);
        assert_eq!(store.len(), 1);
        Ok(())
    }

    #[test]
    fn test_empty_catalog() -> Fallible<()> {
        let catalog = MemoryCatalog::new(Vec::new())?;
        let mut store = MemoryStore::new();
        let mut rng = TinyRng::from_seed(1);
        let now = ts("2024-01-01T09:00:00.000");
        let next = select_next(&catalog, &mut store, &request(Vec::new()), now, &mut rng)?;
        assert_eq!(next, NextQuestion::NoItemsAvailable);
        Ok(())
    }

    #[test]
    fn test_due_only_skips_future_records() -> Fallible<()> {
        let catalog = catalog()?;
        let mut store = MemoryStore::new();
        let now = ts("2024-01-10T09:00:00.000");
        let mut record = ReviewRecord::new(
            ReviewKey {
                user: "alice".to_string(),
                category: Category::Verb,
                item_id: 1,
                form: Form::Te,
                mode: PracticeMode::Quiz,
            },
            now,
        );
        record.attempts = 1;
        record.correct = 1;
        record.streak = 1;
        record.due_at = Some(now + Duration::days(1));
        store.create_if_absent(&record)?;

        let mut request = request(vec![Form::Te]);
        request.preferences.due_only = true;
        let mut rng = TinyRng::from_seed(1);
        let next = select_next(&catalog, &mut store, &request, now, &mut rng)?;
        assert_eq!(next, NextQuestion::NoItemsAvailable);

        request.preferences.due_only = false;
        let next = select_next(&catalog, &mut store, &request, now, &mut rng)?;
        assert_eq!(pair(&next), Some((1, Form::Te)));
        Ok(())
    }

    #[test]
    fn test_missing_item_falls_through() -> Fallible<()> {
        let catalog = catalog()?;
        let mut store = MemoryStore::new();
        let now = ts("2024-01-10T09:00:00.000");
        store.create_if_absent(&ReviewRecord::new(
            ReviewKey {
                user: "alice".to_string(),
                category: Category::Verb,
                item_id: 99,
                form: Form::Te,
                mode: PracticeMode::Quiz,
            },
            now,
        ))?;
        let mut rng = TinyRng::from_seed(2);
        let next = select_next(&catalog, &mut store, &request(vec![Form::Te]), now, &mut rng)?;
        assert_eq!(pair(&next), Some((1, Form::Te)));
        Ok(())
    }

    #[test]
    fn test_missing_item_does_not_hide_due_records() -> Fallible<()> {
        let catalog = catalog()?;
        let mut store = MemoryStore::new();
        let now = ts("2024-01-10T09:00:00.000");
        let key = |item_id| ReviewKey {
            user: "alice".to_string(),
            category: Category::Verb,
            item_id,
            form: Form::Te,
            mode: PracticeMode::Quiz,
        };
        store.create_if_absent(&ReviewRecord::new(key(99), now - Duration::days(5)))?;
        let mut live = ReviewRecord::new(key(1), now - Duration::days(1));
        live.attempts = 1;
        live.correct = 1;
        live.streak = 1;
        store.create_if_absent(&live)?;

        // Every catalog pair is tracked, so only the live record can be served.
        let mut request = request(vec![Form::Te]);
        request.preferences.due_only = true;
        let mut rng = TinyRng::from_seed(4);
        let next = select_next(&catalog, &mut store, &request, now, &mut rng)?;
        let NextQuestion::Question(question) = next else {
            panic!("expected the due record to be served");
        };
        assert_eq!((question.item.id, question.form), (1, Form::Te));
        assert!(!question.is_new);
        assert_eq!(store.get_record(&key(1))?.and_then(|r| r.last_reviewed_at), Some(now));
        Ok(())
    }
}
