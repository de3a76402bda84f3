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

//! Selection policy, kept apart from any storage so each rule can be
//! tested on its own. The SQLite store encodes the same rules in SQL.

use std::cmp::Ordering;

use chrono::Duration;
use serde::Deserialize;
use serde::Serialize;

use crate::types::form::Form;
use crate::types::item::Category;
use crate::types::item::ItemId;
use crate::types::record::PracticeMode;
use crate::types::record::ReviewRecord;
use crate::types::timestamp::Timestamp;

/// How long a just-served pair stays out of rotation.
pub const EXCLUSION_WINDOW_MINUTES: i64 = 30;

pub fn exclusion_window() -> Duration {
    Duration::minutes(EXCLUSION_WINDOW_MINUTES)
}

/// Records touched after this instant are excluded.
pub fn exclusion_cutoff(now: Timestamp) -> Timestamp {
    now - exclusion_window()
}

pub fn is_excluded(record: &ReviewRecord, now: Timestamp) -> bool {
    record
        .last_reviewed_at
        .is_some_and(|at| at > exclusion_cutoff(now))
}

/// A record with no due time is always due.
pub fn is_due(record: &ReviewRecord, now: Timestamp) -> bool {
    record.due_at.is_none_or(|due| due <= now)
}

/// Most urgent first: earliest due time (none before any), then the
/// weakest streak. Item id and form name break remaining ties so the
/// in-memory and SQL orders agree.
pub fn review_order(a: &ReviewRecord, b: &ReviewRecord) -> Ordering {
    a.due_at
        .cmp(&b.due_at)
        .then(a.streak.cmp(&b.streak))
        .then(a.key.item_id.cmp(&b.key.item_id))
        .then(a.key.form.as_str().cmp(b.key.form.as_str()))
}

/// Per-user drill settings.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    pub verb_forms: Option<Vec<Form>>,
    pub adjective_forms: Option<Vec<Form>>,
    /// Only serve existing records that are already due.
    pub due_only: bool,
}

impl Preferences {
    pub fn forms_for(&self, category: Category) -> Option<&[Form]> {
        match category {
            Category::Verb => self.verb_forms.as_deref(),
            Category::Adjective => self.adjective_forms.as_deref(),
        }
    }
}

/// Which forms to drill: a caller override, else the preference narrowed
/// to the category's defaults, else the defaults. Forms the category can't
/// take are dropped from the override.
pub fn resolve_forms(category: Category, requested: &[Form], preferences: &Preferences) -> Vec<Form> {
    let requested: Vec<Form> = dedup(requested.iter().copied().filter(|form| form.applies_to(category)));
    if !requested.is_empty() {
        return requested;
    }
    let defaults = category.default_forms();
    if let Some(preferred) = preferences.forms_for(category) {
        let narrowed = dedup(preferred.iter().copied().filter(|form| defaults.contains(form)));
        if !narrowed.is_empty() {
            return narrowed;
        }
    }
    defaults.to_vec()
}

fn dedup(forms: impl Iterator<Item = Form>) -> Vec<Form> {
    let mut result: Vec<Form> = Vec::new();
    for form in forms {
        if !result.contains(&form) {
            result.push(form);
        }
    }
    result
}

/// The filter for existing review records.
#[derive(Clone, Debug, PartialEq)]
pub struct CandidateQuery {
    pub user: String,
    pub category: Category,
    pub mode: PracticeMode,
    pub forms: Vec<Form>,
    pub now: Timestamp,
    pub due_only: bool,
    /// Items the catalog no longer has. Their records are passed over.
    pub skip_items: Vec<ItemId>,
}

impl CandidateQuery {
    pub fn matches(&self, record: &ReviewRecord) -> bool {
        let key = &record.key;
        key.user == self.user
            && key.category == self.category
            && key.mode == self.mode
            && self.forms.contains(&key.form)
            && !self.skip_items.contains(&key.item_id)
            && !is_excluded(record, self.now)
            && (!self.due_only || is_due(record, self.now))
    }
}

/// The most urgent matching record.
pub fn select_candidate<'a>(
    records: impl Iterator<Item = &'a ReviewRecord>,
    query: &CandidateQuery,
) -> Option<&'a ReviewRecord> {
    records
        .filter(|record| query.matches(record))
        .min_by(|a, b| review_order(a, b))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::record::ReviewKey;
    use crate::types::timestamp::ts;

    fn record(item_id: i64, form: Form, streak: u32, due_at: Option<&str>) -> ReviewRecord {
        ReviewRecord {
            key: ReviewKey {
                user: "alice".to_string(),
                category: Category::Verb,
                item_id,
                form,
                mode: PracticeMode::Quiz,
            },
            attempts: streak,
            correct: streak,
            streak,
            due_at: due_at.map(ts),
            last_reviewed_at: None,
        }
    }

    fn query(now: Timestamp, due_only: bool) -> CandidateQuery {
        CandidateQuery {
            user: "alice".to_string(),
            category: Category::Verb,
            mode: PracticeMode::Quiz,
            forms: vec![Form::Te, Form::Ta],
            now,
            due_only,
            skip_items: Vec::new(),
        }
    }

    #[test]
    fn test_exclusion_window() {
        let now = ts("2024-01-01T12:00:00.000");
        let mut r = record(1, Form::Te, 0, None);
        assert!(!is_excluded(&r, now));
        r.last_reviewed_at = Some(ts("2024-01-01T11:45:00.000"));
        assert!(is_excluded(&r, now));
        r.last_reviewed_at = Some(ts("2024-01-01T11:30:00.000"));
        assert!(!is_excluded(&r, now));
        r.last_reviewed_at = Some(ts("2024-01-01T09:00:00.000"));
        assert!(!is_excluded(&r, now));
    }

    #[test]
    fn test_is_due() {
        let now = ts("2024-01-01T12:00:00.000");
        assert!(is_due(&record(1, Form::Te, 0, None), now));
        assert!(is_due(&record(1, Form::Te, 0, Some("2024-01-01T12:00:00.000")), now));
        assert!(!is_due(&record(1, Form::Te, 0, Some("2024-01-01T12:00:00.001")), now));
    }

    #[test]
    fn test_order_due_then_streak() {
        let never = record(1, Form::Te, 5, None);
        let early_strong = record(2, Form::Te, 4, Some("2024-01-01T00:00:00.000"));
        let early_weak = record(3, Form::Te, 1, Some("2024-01-01T00:00:00.000"));
        let late = record(4, Form::Te, 0, Some("2024-02-01T00:00:00.000"));
        let mut records = vec![late.clone(), early_strong.clone(), never.clone(), early_weak.clone()];
        records.sort_by(review_order);
        assert_eq!(records, vec![never, early_weak, early_strong, late]);
    }

    #[test]
    fn test_select_candidate_filters() {
        let now = ts("2024-01-10T12:00:00.000");
        let mut recent = record(1, Form::Te, 0, Some("2024-01-01T00:00:00.000"));
        recent.last_reviewed_at = Some(ts("2024-01-10T11:59:00.000"));
        let other_form = record(2, Form::Masu, 0, Some("2024-01-01T00:00:00.000"));
        let future = record(3, Form::Ta, 2, Some("2024-01-20T00:00:00.000"));
        let records = vec![recent, other_form, future.clone()];

        assert_eq!(select_candidate(records.iter(), &query(now, false)), Some(&future));
        assert_eq!(select_candidate(records.iter(), &query(now, true)), None);
    }

    #[test]
    fn test_select_candidate_skips_items() {
        let now = ts("2024-01-10T12:00:00.000");
        let stale = record(9, Form::Te, 0, Some("2024-01-01T00:00:00.000"));
        let live = record(1, Form::Te, 1, Some("2024-01-05T00:00:00.000"));
        let records = vec![stale.clone(), live.clone()];

        let mut q = query(now, true);
        assert_eq!(select_candidate(records.iter(), &q), Some(&stale));
        q.skip_items.push(9);
        assert_eq!(select_candidate(records.iter(), &q), Some(&live));
        q.skip_items.push(1);
        assert_eq!(select_candidate(records.iter(), &q), None);
    }

    #[test]
    fn test_resolve_forms_override() {
        let prefs = Preferences::default();
        let forms = resolve_forms(Category::Verb, &[Form::Ta, Form::Ta, Form::Rentai], &prefs);
        assert_eq!(forms, vec![Form::Ta]);
        let derived = resolve_forms(Category::Verb, &[Form::PolitePast], &prefs);
        assert_eq!(derived, vec![Form::PolitePast]);
    }

    #[test]
    fn test_resolve_forms_preference() {
        let prefs = Preferences {
            verb_forms: Some(vec![Form::Te, Form::Negative]),
            ..Preferences::default()
        };
        assert_eq!(resolve_forms(Category::Verb, &[], &prefs), vec![Form::Te]);
        assert_eq!(
            resolve_forms(Category::Adjective, &[], &prefs),
            Category::Adjective.default_forms().to_vec()
        );
    }

    #[test]
    fn test_resolve_forms_empty_intersection_falls_back() {
        let prefs = Preferences {
            verb_forms: Some(vec![Form::Rentai]),
            ..Preferences::default()
        };
        assert_eq!(
            resolve_forms(Category::Verb, &[Form::Adverb], &prefs),
            Category::Verb.default_forms().to_vec()
        );
    }
}
