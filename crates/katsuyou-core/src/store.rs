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

//! The storage collaborators the selector and trainer talk to, plus
//! in-memory implementations of both.

use std::collections::HashMap;
use std::collections::HashSet;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::policy::CandidateQuery;
use crate::policy::select_candidate;
use crate::types::form::Form;
use crate::types::item::Category;
use crate::types::item::ItemId;
use crate::types::item::LexicalItem;
use crate::types::record::PracticeMode;
use crate::types::record::ReviewKey;
use crate::types::record::ReviewRecord;
use crate::types::timestamp::Timestamp;

/// Read-only lexical reference data.
pub trait Catalog {
    fn get_item(&self, id: ItemId) -> Fallible<Option<LexicalItem>>;

    /// Every item in a category, in a stable order.
    fn items(&self, category: Category) -> Fallible<Vec<LexicalItem>>;
}

/// Review records keyed by `(user, category, item, form, mode)`.
///
/// Implementations must enforce key uniqueness themselves; the selector
/// relies on `create_if_absent` never producing a second row for a key.
pub trait ReviewStore {
    fn get_record(&self, key: &ReviewKey) -> Fallible<Option<ReviewRecord>>;

    /// The first record matching the query, in `review_order`.
    fn next_candidate(&self, query: &CandidateQuery) -> Fallible<Option<ReviewRecord>>;

    /// The (item, form) pairs that already have a record.
    fn tracked(
        &self,
        user: &str,
        category: Category,
        mode: PracticeMode,
    ) -> Fallible<HashSet<(ItemId, Form)>>;

    /// Insert the record unless its key exists. Returns the stored record
    /// and whether this call created it.
    fn create_if_absent(&mut self, record: &ReviewRecord) -> Fallible<(ReviewRecord, bool)>;

    /// Stamp a record as just served, which starts its exclusion window.
    fn mark_presented(&mut self, key: &ReviewKey, now: Timestamp) -> Fallible<()>;

    /// Atomically read, transform and write one record. The closure sees
    /// `None` when the key has no record yet.
    fn update_record(
        &mut self,
        key: &ReviewKey,
        update: &mut dyn FnMut(Option<ReviewRecord>) -> ReviewRecord,
    ) -> Fallible<ReviewRecord>;
}

/// A catalog held in memory, in insertion order.
#[derive(Clone, Debug, Default)]
pub struct MemoryCatalog {
    items: Vec<LexicalItem>,
}

impl MemoryCatalog {
    /// Build a catalog, rejecting duplicate ids.
    pub fn new(items: Vec<LexicalItem>) -> Fallible<Self> {
        let mut seen: HashSet<ItemId> = HashSet::new();
        for item in items.iter() {
            if !seen.insert(item.id) {
                return Err(ErrorReport::new(format!(
                    "duplicate item id {} ({})",
                    item.id,
                    item.primary()
                )));
            }
        }
        Ok(Self { items })
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &LexicalItem> {
        self.items.iter()
    }
}

impl Catalog for MemoryCatalog {
    fn get_item(&self, id: ItemId) -> Fallible<Option<LexicalItem>> {
        Ok(self.items.iter().find(|item| item.id == id).cloned())
    }

    fn items(&self, category: Category) -> Fallible<Vec<LexicalItem>> {
        Ok(self
            .items
            .iter()
            .filter(|item| item.category == category)
            .cloned()
            .collect())
    }
}

/// Review records in a hash map. Good for tests and throwaway sessions.
#[derive(Clone, Debug, Default)]
pub struct MemoryStore {
    records: HashMap<ReviewKey, ReviewRecord>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl ReviewStore for MemoryStore {
    fn get_record(&self, key: &ReviewKey) -> Fallible<Option<ReviewRecord>> {
        Ok(self.records.get(key).cloned())
    }

    fn next_candidate(&self, query: &CandidateQuery) -> Fallible<Option<ReviewRecord>> {
        Ok(select_candidate(self.records.values(), query).cloned())
    }

    fn tracked(
        &self,
        user: &str,
        category: Category,
        mode: PracticeMode,
    ) -> Fallible<HashSet<(ItemId, Form)>> {
        Ok(self
            .records
            .keys()
            .filter(|key| key.user == user && key.category == category && key.mode == mode)
            .map(|key| (key.item_id, key.form))
            .collect())
    }

    fn create_if_absent(&mut self, record: &ReviewRecord) -> Fallible<(ReviewRecord, bool)> {
        if let Some(existing) = self.records.get(&record.key) {
            return Ok((existing.clone(), false));
        }
        self.records.insert(record.key.clone(), record.clone());
        Ok((record.clone(), true))
    }

    fn mark_presented(&mut self, key: &ReviewKey, now: Timestamp) -> Fallible<()> {
        if let Some(record) = self.records.get_mut(key) {
            record.last_reviewed_at = Some(now);
        }
        Ok(())
    }

    fn update_record(
        &mut self,
        key: &ReviewKey,
        update: &mut dyn FnMut(Option<ReviewRecord>) -> ReviewRecord,
    ) -> Fallible<ReviewRecord> {
        let updated = update(self.records.get(key).cloned());
        self.records.insert(key.clone(), updated.clone());
        Ok(updated)
    }
}
