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

use std::collections::HashSet;
use std::path::Path;

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use rusqlite::Row;
use rusqlite::TransactionBehavior;
use rusqlite::params;
use rusqlite::params_from_iter;
use rusqlite::types::Value;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::policy::CandidateQuery;
use crate::policy::exclusion_cutoff;
use crate::store::ReviewStore;
use crate::types::form::Form;
use crate::types::item::Category;
use crate::types::item::ItemId;
use crate::types::record::PracticeMode;
use crate::types::record::ReviewKey;
use crate::types::record::ReviewRecord;
use crate::types::timestamp::Timestamp;

const SCHEMA: &str = "
    create table if not exists reviews (
        user text not null,
        category text not null,
        item_id integer not null,
        form text not null,
        mode text not null,
        attempts integer not null default 0 check (attempts >= 0),
        correct integer not null default 0 check (correct >= 0 and correct <= attempts),
        streak integer not null default 0 check (streak >= 0),
        due_at text,
        last_reviewed_at text,
        primary key (user, category, item_id, form, mode)
    );
    create index if not exists reviews_by_due
        on reviews (user, category, mode, due_at);
";

const COLUMNS: &str =
    "user, category, item_id, form, mode, attempts, correct, streak, due_at, last_reviewed_at";

/// Review records in a SQLite file.
pub struct Database {
    conn: Connection,
}

/// Map a SQLite failure into the storage error kind.
pub fn storage_err(e: rusqlite::Error) -> ErrorReport {
    ErrorReport::storage(format!("database error: {e}"))
}

impl Database {
    pub fn new(path: &Path) -> Fallible<Self> {
        let conn = Connection::open(path).map_err(storage_err)?;
        Self::setup(conn)
    }

    #[cfg(test)]
    pub fn in_memory() -> Fallible<Self> {
        let conn = Connection::open_in_memory().map_err(storage_err)?;
        Self::setup(conn)
    }

    fn setup(conn: Connection) -> Fallible<Self> {
        conn.execute_batch(
            "
            pragma busy_timeout = 5000;
            pragma journal_mode = wal;
            pragma synchronous = normal;
            ",
        )
        .map_err(storage_err)?;
        conn.execute_batch(SCHEMA).map_err(storage_err)?;
        Ok(Self { conn })
    }

    /// Number of review records, across all users.
    pub fn count(&self) -> Fallible<usize> {
        let count: i64 = self
            .conn
            .query_row("select count(*) from reviews", [], |row| row.get(0))
            .map_err(storage_err)?;
        Ok(count as usize)
    }
}

fn get_record(conn: &Connection, key: &ReviewKey) -> Fallible<Option<ReviewRecord>> {
    let sql = format!(
        "select {COLUMNS} from reviews
         where user = ?1 and category = ?2 and item_id = ?3 and form = ?4 and mode = ?5"
    );
    let raw = conn
        .prepare_cached(&sql)
        .map_err(storage_err)?
        .query_row(
            params![
                key.user,
                key.category.as_str(),
                key.item_id,
                key.form.as_str(),
                key.mode.as_str()
            ],
            RawRecord::from_row,
        )
        .optional()
        .map_err(storage_err)?;
    raw.map(RawRecord::parse).transpose()
}

fn upsert_record(conn: &Connection, record: &ReviewRecord) -> Fallible<()> {
    let key = &record.key;
    conn.prepare_cached(
        "insert into reviews (user, category, item_id, form, mode, attempts, correct, streak, due_at, last_reviewed_at)
         values (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
         on conflict (user, category, item_id, form, mode) do update set
             attempts = excluded.attempts,
             correct = excluded.correct,
             streak = excluded.streak,
             due_at = excluded.due_at,
             last_reviewed_at = excluded.last_reviewed_at",
    )
    .map_err(storage_err)?
    .execute(params![
        key.user,
        key.category.as_str(),
        key.item_id,
        key.form.as_str(),
        key.mode.as_str(),
        record.attempts,
        record.correct,
        record.streak,
        record.due_at.map(String::from),
        record.last_reviewed_at.map(String::from),
    ])
    .map_err(storage_err)?;
    Ok(())
}

impl ReviewStore for Database {
    fn get_record(&self, key: &ReviewKey) -> Fallible<Option<ReviewRecord>> {
        get_record(&self.conn, key)
    }

    fn next_candidate(&self, query: &CandidateQuery) -> Fallible<Option<ReviewRecord>> {
        if query.forms.is_empty() {
            return Ok(None);
        }
        let placeholders = vec!["?"; query.forms.len()].join(", ");
        let due_filter = if query.due_only {
            "and (due_at is null or due_at <= ?)"
        } else {
            ""
        };
        let skip_filter = if query.skip_items.is_empty() {
            String::new()
        } else {
            let placeholders = vec!["?"; query.skip_items.len()].join(", ");
            format!("and item_id not in ({placeholders})")
        };
        let sql = format!(
            "select {COLUMNS} from reviews
             where user = ? and category = ? and mode = ?
               and form in ({placeholders})
               and (last_reviewed_at is null or last_reviewed_at <= ?)
               {due_filter}
               {skip_filter}
             order by due_at is not null, due_at, streak, item_id, form
             limit 1"
        );
        let mut values: Vec<Value> = vec![
            query.user.clone().into(),
            query.category.as_str().to_string().into(),
            query.mode.as_str().to_string().into(),
        ];
        values.extend(query.forms.iter().map(|form| Value::from(form.as_str().to_string())));
        values.push(String::from(exclusion_cutoff(query.now)).into());
        if query.due_only {
            values.push(String::from(query.now).into());
        }
        values.extend(query.skip_items.iter().map(|id| Value::from(*id)));
        let raw = self
            .conn
            .prepare_cached(&sql)
            .map_err(storage_err)?
            .query_row(params_from_iter(values.iter()), RawRecord::from_row)
            .optional()
            .map_err(storage_err)?;
        let record = raw.map(RawRecord::parse).transpose()?;
        if let Some(record) = &record {
            log::debug!(
                "candidate for {}: item {} {} (streak {})",
                query.user,
                record.key.item_id,
                record.key.form,
                record.streak
            );
        }
        Ok(record)
    }

    fn tracked(
        &self,
        user: &str,
        category: Category,
        mode: PracticeMode,
    ) -> Fallible<HashSet<(ItemId, Form)>> {
        let mut stmt = self
            .conn
            .prepare_cached(
                "select item_id, form from reviews where user = ?1 and category = ?2 and mode = ?3",
            )
            .map_err(storage_err)?;
        let rows = stmt
            .query_map(params![user, category.as_str(), mode.as_str()], |row| {
                Ok((row.get::<_, ItemId>(0)?, row.get::<_, String>(1)?))
            })
            .map_err(storage_err)?;
        let mut pairs = HashSet::new();
        for row in rows {
            let (item_id, form) = row.map_err(storage_err)?;
            pairs.insert((item_id, form.parse::<Form>()?));
        }
        Ok(pairs)
    }

    fn create_if_absent(&mut self, record: &ReviewRecord) -> Fallible<(ReviewRecord, bool)> {
        let key = &record.key;
        let inserted = self
            .conn
            .prepare_cached(
                "insert into reviews (user, category, item_id, form, mode, attempts, correct, streak, due_at, last_reviewed_at)
                 values (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
                 on conflict (user, category, item_id, form, mode) do nothing",
            )
            .map_err(storage_err)?
            .execute(params![
                key.user,
                key.category.as_str(),
                key.item_id,
                key.form.as_str(),
                key.mode.as_str(),
                record.attempts,
                record.correct,
                record.streak,
                record.due_at.map(String::from),
                record.last_reviewed_at.map(String::from),
            ])
            .map_err(storage_err)?;
        match get_record(&self.conn, key)? {
            Some(stored) => Ok((stored, inserted > 0)),
            None => Err(ErrorReport::storage(format!(
                "record for item {} vanished after insert",
                key.item_id
            ))),
        }
    }

    fn mark_presented(&mut self, key: &ReviewKey, now: Timestamp) -> Fallible<()> {
        self.conn
            .prepare_cached(
                "update reviews set last_reviewed_at = ?6
                 where user = ?1 and category = ?2 and item_id = ?3 and form = ?4 and mode = ?5",
            )
            .map_err(storage_err)?
            .execute(params![
                key.user,
                key.category.as_str(),
                key.item_id,
                key.form.as_str(),
                key.mode.as_str(),
                String::from(now),
            ])
            .map_err(storage_err)?;
        Ok(())
    }

    fn update_record(
        &mut self,
        key: &ReviewKey,
        update: &mut dyn FnMut(Option<ReviewRecord>) -> ReviewRecord,
    ) -> Fallible<ReviewRecord> {
        // Take the write lock before reading so concurrent submissions for
        // one key serialize.
        let tx = self
            .conn
            .transaction_with_behavior(TransactionBehavior::Immediate)
            .map_err(storage_err)?;
        let current = get_record(&tx, key)?;
        let updated = update(current);
        if updated.key != *key {
            return Err(ErrorReport::storage("update changed the record key"));
        }
        upsert_record(&tx, &updated)?;
        tx.commit().map_err(storage_err)?;
        Ok(updated)
    }
}

/// A row as stored, before the text columns are parsed.
struct RawRecord {
    user: String,
    category: String,
    item_id: ItemId,
    form: String,
    mode: String,
    attempts: u32,
    correct: u32,
    streak: u32,
    due_at: Option<String>,
    last_reviewed_at: Option<String>,
}

impl RawRecord {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            user: row.get(0)?,
            category: row.get(1)?,
            item_id: row.get(2)?,
            form: row.get(3)?,
            mode: row.get(4)?,
            attempts: row.get(5)?,
            correct: row.get(6)?,
            streak: row.get(7)?,
            due_at: row.get(8)?,
            last_reviewed_at: row.get(9)?,
        })
    }

    fn parse(self) -> Fallible<ReviewRecord> {
        Ok(ReviewRecord {
            key: ReviewKey {
                user: self.user,
                category: self.category.parse()?,
                item_id: self.item_id,
                form: self.form.parse()?,
                mode: self.mode.parse()?,
            },
            attempts: self.attempts,
            correct: self.correct,
            streak: self.streak,
            due_at: self.due_at.map(Timestamp::try_from).transpose()?,
            last_reviewed_at: self.last_reviewed_at.map(Timestamp::try_from).transpose()?,
        })
    }
}
