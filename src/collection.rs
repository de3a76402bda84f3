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

use std::env::current_dir;
use std::path::PathBuf;

use crate::catalog::load_catalog;
use crate::config::Config;
use crate::db::Database;
use crate::error::Fallible;
use crate::error::fail;
use crate::store::MemoryCatalog;
use crate::trainer::Trainer;

pub const DATABASE_FILE: &str = "katsuyou.db";

/// A collection directory: catalog files, config, and the review database.
pub struct Collection {
    pub directory: PathBuf,
    pub db: Database,
    pub catalog: MemoryCatalog,
    pub config: Config,
}

impl Collection {
    /// Open the collection at `directory`, or the working directory.
    pub fn new(directory: Option<String>) -> Fallible<Self> {
        let directory: PathBuf = match directory {
            Some(dir) => PathBuf::from(dir),
            None => current_dir()?,
        };
        if !directory.exists() {
            return fail("directory does not exist.");
        }
        let directory = directory.canonicalize()?;
        let config = Config::load(&directory)?;
        let catalog = load_catalog(&directory)?;
        log::debug!(
            "loaded {} items from {}",
            catalog.len(),
            directory.display()
        );
        let db = Database::new(&directory.join(DATABASE_FILE))?;
        Ok(Self {
            directory,
            db,
            catalog,
            config,
        })
    }

    pub fn into_trainer(self) -> (Trainer<MemoryCatalog, Database>, Config) {
        (Trainer::new(self.catalog, self.db), self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helper::create_tmp_collection;

    #[test]
    fn test_missing_directory() {
        let result = Collection::new(Some("./derpherp".to_string()));
        assert_eq!(
            result.err().map(|e| e.to_string()),
            Some("error: directory does not exist.".to_string())
        );
    }

    #[test]
    fn test_open_collection() -> Fallible<()> {
        let dir = create_tmp_collection()?;
        let collection = Collection::new(Some(dir.display().to_string()))?;
        assert!(!collection.catalog.is_empty());
        assert!(collection.directory.join(DATABASE_FILE).exists());
        assert_eq!(collection.db.count()?, 0);
        Ok(())
    }
}
