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

//! Lexical catalogs on disk.
//!
//! A catalog file is any `*.toml` file in the collection directory other
//! than the config file. Each holds `[[verb]]` and `[[adjective]]` tables:
//!
//! ```toml
//! [[verb]]
//! id = 1
//! kana = "よむ"
//! kanji = "読む"
//! group = "godan"
//! meaning = "to read"
//!
//! [[adjective]]
//! id = 2
//! kana = "きれい"
//! type = "na"
//! meaning = "pretty"
//! ```

use std::fs::read_to_string;
use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;
use walkdir::WalkDir;

use crate::config::CONFIG_FILE;
use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::error::fail;
use crate::store::MemoryCatalog;
use crate::types::item::Category;
use crate::types::item::ItemId;
use crate::types::item::LexicalItem;
use crate::types::item::normalize_classification;

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct CatalogFile {
    #[serde(default)]
    verb: Vec<Entry>,
    #[serde(default)]
    adjective: Vec<Entry>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct Entry {
    id: ItemId,
    kana: String,
    kanji: Option<String>,
    /// Verb group or adjective type, in any of the accepted spellings.
    #[serde(alias = "type")]
    group: Option<String>,
    /// Marks a set expression and names the particle it splits at.
    particle: Option<String>,
    #[serde(default)]
    meaning: String,
}

impl Entry {
    fn into_item(self, category: Category, file: &Path) -> Fallible<LexicalItem> {
        if self.kana.trim().is_empty() {
            return fail(format!(
                "{}: {category} {} has an empty kana spelling",
                file.display(),
                self.id
            ));
        }
        let subtype = match self.group.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(raw) => match normalize_classification(category, raw) {
                Some(classification) => Some(classification),
                None => {
                    return fail(format!(
                        "{}: unknown {category} class '{raw}' for {}",
                        file.display(),
                        self.kana
                    ));
                }
            },
        };
        let kanji = self.kanji.filter(|kanji| !kanji.trim().is_empty());
        let particle = self
            .particle
            .map(|particle| particle.trim().to_string())
            .filter(|particle| !particle.is_empty());
        Ok(LexicalItem {
            id: self.id,
            kana: self.kana.trim().to_string(),
            kanji: kanji.map(|kanji| kanji.trim().to_string()),
            category,
            subtype,
            particle,
            meaning: self.meaning,
        })
    }
}

/// Parse the items in one catalog file.
pub fn parse_catalog(text: &str, file: &Path) -> Fallible<Vec<LexicalItem>> {
    let parsed: CatalogFile = toml::from_str(text)
        .map_err(|e| ErrorReport::new(format!("{}: {e}", file.display())))?;
    let mut items = Vec::with_capacity(parsed.verb.len() + parsed.adjective.len());
    for entry in parsed.verb {
        items.push(entry.into_item(Category::Verb, file)?);
    }
    for entry in parsed.adjective {
        items.push(entry.into_item(Category::Adjective, file)?);
    }
    Ok(items)
}

/// Every catalog file under `directory`, in path order.
pub fn catalog_files(directory: &Path) -> Fallible<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in WalkDir::new(directory).sort_by_file_name() {
        let entry = entry.map_err(|e| ErrorReport::new(format!("failed to walk collection: {e}")))?;
        let path = entry.path();
        let is_toml = path.extension().is_some_and(|ext| ext == "toml");
        let is_config = path.file_name().is_some_and(|name| name == CONFIG_FILE);
        if entry.file_type().is_file() && is_toml && !is_config {
            files.push(path.to_path_buf());
        }
    }
    Ok(files)
}

/// Load every catalog file. Ids must be unique across files.
pub fn load_catalog(directory: &Path) -> Fallible<MemoryCatalog> {
    let mut items = Vec::new();
    for file in catalog_files(directory)? {
        log::debug!("loading catalog {}", file.display());
        let text = read_to_string(&file)?;
        items.extend(parse_catalog(&text, &file)?);
    }
    MemoryCatalog::new(items)
}

#[cfg(test)]
mod tests {
    use std::fs::write;

    use super::*;
    use crate::helper::create_tmp_directory;
    use crate::store::Catalog;
    use crate::types::item::AdjectiveType;
    use crate::types::item::Classification;
    use crate::types::item::VerbGroup;

    #[test]
    fn test_parse_catalog() -> Fallible<()> {
        let text = r#"
            [[verb]]
            id = 1
            kana = "よむ"
            kanji = "読む"
            group = "godan"
            meaning = "to read"

            [[verb]]
            id = 2
            kana = "たべる"

            [[adjective]]
            id = 3
            kana = "きれい"
            type = "na"
        "#;
        let items = parse_catalog(text, Path::new("words.toml"))?;
        assert_eq!(items.len(), 3);
        assert_eq!(items[0].primary(), "読む");
        assert_eq!(items[0].subtype, Some(Classification::Verb(VerbGroup::GroupI)));
        assert_eq!(items[1].subtype, None);
        assert_eq!(items[1].classification(), Classification::Verb(VerbGroup::GroupII));
        assert_eq!(
            items[2].subtype,
            Some(Classification::Adjective(AdjectiveType::NaType))
        );
        Ok(())
    }

    #[test]
    fn test_parse_set_expression() -> Fallible<()> {
        let text = r#"
            [[verb]]
            id = 1
            kana = "きをつける"
            kanji = "気を付ける"
            particle = "を"

            [[adjective]]
            id = 2
            kana = "さわがしい"
            kanji = "騒がしい"
            particle = " "
        "#;
        let items = parse_catalog(text, Path::new("words.toml"))?;
        assert_eq!(items[0].particle.as_deref(), Some("を"));
        assert_eq!(items[1].particle, None);
        Ok(())
    }

    #[test]
    fn test_unknown_class_is_rejected() {
        let text = r#"
            [[verb]]
            id = 1
            kana = "よむ"
            group = "fifth"
        "#;
        assert!(parse_catalog(text, Path::new("bad.toml")).is_err());
    }

    #[test]
    fn test_load_catalog_skips_config() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        write(
            dir.join("verbs.toml"),
            "[[verb]]\nid = 1\nkana = \"よむ\"\n",
        )?;
        write(
            dir.join("adjectives.toml"),
            "[[adjective]]\nid = 2\nkana = \"たかい\"\n",
        )?;
        write(dir.join(CONFIG_FILE), "[preferences]\ndue_only = true\n")?;
        write(dir.join("notes.md"), "not a catalog")?;
        let catalog = load_catalog(&dir)?;
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.items(Category::Adjective)?.len(), 1);
        Ok(())
    }

    #[test]
    fn test_duplicate_ids_across_files() -> Fallible<()> {
        let dir = create_tmp_directory()?;
        write(dir.join("a.toml"), "[[verb]]\nid = 1\nkana = \"よむ\"\n")?;
        write(dir.join("b.toml"), "[[verb]]\nid = 1\nkana = \"かく\"\n")?;
        assert!(load_catalog(&dir).is_err());
        Ok(())
    }
}
