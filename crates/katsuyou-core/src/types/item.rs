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

use crate::conjugation::classify::infer_classification;
use crate::error::ErrorReport;

pub type ItemId = i64;

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Verb,
    Adjective,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Verb => "verb",
            Category::Adjective => "adjective",
        }
    }
}

impl Display for Category {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ErrorReport;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "verb" | "verbs" | "v" => Ok(Category::Verb),
            "adjective" | "adjectives" | "adj" | "a" => Ok(Category::Adjective),
            _ => Err(ErrorReport::new(format!("invalid category: '{s}'"))),
        }
    }
}

/// Verb inflection class.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum VerbGroup {
    /// 五段: the final mora shifts along its row.
    GroupI,
    /// 一段: the final る drops.
    GroupII,
    /// する, くる and their compounds.
    Irregular,
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum AdjectiveType {
    IType,
    NaType,
}

/// The subtype of a lexical item. Every conjugation rule branches on this.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Classification {
    Verb(VerbGroup),
    Adjective(AdjectiveType),
}

impl Classification {
    pub fn category(&self) -> Category {
        match self {
            Classification::Verb(_) => Category::Verb,
            Classification::Adjective(_) => Category::Adjective,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Verb(VerbGroup::GroupI) => "group1",
            Classification::Verb(VerbGroup::GroupII) => "group2",
            Classification::Verb(VerbGroup::Irregular) => "irregular",
            Classification::Adjective(AdjectiveType::IType) => "i",
            Classification::Adjective(AdjectiveType::NaType) => "na",
        }
    }

    pub fn describe(&self) -> &'static str {
        match self {
            Classification::Verb(VerbGroup::GroupI) => "Group I (godan) verb",
            Classification::Verb(VerbGroup::GroupII) => "Group II (ichidan) verb",
            Classification::Verb(VerbGroup::Irregular) => "irregular verb",
            Classification::Adjective(AdjectiveType::IType) => "i-adjective",
            Classification::Adjective(AdjectiveType::NaType) => "na-adjective",
        }
    }
}

/// Map any textual spelling of a classification onto the closed set.
///
/// This is the only place classification strings are interpreted. Blank or
/// unrecognized input yields `None`, and callers fall back to inference.
pub fn normalize_classification(category: Category, raw: &str) -> Option<Classification> {
    let key: String = raw
        .trim()
        .to_lowercase()
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '_'))
        .collect();
    if key.is_empty() {
        return None;
    }
    match category {
        Category::Verb => {
            let group = match key.as_str() {
                "1" | "i" | "g1" | "group1" | "groupi" | "godan" | "u" | "uverb" | "五段" => {
                    VerbGroup::GroupI
                }
                "2" | "ii" | "g2" | "group2" | "groupii" | "ichidan" | "ru" | "ruverb"
                | "一段" => VerbGroup::GroupII,
                "3" | "iii" | "g3" | "group3" | "groupiii" | "irregular" | "irr" | "suru"
                | "kuru" | "不規則" => VerbGroup::Irregular,
                _ => return None,
            };
            Some(Classification::Verb(group))
        }
        Category::Adjective => {
            let kind = match key.as_str() {
                "i" | "iadj" | "iadjective" | "itype" | "keiyoushi" | "形容詞" => {
                    AdjectiveType::IType
                }
                "na" | "naadj" | "naadjective" | "natype" | "keiyoudoushi" | "形容動詞" => {
                    AdjectiveType::NaType
                }
                _ => return None,
            };
            Some(Classification::Adjective(kind))
        }
    }
}

/// A verb or adjective from the catalog. Read-only reference data.
#[derive(Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct LexicalItem {
    pub id: ItemId,
    pub kana: String,
    pub kanji: Option<String>,
    pub category: Category,
    /// Declared subtype. `None` means it is inferred from the spelling.
    pub subtype: Option<Classification>,
    /// Set expressions only: the particle between the fixed lead and the
    /// word that inflects, like を in 気を付ける.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub particle: Option<String>,
    pub meaning: String,
}

impl LexicalItem {
    /// The spelling canonical answers are rendered from: kanji-headed when
    /// the catalog has one, otherwise kana.
    pub fn primary(&self) -> &str {
        match &self.kanji {
            Some(kanji) if !kanji.trim().is_empty() => kanji.trim(),
            _ => self.kana.trim(),
        }
    }

    /// The other spelling, when the item has two.
    pub fn alternate(&self) -> Option<&str> {
        let primary = self.primary();
        let kana = self.kana.trim();
        if primary != kana && !kana.is_empty() {
            Some(kana)
        } else {
            None
        }
    }

    /// The declared subtype when it agrees with the category, otherwise the
    /// subtype inferred from the kana spelling.
    pub fn classification(&self) -> Classification {
        match self.subtype {
            Some(c) if c.category() == self.category => c,
            _ => infer_classification(self.category, &self.kana),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verb_synonyms() {
        let group_one = ["1", "godan", "group1", "Group I", "group_1", "u-verb"];
        for s in group_one {
            assert_eq!(
                normalize_classification(Category::Verb, s),
                Some(Classification::Verb(VerbGroup::GroupI)),
                "{s}"
            );
        }
        let group_two = ["2", "ichidan", "group2", "ru-verb"];
        for s in group_two {
            assert_eq!(
                normalize_classification(Category::Verb, s),
                Some(Classification::Verb(VerbGroup::GroupII)),
                "{s}"
            );
        }
        assert_eq!(
            normalize_classification(Category::Verb, "irregular"),
            Some(Classification::Verb(VerbGroup::Irregular))
        );
    }

    #[test]
    fn test_adjective_synonyms() {
        assert_eq!(
            normalize_classification(Category::Adjective, "i-adjective"),
            Some(Classification::Adjective(AdjectiveType::IType))
        );
        assert_eq!(
            normalize_classification(Category::Adjective, "NA"),
            Some(Classification::Adjective(AdjectiveType::NaType))
        );
    }

    #[test]
    fn test_blank_and_unknown() {
        assert_eq!(normalize_classification(Category::Verb, "  "), None);
        assert_eq!(normalize_classification(Category::Verb, "na"), None);
        assert_eq!(normalize_classification(Category::Adjective, "godan"), None);
    }

    #[test]
    fn test_primary_and_alternate() {
        let item = LexicalItem {
            id: 1,
            kana: "よむ".to_string(),
            kanji: Some("読む".to_string()),
            category: Category::Verb,
            subtype: None,
            meaning: "to read".to_string(),
            particle: None,
        };
        assert_eq!(item.primary(), "読む");
        assert_eq!(item.alternate(), Some("よむ"));

        let kana_only = LexicalItem {
            kanji: Some("".to_string()),
            ..item
        };
        assert_eq!(kana_only.primary(), "よむ");
        assert_eq!(kana_only.alternate(), None);
    }

    #[test]
    fn test_mismatched_subtype_is_inferred() {
        let item = LexicalItem {
            id: 2,
            kana: "たべる".to_string(),
            kanji: None,
            category: Category::Verb,
            subtype: Some(Classification::Adjective(AdjectiveType::IType)),
            meaning: "to eat".to_string(),
            particle: None,
        };
        assert_eq!(
            item.classification(),
            Classification::Verb(VerbGroup::GroupII)
        );
    }

    #[test]
    fn test_category_parse() {
        assert_eq!("Verb".parse::<Category>(), Ok(Category::Verb));
        assert_eq!("adj".parse::<Category>(), Ok(Category::Adjective));
        assert!("noun".parse::<Category>().is_err());
    }
}
