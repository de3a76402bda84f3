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
use crate::conjugation::inflect;
use crate::conjugation::trailing_segment;
use crate::error::Fallible;
use crate::error::fail;
use crate::store::Catalog;
use crate::store::MemoryCatalog;
use crate::types::item::Category;

/// Load the collection and make sure every item conjugates into every
/// form of its category.
pub fn check_collection(directory: Option<String>) -> Fallible<()> {
    let collection = Collection::new(directory)?;
    let problems = find_problems(&collection.catalog)?;
    for problem in problems.iter() {
        println!("{problem}");
    }
    if !problems.is_empty() {
        return fail(format!("{} problem(s) in {}.", problems.len(), collection.directory.display()));
    }
    println!(
        "{} verbs, {} adjectives, {} review records. All good.",
        collection.catalog.items(Category::Verb)?.len(),
        collection.catalog.items(Category::Adjective)?.len(),
        collection.db.count()?
    );
    Ok(())
}

pub fn find_problems(catalog: &MemoryCatalog) -> Fallible<Vec<String>> {
    let mut problems = Vec::new();
    for item in catalog.iter() {
        if let Some(subtype) = item.subtype {
            if subtype.category() != item.category {
                problems.push(format!(
                    "[{}] {}: declared {} but listed as a {}",
                    item.id,
                    item.primary(),
                    subtype.describe(),
                    item.category
                ));
            }
        }
        if let Some(particle) = &item.particle {
            let spellings = std::iter::once(item.primary()).chain(item.alternate());
            for spelling in spellings {
                if trailing_segment(spelling, Some(particle.as_str())).is_none() {
                    problems.push(format!(
                        "[{}] {spelling}: does not split at the particle {particle}",
                        item.id
                    ));
                }
            }
        }
        let classification = item.classification();
        for form in item.category.forms() {
            if inflect(item.primary(), Some(classification), *form).is_none() {
                problems.push(format!(
                    "[{}] {}: no {} ({})",
                    item.id,
                    item.primary(),
                    form.label(),
                    classification.describe()
                ));
            }
        }
    }
    Ok(problems)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::helper::create_tmp_collection;
    use crate::types::item::AdjectiveType;
    use crate::types::item::Classification;
    use crate::types::item::LexicalItem;
    use crate::types::item::VerbGroup;

    #[test]
    fn test_sample_collection_is_clean() -> Fallible<()> {
        let dir = create_tmp_collection()?;
        check_collection(Some(dir.display().to_string()))
    }

    #[test]
    fn test_reports_unconjugatable_items() -> Fallible<()> {
        let catalog = MemoryCatalog::new(vec![
            LexicalItem {
                id: 1,
                kana: "きれい".to_string(),
                kanji: None,
                category: Category::Verb,
                subtype: Some(Classification::Verb(VerbGroup::GroupII)),
                meaning: String::new(),
                particle: None,
            },
            LexicalItem {
                id: 2,
                kana: "たかい".to_string(),
                kanji: None,
                category: Category::Adjective,
                subtype: Some(Classification::Adjective(AdjectiveType::IType)),
                meaning: String::new(),
                particle: None,
            },
        ])?;
        let problems = find_problems(&catalog)?;
        assert!(!problems.is_empty());
        assert!(problems.iter().all(|p| p.starts_with("[1] きれい")));
        Ok(())
    }

    #[test]
    fn test_reports_misplaced_particle() -> Fallible<()> {
        let catalog = MemoryCatalog::new(vec![LexicalItem {
            id: 1,
            kana: "きをつける".to_string(),
            kanji: Some("気を付ける".to_string()),
            category: Category::Verb,
            subtype: None,
            particle: Some("に".to_string()),
            meaning: String::new(),
        }])?;
        let problems = find_problems(&catalog)?;
        assert_eq!(
            problems,
            vec![
                "[1] 気を付ける: does not split at the particle に".to_string(),
                "[1] きをつける: does not split at the particle に".to_string(),
            ]
        );
        Ok(())
    }
}
