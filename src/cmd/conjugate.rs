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

use crate::conjugation::conjugate;
use crate::conjugation::conjugate_named;
use crate::conjugation::classify::infer_classification;
use crate::error::Fallible;
use crate::error::fail;
use crate::types::item::Category;
use crate::types::item::normalize_classification;

/// Print one form of a word, or every form its category has.
pub fn conjugate_word(
    word: String,
    category: Category,
    class: Option<String>,
    form: Option<String>,
) -> Fallible<()> {
    if word.trim().is_empty() {
        return fail("nothing to conjugate.");
    }
    let class = class.unwrap_or_default();
    match form {
        Some(form) => println!("{}", conjugate_named(&word, category, &class, &form)),
        None => print!("{}", conjugation_table(&word, category, &class)),
    }
    Ok(())
}

/// One line per form: name, then surface.
pub fn conjugation_table(word: &str, category: Category, class: &str) -> String {
    let classification = normalize_classification(category, class)
        .unwrap_or_else(|| infer_classification(category, word.trim()));
    let mut table = format!("{} ({})\n", word.trim(), classification.describe());
    let width = category
        .forms()
        .iter()
        .map(|form| form.as_str().len())
        .max()
        .unwrap_or(0);
    for form in category.forms() {
        let surface = conjugate(word, Some(classification), *form);
        table.push_str(&format!("  {:width$}  {surface}\n", form.as_str()));
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table() {
        let table = conjugation_table("よむ", Category::Verb, "");
        assert!(table.starts_with("よむ (Group I (godan) verb)\n"));
        assert!(table.contains("  ta  "));
        assert!(table.contains("よんだ\n"));
        assert!(table.contains("よみませんでした\n"));
    }

    #[test]
    fn test_adjective_table() {
        let table = conjugation_table("きれい", Category::Adjective, "na");
        assert!(table.contains("きれいじゃなかった\n"));
        assert!(!table.contains("きれいくない"));
    }

    #[test]
    fn test_empty_word() {
        assert!(conjugate_word(" ".to_string(), Category::Verb, None, None).is_err());
    }
}
