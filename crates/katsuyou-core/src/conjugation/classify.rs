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

//! Classification inference from orthography, used when the catalog does
//! not declare a subtype.

use crate::conjugation::tables::I_AND_E_COLUMNS;
use crate::conjugation::tables::godan_row;
use crate::conjugation::tables::irregular_verb;
use crate::types::form::Form;
use crate::types::item::AdjectiveType;
use crate::types::item::Category;
use crate::types::item::Classification;
use crate::types::item::VerbGroup;

pub fn infer_classification(category: Category, base: &str) -> Classification {
    match category {
        Category::Verb => Classification::Verb(infer_verb_group(base)),
        Category::Adjective => Classification::Adjective(infer_adjective_type(base)),
    }
}

/// Irregular bases and compounds first, then the mora before a final る.
/// Anything else is Group I. This misfiles Group I verbs like かえる, which
/// is why the catalog may declare a group explicitly.
pub fn infer_verb_group(base: &str) -> VerbGroup {
    let base = base.trim();
    if irregular_verb(base).is_some() {
        return VerbGroup::Irregular;
    }
    let mut chars = base.chars().rev();
    match (chars.next(), chars.next()) {
        (Some('る'), Some(before)) if I_AND_E_COLUMNS.contains(before) => VerbGroup::GroupII,
        _ => VerbGroup::GroupI,
    }
}

/// A final い means i-adjective. Na-adjectives like きれい must be declared.
pub fn infer_adjective_type(base: &str) -> AdjectiveType {
    if base.trim().ends_with('い') {
        AdjectiveType::IType
    } else {
        AdjectiveType::NaType
    }
}

/// Guess the category of an unclassified base. Forms that only one
/// category has decide it; for shared forms (te) a final u-column kana
/// means verb.
pub fn infer_category(base: &str, form: Form) -> Category {
    let verb = form.applies_to(Category::Verb);
    let adjective = form.applies_to(Category::Adjective);
    match (verb, adjective) {
        (true, false) => Category::Verb,
        (false, true) => Category::Adjective,
        _ => match base.trim().chars().last() {
            Some(last) if godan_row(last).is_some() => Category::Verb,
            _ => Category::Adjective,
        },
    }
}
