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

use crate::conjugation::Inflection;
use crate::conjugation::Rule;
use crate::conjugation::derive;
use crate::conjugation::tables::COPULAS;
use crate::conjugation::tables::GOOD_ADJECTIVE;
use crate::conjugation::tables::GOOD_ADJECTIVE_COMPOUNDS;
use crate::conjugation::tables::i_adjective_suffix;
use crate::conjugation::tables::na_adjective_suffix;
use crate::types::form::Form;
use crate::types::item::AdjectiveType;

pub fn inflect(base: &str, kind: AdjectiveType, form: Form) -> Option<Inflection> {
    match (kind, form) {
        (_, Form::PoliteNegative) => derive(inflect(base, kind, Form::Negative)?, Form::Negative, "", "です"),
        (AdjectiveType::IType, Form::Polite) => Some(append(base, "です")),
        (AdjectiveType::IType, Form::PolitePast) => {
            derive(inflect(base, kind, Form::Past)?, Form::Past, "", "です")
        }
        (AdjectiveType::IType, Form::Rentai) => Some(append(base, "")),
        (AdjectiveType::IType, _) => i_type(base, form),
        (AdjectiveType::NaType, Form::Polite) => Some(append(na_stem(base), "です")),
        (AdjectiveType::NaType, Form::PolitePast) => {
            derive(inflect(base, kind, Form::Past)?, Form::Past, "だった", "でした")
        }
        (AdjectiveType::NaType, _) => {
            let suffix = na_adjective_suffix(form)?;
            Some(append(na_stem(base), suffix))
        }
    }
}

fn i_type(base: &str, form: Form) -> Option<Inflection> {
    let suffix = i_adjective_suffix(form)?;
    if let Some(prefix) = good_prefix(base) {
        return Some(Inflection {
            surface: format!("{prefix}よ{suffix}"),
            rule: Rule::Irregular {
                base: GOOD_ADJECTIVE,
            },
        });
    }
    let stem = base.strip_suffix('い')?;
    Some(Inflection {
        surface: format!("{stem}{suffix}"),
        rule: Rule::Drop {
            dropped: 'い',
            suffix,
        },
    })
}

/// For spellings of いい, everything before the い that becomes よ.
fn good_prefix(base: &str) -> Option<&str> {
    let matches = base == GOOD_ADJECTIVE
        || GOOD_ADJECTIVE_COMPOUNDS
            .iter()
            .any(|compound| base.ends_with(compound));
    if matches {
        base.strip_suffix(GOOD_ADJECTIVE)
    } else {
        None
    }
}

/// A na-adjective without its trailing だ or な, if the catalog spelled it
/// with one.
pub fn na_stem(base: &str) -> &str {
    base.strip_suffix(COPULAS).unwrap_or(base)
}

fn append(stem: &str, suffix: &'static str) -> Inflection {
    Inflection {
        surface: format!("{stem}{suffix}"),
        rule: Rule::Append { suffix },
    }
}
