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
use crate::conjugation::classify::infer_verb_group;
use crate::conjugation::derive;
use crate::conjugation::split_last;
use crate::conjugation::tables::GODAN_NAI_EXCEPTIONS;
use crate::conjugation::tables::GODAN_TE_EXCEPTIONS;
use crate::conjugation::tables::ends_with_te;
use crate::conjugation::tables::godan_row;
use crate::conjugation::tables::ichidan_suffix;
use crate::conjugation::tables::irregular_slot;
use crate::conjugation::tables::irregular_verb;
use crate::conjugation::tables::onbin;
use crate::types::form::Form;
use crate::types::item::VerbGroup;

/// Inflect a verb. `None` when the form is not a verb form or the base does
/// not fit its group's table.
pub fn inflect(base: &str, group: VerbGroup, form: Form) -> Option<Inflection> {
    match form {
        Form::PoliteNegative => derive(form_of(base, group, Form::Masu)?, Form::Masu, "ます", "ません"),
        Form::PolitePast => derive(form_of(base, group, Form::Masu)?, Form::Masu, "ます", "ました"),
        Form::PolitePastNegative => derive(
            form_of(base, group, Form::Masu)?,
            Form::Masu,
            "ます",
            "ませんでした",
        ),
        Form::PastNegative => derive(form_of(base, group, Form::Nai)?, Form::Nai, "い", "かった"),
        _ => form_of(base, group, form),
    }
}

fn form_of(base: &str, group: VerbGroup, form: Form) -> Option<Inflection> {
    match group {
        VerbGroup::GroupI => godan(base, form),
        VerbGroup::GroupII => ichidan(base, form),
        VerbGroup::Irregular => irregular(base, form).or_else(|| {
            // Declared irregular but not in the table: fall back to whatever
            // the ending suggests.
            match infer_verb_group(base) {
                VerbGroup::GroupII => ichidan(base, form),
                _ => godan(base, form),
            }
        }),
    }
}

fn irregular(base: &str, form: Form) -> Option<Inflection> {
    let (prefix, verb, surfaces) = irregular_verb(base)?;
    let slot = irregular_slot(form)?;
    Some(Inflection {
        surface: format!("{prefix}{}", surfaces[slot]),
        rule: Rule::Irregular { base: verb },
    })
}

fn godan(base: &str, form: Form) -> Option<Inflection> {
    if let Some(inflection) = godan_exception(base, form) {
        return Some(inflection);
    }
    let (stem, last) = split_last(base)?;
    let row = godan_row(last)?;
    let shift = |to: char, suffix: &'static str| Inflection {
        surface: format!("{stem}{to}{suffix}"),
        rule: Rule::Shift {
            from: last,
            to,
            suffix,
        },
    };
    let sound_change = |ending: &'static str| Inflection {
        surface: format!("{stem}{ending}"),
        rule: Rule::SoundChange { from: last, ending },
    };
    match form {
        Form::Masu => Some(shift(row.i, "ます")),
        Form::Nai => Some(shift(row.a, "ない")),
        Form::Potential => Some(shift(row.e, "る")),
        Form::Volitional => Some(shift(row.o, "う")),
        Form::Imperative => Some(shift(row.e, "")),
        Form::Te => onbin(last).map(|(te, _)| sound_change(te)),
        Form::Ta => onbin(last).map(|(_, ta)| sound_change(ta)),
        _ => None,
    }
}

fn godan_exception(base: &str, form: Form) -> Option<Inflection> {
    match form {
        Form::Te | Form::Ta => GODAN_TE_EXCEPTIONS.iter().find_map(|(verb, te, ta)| {
            let prefix = base.strip_suffix(*verb)?;
            // Kana いく only compounds after the te connective (もっていく).
            if *verb == "いく" && !prefix.is_empty() && !ends_with_te(prefix) {
                return None;
            }
            let ending = if form == Form::Te { *te } else { *ta };
            Some(Inflection {
                surface: format!("{prefix}{ending}"),
                rule: Rule::Irregular { base: *verb },
            })
        }),
        Form::Nai => GODAN_NAI_EXCEPTIONS
            .iter()
            .find(|(verb, _)| *verb == base)
            .map(|(verb, nai)| Inflection {
                surface: nai.to_string(),
                rule: Rule::Irregular { base: *verb },
            }),
        _ => None,
    }
}

fn ichidan(base: &str, form: Form) -> Option<Inflection> {
    let stem = base.strip_suffix('る')?;
    let suffix = ichidan_suffix(form)?;
    Some(Inflection {
        surface: format!("{stem}{suffix}"),
        rule: Rule::Drop {
            dropped: 'る',
            suffix,
        },
    })
}
