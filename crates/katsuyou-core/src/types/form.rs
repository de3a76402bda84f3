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

use crate::error::ErrorKind;
use crate::error::ErrorReport;
use crate::types::item::Category;

/// A grammatical target form.
///
/// Verb and adjective forms share one enum; `te` belongs to both. The
/// polite forms and the verb `past_negative` are derived: the engine builds
/// them from a base form instead of a rule table of their own.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Form {
    Masu,
    Te,
    Nai,
    Ta,
    Potential,
    Volitional,
    Imperative,
    Negative,
    Past,
    PastNegative,
    Adverb,
    Rentai,
    Polite,
    PoliteNegative,
    PolitePast,
    PolitePastNegative,
}

const VERB_DEFAULT: &[Form] = &[
    Form::Masu,
    Form::Te,
    Form::Nai,
    Form::Ta,
    Form::Potential,
    Form::Volitional,
    Form::Imperative,
];

const VERB_ALL: &[Form] = &[
    Form::Masu,
    Form::Te,
    Form::Nai,
    Form::Ta,
    Form::Potential,
    Form::Volitional,
    Form::Imperative,
    Form::PoliteNegative,
    Form::PolitePast,
    Form::PolitePastNegative,
    Form::PastNegative,
];

const ADJECTIVE_DEFAULT: &[Form] = &[
    Form::Negative,
    Form::Past,
    Form::PastNegative,
    Form::Adverb,
    Form::Te,
    Form::Rentai,
];

const ADJECTIVE_ALL: &[Form] = &[
    Form::Negative,
    Form::Past,
    Form::PastNegative,
    Form::Adverb,
    Form::Te,
    Form::Rentai,
    Form::Polite,
    Form::PoliteNegative,
    Form::PolitePast,
];

impl Category {
    /// The forms drilled when nothing narrower is configured.
    pub fn default_forms(&self) -> &'static [Form] {
        match self {
            Category::Verb => VERB_DEFAULT,
            Category::Adjective => ADJECTIVE_DEFAULT,
        }
    }

    /// Every form the engine can produce for this category.
    pub fn forms(&self) -> &'static [Form] {
        match self {
            Category::Verb => VERB_ALL,
            Category::Adjective => ADJECTIVE_ALL,
        }
    }
}

impl Form {
    pub const ALL: [Form; 16] = [
        Form::Masu,
        Form::Te,
        Form::Nai,
        Form::Ta,
        Form::Potential,
        Form::Volitional,
        Form::Imperative,
        Form::Negative,
        Form::Past,
        Form::PastNegative,
        Form::Adverb,
        Form::Rentai,
        Form::Polite,
        Form::PoliteNegative,
        Form::PolitePast,
        Form::PolitePastNegative,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Form::Masu => "masu",
            Form::Te => "te",
            Form::Nai => "nai",
            Form::Ta => "ta",
            Form::Potential => "potential",
            Form::Volitional => "volitional",
            Form::Imperative => "imperative",
            Form::Negative => "negative",
            Form::Past => "past",
            Form::PastNegative => "past_negative",
            Form::Adverb => "adverb",
            Form::Rentai => "rentai",
            Form::Polite => "polite",
            Form::PoliteNegative => "polite_negative",
            Form::PolitePast => "polite_past",
            Form::PolitePastNegative => "polite_past_negative",
        }
    }

    /// A prompt-friendly name.
    pub fn label(&self) -> &'static str {
        match self {
            Form::Masu => "polite (ます) form",
            Form::Te => "te-form",
            Form::Nai => "plain negative (ない) form",
            Form::Ta => "plain past (た) form",
            Form::Potential => "potential form",
            Form::Volitional => "volitional form",
            Form::Imperative => "imperative form",
            Form::Negative => "negative form",
            Form::Past => "past form",
            Form::PastNegative => "past negative form",
            Form::Adverb => "adverbial form",
            Form::Rentai => "attributive form",
            Form::Polite => "polite form",
            Form::PoliteNegative => "polite negative form",
            Form::PolitePast => "polite past form",
            Form::PolitePastNegative => "polite past negative form",
        }
    }

    pub fn applies_to(&self, category: Category) -> bool {
        category.forms().contains(self)
    }
}

impl Display for Form {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Form {
    type Err = ErrorReport;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_lowercase().replace(['-', ' '], "_");
        Form::ALL
            .into_iter()
            .find(|form| form.as_str() == key)
            .ok_or_else(|| ErrorReport::with_kind(ErrorKind::UnknownForm, format!("unknown form: '{s}'")))
    }
}

/// Parse a comma-separated list of form names.
pub fn parse_form_list(s: &str) -> Result<Vec<Form>, ErrorReport> {
    s.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .map(Form::from_str)
        .collect()
}
