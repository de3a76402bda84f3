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

//! The conjugation engine.
//!
//! Everything here is pure and total: a base that doesn't fit the requested
//! form comes back unchanged instead of failing.

pub mod adjective;
pub mod classify;
pub mod tables;
pub mod verb;

use crate::conjugation::classify::infer_category;
use crate::conjugation::classify::infer_classification;
use crate::types::form::Form;
use crate::types::item::Category;
use crate::types::item::Classification;
use crate::types::item::LexicalItem;
use crate::types::item::normalize_classification;

/// A conjugated surface form and the rule that produced it.
#[derive(Clone, Debug, PartialEq)]
pub struct Inflection {
    pub surface: String,
    pub rule: Rule,
}

/// How a surface form was built. Used to explain answers.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Rule {
    /// A whole-word exception (する, くる, いく, ある, いい).
    Irregular { base: &'static str },
    /// Group I: the final mora moves to another column, then a suffix.
    Shift {
        from: char,
        to: char,
        suffix: &'static str,
    },
    /// Group I te/ta sound change.
    SoundChange { from: char, ending: &'static str },
    /// Drop the final kana and append a suffix.
    Drop { dropped: char, suffix: &'static str },
    /// Append to the stem.
    Append { suffix: &'static str },
    /// Built from another form by swapping its ending.
    Derived {
        from: Form,
        replace: &'static str,
        with: &'static str,
    },
}

impl Rule {
    pub fn describe(&self) -> String {
        match self {
            Rule::Irregular { base } => format!("{base} is irregular here, so this form is memorized"),
            Rule::Shift { from, to, suffix } if suffix.is_empty() => {
                format!("final {from} shifts to {to}")
            }
            Rule::Shift { from, to, suffix } => {
                format!("final {from} shifts to {to} and takes {suffix}")
            }
            Rule::SoundChange { from, ending } => format!("final {from} becomes {ending}"),
            Rule::Drop { dropped, suffix } => format!("drop {dropped} and add {suffix}"),
            Rule::Append { suffix } if suffix.is_empty() => "the dictionary form is used as is".to_string(),
            Rule::Append { suffix } => format!("add {suffix} to the stem"),
            Rule::Derived { from, replace, with } if replace.is_empty() => {
                format!("take the {} and add {with}", from.label())
            }
            Rule::Derived { from, replace, with } => {
                format!("take the {} and replace {replace} with {with}", from.label())
            }
        }
    }
}

/// Conjugate `base` into `form`. A missing classification is inferred from
/// the spelling. Forms the base can't take return the base unchanged.
pub fn conjugate(base: &str, classification: Option<Classification>, form: Form) -> String {
    let base = base.trim();
    match inflect(base, classification, form) {
        Some(inflection) => inflection.surface,
        None => {
            log::warn!("no {form} form for '{base}', returning it unchanged");
            base.to_string()
        }
    }
}

pub fn inflect(base: &str, classification: Option<Classification>, form: Form) -> Option<Inflection> {
    let base = base.trim();
    let classification = classification
        .unwrap_or_else(|| infer_classification(infer_category(base, form), base));
    match classification {
        Classification::Verb(group) => verb::inflect(base, group, form),
        Classification::Adjective(kind) => adjective::inflect(base, kind, form),
    }
}

/// The canonical answer for an item: its primary spelling conjugated.
pub fn conjugate_item(item: &LexicalItem, form: Form) -> String {
    conjugate(item.primary(), Some(item.classification()), form)
}

/// String-level entry point. The classification goes through the synonym
/// normalizer (blank means infer), and an unknown form name returns the
/// base unchanged.
pub fn conjugate_named(base: &str, category: Category, classification: &str, form: &str) -> String {
    let classification = normalize_classification(category, classification)
        .unwrap_or_else(|| infer_classification(category, base.trim()));
    match form.parse::<Form>() {
        Ok(form) => conjugate(base, Some(classification), form),
        Err(e) => {
            log::warn!("{e}, returning '{base}' unchanged");
            base.trim().to_string()
        }
    }
}

/// A one-sentence account of how the item reaches `form`.
pub fn explain(item: &LexicalItem, form: Form) -> String {
    let classification = item.classification();
    let base = item.primary();
    match inflect(base, Some(classification), form) {
        Some(inflection) => format!(
            "{base} is {} {}. For the {}, {}: {}.",
            article(classification.describe()),
            classification.describe(),
            form.label(),
            inflection.rule.describe(),
            inflection.surface
        ),
        None => format!("{base} has no {}, so it stays {base}.", form.label()),
    }
}

fn article(noun: &str) -> &'static str {
    match noun.chars().next() {
        Some('a' | 'e' | 'i' | 'o' | 'u') => "an",
        _ => "a",
    }
}

/// The word that inflects at the end of a set expression: whatever follows
/// the last space, or else whatever follows the declared particle
/// (気を付ける with を gives 付ける). Single words have no segment, however
/// their kana happen to read.
pub fn trailing_segment<'a>(spelling: &'a str, particle: Option<&str>) -> Option<&'a str> {
    let spelling = spelling.trim();
    if let Some((_, tail)) = spelling.rsplit_once(char::is_whitespace) {
        if !tail.is_empty() {
            return Some(tail);
        }
    }
    let particle = particle.map(str::trim).filter(|particle| !particle.is_empty())?;
    spelling
        .match_indices(particle)
        .filter(|(at, _)| *at > 0)
        .map(|(at, _)| &spelling[at + particle.len()..])
        .find(|tail| !tail.is_empty())
}

/// Swap the ending of an already-inflected form.
pub(crate) fn derive(
    inner: Inflection,
    from: Form,
    replace: &'static str,
    with: &'static str,
) -> Option<Inflection> {
    let stem = inner.surface.strip_suffix(replace)?;
    Some(Inflection {
        surface: format!("{stem}{with}"),
        rule: Rule::Derived {
            from,
            replace,
            with,
        },
    })
}

/// Split off the final character (one mora for the kana we handle).
pub(crate) fn split_last(base: &str) -> Option<(&str, char)> {
    let last = base.chars().last()?;
    Some((&base[..base.len() - last.len_utf8()], last))
}
