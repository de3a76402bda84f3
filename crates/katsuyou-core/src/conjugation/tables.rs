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

//! Static lookup tables. Rules read these instead of branching on kana.

use crate::types::form::Form;

/// One row of the gojūon table, keyed by its u-column kana.
pub struct Row {
    pub u: char,
    pub a: char,
    pub i: char,
    pub e: char,
    pub o: char,
}

/// Rows a Group I verb can end in. The う row shifts to わ in the
/// a-column (かう → かわない).
pub static GODAN_ROWS: [Row; 9] = [
    Row { u: 'う', a: 'わ', i: 'い', e: 'え', o: 'お' },
    Row { u: 'く', a: 'か', i: 'き', e: 'け', o: 'こ' },
    Row { u: 'ぐ', a: 'が', i: 'ぎ', e: 'げ', o: 'ご' },
    Row { u: 'す', a: 'さ', i: 'し', e: 'せ', o: 'そ' },
    Row { u: 'つ', a: 'た', i: 'ち', e: 'て', o: 'と' },
    Row { u: 'ぬ', a: 'な', i: 'に', e: 'ね', o: 'の' },
    Row { u: 'ぶ', a: 'ば', i: 'び', e: 'べ', o: 'ぼ' },
    Row { u: 'む', a: 'ま', i: 'み', e: 'め', o: 'も' },
    Row { u: 'る', a: 'ら', i: 'り', e: 'れ', o: 'ろ' },
];

pub fn godan_row(last: char) -> Option<&'static Row> {
    GODAN_ROWS.iter().find(|row| row.u == last)
}

/// Sound changes for the te and ta forms of Group I verbs:
/// (final mora, te ending, ta ending).
pub static ONBIN: [(char, &str, &str); 9] = [
    ('く', "いて", "いた"),
    ('ぐ', "いで", "いだ"),
    ('す', "して", "した"),
    ('つ', "って", "った"),
    ('う', "って", "った"),
    ('る', "って", "った"),
    ('ぬ', "んで", "んだ"),
    ('ぶ', "んで", "んだ"),
    ('む', "んで", "んだ"),
];

pub fn onbin(last: char) -> Option<(&'static str, &'static str)> {
    ONBIN
        .iter()
        .find(|(mora, _, _)| *mora == last)
        .map(|(_, te, ta)| (*te, *ta))
}

/// Kana in the i- and e-columns. A final る after one of these marks a
/// Group II verb.
pub const I_AND_E_COLUMNS: &str = "いきぎしじちぢにひびぴみりえけげせぜてでねへべぺめれ";

/// Suffixes appended to a Group II stem (the verb minus る).
pub fn ichidan_suffix(form: Form) -> Option<&'static str> {
    match form {
        Form::Masu => Some("ます"),
        Form::Te => Some("て"),
        Form::Nai => Some("ない"),
        Form::Ta => Some("た"),
        Form::Potential => Some("られる"),
        Form::Volitional => Some("よう"),
        Form::Imperative => Some("ろ"),
        _ => None,
    }
}

/// Whole-word conjugations of する and くる, in the order of
/// `Category::Verb.default_forms()`. Compounds (勉強する, 持ってくる) keep
/// their prefix and conjugate the tail through this table.
pub static IRREGULAR_VERBS: [(&str, [&str; 7]); 3] = [
    (
        "する",
        ["します", "して", "しない", "した", "できる", "しよう", "しろ"],
    ),
    (
        "くる",
        ["きます", "きて", "こない", "きた", "こられる", "こよう", "こい"],
    ),
    (
        "来る",
        ["来ます", "来て", "来ない", "来た", "来られる", "来よう", "来い"],
    ),
];

pub fn irregular_slot(form: Form) -> Option<usize> {
    match form {
        Form::Masu => Some(0),
        Form::Te => Some(1),
        Form::Nai => Some(2),
        Form::Ta => Some(3),
        Form::Potential => Some(4),
        Form::Volitional => Some(5),
        Form::Imperative => Some(6),
        _ => None,
    }
}

/// Find the irregular verb a base is or ends with, returning the prefix, the
/// verb it ends with, and its table row. A kana くる only counts as a compound after て/で, since
/// おくる and つくる are ordinary Group I verbs.
pub fn irregular_verb(base: &str) -> Option<(&str, &'static str, &'static [&'static str; 7])> {
    IRREGULAR_VERBS.iter().find_map(|(verb, surfaces)| {
        let prefix = base.strip_suffix(*verb)?;
        if *verb == "くる" && !prefix.is_empty() && !ends_with_te(prefix) {
            return None;
        }
        Some((prefix, *verb, surfaces))
    })
}

/// Whether a prefix ends in the te-form connective.
pub fn ends_with_te(prefix: &str) -> bool {
    prefix.ends_with('て') || prefix.ends_with('で')
}

/// Group I verbs whose te and ta forms break the sound-change table:
/// (base, te ending, ta ending). Matched as a suffix after て/で or as the
/// whole word, so 持っていく is covered.
pub static GODAN_TE_EXCEPTIONS: [(&str, &str, &str); 2] = [
    ("いく", "いって", "いった"),
    ("行く", "行って", "行った"),
];

/// Group I verbs with a suppletive plain negative.
pub static GODAN_NAI_EXCEPTIONS: [(&str, &str); 2] = [("ある", "ない"), ("有る", "無い")];

/// Suffixes appended to an i-adjective stem (the adjective minus い).
pub fn i_adjective_suffix(form: Form) -> Option<&'static str> {
    match form {
        Form::Negative => Some("くない"),
        Form::Past => Some("かった"),
        Form::PastNegative => Some("くなかった"),
        Form::Adverb => Some("く"),
        Form::Te => Some("くて"),
        _ => None,
    }
}

/// Suffixes appended to a na-adjective stem (the adjective minus its
/// copula).
pub fn na_adjective_suffix(form: Form) -> Option<&'static str> {
    match form {
        Form::Negative => Some("じゃない"),
        Form::Past => Some("だった"),
        Form::PastNegative => Some("じゃなかった"),
        Form::Adverb => Some("に"),
        Form::Te => Some("で"),
        Form::Rentai => Some("な"),
        _ => None,
    }
}

/// Spellings of "good" whose stem changes from い to よ. Matched as the
/// whole word or as a suffix (かっこいい, 頭がいい).
pub const GOOD_ADJECTIVE: &str = "いい";
pub static GOOD_ADJECTIVE_COMPOUNDS: [&str; 3] = ["っこいい", "がいい", "のいい"];

pub const COPULAS: [char; 2] = ['だ', 'な'];
