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

use wana_kana::ConvertJapanese;
use wana_kana::IsJapaneseStr;

use crate::conjugation::conjugate;
use crate::conjugation::trailing_segment;
use crate::srs::Feedback;
use crate::types::form::Form;
use crate::types::item::LexicalItem;
use crate::types::record::PracticeMode;

/// Trim, and fold an all-katakana answer to hiragana.
pub fn normalize_answer(answer: &str) -> String {
    let answer = answer.trim();
    if !answer.is_empty() && answer.is_katakana() {
        answer.to_hiragana()
    } else {
        answer.to_string()
    }
}

/// Every rendering a quiz accepts, canonical first, without duplicates.
pub fn accepted_answers(item: &LexicalItem, form: Form) -> Vec<String> {
    let classification = Some(item.classification());
    let mut spellings: Vec<&str> = vec![item.primary()];
    if let Some(alternate) = item.alternate() {
        spellings.push(alternate);
    }
    let segments: Vec<&str> = spellings
        .iter()
        .filter_map(|spelling| trailing_segment(spelling, item.particle.as_deref()))
        .collect();
    spellings.extend(segments);

    let mut answers: Vec<String> = Vec::new();
    for spelling in spellings {
        let answer = conjugate(spelling, classification, form);
        if !answers.contains(&answer) {
            answers.push(answer);
        }
    }
    answers
}

/// Whether a response counts as correct. Flashcards trust the learner's
/// own feedback; quizzes compare the typed answer.
pub fn validate(
    mode: PracticeMode,
    feedback: Option<Feedback>,
    answer: &str,
    item: &LexicalItem,
    form: Form,
) -> bool {
    match mode {
        PracticeMode::Flashcard => feedback.is_some_and(|feedback| feedback.is_success()),
        PracticeMode::Quiz => {
            let answer = normalize_answer(answer);
            if answer.is_empty() {
                return false;
            }
            accepted_answers(item, form)
                .iter()
                .any(|accepted| normalize_answer(accepted) == answer)
        }
    }
}
