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
use crate::error::Fallible;
use crate::selector::NextQuestion;
use crate::selector::QuestionRequest;
use crate::types::form::Form;
use crate::types::item::Category;
use crate::types::record::PracticeMode;
use crate::types::timestamp::Timestamp;
use crate::utils::clock_rng;
use crate::utils::to_json;

pub struct NextConfig {
    pub directory: Option<String>,
    pub user: String,
    pub category: Category,
    pub mode: PracticeMode,
    pub forms: Vec<Form>,
    pub json: bool,
}

/// Pick the next question and print it.
pub fn next_question(config: NextConfig) -> Fallible<()> {
    let (mut trainer, settings) = Collection::new(config.directory)?.into_trainer();
    let request = QuestionRequest {
        preferences: settings.preferences_for(&config.user),
        user: config.user,
        category: config.category,
        mode: config.mode,
        forms: config.forms,
    };
    let next = trainer.get_next_question(&request, Timestamp::now(), &mut clock_rng())?;
    if config.json {
        println!("{}", to_json(&next)?);
    } else {
        print!("{}", render_question(&next));
    }
    Ok(())
}

pub fn render_question(next: &NextQuestion) -> String {
    match next {
        NextQuestion::NoItemsAvailable => "Nothing to review right now.\n".to_string(),
        NextQuestion::Question(question) => {
            let item = &question.item;
            let mut text = format!("[{}] {}", item.id, item.primary());
            if let Some(alternate) = item.alternate() {
                text.push_str(&format!(" ({alternate})"));
            }
            if !item.meaning.is_empty() {
                text.push_str(&format!(": {}", item.meaning));
            }
            text.push('\n');
            text.push_str(&format!("  give the {}", question.form.label()));
            if question.is_new {
                text.push_str(" [new]");
            }
            text.push('\n');
            text
        }
    }
}
