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

//! Terminal drill session: ask, read, grade, repeat.

use std::io::BufRead;
use std::io::Write;
use std::io::stdin;
use std::io::stdout;

use crate::cmd::next::render_question;
use crate::cmd::submit::render_outcome;
use crate::collection::Collection;
use crate::error::Fallible;
use crate::rng::TinyRng;
use crate::selector::NextQuestion;
use crate::selector::QuestionRequest;
use crate::srs::Feedback;
use crate::store::Catalog;
use crate::store::ReviewStore;
use crate::trainer::Response;
use crate::trainer::Submission;
use crate::trainer::Trainer;
use crate::types::form::Form;
use crate::types::item::Category;
use crate::types::record::PracticeMode;
use crate::types::timestamp::Timestamp;
use crate::utils::clock_rng;

/// Typing this instead of an answer ends the session.
const QUIT: &str = ":q";

pub struct DrillConfig {
    pub directory: Option<String>,
    pub user: String,
    pub category: Category,
    pub mode: PracticeMode,
    pub forms: Vec<Form>,
    /// Stop after this many questions.
    pub limit: Option<usize>,
}

#[derive(Debug, Default, PartialEq)]
pub struct DrillSummary {
    pub answered: usize,
    pub correct: usize,
}

pub fn start_drill(config: DrillConfig) -> Fallible<()> {
    let (mut trainer, settings) = Collection::new(config.directory)?.into_trainer();
    let request = QuestionRequest {
        preferences: settings.preferences_for(&config.user),
        user: config.user,
        category: config.category,
        mode: config.mode,
        forms: config.forms,
    };
    let mut input = stdin().lock();
    let mut output = stdout().lock();
    run_drill(
        &mut trainer,
        &request,
        config.limit,
        &mut input,
        &mut output,
        &mut clock_rng(),
        Timestamp::now,
    )?;
    Ok(())
}

pub fn run_drill<C: Catalog, S: ReviewStore>(
    trainer: &mut Trainer<C, S>,
    request: &QuestionRequest,
    limit: Option<usize>,
    input: &mut impl BufRead,
    output: &mut impl Write,
    rng: &mut TinyRng,
    mut clock: impl FnMut() -> Timestamp,
) -> Fallible<DrillSummary> {
    let mut summary = DrillSummary::default();
    while limit.is_none_or(|limit| summary.answered < limit) {
        let next = trainer.get_next_question(request, clock(), rng)?;
        write!(output, "{}", render_question(&next))?;
        let NextQuestion::Question(question) = next else {
            break;
        };
        let response = match request.mode {
            PracticeMode::Quiz => {
                let Some(answer) = prompt(input, output, "> ")? else {
                    break;
                };
                Response::Answer(answer)
            }
            PracticeMode::Flashcard => {
                if prompt(input, output, "(enter to reveal) ")?.is_none() {
                    break;
                }
                writeln!(output, "  {}", question.canonical_answer)?;
                let Some(feedback) = ask_feedback(input, output)? else {
                    break;
                };
                Response::Feedback(feedback)
            }
        };
        let submission = Submission {
            user: request.user.clone(),
            category: request.category,
            item_id: question.item.id,
            form: question.form,
            mode: request.mode,
            response,
        };
        let outcome = trainer.submit_answer(&submission, clock())?;
        writeln!(output, "{}", render_outcome(&outcome))?;
        summary.answered += 1;
        if outcome.correct {
            summary.correct += 1;
        }
    }
    writeln!(
        output,
        "Reviewed {}, {} correct.",
        summary.answered, summary.correct
    )?;
    Ok(summary)
}

/// Read one line. `None` on end of input or the quit command.
fn prompt(
    input: &mut impl BufRead,
    output: &mut impl Write,
    text: &str,
) -> Fallible<Option<String>> {
    write!(output, "{text}")?;
    output.flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    let line = line.trim();
    if line == QUIT {
        return Ok(None);
    }
    Ok(Some(line.to_string()))
}

fn ask_feedback(input: &mut impl BufRead, output: &mut impl Write) -> Fallible<Option<Feedback>> {
    loop {
        let Some(line) = prompt(input, output, "again/hard/good/easy > ")? else {
            return Ok(None);
        };
        match Feedback::try_from(line.as_str()) {
            Ok(feedback) => return Ok(Some(feedback)),
            Err(e) => writeln!(output, "{}", e.message())?,
        }
    }
}
