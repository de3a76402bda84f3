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

use clap::Parser;

use crate::cmd::check::check_collection;
use crate::cmd::conjugate::conjugate_word;
use crate::cmd::drill::DrillConfig;
use crate::cmd::drill::start_drill;
use crate::cmd::next::NextConfig;
use crate::cmd::next::next_question;
use crate::cmd::submit::SubmitConfig;
use crate::cmd::submit::parse_feedback;
use crate::cmd::submit::submit_answer;
use crate::error::Fallible;
use crate::srs::Feedback;
use crate::types::form::Form;
use crate::types::item::Category;
use crate::types::item::ItemId;
use crate::types::record::PracticeMode;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Conjugate a word without touching any collection.
    Conjugate {
        /// The dictionary form, in kana or kanji.
        word: String,
        /// Which form to produce. By default, every form is printed.
        #[arg(long)]
        form: Option<String>,
        /// Verb group or adjective type (godan, ichidan, irregular, i, na). Inferred when omitted.
        #[arg(long)]
        class: Option<String>,
        /// Treat the word as an adjective rather than a verb.
        #[arg(long)]
        adjective: bool,
    },
    /// Pick the next item and form to review.
    Next {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        /// Whose reviews to use.
        #[arg(long, default_value = "default")]
        user: String,
        #[arg(long, default_value_t = Category::Verb)]
        category: Category,
        #[arg(long, default_value_t = PracticeMode::Quiz)]
        mode: PracticeMode,
        /// Comma-separated forms to drill, overriding the configured ones.
        #[arg(long, value_delimiter = ',')]
        forms: Vec<Form>,
        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Submit an answer for an item and form.
    Submit {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        #[arg(long, default_value = "default")]
        user: String,
        #[arg(long, default_value_t = Category::Verb)]
        category: Category,
        /// The item id.
        #[arg(long)]
        item: ItemId,
        #[arg(long)]
        form: Form,
        #[arg(long, default_value_t = PracticeMode::Quiz)]
        mode: PracticeMode,
        /// The typed answer, for quizzes.
        #[arg(long)]
        answer: Option<String>,
        /// Self-graded recall (again, hard, good, easy), for flashcards.
        #[arg(long, value_parser = parse_feedback)]
        feedback: Option<Feedback>,
        /// Print JSON instead of text.
        #[arg(long)]
        json: bool,
    },
    /// Drill in the terminal until nothing is left or you type :q.
    Drill {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
        #[arg(long, default_value = "default")]
        user: String,
        #[arg(long, default_value_t = Category::Verb)]
        category: Category,
        #[arg(long, default_value_t = PracticeMode::Quiz)]
        mode: PracticeMode,
        /// Comma-separated forms to drill, overriding the configured ones.
        #[arg(long, value_delimiter = ',')]
        forms: Vec<Form>,
        /// Maximum number of questions in a session.
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Check the integrity of a collection.
    Check {
        /// Path to the collection directory. By default, the current working directory is used.
        directory: Option<String>,
    },
}

pub fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Conjugate {
            word,
            form,
            class,
            adjective,
        } => {
            let category = if adjective {
                Category::Adjective
            } else {
                Category::Verb
            };
            conjugate_word(word, category, class, form)
        }
        Command::Next {
            directory,
            user,
            category,
            mode,
            forms,
            json,
        } => next_question(NextConfig {
            directory,
            user,
            category,
            mode,
            forms,
            json,
        }),
        Command::Submit {
            directory,
            user,
            category,
            item,
            form,
            mode,
            answer,
            feedback,
            json,
        } => submit_answer(SubmitConfig {
            directory,
            user,
            category,
            item,
            form,
            mode,
            answer,
            feedback,
            json,
        }),
        Command::Drill {
            directory,
            user,
            category,
            mode,
            forms,
            limit,
        } => start_drill(DrillConfig {
            directory,
            user,
            category,
            mode,
            forms,
            limit,
        }),
        Command::Check { directory } => check_collection(directory),
    }
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_cli_is_well_formed() {
        Command::command().debug_assert();
    }

    #[test]
    fn test_parse_next() {
        let cli = Command::try_parse_from([
            "katsuyou", "next", "words", "--user", "alice", "--category", "adj", "--forms", "past,te",
        ]);
        match cli {
            Ok(Command::Next {
                directory,
                user,
                category,
                forms,
                ..
            }) => {
                assert_eq!(directory.as_deref(), Some("words"));
                assert_eq!(user, "alice");
                assert_eq!(category, Category::Adjective);
                assert_eq!(forms, vec![Form::Past, Form::Te]);
            }
            _ => panic!("expected the next command"),
        }
    }

    #[test]
    fn test_parse_submit_feedback() {
        let cli = Command::try_parse_from([
            "katsuyou", "submit", "--item", "3", "--form", "ta", "--mode", "flashcard", "--feedback", "forgot",
        ]);
        match cli {
            Ok(Command::Submit { item, mode, feedback, .. }) => {
                assert_eq!(item, 3);
                assert_eq!(mode, PracticeMode::Flashcard);
                assert_eq!(feedback, Some(Feedback::Again));
            }
            _ => panic!("expected the submit command"),
        }
    }

    #[test]
    fn test_rejects_unknown_form() {
        let cli = Command::try_parse_from(["katsuyou", "next", "--forms", "causative"]);
        assert!(cli.is_err());
    }
}
