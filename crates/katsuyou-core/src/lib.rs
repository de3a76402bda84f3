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

//! katsuyou-core: the storage-free half of katsuyou.
//!
//! - A conjugation engine for Japanese verbs and adjectives
//! - A streak-based spaced repetition scheduler
//! - Review selection and answer validation over storage traits
//!
//! Nothing here reads the clock unless the `clock` feature is enabled;
//! every operation takes "now" as a parameter.

pub mod conjugation;
pub mod error;
pub mod policy;
pub mod rng;
pub mod selector;
pub mod srs;
pub mod store;
pub mod trainer;
pub mod types;
pub mod validator;

// Re-exports for convenience
pub use conjugation::{conjugate, conjugate_item, conjugate_named, explain};
pub use error::{ErrorKind, ErrorReport, Fallible, fail};
pub use policy::{CandidateQuery, Preferences};
pub use rng::TinyRng;
pub use selector::{NextQuestion, Question, QuestionRequest};
pub use srs::{Feedback, SrsState, next_state};
pub use store::{Catalog, MemoryCatalog, MemoryStore, ReviewStore};
pub use trainer::{Response, SubmitOutcome, Submission, Trainer};
pub use types::form::Form;
pub use types::item::{AdjectiveType, Category, Classification, ItemId, LexicalItem, VerbGroup};
pub use types::record::{PracticeMode, ReviewKey, ReviewRecord};
pub use types::timestamp::Timestamp;
pub use validator::{accepted_answers, validate};
