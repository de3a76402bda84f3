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

use std::fs::write;
use std::path::PathBuf;

use tempfile::tempdir;

use crate::config::CONFIG_FILE;
use crate::error::Fallible;

pub const SAMPLE_VERBS: &str = r#"
[[verb]]
id = 1
kana = "よむ"
kanji = "読む"
group = "godan"
meaning = "to read"

[[verb]]
id = 2
kana = "たべる"
kanji = "食べる"
group = "ichidan"
meaning = "to eat"

[[verb]]
id = 3
kana = "する"
group = "irregular"
meaning = "to do"
"#;

pub const SAMPLE_ADJECTIVES: &str = r#"
[[adjective]]
id = 10
kana = "たかい"
kanji = "高い"
type = "i"
meaning = "tall, expensive"

[[adjective]]
id = 11
kana = "きれい"
type = "na"
meaning = "pretty"
"#;

/// A fresh, empty directory that outlives the test.
pub fn create_tmp_directory() -> Fallible<PathBuf> {
    let dir: PathBuf = tempdir()?.keep();
    Ok(dir.canonicalize()?)
}

/// A temporary collection with a few verbs and adjectives.
pub fn create_tmp_collection() -> Fallible<PathBuf> {
    let dir = create_tmp_directory()?;
    write(dir.join("verbs.toml"), SAMPLE_VERBS)?;
    write(dir.join("adjectives.toml"), SAMPLE_ADJECTIVES)?;
    write(dir.join(CONFIG_FILE), "[preferences]\nverb_forms = [\"te\", \"ta\"]\n")?;
    Ok(dir)
}
