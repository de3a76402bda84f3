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

use std::collections::HashMap;
use std::fs::read_to_string;
use std::path::Path;

use serde::Deserialize;

use crate::error::ErrorReport;
use crate::error::Fallible;
use crate::policy::Preferences;
use crate::types::form::Form;
use crate::types::item::Category;

pub const CONFIG_FILE: &str = "katsuyou.toml";

/// The collection's `katsuyou.toml`:
///
/// ```toml
/// [preferences]
/// verb_forms = ["masu", "te", "ta"]
///
/// [users.alice]
/// due_only = true
/// ```
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub preferences: Preferences,
    pub users: HashMap<String, UserPreferences>,
}

/// Per-user overrides. Unset fields fall back to `[preferences]`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UserPreferences {
    pub verb_forms: Option<Vec<Form>>,
    pub adjective_forms: Option<Vec<Form>>,
    pub due_only: Option<bool>,
}

impl Config {
    /// Read the config from a collection directory. A missing file means
    /// the defaults.
    pub fn load(directory: &Path) -> Fallible<Self> {
        let path = directory.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(Self::default());
        }
        let text = read_to_string(&path)?;
        let config = Self::parse(&text)
            .map_err(|e| ErrorReport::new(format!("{}: {}", path.display(), e.message())))?;
        Ok(config)
    }

    pub fn parse(text: &str) -> Fallible<Self> {
        let config: Config =
            toml::from_str(text).map_err(|e| ErrorReport::new(format!("invalid config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Fallible<()> {
        let mut lists: Vec<(String, Category, &[Form])> = Vec::new();
        if let Some(forms) = &self.preferences.verb_forms {
            lists.push(("preferences".to_string(), Category::Verb, forms.as_slice()));
        }
        if let Some(forms) = &self.preferences.adjective_forms {
            lists.push(("preferences".to_string(), Category::Adjective, forms.as_slice()));
        }
        for (name, user) in self.users.iter() {
            if let Some(forms) = &user.verb_forms {
                lists.push((format!("users.{name}"), Category::Verb, forms.as_slice()));
            }
            if let Some(forms) = &user.adjective_forms {
                lists.push((format!("users.{name}"), Category::Adjective, forms.as_slice()));
            }
        }
        for (section, category, forms) in lists {
            if let Some(form) = forms.iter().find(|form| !form.applies_to(category)) {
                return Err(ErrorReport::new(format!(
                    "[{section}]: {form} is not a {category} form"
                )));
            }
        }
        Ok(())
    }

    /// The effective preferences for one user.
    pub fn preferences_for(&self, user: &str) -> Preferences {
        let base = self.preferences.clone();
        match self.users.get(user) {
            None => base,
            Some(user) => Preferences {
                verb_forms: user.verb_forms.clone().or(base.verb_forms),
                adjective_forms: user.adjective_forms.clone().or(base.adjective_forms),
                due_only: user.due_only.unwrap_or(base.due_only),
            },
        }
    }
}
