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

use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

use crate::error::Fallible;
use crate::rng::TinyRng;

/// A generator seeded from the wall clock, for picking new items.
pub fn clock_rng() -> TinyRng {
    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_nanos() as u64)
        .unwrap_or_default();
    TinyRng::from_seed(seed)
}

/// Render a value as pretty JSON for `--json` output.
pub fn to_json<T: Serialize>(value: &T) -> Fallible<String> {
    Ok(serde_json::to_string_pretty(value)?)
}
