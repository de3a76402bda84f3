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

mod catalog;
mod cli;
mod cmd;
mod collection;
mod config;
mod db;
#[cfg(test)]
mod helper;
mod utils;

use std::process::exit;

use katsuyou_core::conjugation;
use katsuyou_core::error;
use katsuyou_core::policy;
use katsuyou_core::rng;
use katsuyou_core::selector;
use katsuyou_core::srs;
use katsuyou_core::store;
use katsuyou_core::trainer;
use katsuyou_core::types;

use crate::cli::entrypoint;

fn main() {
    env_logger::init();
    match entrypoint() {
        Ok(_) => {}
        Err(e) => {
            eprintln!("{e}");
            exit(-1);
        }
    }
}
