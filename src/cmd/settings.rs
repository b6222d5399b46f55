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

use mathcards_core::error::Fallible;

use crate::workdir::WorkDir;

/// Print the stored settings as TOML.
pub fn show_settings(directory: Option<String>) -> Fallible<()> {
    let workdir = WorkDir::open(directory)?;
    let settings = workdir.db.load_settings()?;
    print!("{}", settings.to_toml()?);
    Ok(())
}

pub fn reset_settings(directory: Option<String>) -> Fallible<()> {
    let mut workdir = WorkDir::open(directory)?;
    let removed = workdir.db.reset_settings()?;
    log::info!("Removed {removed} stored settings");
    println!("Settings reset to defaults.");
    Ok(())
}
