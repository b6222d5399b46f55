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

use std::fmt::Display;
use std::fmt::Formatter;
use std::fs::read_to_string;

use clap::ValueEnum;
use mathcards_core::error::Fallible;
use mathcards_core::format::render_text_grid;
use mathcards_core::format::worksheet_title;
use mathcards_core::generator::generate_problem_set;
use mathcards_core::rng::TinyRng;
use mathcards_core::types::problem::Problem;
use mathcards_core::types::settings::SettingsOverrides;
use mathcards_core::types::settings::WorksheetSettings;
use serde::Serialize;

use crate::utils::clock_seed;
use crate::workdir::WorkDir;

#[derive(ValueEnum, Clone, Copy, PartialEq, Debug)]
pub enum OutputFormat {
    /// Cards laid out as a plain-text grid.
    Text,
    /// The problem set as JSON.
    Json,
}

impl Display for OutputFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}

pub struct GenerateConfig {
    pub directory: Option<String>,
    pub config_file: Option<String>,
    pub overrides: SettingsOverrides,
    pub seed: Option<u64>,
    pub format: OutputFormat,
    pub answers: bool,
    pub save: bool,
}

#[derive(Serialize)]
struct WorksheetJson<'a> {
    title: String,
    seed: u64,
    settings: &'a WorksheetSettings,
    problems: &'a [Problem],
}

pub fn generate_worksheet(config: GenerateConfig) -> Fallible<()> {
    let mut workdir = WorkDir::open(config.directory)?;
    let stored = workdir.db.load_settings()?;
    let file = match config.config_file {
        Some(path) => SettingsOverrides::from_toml(&read_to_string(path)?)?,
        None => SettingsOverrides::default(),
    };
    let settings = effective_settings(stored, &file, &config.overrides)?;
    let seed = config.seed.unwrap_or_else(clock_seed);
    log::debug!("Generating {} problems with seed {seed}", settings.problem_count());
    let output = render_worksheet(&settings, seed, config.format, config.answers)?;
    // Only settings that produced a worksheet are stored.
    if config.save {
        workdir.db.save_settings(&settings)?;
    }
    print!("{output}");
    Ok(())
}

/// Layer the settings file and the command-line flags over the stored
/// settings.
fn effective_settings(
    stored: WorksheetSettings,
    file: &SettingsOverrides,
    flags: &SettingsOverrides,
) -> Fallible<WorksheetSettings> {
    let settings = stored.apply(file).apply(flags).normalize();
    settings.validate()?;
    Ok(settings)
}

pub fn render_worksheet(
    settings: &WorksheetSettings,
    seed: u64,
    format: OutputFormat,
    answers: bool,
) -> Fallible<String> {
    let mut rng = TinyRng::from_seed(seed);
    let problems = generate_problem_set(
        settings.problem_count(),
        &settings.generation(),
        &mut rng,
    )?;
    let title = worksheet_title(settings.digits, settings.operator);
    match format {
        OutputFormat::Text => {
            let grid = render_text_grid(&problems, settings.operator, settings.cols, answers);
            Ok(format!("{title}\n\n{grid}"))
        }
        OutputFormat::Json => {
            let json = WorksheetJson {
                title,
                seed,
                settings,
                problems: &problems,
            };
            let mut out = serde_json::to_string_pretty(&json)?;
            out.push('\n');
            Ok(out)
        }
    }
}
