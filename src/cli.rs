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

use std::process::exit;

use clap::Parser;
use clap::Subcommand;
use mathcards_core::error::Fallible;
use mathcards_core::types::operator::Operator;
use mathcards_core::types::settings::SettingsOverrides;
use tokio::spawn;

use crate::cmd::generate::GenerateConfig;
use crate::cmd::generate::OutputFormat;
use crate::cmd::generate::generate_worksheet;
use crate::cmd::serve::server::ServerConfig;
use crate::cmd::serve::server::start_server;
use crate::cmd::settings::reset_settings;
use crate::cmd::settings::show_settings;
use crate::utils::wait_for_server;

#[derive(Parser)]
#[command(version, about, long_about = None)]
enum Command {
    /// Print a worksheet to standard output.
    Generate {
        /// Directory holding the settings database. By default, the current working directory is used.
        directory: Option<String>,
        /// Number of rows of cards.
        #[arg(long)]
        rows: Option<usize>,
        /// Number of cards per row.
        #[arg(long)]
        cols: Option<usize>,
        /// Number of digits in each operand.
        #[arg(long)]
        digits: Option<u32>,
        /// One of +, -, x, / (or add, sub, mul, div).
        #[arg(long)]
        operator: Option<Operator>,
        /// Only generate additions without carrying.
        #[arg(long)]
        avoid_carrying: bool,
        /// Only generate subtractions without borrowing.
        #[arg(long)]
        avoid_borrowing: bool,
        /// Read settings from a TOML file. Flags take precedence over it.
        #[arg(long)]
        config: Option<String>,
        /// Seed for the problem generator, for reproducible worksheets.
        #[arg(long)]
        seed: Option<u64>,
        /// Which output format to use.
        #[arg(long, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Print the answers under each card.
        #[arg(long)]
        answers: bool,
        /// Store the resulting settings as the new defaults.
        #[arg(long)]
        save: bool,
    },
    /// Serve worksheets through a web interface, with a practice mode.
    Serve {
        /// Directory holding the settings database. By default, the current working directory is used.
        directory: Option<String>,
        /// The host address to bind to. Default is 127.0.0.1.
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// The port to use for the web server. Default is 8000.
        #[arg(long, default_value_t = 8000)]
        port: u16,
        /// Whether to open the browser automatically. Default is true.
        #[arg(long)]
        open_browser: Option<bool>,
        /// Seed for the problem generator.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Commands relating to stored settings.
    Settings {
        #[command(subcommand)]
        command: SettingsCommand,
    },
}

#[derive(Subcommand)]
enum SettingsCommand {
    /// Print the stored settings as TOML.
    Show {
        /// Directory holding the settings database. By default, the current working directory is used.
        directory: Option<String>,
    },
    /// Forget the stored settings.
    Reset {
        /// Directory holding the settings database. By default, the current working directory is used.
        directory: Option<String>,
    },
}

pub async fn entrypoint() -> Fallible<()> {
    let cli: Command = Command::parse();
    match cli {
        Command::Generate {
            directory,
            rows,
            cols,
            digits,
            operator,
            avoid_carrying,
            avoid_borrowing,
            config,
            seed,
            format,
            answers,
            save,
        } => {
            let overrides = SettingsOverrides {
                rows,
                cols,
                digits,
                font_size: None,
                operator,
                avoid_carrying: avoid_carrying.then_some(true),
                avoid_borrowing: avoid_borrowing.then_some(true),
            };
            generate_worksheet(GenerateConfig {
                directory,
                config_file: config,
                overrides,
                seed,
                format,
                answers,
                save,
            })
        }
        Command::Serve {
            directory,
            host,
            port,
            open_browser,
            seed,
        } => {
            if open_browser.unwrap_or(true) {
                // Start a separate task to open the browser once the server is up.
                let browser_host = host.clone();
                spawn(async move {
                    match wait_for_server(&browser_host, port).await {
                        Ok(_) => {
                            let _ = open::that(format!("http://{browser_host}:{port}/"));
                        }
                        Err(e) => {
                            eprintln!("Failed to connect to server: {e}");
                            exit(-1)
                        }
                    }
                });
            }
            let config = ServerConfig {
                directory,
                host,
                port,
                seed,
            };
            start_server(config).await
        }
        Command::Settings { command } => match command {
            SettingsCommand::Show { directory } => show_settings(directory),
            SettingsCommand::Reset { directory } => reset_settings(directory),
        },
    }
}
