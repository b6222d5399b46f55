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

use axum::Form;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use axum::response::IntoResponse;
use axum::response::Redirect;
use axum::response::Response;
use mathcards_core::error::Fallible;
use mathcards_core::types::settings::WorksheetSettings;
use serde::Deserialize;

use crate::cmd::serve::state::ServerState;

#[derive(Deserialize, Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Generate,
    Answers,
    Practice,
    Quit,
}

#[derive(Deserialize)]
pub struct FormData {
    action: Action,
}

pub async fn post_handler(
    State(state): State<ServerState>,
    Form(form): Form<FormData>,
) -> Response {
    log::debug!("Action: {:?}", form.action);
    if form.action == Action::Quit {
        let mut tx = state.shutdown_tx.lock().unwrap();
        if let Some(tx) = tx.take() {
            let _ = tx.send(());
        }
        return (
            StatusCode::OK,
            Html("Worksheet server stopped. You can close this tab.".to_string()),
        )
            .into_response();
    }
    match form.action {
        Action::Generate => {
            let settings = state.mutable.lock().unwrap().settings;
            if let Err(e) = state.regenerate(settings).await {
                state.mutable.lock().unwrap().error = Some(e.message().to_string());
            }
        }
        Action::Answers => {
            let mut mutable = state.mutable.lock().unwrap();
            mutable.show_answers = !mutable.show_answers;
        }
        Action::Practice => {
            state.mutable.lock().unwrap().toggle_practice();
        }
        Action::Quit => {}
    }
    Redirect::to("/").into_response()
}

/// The settings form. Checkboxes are only present when ticked.
#[derive(Deserialize)]
pub struct SettingsForm {
    rows: String,
    cols: String,
    digits: String,
    font_size: String,
    operator: String,
    avoid_carrying: Option<String>,
    avoid_borrowing: Option<String>,
}

pub async fn settings_handler(
    State(state): State<ServerState>,
    Form(form): Form<SettingsForm>,
) -> Redirect {
    if let Err(e) = apply_settings(&state, &form).await {
        log::warn!("Rejected settings: {}", e.message());
        state.mutable.lock().unwrap().error = Some(e.message().to_string());
    }
    Redirect::to("/")
}

async fn apply_settings(state: &ServerState, form: &SettingsForm) -> Fallible<()> {
    let mut settings: WorksheetSettings = state.mutable.lock().unwrap().settings;
    settings.set_entry("rows", &form.rows)?;
    settings.set_entry("cols", &form.cols)?;
    settings.set_entry("digits", &form.digits)?;
    settings.set_entry("font_size", &form.font_size)?;
    settings.set_entry("operator", &form.operator)?;
    settings.avoid_carrying = form.avoid_carrying.is_some();
    settings.avoid_borrowing = form.avoid_borrowing.is_some();
    let settings = settings.normalize();
    settings.validate()?;
    state.regenerate(settings).await?;
    state.mutable.lock().unwrap().db.save_settings(&settings)?;
    Ok(())
}

pub async fn check_handler(
    State(state): State<ServerState>,
    Form(fields): Form<Vec<(String, String)>>,
) -> Redirect {
    let answers: Vec<(usize, String)> = fields
        .into_iter()
        .filter_map(|(name, value)| {
            let index = name.strip_prefix("answer-")?.parse().ok()?;
            Some((index, value))
        })
        .collect();
    let mut mutable = state.mutable.lock().unwrap();
    mutable.check(answers);
    Redirect::to("/")
}
