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

use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Html;
use maud::Markup;
use maud::html;
use mathcards_core::format::Card;
use mathcards_core::format::WARNING_MARK;
use mathcards_core::format::worksheet_title;
use mathcards_core::practice::AnswerCheck;
use mathcards_core::practice::PracticeScore;
use mathcards_core::types::operator::Operator;
use mathcards_core::types::problem::Problem;
use mathcards_core::types::settings::COLS_RANGE;
use mathcards_core::types::settings::DIGITS_RANGE;
use mathcards_core::types::settings::FONT_SIZE_RANGE;
use mathcards_core::types::settings::ROWS_RANGE;
use mathcards_core::types::settings::WorksheetSettings;

use crate::cmd::serve::state::MutableState;
use crate::cmd::serve::state::ServerState;
use crate::cmd::serve::template::page_template;

pub async fn get_handler(State(state): State<ServerState>) -> (StatusCode, Html<String>) {
    let mut mutable = state.mutable.lock().unwrap();
    let error = mutable.error.take();
    let title = worksheet_title(mutable.settings.digits, mutable.settings.operator);
    let body = html! {
        div.toolbar {
            (render_settings_form(&mutable.settings))
            (render_controls(&mutable))
        }
        @if let Some(error) = error {
            div.error { (error) }
        }
        h1 { (title) }
        @if mutable.practice {
            (render_practice(&mutable))
        } @else {
            (render_print(&mutable))
        }
    };
    let html = page_template(&title, body).into_string();
    (StatusCode::OK, Html(html))
}

/// The current problem set as JSON.
pub async fn problems_handler(State(state): State<ServerState>) -> Json<Vec<Problem>> {
    let mutable = state.mutable.lock().unwrap();
    Json(mutable.problems.clone())
}

fn render_settings_form(settings: &WorksheetSettings) -> Markup {
    html! {
        form.settings action="/settings" method="post" {
            label {
                "Rows "
                input type="number" name="rows" value=(settings.rows)
                    min=(ROWS_RANGE.start()) max=(ROWS_RANGE.end());
            }
            label {
                "Columns "
                input type="number" name="cols" value=(settings.cols)
                    min=(COLS_RANGE.start()) max=(COLS_RANGE.end());
            }
            label {
                "Digits "
                input type="number" name="digits" value=(settings.digits)
                    min=(DIGITS_RANGE.start()) max=(DIGITS_RANGE.end());
            }
            label {
                "Font size "
                input type="number" name="font_size" value=(settings.font_size)
                    min=(FONT_SIZE_RANGE.start()) max=(FONT_SIZE_RANGE.end());
            }
            label {
                "Operator "
                select name="operator" {
                    @for op in Operator::ALL {
                        option value=(op.key()) selected[op == settings.operator] {
                            (op.symbol()) " " (op.title())
                        }
                    }
                }
            }
            // Both flags stay editable; the one that doesn't apply to the
            // chosen operator is cleared when the form is applied.
            label {
                input type="checkbox" name="avoid_carrying" checked[settings.avoid_carrying];
                " Avoid carrying (+)"
            }
            label {
                input type="checkbox" name="avoid_borrowing" checked[settings.avoid_borrowing];
                " Avoid borrowing (−)"
            }
            input type="submit" value="Apply";
        }
    }
}

fn render_controls(state: &MutableState) -> Markup {
    html! {
        form.controls action="/" method="post" {
            input type="submit" name="action" value="Generate";
            @if !state.practice {
                input type="submit" name="action" value="Answers";
            }
            @if state.practice {
                button type="submit" name="action" value="Practice" { "Exit Practice Mode" }
            } @else {
                button type="submit" name="action" value="Practice" { "Practice Mode" }
            }
            input type="submit" name="action" value="Quit";
        }
    }
}

fn grid_style(settings: &WorksheetSettings) -> String {
    format!(
        "--card-cols: {}; --card-font-size: {}pt;",
        settings.cols, settings.font_size
    )
}

fn render_print(state: &MutableState) -> Markup {
    let operator = state.settings.operator;
    html! {
        div.grid.show-answers[state.show_answers] style=(grid_style(&state.settings)) {
            @for problem in &state.problems {
                @let card = Card::new(problem, operator);
                div.card {
                    pre.problem { (card.top) "\n" (card.middle) "\n" (card.rule) }
                    pre.answer { (card.answer) }
                    @if card.warning {
                        div.note { (WARNING_MARK) }
                    }
                }
            }
        }
    }
}

fn render_practice(state: &MutableState) -> Markup {
    let operator = state.settings.operator;
    html! {
        @if let Some(checks) = &state.checks {
            @let score = PracticeScore::tally(checks);
            p.score {
                (score.correct) " correct, "
                (score.incorrect) " incorrect, "
                (score.unanswered) " unanswered"
            }
        }
        form.practice action="/check" method="post" {
            div.grid style=(grid_style(&state.settings)) {
                @for (index, problem) in state.problems.iter().enumerate() {
                    @let card = Card::new(problem, operator);
                    @let answer = state.answers.get(index).map(String::as_str).unwrap_or("");
                    @let check = state.checks.as_ref().and_then(|c| c.get(index)).copied();
                    div.card {
                        pre.problem { (card.top) "\n" (card.middle) "\n" (card.rule) }
                        input.answer-input
                            .correct[check == Some(AnswerCheck::Correct)]
                            .incorrect[check == Some(AnswerCheck::Incorrect)]
                            type="text" name=(format!("answer-{index}"))
                            value=(answer) placeholder="?" autocomplete="off";
                        @if card.warning {
                            div.note { (WARNING_MARK) }
                        }
                    }
                }
            }
            input type="submit" value="Check";
        }
    }
}
