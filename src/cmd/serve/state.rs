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

use std::sync::Arc;
use std::sync::Mutex;

use mathcards_core::error::ErrorReport;
use mathcards_core::error::Fallible;
use mathcards_core::generator::generate_problem_set;
use mathcards_core::practice::AnswerCheck;
use mathcards_core::practice::check_answer;
use mathcards_core::rng::TinyRng;
use mathcards_core::types::problem::Problem;
use mathcards_core::types::settings::WorksheetSettings;
use tokio::sync::oneshot::Sender;
use tokio::task::spawn_blocking;

use crate::db::Database;

#[derive(Clone)]
pub struct ServerState {
    pub mutable: Arc<Mutex<MutableState>>,
    pub shutdown_tx: Arc<Mutex<Option<Sender<()>>>>,
}

impl ServerState {
    /// Replace the problem set with a fresh one for `settings`. On failure
    /// the current settings and problems are left untouched.
    ///
    /// Generation runs on the blocking pool and without the lock held, so
    /// wide division sets don't stall other requests.
    pub async fn regenerate(&self, settings: WorksheetSettings) -> Fallible<()> {
        let seed = self.mutable.lock().unwrap().rng.next_u64();
        let problems = spawn_blocking(move || {
            let mut rng = TinyRng::from_seed(seed);
            generate_problem_set(settings.problem_count(), &settings.generation(), &mut rng)
        })
        .await
        .map_err(|e| ErrorReport::new(format!("generation task failed: {e}")))??;
        self.mutable.lock().unwrap().install(settings, problems);
        Ok(())
    }
}

pub struct MutableState {
    pub db: Database,
    /// Seeds each generation run.
    pub rng: TinyRng,
    pub settings: WorksheetSettings,
    pub problems: Vec<Problem>,
    pub show_answers: bool,
    pub practice: bool,
    /// What the user typed into each card, in practice mode.
    pub answers: Vec<String>,
    /// Results of the last check, if answers were checked since the last
    /// regeneration.
    pub checks: Option<Vec<AnswerCheck>>,
    /// An error to show on the next page load.
    pub error: Option<String>,
}

impl MutableState {
    fn install(&mut self, settings: WorksheetSettings, problems: Vec<Problem>) {
        self.settings = settings;
        self.answers = vec![String::new(); problems.len()];
        self.problems = problems;
        self.checks = None;
    }

    /// Record the typed answers and check them against the problem set.
    pub fn check(&mut self, answers: Vec<(usize, String)>) {
        for (index, answer) in answers {
            if let Some(slot) = self.answers.get_mut(index) {
                *slot = answer;
            }
        }
        let checks = self
            .problems
            .iter()
            .zip(self.answers.iter())
            .map(|(problem, answer)| check_answer(answer, problem.result))
            .collect();
        self.checks = Some(checks);
    }

    pub fn toggle_practice(&mut self) {
        self.practice = !self.practice;
        self.answers = vec![String::new(); self.problems.len()];
        self.checks = None;
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use mathcards_core::types::operator::Operator;
    use tokio::spawn;
    use tokio::time::sleep;

    use super::*;

    async fn state() -> Fallible<ServerState> {
        let mutable = MutableState {
            db: Database::in_memory()?,
            rng: TinyRng::from_seed(0),
            settings: WorksheetSettings::default(),
            problems: Vec::new(),
            show_answers: false,
            practice: false,
            answers: Vec::new(),
            checks: None,
            error: None,
        };
        let state = ServerState {
            mutable: Arc::new(Mutex::new(mutable)),
            shutdown_tx: Arc::new(Mutex::new(None)),
        };
        let settings = WorksheetSettings {
            rows: 2,
            cols: 2,
            digits: 2,
            ..Default::default()
        };
        state.regenerate(settings).await?;
        Ok(state)
    }

    #[tokio::test]
    async fn test_regenerate() -> Fallible<()> {
        let state = state().await?;
        let before = state.mutable.lock().unwrap().problems.clone();
        assert_eq!(before.len(), 4);
        assert_eq!(state.mutable.lock().unwrap().answers.len(), 4);

        let settings = state.mutable.lock().unwrap().settings;
        state.regenerate(settings).await?;
        assert_ne!(state.mutable.lock().unwrap().problems, before);
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_regenerate_keeps_old_set() -> Fallible<()> {
        let state = state().await?;
        let (before, settings) = {
            let mutable = state.mutable.lock().unwrap();
            (mutable.problems.clone(), mutable.settings)
        };
        let settings = WorksheetSettings {
            digits: 8,
            operator: Operator::Divide,
            ..settings
        };
        assert!(state.regenerate(settings).await.is_err());
        let mutable = state.mutable.lock().unwrap();
        assert_eq!(mutable.problems, before);
        assert_eq!(mutable.settings.digits, 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_lock_is_free_while_generating() -> Fallible<()> {
        let state = state().await?;
        let settings = WorksheetSettings {
            rows: 20,
            cols: 10,
            digits: 5,
            operator: Operator::Divide,
            ..Default::default()
        };
        let background = state.clone();
        let handle = spawn(async move { background.regenerate(settings).await });
        sleep(Duration::from_millis(20)).await;
        assert!(state.mutable.try_lock().is_ok());
        handle
            .await
            .map_err(|e| ErrorReport::new(e.to_string()))??;
        assert_eq!(state.mutable.lock().unwrap().problems.len(), 200);
        Ok(())
    }

    #[tokio::test]
    async fn test_check() -> Fallible<()> {
        let state = state().await?;
        let mut mutable = state.mutable.lock().unwrap();
        let right = mutable.problems[0].result.to_string();
        mutable.check(vec![(0, right), (1, "nope".to_string()), (99, "1".to_string())]);
        let checks = mutable.checks.clone().unwrap();
        assert_eq!(
            checks,
            vec![
                AnswerCheck::Correct,
                AnswerCheck::Incorrect,
                AnswerCheck::Empty,
                AnswerCheck::Empty
            ]
        );
        mutable.toggle_practice();
        assert!(mutable.practice);
        assert!(mutable.checks.is_none());
        Ok(())
    }
}
