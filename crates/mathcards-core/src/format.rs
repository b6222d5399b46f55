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

//! Turning problems into text: numbers with digit grouping, the stacked
//! window-card layout, and a plain-text worksheet grid.

use crate::types::operator::Operator;
use crate::types::problem::Problem;

/// Shown on cards whose avoidance constraint was not honored.
pub const WARNING_MARK: &str = "⚠";

/// Format a number with `,` between groups of three digits.
pub fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

pub fn worksheet_title(digits: u32, operator: Operator) -> String {
    format!("{digits}-Digit {} Window Cards", operator.title())
}

/// The text of one window card:
///
/// ```text
///   1,234
/// +   567
///  =======
///   1,801
/// ```
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Card {
    pub top: String,
    pub middle: String,
    pub rule: String,
    pub answer: String,
    pub warning: bool,
}

impl Card {
    pub fn new(problem: &Problem, operator: Operator) -> Self {
        let operand1 = format_number(problem.operand1);
        let operand2 = format_number(problem.operand2);
        let width = operand1.len().max(operand2.len());
        Self {
            top: format!("{operand1:>w$}", w = width + 2),
            middle: format!("{}{operand2:>w$}", operator.symbol(), w = width + 1),
            rule: format!(" {}", "=".repeat(width + 2)),
            answer: format!("{:>w$}", format_number(problem.result), w = width + 2),
            warning: problem.violates_constraint(),
        }
    }

    /// The card's lines, top to bottom.
    pub fn lines(&self, show_answer: bool) -> Vec<&str> {
        let mut lines = vec![self.top.as_str(), self.middle.as_str(), self.rule.as_str()];
        if show_answer {
            lines.push(&self.answer);
        }
        if self.warning {
            lines.push(WARNING_MARK);
        }
        lines
    }
}

/// Lay out cards row-major, `cols` to a row.
pub fn render_text_grid(
    problems: &[Problem],
    operator: Operator,
    cols: usize,
    show_answers: bool,
) -> String {
    let cards: Vec<Card> = problems.iter().map(|p| Card::new(p, operator)).collect();
    let card_width = cards
        .iter()
        .flat_map(|card| card.lines(show_answers))
        .map(|line| line.chars().count())
        .max()
        .unwrap_or(0);
    let mut out = String::new();
    for (index, row) in cards.chunks(cols.max(1)).enumerate() {
        if index > 0 {
            out.push('\n');
        }
        let lines: Vec<Vec<&str>> = row.iter().map(|card| card.lines(show_answers)).collect();
        let height = lines.iter().map(Vec::len).max().unwrap_or(0);
        for i in 0..height {
            let cells: Vec<String> = lines
                .iter()
                .map(|card| {
                    let line = card.get(i).copied().unwrap_or("");
                    format!("{line:<w$}", w = card_width)
                })
                .collect();
            out.push_str(cells.join("   ").trim_end());
            out.push('\n');
        }
    }
    out
}
