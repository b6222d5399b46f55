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

//! Checking answers typed in practice mode.

/// The outcome of checking one answer.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum AnswerCheck {
    /// Nothing was entered.
    Empty,
    Correct,
    Incorrect,
}

/// Parse a typed answer, ignoring grouping separators. Returns `None` if
/// the input is not a non-negative integer.
pub fn parse_answer(input: &str) -> Option<u64> {
    let digits: String = input
        .chars()
        .filter(|c| !matches!(c, ',' | '_') && !c.is_whitespace())
        .collect();
    if digits.is_empty() || !digits.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    digits.parse().ok()
}

pub fn check_answer(input: &str, expected: u64) -> AnswerCheck {
    if input.trim().is_empty() {
        return AnswerCheck::Empty;
    }
    match parse_answer(input) {
        Some(answer) if answer == expected => AnswerCheck::Correct,
        _ => AnswerCheck::Incorrect,
    }
}

/// A tally of checked answers.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub struct PracticeScore {
    pub correct: usize,
    pub incorrect: usize,
    pub unanswered: usize,
}

impl PracticeScore {
    pub fn tally<'a>(checks: impl IntoIterator<Item = &'a AnswerCheck>) -> Self {
        let mut score = Self::default();
        for check in checks {
            match check {
                AnswerCheck::Empty => score.unanswered += 1,
                AnswerCheck::Correct => score.correct += 1,
                AnswerCheck::Incorrect => score.incorrect += 1,
            }
        }
        score
    }

    pub fn answered(&self) -> usize {
        self.correct + self.incorrect
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_answer() {
        assert_eq!(parse_answer("1234"), Some(1234));
        assert_eq!(parse_answer("1,234"), Some(1234));
        assert_eq!(parse_answer(" 12 345 "), Some(12345));
        assert_eq!(parse_answer("1_000"), Some(1000));
        assert_eq!(parse_answer("-5"), None);
        assert_eq!(parse_answer("12a"), None);
        assert_eq!(parse_answer(","), None);
    }

    #[test]
    fn test_check_answer() {
        assert_eq!(check_answer("", 55), AnswerCheck::Empty);
        assert_eq!(check_answer("   ", 55), AnswerCheck::Empty);
        assert_eq!(check_answer("55", 55), AnswerCheck::Correct);
        assert_eq!(check_answer("1,855", 1855), AnswerCheck::Correct);
        assert_eq!(check_answer("56", 55), AnswerCheck::Incorrect);
        assert_eq!(check_answer("fifty", 55), AnswerCheck::Incorrect);
    }

    #[test]
    fn test_tally() {
        let checks = [
            AnswerCheck::Correct,
            AnswerCheck::Correct,
            AnswerCheck::Incorrect,
            AnswerCheck::Empty,
        ];
        let score = PracticeScore::tally(&checks);
        assert_eq!(
            score,
            PracticeScore {
                correct: 2,
                incorrect: 1,
                unanswered: 1
            }
        );
        assert_eq!(score.answered(), 3);
    }
}
