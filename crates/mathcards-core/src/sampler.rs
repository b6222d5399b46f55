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

//! Rejection sampling of operand pairs.

use crate::digits::causes_borrowing;
use crate::digits::causes_carrying;
use crate::error::Fallible;
use crate::error::fail;
use crate::rng::TinyRng;
use crate::types::operator::Operator;
use crate::types::settings::GenerationSettings;

/// The widest operands we generate. Products of two 9-digit numbers still
/// fit in a `u64`.
pub const MAX_DIGITS: u32 = 9;

/// Division pairs are rare among random pairs, and get rarer as operands
/// widen. Past this width the rejection loop stops being practical.
pub const MAX_DIVISION_DIGITS: u32 = 6;

/// Upper bound on draws for a single pair.
pub const MAX_ATTEMPTS: usize = 10_000_000;

/// The inclusive range operands are drawn from.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct DigitBounds {
    pub min: u64,
    pub max: u64,
}

impl DigitBounds {
    /// Bounds for `digit_count`-digit operands. Single-digit operands
    /// include zero.
    pub fn new(digit_count: u32) -> Self {
        let max = 10u64.pow(digit_count) - 1;
        let min = if digit_count > 1 {
            10u64.pow(digit_count - 1)
        } else {
            0
        };
        Self { min, max }
    }
}

/// An accepted operand pair.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct SampledOperands {
    pub a: u64,
    pub b: u64,
    pub constraint_satisfied: Option<bool>,
}

/// Reject settings for which sampling could not terminate.
pub fn check_feasible(settings: &GenerationSettings) -> Fallible<()> {
    let digits = settings.digit_count;
    if digits == 0 {
        return fail("infeasible constraint for given digit width: operands need at least one digit.");
    }
    if digits > MAX_DIGITS {
        return fail(format!(
            "infeasible constraint for given digit width: at most {MAX_DIGITS} digits are supported, got {digits}."
        ));
    }
    if settings.operator == Operator::Divide && digits > MAX_DIVISION_DIGITS {
        return fail(format!(
            "infeasible constraint for given digit width: division supports at most {MAX_DIVISION_DIGITS} digits, got {digits}."
        ));
    }
    Ok(())
}

/// Draw one operand pair for the given settings.
///
/// Callers are expected to have run [`check_feasible`] first.
pub fn sample_operands(
    settings: &GenerationSettings,
    rng: &mut TinyRng,
) -> Fallible<SampledOperands> {
    sample_with_limit(settings, rng, MAX_ATTEMPTS)
}

fn sample_with_limit(
    settings: &GenerationSettings,
    rng: &mut TinyRng,
    attempts: usize,
) -> Fallible<SampledOperands> {
    let DigitBounds { min, max } = DigitBounds::new(settings.digit_count);
    for _ in 0..attempts {
        let a = rng.range(min, max);
        let b = rng.range(min, max);
        if let Some(sample) = accept(settings, max, a, b) {
            return Ok(sample);
        }
    }
    fail(format!(
        "infeasible constraint for given digit width: no valid {} pair with {} digits after {attempts} attempts.",
        settings.operator.title().to_lowercase(),
        settings.digit_count
    ))
}

/// Decide whether a drawn pair is acceptable. Returns the (possibly
/// reordered) pair if so.
fn accept(settings: &GenerationSettings, max: u64, a: u64, b: u64) -> Option<SampledOperands> {
    match settings.operator {
        Operator::Add => {
            if settings.avoid_carrying && causes_carrying(a, b) {
                return None;
            }
            Some(SampledOperands {
                a,
                b,
                constraint_satisfied: settings.avoid_carrying.then_some(true),
            })
        }
        Operator::Subtract => {
            let (a, b) = if a < b { (b, a) } else { (a, b) };
            if settings.avoid_borrowing && causes_borrowing(a, b) {
                return None;
            }
            Some(SampledOperands {
                a,
                b,
                constraint_satisfied: settings.avoid_borrowing.then_some(true),
            })
        }
        Operator::Multiply => Some(SampledOperands {
            a,
            b,
            constraint_satisfied: None,
        }),
        Operator::Divide => {
            let valid = b > 1 && a % b == 0 && a / b <= max && a != b;
            valid.then_some(SampledOperands {
                a,
                b,
                constraint_satisfied: None,
            })
        }
    }
}
