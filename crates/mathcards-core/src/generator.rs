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

use crate::error::Fallible;
use crate::rng::TinyRng;
use crate::sampler::SampledOperands;
use crate::sampler::check_feasible;
use crate::sampler::sample_operands;
use crate::types::problem::Problem;
use crate::types::settings::GenerationSettings;

/// Generate `count` independent problems, in order.
pub fn generate_problem_set(
    count: usize,
    settings: &GenerationSettings,
    rng: &mut TinyRng,
) -> Fallible<Vec<Problem>> {
    check_feasible(settings)?;
    let mut problems = Vec::with_capacity(count);
    for _ in 0..count {
        let SampledOperands {
            a,
            b,
            constraint_satisfied,
        } = sample_operands(settings, rng)?;
        problems.push(Problem {
            operand1: a,
            operand2: b,
            result: settings.operator.apply(a, b),
            constraint_satisfied,
        });
    }
    Ok(problems)
}
