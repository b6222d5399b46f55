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

use serde::Deserialize;
use serde::Serialize;

/// A single generated problem.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct Problem {
    pub operand1: u64,
    pub operand2: u64,
    pub result: u64,
    /// Whether the carry/borrow avoidance constraint was honored. `None`
    /// when no constraint applies to this problem.
    pub constraint_satisfied: Option<bool>,
}

impl Problem {
    /// True when a constraint was requested and the pair violates it.
    pub fn violates_constraint(&self) -> bool {
        self.constraint_satisfied == Some(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Fallible;

    #[test]
    fn test_serialize_without_constraint() -> Fallible<()> {
        let problem = Problem {
            operand1: 12,
            operand2: 3,
            result: 36,
            constraint_satisfied: None,
        };
        assert_eq!(
            serde_json::to_string(&problem)?,
            r#"{"operand1":12,"operand2":3,"result":36,"constraint_satisfied":null}"#
        );
        assert!(!problem.violates_constraint());
        Ok(())
    }
}
