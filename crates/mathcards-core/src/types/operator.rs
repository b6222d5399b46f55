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
use std::str::FromStr;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;

/// The four arithmetic operators a worksheet can drill.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
}

impl Operator {
    pub const ALL: [Operator; 4] = [
        Operator::Add,
        Operator::Subtract,
        Operator::Multiply,
        Operator::Divide,
    ];

    /// The key used when persisting or serializing the operator.
    pub fn key(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "-",
            Operator::Multiply => "×",
            Operator::Divide => "÷",
        }
    }

    /// The symbol printed on a card. Subtraction uses a real minus sign.
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Add => "+",
            Operator::Subtract => "−",
            Operator::Multiply => "×",
            Operator::Divide => "÷",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Operator::Add => "Addition",
            Operator::Subtract => "Subtraction",
            Operator::Multiply => "Multiplication",
            Operator::Divide => "Division",
        }
    }

    /// Apply the operator. Callers guarantee `a >= b` for subtraction and
    /// an exact, non-zero divisor for division.
    pub fn apply(self, a: u64, b: u64) -> u64 {
        match self {
            Operator::Add => a + b,
            Operator::Subtract => a - b,
            Operator::Multiply => a * b,
            Operator::Divide => a / b,
        }
    }
}

impl Display for Operator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

impl FromStr for Operator {
    type Err = ErrorReport;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        match s.to_lowercase().as_str() {
            "+" | "add" | "addition" | "plus" => Ok(Operator::Add),
            "-" | "−" | "sub" | "subtract" | "subtraction" | "minus" => Ok(Operator::Subtract),
            "×" | "x" | "*" | "mul" | "multiply" | "multiplication" | "times" => {
                Ok(Operator::Multiply)
            }
            "÷" | "/" | "div" | "divide" | "division" => Ok(Operator::Divide),
            _ => Err(ErrorReport::new(format!("unknown operator: '{s}'"))),
        }
    }
}

impl TryFrom<String> for Operator {
    type Error = ErrorReport;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Operator> for String {
    fn from(op: Operator) -> String {
        op.key().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Fallible;

    #[test]
    fn test_apply() {
        assert_eq!(Operator::Add.apply(21, 34), 55);
        assert_eq!(Operator::Subtract.apply(35, 12), 23);
        assert_eq!(Operator::Multiply.apply(12, 12), 144);
        assert_eq!(Operator::Divide.apply(9, 3), 3);
    }

    #[test]
    fn test_parse_keys_and_aliases() -> Fallible<()> {
        for op in Operator::ALL {
            assert_eq!(op.key().parse::<Operator>()?, op);
            assert_eq!(op.title().parse::<Operator>()?, op);
        }
        assert_eq!("x".parse::<Operator>()?, Operator::Multiply);
        assert_eq!("/".parse::<Operator>()?, Operator::Divide);
        assert_eq!(" SUB ".parse::<Operator>()?, Operator::Subtract);
        Ok(())
    }

    #[test]
    fn test_parse_unknown() {
        let err = "%".parse::<Operator>().unwrap_err();
        assert_eq!(err.to_string(), "error: unknown operator: '%'");
    }

    #[test]
    fn test_serialize_as_key() -> Fallible<()> {
        assert_eq!(serde_json::to_string(&Operator::Divide)?, "\"÷\"");
        let op: Operator = serde_json::from_str("\"-\"")?;
        assert_eq!(op, Operator::Subtract);
        Ok(())
    }
}
