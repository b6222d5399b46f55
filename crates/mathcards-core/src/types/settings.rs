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

use std::ops::RangeInclusive;

use serde::Deserialize;
use serde::Serialize;

use crate::error::Fallible;
use crate::error::fail;
use crate::sampler::check_feasible;
use crate::types::operator::Operator;

pub const ROWS_RANGE: RangeInclusive<usize> = 1..=100;
pub const COLS_RANGE: RangeInclusive<usize> = 1..=20;
pub const DIGITS_RANGE: RangeInclusive<u32> = 1..=9;
pub const FONT_SIZE_RANGE: RangeInclusive<u32> = 6..=24;

/// The inputs of the problem generator.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct GenerationSettings {
    pub digit_count: u32,
    pub operator: Operator,
    pub avoid_carrying: bool,
    pub avoid_borrowing: bool,
}

/// Everything the user can configure about a worksheet.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
pub struct WorksheetSettings {
    pub rows: usize,
    pub cols: usize,
    pub digits: u32,
    /// Card font size, in points.
    pub font_size: u32,
    pub operator: Operator,
    pub avoid_carrying: bool,
    pub avoid_borrowing: bool,
}

impl Default for WorksheetSettings {
    fn default() -> Self {
        Self {
            rows: 10,
            cols: 10,
            digits: 4,
            font_size: 10,
            operator: Operator::Add,
            avoid_carrying: false,
            avoid_borrowing: false,
        }
    }
}

impl WorksheetSettings {
    /// The keys under which each setting is persisted.
    pub const KEYS: [&'static str; 7] = [
        "rows",
        "cols",
        "digits",
        "font_size",
        "operator",
        "avoid_carrying",
        "avoid_borrowing",
    ];

    pub fn problem_count(&self) -> usize {
        self.rows * self.cols
    }

    pub fn generation(&self) -> GenerationSettings {
        GenerationSettings {
            digit_count: self.digits,
            operator: self.operator,
            avoid_carrying: self.avoid_carrying,
            avoid_borrowing: self.avoid_borrowing,
        }
    }

    /// Clear the avoidance flags that don't apply to the current operator.
    pub fn normalize(self) -> Self {
        Self {
            avoid_carrying: self.avoid_carrying && self.operator == Operator::Add,
            avoid_borrowing: self.avoid_borrowing && self.operator == Operator::Subtract,
            ..self
        }
    }

    /// Check each field's range, and that problems can actually be
    /// generated for this combination of digits and operator.
    pub fn validate(&self) -> Fallible<()> {
        check_range("rows", self.rows, &ROWS_RANGE)?;
        check_range("cols", self.cols, &COLS_RANGE)?;
        check_range("digits", self.digits, &DIGITS_RANGE)?;
        check_range("font_size", self.font_size, &FONT_SIZE_RANGE)?;
        check_feasible(&self.generation())
    }

    /// Layer the given overrides on top of these settings.
    pub fn apply(self, overrides: &SettingsOverrides) -> Self {
        Self {
            rows: overrides.rows.unwrap_or(self.rows),
            cols: overrides.cols.unwrap_or(self.cols),
            digits: overrides.digits.unwrap_or(self.digits),
            font_size: overrides.font_size.unwrap_or(self.font_size),
            operator: overrides.operator.unwrap_or(self.operator),
            avoid_carrying: overrides.avoid_carrying.unwrap_or(self.avoid_carrying),
            avoid_borrowing: overrides.avoid_borrowing.unwrap_or(self.avoid_borrowing),
        }
    }

    /// The settings as `(key, value)` string pairs, in `KEYS` order.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("rows", self.rows.to_string()),
            ("cols", self.cols.to_string()),
            ("digits", self.digits.to_string()),
            ("font_size", self.font_size.to_string()),
            ("operator", self.operator.key().to_string()),
            ("avoid_carrying", self.avoid_carrying.to_string()),
            ("avoid_borrowing", self.avoid_borrowing.to_string()),
        ]
    }

    /// Set a single setting from its persisted string form.
    pub fn set_entry(&mut self, key: &str, value: &str) -> Fallible<()> {
        match key {
            "rows" => self.rows = value.trim().parse()?,
            "cols" => self.cols = value.trim().parse()?,
            "digits" => self.digits = value.trim().parse()?,
            "font_size" => self.font_size = value.trim().parse()?,
            "operator" => self.operator = value.parse()?,
            "avoid_carrying" => self.avoid_carrying = parse_flag(value)?,
            "avoid_borrowing" => self.avoid_borrowing = parse_flag(value)?,
            _ => return fail(format!("unknown setting: '{key}'")),
        }
        Ok(())
    }

    pub fn to_toml(&self) -> Fallible<String> {
        Ok(toml::to_string(self)?)
    }
}

/// A partial set of settings, e.g. from a TOML file or command-line flags.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SettingsOverrides {
    pub rows: Option<usize>,
    pub cols: Option<usize>,
    pub digits: Option<u32>,
    pub font_size: Option<u32>,
    pub operator: Option<Operator>,
    pub avoid_carrying: Option<bool>,
    pub avoid_borrowing: Option<bool>,
}

impl SettingsOverrides {
    pub fn from_toml(text: &str) -> Fallible<Self> {
        Ok(toml::from_str(text)?)
    }
}

fn check_range<T>(name: &str, value: T, range: &RangeInclusive<T>) -> Fallible<()>
where
    T: PartialOrd + std::fmt::Display,
{
    if range.contains(&value) {
        Ok(())
    } else {
        fail(format!(
            "{name} must be between {} and {}, got {value}.",
            range.start(),
            range.end()
        ))
    }
}

fn parse_flag(value: &str) -> Fallible<bool> {
    match value.trim() {
        "true" | "on" | "1" => Ok(true),
        "false" | "off" | "0" | "" => Ok(false),
        other => fail(format!("invalid flag value: '{other}'")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = WorksheetSettings::default();
        assert_eq!(settings.problem_count(), 100);
        assert_eq!(settings.generation().digit_count, 4);
        assert_eq!(settings.operator, Operator::Add);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_normalize_clears_inapplicable_flags() {
        let settings = WorksheetSettings {
            operator: Operator::Multiply,
            avoid_carrying: true,
            avoid_borrowing: true,
            ..Default::default()
        };
        let settings = settings.normalize();
        assert!(!settings.avoid_carrying);
        assert!(!settings.avoid_borrowing);

        let settings = WorksheetSettings {
            operator: Operator::Subtract,
            avoid_carrying: true,
            avoid_borrowing: true,
            ..Default::default()
        };
        let settings = settings.normalize();
        assert!(!settings.avoid_carrying);
        assert!(settings.avoid_borrowing);
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let settings = WorksheetSettings {
            digits: 0,
            ..Default::default()
        };
        let err = settings.validate().unwrap_err();
        assert_eq!(err.to_string(), "error: digits must be between 1 and 9, got 0.");

        let settings = WorksheetSettings {
            cols: 21,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_wide_division() {
        let settings = WorksheetSettings {
            digits: 8,
            operator: Operator::Divide,
            ..Default::default()
        };
        let err = settings.validate().unwrap_err();
        assert!(err.message().starts_with("infeasible constraint for given digit width"));

        assert!(settings.apply(&SettingsOverrides {
            operator: Some(Operator::Multiply),
            ..Default::default()
        })
        .validate()
        .is_ok());
    }

    #[test]
    fn test_entries_round_trip() -> Fallible<()> {
        let original = WorksheetSettings {
            rows: 3,
            cols: 4,
            digits: 2,
            font_size: 12,
            operator: Operator::Divide,
            avoid_carrying: false,
            avoid_borrowing: false,
        };
        let mut restored = WorksheetSettings::default();
        for (key, value) in original.entries() {
            restored.set_entry(key, &value)?;
        }
        assert_eq!(restored, original);
        Ok(())
    }

    #[test]
    fn test_set_entry_rejects_garbage() {
        let mut settings = WorksheetSettings::default();
        assert!(settings.set_entry("rows", "ten").is_err());
        assert!(settings.set_entry("avoid_carrying", "maybe").is_err());
        assert!(settings.set_entry("colour", "red").is_err());
        assert_eq!(settings, WorksheetSettings::default());
    }

    #[test]
    fn test_overrides_from_toml() -> Fallible<()> {
        let overrides = SettingsOverrides::from_toml(
            r#"
            digits = 2
            operator = "-"
            avoid_borrowing = true
            "#,
        )?;
        let settings = WorksheetSettings::default().apply(&overrides);
        assert_eq!(settings.digits, 2);
        assert_eq!(settings.operator, Operator::Subtract);
        assert!(settings.avoid_borrowing);
        assert_eq!(settings.rows, 10);
        Ok(())
    }

    #[test]
    fn test_overrides_reject_unknown_keys() {
        assert!(SettingsOverrides::from_toml("colour = \"red\"").is_err());
    }

    #[test]
    fn test_to_toml() -> Fallible<()> {
        let text = WorksheetSettings::default().to_toml()?;
        assert!(text.contains("rows = 10"));
        assert!(text.contains("operator = \"+\""));
        let overrides = SettingsOverrides::from_toml(&text)?;
        assert_eq!(
            WorksheetSettings::default().apply(&overrides),
            WorksheetSettings::default()
        );
        Ok(())
    }
}
