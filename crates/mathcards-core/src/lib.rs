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

//! mathcards-core: Core library for the mathcards worksheet generator.
//!
//! This library is free of I/O and provides:
//! - Digit-column analysis (carrying and borrowing)
//! - Constrained operand sampling and problem-set generation
//! - Practice-mode answer checking
//! - Text formatting of window cards

pub mod digits;
pub mod error;
pub mod format;
pub mod generator;
pub mod practice;
pub mod rng;
pub mod sampler;
pub mod types;

// Re-exports for convenience
pub use error::{ErrorReport, Fallible, fail};
pub use generator::generate_problem_set;
pub use types::operator::Operator;
pub use types::problem::Problem;
pub use types::settings::{GenerationSettings, SettingsOverrides, WorksheetSettings};
