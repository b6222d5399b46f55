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

//! Column-wise analysis of two numbers written one above the other.

/// Iterate over the aligned decimal digit pairs of `a` and `b`, starting at
/// the units column. The shorter number is padded with leading zeros.
fn columns(a: u64, b: u64) -> impl Iterator<Item = (u64, u64)> {
    let mut a = a;
    let mut b = b;
    let mut first = true;
    std::iter::from_fn(move || {
        if !first && a == 0 && b == 0 {
            return None;
        }
        first = false;
        let pair = (a % 10, b % 10);
        a /= 10;
        b /= 10;
        Some(pair)
    })
}

/// True if adding `a` and `b` carries out of any column.
pub fn causes_carrying(a: u64, b: u64) -> bool {
    columns(a, b).any(|(x, y)| x + y >= 10)
}

/// True if any digit of `a` is smaller than the digit of `b` in the same
/// column.
///
/// This looks at each column in isolation and does not propagate borrows:
/// `causes_borrowing(100, 1)` is true because of the units column alone.
pub fn causes_borrowing(a: u64, b: u64) -> bool {
    columns(a, b).any(|(x, y)| x < y)
}
