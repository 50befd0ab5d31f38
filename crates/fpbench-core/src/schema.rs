// fpbench - Floating-point arithmetic benchmark pipeline
//
// Copyright (c) 2025 fpbench contributors.
//
// SPDX-License-Identifier: Apache-2.0
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License in the LICENSE file at the
// root of this repository or at: http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! The fixed output contract of the benchmark executable.
//!
//! The executable writes one CSV header row naming the implementation
//! columns, then one row per operation. This module models that contract as
//! an explicit ordered schema value, checked by equality at ingestion time
//! and never inferred from observed data. An executable producing a
//! different column set or order must fail aggregation loudly.

use crate::error::{BenchError, Result};

/// Benchmarked operations, in canonical report order.
const OPERATIONS: &[&str] = &["add", "sub", "mul", "div", "sqrt", "fma"];

/// Implementation columns, in the order the executable emits them.
/// The first entry is the baseline.
const IMPLEMENTATIONS: &[&str] = &[
    "native",
    "mpfr",
    "softfloat",
    "floppyfloat",
    "mpfx_rto",
    "mpfx_sfloat",
    "mpfx_ffloat",
    "mpfx_eft",
];

/// Baseline implementation against which overhead ratios are computed.
const BASELINE: &str = "native";

/// Ordered schema describing the benchmark executable's CSV output.
///
/// # Examples
///
/// ```
/// use fpbench_core::schema::Schema;
///
/// let schema = Schema::default();
/// assert_eq!(schema.baseline(), "native");
/// assert_eq!(schema.operations().len(), 6);
/// // Comparison columns exclude the baseline
/// assert!(!schema.comparison_columns().any(|c| c == "native"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    operations: Vec<String>,
    implementations: Vec<String>,
    baseline: String,
}

impl Default for Schema {
    fn default() -> Self {
        // The fixed contract; infallible by construction.
        Self {
            operations: OPERATIONS.iter().map(|s| s.to_string()).collect(),
            implementations: IMPLEMENTATIONS.iter().map(|s| s.to_string()).collect(),
            baseline: BASELINE.to_string(),
        }
    }
}

impl Schema {
    /// Create a schema with custom column sets.
    ///
    /// # Errors
    ///
    /// Returns `InvalidConfig` if the baseline is not one of the
    /// implementations, or if either column set is empty.
    pub fn new(operations: &[&str], implementations: &[&str], baseline: &str) -> Result<Self> {
        if operations.is_empty() {
            return Err(BenchError::invalid_config("schema has no operations"));
        }
        if implementations.is_empty() {
            return Err(BenchError::invalid_config("schema has no implementations"));
        }
        if !implementations.contains(&baseline) {
            return Err(BenchError::invalid_config(format!(
                "baseline '{}' is not a declared implementation",
                baseline
            )));
        }
        Ok(Self {
            operations: operations.iter().map(|s| s.to_string()).collect(),
            implementations: implementations.iter().map(|s| s.to_string()).collect(),
            baseline: baseline.to_string(),
        })
    }

    /// Canonical operation order used by the reporter and plotter.
    pub fn operations(&self) -> &[String] {
        &self.operations
    }

    /// Declared implementation columns, in emission order.
    pub fn implementations(&self) -> &[String] {
        &self.implementations
    }

    /// The baseline implementation.
    pub fn baseline(&self) -> &str {
        &self.baseline
    }

    /// Non-baseline implementations, in declared column order.
    pub fn comparison_columns(&self) -> impl Iterator<Item = &str> {
        self.implementations
            .iter()
            .map(String::as_str)
            .filter(move |imp| *imp != self.baseline)
    }

    /// Validate a run's header row against the declared columns.
    ///
    /// The first header cell names the operation column and is ignored; the
    /// remaining cells must equal the declared implementation list exactly,
    /// in the same order.
    ///
    /// # Errors
    ///
    /// Returns `SchemaMismatch` listing both column sets on any difference.
    pub fn validate_header(&self, header: &[String]) -> Result<()> {
        let actual = header.get(1..).unwrap_or_default();
        if actual != self.implementations.as_slice() {
            return Err(BenchError::SchemaMismatch {
                expected: self.implementations.clone(),
                actual: actual.to_vec(),
            });
        }
        Ok(())
    }

    /// Human-readable label for an implementation identifier, used in the
    /// chart legend.
    pub fn display_name<'a>(&self, implementation: &'a str) -> &'a str {
        match implementation {
            "native" => "Native f64",
            "mpfr" => "MPFR",
            "softfloat" => "Berkeley SoftFloat",
            "floppyfloat" => "FloppyFloat",
            "mpfx_rto" => "MPFX round-to-odd",
            "mpfx_sfloat" => "MPFX SoftFloat engine",
            "mpfx_ffloat" => "MPFX FloppyFloat engine",
            "mpfx_eft" => "MPFX EFT engine",
            other => other,
        }
    }
}
