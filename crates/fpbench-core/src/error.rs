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

//! Structured error types for the benchmark pipeline.
//!
//! All pipeline operations return `Result<T, BenchError>`. The taxonomy is
//! deliberately fail-fast: there are no retries anywhere, and the first
//! failure aborts the whole run.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, BenchError>;

/// The main error type for pipeline operations.
///
/// Each variant carries enough context to tell the operator what went wrong
/// and, for contract violations, what was expected versus what was observed.
///
/// # Examples
///
/// ```
/// use fpbench_core::error::BenchError;
///
/// let err = BenchError::SchemaMismatch {
///     expected: vec!["native".to_string(), "mpfr".to_string()],
///     actual: vec!["native".to_string()],
/// };
/// assert!(err.to_string().contains("expected [native, mpfr]"));
/// ```
#[derive(Debug, Error)]
pub enum BenchError {
    /// I/O operation failed (directory creation, cache read/write).
    #[error("I/O error for '{path}': {message}")]
    Io {
        /// The path that caused the error
        path: PathBuf,
        /// The error message
        message: String,
    },

    /// The benchmark executable could not be spawned or exited non-zero.
    ///
    /// No cache file is written for the failing task.
    #[error("benchmark executable '{path}' failed: {detail}")]
    Executable {
        /// Path to the executable that failed
        path: PathBuf,
        /// Spawn error or exit status plus captured stderr
        detail: String,
    },

    /// Malformed CSV from the executable, or a CSV cache write failure.
    #[error("CSV error: {0}")]
    Csv(String),

    /// A timing cell did not parse as a decimal number.
    #[error("invalid timing for operation '{operation}', column '{column}': '{value}'")]
    InvalidTiming {
        /// Operation row the cell belongs to
        operation: String,
        /// Implementation column the cell belongs to
        column: String,
        /// The offending cell contents
        value: String,
    },

    /// A run's header did not match the declared implementation columns.
    ///
    /// This means the benchmark executable's output contract changed; the
    /// whole aggregation is aborted rather than silently adapting.
    #[error(
        "unexpected benchmark output columns: expected [{}], got [{}]",
        .expected.join(", "),
        .actual.join(", ")
    )]
    SchemaMismatch {
        /// The declared implementation columns, in order
        expected: Vec<String>,
        /// The columns the run actually produced, in order
        actual: Vec<String>,
    },

    /// Runs disagreed on their row sets, leaving a sample sequence short.
    #[error(
        "inconsistent sample count for ({operation}, {implementation}): \
         expected {expected}, got {actual}"
    )]
    SampleCount {
        /// Operation with the short sequence
        operation: String,
        /// Implementation with the short sequence
        implementation: String,
        /// Number of completed runs
        expected: usize,
        /// Number of samples actually observed
        actual: usize,
    },

    /// A metric table and the schema disagree at render time.
    #[error("no entry for ({operation}, {implementation}) in the metric table")]
    MissingEntry {
        /// Operation of the absent cell
        operation: String,
        /// Implementation of the absent cell
        implementation: String,
    },

    /// Reporting or replotting was requested before any run populated the
    /// cache. Distinct from a contract violation: the fix is to perform a
    /// full benchmark run first.
    #[error("benchmark cache not found at '{path}': perform a full run before replotting")]
    CacheMissing {
        /// The cache artifact that was expected to exist
        path: PathBuf,
    },

    /// JSON encoding or decoding of a cached table failed.
    #[error("serialization error: {0}")]
    Serialization(String),

    /// Invalid pipeline configuration, rejected before any task dispatch.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl BenchError {
    /// Create an I/O error with path context.
    pub fn io_error(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            message: source.to_string(),
        }
    }

    /// Create an executable-failure error.
    pub fn executable(path: impl Into<PathBuf>, detail: impl Into<String>) -> Self {
        Self::Executable {
            path: path.into(),
            detail: detail.into(),
        }
    }

    /// Create an invalid-configuration error.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }
}

// Automatic conversion from csv::Error
impl From<csv::Error> for BenchError {
    fn from(source: csv::Error) -> Self {
        Self::Csv(source.to_string())
    }
}

// Automatic conversion from serde_json::Error
impl From<serde_json::Error> for BenchError {
    fn from(source: serde_json::Error) -> Self {
        Self::Serialization(source.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_io_error_display() {
        let err = BenchError::io_error(
            "out/cache",
            io::Error::new(io::ErrorKind::NotFound, "no such directory"),
        );
        let msg = err.to_string();
        assert!(msg.contains("out/cache"));
        assert!(msg.contains("no such directory"));
    }

    #[test]
    fn test_executable_error_display() {
        let err = BenchError::executable("build/benchmark/ops", "exit status: 1");
        let msg = err.to_string();
        assert!(msg.contains("build/benchmark/ops"));
        assert!(msg.contains("exit status: 1"));
    }

    #[test]
    fn test_schema_mismatch_lists_both_column_sets() {
        let err = BenchError::SchemaMismatch {
            expected: vec!["native".to_string(), "mpfr".to_string()],
            actual: vec!["mpfr".to_string(), "native".to_string()],
        };
        let msg = err.to_string();
        assert!(msg.contains("expected [native, mpfr]"));
        assert!(msg.contains("got [mpfr, native]"));
    }

    #[test]
    fn test_cache_missing_instructs_full_run() {
        let err = BenchError::CacheMissing {
            path: PathBuf::from("out/cache/average_overheads.json"),
        };
        let msg = err.to_string();
        assert!(msg.contains("average_overheads.json"));
        assert!(msg.contains("full run"));
    }

    #[test]
    fn test_serialization_error_conversion() {
        let json_err = serde_json::from_str::<serde_json::Value>("not json").unwrap_err();
        let err: BenchError = json_err.into();
        assert!(matches!(err, BenchError::Serialization(_)));
    }
}
