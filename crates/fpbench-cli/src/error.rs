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

//! Error type for CLI command execution.

use fpbench_core::BenchError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors surfaced by the fpbench binary.
#[derive(Debug, Error)]
pub enum CliError {
    /// Any pipeline failure, reported verbatim.
    #[error(transparent)]
    Bench(#[from] BenchError),

    /// The benchmark executable is absent; the build collaborator must
    /// produce it before a full run.
    #[error("benchmark executable not found at '{path}': build the benchmarks first")]
    MissingExecutable {
        /// The path that was checked
        path: PathBuf,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_executable_display() {
        let err = CliError::MissingExecutable {
            path: PathBuf::from("build/benchmark/ops"),
        };
        let msg = err.to_string();
        assert!(msg.contains("build/benchmark/ops"));
        assert!(msg.contains("build the benchmarks first"));
    }

    #[test]
    fn test_bench_error_is_transparent() {
        let err: CliError = BenchError::invalid_config("iteration count must be at least 1").into();
        assert_eq!(
            err.to_string(),
            "invalid configuration: iteration count must be at least 1"
        );
    }
}
