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

//! Command-line argument definitions.

use clap::Parser;
use std::path::PathBuf;

/// Default location of the externally built benchmark executable.
pub const DEFAULT_BENCH_BIN: &str = "build/benchmark/ops";

/// Run floating-point arithmetic benchmarks and report per-implementation
/// overhead against the native baseline.
///
/// A full run invokes the benchmark executable once per iteration across a
/// bounded worker pool, averages the collected timings, caches the derived
/// tables under `<OUTPUT_DIR>/cache`, prints a fixed-width overhead report,
/// and renders `<OUTPUT_DIR>/plots/overhead.svg`.
#[derive(Debug, Parser)]
#[command(name = "fpbench")]
#[command(author, version, about = "Benchmark aggregation and reporting for floating-point arithmetic backends", long_about = None)]
pub struct Args {
    /// Directory to save benchmark results.
    pub output_dir: PathBuf,

    /// Number of iterations for each benchmark test.
    #[arg(short = 'n', long, default_value_t = 10)]
    pub iterations: usize,

    /// Number of parallel workers to use for benchmarking.
    #[arg(long, default_value_t = 1)]
    pub threads: usize,

    /// Re-generate the report and chart from existing benchmark data.
    #[arg(long)]
    pub replot: bool,

    /// Path to the benchmark executable produced by the build step.
    #[arg(long, default_value = DEFAULT_BENCH_BIN)]
    pub bench_bin: PathBuf,

    /// Skip chart rendering; print only the text report.
    #[arg(long)]
    pub no_plot: bool,
}
