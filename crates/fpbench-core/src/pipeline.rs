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

//! End-to-end run orchestration.
//!
//! Dispatch, aggregation, metric computation, and the cache write run
//! strictly in that order; the store is only touched after the parallel
//! phase has joined. Cache contents are overwritten wholesale on every run.

use crate::aggregate::AggregatedTable;
use crate::dispatch::{dispatch, DispatchOptions};
use crate::error::{BenchError, Result};
use crate::metrics::{average_overheads, average_runtimes, MetricTable};
use crate::schema::Schema;
use crate::store::ResultStore;
use crate::task::BenchRunner;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration for one full benchmark run.
#[derive(Debug, Clone)]
pub struct RunOptions {
    /// Root directory receiving the cache and plots subdirectories.
    pub output_dir: PathBuf,
    /// Path of the externally built benchmark executable.
    pub executable: PathBuf,
    /// Number of benchmark iterations.
    pub iterations: usize,
    /// Worker pool size.
    pub threads: usize,
}

/// Cache subdirectory of an output directory.
pub fn cache_dir(output_dir: &Path) -> PathBuf {
    output_dir.join("cache")
}

/// Plots subdirectory of an output directory.
pub fn plots_dir(output_dir: &Path) -> PathBuf {
    output_dir.join("plots")
}

/// Execute a full benchmark run and return both derived tables.
///
/// Creates the output directory layout if needed, dispatches the parallel
/// tasks, aggregates, computes the metric tables, and persists them to the
/// cache before returning.
pub fn run_benchmarks(schema: &Schema, options: &RunOptions) -> Result<(MetricTable, MetricTable)> {
    let cache = cache_dir(&options.output_dir);
    let plots = plots_dir(&options.output_dir);
    for dir in [&options.output_dir, &cache, &plots] {
        fs::create_dir_all(dir).map_err(|e| BenchError::io_error(dir.as_path(), e))?;
    }

    let runner = BenchRunner::new(&options.executable);
    let dispatch_options = DispatchOptions {
        iterations: options.iterations,
        threads: options.threads,
    };
    let runs = dispatch(&runner, &dispatch_options, &cache)?;

    let aggregated = AggregatedTable::from_runs(schema, &runs)?;
    let runtimes = average_runtimes(&aggregated);
    let overheads = average_overheads(&aggregated, schema)?;

    ResultStore::new(&cache).save(&runtimes, &overheads)?;
    Ok((runtimes, overheads))
}

/// Load the cached overhead table for replotting, without regenerating it.
///
/// # Errors
///
/// `CacheMissing` if the output directory has never been populated by a
/// full run.
pub fn load_overheads(output_dir: &Path) -> Result<MetricTable> {
    ResultStore::new(cache_dir(output_dir)).load_overheads()
}
