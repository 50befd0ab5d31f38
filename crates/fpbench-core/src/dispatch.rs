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

//! Parallel task dispatch over a bounded worker pool.
//!
//! Each task blocks synchronously on the external benchmark child process,
//! so the CPU-bound work parallelizes at the process level while the pool
//! threads only wait. The dispatcher collects every result in submission
//! order and joins before returning: callers never observe a partial result
//! set. Any task failure aborts the whole dispatch (fail-fast, no retries,
//! no cancellation of already-running siblings). There are no timeouts; a
//! hung executable blocks the dispatch indefinitely.

use crate::error::{BenchError, Result};
use crate::task::{BenchRunner, RawRun, TaskSpec};
use rayon::prelude::*;
use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Dispatch configuration.
#[derive(Debug, Clone)]
pub struct DispatchOptions {
    /// Number of benchmark iterations to run.
    pub iterations: usize,
    /// Worker pool size.
    pub threads: usize,
}

/// Run `iterations` benchmark tasks across a fixed-size worker pool and
/// collect their results in submission order.
///
/// # Errors
///
/// * `InvalidConfig` if the iteration count or pool size is zero; rejected
///   before any task is submitted so the averaging step can never see an
///   empty sample sequence.
/// * The first task error otherwise, with no partial result set.
pub fn dispatch(
    runner: &BenchRunner,
    options: &DispatchOptions,
    cache_dir: &Path,
) -> Result<Vec<RawRun>> {
    if options.iterations == 0 {
        return Err(BenchError::invalid_config(
            "iteration count must be at least 1",
        ));
    }
    if options.threads == 0 {
        return Err(BenchError::invalid_config("worker count must be at least 1"));
    }

    let specs: Vec<TaskSpec> = (0..options.iterations)
        .map(|task_id| TaskSpec::new(task_id, cache_dir))
        .collect();

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.threads)
        .build()
        .map_err(|e| BenchError::invalid_config(format!("failed to build worker pool: {e}")))?;

    let total = specs.len();
    let completed = AtomicUsize::new(0);

    // Ordered parallel collect: results come back in submission order and
    // the Result short-circuits on the first task failure.
    pool.install(|| {
        specs
            .par_iter()
            .map(|spec| {
                let run = runner.run_task(spec)?;
                let done = completed.fetch_add(1, Ordering::Relaxed) + 1;
                eprintln!("[{done}/{total}] benchmark task {} completed", spec.task_id);
                Ok(run)
            })
            .collect::<Result<Vec<RawRun>>>()
    })
}
