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

//! Command execution.
//!
//! A normal invocation runs the full pipeline, then prints the report and
//! renders the chart. `--replot` skips the run and regenerates both from
//! the cache, failing with a cache-missing error against an unpopulated
//! output directory.

use crate::cli::Args;
use crate::error::CliError;
use colored::Colorize;
use fpbench_core::{pipeline, plot, report, RunOptions, Schema};

/// Execute the parsed command line.
pub fn execute(args: Args) -> Result<(), CliError> {
    let schema = Schema::default();

    eprintln!("Output directory: {}", args.output_dir.display());
    eprintln!("Iterations: {}", args.iterations);
    eprintln!("Threads: {}", args.threads);

    if !args.replot {
        if !args.bench_bin.is_file() {
            return Err(CliError::MissingExecutable {
                path: args.bench_bin,
            });
        }

        eprintln!("{}", "Running benchmarks...".cyan().bold());
        let options = RunOptions {
            output_dir: args.output_dir.clone(),
            executable: args.bench_bin.clone(),
            iterations: args.iterations,
            threads: args.threads,
        };
        pipeline::run_benchmarks(&schema, &options)?;
        eprintln!("{} aggregated benchmark results", "✓".green().bold());
    }

    // Reporting and plotting read the persisted table, so a replot sees
    // exactly what the last full run cached.
    let overheads = pipeline::load_overheads(&args.output_dir)?;
    print!("{}", report::render_overhead(&overheads, &schema)?);

    if !args.no_plot {
        let plots = pipeline::plots_dir(&args.output_dir);
        std::fs::create_dir_all(&plots)
            .map_err(|e| fpbench_core::BenchError::io_error(&plots, e))?;
        let path = plot::write_overhead_chart(&overheads, &schema, &plots)?;
        eprintln!(
            "{} chart written to {}",
            "✓".green().bold(),
            path.display()
        );
    }

    Ok(())
}
