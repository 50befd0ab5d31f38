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

//! Aggregation and reporting pipeline for floating-point arithmetic
//! benchmarks.
//!
//! The pipeline repeatedly invokes an externally built benchmark executable,
//! collects its per-run CSV timings for a fixed set of operations and
//! implementations, averages the runs, derives overhead ratios against the
//! `native` baseline, caches the derived tables, and renders a fixed-width
//! report plus a grouped bar-chart SVG.
//!
//! Data flows strictly downward:
//!
//! ```text
//! task -> dispatch -> aggregate -> metrics -> store -> {report, plot}
//! ```
//!
//! The benchmark executable itself, and the build step producing it, are
//! external collaborators: the pipeline only depends on the executable
//! existing at a known path and honoring the CSV contract in [`schema`].

pub mod aggregate;
pub mod dispatch;
pub mod error;
pub mod metrics;
pub mod pipeline;
pub mod plot;
pub mod report;
pub mod schema;
pub mod store;
pub mod task;

pub use aggregate::AggregatedTable;
pub use dispatch::{dispatch, DispatchOptions};
pub use error::{BenchError, Result};
pub use metrics::{average_overheads, average_runtimes, MetricTable};
pub use pipeline::{load_overheads, run_benchmarks, RunOptions};
pub use plot::{render_overhead_chart, write_overhead_chart};
pub use report::render_overhead;
pub use schema::Schema;
pub use store::ResultStore;
pub use task::{BenchRunner, RawRun, TaskSpec};
