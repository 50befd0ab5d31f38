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

//! Multi-run result aggregation.
//!
//! Merges the per-run tabular results into a nested mapping keyed by
//! operation and implementation, each entry holding the ordered sequence of
//! observed timings. Every run's header is validated against the declared
//! schema before any of its rows are ingested; a mismatch aborts the whole
//! aggregation rather than producing a partial table.

use crate::error::{BenchError, Result};
use crate::schema::Schema;
use crate::task::RawRun;
use std::collections::BTreeMap;

/// Timing samples grouped by operation, then by implementation.
///
/// Invariant: after construction from N runs, every present
/// (operation, implementation) sequence has exactly N samples, in run order.
#[derive(Debug, Clone)]
pub struct AggregatedTable {
    samples: BTreeMap<String, BTreeMap<String, Vec<f64>>>,
    run_count: usize,
}

impl AggregatedTable {
    /// Aggregate a batch of completed runs.
    ///
    /// # Errors
    ///
    /// * `InvalidConfig` for an empty run list;
    /// * `Csv` for a run with no header row or a row with the wrong field
    ///   count;
    /// * `SchemaMismatch` when a run's columns differ from the schema,
    ///   meaning the executable's output contract changed;
    /// * `InvalidTiming` for a non-numeric timing cell;
    /// * `SampleCount` when runs disagree on their row sets.
    pub fn from_runs(schema: &Schema, runs: &[RawRun]) -> Result<Self> {
        if runs.is_empty() {
            return Err(BenchError::invalid_config("cannot aggregate zero runs"));
        }

        let mut samples: BTreeMap<String, BTreeMap<String, Vec<f64>>> = BTreeMap::new();
        for run in runs {
            let header = run.header().ok_or_else(|| {
                BenchError::Csv(format!("task {} produced no output", run.task_id))
            })?;
            schema.validate_header(header)?;

            for row in run.data_rows() {
                if row.len() != header.len() {
                    return Err(BenchError::Csv(format!(
                        "task {}: row '{}' has {} fields, expected {}",
                        run.task_id,
                        row.first().map(String::as_str).unwrap_or(""),
                        row.len(),
                        header.len()
                    )));
                }
                let operation = &row[0];
                for (implementation, value) in header[1..].iter().zip(&row[1..]) {
                    let timing: f64 = value.parse().map_err(|_| BenchError::InvalidTiming {
                        operation: operation.clone(),
                        column: implementation.clone(),
                        value: value.clone(),
                    })?;
                    samples
                        .entry(operation.clone())
                        .or_default()
                        .entry(implementation.clone())
                        .or_default()
                        .push(timing);
                }
            }
        }

        let table = Self {
            samples,
            run_count: runs.len(),
        };
        table.check_sample_counts()?;
        Ok(table)
    }

    /// Every sequence must hold exactly one sample per run.
    fn check_sample_counts(&self) -> Result<()> {
        for (operation, by_impl) in &self.samples {
            for (implementation, timings) in by_impl {
                if timings.len() != self.run_count {
                    return Err(BenchError::SampleCount {
                        operation: operation.clone(),
                        implementation: implementation.clone(),
                        expected: self.run_count,
                        actual: timings.len(),
                    });
                }
            }
        }
        Ok(())
    }

    /// Sample sequence for one (operation, implementation) pair.
    pub fn samples(&self, operation: &str, implementation: &str) -> Option<&[f64]> {
        self.samples
            .get(operation)?
            .get(implementation)
            .map(Vec::as_slice)
    }

    /// Operations observed in the aggregated data.
    pub fn operations(&self) -> impl Iterator<Item = &str> {
        self.samples.keys().map(String::as_str)
    }

    /// Iterate all (operation, implementation, samples) entries.
    pub fn entries(&self) -> impl Iterator<Item = (&str, &str, &[f64])> {
        self.samples.iter().flat_map(|(operation, by_impl)| {
            by_impl.iter().map(move |(implementation, timings)| {
                (
                    operation.as_str(),
                    implementation.as_str(),
                    timings.as_slice(),
                )
            })
        })
    }

    /// Number of runs that went into this table.
    pub fn run_count(&self) -> usize {
        self.run_count
    }
}
