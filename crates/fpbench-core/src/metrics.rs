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

//! Statistical reductions over the aggregated timings.
//!
//! Two derived tables: mean runtime per (operation, implementation) pair,
//! and mean overhead relative to the baseline implementation. Both are
//! immutable once computed and round-trip exactly through JSON.

use crate::aggregate::AggregatedTable;
use crate::error::{BenchError, Result};
use crate::schema::Schema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A derived metric keyed by operation and implementation.
///
/// Composite keys are modeled as nested maps so the table serializes to
/// plain JSON objects and deserializes back to an equal value. `BTreeMap`
/// keeps the persisted artifacts deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MetricTable {
    entries: BTreeMap<String, BTreeMap<String, f64>>,
}

impl MetricTable {
    /// Create an empty table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert one cell.
    pub fn insert(
        &mut self,
        operation: impl Into<String>,
        implementation: impl Into<String>,
        value: f64,
    ) {
        self.entries
            .entry(operation.into())
            .or_default()
            .insert(implementation.into(), value);
    }

    /// Look up one cell.
    pub fn get(&self, operation: &str, implementation: &str) -> Option<f64> {
        self.entries.get(operation)?.get(implementation).copied()
    }

    /// Number of cells in the table.
    pub fn len(&self) -> usize {
        self.entries.values().map(BTreeMap::len).sum()
    }

    /// Whether the table has no cells.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Operations present in the table.
    pub fn operations(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }
}

/// Arithmetic mean. Callers guarantee a non-empty sequence: the dispatcher
/// rejects zero iterations and the aggregator rejects empty run lists.
fn mean(samples: &[f64]) -> f64 {
    samples.iter().sum::<f64>() / samples.len() as f64
}

/// Mean runtime for every (operation, implementation) pair.
pub fn average_runtimes(aggregated: &AggregatedTable) -> MetricTable {
    let mut table = MetricTable::new();
    for (operation, implementation, samples) in aggregated.entries() {
        table.insert(operation, implementation, mean(samples));
    }
    table
}

/// Mean overhead ratio relative to the baseline, per operation.
///
/// The baseline's mean is computed from its own samples (not an
/// average-of-averages over other columns), then every non-baseline
/// implementation's mean is divided by it. Ratios are strictly positive for
/// positive input timings; 1.0 denotes parity with the baseline. The
/// baseline itself is excluded from the result's key space.
///
/// # Errors
///
/// Returns `MissingEntry` if the aggregated data lacks the baseline or a
/// declared comparison column for some operation (a contract violation the
/// header check should already have caught).
pub fn average_overheads(aggregated: &AggregatedTable, schema: &Schema) -> Result<MetricTable> {
    let mut table = MetricTable::new();
    for operation in aggregated.operations() {
        let baseline_samples = aggregated
            .samples(operation, schema.baseline())
            .ok_or_else(|| BenchError::MissingEntry {
                operation: operation.to_string(),
                implementation: schema.baseline().to_string(),
            })?;
        let baseline = mean(baseline_samples);

        for implementation in schema.comparison_columns() {
            let samples = aggregated.samples(operation, implementation).ok_or_else(|| {
                BenchError::MissingEntry {
                    operation: operation.to_string(),
                    implementation: implementation.to_string(),
                }
            })?;
            table.insert(operation, implementation, mean(samples) / baseline);
        }
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::RawRun;

    fn run(task_id: usize, rows: &[&[&str]]) -> RawRun {
        RawRun {
            task_id,
            records: rows
                .iter()
                .map(|row| row.iter().map(|cell| cell.to_string()).collect())
                .collect(),
        }
    }

    fn two_run_table() -> (Schema, AggregatedTable) {
        let schema = Schema::new(&["add"], &["native", "mpfr"], "native").unwrap();
        let runs = vec![
            run(0, &[&["op", "native", "mpfr"], &["add", "1.0", "2.0"]]),
            run(1, &[&["op", "native", "mpfr"], &["add", "1.0", "4.0"]]),
        ];
        let aggregated = AggregatedTable::from_runs(&schema, &runs).unwrap();
        (schema, aggregated)
    }

    #[test]
    fn test_average_runtime_is_arithmetic_mean() {
        let (_, aggregated) = two_run_table();
        let runtimes = average_runtimes(&aggregated);

        assert_eq!(runtimes.get("add", "native"), Some(1.0));
        assert_eq!(runtimes.get("add", "mpfr"), Some(3.0));
    }

    #[test]
    fn test_overhead_against_baseline_mean() {
        // avg(mpfr) / avg(native) = avg(2,4) / avg(1,1) = 3.0
        let (schema, aggregated) = two_run_table();
        let overheads = average_overheads(&aggregated, &schema).unwrap();

        assert_eq!(overheads.get("add", "mpfr"), Some(3.0));
    }

    #[test]
    fn test_baseline_excluded_from_overhead_table() {
        let (schema, aggregated) = two_run_table();
        let overheads = average_overheads(&aggregated, &schema).unwrap();

        assert_eq!(overheads.get("add", "native"), None);
        assert_eq!(overheads.len(), 1);
    }

    #[test]
    fn test_overhead_strictly_positive() {
        let schema = Schema::new(&["mul"], &["native", "mpfr"], "native").unwrap();
        let runs = vec![run(
            0,
            &[&["op", "native", "mpfr"], &["mul", "8.0", "0.5"]],
        )];
        let aggregated = AggregatedTable::from_runs(&schema, &runs).unwrap();
        let overheads = average_overheads(&aggregated, &schema).unwrap();

        let ratio = overheads.get("mul", "mpfr").unwrap();
        assert!(ratio > 0.0);
        // Faster than baseline: ratio below parity
        assert!(ratio < 1.0);
    }

    #[test]
    fn test_metric_table_round_trips_through_json() {
        let (schema, aggregated) = two_run_table();
        let overheads = average_overheads(&aggregated, &schema).unwrap();

        let json = serde_json::to_string(&overheads).unwrap();
        let restored: MetricTable = serde_json::from_str(&json).unwrap();
        assert_eq!(overheads, restored);
    }

    #[test]
    fn test_empty_table() {
        let table = MetricTable::new();
        assert!(table.is_empty());
        assert_eq!(table.get("add", "mpfr"), None);
    }
}
