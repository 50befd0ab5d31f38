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

//! Aggregation and metric computation benchmarks.

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use fpbench_core::{average_overheads, average_runtimes, AggregatedTable, RawRun, Schema};

/// Synthetic runs matching the default schema contract.
fn synthetic_runs(count: usize) -> Vec<RawRun> {
    let schema = Schema::default();
    let mut header = vec!["op".to_string()];
    header.extend(schema.implementations().iter().cloned());

    (0..count)
        .map(|task_id| {
            let mut records = vec![header.clone()];
            for (row, operation) in schema.operations().iter().enumerate() {
                let mut record = vec![operation.clone()];
                for col in 0..schema.implementations().len() {
                    // Deterministic, positive, varies per cell
                    let timing = 1.0 + (task_id + row + col) as f64 * 0.5;
                    record.push(format!("{timing}"));
                }
                records.push(record);
            }
            RawRun { task_id, records }
        })
        .collect()
}

fn bench_aggregation(c: &mut Criterion) {
    let schema = Schema::default();
    let mut group = c.benchmark_group("aggregation");

    for &runs in &[10usize, 100] {
        let data = synthetic_runs(runs);
        group.bench_with_input(BenchmarkId::new("from_runs", runs), &data, |b, data| {
            b.iter(|| AggregatedTable::from_runs(&schema, data).unwrap());
        });
    }

    group.finish();
}

fn bench_metrics(c: &mut Criterion) {
    let schema = Schema::default();
    let data = synthetic_runs(100);
    let aggregated = AggregatedTable::from_runs(&schema, &data).unwrap();

    c.bench_function("average_runtimes", |b| {
        b.iter(|| average_runtimes(&aggregated));
    });
    c.bench_function("average_overheads", |b| {
        b.iter(|| average_overheads(&aggregated, &schema).unwrap());
    });
}

criterion_group!(benches, bench_aggregation, bench_metrics);
criterion_main!(benches);
