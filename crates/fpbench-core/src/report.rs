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

//! Fixed-width text rendering of the overhead table.

use crate::error::{BenchError, Result};
use crate::metrics::MetricTable;
use crate::schema::Schema;
use std::fmt::Write as _;

const OP_WIDTH: usize = 12;
const CELL_WIDTH: usize = 12;

/// Render the overhead table as fixed-width columns.
///
/// One header row naming the comparison implementations (baseline
/// excluded), then one row per operation in canonical order, each cell a
/// ratio to two decimal places. Pure formatting; no mutation.
///
/// # Errors
///
/// Returns `MissingEntry` if the table lacks a cell the schema declares.
pub fn render_overhead(table: &MetricTable, schema: &Schema) -> Result<String> {
    let mut out = String::new();

    let _ = write!(out, "{:<OP_WIDTH$}", "op");
    for implementation in schema.comparison_columns() {
        let _ = write!(out, "{implementation:>CELL_WIDTH$}");
    }
    out.push('\n');

    for operation in schema.operations() {
        let _ = write!(out, "{operation:<OP_WIDTH$}");
        for implementation in schema.comparison_columns() {
            let overhead =
                table
                    .get(operation, implementation)
                    .ok_or_else(|| BenchError::MissingEntry {
                        operation: operation.clone(),
                        implementation: implementation.to_string(),
                    })?;
            let _ = write!(out, "{overhead:>CELL_WIDTH$.2}");
        }
        out.push('\n');
    }

    Ok(out)
}
