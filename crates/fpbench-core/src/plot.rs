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

//! Grouped bar-chart rendering of the overhead table.
//!
//! One bar chart per operation, composed into a single SVG grid with a
//! shared legend. Bars follow the declared column order so colors stay
//! consistent across panels; a dashed gridline marks parity with the
//! baseline at ratio 1.0.

use crate::error::{BenchError, Result};
use crate::metrics::MetricTable;
use crate::schema::Schema;
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};

/// Chart artifact written into the plots directory.
pub const OVERHEAD_CHART_FILE: &str = "overhead.svg";

/// Bar colors, indexed by comparison-column position.
const PALETTE: &[&str] = &[
    "#4e79a7", "#f28e2b", "#e15759", "#76b7b2", "#59a14f", "#edc949", "#b07aa1", "#9c755f",
];

const FIG_MARGIN: f64 = 20.0;
const PANEL_W: f64 = 360.0;
const PANEL_H: f64 = 250.0;
const GRID_COLS: usize = 3;
const LEGEND_COLS: usize = 4;
const LEGEND_ROW_H: f64 = 20.0;

/// Render the overhead table as a single SVG document.
///
/// # Errors
///
/// Returns `MissingEntry` if the table lacks a cell the schema declares.
pub fn render_overhead_chart(table: &MetricTable, schema: &Schema) -> Result<String> {
    let columns: Vec<&str> = schema.comparison_columns().collect();
    let operations = schema.operations();

    let grid_cols = GRID_COLS.min(operations.len().max(1));
    let grid_rows = (operations.len() + grid_cols - 1) / grid_cols;
    let legend_rows = (columns.len() + LEGEND_COLS - 1) / LEGEND_COLS;
    let legend_h = 16.0 + legend_rows as f64 * LEGEND_ROW_H;

    let fig_w = FIG_MARGIN * 2.0 + grid_cols as f64 * PANEL_W;
    let fig_h = FIG_MARGIN * 2.0 + grid_rows as f64 * PANEL_H + legend_h;

    let mut svg = String::new();
    let _ = writeln!(svg, "<?xml version=\"1.0\" encoding=\"UTF-8\"?>");
    let _ = writeln!(
        svg,
        "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{fig_w:.0}\" height=\"{fig_h:.0}\" \
         viewBox=\"0 0 {fig_w:.0} {fig_h:.0}\">"
    );
    let _ = writeln!(svg, "  <style>");
    let _ = writeln!(svg, "    .title {{ font: bold 13px sans-serif; }}");
    let _ = writeln!(svg, "    .label {{ font: 10px monospace; }}");
    let _ = writeln!(svg, "    .tick {{ font: 9px monospace; fill: #555; }}");
    let _ = writeln!(svg, "  </style>");
    let _ = writeln!(svg, "  <rect width=\"100%\" height=\"100%\" fill=\"#ffffff\"/>");

    for (index, operation) in operations.iter().enumerate() {
        let px = FIG_MARGIN + (index % grid_cols) as f64 * PANEL_W;
        let py = FIG_MARGIN + (index / grid_cols) as f64 * PANEL_H;
        render_panel(&mut svg, table, operation, &columns, px, py)?;
    }

    // Shared legend below the grid
    let legend_top = FIG_MARGIN + grid_rows as f64 * PANEL_H + 12.0;
    for (index, implementation) in columns.iter().enumerate() {
        let lx = FIG_MARGIN + 10.0 + (index % LEGEND_COLS) as f64 * 260.0;
        let ly = legend_top + (index / LEGEND_COLS) as f64 * LEGEND_ROW_H;
        let color = PALETTE[index % PALETTE.len()];
        let _ = writeln!(
            svg,
            "  <rect x=\"{lx:.1}\" y=\"{ly:.1}\" width=\"12\" height=\"12\" fill=\"{color}\"/>"
        );
        let _ = writeln!(
            svg,
            "  <text x=\"{:.1}\" y=\"{:.1}\" class=\"label\">{}</text>",
            lx + 17.0,
            ly + 10.0,
            schema.display_name(implementation)
        );
    }

    svg.push_str("</svg>\n");
    Ok(svg)
}

/// Render one operation's grouped bars into the panel at (px, py).
fn render_panel(
    svg: &mut String,
    table: &MetricTable,
    operation: &str,
    columns: &[&str],
    px: f64,
    py: f64,
) -> Result<()> {
    let values: Vec<f64> = columns
        .iter()
        .map(|implementation| {
            table
                .get(operation, implementation)
                .ok_or_else(|| BenchError::MissingEntry {
                    operation: operation.to_string(),
                    implementation: implementation.to_string(),
                })
        })
        .collect::<Result<_>>()?;

    let left = px + 46.0;
    let right = px + PANEL_W - 14.0;
    let top = py + 30.0;
    let bottom = py + PANEL_H - 28.0;
    let plot_w = right - left;
    let plot_h = bottom - top;

    // Headroom above the tallest bar keeps the value labels inside the panel;
    // the floor keeps the parity line visible when every ratio is below 1.
    let y_max = values.iter().copied().fold(1.0_f64, f64::max) * 1.15;

    let _ = writeln!(
        svg,
        "  <text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\" class=\"title\">{operation}</text>",
        px + PANEL_W / 2.0,
        py + 18.0
    );
    let _ = writeln!(
        svg,
        "  <line x1=\"{left:.1}\" y1=\"{top:.1}\" x2=\"{left:.1}\" y2=\"{bottom:.1}\" stroke=\"#333\"/>"
    );
    let _ = writeln!(
        svg,
        "  <line x1=\"{left:.1}\" y1=\"{bottom:.1}\" x2=\"{right:.1}\" y2=\"{bottom:.1}\" stroke=\"#333\"/>"
    );

    let y_parity = bottom - plot_h / y_max;
    let _ = writeln!(
        svg,
        "  <line x1=\"{left:.1}\" y1=\"{y_parity:.1}\" x2=\"{right:.1}\" y2=\"{y_parity:.1}\" \
         stroke=\"#999\" stroke-dasharray=\"4 3\"/>"
    );
    let _ = writeln!(
        svg,
        "  <text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"end\" class=\"tick\">1.0</text>",
        left - 4.0,
        y_parity + 3.0
    );
    let _ = writeln!(
        svg,
        "  <text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"end\" class=\"tick\">0</text>",
        left - 4.0,
        bottom + 3.0
    );

    let slot = plot_w / columns.len() as f64;
    let bar_w = slot * 0.72;
    for (index, value) in values.iter().enumerate() {
        let x = left + index as f64 * slot + (slot - bar_w) / 2.0;
        let h = value / y_max * plot_h;
        let y = bottom - h;
        let color = PALETTE[index % PALETTE.len()];
        let _ = writeln!(
            svg,
            "  <rect class=\"bar\" x=\"{x:.1}\" y=\"{y:.1}\" width=\"{bar_w:.1}\" \
             height=\"{h:.1}\" fill=\"{color}\" stroke=\"#333\" stroke-width=\"0.5\"/>"
        );
        let _ = writeln!(
            svg,
            "  <text x=\"{:.1}\" y=\"{:.1}\" text-anchor=\"middle\" class=\"label\">{value:.2}</text>",
            x + bar_w / 2.0,
            y - 4.0
        );
    }

    Ok(())
}

/// Render the chart and write it to `plots/overhead.svg`, overwriting any
/// prior version.
pub fn write_overhead_chart(
    table: &MetricTable,
    schema: &Schema,
    plots_dir: &Path,
) -> Result<PathBuf> {
    let svg = render_overhead_chart(table, schema)?;
    let path = plots_dir.join(OVERHEAD_CHART_FILE);
    fs::write(&path, svg).map_err(|e| BenchError::io_error(&path, e))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schema() -> Schema {
        Schema::new(&["add", "mul"], &["native", "mpfr", "softfloat"], "native").unwrap()
    }

    fn table() -> MetricTable {
        let mut table = MetricTable::new();
        table.insert("add", "mpfr", 3.0);
        table.insert("add", "softfloat", 12.5);
        table.insert("mul", "mpfr", 2.5);
        table.insert("mul", "softfloat", 10.0);
        table
    }

    #[test]
    fn test_one_panel_per_operation() {
        let svg = render_overhead_chart(&table(), &schema()).unwrap();
        assert_eq!(svg.matches("class=\"title\"").count(), 2);
        assert!(svg.contains(">add</text>"));
        assert!(svg.contains(">mul</text>"));
    }

    #[test]
    fn test_one_bar_per_comparison_column() {
        let svg = render_overhead_chart(&table(), &schema()).unwrap();
        // 2 operations x 2 comparison implementations
        assert_eq!(svg.matches("class=\"bar\"").count(), 4);
    }

    #[test]
    fn test_value_labels_rendered() {
        let svg = render_overhead_chart(&table(), &schema()).unwrap();
        assert!(svg.contains(">3.00</text>"));
        assert!(svg.contains(">12.50</text>"));
    }

    #[test]
    fn test_legend_uses_display_names() {
        let svg = render_overhead_chart(&table(), &schema()).unwrap();
        assert!(svg.contains(">MPFR</text>"));
        assert!(svg.contains(">Berkeley SoftFloat</text>"));
        // Baseline never appears in the legend
        assert!(!svg.contains(">Native f64</text>"));
    }

    #[test]
    fn test_missing_cell_is_an_error() {
        let mut incomplete = MetricTable::new();
        incomplete.insert("add", "mpfr", 3.0);
        let err = render_overhead_chart(&incomplete, &schema()).unwrap_err();
        assert!(matches!(err, BenchError::MissingEntry { .. }));
    }

    #[test]
    fn test_write_overhead_chart_creates_artifact() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_overhead_chart(&table(), &schema(), dir.path()).unwrap();
        assert!(path.ends_with(OVERHEAD_CHART_FILE));
        let contents = fs::read_to_string(path).unwrap();
        assert!(contents.starts_with("<?xml"));
        assert!(contents.trim_end().ends_with("</svg>"));
    }
}
