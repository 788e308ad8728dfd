//! Render-ready views for the dashboard frontend.
//!
//! The frontend draws tables and bar charts; these types carry the scalar values
//! together with per-column format strings and color-scale rules.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::LeadRecord;

use super::aggregation::{
    AggregateRow, AggregateTable, GRAND_TOTAL, NO_SHOW, NO_SHOW_PCT, SHOWED_UP, SHOWED_UP_PCT,
    WEIGHT_PCT,
};

pub const COUNT_FORMAT: &str = "{:.0}";
pub const PERCENT_FORMAT: &str = "{:.2}%";

pub const COUNT_PALETTE: &str = "viridis";
pub const PERCENT_PALETTE: &str = "plasma_r";

/// A table cell. NaN percentages serialize as `null` and render blank.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    Text(String),
    Count(u64),
    Percent(f64),
}

/// Direction along which a color scale is normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScaleAxis {
    Row,
    Column,
}

/// Gradient applied to a group of columns.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorScaleRule {
    pub name: String,
    pub columns: Vec<String>,
    pub palette: String,
    pub axis: ScaleAxis,
    /// Whether the terminal `Grand Total` row takes part in the scale.
    pub include_total_row: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableRow {
    pub label: String,
    pub cells: Vec<Cell>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableView {
    /// Header of the row-label column.
    pub index_column: String,
    pub columns: Vec<String>,
    pub rows: Vec<TableRow>,
    /// Column name to display format.
    pub formats: BTreeMap<String, String>,
    pub color_scales: Vec<ColorScaleRule>,
}

impl TableView {
    /// Cell by row label and column name.
    pub fn cell(&self, row_label: &str, column: &str) -> Option<&Cell> {
        let col = self.columns.iter().position(|c| c == column)?;
        self.rows
            .iter()
            .find(|r| r.label == row_label)
            .and_then(|r| r.cells.get(col))
    }
}

fn row_cells(row: &AggregateRow) -> Vec<Cell> {
    row.counts
        .iter()
        .map(|c| Cell::Count(*c))
        .chain([
            Cell::Count(row.grand_total),
            Cell::Count(row.no_show),
            Cell::Count(row.showed_up),
            Cell::Percent(row.showed_up_pct),
            Cell::Percent(row.no_show_pct),
            Cell::Percent(row.weight_pct),
        ])
        .collect()
}

/// Lay out an aggregate table for display.
pub fn table_view(table: &AggregateTable) -> TableView {
    let percent_columns: Vec<String> = [SHOWED_UP_PCT, NO_SHOW_PCT, WEIGHT_PCT]
        .iter()
        .map(|c| c.to_string())
        .collect();
    let count_columns: Vec<String> = table
        .outcome_column_names()
        .into_iter()
        .chain([GRAND_TOTAL, NO_SHOW, SHOWED_UP].iter().map(|c| c.to_string()))
        .collect();

    let formats = count_columns
        .iter()
        .map(|c| (c.clone(), COUNT_FORMAT.to_string()))
        .chain(
            percent_columns
                .iter()
                .map(|c| (c.clone(), PERCENT_FORMAT.to_string())),
        )
        .collect();

    let rows = table
        .all_rows()
        .map(|r| TableRow {
            label: r.label.clone(),
            cells: row_cells(r),
        })
        .collect();

    TableView {
        index_column: table.block_column.clone(),
        columns: table.column_names(),
        rows,
        formats,
        color_scales: vec![
            ColorScaleRule {
                name: "frequency".to_string(),
                columns: count_columns,
                palette: COUNT_PALETTE.to_string(),
                axis: ScaleAxis::Row,
                include_total_row: false,
            },
            ColorScaleRule {
                name: "percentage".to_string(),
                columns: percent_columns,
                palette: PERCENT_PALETTE.to_string(),
                axis: ScaleAxis::Row,
                include_total_row: false,
            },
        ],
    }
}

/// Lay out raw records under the given headers, one row per record.
///
/// Absent cells are empty text. Row labels are 1-based positions.
pub fn records_view(columns: &[String], records: &[LeadRecord]) -> TableView {
    let rows = records
        .iter()
        .enumerate()
        .map(|(i, record)| TableRow {
            label: (i + 1).to_string(),
            cells: columns
                .iter()
                .map(|c| Cell::Text(record.field(c).unwrap_or("").to_string()))
                .collect(),
        })
        .collect();

    TableView {
        index_column: "#".to_string(),
        columns: columns.to_vec(),
        rows,
        formats: BTreeMap::new(),
        color_scales: Vec::new(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Bar {
    pub label: String,
    pub count: u64,
    pub percent: f64,
    /// Percentage of the chart total, for display on the bar.
    pub data_label: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BarChart {
    pub title: String,
    pub total: u64,
    pub bars: Vec<Bar>,
}

/// Bar chart of a categorical count series, labelled with shares of the total.
pub fn bar_chart(title: impl Into<String>, counts: &[(String, u64)]) -> BarChart {
    let total: u64 = counts.iter().map(|(_, c)| c).sum();
    let bars = counts
        .iter()
        .map(|(label, count)| {
            let percent = if total == 0 {
                f64::NAN
            } else {
                100.0 * *count as f64 / total as f64
            };
            Bar {
                label: label.clone(),
                count: *count,
                percent,
                data_label: format!("{:.2}%", percent),
            }
        })
        .collect();

    BarChart {
        title: title.into(),
        total,
        bars,
    }
}
