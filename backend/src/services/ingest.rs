//! Ingestion: raw sheet table into typed lead records.

use std::collections::{BTreeMap, BTreeSet};

use log::{debug, warn};
use serde::Serialize;

use super::consolidation::consolidate_stage;
use crate::models::{columns, BatchId, CallStage, Granularity, LeadRecord, RawTable};

/// Ingested records plus what was learned about the sheet layout.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Dataset {
    pub records: Vec<LeadRecord>,
    /// Header names after cleaning, in sheet order.
    pub columns: Vec<String>,
    /// Expected columns absent from the sheet.
    pub missing_columns: Vec<String>,
    /// Timezone cells that were present but not numeric.
    pub invalid_timezone_cells: usize,
}

impl Dataset {
    pub fn has_column(&self, name: &str) -> bool {
        self.columns.iter().any(|c| c == name)
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct batch ids present in the records.
    pub fn batch_ids(&self) -> BTreeSet<BatchId> {
        self.records.iter().filter_map(|r| r.batch_id).collect()
    }

    /// Smallest and largest present timezone offset.
    pub fn timezone_bounds(&self) -> Option<(f64, f64)> {
        self.records
            .iter()
            .filter_map(|r| r.timezone_offset)
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}

fn is_blank(cell: &str) -> bool {
    cell.trim().is_empty()
}

/// Trim header names and drop wholly-empty columns and rows.
///
/// A column is dropped when none of its data cells has content, whatever its header.
/// Surviving columns with a blank header are named `Unnamed: <index>`.
pub fn clean_table(table: RawTable) -> RawTable {
    let width = table
        .rows
        .iter()
        .map(Vec::len)
        .chain(std::iter::once(table.headers.len()))
        .max()
        .unwrap_or(0);

    let keep: Vec<usize> = (0..width)
        .filter(|&col| (0..table.rows.len()).any(|row| !is_blank(table.cell(row, col))))
        .collect();

    let headers: Vec<String> = keep
        .iter()
        .map(|&col| {
            let name = table.headers.get(col).map(|h| h.trim()).unwrap_or("");
            if name.is_empty() {
                format!("Unnamed: {}", col)
            } else {
                name.to_string()
            }
        })
        .collect();

    let rows: Vec<Vec<String>> = (0..table.rows.len())
        .map(|row| {
            keep.iter()
                .map(|&col| table.cell(row, col).to_string())
                .collect::<Vec<_>>()
        })
        .filter(|cells| cells.iter().any(|c| !is_blank(c)))
        .collect();

    debug!(
        "Cleaned sheet: {} -> {} columns, {} -> {} rows",
        width,
        headers.len(),
        table.rows.len(),
        rows.len()
    );

    RawTable::new(headers, rows)
}

/// Columns the dashboard reads by name.
pub fn expected_columns() -> Vec<&'static str> {
    let mut cols = vec![
        columns::BATCH_ID,
        columns::TIMEZONE_OFFSET,
        columns::EMAIL,
        columns::BIOGRAPHY,
        columns::FIRST_CALL_STATUS,
        columns::RCP_CALL_STATUS,
    ];
    for granularity in Granularity::ALL {
        for stage in CallStage::ALL {
            cols.push(granularity.block_column(stage));
        }
    }
    cols
}

fn parse_offset(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

fn build_record(headers: &[String], cells: &[String]) -> (LeadRecord, bool) {
    let cells_by_header: BTreeMap<String, String> = headers
        .iter()
        .zip(cells)
        .filter(|(_, cell)| !cell.is_empty())
        .map(|(h, cell)| (h.clone(), cell.clone()))
        .collect();

    let text = |name: &str| cells_by_header.get(name).cloned();

    let raw_offset = cells_by_header.get(columns::TIMEZONE_OFFSET);
    let timezone_offset = raw_offset.and_then(|c| parse_offset(c));
    let invalid_offset = raw_offset.is_some_and(|c| !is_blank(c)) && timezone_offset.is_none();

    let call_1_outcome = text(columns::FIRST_CALL_STATUS);
    let call_2_outcome = text(columns::RCP_CALL_STATUS);

    let record = LeadRecord {
        batch_id: cells_by_header
            .get(columns::BATCH_ID)
            .and_then(|c| BatchId::parse_cell(c)),
        timezone_offset,
        email: text(columns::EMAIL),
        biography: text(columns::BIOGRAPHY),
        call_1_category: consolidate_stage(call_1_outcome.as_deref(), CallStage::First),
        call_2_category: consolidate_stage(call_2_outcome.as_deref(), CallStage::Rcp),
        call_1_outcome,
        call_2_outcome,
        columns: cells_by_header,
    };
    (record, invalid_offset)
}

/// Clean `table` and turn each row into a [`LeadRecord`].
pub fn ingest(table: RawTable) -> Dataset {
    let table = clean_table(table);

    let missing_columns: Vec<String> = expected_columns()
        .into_iter()
        .filter(|c| !table.has_column(c))
        .map(str::to_string)
        .collect();
    if !missing_columns.is_empty() {
        warn!("Sheet is missing expected columns: {:?}", missing_columns);
    }

    let mut invalid_timezone_cells = 0;
    let records = table
        .rows
        .iter()
        .map(|cells| {
            let (record, invalid_offset) = build_record(&table.headers, cells);
            if invalid_offset {
                invalid_timezone_cells += 1;
            }
            record
        })
        .collect();

    if invalid_timezone_cells > 0 {
        warn!(
            "{} timezone cells were not numeric and were treated as missing",
            invalid_timezone_cells
        );
    }

    Dataset {
        records,
        columns: table.headers,
        missing_columns,
        invalid_timezone_cells,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::OutcomeCategory;

    fn table(rows: &[&[&str]]) -> RawTable {
        RawTable::from_grid(
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn test_clean_table_drops_empty_rows_and_columns() {
        let raw = table(&[
            &[" batch_id ", "After 1ST status", "", "notes"],
            &["1", "Showed Up", "", ""],
            &["", "", "", ""],
            &["2", "", "", ""],
            &["", "  ", ""],
        ]);
        let cleaned = clean_table(raw);
        assert_eq!(cleaned.headers, vec!["batch_id", "After 1ST status"]);
        assert_eq!(cleaned.rows.len(), 2);
        assert_eq!(cleaned.rows[1], vec!["2", ""]);
    }

    #[test]
    fn test_clean_table_names_blank_headers() {
        let raw = table(&[&["a", ""], &["1", "x"]]);
        let cleaned = clean_table(raw);
        assert_eq!(cleaned.headers, vec!["a", "Unnamed: 1"]);
    }

    #[test]
    fn test_ingest_builds_typed_records() {
        let raw = table(&[
            &[
                "batch_id",
                "TimeZones Dif vs COT",
                "public_email",
                "After 1ST status",
                "After RCP Status",
                "1ST COL 30min Block",
                "extra",
            ],
            &["3.0", "-1.5", "a@b.co", "No-Show", "No-show", "08:00-08:30", "z"],
            &["4", "n/a", "", "Showed Up", "", "", ""],
        ]);
        let dataset = ingest(raw);

        assert_eq!(dataset.records.len(), 2);
        assert_eq!(dataset.invalid_timezone_cells, 1);
        assert!(dataset.missing_columns.contains(&"public_email_biography".to_string()));

        let first = &dataset.records[0];
        assert_eq!(first.batch_id, Some(BatchId(3)));
        assert_eq!(first.timezone_offset, Some(-1.5));
        assert_eq!(first.email.as_deref(), Some("a@b.co"));
        assert_eq!(first.call_1_category, Some(OutcomeCategory::NoShowConsolidated));
        assert_eq!(first.call_2_category, Some(OutcomeCategory::NoShowConsolidated));
        assert_eq!(first.field("1ST COL 30min Block"), Some("08:00-08:30"));
        assert_eq!(first.field("extra"), Some("z"));

        let second = &dataset.records[1];
        assert_eq!(second.timezone_offset, None);
        assert_eq!(second.email, None);
        assert_eq!(second.call_1_category, Some(OutcomeCategory::ShowedUp));
        assert_eq!(second.call_2_category, None);
    }

    #[test]
    fn test_whitespace_outcome_counts_as_present() {
        let raw = table(&[
            &["batch_id", "TimeZones Dif vs COT", "After 1ST status", "After RCP Status"],
            &["1", " ", "  ", ""],
        ]);
        let dataset = ingest(raw);
        let record = &dataset.records[0];

        assert_eq!(record.call_1_outcome.as_deref(), Some("  "));
        assert_eq!(record.call_1_category, Some(OutcomeCategory::ShowedUp));
        assert_eq!(record.call_2_category, None);
        assert_eq!(record.timezone_offset, None);
        assert_eq!(dataset.invalid_timezone_cells, 0);
    }

    #[test]
    fn test_dataset_bounds() {
        let raw = table(&[
            &["batch_id", "TimeZones Dif vs COT"],
            &["5", "2"],
            &["1", "-3"],
            &["5", ""],
        ]);
        let dataset = ingest(raw);
        assert_eq!(
            dataset.batch_ids().into_iter().collect::<Vec<_>>(),
            vec![BatchId(1), BatchId(5)]
        );
        assert_eq!(dataset.timezone_bounds(), Some((-3.0, 2.0)));
    }

    #[test]
    fn test_ingest_empty_table() {
        let dataset = ingest(RawTable::default());
        assert!(dataset.is_empty());
        assert_eq!(dataset.missing_columns.len(), expected_columns().len());
        assert_eq!(dataset.timezone_bounds(), None);
    }
}
