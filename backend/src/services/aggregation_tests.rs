use proptest::prelude::*;

use super::*;
use crate::models::{FIRST_CALL_NO_SHOW, RCP_CALL_NO_SHOW};

const BLOCK: &str = "block";
const OUTCOME: &str = "outcome";

fn row(block: Option<&str>, outcome: Option<&str>) -> LeadRecord {
    let mut record = LeadRecord::default();
    if let Some(b) = block {
        record.columns.insert(BLOCK.to_string(), b.to_string());
    }
    if let Some(o) = outcome {
        record.columns.insert(OUTCOME.to_string(), o.to_string());
    }
    record
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 0.01
}

#[test]
fn test_single_block_example() {
    let records = vec![
        row(Some("08:00-08:30"), Some("Showed Up")),
        row(Some("08:00-08:30"), Some("Cancelled")),
        row(Some("08:00-08:30"), Some("No-Show")),
    ];
    let table = build_table(&records, BLOCK, OUTCOME, FIRST_CALL_NO_SHOW);

    assert_eq!(table.rows.len(), 1);
    let r = &table.rows[0];
    assert_eq!(r.label, "08:00-08:30");
    assert_eq!(r.grand_total, 3);
    assert_eq!(r.no_show, 2);
    assert_eq!(r.showed_up, 1);
    assert!(approx(r.showed_up_pct, 33.33));
    assert!(approx(r.no_show_pct, 66.67));
    assert!(approx(r.weight_pct, 100.0));

    let t = &table.total;
    assert_eq!(t.label, GRAND_TOTAL);
    assert_eq!(t.counts, r.counts);
    assert_eq!(
        (t.grand_total, t.no_show, t.showed_up),
        (r.grand_total, r.no_show, r.showed_up)
    );
    assert!(approx(t.showed_up_pct, r.showed_up_pct));
    assert!(approx(t.no_show_pct, r.no_show_pct));
    assert!(approx(t.weight_pct, 100.0));
}

#[test]
fn test_outcome_columns_are_raw_labels_sorted() {
    let records = vec![
        row(Some("A"), Some("Showed Up")),
        row(Some("A"), Some("Cancelled")),
        row(Some("B"), Some("No-Show")),
    ];
    let table = build_table(&records, BLOCK, OUTCOME, FIRST_CALL_NO_SHOW);
    assert_eq!(table.outcome_labels, vec!["Cancelled", "No-Show", "Showed Up"]);
    assert_eq!(table.rows[0].counts, vec![1, 0, 1]);
    assert_eq!(table.rows[1].counts, vec![0, 1, 0]);
    assert_eq!(
        table.column_names().last().map(String::as_str),
        Some(WEIGHT_PCT)
    );
}

#[test]
fn test_rows_sorted_by_block_label() {
    let records = vec![
        row(Some("10:00-10:30"), Some("Showed Up")),
        row(Some("08:00-08:30"), Some("Showed Up")),
        row(Some("09:00-09:30"), Some("Showed Up")),
    ];
    let table = build_table(&records, BLOCK, OUTCOME, FIRST_CALL_NO_SHOW);
    let labels: Vec<_> = table.rows.iter().map(|r| r.label.as_str()).collect();
    assert_eq!(labels, vec!["08:00-08:30", "09:00-09:30", "10:00-10:30"]);
}

#[test]
fn test_null_block_or_outcome_dropped() {
    let records = vec![
        row(Some("A"), Some("Showed Up")),
        row(None, Some("Cancelled")),
        row(Some("A"), None),
        row(Some("B"), Some("")),
        row(Some(""), Some("No-Show")),
    ];
    let table = build_table(&records, BLOCK, OUTCOME, FIRST_CALL_NO_SHOW);
    assert_eq!(table.rows.len(), 1);
    assert_eq!(table.total.grand_total, 1);
    assert_eq!(table.outcome_labels, vec!["Showed Up"]);
}

#[test]
fn test_weight_shares_sum_to_hundred() {
    let records = vec![
        row(Some("A"), Some("Showed Up")),
        row(Some("A"), Some("Showed Up")),
        row(Some("A"), Some("Showed Up")),
        row(Some("B"), Some("No-Show")),
    ];
    let table = build_table(&records, BLOCK, OUTCOME, FIRST_CALL_NO_SHOW);
    assert!(approx(table.rows[0].weight_pct, 75.0));
    assert!(approx(table.rows[1].weight_pct, 25.0));
    let sum: f64 = table.rows.iter().map(|r| r.weight_pct).sum();
    assert!(approx(sum, 100.0));
}

#[test]
fn test_terminal_row_recomputed_not_averaged() {
    // A: 1 of 1 showed up (100%), B: 0 of 3 showed up (0%).
    // Averaging rows would give 50%; recomputing gives 25%.
    let records = vec![
        row(Some("A"), Some("Showed Up")),
        row(Some("B"), Some("No-Show")),
        row(Some("B"), Some("No-Show")),
        row(Some("B"), Some("Cancelled")),
    ];
    let table = build_table(&records, BLOCK, OUTCOME, FIRST_CALL_NO_SHOW);
    assert!(approx(table.total.showed_up_pct, 25.0));
    assert!(approx(table.total.no_show_pct, 75.0));
}

#[test]
fn test_empty_table_percentages_are_nan() {
    let table = build_table(&[], BLOCK, OUTCOME, FIRST_CALL_NO_SHOW);
    assert!(table.is_empty());
    assert_eq!(table.total.grand_total, 0);
    assert!(table.total.showed_up_pct.is_nan());
    assert!(table.total.no_show_pct.is_nan());
    assert!(table.total.weight_pct.is_nan());
}

#[test]
fn test_stage_literal_sets_change_split() {
    let records = vec![
        row(Some("A"), Some("No-show")),
        row(Some("A"), Some("Showed Up")),
    ];
    let first = build_table(&records, BLOCK, OUTCOME, FIRST_CALL_NO_SHOW);
    let rcp = build_table(&records, BLOCK, OUTCOME, RCP_CALL_NO_SHOW);
    assert_eq!(first.rows[0].no_show, 0);
    assert_eq!(rcp.rows[0].no_show, 1);
}

#[test]
fn test_build_stage_table_uses_granularity_columns() {
    let mut record = LeadRecord::default();
    record
        .columns
        .insert("1ST COL 2h Block".to_string(), "08:00-10:00".to_string());
    record
        .columns
        .insert("After 1ST status".to_string(), "Cancelled".to_string());

    let two_hour = build_stage_table(
        std::slice::from_ref(&record),
        CallStage::First,
        Granularity::TwoHours,
    );
    assert_eq!(two_hour.rows.len(), 1);
    assert_eq!(two_hour.rows[0].no_show, 1);

    let thirty = build_stage_table(&[record], CallStage::First, Granularity::ThirtyMinutes);
    assert!(thirty.is_empty());
}

#[test]
fn test_nan_serializes_as_null() {
    let table = build_table(&[], BLOCK, OUTCOME, FIRST_CALL_NO_SHOW);
    let json = serde_json::to_value(&table).unwrap();
    assert!(json["total"]["showed_up_pct"].is_null());
}

fn arb_rows() -> impl Strategy<Value = Vec<LeadRecord>> {
    let block = proptest::option::of(prop_oneof![Just("A"), Just("B"), Just("C"), Just("")]);
    let outcome = proptest::option::of(prop_oneof![
        Just("Showed Up"),
        Just("Cancelled"),
        Just("No-Show"),
        Just("No-show"),
        Just("Rescheduled"),
    ]);
    proptest::collection::vec((block, outcome), 0..60)
        .prop_map(|pairs| pairs.into_iter().map(|(b, o)| row(b, o)).collect())
}

proptest! {
    #[test]
    fn prop_rows_split_into_no_show_and_showed_up(records in arb_rows()) {
        let table = build_table(&records, BLOCK, OUTCOME, RCP_CALL_NO_SHOW);
        for r in table.all_rows() {
            prop_assert_eq!(r.showed_up + r.no_show, r.grand_total);
            prop_assert_eq!(r.counts.iter().sum::<u64>(), r.grand_total);
            if r.grand_total > 0 {
                prop_assert!((r.showed_up_pct + r.no_show_pct - 100.0).abs() < 1e-9);
            }
        }
        let data_total: u64 = table.rows.iter().map(|r| r.grand_total).sum();
        prop_assert_eq!(table.total.grand_total, data_total);
    }
}
