//! Lead records and the call-stage vocabulary used across the dashboard.

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::columns;

/// Cohort identifier grouping leads ingested together.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct BatchId(pub i64);

impl BatchId {
    pub fn new(value: i64) -> Self {
        BatchId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }

    /// Parse a spreadsheet cell such as `"12"` or `"12.0"`.
    ///
    /// Non-integral or non-numeric cells yield `None`.
    pub fn parse_cell(cell: &str) -> Option<Self> {
        let trimmed = cell.trim();
        if trimmed.is_empty() {
            return None;
        }
        if let Ok(v) = trimmed.parse::<i64>() {
            return Some(BatchId(v));
        }
        let v = trimmed.parse::<f64>().ok()?;
        if v.is_finite() && v.fract() == 0.0 && v.abs() < i64::MAX as f64 {
            Some(BatchId(v as i64))
        } else {
            None
        }
    }
}

impl fmt::Display for BatchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for BatchId {
    fn from(v: i64) -> Self {
        BatchId(v)
    }
}

/// Two-valued consolidated outcome of a call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OutcomeCategory {
    #[serde(rename = "Showed Up")]
    ShowedUp,
    #[serde(rename = "No-show Consolidated")]
    NoShowConsolidated,
}

impl OutcomeCategory {
    pub fn label(&self) -> &'static str {
        match self {
            OutcomeCategory::ShowedUp => "Showed Up",
            OutcomeCategory::NoShowConsolidated => "No-show Consolidated",
        }
    }
}

/// The two calls a lead goes through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CallStage {
    /// First call.
    First,
    /// Follow-up (RCP) call.
    Rcp,
}

/// Labels counted as a no-show on the first call.
pub const FIRST_CALL_NO_SHOW: &[&str] = &["Cancelled", "No-Show"];

/// Labels counted as a no-show on the RCP call. Includes the lowercase `No-show`
/// variant that only appears in this column.
pub const RCP_CALL_NO_SHOW: &[&str] = &["Cancelled", "No-Show", "No-show"];

impl CallStage {
    pub const ALL: [CallStage; 2] = [CallStage::First, CallStage::Rcp];

    /// Raw outcome column for this stage.
    pub fn outcome_column(&self) -> &'static str {
        match self {
            CallStage::First => columns::FIRST_CALL_STATUS,
            CallStage::Rcp => columns::RCP_CALL_STATUS,
        }
    }

    pub fn no_show_literals(&self) -> &'static [&'static str] {
        match self {
            CallStage::First => FIRST_CALL_NO_SHOW,
            CallStage::Rcp => RCP_CALL_NO_SHOW,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            CallStage::First => "1ST Call",
            CallStage::Rcp => "RCP Call",
        }
    }
}

/// One row of the lead-attendance sheet.
///
/// Typed fields are views over the raw cells; `columns` keeps every non-empty cell
/// keyed by header, including the time-block columns and unknown passthrough columns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LeadRecord {
    pub batch_id: Option<BatchId>,
    pub timezone_offset: Option<f64>,
    pub email: Option<String>,
    pub biography: Option<String>,
    pub call_1_outcome: Option<String>,
    pub call_2_outcome: Option<String>,
    pub call_1_category: Option<OutcomeCategory>,
    pub call_2_category: Option<OutcomeCategory>,
    pub columns: BTreeMap<String, String>,
}

impl LeadRecord {
    /// Raw text of `column`, or `None` when absent or empty.
    pub fn field(&self, column: &str) -> Option<&str> {
        self.columns
            .get(column)
            .map(String::as_str)
            .filter(|s| !s.is_empty())
    }

    pub fn outcome(&self, stage: CallStage) -> Option<&str> {
        match stage {
            CallStage::First => self.call_1_outcome.as_deref(),
            CallStage::Rcp => self.call_2_outcome.as_deref(),
        }
    }

    pub fn category(&self, stage: CallStage) -> Option<OutcomeCategory> {
        match stage {
            CallStage::First => self.call_1_category,
            CallStage::Rcp => self.call_2_category,
        }
    }
}
