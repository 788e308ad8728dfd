use serde::Serialize;

use crate::models::LeadRecord;
use crate::services::dashboard::Notice;

/// Filtered lead rows, in sheet order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordsResponse {
    pub total: usize,
    /// Sheet headers after cleaning.
    pub columns: Vec<String>,
    pub records: Vec<LeadRecord>,
    pub notices: Vec<Notice>,
}

impl RecordsResponse {
    pub fn new(columns: Vec<String>, records: Vec<LeadRecord>) -> Self {
        Self {
            total: records.len(),
            columns,
            records,
            notices: Vec::new(),
        }
    }

    pub fn with_notices(mut self, notices: impl IntoIterator<Item = Notice>) -> Self {
        self.notices.extend(notices);
        self
    }
}
