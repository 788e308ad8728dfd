use serde::Serialize;

use crate::services::dashboard::{FilterOptions, Notice};
use crate::source::Snapshot;

/// Filter control choices for the current sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FiltersResponse {
    pub options: FilterOptions,
    pub notices: Vec<Notice>,
    pub snapshot: Option<Snapshot>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::dashboard::filter_options;
    use crate::services::ingest::Dataset;

    #[test]
    fn test_filters_response_serialization() {
        let response = FiltersResponse {
            options: filter_options(&Dataset::default()),
            notices: vec![Notice::warning("Column missing")],
            snapshot: None,
        };
        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["options"]["batches"], serde_json::json!([]));
        assert_eq!(json["options"]["timezone"], serde_json::Value::Null);
        assert_eq!(json["options"]["default_granularity"], "30min");
        assert_eq!(json["notices"][0]["level"], "warning");
    }
}
