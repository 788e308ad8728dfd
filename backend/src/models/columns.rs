//! Column names of the lead-attendance sheet.

pub const BATCH_ID: &str = "batch_id";
pub const TIMEZONE_OFFSET: &str = "TimeZones Dif vs COT";
pub const EMAIL: &str = "public_email";
pub const BIOGRAPHY: &str = "public_email_biography";

pub const FIRST_CALL_STATUS: &str = "After 1ST status";
pub const RCP_CALL_STATUS: &str = "After RCP Status";

pub const FIRST_CALL_BLOCK_30MIN: &str = "1ST COL 30min Block";
pub const FIRST_CALL_BLOCK_2H: &str = "1ST COL 2h Block";
pub const RCP_CALL_BLOCK_30MIN: &str = "RCP COL 30min Block";
pub const RCP_CALL_BLOCK_2H: &str = "RCP COL 2h Block";
