//! Time-block granularity and the block columns it selects.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::columns;
use super::lead::CallStage;

/// Width of the time-of-day buckets used as pivot rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Granularity {
    #[default]
    #[serde(rename = "30min")]
    ThirtyMinutes,
    #[serde(rename = "2h")]
    TwoHours,
}

/// Block column per call stage for one granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockColumns {
    pub first: &'static str,
    pub rcp: &'static str,
}

const THIRTY_MINUTE_COLUMNS: BlockColumns = BlockColumns {
    first: columns::FIRST_CALL_BLOCK_30MIN,
    rcp: columns::RCP_CALL_BLOCK_30MIN,
};

const TWO_HOUR_COLUMNS: BlockColumns = BlockColumns {
    first: columns::FIRST_CALL_BLOCK_2H,
    rcp: columns::RCP_CALL_BLOCK_2H,
};

impl Granularity {
    pub const ALL: [Granularity; 2] = [Granularity::ThirtyMinutes, Granularity::TwoHours];

    pub fn block_columns(&self) -> BlockColumns {
        match self {
            Granularity::ThirtyMinutes => THIRTY_MINUTE_COLUMNS,
            Granularity::TwoHours => TWO_HOUR_COLUMNS,
        }
    }

    pub fn block_column(&self, stage: CallStage) -> &'static str {
        let cols = self.block_columns();
        match stage {
            CallStage::First => cols.first,
            CallStage::Rcp => cols.rcp,
        }
    }

    /// Query-string key.
    pub fn key(&self) -> &'static str {
        match self {
            Granularity::ThirtyMinutes => "30min",
            Granularity::TwoHours => "2h",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Granularity::ThirtyMinutes => "30 minutes",
            Granularity::TwoHours => "2 hours",
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Granularity {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "30min" | "30" | "30m" | "30 minutes" | "30 minutos" => Ok(Self::ThirtyMinutes),
            "2h" | "2" | "120" | "2 hours" | "2 horas" => Ok(Self::TwoHours),
            other => Err(format!(
                "Unknown granularity '{}'. Use '30min' or '2h'.",
                other
            )),
        }
    }
}
