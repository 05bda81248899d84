//! 需求期間模型

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

/// 期間粒度（歷史序列與預測序列的間隔）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum PeriodGranularity {
    /// 每日
    Daily,
    /// 每週
    Weekly,
    /// 每月
    #[default]
    Monthly,
}

impl PeriodGranularity {
    /// 往後推算 `steps` 個期間
    pub fn advance(self, period: NaiveDate, steps: u32) -> Option<NaiveDate> {
        match self {
            Self::Daily => period.checked_add_days(Days::new(u64::from(steps))),
            Self::Weekly => period.checked_add_days(Days::new(7 * u64::from(steps))),
            Self::Monthly => period.checked_add_months(Months::new(steps)),
        }
    }
}
