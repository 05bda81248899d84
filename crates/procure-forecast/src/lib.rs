//! # Procure Forecast
//!
//! 需求預測模組（加法趨勢指數平滑）

pub mod forecaster;
pub mod holt;
pub mod nelder_mead;

// Re-export 主要類型
pub use forecaster::{HoltForecaster, MIN_OBSERVATIONS};
pub use holt::{HoltModel, HoltParams};

use procure_core::{DemandSeries, Forecast};

/// 需求預測介面
///
/// 只要滿足加法趨勢、無季節性的約定，不同的參數估計實作可互相替換。
pub trait DemandForecaster {
    /// 預測緊接最後歷史期間之後的 `horizon` 期需求
    fn forecast(&self, series: &DemandSeries, horizon: usize) -> procure_core::Result<Forecast>;
}
