//! 需求預測器

use procure_core::{DemandSeries, Forecast, ForecastPoint, PlanningError, Result, SmoothingConfig};

use crate::holt::HoltModel;
use crate::DemandForecaster;

/// 加法趨勢模型所需的最少觀測數
pub const MIN_OBSERVATIONS: usize = 2;

/// Holt 加法趨勢預測器（參數自動估計）
#[derive(Debug, Clone, Default)]
pub struct HoltForecaster {
    config: SmoothingConfig,
}

impl HoltForecaster {
    /// 創建新的預測器
    pub fn new(config: SmoothingConfig) -> Self {
        Self { config }
    }
}

impl DemandForecaster for HoltForecaster {
    fn forecast(&self, series: &DemandSeries, horizon: usize) -> Result<Forecast> {
        if horizon == 0 {
            return Err(PlanningError::InvalidMaterialData {
                material_id: series.material_id.clone(),
                detail: "預測期數必須大於 0".to_string(),
            });
        }

        if series.len() < MIN_OBSERVATIONS {
            return Err(PlanningError::InsufficientData {
                material_id: series.material_id.clone(),
                observations: series.len(),
                required: MIN_OBSERVATIONS,
            });
        }

        series.validate()?;

        let history = series.quantities();
        let model = HoltModel::fit(&history, &self.config).map_err(|iterations| {
            tracing::warn!(
                "物料 {} 平滑參數估計未收斂（迭代 {} 次）",
                series.material_id,
                iterations
            );
            PlanningError::ForecastConvergence {
                material_id: series.material_id.clone(),
                iterations,
            }
        })?;

        let periods = series.forecast_periods(horizon).ok_or_else(|| {
            PlanningError::InvalidMaterialData {
                material_id: series.material_id.clone(),
                detail: "預測期間日期溢出".to_string(),
            }
        })?;

        let points = periods
            .into_iter()
            .zip(model.forecast(horizon))
            .map(|(period, quantity)| ForecastPoint { period, quantity })
            .collect();

        let summary = model.summary();
        tracing::debug!(
            "物料 {} 預測完成：α={:.4}, β={:.4}, SSE={:.6}, 迭代 {} 次",
            series.material_id,
            summary.alpha,
            summary.beta,
            summary.sse,
            summary.iterations
        );

        Ok(Forecast {
            material_id: series.material_id.clone(),
            points,
            model: summary,
        })
    }
}
