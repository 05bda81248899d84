//! Holt 加法趨勢指數平滑（無季節性）
//!
//! 狀態方程：
//!
//! ```text
//! ŷ(t)  = l(t-1) + b(t-1)
//! l(t)  = α·y(t) + (1-α)·(l(t-1) + b(t-1))
//! b(t)  = β·(l(t) - l(t-1)) + (1-β)·b(t-1)
//! ŷ(n+h) = l(n) + h·b(n)
//! ```
//!
//! α、β、l(0)、b(0) 以最小化樣本內一步預測誤差平方和的方式共同估計。

use procure_core::{FittedModel, SmoothingConfig};

use crate::nelder_mead::NelderMead;

/// 模型參數
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoltParams {
    pub alpha: f64,
    pub beta: f64,
    pub initial_level: f64,
    pub initial_trend: f64,
}

impl HoltParams {
    /// 搜尋起點：b(0) = y1 − y0，l(0) = y0 − b(0)，使首期預測等於首期觀測
    fn starting_point(history: &[f64]) -> Self {
        let trend = history[1] - history[0];
        Self {
            alpha: 0.5,
            beta: 0.1,
            initial_level: history[0] - trend,
            initial_trend: trend,
        }
    }

    fn to_vec(self) -> Vec<f64> {
        vec![self.alpha, self.beta, self.initial_level, self.initial_trend]
    }

    /// 搜尋向量 → 參數，平滑係數截斷至 [0, 1]
    fn from_slice(x: &[f64]) -> Self {
        Self {
            alpha: x[0].clamp(0.0, 1.0),
            beta: x[1].clamp(0.0, 1.0),
            initial_level: x[2],
            initial_trend: x[3],
        }
    }
}

/// 平滑後的最終狀態
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HoltState {
    pub level: f64,
    pub trend: f64,
    pub sse: f64,
}

/// 已估計的 Holt 模型
#[derive(Debug, Clone, PartialEq)]
pub struct HoltModel {
    params: HoltParams,
    state: HoltState,
    iterations: usize,
}

impl HoltModel {
    /// 依給定參數跑一遍平滑
    pub fn smooth(history: &[f64], params: HoltParams) -> HoltState {
        let HoltParams {
            alpha,
            beta,
            initial_level,
            initial_trend,
        } = params;

        let mut level = initial_level;
        let mut trend = initial_trend;
        let mut sse = 0.0;

        for &y in history {
            let predicted = level + trend;
            let error = y - predicted;
            sse += error * error;

            let previous_level = level;
            level = alpha * y + (1.0 - alpha) * predicted;
            trend = beta * (level - previous_level) + (1.0 - beta) * trend;
        }

        HoltState { level, trend, sse }
    }

    /// 估計模型參數
    ///
    /// 搜尋在迭代上限內未收斂或目標值非有限時，回傳 `Err(已用迭代次數)`。
    /// 觀測少於 2 筆時不做搜尋，回傳 `Err(0)`。
    pub fn fit(history: &[f64], config: &SmoothingConfig) -> Result<Self, usize> {
        if history.len() < 2 {
            return Err(0);
        }
        let start = HoltParams::starting_point(history).to_vec();
        let search = NelderMead::new(config.max_iterations, config.tolerance);
        let minimum = search.minimize(
            |x| Self::smooth(history, HoltParams::from_slice(x)).sse,
            &start,
        );

        if !minimum.converged || !minimum.value.is_finite() {
            return Err(minimum.iterations);
        }

        let params = HoltParams::from_slice(&minimum.point);
        let state = Self::smooth(history, params);
        if !(state.level.is_finite() && state.trend.is_finite()) {
            return Err(minimum.iterations);
        }

        Ok(Self {
            params,
            state,
            iterations: minimum.iterations,
        })
    }

    /// 預測未來 `horizon` 期
    pub fn forecast(&self, horizon: usize) -> Vec<f64> {
        (1..=horizon)
            .map(|h| self.state.level + h as f64 * self.state.trend)
            .collect()
    }

    pub fn params(&self) -> HoltParams {
        self.params
    }

    pub fn state(&self) -> HoltState {
        self.state
    }

    /// 轉為對外的模型摘要
    pub fn summary(&self) -> FittedModel {
        FittedModel {
            alpha: self.params.alpha,
            beta: self.params.beta,
            initial_level: self.params.initial_level,
            initial_trend: self.params.initial_trend,
            sse: self.state.sse,
            iterations: self.iterations,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smooth_exact_line() {
        // 完美直線：起點參數即零誤差
        let history = [100.0, 110.0, 120.0, 130.0];
        let params = HoltParams::starting_point(&history);
        let state = HoltModel::smooth(&history, params);

        assert_eq!(state.sse, 0.0);
        assert_eq!(state.level, 130.0);
        assert_eq!(state.trend, 10.0);
    }

    #[test]
    fn test_fit_linear_series_extrapolates() {
        let history = [100.0, 110.0, 120.0, 130.0];
        let model = HoltModel::fit(&history, &SmoothingConfig::default()).unwrap();
        let forecast = model.forecast(3);

        assert!(model.state().sse < 1e-6);
        assert!((forecast[0] - 140.0).abs() < 1e-2);
        assert!((forecast[2] - 160.0).abs() < 1e-2);
    }

    #[test]
    fn test_fit_keeps_smoothing_in_unit_interval() {
        let history = [40.0, 45.0, 50.0, 44.0, 58.0, 61.0, 55.0, 70.0];
        let model = HoltModel::fit(&history, &SmoothingConfig::default()).unwrap();
        let params = model.params();

        assert!((0.0..=1.0).contains(&params.alpha));
        assert!((0.0..=1.0).contains(&params.beta));
        // 估計後的誤差不會比起點差
        let start = HoltModel::smooth(&history, HoltParams::starting_point(&history));
        assert!(model.state().sse <= start.sse);
    }

    #[test]
    fn test_fit_iteration_limit() {
        let history = [40.0, 45.0, 50.0, 44.0, 58.0, 61.0, 55.0, 70.0];
        let config = SmoothingConfig {
            max_iterations: 1,
            tolerance: 1e-12,
        };

        assert_eq!(HoltModel::fit(&history, &config), Err(1));
    }

    #[test]
    fn test_fit_requires_two_points() {
        assert_eq!(HoltModel::fit(&[5.0], &SmoothingConfig::default()), Err(0));
    }

    #[test]
    fn test_decreasing_series_can_go_negative() {
        let history = [30.0, 20.0, 10.0];
        let model = HoltModel::fit(&history, &SmoothingConfig::default()).unwrap();
        let forecast = model.forecast(3);

        // 趨勢外推可為負值，不做截斷
        assert!(forecast[2] < 0.0);
    }
}
