//! 計劃參數配置

use serde::{Deserialize, Serialize};

use crate::PlanningError;

/// 採購計劃配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlanningConfig {
    /// 預測期數
    pub forecast_horizon: usize,

    /// 安全庫存正規化窗口（天）
    pub safety_stock_window_days: f64,

    /// 平滑模型參數估計設定
    pub smoothing: SmoothingConfig,

    /// 線性規劃求解設定
    pub solver: SolverConfig,
}

impl PlanningConfig {
    /// 創建預設配置
    pub fn new() -> Self {
        Self::default()
    }

    /// 從 JSON 載入配置，未提供的欄位取預設值
    ///
    /// ```
    /// use procure_core::PlanningConfig;
    ///
    /// let config = PlanningConfig::from_json_str(r#"{ "forecast_horizon": 6 }"#).unwrap();
    /// assert_eq!(config.forecast_horizon, 6);
    /// assert_eq!(config.safety_stock_window_days, 90.0);
    /// ```
    pub fn from_json_str(json: &str) -> crate::Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| PlanningError::InvalidInput(format!("配置解析失敗: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// 建構器模式：設置預測期數
    pub fn with_forecast_horizon(mut self, horizon: usize) -> Self {
        self.forecast_horizon = horizon;
        self
    }

    /// 建構器模式：設置安全庫存窗口
    pub fn with_safety_stock_window_days(mut self, days: f64) -> Self {
        self.safety_stock_window_days = days;
        self
    }

    /// 建構器模式：設置平滑模型設定
    pub fn with_smoothing(mut self, smoothing: SmoothingConfig) -> Self {
        self.smoothing = smoothing;
        self
    }

    /// 建構器模式：設置求解器設定
    pub fn with_solver(mut self, solver: SolverConfig) -> Self {
        self.solver = solver;
        self
    }

    /// 檢查配置
    pub fn validate(&self) -> crate::Result<()> {
        if self.forecast_horizon == 0 {
            return Err(PlanningError::InvalidInput("預測期數必須大於 0".to_string()));
        }
        if !(self.safety_stock_window_days.is_finite() && self.safety_stock_window_days > 0.0) {
            return Err(PlanningError::InvalidInput(format!(
                "安全庫存窗口必須為正: {}",
                self.safety_stock_window_days
            )));
        }
        if self.smoothing.max_iterations == 0 || self.solver.max_iterations == 0 {
            return Err(PlanningError::InvalidInput("迭代上限必須大於 0".to_string()));
        }
        if !(self.smoothing.tolerance > 0.0 && self.solver.feasibility_tolerance > 0.0) {
            return Err(PlanningError::InvalidInput("容差必須為正".to_string()));
        }
        Ok(())
    }
}

impl Default for PlanningConfig {
    fn default() -> Self {
        Self {
            forecast_horizon: 3,
            safety_stock_window_days: 90.0,
            smoothing: SmoothingConfig::default(),
            solver: SolverConfig::default(),
        }
    }
}

/// 平滑模型參數估計設定（Nelder–Mead）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SmoothingConfig {
    /// 最大迭代次數
    pub max_iterations: usize,

    /// 收斂容差（目標函數值的相對差）
    pub tolerance: f64,
}

impl Default for SmoothingConfig {
    fn default() -> Self {
        Self {
            max_iterations: 2000,
            tolerance: 1e-10,
        }
    }
}

/// 線性規劃求解設定（單純形法）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SolverConfig {
    /// 最大樞軸次數
    pub max_iterations: usize,

    /// 可行性容差
    pub feasibility_tolerance: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: 10_000,
            feasibility_tolerance: 1e-9,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = PlanningConfig::new();

        assert_eq!(config.forecast_horizon, 3);
        assert_eq!(config.safety_stock_window_days, 90.0);
        assert_eq!(config.smoothing.max_iterations, 2000);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_builder() {
        let config = PlanningConfig::new()
            .with_forecast_horizon(6)
            .with_safety_stock_window_days(30.0)
            .with_solver(SolverConfig {
                max_iterations: 50,
                feasibility_tolerance: 1e-6,
            });

        assert_eq!(config.forecast_horizon, 6);
        assert_eq!(config.safety_stock_window_days, 30.0);
        assert_eq!(config.solver.max_iterations, 50);
    }

    #[test]
    fn test_zero_horizon_rejected() {
        let config = PlanningConfig::new().with_forecast_horizon(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_from_json_nested() {
        let config = PlanningConfig::from_json_str(
            r#"{ "smoothing": { "max_iterations": 500 }, "safety_stock_window_days": 60 }"#,
        )
        .unwrap();

        assert_eq!(config.smoothing.max_iterations, 500);
        assert_eq!(config.smoothing.tolerance, 1e-10);
        assert_eq!(config.safety_stock_window_days, 60.0);
    }

    #[test]
    fn test_from_json_invalid() {
        assert!(PlanningConfig::from_json_str("{ not json").is_err());
        assert!(PlanningConfig::from_json_str(r#"{ "safety_stock_window_days": 0 }"#).is_err());
    }
}
