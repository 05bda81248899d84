//! 安全庫存計算

/// 預設正規化窗口（天）
pub const DEFAULT_WINDOW_DAYS: f64 = 90.0;

/// 安全庫存計算器
///
/// 安全庫存 = 提前期 × 預測總需求 / 窗口天數
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SafetyStockCalculator {
    window_days: f64,
}

impl Default for SafetyStockCalculator {
    fn default() -> Self {
        Self {
            window_days: DEFAULT_WINDOW_DAYS,
        }
    }
}

impl SafetyStockCalculator {
    pub fn new(window_days: f64) -> Self {
        Self { window_days }
    }

    pub fn window_days(&self) -> f64 {
        self.window_days
    }

    /// 計算安全庫存；預測總需求為負時結果也為負
    pub fn calculate(&self, lead_time_days: u32, total_forecasted_demand: f64) -> f64 {
        f64::from(lead_time_days) * total_forecasted_demand / self.window_days
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(10, 1800.0, 200.0)]
    #[case(14, 690.0, 107.33333333333333)]
    #[case(0, 500.0, 0.0)]
    #[case(9, -90.0, -9.0)]
    fn test_default_window(#[case] lead_time: u32, #[case] total: f64, #[case] expected: f64) {
        let calculator = SafetyStockCalculator::default();
        assert!((calculator.calculate(lead_time, total) - expected).abs() < 1e-9);
    }

    #[test]
    fn test_custom_window() {
        let calculator = SafetyStockCalculator::new(30.0);
        assert_eq!(calculator.calculate(15, 600.0), 300.0);
    }
}
