//! 計劃結果模型（預測、彙總、分配）

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// 單期預測值
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastPoint {
    pub period: NaiveDate,
    /// 預測數量（可能為負，不做截斷）
    pub quantity: f64,
}

/// 平滑模型估計結果
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FittedModel {
    /// 水準平滑係數
    pub alpha: f64,
    /// 趨勢平滑係數
    pub beta: f64,
    /// 初始水準
    pub initial_level: f64,
    /// 初始趨勢
    pub initial_trend: f64,
    /// 樣本內一步預測誤差平方和
    pub sse: f64,
    /// 參數搜尋迭代次數
    pub iterations: usize,
}

/// 物料需求預測
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    /// 物料ID
    pub material_id: String,

    /// 預測序列（緊接最後歷史期間）
    pub points: Vec<ForecastPoint>,

    /// 模型參數
    pub model: FittedModel,
}

impl Forecast {
    /// 預測總需求
    pub fn total(&self) -> f64 {
        self.points.iter().map(|p| p.quantity).sum()
    }

    pub fn quantities(&self) -> Vec<f64> {
        self.points.iter().map(|p| p.quantity).collect()
    }

    pub fn horizon(&self) -> usize {
        self.points.len()
    }
}

/// 彙總列：物料 + 供應商條件 + 預測總需求 + 安全庫存
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsolidatedRow {
    pub material_id: String,
    pub sku: Option<String>,
    pub current_stock: Decimal,
    pub reorder_level: Decimal,
    pub supplier: Option<String>,
    pub lead_time_days: u32,
    pub unit_price: Decimal,

    /// 預測總需求
    pub total_forecasted_demand: f64,

    /// 安全庫存 = 提前期 × 預測總需求 / 窗口天數
    pub safety_stock: f64,
}

impl ConsolidatedRow {
    /// 訂購目標量（預測總需求 + 安全庫存）
    pub fn target_quantity(&self) -> f64 {
        self.total_forecasted_demand + self.safety_stock
    }
}

/// 單物料分配結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationResult {
    pub material_id: String,

    /// 最適訂購量
    pub quantity: f64,

    /// 成本係數
    pub cost_coefficient: f64,
}

/// 分配結果投影列（供呈現層顯示）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationRow {
    #[serde(flatten)]
    pub row: ConsolidatedRow,

    /// 最適訂購量
    pub optimal_order_quantity: f64,

    /// 成本係數
    pub cost_coefficient: f64,
}

impl AllocationRow {
    pub fn material_id(&self) -> &str {
        &self.row.material_id
    }
}
