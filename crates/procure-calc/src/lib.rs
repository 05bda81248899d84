//! # Procure Calculation Engine
//!
//! 採購計劃計算引擎（彙總、安全庫存、投影、主流程）

pub mod consolidation;
pub mod planner;
pub mod projection;
pub mod safety_stock;

// Re-export 主要類型
pub use consolidation::{Consolidation, RequirementConsolidator};
pub use planner::PlanningEngine;
pub use projection::ResultProjection;
pub use safety_stock::SafetyStockCalculator;

use procure_core::{AllocationRow, ConsolidatedRow, Forecast};
use serde::{Deserialize, Serialize};

/// 採購計劃結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanningOutput {
    /// 需求預測（每條需求序列一筆）
    pub forecast_table: Vec<Forecast>,

    /// 彙總列
    pub consolidated_table: Vec<ConsolidatedRow>,

    /// 分配結果
    pub allocation_table: Vec<AllocationRow>,

    /// 因無供應商條件而排除的物料
    pub dropped_materials: Vec<String>,

    /// 警告信息
    pub warnings: Vec<PlanningWarning>,

    /// 目標函數值
    pub objective_value: f64,

    /// 計算耗時（毫秒）
    pub calculation_time_ms: Option<u128>,
}

impl PlanningOutput {
    /// 依物料 ID 查詢分配列
    pub fn allocation_for(&self, material_id: &str) -> Option<&AllocationRow> {
        self.allocation_table
            .iter()
            .find(|row| row.material_id() == material_id)
    }
}

/// 計劃警告
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanningWarning {
    pub material_id: String,
    pub message: String,
    pub severity: WarningSeverity,
}

impl PlanningWarning {
    pub fn new(material_id: String, message: String, severity: WarningSeverity) -> Self {
        Self {
            material_id,
            message,
            severity,
        }
    }

    pub fn info(material_id: String, message: String) -> Self {
        Self::new(material_id, message, WarningSeverity::Info)
    }

    pub fn warning(material_id: String, message: String) -> Self {
        Self::new(material_id, message, WarningSeverity::Warning)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningSeverity {
    Info,
    Warning,
}
