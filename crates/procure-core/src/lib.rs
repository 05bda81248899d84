//! # Procure Core
//!
//! 採購計劃核心資料模型與類型定義

pub mod config;
pub mod demand;
pub mod material;
pub mod period;
pub mod plan;
pub mod priority;
pub mod supplier;

// Re-export 主要類型
pub use config::{PlanningConfig, SmoothingConfig, SolverConfig};
pub use demand::{DemandObservation, DemandSeries};
pub use material::Material;
pub use period::PeriodGranularity;
pub use plan::{
    AllocationResult, AllocationRow, ConsolidatedRow, FittedModel, Forecast, ForecastPoint,
};
pub use priority::{PlanningPriorities, PriorityKind};
pub use supplier::SupplierTerm;

/// 計劃流程階段（用於錯誤定位）
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum PlanningStage {
    /// 輸入驗證
    Validation,
    /// 需求預測
    Forecast,
    /// 需求彙總
    Consolidation,
    /// 訂購量分配
    Allocation,
    /// 結果投影
    Projection,
}

/// 採購計劃錯誤類型
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PlanningError {
    #[error("歷史資料不足: 物料 {material_id} 只有 {observations} 筆，至少需要 {required} 筆")]
    InsufficientData {
        material_id: String,
        observations: usize,
        required: usize,
    },

    #[error("預測模型參數估計未收斂: 物料 {material_id}（迭代 {iterations} 次）")]
    ForecastConvergence {
        material_id: String,
        iterations: usize,
    },

    #[error("無效的提前期: 物料 {material_id} 提前期為 {lead_time_days} 天")]
    InvalidLeadTime {
        material_id: String,
        lead_time_days: u32,
    },

    #[error("分配求解失敗（{status}）: 物料 {material_ids:?}")]
    AllocationInfeasible {
        material_ids: Vec<String>,
        status: String,
    },

    #[error("內部一致性錯誤（{stage:?}）: {detail}")]
    InternalConsistency { stage: PlanningStage, detail: String },

    #[error("無效的物料資料: 物料 {material_id}，{detail}")]
    InvalidMaterialData { material_id: String, detail: String },

    #[error("無效的輸入: {0}")]
    InvalidInput(String),
}

impl PlanningError {
    /// 發生錯誤的流程階段
    pub fn stage(&self) -> PlanningStage {
        match self {
            Self::InsufficientData { .. } | Self::ForecastConvergence { .. } => {
                PlanningStage::Forecast
            }
            Self::InvalidLeadTime { .. } | Self::AllocationInfeasible { .. } => {
                PlanningStage::Allocation
            }
            Self::InternalConsistency { stage, .. } => *stage,
            Self::InvalidMaterialData { .. } | Self::InvalidInput(_) => PlanningStage::Validation,
        }
    }

    /// 與錯誤相關的物料ID
    pub fn material_ids(&self) -> Vec<String> {
        match self {
            Self::InsufficientData { material_id, .. }
            | Self::ForecastConvergence { material_id, .. }
            | Self::InvalidLeadTime { material_id, .. }
            | Self::InvalidMaterialData { material_id, .. } => vec![material_id.clone()],
            Self::AllocationInfeasible { material_ids, .. } => material_ids.clone(),
            Self::InternalConsistency { .. } | Self::InvalidInput(_) => Vec::new(),
        }
    }
}

pub type Result<T> = std::result::Result<T, PlanningError>;
