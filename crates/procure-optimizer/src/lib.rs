//! # Procure Optimizer
//!
//! 優化算法模組（線性規劃、訂購量分配）

pub mod allocation;
pub mod linear_program;
pub mod simplex;

// Re-export 主要類型
pub use allocation::AllocationOptimizer;
pub use linear_program::{LinearProgram, LpSolution, LpStatus};
pub use simplex::SimplexSolver;

use procure_core::AllocationResult;
use serde::{Deserialize, Serialize};

/// 線性規劃求解介面
///
/// 求解失敗（不可行、無界、達迭代上限）以 `LpSolution::status` 回報，
/// `Err` 只用於模型本身不合法。
pub trait LpSolver {
    fn solve(&self, lp: &LinearProgram) -> procure_core::Result<LpSolution>;
}

/// 分配結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Allocation {
    /// 各物料訂購量（與輸入列同順序）
    pub results: Vec<AllocationResult>,

    /// 目標函數值 Σ cᵢxᵢ
    pub objective_value: f64,

    /// 求解器樞軸次數
    pub iterations: usize,
}
