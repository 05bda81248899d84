//! 訂購量分配（線性規劃建模）
//!
//! 每個物料一個決策變數 xᵢ，成本係數
//!
//! ```text
//! cᵢ = w_price × 單價ᵢ + w_leadtime / 提前期ᵢ + w_safety × 安全庫存ᵢ
//! ```
//!
//! 約束為單位矩陣等式 xᵢ = 預測總需求ᵢ + 安全庫存ᵢ，且 xᵢ ≥ 0。
//! 每個變數被釘在自己的目標量上，權重不會在物料之間取捨；
//! 仍然完整建模並交給求解器，保留日後改為不等式或預算約束的形式。

use procure_core::{
    AllocationResult, ConsolidatedRow, PlanningError, PlanningPriorities, Result, SolverConfig,
};
use rust_decimal::prelude::ToPrimitive;

use crate::linear_program::{LinearProgram, LpStatus};
use crate::simplex::SimplexSolver;
use crate::{Allocation, LpSolver};

/// 訂購量分配器
#[derive(Debug, Clone, Default)]
pub struct AllocationOptimizer<S = SimplexSolver> {
    solver: S,
}

impl AllocationOptimizer<SimplexSolver> {
    /// 使用單純形求解器
    pub fn new(config: SolverConfig) -> Self {
        Self {
            solver: SimplexSolver::new(config),
        }
    }
}

impl<S: LpSolver> AllocationOptimizer<S> {
    /// 使用自訂求解器
    pub fn with_solver(solver: S) -> Self {
        Self { solver }
    }

    /// 計算單一物料的成本係數
    ///
    /// Local/Global Supplier 權重目前不納入成本。
    pub fn cost_coefficient(
        row: &ConsolidatedRow,
        priorities: &PlanningPriorities,
    ) -> Result<f64> {
        if row.lead_time_days == 0 {
            return Err(PlanningError::InvalidLeadTime {
                material_id: row.material_id.clone(),
                lead_time_days: row.lead_time_days,
            });
        }

        let unit_price = row
            .unit_price
            .to_f64()
            .ok_or_else(|| PlanningError::InvalidMaterialData {
                material_id: row.material_id.clone(),
                detail: format!("單價無法轉換: {}", row.unit_price),
            })?;

        Ok(priorities.pricing * unit_price
            + priorities.lead_time / f64::from(row.lead_time_days)
            + priorities.safety_stock * row.safety_stock)
    }

    /// 建立線性規劃模型，回傳（模型, 成本係數）
    pub fn formulate(
        rows: &[ConsolidatedRow],
        priorities: &PlanningPriorities,
    ) -> Result<(LinearProgram, Vec<f64>)> {
        let costs = rows
            .iter()
            .map(|row| Self::cost_coefficient(row, priorities))
            .collect::<Result<Vec<_>>>()?;

        let non_finite: Vec<String> = rows
            .iter()
            .zip(&costs)
            .filter(|(row, cost)| !cost.is_finite() || !row.target_quantity().is_finite())
            .map(|(row, _)| row.material_id.clone())
            .collect();
        if !non_finite.is_empty() {
            return Err(PlanningError::AllocationInfeasible {
                material_ids: non_finite,
                status: "NonFiniteInput".to_string(),
            });
        }

        let mut lp = LinearProgram::minimize(costs.clone());
        for (i, row) in rows.iter().enumerate() {
            lp.add_sparse_equality(vec![(i, 1.0)], row.target_quantity());
        }

        Ok((lp, costs))
    }

    /// 求解各物料最適訂購量
    pub fn allocate(
        &self,
        rows: &[ConsolidatedRow],
        priorities: &PlanningPriorities,
    ) -> Result<Allocation> {
        tracing::debug!("建立分配模型：{} 個物料", rows.len());

        let (lp, costs) = Self::formulate(rows, priorities)?;
        let solution = self.solver.solve(&lp)?;

        if !solution.is_success() {
            let material_ids = Self::blame(rows, solution.status);
            tracing::warn!(
                "分配求解失敗：{}，相關物料 {:?}",
                solution.status,
                material_ids
            );
            return Err(PlanningError::AllocationInfeasible {
                material_ids,
                status: solution.status.to_string(),
            });
        }

        if solution.x.len() != rows.len() {
            return Err(PlanningError::InternalConsistency {
                stage: procure_core::PlanningStage::Allocation,
                detail: format!(
                    "求解變數數量 {} 與物料數量 {} 不符",
                    solution.x.len(),
                    rows.len()
                ),
            });
        }

        // 求解器容差內放行的負值，同樣視為不可行
        let negative: Vec<String> = rows
            .iter()
            .zip(&solution.x)
            .filter(|(_, x)| **x < 0.0)
            .map(|(row, _)| row.material_id.clone())
            .collect();
        if !negative.is_empty() {
            return Err(PlanningError::AllocationInfeasible {
                material_ids: negative,
                status: LpStatus::Infeasible.to_string(),
            });
        }

        let results = rows
            .iter()
            .zip(solution.x)
            .zip(costs)
            .map(|((row, quantity), cost_coefficient)| AllocationResult {
                material_id: row.material_id.clone(),
                quantity,
                cost_coefficient,
            })
            .collect();

        tracing::debug!(
            "分配求解完成：目標值 {:.4}，樞軸 {} 次",
            solution.objective_value,
            solution.iterations
        );

        Ok(Allocation {
            results,
            objective_value: solution.objective_value,
            iterations: solution.iterations,
        })
    }

    /// 找出造成不可行的物料：目標量為負者；找不到時回報全部
    fn blame(rows: &[ConsolidatedRow], status: LpStatus) -> Vec<String> {
        let negative: Vec<String> = rows
            .iter()
            .filter(|row| status == LpStatus::Infeasible && row.target_quantity() < 0.0)
            .map(|row| row.material_id.clone())
            .collect();

        if negative.is_empty() {
            rows.iter().map(|row| row.material_id.clone()).collect()
        } else {
            negative
        }
    }
}
