//! 結果投影：分配結果併回彙總列

use procure_core::{
    AllocationResult, AllocationRow, ConsolidatedRow, PlanningError, PlanningStage, Result,
};
use std::collections::HashMap;

/// 結果投影
pub struct ResultProjection;

impl ResultProjection {
    /// 依物料 ID 一對一合併，保留彙總列順序
    pub fn project(
        rows: &[ConsolidatedRow],
        results: &[AllocationResult],
    ) -> Result<Vec<AllocationRow>> {
        if rows.len() != results.len() {
            return Err(PlanningError::InternalConsistency {
                stage: PlanningStage::Projection,
                detail: format!("彙總列 {} 筆，分配結果 {} 筆", rows.len(), results.len()),
            });
        }

        let mut by_id: HashMap<&str, &AllocationResult> = HashMap::with_capacity(results.len());
        for result in results {
            if by_id.insert(result.material_id.as_str(), result).is_some() {
                return Err(PlanningError::InternalConsistency {
                    stage: PlanningStage::Projection,
                    detail: format!("物料 {} 有重複的分配結果", result.material_id),
                });
            }
        }

        rows.iter()
            .map(|row| -> Result<AllocationRow> {
                let result = by_id.get(row.material_id.as_str()).ok_or_else(|| {
                    PlanningError::InternalConsistency {
                        stage: PlanningStage::Projection,
                        detail: format!("物料 {} 缺少分配結果", row.material_id),
                    }
                })?;
                Ok(AllocationRow {
                    row: row.clone(),
                    optimal_order_quantity: result.quantity,
                    cost_coefficient: result.cost_coefficient,
                })
            })
            .collect()
    }
}
