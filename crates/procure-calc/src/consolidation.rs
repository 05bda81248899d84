//! 需求彙總（物料 × 供應商條件 × 預測）

use procure_core::{
    ConsolidatedRow, Forecast, Material, PlanningError, PlanningStage, Result, SupplierTerm,
};
use std::collections::HashMap;

use crate::safety_stock::SafetyStockCalculator;

/// 彙總結果
#[derive(Debug, Clone, PartialEq)]
pub struct Consolidation {
    /// 彙總列（依物料輸入順序）
    pub rows: Vec<ConsolidatedRow>,

    /// 沒有供應商條件而被排除的物料
    pub dropped_materials: Vec<String>,
}

/// 需求彙總器
#[derive(Debug, Clone, Default)]
pub struct RequirementConsolidator {
    safety_stock: SafetyStockCalculator,
}

impl RequirementConsolidator {
    pub fn new(safety_stock: SafetyStockCalculator) -> Self {
        Self { safety_stock }
    }

    /// 內連接物料與供應商條件，並附上預測總需求與安全庫存
    pub fn consolidate(
        &self,
        materials: &[Material],
        supplier_terms: &[SupplierTerm],
        forecasts: &[Forecast],
    ) -> Result<Consolidation> {
        let terms: HashMap<&str, &SupplierTerm> = supplier_terms
            .iter()
            .map(|t| (t.material_id.as_str(), t))
            .collect();
        let forecast_map: HashMap<&str, &Forecast> = forecasts
            .iter()
            .map(|f| (f.material_id.as_str(), f))
            .collect();

        let mut rows = Vec::with_capacity(materials.len());
        let mut dropped_materials = Vec::new();

        for material in materials {
            let Some(term) = terms.get(material.id.as_str()) else {
                tracing::debug!("物料 {} 無供應商條件，排除", material.id);
                dropped_materials.push(material.id.clone());
                continue;
            };

            let forecast = forecast_map.get(material.id.as_str()).ok_or_else(|| {
                PlanningError::InternalConsistency {
                    stage: PlanningStage::Consolidation,
                    detail: format!("物料 {} 缺少預測", material.id),
                }
            })?;

            let total = forecast.total();
            let safety_stock = self.safety_stock.calculate(term.lead_time_days, total);

            tracing::debug!(
                "物料 {}: 預測總需求 {:.2}，安全庫存 {:.2}",
                material.id,
                total,
                safety_stock
            );

            rows.push(ConsolidatedRow {
                material_id: material.id.clone(),
                sku: material.sku.clone(),
                current_stock: material.current_stock,
                reorder_level: material.reorder_level,
                supplier: term.supplier.clone(),
                lead_time_days: term.lead_time_days,
                unit_price: term.unit_price,
                total_forecasted_demand: total,
                safety_stock,
            });
        }

        Ok(Consolidation {
            rows,
            dropped_materials,
        })
    }
}
