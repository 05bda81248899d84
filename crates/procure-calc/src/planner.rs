//! 採購計劃主流程

use procure_core::{
    DemandSeries, Forecast, Material, PlanningConfig, PlanningError, PlanningPriorities, Result,
    SupplierTerm,
};
use procure_forecast::{DemandForecaster, HoltForecaster, MIN_OBSERVATIONS};
use procure_optimizer::{AllocationOptimizer, LpSolver, SimplexSolver};
use std::collections::HashSet;

use crate::consolidation::RequirementConsolidator;
use crate::projection::ResultProjection;
use crate::safety_stock::SafetyStockCalculator;
use crate::{PlanningOutput, PlanningWarning};

/// 採購計劃引擎
pub struct PlanningEngine<F = HoltForecaster, S = SimplexSolver> {
    config: PlanningConfig,
    forecaster: F,
    optimizer: AllocationOptimizer<S>,
}

impl PlanningEngine {
    /// 以配置創建引擎（Holt 預測、單純形求解）
    pub fn new(config: PlanningConfig) -> Self {
        let forecaster = HoltForecaster::new(config.smoothing);
        let optimizer = AllocationOptimizer::new(config.solver);
        Self {
            config,
            forecaster,
            optimizer,
        }
    }
}

impl Default for PlanningEngine {
    fn default() -> Self {
        Self::new(PlanningConfig::default())
    }
}

impl<F: DemandForecaster, S: LpSolver> PlanningEngine<F, S> {
    /// 使用自訂預測器與求解器
    pub fn with_components(config: PlanningConfig, forecaster: F, solver: S) -> Self {
        Self {
            config,
            forecaster,
            optimizer: AllocationOptimizer::with_solver(solver),
        }
    }

    pub fn config(&self) -> &PlanningConfig {
        &self.config
    }

    /// 主計劃入口
    pub fn run(
        &self,
        materials: &[Material],
        demand_history: &[DemandSeries],
        supplier_terms: &[SupplierTerm],
        priorities: &PlanningPriorities,
    ) -> Result<PlanningOutput> {
        tracing::info!(
            "開始採購計劃：物料 {} 筆，需求序列 {} 筆，供應商條件 {} 筆",
            materials.len(),
            demand_history.len(),
            supplier_terms.len()
        );

        let start_time = std::time::Instant::now();

        // Step 1: 輸入驗證
        tracing::debug!("Step 1: 輸入驗證");
        self.validate_inputs(materials, demand_history, supplier_terms, priorities)?;

        // Step 2: 需求預測（每條序列皆預測）
        tracing::debug!("Step 2: 需求預測，期數 {}", self.config.forecast_horizon);
        let forecast_table = demand_history
            .iter()
            .map(|series| self.forecaster.forecast(series, self.config.forecast_horizon))
            .collect::<Result<Vec<Forecast>>>()?;

        // Step 3: 需求彙總
        tracing::debug!("Step 3: 需求彙總");
        let consolidator = RequirementConsolidator::new(SafetyStockCalculator::new(
            self.config.safety_stock_window_days,
        ));
        let consolidation = consolidator.consolidate(materials, supplier_terms, &forecast_table)?;

        let mut warnings = Vec::new();
        if !consolidation.dropped_materials.is_empty() {
            tracing::warn!(
                "以下物料無供應商條件，已排除：{:?}",
                consolidation.dropped_materials
            );
            for material_id in &consolidation.dropped_materials {
                warnings.push(PlanningWarning::warning(
                    material_id.clone(),
                    "無供應商條件，未納入分配".to_string(),
                ));
            }
        }
        for material in materials.iter().filter(|m| m.is_below_reorder_level()) {
            warnings.push(PlanningWarning::info(
                material.id.clone(),
                format!(
                    "現有庫存 {} 低於再訂購點 {}",
                    material.current_stock, material.reorder_level
                ),
            ));
        }

        // Step 4: 訂購量分配
        tracing::debug!("Step 4: 訂購量分配，{} 個物料", consolidation.rows.len());
        let allocation = self.optimizer.allocate(&consolidation.rows, priorities)?;

        // Step 5: 結果投影
        tracing::debug!("Step 5: 結果投影");
        let allocation_table = ResultProjection::project(&consolidation.rows, &allocation.results)?;

        let output = PlanningOutput {
            forecast_table,
            consolidated_table: consolidation.rows,
            allocation_table,
            dropped_materials: consolidation.dropped_materials,
            warnings,
            objective_value: allocation.objective_value,
            calculation_time_ms: Some(start_time.elapsed().as_millis()),
        };

        tracing::info!("採購計劃完成，耗時 {:?}", start_time.elapsed());
        tracing::info!("分配物料數量: {}", output.allocation_table.len());

        Ok(output)
    }

    /// 輸入驗證
    fn validate_inputs(
        &self,
        materials: &[Material],
        demand_history: &[DemandSeries],
        supplier_terms: &[SupplierTerm],
        priorities: &PlanningPriorities,
    ) -> Result<()> {
        self.config.validate()?;
        priorities.validate()?;

        if materials.is_empty() {
            return Err(PlanningError::InvalidInput("物料清單為空".to_string()));
        }

        let mut material_ids = HashSet::with_capacity(materials.len());
        for material in materials {
            material.validate()?;
            if !material_ids.insert(material.id.as_str()) {
                return Err(PlanningError::InvalidMaterialData {
                    material_id: material.id.clone(),
                    detail: "物料ID重複".to_string(),
                });
            }
        }

        let mut term_ids = HashSet::with_capacity(supplier_terms.len());
        for term in supplier_terms {
            term.validate()?;
            if !term_ids.insert(term.material_id.as_str()) {
                return Err(PlanningError::InvalidMaterialData {
                    material_id: term.material_id.clone(),
                    detail: "有多筆供應商條件".to_string(),
                });
            }
        }

        let mut series_ids = HashSet::with_capacity(demand_history.len());
        for series in demand_history {
            if !series_ids.insert(series.material_id.as_str()) {
                return Err(PlanningError::InvalidMaterialData {
                    material_id: series.material_id.clone(),
                    detail: "有多條需求序列".to_string(),
                });
            }
        }

        if let Some(material) = materials
            .iter()
            .find(|m| !series_ids.contains(m.id.as_str()))
        {
            return Err(PlanningError::InsufficientData {
                material_id: material.id.clone(),
                observations: 0,
                required: MIN_OBSERVATIONS,
            });
        }

        Ok(())
    }
}
