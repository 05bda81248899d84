//! # Procure
//!
//! 採購訂購量計劃：需求預測、需求彙總、訂購量分配。
//!
//! ```
//! use chrono::NaiveDate;
//! use procure::{DemandSeries, Material, PeriodGranularity, PlanningPriorities, SupplierTerm};
//! use rust_decimal::Decimal;
//!
//! let materials = vec![Material::new("Steel Rods", Decimal::from(500), Decimal::from(300))];
//! let history = vec![DemandSeries::from_quantities(
//!     "Steel Rods",
//!     NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
//!     PeriodGranularity::Monthly,
//!     &[450.0, 480.0, 520.0],
//! )
//! .unwrap()];
//! let terms = vec![SupplierTerm::new("Steel Rods", 10, Decimal::from(20))];
//!
//! let priorities = PlanningPriorities::default();
//! let output = procure::run_planning(&materials, &history, &terms, &priorities).unwrap();
//!
//! let row = &output.allocation_table[0];
//! assert_eq!(
//!     row.optimal_order_quantity,
//!     row.row.total_forecasted_demand + row.row.safety_stock
//! );
//! ```

pub use procure_calc::{
    Consolidation, PlanningEngine, PlanningOutput, PlanningWarning, RequirementConsolidator,
    ResultProjection, SafetyStockCalculator, WarningSeverity,
};
pub use procure_core::*;
pub use procure_forecast::{DemandForecaster, HoltForecaster};
pub use procure_optimizer::{Allocation, AllocationOptimizer, LpSolver, SimplexSolver};

/// 以預設配置執行採購計劃
pub fn run_planning(
    materials: &[Material],
    demand_history: &[DemandSeries],
    supplier_terms: &[SupplierTerm],
    priorities: &PlanningPriorities,
) -> Result<PlanningOutput> {
    PlanningEngine::new(PlanningConfig::default()).run(
        materials,
        demand_history,
        supplier_terms,
        priorities,
    )
}
