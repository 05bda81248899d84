//! 四種原物料的採購計劃範例
//!
//! 執行：`RUST_LOG=debug cargo run --example sample_planning`

use chrono::NaiveDate;
use procure::*;
use rust_decimal::Decimal;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    println!("===== Purchase Order Planning Example =====\n");

    // 步驟 1: 物料主檔
    println!("[1] Materials");
    let materials = vec![
        Material::new("Steel Rods", Decimal::from(500), Decimal::from(300)).with_sku("ST1001"),
        Material::new("Aluminum Sheets", Decimal::from(200), Decimal::from(100)).with_sku("AL2002"),
        Material::new("Brass Blocks", Decimal::from(120), Decimal::from(60)).with_sku("BR3003"),
        Material::new("Cutting Fluids", Decimal::from(50), Decimal::from(20)).with_sku("CF4004"),
    ];
    for m in &materials {
        println!(
            "    {} ({}): stock {}, reorder {}",
            m.id,
            m.sku.as_deref().unwrap_or("-"),
            m.current_stock,
            m.reorder_level
        );
    }

    // 步驟 2: 需求歷史（2025 年 1~3 月）
    println!("\n[2] Demand History");
    let start = NaiveDate::from_ymd_opt(2025, 1, 1).ok_or_else(|| anyhow::anyhow!("invalid date"))?;
    let monthly = |material_id: &str, quantities: &[f64]| {
        DemandSeries::from_quantities(material_id, start, PeriodGranularity::Monthly, quantities)
    };
    let history = vec![
        monthly("Steel Rods", &[450.0, 480.0, 520.0])?,
        monthly("Aluminum Sheets", &[150.0, 170.0, 200.0])?,
        monthly("Brass Blocks", &[100.0, 110.0, 120.0])?,
        monthly("Cutting Fluids", &[40.0, 45.0, 50.0])?,
    ];
    for s in &history {
        println!("    {}: {:?}", s.material_id, s.quantities());
    }

    // 步驟 3: 供應商條件
    println!("\n[3] Supplier Terms");
    let terms = vec![
        SupplierTerm::new("Steel Rods", 10, Decimal::from(20)).with_supplier("SupplierA"),
        SupplierTerm::new("Aluminum Sheets", 14, Decimal::from(15)).with_supplier("SupplierB"),
        SupplierTerm::new("Brass Blocks", 7, Decimal::from(30)).with_supplier("SupplierC"),
        SupplierTerm::new("Cutting Fluids", 5, Decimal::from(10)).with_supplier("SupplierD"),
    ];
    for t in &terms {
        println!(
            "    {}: {}, lead time {} days, unit price {}",
            t.material_id,
            t.supplier.as_deref().unwrap_or("-"),
            t.lead_time_days,
            t.unit_price
        );
    }

    // 步驟 4: 執行計劃
    println!("\n[4] Run Planning");
    let priorities = PlanningPriorities::default();
    let output = run_planning(&materials, &history, &terms, &priorities)?;

    println!("\n[5] Forecast");
    for f in &output.forecast_table {
        println!(
            "    {}: {:?} (alpha {:.3}, beta {:.3})",
            f.material_id,
            f.quantities().iter().map(|q| format!("{:.1}", q)).collect::<Vec<_>>(),
            f.model.alpha,
            f.model.beta
        );
    }

    println!("\n[6] Optimal Order Quantities");
    for row in &output.allocation_table {
        println!(
            "    {:<16} demand {:>8.1}  safety {:>7.1}  order {:>8.1}  cost {:.3}",
            row.material_id(),
            row.row.total_forecasted_demand,
            row.row.safety_stock,
            row.optimal_order_quantity,
            row.cost_coefficient
        );
    }
    println!("\n    Objective: {:.2}", output.objective_value);

    for w in &output.warnings {
        println!("    [{:?}] {}: {}", w.severity, w.material_id, w.message);
    }

    Ok(())
}
