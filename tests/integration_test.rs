//! 集成測試

use chrono::NaiveDate;
use procure::*;
use rstest::rstest;
use rust_decimal::Decimal;

fn series(material_id: &str, quantities: &[f64]) -> DemandSeries {
    DemandSeries::from_quantities(
        material_id,
        NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
        PeriodGranularity::Monthly,
        quantities,
    )
    .unwrap()
}

/// 以預設優先權重執行計劃
fn plan(
    materials: &[Material],
    history: &[DemandSeries],
    terms: &[SupplierTerm],
) -> Result<PlanningOutput> {
    run_planning(materials, history, terms, &PlanningPriorities::default())
}

/// 四種原物料的樣本資料
fn sample_inputs() -> (Vec<Material>, Vec<DemandSeries>, Vec<SupplierTerm>) {
    let materials = vec![
        Material::new("Steel Rods", Decimal::from(500), Decimal::from(300)).with_sku("ST1001"),
        Material::new("Aluminum Sheets", Decimal::from(200), Decimal::from(100)).with_sku("AL2002"),
        Material::new("Brass Blocks", Decimal::from(120), Decimal::from(60)).with_sku("BR3003"),
        Material::new("Cutting Fluids", Decimal::from(50), Decimal::from(20)).with_sku("CF4004"),
    ];
    let history = vec![
        series("Steel Rods", &[450.0, 480.0, 520.0]),
        series("Aluminum Sheets", &[150.0, 170.0, 200.0]),
        series("Brass Blocks", &[100.0, 110.0, 120.0]),
        series("Cutting Fluids", &[40.0, 45.0, 50.0]),
    ];
    let terms = vec![
        SupplierTerm::new("Steel Rods", 10, Decimal::from(20)).with_supplier("SupplierA"),
        SupplierTerm::new("Aluminum Sheets", 14, Decimal::from(15)).with_supplier("SupplierB"),
        SupplierTerm::new("Brass Blocks", 7, Decimal::from(30)).with_supplier("SupplierC"),
        SupplierTerm::new("Cutting Fluids", 5, Decimal::from(10)).with_supplier("SupplierD"),
    ];
    (materials, history, terms)
}

#[test]
fn test_single_material_scenario() {
    // 場景：Steel Rods 庫存 500、再訂購點 300，歷史 450/480/520，提前期 10 天、單價 20
    let materials = vec![Material::new("Steel Rods", Decimal::from(500), Decimal::from(300))];
    let history = vec![series("Steel Rods", &[450.0, 480.0, 520.0])];
    let terms = vec![SupplierTerm::new("Steel Rods", 10, Decimal::from(20))];

    let output = plan(&materials, &history, &terms).unwrap();

    // 趨勢向上
    let forecast = &output.forecast_table[0];
    assert_eq!(forecast.horizon(), 3);
    let q = forecast.quantities();
    assert!(q[0] > 520.0 && q[1] > q[0] && q[2] > q[1]);

    let row = output.allocation_for("Steel Rods").unwrap();
    assert_eq!(row.row.total_forecasted_demand, forecast.total());
    assert_eq!(row.row.safety_stock, 10.0 * forecast.total() / 90.0);
    assert_eq!(
        row.optimal_order_quantity,
        row.row.total_forecasted_demand + row.row.safety_stock
    );
    assert!(output.dropped_materials.is_empty());
}

#[test]
fn test_sample_data_quantities_equal_targets() {
    let (materials, history, terms) = sample_inputs();

    let output = plan(&materials, &history, &terms).unwrap();

    assert_eq!(output.forecast_table.len(), 4);
    assert_eq!(output.consolidated_table.len(), 4);
    assert_eq!(output.allocation_table.len(), 4);

    for (row, material) in output.allocation_table.iter().zip(&materials) {
        assert_eq!(row.material_id(), material.id);
        assert!(row.optimal_order_quantity >= 0.0);
        assert_eq!(
            row.optimal_order_quantity,
            row.row.total_forecasted_demand + row.row.safety_stock
        );
        assert_eq!(
            row.row.safety_stock,
            f64::from(row.row.lead_time_days) * row.row.total_forecasted_demand / 90.0
        );
    }

    let expected_objective: f64 = output
        .allocation_table
        .iter()
        .map(|r| r.cost_coefficient * r.optimal_order_quantity)
        .sum();
    assert!((output.objective_value - expected_objective).abs() < 1e-6 * expected_objective);
}

#[test]
fn test_idempotent() {
    let (materials, history, terms) = sample_inputs();
    let priorities = PlanningPriorities::default();

    let mut first = run_planning(&materials, &history, &terms, &priorities).unwrap();
    let mut second = run_planning(&materials, &history, &terms, &priorities).unwrap();
    first.calculation_time_ms = None;
    second.calculation_time_ms = None;

    assert_eq!(first, second);
}

#[rstest]
#[case(0.0, 0.0, 0.0)]
#[case(1.0, 0.5, 0.25)]
#[case(0.1, 1.0, 1.0)]
fn test_priorities_only_change_costs(
    #[case] pricing: f64,
    #[case] lead_time: f64,
    #[case] safety_stock: f64,
) {
    let (materials, history, terms) = sample_inputs();
    let baseline = plan(&materials, &history, &terms).unwrap();

    let priorities = PlanningPriorities::new(pricing, lead_time, safety_stock, 0.1, 0.1).unwrap();
    let output = run_planning(&materials, &history, &terms, &priorities).unwrap();

    for (a, b) in baseline.allocation_table.iter().zip(&output.allocation_table) {
        assert_eq!(a.optimal_order_quantity, b.optimal_order_quantity);
    }
}

#[test]
fn test_material_without_supplier_dropped() {
    let (materials, history, mut terms) = sample_inputs();
    terms.retain(|t| t.material_id != "Brass Blocks");

    let output = plan(&materials, &history, &terms).unwrap();

    assert_eq!(output.dropped_materials, vec!["Brass Blocks".to_string()]);
    assert!(output.consolidated_table.iter().all(|r| r.material_id != "Brass Blocks"));
    assert!(output.allocation_for("Brass Blocks").is_none());
    assert_eq!(output.allocation_table.len(), 3);
    assert!(output
        .warnings
        .iter()
        .any(|w| w.material_id == "Brass Blocks" && w.severity == WarningSeverity::Warning));
}

#[test]
fn test_zero_lead_time_fails_run() {
    let (materials, history, mut terms) = sample_inputs();
    terms[3].lead_time_days = 0;

    let err = plan(&materials, &history, &terms).unwrap_err();

    assert_eq!(
        err,
        PlanningError::InvalidLeadTime {
            material_id: "Cutting Fluids".to_string(),
            lead_time_days: 0,
        }
    );
}

#[test]
fn test_single_observation_fails_run() {
    let (materials, mut history, terms) = sample_inputs();
    history[1] = series("Aluminum Sheets", &[150.0]);

    let err = plan(&materials, &history, &terms).unwrap_err();

    assert!(matches!(
        err,
        PlanningError::InsufficientData { ref material_id, observations: 1, .. }
            if material_id == "Aluminum Sheets"
    ));
}

#[test]
fn test_declining_demand_is_infeasible() {
    // 需求快速下滑，預測總量為負
    let materials = vec![Material::new("Brass Blocks", Decimal::from(120), Decimal::from(60))];
    let history = vec![series("Brass Blocks", &[30.0, 20.0, 10.0])];
    let terms = vec![SupplierTerm::new("Brass Blocks", 7, Decimal::from(30))];

    let err = plan(&materials, &history, &terms).unwrap_err();

    assert_eq!(
        err,
        PlanningError::AllocationInfeasible {
            material_ids: vec!["Brass Blocks".to_string()],
            status: "Infeasible".to_string(),
        }
    );
    assert_eq!(err.stage(), PlanningStage::Allocation);
}

#[test]
fn test_output_serializes_to_json() {
    let (materials, history, terms) = sample_inputs();
    let output = plan(&materials, &history, &terms).unwrap();

    let json = serde_json::to_value(&output).unwrap();
    let first = &json["allocation_table"][0];

    assert_eq!(first["material_id"], "Steel Rods");
    assert_eq!(first["sku"], "ST1001");
    assert!(first["optimal_order_quantity"].is_f64());
    assert_eq!(json["forecast_table"].as_array().unwrap().len(), 4);
}

#[test]
fn test_config_from_json() {
    let (materials, history, terms) = sample_inputs();
    let config = PlanningConfig::from_json_str(r#"{ "forecast_horizon": 6 }"#).unwrap();

    let output = PlanningEngine::new(config)
        .run(&materials, &history, &terms, &PlanningPriorities::default())
        .unwrap();

    assert!(output.forecast_table.iter().all(|f| f.horizon() == 6));
}
