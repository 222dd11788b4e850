//! 集成測試

use chrono::{TimeZone, Utc};
use duct_mrp::model::{BomEntry, DuctSpec, Product, WorkOrderLine};
use duct_mrp::{compute_json, MrpCalculator, MrpConfig, MrpError, ReportSheet, WorkOrder};
use proptest::prelude::*;
use rstest::rstest;

fn calculator(waste_factor: f64) -> MrpCalculator {
    MrpCalculator::new(MrpConfig::default().with_waste_factor(waste_factor)).unwrap()
}

fn standard_spec() -> DuctSpec {
    DuctSpec::new(500.0, 400.0, 1000.0, 0.7).with_insulation(20.0)
}

fn flange_line(quantity: u32, cost: Option<f64>) -> WorkOrderLine {
    let mut flange = BomEntry::new("Flange", 0.5).with_unit("pcs");
    flange.cost_per_unit = cost;
    let product = Product::rectangular_duct(1, "Duct", &standard_spec()).with_bom_item(flange);
    WorkOrderLine::new(product, quantity)
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
}

#[test]
fn test_single_line_scenario() {
    // 500x400x1000，0.7mm，保溫 20mm，損耗 5%，數量 10
    let wo = WorkOrder::new(1, "Project X").with_line(flange_line(10, Some(100.0)));

    let report = calculator(0.05).calculate(&wo).unwrap();

    assert_eq!(report.header.project_name, "Project X");
    assert_eq!(report.header.line_count, 1);
    assert_eq!(report.header.total_quantity, 10);

    let per_unit = report.lines[0].per_unit;
    assert!((per_unit.sheet_area_m2 - 1.89).abs() < 1e-3);
    assert!(per_unit.sheet_mass_kg > 0.0);
    assert_eq!(per_unit.insulation_area_m2, per_unit.sheet_area_m2);

    assert!(approx(report.summary.material.sheet_area_m2, per_unit.sheet_area_m2 * 10.0));
    assert!(approx(report.summary.cost.bom_total, 500.0));

    let metrics = &report.bom_summary.metrics;
    assert_eq!(metrics.total_item_count, 1);
    assert_eq!(metrics.priced_item_count, 1);
    assert!(approx(report.bom_summary.priced_items[0].total_quantity, 5.0));
}

#[test]
fn test_multiline_with_missing_cost() {
    let wo = WorkOrder::new(2, "Project Y")
        .with_line(flange_line(2, Some(100.0)))
        .with_line(flange_line(3, None));

    let report = calculator(0.0).calculate(&wo).unwrap();

    assert_eq!(report.header.line_count, 2);
    assert_eq!(report.header.total_quantity, 5);

    // 只計入有成本的第一行
    assert!(approx(report.summary.cost.bom_total, 100.0 * 0.5 * 2.0));
    assert_eq!(report.summary.cost.items_missing_cost, 1);
    assert!(!report.summary.cost.cost_complete);

    let metrics = &report.bom_summary.metrics;
    assert_eq!(metrics.priced_item_count, 1);
    assert_eq!(metrics.unpriced_item_count, 1);
    assert_eq!(metrics.total_item_count, 2);
    assert!(approx(metrics.cost_completeness_pct, 50.0));

    // 同鍵同時出現在已定價與未定價清單
    let priced = &report.bom_summary.priced_items;
    let unpriced = &report.bom_summary.unpriced_items;
    assert_eq!(priced.len(), 1);
    assert_eq!(unpriced.len(), 1);
    assert_eq!((priced[0].name.as_str(), priced[0].unit.as_str()), ("Flange", "pcs"));
    assert_eq!((unpriced[0].name.as_str(), unpriced[0].unit.as_str()), ("Flange", "pcs"));
    assert!(approx(priced[0].total_quantity, 1.0));
    assert!(approx(unpriced[0].total_quantity, 1.5));
}

#[test]
fn test_shared_key_merges_across_products() {
    let small = Product::rectangular_duct(10, "Duct 300x200", &DuctSpec::new(300.0, 200.0, 1000.0, 0.5))
        .with_bom_item(BomEntry::new("Flange", 2.0).with_unit("pcs").with_cost(12.0))
        .with_bom_item(BomEntry::new("Gasket", 1.0).with_unit("m"));
    let large = Product::rectangular_duct(11, "Duct 800x600", &DuctSpec::new(800.0, 600.0, 1500.0, 1.0))
        .with_bom_item(BomEntry::new("Flange", 2.0).with_unit("pcs").with_cost(15.0))
        .with_bom_item(BomEntry::new("Hanger", 1.0).with_unit("set").with_cost(40.0));

    let wo = WorkOrder::new(3, "Airport")
        .with_line(WorkOrderLine::new(small, 4).with_id(100))
        .with_line(WorkOrderLine::new(large, 2).with_id(101));

    let report = calculator(0.0).calculate(&wo).unwrap();
    let priced = &report.bom_summary.priced_items;

    assert_eq!(priced.len(), 2);
    let flange = priced.iter().find(|i| i.name == "Flange").unwrap();
    assert!(approx(flange.total_quantity, 12.0));
    // 最後出現的單價為準
    assert_eq!(flange.cost_per_unit, 15.0);
    assert!(approx(flange.total_cost, 8.0 * 12.0 + 4.0 * 15.0));

    // Flange 156 > Hanger 80
    assert_eq!(priced[0].name, "Flange");
    assert_eq!(priced[1].name, "Hanger");
    assert_eq!(report.bom_summary.unpriced_items[0].name, "Gasket");

    assert_eq!(report.lines[0].line_id, Some(100));
    assert_eq!(report.lines[1].line_number, 2);
    assert_eq!(report.lines[1].product_name, "Duct 800x600");
    assert_eq!(report.lines[1].totals.insulation_area_m2, 0.0);
}

#[test]
fn test_empty_work_order_without_fallback() {
    let wo = WorkOrder::new(4, "Nothing").normalize_legacy();

    let err = calculator(0.0).calculate(&wo).unwrap_err();

    assert_eq!(err, MrpError::NoLines);
    assert_eq!(err.to_string(), "no work order line found");
}

#[test]
fn test_legacy_fallback_normalized_by_caller() {
    let product = Product::rectangular_duct(5, "Legacy duct", &standard_spec());
    let wo = WorkOrder::new(5, "Old data").with_legacy_item(product, 6);

    // 引擎本身不看舊欄位
    assert_eq!(calculator(0.0).calculate(&wo).unwrap_err(), MrpError::NoLines);

    let report = calculator(0.0).calculate(&wo.normalize_legacy()).unwrap();
    assert_eq!(report.header.line_count, 1);
    assert_eq!(report.header.total_quantity, 6);
    assert_eq!(report.lines[0].product_id, 5);
}

#[rstest]
#[case::zero_width(serde_json::json!({"width_mm": 0, "height_mm": 400, "length_mm": 1000, "thickness_mm": 0.7}))]
#[case::thickness_over_limit(serde_json::json!({"width_mm": 500, "height_mm": 400, "length_mm": 1000, "thickness_mm": 25}))]
#[case::insulation_missing_thickness(serde_json::json!({
    "width_mm": 500, "height_mm": 400, "length_mm": 1000, "thickness_mm": 0.7,
    "insulation_enabled": true, "insulation_thickness_mm": null
}))]
#[case::missing_length(serde_json::json!({"width_mm": 500, "height_mm": 400, "thickness_mm": 0.7}))]
#[case::not_an_object(serde_json::json!("500x400"))]
fn test_invalid_geometry_rejected(#[case] attributes: serde_json::Value) {
    let product = Product::rectangular_duct(6, "Bad duct", &standard_spec()).with_attributes(attributes);
    let wo = WorkOrder::new(6, "Bad").with_line(WorkOrderLine::new(product, 1));

    let err = calculator(0.0).calculate(&wo).unwrap_err();

    assert!(matches!(err, MrpError::InvalidGeometry(_)));
    assert!(err.is_validation());
}

#[test]
fn test_unsupported_product_type() {
    let product = Product::rectangular_duct(7, "Round", &standard_spec()).with_product_type("ROUND_DUCT");
    let wo = WorkOrder::new(7, "Round").with_line(WorkOrderLine::new(product, 1));

    let err = calculator(0.0).calculate(&wo).unwrap_err();

    assert_eq!(err.code(), "unsupported_product_type");
}

#[test]
fn test_report_json_contract() {
    let wo = WorkOrder::new(8, "Contract")
        .with_line(flange_line(2, Some(10.0)))
        .with_line(flange_line(1, None));
    let report = calculator(0.0)
        .calculate_at(&wo, Utc.with_ymd_and_hms(2025, 11, 20, 12, 0, 0).unwrap())
        .unwrap();

    let value = serde_json::to_value(&report).unwrap();

    let mut top: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
    top.sort_unstable();
    assert_eq!(top, vec!["bom_summary", "header", "lines", "summary"]);

    assert_eq!(value["header"]["generated_at"], "2025-11-20T12:00:00Z");
    for key in ["sheet_area_m2", "sheet_mass_kg", "insulation_area_m2"] {
        assert!(value["summary"]["material"][key].is_number());
        assert!(value["lines"][0]["per_unit"][key].is_number());
        assert!(value["lines"][0]["totals"][key].is_number());
    }
    for key in ["bom_total", "items_with_cost", "items_missing_cost", "cost_complete"] {
        assert!(!value["summary"]["cost"][key].is_null());
    }
    for key in [
        "total_item_count",
        "priced_item_count",
        "unpriced_item_count",
        "total_cost",
        "cost_completeness_pct",
    ] {
        assert!(value["bom_summary"]["metrics"][key].is_number());
    }
    for key in ["name", "unit", "total_quantity", "cost_per_unit", "total_cost", "cost_share_pct"] {
        assert!(!value["bom_summary"]["priced_items"][0][key].is_null());
    }
    assert_eq!(value["bom_summary"]["unpriced_items"][0]["unit"], "pcs");
}

#[test]
fn test_compute_json_roundtrip() {
    let wo = WorkOrder::new(9, "Json").with_legacy_item(
        Product::rectangular_duct(1, "Duct", &standard_spec())
            .with_bom_item(BomEntry::new("Flange", 1.0).with_cost(3.0)),
        2,
    );
    let input = serde_json::to_string(&wo).unwrap();

    let output = compute_json(&input, MrpConfig::default()).unwrap();
    let report: duct_mrp::Report = serde_json::from_str(&output).unwrap();

    assert_eq!(report.header.work_order_id, 9);
    assert!(approx(report.summary.cost.bom_total, 6.0));

    let err = compute_json("{not json", MrpConfig::default()).unwrap_err();
    assert_eq!(err.code(), "invalid_input");
}

#[test]
fn test_report_sheet_from_engine_output() {
    let wo = WorkOrder::new(10, "Sheet")
        .with_line(flange_line(2, Some(100.0)))
        .with_line(flange_line(3, None));
    let report = calculator(0.0).calculate(&wo).unwrap();

    let sheet = ReportSheet::from_report(&report);
    let csv_text = sheet.to_csv_string().unwrap();

    assert!(csv_text.contains("BOM (PRICED)"));
    assert!(csv_text.contains("BOM (PRICE MISSING)"));
    assert!(csv_text.contains("#10"));
}

fn bom_entry_strategy() -> impl Strategy<Value = BomEntry> {
    (
        prop::sample::select(vec!["Flange", "Gasket", "Rivet", "Sealant"]),
        prop::option::of(prop::sample::select(vec!["pcs", "kg"])),
        0.01f64..10.0,
        prop::option::of(0.0f64..500.0),
    )
        .prop_map(|(name, unit, qty, cost)| BomEntry {
            name: name.to_string(),
            unit: unit.map(str::to_string),
            quantity_per_unit: qty,
            cost_per_unit: cost,
        })
}

fn line_strategy() -> impl Strategy<Value = WorkOrderLine> {
    (
        1.0f64..3000.0,
        1.0f64..3000.0,
        1.0f64..6000.0,
        0.1f64..=20.0,
        any::<bool>(),
        1u32..100,
        prop::collection::vec(bom_entry_strategy(), 0..5),
    )
        .prop_map(|(w, h, l, t, insulated, qty, bom)| {
            let mut spec = DuctSpec::new(w, h, l, t);
            if insulated {
                spec = spec.with_insulation(25.0);
            }
            let mut product = Product::rectangular_duct(1, "Duct", &spec);
            product.bom_items = bom;
            WorkOrderLine::new(product, qty)
        })
}

proptest! {
    #[test]
    fn prop_sheet_area_formula(
        w in 1.0f64..3000.0,
        h in 1.0f64..3000.0,
        l in 1.0f64..6000.0,
        waste in 0.0f64..0.5,
    ) {
        let product = Product::rectangular_duct(1, "Duct", &DuctSpec::new(w, h, l, 1.0));
        let wo = WorkOrder::new(1, "P").with_line(WorkOrderLine::new(product, 1));

        let report = calculator(waste).calculate(&wo).unwrap();
        let expected = 2.0 * (w + h) * l / 1e6 * (1.0 + waste);

        prop_assert!(approx(report.lines[0].per_unit.sheet_area_m2, expected));
    }

    #[test]
    fn prop_line_totals_sum_to_summary(lines in prop::collection::vec(line_strategy(), 1..8)) {
        let mut wo = WorkOrder::new(1, "P");
        for line in lines {
            wo.add_line(line);
        }

        let report = calculator(0.05).calculate(&wo).unwrap();
        let material = report.summary.material;

        let area: f64 = report.lines.iter().map(|l| l.totals.sheet_area_m2).sum();
        let mass: f64 = report.lines.iter().map(|l| l.totals.sheet_mass_kg).sum();
        let insulation: f64 = report.lines.iter().map(|l| l.totals.insulation_area_m2).sum();

        prop_assert!(approx(area, material.sheet_area_m2));
        prop_assert!(approx(mass, material.sheet_mass_kg));
        prop_assert!(approx(insulation, material.insulation_area_m2));
        prop_assert_eq!(report.header.line_count, report.lines.len());
    }

    #[test]
    fn prop_cost_shares_and_completeness(lines in prop::collection::vec(line_strategy(), 1..8)) {
        let mut wo = WorkOrder::new(1, "P");
        for line in lines {
            wo.add_line(line);
        }

        let report = calculator(0.0).calculate(&wo).unwrap();
        let bom = &report.bom_summary;
        let share_sum: f64 = bom.priced_items.iter().map(|i| i.cost_share_pct).sum();

        if report.summary.cost.bom_total > 0.0 {
            prop_assert!((share_sum - 100.0).abs() < 1e-6);
        } else {
            prop_assert!(bom.priced_items.iter().all(|i| i.cost_share_pct == 0.0));
        }

        let total_keys = bom.metrics.total_item_count;
        if total_keys == 0 {
            prop_assert_eq!(bom.metrics.cost_completeness_pct, 100.0);
        } else {
            let expected = bom.metrics.priced_item_count as f64 / total_keys as f64 * 100.0;
            prop_assert!(approx(bom.metrics.cost_completeness_pct, expected));
        }
        prop_assert_eq!(report.summary.cost.cost_complete, bom.unpriced_items.is_empty());

        for pair in bom.priced_items.windows(2) {
            prop_assert!(pair[0].total_cost >= pair[1].total_cost);
        }
    }
}
