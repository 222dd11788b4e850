//! 多行工單 MRP 示例：環境變數配置、日誌、報表輸出
//!
//! ```text
//! WASTE_FACTOR=0.05 RUST_LOG=debug cargo run --example duct_mrp
//! ```

use anyhow::Context;
use duct_mrp::model::{BomEntry, DuctSpec, Product, WorkOrderLine};
use duct_mrp::{MrpCalculator, MrpConfig, ReportSheet, WorkOrder};
use tracing_subscriber::EnvFilter;

fn build_work_order() -> WorkOrder {
    let main_duct = Product::rectangular_duct(
        1,
        "Main duct 800x600",
        &DuctSpec::new(800.0, 600.0, 1500.0, 1.0).with_insulation(25.0),
    )
    .with_bom_item(BomEntry::new("Flange 30mm", 2.0).with_unit("pcs").with_cost(18.5))
    .with_bom_item(BomEntry::new("Hanger rod", 1.0).with_unit("set").with_cost(42.0))
    .with_bom_item(BomEntry::new("Sealant", 0.15).with_unit("kg"));

    let branch_duct = Product::rectangular_duct(
        2,
        "Branch duct 400x250",
        &DuctSpec::new(400.0, 250.0, 1000.0, 0.6),
    )
    .with_bom_item(BomEntry::new("Flange 30mm", 2.0).with_unit("pcs").with_cost(18.5))
    .with_bom_item(BomEntry::new("Rivet", 24.0).with_unit("pcs").with_cost(0.08));

    WorkOrder::new(1024, "Hospital Block B")
        .with_line(WorkOrderLine::new(main_duct, 12).with_id(1))
        .with_line(WorkOrderLine::new(branch_duct, 30).with_id(2))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = MrpConfig::from_env().context("讀取 MRP 配置失敗")?;
    tracing::info!(
        "配置: 密度 {} kg/m³, 損耗 {}",
        config.steel_density_kg_m3,
        config.waste_factor
    );

    let calculator = MrpCalculator::new(config)?;
    let report = calculator
        .calculate(&build_work_order())
        .context("MRP 計算失敗")?;

    let sheet = ReportSheet::from_report(&report);
    println!("{sheet}");

    println!("--- JSON ---");
    println!("{}", serde_json::to_string_pretty(&report)?);

    println!("--- CSV ---");
    sheet.write_csv(std::io::stdout().lock())?;

    Ok(())
}
