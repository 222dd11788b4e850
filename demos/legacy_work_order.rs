//! 舊版單一產品工單：由呼叫端先正規化再交給引擎

use duct_mrp::model::{BomEntry, DuctSpec, Product};
use duct_mrp::{MrpCalculator, MrpConfig, MrpError, WorkOrder};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let product = Product::rectangular_duct(
        7,
        "Duct 600x300",
        &DuctSpec::new(600.0, 300.0, 1200.0, 0.8),
    )
    .with_bom_item(BomEntry::new("Flange", 2.0).with_unit("pcs"));

    let legacy = WorkOrder::new(88, "Legacy project").with_legacy_item(product, 5);
    let calculator = MrpCalculator::new(MrpConfig::default())?;

    // 未正規化：引擎只看明細行
    match calculator.calculate(&legacy) {
        Err(MrpError::NoLines) => println!("未正規化的舊工單: {}", MrpError::NoLines),
        other => println!("unexpected: {other:?}"),
    }

    let report = calculator.calculate(&legacy.normalize_legacy())?;
    println!(
        "正規化後: {} 行, 數量 {}, 成本完整: {}",
        report.header.line_count, report.header.total_quantity, report.summary.cost.cost_complete
    );
    for item in &report.bom_summary.unpriced_items {
        println!("  需要報價: {} {} {}", item.name, item.total_quantity, item.unit);
    }

    Ok(())
}
