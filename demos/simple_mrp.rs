//! 簡單 MRP 計算示例

use duct_mrp::model::{BomEntry, DuctSpec, Product, WorkOrderLine};
use duct_mrp::{MrpCalculator, MrpConfig, WorkOrder};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("=== 簡單 MRP 計算示例 ===\n");

    // 創建 MRP 配置（5% 裁切損耗）
    let config = MrpConfig::default().with_waste_factor(0.05);

    // 創建產品：500x400 矩形風管，長 1m，板厚 0.7mm，保溫 20mm
    let spec = DuctSpec::new(500.0, 400.0, 1000.0, 0.7).with_insulation(20.0);
    let product = Product::rectangular_duct(1, "Duct 500x400", &spec)
        .with_bom_item(BomEntry::new("Flange", 0.5).with_unit("pcs").with_cost(100.0));

    // 創建工單
    let work_order =
        WorkOrder::new(1, "Project X").with_line(WorkOrderLine::new(product, 10).with_id(1));

    let report = MrpCalculator::new(config)?.calculate(&work_order)?;

    println!("工單明細:");
    for line in &report.lines {
        println!(
            "  - #{} {} x{}: 每單位板材 {:.3} m², 重量 {:.3} kg",
            line.line_number,
            line.product_name,
            line.quantity,
            line.per_unit.sheet_area_m2,
            line.per_unit.sheet_mass_kg
        );
    }
    println!(
        "\n板材合計 {:.3} m², BOM 成本 {:.2}",
        report.summary.material.sheet_area_m2, report.summary.cost.bom_total
    );

    Ok(())
}
