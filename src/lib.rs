//! # Duct MRP
//!
//! 風管工單 MRP 彙總：核心模型、計算引擎與報表呈現的統一入口

pub use mrp_calc as engine;
pub use mrp_core as model;
pub use mrp_report as report;

pub use mrp_calc::MrpCalculator;
pub use mrp_core::{MrpConfig, MrpError, Report, WorkOrder};
pub use mrp_report::ReportSheet;

/// 由 JSON 工單計算 MRP 報表（JSON）
///
/// 供非 Rust 呼叫端使用：舊資料會先正規化成單一工單行。
pub fn compute_json(work_order_json: &str, config: MrpConfig) -> mrp_core::Result<String> {
    let work_order: WorkOrder = serde_json::from_str(work_order_json)
        .map_err(|e| MrpError::InvalidInput(format!("malformed work order: {e}")))?;
    let report = MrpCalculator::new(config)?.calculate(&work_order.normalize_legacy())?;
    serde_json::to_string(&report).map_err(|e| MrpError::InvalidInput(e.to_string()))
}
