//! # MRP Calculation Engine
//!
//! 風管工單 MRP 彙總引擎：幾何推導、損耗、BOM 合併與成本彙總

pub mod bom_rollup;
pub mod calculator;
pub mod geometry;

// Re-export 主要類型
pub use bom_rollup::BomRollup;
pub use calculator::MrpCalculator;
