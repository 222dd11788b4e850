//! MRP 報表模型
//!
//! 欄位名稱與巢狀結構即為與呈現層之間的穩定契約。
//! 輸入尺寸為 mm，輸出為 m / m² / kg；引擎不做四捨五入。

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::ops::AddAssign;

/// MRP 報表（四個區段）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub header: ReportHeader,
    pub summary: Summary,
    pub lines: Vec<LineResult>,
    pub bom_summary: BomSummary,
}

impl Report {
    /// 成本是否完整（沒有未定價項目）
    pub fn is_cost_complete(&self) -> bool {
        self.summary.cost.cost_complete
    }

    /// 依行號查找行結果
    pub fn line(&self, line_number: usize) -> Option<&LineResult> {
        self.lines.iter().find(|l| l.line_number == line_number)
    }
}

/// 報表表頭
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportHeader {
    pub project_name: String,
    pub work_order_id: u64,
    /// ISO-8601 產生時間
    pub generated_at: DateTime<Utc>,
    pub line_count: usize,
    /// 所有行數量合計
    pub total_quantity: u64,
}

/// 摘要
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub material: MaterialTotals,
    pub cost: CostSummary,
}

/// 材料量（板材面積、板材重量、保溫面積）
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct MaterialTotals {
    pub sheet_area_m2: f64,
    pub sheet_mass_kg: f64,
    pub insulation_area_m2: f64,
}

impl MaterialTotals {
    /// 乘以數量
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            sheet_area_m2: self.sheet_area_m2 * factor,
            sheet_mass_kg: self.sheet_mass_kg * factor,
            insulation_area_m2: self.insulation_area_m2 * factor,
        }
    }
}

impl AddAssign for MaterialTotals {
    fn add_assign(&mut self, rhs: Self) {
        self.sheet_area_m2 += rhs.sheet_area_m2;
        self.sheet_mass_kg += rhs.sheet_mass_kg;
        self.insulation_area_m2 += rhs.insulation_area_m2;
    }
}

/// 成本摘要
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostSummary {
    /// 已定價項目的成本合計
    pub bom_total: f64,
    pub items_with_cost: usize,
    pub items_missing_cost: usize,
    /// 未定價項目數為 0 時為 true
    pub cost_complete: bool,
}

/// 單行計算結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineResult {
    /// 行號（從 1 開始，依輸入順序）
    pub line_number: usize,
    pub line_id: Option<u64>,
    pub product_id: u64,
    pub product_name: String,
    pub quantity: u32,
    pub per_unit: MaterialTotals,
    pub totals: MaterialTotals,
}

/// BOM 彙總
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BomSummary {
    pub metrics: BomMetrics,
    /// 依 total_cost 降冪（穩定排序）
    pub priced_items: Vec<PricedItem>,
    /// 依首次出現順序
    pub unpriced_items: Vec<UnpricedItem>,
}

/// BOM 指標
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BomMetrics {
    pub total_item_count: usize,
    pub priced_item_count: usize,
    pub unpriced_item_count: usize,
    pub total_cost: f64,
    /// 已定價鍵數 / 總鍵數 * 100；沒有任何鍵時為 100
    pub cost_completeness_pct: f64,
}

/// 已定價 BOM 項目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricedItem {
    pub name: String,
    pub unit: String,
    pub total_quantity: f64,
    /// 最後一次出現的單位成本
    pub cost_per_unit: f64,
    pub total_cost: f64,
    pub cost_share_pct: f64,
}

/// 未定價 BOM 項目
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnpricedItem {
    pub name: String,
    pub unit: String,
    pub total_quantity: f64,
}
