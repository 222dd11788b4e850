//! MRP 主計算器

use chrono::{DateTime, Utc};
use mrp_core::{
    CostSummary, LineResult, MaterialTotals, MrpConfig, MrpError, ProductType, Report,
    ReportHeader, Summary, WorkOrder, WorkOrderLine,
};
use rayon::prelude::*;

use crate::bom_rollup::BomRollup;
use crate::geometry;

/// MRP 計算器
///
/// 純計算：除讀取時鐘外沒有副作用，相同輸入與時間得到相同報表。
#[derive(Debug, Clone)]
pub struct MrpCalculator {
    /// MRP 配置
    config: MrpConfig,
}

impl MrpCalculator {
    /// 創建新的 MRP 計算器（配置會先驗證）
    pub fn new(config: MrpConfig) -> mrp_core::Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    /// 獲取配置引用
    pub fn config(&self) -> &MrpConfig {
        &self.config
    }

    /// 主 MRP 計算入口（以目前時間作為報表時間）
    pub fn calculate(&self, work_order: &WorkOrder) -> mrp_core::Result<Report> {
        self.calculate_at(work_order, Utc::now())
    }

    /// 以指定時間計算，輸出完全可重現
    ///
    /// 遇到第一個錯誤即中止，不產出部分報表。
    pub fn calculate_at(
        &self,
        work_order: &WorkOrder,
        generated_at: DateTime<Utc>,
    ) -> mrp_core::Result<Report> {
        tracing::info!(
            "開始 MRP 計算：工單 {}，{} 行",
            work_order.id,
            work_order.lines.len()
        );
        let start_time = std::time::Instant::now();

        if work_order.lines.is_empty() {
            tracing::warn!("工單 {} 沒有工單行", work_order.id);
            return Err(MrpError::NoLines);
        }

        let mut material = MaterialTotals::default();
        let mut rollup = BomRollup::new();
        let mut total_quantity: u64 = 0;
        let mut lines = Vec::with_capacity(work_order.lines.len());

        for (idx, line) in work_order.lines.iter().enumerate() {
            let line_number = idx + 1;
            let result = self
                .calculate_line(line_number, line)
                .map_err(|e| {
                    tracing::warn!("工單 {} 第 {} 行驗證失敗: {}", work_order.id, line_number, e);
                    e
                })?;

            tracing::debug!(
                "第 {} 行: 產品 {} x{}，板材 {:.3} m²",
                line_number,
                line.product.id,
                line.quantity,
                result.totals.sheet_area_m2
            );

            total_quantity += u64::from(line.quantity);
            material += result.totals;
            rollup.add_items(&line.product.bom_items, line.quantity);
            lines.push(result);
        }

        tracing::debug!(
            "BOM 合併：已定價 {} 項，未定價 {} 項",
            rollup.priced_count(),
            rollup.unpriced_count()
        );

        let bom_summary = rollup.finish();
        let metrics = &bom_summary.metrics;

        let report = Report {
            header: ReportHeader {
                project_name: work_order.project_name.clone(),
                work_order_id: work_order.id,
                generated_at,
                line_count: lines.len(),
                total_quantity,
            },
            summary: Summary {
                material,
                cost: CostSummary {
                    bom_total: metrics.total_cost,
                    items_with_cost: metrics.priced_item_count,
                    items_missing_cost: metrics.unpriced_item_count,
                    cost_complete: metrics.unpriced_item_count == 0,
                },
            },
            lines,
            bom_summary,
        };

        tracing::info!(
            "MRP 計算完成，耗時 {:?}，BOM 成本 {:.2}",
            start_time.elapsed(),
            report.summary.cost.bom_total
        );

        Ok(report)
    }

    /// 批次計算多張工單（並行，輸出順序與輸入相同）
    pub fn calculate_batch(&self, work_orders: &[WorkOrder]) -> Vec<mrp_core::Result<Report>> {
        let generated_at = Utc::now();
        tracing::info!("批次 MRP 計算：{} 張工單", work_orders.len());

        work_orders
            .par_iter()
            .map(|wo| self.calculate_at(wo, generated_at))
            .collect()
    }

    /// 單行計算：驗證產品並推導每單位與整行材料量
    fn calculate_line(
        &self,
        line_number: usize,
        line: &WorkOrderLine,
    ) -> mrp_core::Result<LineResult> {
        let product = &line.product;

        match product.kind()? {
            ProductType::RectangularDuct => {}
        }

        let spec = product.duct_spec()?;

        if line.quantity == 0 {
            return Err(MrpError::InvalidQuantity { line_number });
        }

        let per_unit = geometry::per_unit(&spec, &self.config);
        let totals = per_unit.scaled(f64::from(line.quantity));

        Ok(LineResult {
            line_number,
            line_id: line.id,
            product_id: product.id,
            product_name: product.name.clone(),
            quantity: line.quantity,
            per_unit,
            totals,
        })
    }
}
