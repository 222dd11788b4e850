//! BOM 合併與成本彙總
//!
//! 以 (名稱, 單位或空字串) 為鍵合併跨產品的 BOM 項目。
//! 已定價與未定價分屬兩個獨立的桶：同一鍵在某行有成本、在另一行沒有時，
//! 會同時出現在兩份清單中。

use mrp_core::{BomEntry, BomMetrics, BomSummary, PricedItem, UnpricedItem};
use std::collections::HashMap;

type MergeKey = (String, String);

#[derive(Debug, Clone)]
struct PricedBucket {
    name: String,
    unit: String,
    total_quantity: f64,
    cost_per_unit: f64,
    total_cost: f64,
}

#[derive(Debug, Clone)]
struct UnpricedBucket {
    name: String,
    unit: String,
    total_quantity: f64,
}

/// BOM 彙總器（保持首次出現順序）
#[derive(Debug, Default)]
pub struct BomRollup {
    priced: Vec<PricedBucket>,
    priced_index: HashMap<MergeKey, usize>,
    unpriced: Vec<UnpricedBucket>,
    unpriced_index: HashMap<MergeKey, usize>,
    grand_total_cost: f64,
}

impl BomRollup {
    /// 創建空的彙總器
    pub fn new() -> Self {
        Self::default()
    }

    /// 累加一個產品的所有 BOM 項目
    pub fn add_items(&mut self, items: &[BomEntry], line_quantity: u32) {
        for item in items {
            self.add(item, line_quantity);
        }
    }

    /// 累加單一 BOM 項目
    ///
    /// 同鍵不同單價時採「最後寫入者為準」，不做協調。
    pub fn add(&mut self, item: &BomEntry, line_quantity: u32) {
        let total_qty = item.quantity_per_unit * f64::from(line_quantity);
        let key = item.merge_key();

        match item.cost_per_unit {
            Some(cost_per_unit) => {
                let item_cost = cost_per_unit * total_qty;
                self.grand_total_cost += item_cost;

                let idx = match self.priced_index.get(&key) {
                    Some(&idx) => idx,
                    None => {
                        self.priced.push(PricedBucket {
                            name: key.0.clone(),
                            unit: key.1.clone(),
                            total_quantity: 0.0,
                            cost_per_unit,
                            total_cost: 0.0,
                        });
                        self.priced_index.insert(key, self.priced.len() - 1);
                        self.priced.len() - 1
                    }
                };

                let bucket = &mut self.priced[idx];
                bucket.total_quantity += total_qty;
                bucket.cost_per_unit = cost_per_unit;
                bucket.total_cost += item_cost;
            }
            None => {
                let idx = match self.unpriced_index.get(&key) {
                    Some(&idx) => idx,
                    None => {
                        self.unpriced.push(UnpricedBucket {
                            name: key.0.clone(),
                            unit: key.1.clone(),
                            total_quantity: 0.0,
                        });
                        self.unpriced_index.insert(key, self.unpriced.len() - 1);
                        self.unpriced.len() - 1
                    }
                };

                self.unpriced[idx].total_quantity += total_qty;
            }
        }
    }

    /// 目前已定價成本合計
    pub fn total_cost(&self) -> f64 {
        self.grand_total_cost
    }

    /// 已定價鍵數
    pub fn priced_count(&self) -> usize {
        self.priced.len()
    }

    /// 未定價鍵數
    pub fn unpriced_count(&self) -> usize {
        self.unpriced.len()
    }

    /// 產出 BOM 彙總
    ///
    /// 已定價項目依 total_cost 降冪穩定排序並計算成本佔比；
    /// 未定價項目保持首次出現順序。
    pub fn finish(self) -> BomSummary {
        let grand_total = self.grand_total_cost;

        let mut priced_items: Vec<PricedItem> = self
            .priced
            .into_iter()
            .map(|b| PricedItem {
                cost_share_pct: if grand_total > 0.0 {
                    b.total_cost / grand_total * 100.0
                } else {
                    0.0
                },
                name: b.name,
                unit: b.unit,
                total_quantity: b.total_quantity,
                cost_per_unit: b.cost_per_unit,
                total_cost: b.total_cost,
            })
            .collect();

        // Vec::sort_by 為穩定排序，同成本保持首次出現順序
        priced_items.sort_by(|a, b| b.total_cost.total_cmp(&a.total_cost));

        let unpriced_items: Vec<UnpricedItem> = self
            .unpriced
            .into_iter()
            .map(|b| UnpricedItem {
                name: b.name,
                unit: b.unit,
                total_quantity: b.total_quantity,
            })
            .collect();

        let priced_item_count = priced_items.len();
        let unpriced_item_count = unpriced_items.len();
        let total_item_count = priced_item_count + unpriced_item_count;
        let cost_completeness_pct = if total_item_count > 0 {
            priced_item_count as f64 / total_item_count as f64 * 100.0
        } else {
            100.0
        };

        BomSummary {
            metrics: BomMetrics {
                total_item_count,
                priced_item_count,
                unpriced_item_count,
                total_cost: grand_total,
                cost_completeness_pct,
            },
            priced_items,
            unpriced_items,
        }
    }
}
