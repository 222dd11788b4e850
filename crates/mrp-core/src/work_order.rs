//! 工單模型

use serde::{Deserialize, Serialize};

use crate::product::Product;

/// 工單行（產品 + 數量）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkOrderLine {
    /// 行ID（未儲存的行沒有ID）
    #[serde(default)]
    pub id: Option<u64>,

    /// 生產數量
    pub quantity: u32,

    /// 產品快照
    pub product: Product,
}

impl WorkOrderLine {
    /// 創建新的工單行
    pub fn new(product: Product, quantity: u32) -> Self {
        Self {
            id: None,
            quantity,
            product,
        }
    }

    /// 建構器模式：設置行ID
    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(id);
        self
    }
}

/// 舊版單一產品工單欄位（無明細行）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegacyItem {
    pub product: Product,
    pub quantity: u32,
}

/// 工單
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkOrder {
    /// 工單ID
    pub id: u64,

    /// 專案名稱
    pub project_name: String,

    /// 工單行（有序；順序決定輸出行號）
    #[serde(default)]
    pub lines: Vec<WorkOrderLine>,

    /// 舊版單一產品欄位
    #[serde(default)]
    pub legacy: Option<LegacyItem>,
}

impl WorkOrder {
    /// 創建新的工單
    pub fn new(id: u64, project_name: impl Into<String>) -> Self {
        Self {
            id,
            project_name: project_name.into(),
            lines: Vec::new(),
            legacy: None,
        }
    }

    /// 建構器模式：添加工單行
    pub fn with_line(mut self, line: WorkOrderLine) -> Self {
        self.lines.push(line);
        self
    }

    /// 建構器模式：設置舊版單一產品
    pub fn with_legacy_item(mut self, product: Product, quantity: u32) -> Self {
        self.legacy = Some(LegacyItem { product, quantity });
        self
    }

    /// 添加工單行
    pub fn add_line(&mut self, line: WorkOrderLine) {
        self.lines.push(line);
    }

    /// 舊資料正規化
    ///
    /// 沒有明細行但帶有舊版產品與正數量時，轉成單一明細行；
    /// 其他情況原樣返回。計算引擎本身只處理 `lines`。
    pub fn normalize_legacy(mut self) -> Self {
        if self.lines.is_empty() {
            if let Some(legacy) = self.legacy.take() {
                if legacy.quantity > 0 {
                    self.lines
                        .push(WorkOrderLine::new(legacy.product, legacy.quantity));
                } else {
                    self.legacy = Some(legacy);
                }
            }
        }
        self
    }

    /// 所有行的數量合計
    pub fn total_quantity(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// 是否為空工單
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
