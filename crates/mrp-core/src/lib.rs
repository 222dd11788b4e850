//! # MRP Core
//!
//! 風管工單 MRP 的核心資料模型與類型定義

pub mod config;
pub mod product;
pub mod report;
pub mod work_order;

// Re-export 主要類型
pub use config::MrpConfig;
pub use product::{BomEntry, DuctSpec, Product, ProductType, MAX_THICKNESS_MM};
pub use report::{
    BomMetrics, BomSummary, CostSummary, LineResult, MaterialTotals, PricedItem, Report,
    ReportHeader, Summary, UnpricedItem,
};
pub use work_order::{LegacyItem, WorkOrder, WorkOrderLine};

/// MRP 錯誤類型
///
/// 所有錯誤皆為輸入驗證錯誤（呼叫端可修正），不屬於暫時性故障，不應重試。
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MrpError {
    #[error("no work order line found")]
    NoLines,

    #[error("no calculation defined for product type: {0}")]
    UnsupportedProductType(String),

    #[error("invalid product dimensions: {0}")]
    InvalidGeometry(String),

    #[error("invalid BOM entry: {0}")]
    InvalidBomEntry(String),

    #[error("line {line_number}: quantity must be greater than 0")]
    InvalidQuantity { line_number: usize },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl MrpError {
    /// 機器可判讀的錯誤代碼
    pub fn code(&self) -> &'static str {
        match self {
            MrpError::NoLines => "no_lines",
            MrpError::UnsupportedProductType(_) => "unsupported_product_type",
            MrpError::InvalidGeometry(_) => "invalid_geometry",
            MrpError::InvalidBomEntry(_) => "invalid_bom_entry",
            MrpError::InvalidQuantity { .. } => "invalid_quantity",
            MrpError::InvalidInput(_) => "invalid_input",
            MrpError::InvalidConfig(_) => "invalid_config",
        }
    }

    /// 是否為驗證類錯誤
    pub fn is_validation(&self) -> bool {
        true
    }
}

pub type Result<T> = std::result::Result<T, MrpError>;
