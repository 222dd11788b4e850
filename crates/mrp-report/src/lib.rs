//! # MRP Report
//!
//! 報表呈現層：將 MRP 計算結果整理成分段表格並匯出 CSV

pub mod format;
pub mod sheet;

// Re-export 主要類型
pub use sheet::{ReportSheet, Row, RowStyle, Section};

/// 報表匯出錯誤
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("CSV 寫入失敗: {0}")]
    Csv(#[from] csv::Error),

    #[error("輸出失敗: {0}")]
    Io(#[from] std::io::Error),

    #[error("輸出不是有效的 UTF-8: {0}")]
    Encoding(#[from] std::string::FromUtf8Error),
}

pub type Result<T> = std::result::Result<T, ReportError>;
