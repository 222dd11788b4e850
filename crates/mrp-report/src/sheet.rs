//! 分段報表（試算表版面）

use mrp_core::Report;
use std::fmt;
use std::io;

use crate::format::{format_currency, format_number, format_percentage};
use crate::{ReportError, Result};

/// 面積/重量顯示小數位
const MATERIAL_DECIMALS: u32 = 3;

/// 數量顯示小數位
const QUANTITY_DECIMALS: u32 = 2;

/// 未定價項目的狀態欄文字
pub const PRICE_REQUIRED: &str = "Price required";

/// 成本不完整警告
pub const INCOMPLETE_COST_WARNING: &str =
    "Some materials have no cost - the estimate is incomplete";

/// 列樣式（交給實際渲染端決定顏色與字型）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowStyle {
    Normal,
    /// 合計列
    Total,
    /// 需要注意（缺成本）
    Warning,
}

/// 一列
#[derive(Debug, Clone, PartialEq)]
pub struct Row {
    pub cells: Vec<String>,
    pub style: RowStyle,
}

impl Row {
    pub fn new(cells: Vec<String>) -> Self {
        Self {
            cells,
            style: RowStyle::Normal,
        }
    }

    pub fn total(cells: Vec<String>) -> Self {
        Self {
            cells,
            style: RowStyle::Total,
        }
    }

    pub fn warning(cells: Vec<String>) -> Self {
        Self {
            cells,
            style: RowStyle::Warning,
        }
    }

    fn label(label: &str, value: String) -> Self {
        Self::new(vec![label.to_string(), value])
    }
}

/// 報表區段
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    pub title: String,
    /// 表格欄名；鍵值型區段沒有欄名
    pub columns: Option<Vec<String>>,
    pub rows: Vec<Row>,
}

impl Section {
    fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            columns: None,
            rows: Vec::new(),
        }
    }

    fn with_columns(mut self, columns: &[&str]) -> Self {
        self.columns = Some(columns.iter().map(|c| c.to_string()).collect());
        self
    }

    fn push(&mut self, row: Row) {
        self.rows.push(row);
    }
}

/// MRP 分段報表
#[derive(Debug, Clone, PartialEq)]
pub struct ReportSheet {
    pub title: String,
    pub sections: Vec<Section>,
}

impl ReportSheet {
    /// 由計算結果建立報表
    ///
    /// 區段順序：表頭、摘要、行明細、已定價 BOM、未定價 BOM；
    /// 兩個 BOM 區段只在有項目時出現。
    pub fn from_report(report: &Report) -> Self {
        let mut sections = vec![
            Self::header_section(report),
            Self::summary_section(report),
            Self::lines_section(report),
        ];

        if !report.bom_summary.priced_items.is_empty() {
            sections.push(Self::priced_section(report));
        }
        if !report.bom_summary.unpriced_items.is_empty() {
            sections.push(Self::unpriced_section(report));
        }

        Self {
            title: "MRP REPORT".to_string(),
            sections,
        }
    }

    /// 依標題查找區段
    pub fn section(&self, title: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.title == title)
    }

    fn header_section(report: &Report) -> Section {
        let header = &report.header;
        let mut section = Section::new("REPORT INFO");
        section.push(Row::label("Project:", header.project_name.clone()));
        section.push(Row::label("Work Order No:", format!("#{}", header.work_order_id)));
        section.push(Row::label(
            "Report Date:",
            header.generated_at.format("%Y-%m-%d").to_string(),
        ));
        section.push(Row::label("Line Count:", header.line_count.to_string()));
        section.push(Row::label("Total Quantity:", header.total_quantity.to_string()));
        section
    }

    fn summary_section(report: &Report) -> Section {
        let material = &report.summary.material;
        let cost = &report.summary.cost;
        let mut section = Section::new("SUMMARY");
        section.push(Row::label(
            "Total Sheet Area:",
            format!("{} m²", format_number(material.sheet_area_m2, MATERIAL_DECIMALS)),
        ));
        section.push(Row::label(
            "Total Sheet Mass:",
            format!("{} kg", format_number(material.sheet_mass_kg, MATERIAL_DECIMALS)),
        ));
        section.push(Row::label(
            "Total Insulation Area:",
            format!(
                "{} m²",
                format_number(material.insulation_area_m2, MATERIAL_DECIMALS)
            ),
        ));
        section.push(Row::label("Estimated BOM Cost:", format_currency(cost.bom_total)));
        section.push(Row::label(
            "Cost Completeness:",
            format_percentage(report.bom_summary.metrics.cost_completeness_pct),
        ));

        if !cost.cost_complete {
            section.push(Row::warning(vec![INCOMPLETE_COST_WARNING.to_string()]));
        }
        section
    }

    fn lines_section(report: &Report) -> Section {
        let mut section = Section::new("LINE DETAILS").with_columns(&[
            "#",
            "Product",
            "Quantity",
            "Sheet Area (m²)",
            "Sheet Mass (kg)",
            "Insulation Area (m²)",
        ]);

        for line in &report.lines {
            section.push(Row::new(vec![
                line.line_number.to_string(),
                line.product_name.clone(),
                line.quantity.to_string(),
                format_number(line.totals.sheet_area_m2, MATERIAL_DECIMALS),
                format_number(line.totals.sheet_mass_kg, MATERIAL_DECIMALS),
                format_number(line.totals.insulation_area_m2, MATERIAL_DECIMALS),
            ]));
        }

        let material = &report.summary.material;
        let quantity: u64 = report.lines.iter().map(|l| u64::from(l.quantity)).sum();
        section.push(Row::total(vec![
            "TOTAL".to_string(),
            String::new(),
            quantity.to_string(),
            format_number(material.sheet_area_m2, MATERIAL_DECIMALS),
            format_number(material.sheet_mass_kg, MATERIAL_DECIMALS),
            format_number(material.insulation_area_m2, MATERIAL_DECIMALS),
        ]));
        section
    }

    fn priced_section(report: &Report) -> Section {
        let mut section = Section::new("BOM (PRICED)").with_columns(&[
            "Material",
            "Unit",
            "Quantity",
            "Unit Cost",
            "Total",
            "Share (%)",
        ]);

        for item in &report.bom_summary.priced_items {
            section.push(Row::new(vec![
                item.name.clone(),
                item.unit.clone(),
                format_number(item.total_quantity, QUANTITY_DECIMALS),
                format_currency(item.cost_per_unit),
                format_currency(item.total_cost),
                format_percentage(item.cost_share_pct),
            ]));
        }

        section.push(Row::total(vec![
            "TOTAL".to_string(),
            String::new(),
            String::new(),
            String::new(),
            format_currency(report.summary.cost.bom_total),
            "100%".to_string(),
        ]));
        section
    }

    fn unpriced_section(report: &Report) -> Section {
        let mut section = Section::new("BOM (PRICE MISSING)").with_columns(&[
            "Material",
            "Unit",
            "Quantity",
            "Status",
        ]);

        for item in &report.bom_summary.unpriced_items {
            section.push(Row::warning(vec![
                item.name.clone(),
                item.unit.clone(),
                format_number(item.total_quantity, QUANTITY_DECIMALS),
                PRICE_REQUIRED.to_string(),
            ]));
        }
        section
    }

    /// 寫出 CSV（列寬不固定，區段間以空白列分隔）
    pub fn write_csv<W: io::Write>(&self, writer: W) -> Result<()> {
        let mut wtr = csv::WriterBuilder::new()
            .flexible(true)
            .from_writer(writer);

        wtr.write_record([self.title.as_str()])?;

        for section in &self.sections {
            wtr.write_record([""])?;
            wtr.write_record([section.title.as_str()])?;
            if let Some(columns) = &section.columns {
                wtr.write_record(columns)?;
            }
            for row in &section.rows {
                wtr.write_record(&row.cells)?;
            }
        }

        wtr.flush()?;
        Ok(())
    }

    /// 輸出 CSV 字串
    pub fn to_csv_string(&self) -> Result<String> {
        let mut buf = Vec::new();
        self.write_csv(&mut buf)?;
        String::from_utf8(buf).map_err(ReportError::from)
    }
}

impl fmt::Display for ReportSheet {
    /// 終端機用的純文字版面
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.title)?;

        for section in &self.sections {
            writeln!(f)?;
            writeln!(f, "{}", section.title)?;

            let mut widths: Vec<usize> = Vec::new();
            let all_rows = section
                .columns
                .iter()
                .chain(section.rows.iter().map(|r| &r.cells));
            for cells in all_rows.clone() {
                for (i, cell) in cells.iter().enumerate() {
                    let w = cell.chars().count();
                    match widths.get_mut(i) {
                        Some(existing) => *existing = (*existing).max(w),
                        None => widths.push(w),
                    }
                }
            }

            for cells in all_rows {
                let line: Vec<String> = cells
                    .iter()
                    .enumerate()
                    .map(|(i, cell)| {
                        let pad = widths[i].saturating_sub(cell.chars().count());
                        format!("{cell}{}", " ".repeat(pad))
                    })
                    .collect();
                writeln!(f, "  {}", line.join("  ").trim_end())?;
            }
        }
        Ok(())
    }
}
