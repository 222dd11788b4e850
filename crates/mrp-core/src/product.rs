//! 產品與 BOM 模型

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::{MrpError, Result};

/// 板厚上限（mm）
pub const MAX_THICKNESS_MM: f64 = 20.0;

/// 產品類型
///
/// 目前引擎只支援矩形風管。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductType {
    /// 矩形風管
    #[serde(rename = "RECTANGULAR_DUCT")]
    RectangularDuct,
}

impl ProductType {
    /// 持久層使用的類型名稱
    pub fn as_str(&self) -> &'static str {
        match self {
            ProductType::RectangularDuct => "RECTANGULAR_DUCT",
        }
    }
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProductType {
    type Err = MrpError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "RECTANGULAR_DUCT" => Ok(ProductType::RectangularDuct),
            other => Err(MrpError::UnsupportedProductType(other.to_string())),
        }
    }
}

/// 矩形風管幾何規格（尺寸單位皆為 mm）
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DuctSpec {
    /// 寬度
    pub width_mm: f64,

    /// 高度
    pub height_mm: f64,

    /// 長度
    pub length_mm: f64,

    /// 板厚，(0, 20]
    pub thickness_mm: f64,

    /// 是否有保溫
    #[serde(default)]
    pub insulation_enabled: bool,

    /// 保溫厚度；啟用保溫時必須 > 0
    #[serde(default)]
    pub insulation_thickness_mm: Option<f64>,
}

impl DuctSpec {
    /// 創建無保溫的風管規格
    pub fn new(width_mm: f64, height_mm: f64, length_mm: f64, thickness_mm: f64) -> Self {
        Self {
            width_mm,
            height_mm,
            length_mm,
            thickness_mm,
            insulation_enabled: false,
            insulation_thickness_mm: None,
        }
    }

    /// 建構器模式：啟用保溫
    pub fn with_insulation(mut self, thickness_mm: f64) -> Self {
        self.insulation_enabled = true;
        self.insulation_thickness_mm = Some(thickness_mm);
        self
    }

    /// 從產品屬性解析並驗證規格
    pub fn from_attributes(attributes: &serde_json::Value) -> Result<Self> {
        let spec: DuctSpec = serde_json::from_value(attributes.clone())
            .map_err(|e| MrpError::InvalidGeometry(e.to_string()))?;
        spec.validate()?;
        Ok(spec)
    }

    /// 驗證尺寸邊界，違反即報錯，不做截斷
    pub fn validate(&self) -> Result<()> {
        for (field, value) in [
            ("width_mm", self.width_mm),
            ("height_mm", self.height_mm),
            ("length_mm", self.length_mm),
        ] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(MrpError::InvalidGeometry(format!(
                    "{field} must be greater than 0, got {value}"
                )));
            }
        }

        if !(self.thickness_mm > 0.0 && self.thickness_mm <= MAX_THICKNESS_MM) {
            return Err(MrpError::InvalidGeometry(format!(
                "thickness_mm must be in (0, {MAX_THICKNESS_MM}], got {}",
                self.thickness_mm
            )));
        }

        if self.insulation_enabled {
            match self.insulation_thickness_mm {
                Some(t) if t > 0.0 && t.is_finite() => {}
                other => {
                    return Err(MrpError::InvalidGeometry(format!(
                        "insulation_thickness_mm must be greater than 0 when insulation is enabled, got {other:?}"
                    )))
                }
            }
        }

        Ok(())
    }

    /// 轉為產品屬性（持久層格式）
    pub fn to_attributes(&self) -> serde_json::Value {
        serde_json::json!({
            "width_mm": self.width_mm,
            "height_mm": self.height_mm,
            "length_mm": self.length_mm,
            "thickness_mm": self.thickness_mm,
            "insulation_enabled": self.insulation_enabled,
            "insulation_thickness_mm": self.insulation_thickness_mm,
        })
    }
}

/// BOM 項目（每單位產品所需的材料/配件）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BomEntry {
    /// 名稱
    pub name: String,

    /// 單位
    #[serde(default)]
    pub unit: Option<String>,

    /// 每單位用量
    pub quantity_per_unit: f64,

    /// 單位成本；None 表示成本未知，不等於 0
    #[serde(default)]
    pub cost_per_unit: Option<f64>,
}

impl BomEntry {
    /// 創建新的 BOM 項目（無單位、無成本）
    pub fn new(name: impl Into<String>, quantity_per_unit: f64) -> Self {
        Self {
            name: name.into(),
            unit: None,
            quantity_per_unit,
            cost_per_unit: None,
        }
    }

    /// 建構器模式：設置單位
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// 建構器模式：設置單位成本
    pub fn with_cost(mut self, cost_per_unit: f64) -> Self {
        self.cost_per_unit = Some(cost_per_unit);
        self
    }

    /// 合併鍵 (名稱, 單位或空字串)
    pub fn merge_key(&self) -> (String, String) {
        (self.name.clone(), self.unit.clone().unwrap_or_default())
    }

    /// 是否已定價
    pub fn is_priced(&self) -> bool {
        self.cost_per_unit.is_some()
    }

    /// 驗證 BOM 項目（供持久層在寫入前呼叫）
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(MrpError::InvalidBomEntry(
                "BOM entry name must not be empty".to_string(),
            ));
        }
        if !(self.quantity_per_unit > 0.0) {
            return Err(MrpError::InvalidBomEntry(format!(
                "BOM entry {:?}: quantity_per_unit must be greater than 0",
                self.name
            )));
        }
        if let Some(cost) = self.cost_per_unit {
            if !(cost >= 0.0) {
                return Err(MrpError::InvalidBomEntry(format!(
                    "BOM entry {:?}: cost_per_unit must not be negative",
                    self.name
                )));
            }
        }
        Ok(())
    }
}

/// 產品快照
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// 產品ID
    pub id: u64,

    /// 名稱
    pub name: String,

    /// 說明
    #[serde(default)]
    pub description: Option<String>,

    /// 產品類型（持久層原始字串）
    pub product_type: String,

    /// 幾何屬性
    pub attributes: serde_json::Value,

    /// BOM 項目（有序）
    #[serde(default)]
    pub bom_items: Vec<BomEntry>,
}

impl Product {
    /// 創建矩形風管產品
    pub fn rectangular_duct(id: u64, name: impl Into<String>, spec: &DuctSpec) -> Self {
        Self {
            id,
            name: name.into(),
            description: None,
            product_type: ProductType::RectangularDuct.as_str().to_string(),
            attributes: spec.to_attributes(),
            bom_items: Vec::new(),
        }
    }

    /// 建構器模式：設置說明
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// 建構器模式：設置產品類型
    pub fn with_product_type(mut self, product_type: impl Into<String>) -> Self {
        self.product_type = product_type.into();
        self
    }

    /// 建構器模式：設置幾何屬性
    pub fn with_attributes(mut self, attributes: serde_json::Value) -> Self {
        self.attributes = attributes;
        self
    }

    /// 建構器模式：添加 BOM 項目
    pub fn with_bom_item(mut self, item: BomEntry) -> Self {
        self.bom_items.push(item);
        self
    }

    /// 解析產品類型
    pub fn kind(&self) -> Result<ProductType> {
        self.product_type.parse()
    }

    /// 解析幾何規格
    pub fn duct_spec(&self) -> Result<DuctSpec> {
        DuctSpec::from_attributes(&self.attributes)
    }
}
