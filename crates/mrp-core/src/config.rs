//! MRP 計算配置

use serde::{Deserialize, Serialize};

use crate::{MrpError, Result};

/// 鋼板密度預設值（kg/m³）
pub const DEFAULT_STEEL_DENSITY_KG_M3: f64 = 7850.0;

/// 環境變數：鋼板密度
pub const ENV_STEEL_DENSITY: &str = "STEEL_DENSITY_KG_M3";

/// 環境變數：損耗係數
pub const ENV_WASTE_FACTOR: &str = "WASTE_FACTOR";

/// MRP 計算參數
///
/// 計算期間不可變更；由 [`MrpConfig::validate`] 保證數值合法。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MrpConfig {
    /// 鋼板密度（kg/m³）
    #[serde(default = "default_steel_density")]
    pub steel_density_kg_m3: f64,

    /// 損耗係數（無因次，>= 0），乘在原始板材面積上以計入裁切損耗
    #[serde(default)]
    pub waste_factor: f64,
}

fn default_steel_density() -> f64 {
    DEFAULT_STEEL_DENSITY_KG_M3
}

impl Default for MrpConfig {
    fn default() -> Self {
        Self {
            steel_density_kg_m3: DEFAULT_STEEL_DENSITY_KG_M3,
            waste_factor: 0.0,
        }
    }
}

impl MrpConfig {
    /// 創建新的 MRP 配置
    pub fn new(steel_density_kg_m3: f64, waste_factor: f64) -> Self {
        Self {
            steel_density_kg_m3,
            waste_factor,
        }
    }

    /// 建構器模式：設置鋼板密度
    pub fn with_steel_density(mut self, density_kg_m3: f64) -> Self {
        self.steel_density_kg_m3 = density_kg_m3;
        self
    }

    /// 建構器模式：設置損耗係數
    pub fn with_waste_factor(mut self, waste_factor: f64) -> Self {
        self.waste_factor = waste_factor;
        self
    }

    /// 從環境變數讀取配置
    ///
    /// 未設置的變數使用預設值；無法解析的數值視為配置錯誤。
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 以自訂查詢函數讀取配置（便於測試，不觸碰行程環境）
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(raw) = lookup(ENV_STEEL_DENSITY) {
            config.steel_density_kg_m3 = parse_number(ENV_STEEL_DENSITY, &raw)?;
        }
        if let Some(raw) = lookup(ENV_WASTE_FACTOR) {
            config.waste_factor = parse_number(ENV_WASTE_FACTOR, &raw)?;
        }

        config.validate()?;
        Ok(config)
    }

    /// 驗證配置
    pub fn validate(&self) -> Result<()> {
        if !self.waste_factor.is_finite() || self.waste_factor < 0.0 {
            return Err(MrpError::InvalidConfig(format!(
                "waste_factor must be zero or positive, got {}",
                self.waste_factor
            )));
        }
        if !self.steel_density_kg_m3.is_finite() || self.steel_density_kg_m3 <= 0.0 {
            return Err(MrpError::InvalidConfig(format!(
                "steel_density_kg_m3 must be greater than 0, got {}",
                self.steel_density_kg_m3
            )));
        }
        Ok(())
    }

    /// 損耗放大倍率（1 + 損耗係數）
    pub fn waste_multiplier(&self) -> f64 {
        1.0 + self.waste_factor
    }
}

fn parse_number(key: &str, raw: &str) -> Result<f64> {
    raw.trim()
        .parse::<f64>()
        .map_err(|_| MrpError::InvalidConfig(format!("{key} is not a number: {raw:?}")))
}
