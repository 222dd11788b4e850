//! 板材幾何計算
//!
//! 矩形風管以「周長 × 長度」作為表面積模型。

use mrp_core::{DuctSpec, MaterialTotals, MrpConfig};

/// mm² → m²
const MM2_PER_M2: f64 = 1_000_000.0;

/// mm → m
const MM_PER_M: f64 = 1_000.0;

/// 原始板材面積（m²，未計損耗）
pub fn base_sheet_area_m2(spec: &DuctSpec) -> f64 {
    2.0 * (spec.width_mm + spec.height_mm) * spec.length_mm / MM2_PER_M2
}

/// 每單位材料量
///
/// - 板材面積 = 原始面積 × (1 + 損耗係數)
/// - 板材重量 = 板材面積 × 板厚(m) × 鋼板密度
/// - 保溫面積 = 啟用保溫時等於板材面積，否則為 0（保溫厚度不影響面積）
pub fn per_unit(spec: &DuctSpec, config: &MrpConfig) -> MaterialTotals {
    let sheet_area_m2 = base_sheet_area_m2(spec) * config.waste_multiplier();
    let sheet_mass_kg = sheet_area_m2 * (spec.thickness_mm / MM_PER_M) * config.steel_density_kg_m3;
    let insulation_area_m2 = if spec.insulation_enabled {
        sheet_area_m2
    } else {
        0.0
    };

    MaterialTotals {
        sheet_area_m2,
        sheet_mass_kg,
        insulation_area_m2,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const EPS: f64 = 1e-9;

    #[test]
    fn test_base_area() {
        let spec = DuctSpec::new(500.0, 400.0, 1000.0, 0.7);
        // 2 × 900 × 1000 / 1e6
        assert!((base_sheet_area_m2(&spec) - 1.8).abs() < EPS);
    }

    #[test]
    fn test_per_unit_with_waste_and_insulation() {
        let spec = DuctSpec::new(500.0, 400.0, 1000.0, 0.7).with_insulation(20.0);
        let config = MrpConfig::default().with_waste_factor(0.05);

        let metrics = per_unit(&spec, &config);

        assert!((metrics.sheet_area_m2 - 1.89).abs() < EPS);
        assert!((metrics.sheet_mass_kg - 1.89 * 0.0007 * 7850.0).abs() < EPS);
        assert_eq!(metrics.insulation_area_m2, metrics.sheet_area_m2);
    }

    #[rstest]
    #[case(0.0, 1.8)]
    #[case(0.1, 1.98)]
    #[case(1.0, 3.6)]
    fn test_waste_factor_scales_area(#[case] waste: f64, #[case] expected: f64) {
        let spec = DuctSpec::new(500.0, 400.0, 1000.0, 0.7);
        let config = MrpConfig::default().with_waste_factor(waste);

        let metrics = per_unit(&spec, &config);

        assert!((metrics.sheet_area_m2 - expected).abs() < EPS);
        assert_eq!(metrics.insulation_area_m2, 0.0);
    }

    #[test]
    fn test_insulation_thickness_does_not_scale_area() {
        let config = MrpConfig::default();
        let thin = per_unit(&DuctSpec::new(300.0, 300.0, 500.0, 1.0).with_insulation(10.0), &config);
        let thick = per_unit(&DuctSpec::new(300.0, 300.0, 500.0, 1.0).with_insulation(50.0), &config);

        assert_eq!(thin, thick);
    }

    #[test]
    fn test_mass_scales_with_density() {
        let spec = DuctSpec::new(1000.0, 1000.0, 1000.0, 1.0);
        let metrics = per_unit(&spec, &MrpConfig::new(8000.0, 0.0));

        // 4 m² × 0.001 m × 8000 kg/m³
        assert!((metrics.sheet_mass_kg - 32.0).abs() < EPS);
    }
}
