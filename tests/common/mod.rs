//! Shared test fixtures for integration tests.
#![allow(dead_code)]

use pv_sizing::catalog::{InverterCatalog, InverterModel};
use pv_sizing::report::SizingRequest;
use pv_sizing::sizing::WiringOptions;

/// Inverter model with 98 % efficiency and 4 MPPT inputs.
pub fn model(id: &str, kw: f64) -> InverterModel {
    InverterModel::new(id, format!("Test {kw}kW"), kw, 98.0, 4)
}

/// Catalog built from a list of rated powers (kW).
pub fn catalog_of(powers: &[f64]) -> Vec<InverterModel> {
    powers
        .iter()
        .enumerate()
        .map(|(i, &kw)| model(&format!("m{i}"), kw))
        .collect()
}

/// 100 x 650 W, six strings, default catalog and three-phase wiring.
pub fn default_request() -> SizingRequest {
    request(650.0, 100)
}

/// Request over the default catalog and wiring.
pub fn request(panel_power_w: f64, panel_count: u32) -> SizingRequest {
    SizingRequest {
        panel_name: "Test 650W".to_string(),
        panel_power_w,
        panel_count,
        strings: 6,
        catalog: InverterCatalog::default(),
        wiring: WiringOptions::default(),
    }
}

/// Catalog CSV with five Huawei-style models.
pub const HUAWEI_CSV: &str = "\
id,name,rated_power_kw,efficiency_pct,mppt_count
huawei-12,Huawei 12KTL,12,98.5,2
huawei-20,Huawei 20KTL,20,98.6,2
huawei-30,Huawei 30KTL,30,98.6,4
huawei-50,Huawei 50KTL,50,98.7,6
huawei-100,Huawei 100KTL,100,98.8,10
";
