// ==========================================
// 供应链碳排放核算 - 排放计算领域对象
// ==========================================
// 职责: 排放引擎的输入/输出结构
// 精度: 所有质量与系数统一保留 2 位小数 (见 engine::emissions::ROUNDING_DECIMALS)
// ==========================================

use crate::domain::types::TransportMode;
use serde::{Deserialize, Serialize};

// ==========================================
// WeatherImpact - 天气影响系数
// ==========================================
// 四个独立乘性系数, 缺省 1.0 (中性)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherImpact {
    pub temperature_factor: f64,   // 温度
    pub wind_factor: f64,          // 风速
    pub precipitation_factor: f64, // 降水
    pub humidity_factor: f64,      // 湿度
}

impl WeatherImpact {
    /// 中性天气 (四个系数均为 1.0)
    pub fn neutral() -> Self {
        Self {
            temperature_factor: 1.0,
            wind_factor: 1.0,
            precipitation_factor: 1.0,
            humidity_factor: 1.0,
        }
    }

    /// 综合系数 = 四个系数之积
    pub fn combined_factor(&self) -> f64 {
        self.temperature_factor * self.wind_factor * self.precipitation_factor * self.humidity_factor
    }

    pub fn is_neutral(&self) -> bool {
        *self == Self::neutral()
    }
}

impl Default for WeatherImpact {
    fn default() -> Self {
        Self::neutral()
    }
}

// ==========================================
// ShipmentInput - 单票运输参数
// ==========================================
// 由调用方逐票构造, 引擎消费一次, 不保留
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentInput {
    #[serde(default)]
    pub shipment_id: Option<String>,   // 运单号 (仅用于失败报告)
    pub distance_km: f64,              // 距离 (km, > 0)
    pub weight_kg: f64,                // 重量 (kg, > 0)
    pub transport_mode: TransportMode, // 运输方式
    #[serde(default)]
    pub weather: Option<WeatherImpact>, // 天气影响 (可选)
    #[serde(default)]
    pub load_factor: Option<f64>,      // 装载率 (0,1], 缺省取配置
    #[serde(default)]
    pub fuel_efficiency: Option<f64>,  // 燃油效率系数, 缺省取配置
}

impl ShipmentInput {
    pub fn new(distance_km: f64, weight_kg: f64, transport_mode: TransportMode) -> Self {
        Self {
            shipment_id: None,
            distance_km,
            weight_kg,
            transport_mode,
            weather: None,
            load_factor: None,
            fuel_efficiency: None,
        }
    }

    pub fn with_shipment_id(mut self, shipment_id: impl Into<String>) -> Self {
        self.shipment_id = Some(shipment_id.into());
        self
    }

    pub fn with_weather(mut self, weather: WeatherImpact) -> Self {
        self.weather = Some(weather);
        self
    }

    pub fn with_load_factor(mut self, load_factor: f64) -> Self {
        self.load_factor = Some(load_factor);
        self
    }

    pub fn with_fuel_efficiency(mut self, fuel_efficiency: f64) -> Self {
        self.fuel_efficiency = Some(fuel_efficiency);
        self
    }
}

// ==========================================
// EmissionResult - 单票排放结果
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmissionResult {
    pub co2_kg: f64,
    pub ch4_kg: f64,
    pub n2o_kg: f64,
    pub co2_equivalent_kg: f64,
    pub weather_factor: f64,     // 天气综合系数
    pub operational_factor: f64, // 装载率 × 燃油效率 (不含天气)
}

// ==========================================
// ShipmentFailure - 批量计算中被跳过的运单
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShipmentFailure {
    pub index: usize,                // 在输入序列中的位置
    pub shipment_id: Option<String>, // 运单号 (如有)
    pub reason: String,              // 失败原因
}

// ==========================================
// SupplyChainEmissions - 供应链汇总
// ==========================================
// 失败策略: 跳过并继续, 失败运单不计入任何合计 (含范围三)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplyChainEmissions {
    pub total_co2_kg: f64,
    pub total_ch4_kg: f64,
    pub total_n2o_kg: f64,
    pub total_co2_equivalent_kg: f64, // 含范围三 (若启用)
    pub scope_3_emissions_kg: f64,
    pub shipment_count: usize,        // 成功计入的运单数
    pub failed_count: usize,          // 被跳过的运单数
    pub failures: Vec<ShipmentFailure>,
}

impl SupplyChainEmissions {
    pub fn has_failures(&self) -> bool {
        !self.failures.is_empty()
    }
}
