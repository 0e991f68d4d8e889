// ==========================================
// 供应链碳排放核算 - 排放引擎
// ==========================================
// 职责: 单票运输排放 (CO2/CH4/N2O/CO2e) + 供应链汇总 + 范围三估算
// 输入: ShipmentInput (距离/重量/运输方式/天气/装载率/燃油效率)
// 输出: EmissionResult / SupplyChainEmissions
// 精度契约: 所有质量与系数四舍五入保留 ROUNDING_DECIMALS 位小数
//   小于 0.005 kg 的气体质量取整为 0, 量级相近的小质量取整后可能持平
//   (如海运 N2O), 单调性只对取整前的值严格成立
// 批量失败策略: 跳过并继续, 失败明细随结果返回
// ==========================================

use crate::config::{CarbonConfig, WEATHER_FACTOR_BOUNDS};
use crate::domain::emission::{
    EmissionResult, ShipmentFailure, ShipmentInput, SupplyChainEmissions, WeatherImpact,
};
use crate::engine::error::{EngineError, EngineResult};
use std::sync::Arc;

/// 输出精度 (小数位)
pub const ROUNDING_DECIMALS: i32 = 2;

/// 四舍五入到指定小数位 (远离零方向)
pub fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}

fn round_output(value: f64) -> f64 {
    round_to(value, ROUNDING_DECIMALS)
}

// ==========================================
// EmissionsEngine - 排放引擎
// ==========================================
pub struct EmissionsEngine {
    config: Arc<CarbonConfig>,
}

impl EmissionsEngine {
    pub fn new(config: Arc<CarbonConfig>) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CarbonConfig {
        &self.config
    }

    // ==========================================
    // 单票计算
    // ==========================================

    /// 计算单票运输排放
    ///
    /// # 算法
    /// 1. 按运输方式取 CO2/CH4/N2O 基准因子
    /// 2. base_gas = factor × distance_km × (weight_kg / 1000)
    /// 3. operational_factor = load_factor × fuel_efficiency
    /// 4. final_gas = base_gas × operational_factor × weather_factor
    /// 5. co2e = co2 + ch4 × CH4_GWP + n2o × N2O_GWP
    ///
    /// # 错误
    /// - `InvalidInput`: 距离/重量非正, 装载率不在 (0, 1], 燃油效率非正,
    ///   天气系数非有限或超出 WEATHER_FACTOR_BOUNDS
    pub fn calculate_transport_emissions(&self, input: &ShipmentInput) -> EngineResult<EmissionResult> {
        let (load_factor, fuel_efficiency) = self.validate_input(input)?;

        let factors = self.config.emission_factors.for_mode(input.transport_mode);
        let weight_tons = input.weight_kg / 1000.0;
        let ton_km = input.distance_km * weight_tons;

        let base_co2 = factors.co2 * ton_km;
        let base_ch4 = factors.ch4 * ton_km;
        let base_n2o = factors.n2o * ton_km;

        let operational_factor = load_factor * fuel_efficiency;
        let weather_factor = input
            .weather
            .map(|w| w.combined_factor())
            .unwrap_or(1.0);
        let adjustment = operational_factor * weather_factor;

        let co2_kg = base_co2 * adjustment;
        let ch4_kg = base_ch4 * adjustment;
        let n2o_kg = base_n2o * adjustment;

        let gwp = &self.config.emission_factors;
        let co2_equivalent_kg = co2_kg + ch4_kg * gwp.ch4_gwp + n2o_kg * gwp.n2o_gwp;

        let result = EmissionResult {
            co2_kg: round_output(co2_kg),
            ch4_kg: round_output(ch4_kg),
            n2o_kg: round_output(n2o_kg),
            co2_equivalent_kg: round_output(co2_equivalent_kg),
            weather_factor: round_output(weather_factor),
            operational_factor: round_output(operational_factor),
        };

        tracing::debug!(
            distance_km = input.distance_km,
            weight_kg = input.weight_kg,
            transport_mode = %input.transport_mode,
            co2_kg = result.co2_kg,
            co2_equivalent_kg = result.co2_equivalent_kg,
            "单票排放计算完成"
        );

        Ok(result)
    }

    /// 输入契约校验, 返回 (load_factor, fuel_efficiency)
    fn validate_input(&self, input: &ShipmentInput) -> EngineResult<(f64, f64)> {
        // NaN 也不满足 > 0
        if !(input.distance_km > 0.0 && input.distance_km.is_finite()) {
            return Err(EngineError::invalid_input(
                "distance_km",
                format!("距离必须为正数: {}", input.distance_km),
            ));
        }
        if !(input.weight_kg > 0.0 && input.weight_kg.is_finite()) {
            return Err(EngineError::invalid_input(
                "weight_kg",
                format!("重量必须为正数: {}", input.weight_kg),
            ));
        }

        let defaults = &self.config.operational;
        let load_factor = input.load_factor.unwrap_or(defaults.load_factor);
        if !(load_factor > 0.0 && load_factor <= 1.0) {
            return Err(EngineError::invalid_input(
                "load_factor",
                format!("装载率必须位于 (0, 1]: {}", load_factor),
            ));
        }

        let fuel_efficiency = input.fuel_efficiency.unwrap_or(defaults.fuel_efficiency);
        if !(fuel_efficiency > 0.0 && fuel_efficiency.is_finite()) {
            return Err(EngineError::invalid_input(
                "fuel_efficiency",
                format!("燃油效率系数必须为正数: {}", fuel_efficiency),
            ));
        }

        if let Some(weather) = &input.weather {
            check_weather_impact(weather)?;
        }

        Ok((load_factor, fuel_efficiency))
    }

    // ==========================================
    // 供应链汇总
    // ==========================================

    /// 计算供应链排放汇总
    ///
    /// # 参数
    /// - `shipments`: 运单序列 (单次遍历)
    /// - `include_scope_3`: 是否把范围三估算计入 CO2e 合计
    ///
    /// # 返回
    /// SupplyChainEmissions; 校验失败的运单被跳过, 记录在 `failures`
    ///
    /// # 说明
    /// - 合计为各票已取整结果之和, 再按输出精度取整
    /// - 范围三只计入 CO2e 合计, 不拆分到 CH4/N2O
    pub fn calculate_supply_chain_emissions(
        &self,
        shipments: &[ShipmentInput],
        include_scope_3: bool,
    ) -> SupplyChainEmissions {
        let mut computed = Vec::with_capacity(shipments.len());
        let mut failures = Vec::new();

        for (index, shipment) in shipments.iter().enumerate() {
            match self.calculate_transport_emissions(shipment) {
                Ok(emissions) => computed.push((emissions, shipment.weight_kg)),
                Err(e) => {
                    tracing::warn!(
                        index,
                        shipment_id = ?shipment.shipment_id,
                        error = %e,
                        "运单排放计算失败, 已跳过"
                    );
                    failures.push(ShipmentFailure {
                        index,
                        shipment_id: shipment.shipment_id.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        self.summarize_emissions(&computed, failures, include_scope_3)
    }

    /// 汇总已计算的单票结果
    ///
    /// # 参数
    /// - `computed`: (单票结果, 重量 kg), 重量用于范围三估算
    /// - `failures`: 上游已记录的失败运单, 原样写入结果
    pub fn summarize_emissions(
        &self,
        computed: &[(EmissionResult, f64)],
        failures: Vec<ShipmentFailure>,
        include_scope_3: bool,
    ) -> SupplyChainEmissions {
        let mut total_co2 = 0.0;
        let mut total_ch4 = 0.0;
        let mut total_n2o = 0.0;
        let mut total_co2e = 0.0;
        let mut scope_3_raw = 0.0;

        for (emissions, weight_kg) in computed {
            total_co2 += emissions.co2_kg;
            total_ch4 += emissions.ch4_kg;
            total_n2o += emissions.n2o_kg;
            total_co2e += emissions.co2_equivalent_kg;
            if include_scope_3 {
                scope_3_raw += self.calculate_scope_3_emissions(*weight_kg);
            }
        }

        let scope_3_emissions_kg = round_output(scope_3_raw);
        let result = SupplyChainEmissions {
            total_co2_kg: round_output(total_co2),
            total_ch4_kg: round_output(total_ch4),
            total_n2o_kg: round_output(total_n2o),
            total_co2_equivalent_kg: round_output(total_co2e + scope_3_emissions_kg),
            scope_3_emissions_kg,
            shipment_count: computed.len(),
            failed_count: failures.len(),
            failures,
        };

        tracing::info!(
            total_co2_kg = result.total_co2_kg,
            total_co2_equivalent_kg = result.total_co2_equivalent_kg,
            scope_3_emissions_kg = result.scope_3_emissions_kg,
            shipment_count = result.shipment_count,
            failed_count = result.failed_count,
            "供应链排放汇总完成"
        );

        result
    }

    /// 单票范围三估算 (包装 + 仓储, 未取整)
    pub fn calculate_scope_3_emissions(&self, weight_kg: f64) -> f64 {
        let scope = &self.config.scope_3;
        let baseline = weight_kg * scope.resource_factor;
        let packaging = baseline * scope.packaging_share;
        let warehousing = baseline * scope.warehousing_share;
        packaging + warehousing
    }
}

/// 调用方传入的天气系数必须落在允许区间 (NaN 同样拒绝)
fn check_weather_impact(weather: &WeatherImpact) -> EngineResult<()> {
    let (min, max) = WEATHER_FACTOR_BOUNDS;
    let factors = [
        ("weather.temperature_factor", weather.temperature_factor),
        ("weather.wind_factor", weather.wind_factor),
        ("weather.precipitation_factor", weather.precipitation_factor),
        ("weather.humidity_factor", weather.humidity_factor),
    ];

    for (field, value) in factors {
        if !(value >= min && value <= max) {
            return Err(EngineError::invalid_input(
                field,
                format!("天气系数必须位于 [{}, {}]: {}", min, max, value),
            ));
        }
    }
    Ok(())
}
