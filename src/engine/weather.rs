// ==========================================
// 供应链碳排放核算 - 天气影响模型
// ==========================================
// 职责: 温度/风速/降水/湿度 → 四个独立乘性系数
// 输入: 单次气象读数 + 运输方式
// 输出: WeatherAssessment (计算值 或 中性恢复值 + 诊断)
// 恢复策略: 天气是可选增强项, 读数异常时返回中性系数并记录 warn, 不中断调用方
// ==========================================

use crate::config::{step_factor, CarbonConfig};
use crate::domain::emission::WeatherImpact;
use crate::domain::types::TransportMode;
use crate::engine::error::{EngineError, EngineResult};
use std::sync::Arc;

// ==========================================
// WeatherAssessment - 天气评估结果
// ==========================================
#[derive(Debug, Clone, PartialEq)]
pub enum WeatherAssessment {
    /// 正常计算
    Computed(WeatherImpact),
    /// 计算失败, 已回退为中性系数
    Recovered {
        impact: WeatherImpact,
        diagnostic: EngineError,
    },
}

impl WeatherAssessment {
    pub fn impact(&self) -> WeatherImpact {
        match self {
            WeatherAssessment::Computed(impact) => *impact,
            WeatherAssessment::Recovered { impact, .. } => *impact,
        }
    }

    pub fn diagnostic(&self) -> Option<&EngineError> {
        match self {
            WeatherAssessment::Computed(_) => None,
            WeatherAssessment::Recovered { diagnostic, .. } => Some(diagnostic),
        }
    }

    pub fn is_recovered(&self) -> bool {
        matches!(self, WeatherAssessment::Recovered { .. })
    }
}

// ==========================================
// WeatherModel - 天气影响模型
// ==========================================
pub struct WeatherModel {
    config: Arc<CarbonConfig>,
}

impl WeatherModel {
    pub fn new(config: Arc<CarbonConfig>) -> Self {
        Self { config }
    }

    /// 计算天气影响
    ///
    /// # 参数
    /// - `temperature_c`: 气温 (°C)
    /// - `wind_speed_kmh`: 风速 (km/h, >= 0)
    /// - `wind_direction_degrees`: 风向 (度, 仅校验有限性)
    /// - `precipitation_mm`: 降水量 (mm, >= 0)
    /// - `humidity_percent`: 相对湿度 (%, [0, 100])
    /// - `mode`: 运输方式
    ///
    /// # 返回
    /// 读数合法时为 `Computed`; 否则为 `Recovered` (中性系数 + ComputationFailure)
    pub fn calculate_weather_impact(
        &self,
        temperature_c: f64,
        wind_speed_kmh: f64,
        wind_direction_degrees: f64,
        precipitation_mm: f64,
        humidity_percent: f64,
        mode: TransportMode,
    ) -> WeatherAssessment {
        let result = self.try_calculate(
            temperature_c,
            wind_speed_kmh,
            wind_direction_degrees,
            precipitation_mm,
            humidity_percent,
            mode,
        );

        match result {
            Ok(impact) => {
                tracing::debug!(
                    transport_mode = %mode,
                    temperature_factor = impact.temperature_factor,
                    wind_factor = impact.wind_factor,
                    precipitation_factor = impact.precipitation_factor,
                    humidity_factor = impact.humidity_factor,
                    combined_factor = impact.combined_factor(),
                    "天气影响计算完成"
                );
                WeatherAssessment::Computed(impact)
            }
            Err(diagnostic) => {
                tracing::warn!(
                    transport_mode = %mode,
                    error = %diagnostic,
                    "天气影响计算失败, 回退为中性系数"
                );
                WeatherAssessment::Recovered {
                    impact: WeatherImpact::neutral(),
                    diagnostic,
                }
            }
        }
    }

    fn try_calculate(
        &self,
        temperature_c: f64,
        wind_speed_kmh: f64,
        wind_direction_degrees: f64,
        precipitation_mm: f64,
        humidity_percent: f64,
        mode: TransportMode,
    ) -> EngineResult<WeatherImpact> {
        check_reading("temperature_c", temperature_c, None)?;
        check_reading("wind_speed_kmh", wind_speed_kmh, Some((0.0, f64::MAX)))?;
        check_reading("wind_direction_degrees", wind_direction_degrees, None)?;
        check_reading("precipitation_mm", precipitation_mm, Some((0.0, f64::MAX)))?;
        check_reading("humidity_percent", humidity_percent, Some((0.0, 100.0)))?;

        Ok(WeatherImpact {
            temperature_factor: self.temperature_factor(temperature_c, mode),
            wind_factor: self.wind_factor(wind_speed_kmh, mode),
            precipitation_factor: self.precipitation_factor(precipitation_mm, mode),
            humidity_factor: self.humidity_factor(humidity_percent),
        })
    }

    // ==========================================
    // 分项系数
    // ==========================================

    /// 温度系数: 最适区间内为 1.0, 区间外按偏离度 × 灵敏度线性增加, 再钳制
    fn temperature_factor(&self, temperature_c: f64, mode: TransportMode) -> f64 {
        let weather = &self.config.weather;

        let deviation = if temperature_c < weather.optimal_temp_min_c {
            weather.optimal_temp_min_c - temperature_c
        } else if temperature_c > weather.optimal_temp_max_c {
            temperature_c - weather.optimal_temp_max_c
        } else {
            return 1.0;
        };

        let sensitivity = *weather.temperature_sensitivity.get(mode);
        (1.0 + deviation * sensitivity)
            .max(weather.temperature_factor_min)
            .min(weather.temperature_factor_max)
    }

    fn wind_factor(&self, wind_speed_kmh: f64, mode: TransportMode) -> f64 {
        step_factor(self.config.weather.wind_bands.get(mode), wind_speed_kmh)
    }

    fn precipitation_factor(&self, precipitation_mm: f64, mode: TransportMode) -> f64 {
        step_factor(self.config.weather.precipitation_bands.get(mode), precipitation_mm)
    }

    fn humidity_factor(&self, humidity_percent: f64) -> f64 {
        step_factor(&self.config.weather.humidity_bands, humidity_percent)
    }
}

fn check_reading(field: &str, value: f64, range: Option<(f64, f64)>) -> EngineResult<()> {
    if !value.is_finite() {
        return Err(EngineError::ComputationFailure(format!(
            "气象读数 {} 非有限值: {}",
            field, value
        )));
    }
    if let Some((min, max)) = range {
        if value < min || value > max {
            return Err(EngineError::ComputationFailure(format!(
                "气象读数 {} 超出范围 [{}, {}]: {}",
                field, min, max, value
            )));
        }
    }
    Ok(())
}
