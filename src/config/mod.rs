// ==========================================
// 供应链碳排放核算 - 配置层
// ==========================================
// 职责: 策略常量集中为不可变配置对象, 支持 JSON/环境变量覆写
// ==========================================

pub mod carbon_config;
pub mod error;

// 重导出核心配置
pub use carbon_config::{
    step_factor, AnomalyConfig, CarbonConfig, EmissionFactors, GasFactors, ModeTable,
    OperationalDefaults, Scope3Config, StepBand, WeatherModelConfig, WEATHER_FACTOR_BOUNDS,
};
pub use error::{ConfigError, ConfigResult};
