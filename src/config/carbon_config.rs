// ==========================================
// 供应链碳排放核算 - 策略配置
// ==========================================
// 职责: 排放因子表 / 天气模型阈值 / 范围三系数 / 异常阈值
// 说明: 构造后不可变, 由调用方注入引擎与筛查器; 不读写进程级全局状态
// 覆写: JSON 文件 (字段级) + 环境变量
// ==========================================

use crate::config::error::{ConfigError, ConfigResult};
use crate::domain::types::TransportMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// 天气系数允许区间 (所有分段系数及温度钳制上下限必须落在此区间)
pub const WEATHER_FACTOR_BOUNDS: (f64, f64) = (0.5, 1.5);

// 环境变量
pub const ENV_ANOMALY_Z_THRESHOLD: &str = "CARBON_ANOMALY_Z_THRESHOLD";
pub const ENV_INCLUDE_SCOPE_3: &str = "CARBON_INCLUDE_SCOPE_3";

// ==========================================
// ModeTable - 按运输方式取值的表
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModeTable<T> {
    pub air: T,
    pub ground: T,
    pub sea: T,
}

impl<T> ModeTable<T> {
    pub fn get(&self, mode: TransportMode) -> &T {
        match mode {
            TransportMode::Air => &self.air,
            TransportMode::Ground => &self.ground,
            TransportMode::Sea => &self.sea,
        }
    }

    fn entries(&self) -> [(TransportMode, &T); 3] {
        [
            (TransportMode::Air, &self.air),
            (TransportMode::Ground, &self.ground),
            (TransportMode::Sea, &self.sea),
        ]
    }
}

// ==========================================
// EmissionFactors - 排放因子表 (kg / 吨·公里)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GasFactors {
    pub co2: f64,
    pub ch4: f64,
    pub n2o: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EmissionFactors {
    pub factors: ModeTable<GasFactors>,
    pub ch4_gwp: f64, // CH4 → CO2e
    pub n2o_gwp: f64, // N2O → CO2e
}

impl EmissionFactors {
    pub fn for_mode(&self, mode: TransportMode) -> GasFactors {
        *self.factors.get(mode)
    }
}

impl Default for EmissionFactors {
    fn default() -> Self {
        Self {
            factors: ModeTable {
                air: GasFactors {
                    co2: 1.02,
                    ch4: 0.0001,
                    n2o: 0.00001,
                },
                ground: GasFactors {
                    co2: 0.089,
                    ch4: 0.0002,
                    n2o: 0.00002,
                },
                sea: GasFactors {
                    co2: 0.014,
                    ch4: 0.00005,
                    n2o: 0.000005,
                },
            },
            ch4_gwp: 25.0,
            n2o_gwp: 298.0,
        }
    }
}

// ==========================================
// WeatherModelConfig - 天气模型参数
// ==========================================

/// 分段阈值: 输入值严格大于 `above` 时取 `factor`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StepBand {
    pub above: f64,
    pub factor: f64,
}

impl StepBand {
    pub const fn new(above: f64, factor: f64) -> Self {
        Self { above, factor }
    }
}

/// 分段函数求值; bands 按阈值降序排列, 首个命中者生效, 均未命中返回 1.0
pub fn step_factor(bands: &[StepBand], value: f64) -> f64 {
    bands
        .iter()
        .find(|band| value > band.above)
        .map(|band| band.factor)
        .unwrap_or(1.0)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WeatherModelConfig {
    pub optimal_temp_min_c: f64,
    pub optimal_temp_max_c: f64,
    pub temperature_sensitivity: ModeTable<f64>, // 每偏离 1°C 的增量
    pub temperature_factor_min: f64,
    pub temperature_factor_max: f64,
    pub wind_bands: ModeTable<Vec<StepBand>>,          // km/h
    pub precipitation_bands: ModeTable<Vec<StepBand>>, // mm
    pub humidity_bands: Vec<StepBand>,                 // %, 与运输方式无关
}

impl Default for WeatherModelConfig {
    fn default() -> Self {
        Self {
            optimal_temp_min_c: 15.0,
            optimal_temp_max_c: 25.0,
            // 陆运最敏感, 空运最不敏感
            temperature_sensitivity: ModeTable {
                air: 0.01,
                ground: 0.03,
                sea: 0.02,
            },
            temperature_factor_min: 0.5,
            temperature_factor_max: 1.5,
            wind_bands: ModeTable {
                air: vec![StepBand::new(50.0, 1.15), StepBand::new(25.0, 1.08)],
                ground: vec![StepBand::new(40.0, 1.05)],
                sea: Vec::new(),
            },
            precipitation_bands: ModeTable {
                air: vec![StepBand::new(5.0, 1.05)],
                ground: vec![StepBand::new(10.0, 1.12), StepBand::new(5.0, 1.06)],
                sea: Vec::new(),
            },
            humidity_bands: vec![StepBand::new(80.0, 1.02), StepBand::new(60.0, 1.01)],
        }
    }
}

// ==========================================
// Scope3Config - 范围三估算系数
// ==========================================
// packaging   = weight_kg × resource_factor × packaging_share
// warehousing = weight_kg × resource_factor × warehousing_share
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Scope3Config {
    pub resource_factor: f64,
    pub packaging_share: f64,
    pub warehousing_share: f64,
}

impl Default for Scope3Config {
    fn default() -> Self {
        Self {
            resource_factor: 0.1,
            packaging_share: 0.4,
            warehousing_share: 0.2,
        }
    }
}

// ==========================================
// AnomalyConfig - 异常检测
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnomalyConfig {
    pub z_score_threshold: f64,
}

impl Default for AnomalyConfig {
    fn default() -> Self {
        Self {
            z_score_threshold: 3.0,
        }
    }
}

// ==========================================
// OperationalDefaults - 运营参数缺省值
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OperationalDefaults {
    pub load_factor: f64,
    pub fuel_efficiency: f64,
    pub include_scope_3: bool,
}

impl Default for OperationalDefaults {
    fn default() -> Self {
        Self {
            load_factor: 0.8,
            fuel_efficiency: 1.0,
            include_scope_3: true,
        }
    }
}

// ==========================================
// CarbonConfig - 配置根对象
// ==========================================
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CarbonConfig {
    pub emission_factors: EmissionFactors,
    pub weather: WeatherModelConfig,
    pub scope_3: Scope3Config,
    pub anomaly: AnomalyConfig,
    pub operational: OperationalDefaults,
}

impl CarbonConfig {
    /// 从 JSON 字符串加载 (未出现的字段取缺省值), 加载后立即校验
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: CarbonConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// 从 JSON 文件加载
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::FileReadError {
            path: path.display().to_string(),
            source,
        })?;
        let config = Self::from_json_str(&raw)?;
        tracing::info!(path = %path.display(), "已加载碳核算配置");
        Ok(config)
    }

    /// 应用进程环境变量覆写
    pub fn with_env_overrides(self) -> ConfigResult<Self> {
        self.with_overrides_from(|key| std::env::var(key).ok())
    }

    /// 应用覆写 (lookup 返回指定键的原始值)
    ///
    /// # 支持的键
    /// - `CARBON_ANOMALY_Z_THRESHOLD`: z-score 阈值 (> 0)
    /// - `CARBON_INCLUDE_SCOPE_3`: 是否计入范围三 (1/true/yes/y/on 为真)
    pub fn with_overrides_from<F>(mut self, lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(ENV_ANOMALY_Z_THRESHOLD) {
            let threshold =
                raw.trim()
                    .parse::<f64>()
                    .map_err(|_| ConfigError::EnvValueError {
                        key: ENV_ANOMALY_Z_THRESHOLD.to_string(),
                        value: raw.clone(),
                        message: "无法解析为浮点数".to_string(),
                    })?;
            self.anomaly.z_score_threshold = threshold;
        }

        if let Some(raw) = lookup(ENV_INCLUDE_SCOPE_3) {
            self.operational.include_scope_3 = is_true(&raw);
        }

        self.validate()?;
        Ok(self)
    }

    /// 配置校验
    pub fn validate(&self) -> ConfigResult<()> {
        // 排放因子
        for (mode, gas) in self.emission_factors.factors.entries() {
            check_non_negative(&format!("emission_factors.{}.co2", mode), gas.co2)?;
            check_non_negative(&format!("emission_factors.{}.ch4", mode), gas.ch4)?;
            check_non_negative(&format!("emission_factors.{}.n2o", mode), gas.n2o)?;
        }
        check_non_negative("emission_factors.ch4_gwp", self.emission_factors.ch4_gwp)?;
        check_non_negative("emission_factors.n2o_gwp", self.emission_factors.n2o_gwp)?;

        // 天气模型
        let weather = &self.weather;
        if !(weather.optimal_temp_min_c.is_finite()
            && weather.optimal_temp_max_c.is_finite()
            && weather.optimal_temp_min_c <= weather.optimal_temp_max_c)
        {
            return Err(ConfigError::invalid(
                "weather.optimal_temp",
                format!(
                    "最适温度区间非法: [{}, {}]",
                    weather.optimal_temp_min_c, weather.optimal_temp_max_c
                ),
            ));
        }
        for (mode, sensitivity) in weather.temperature_sensitivity.entries() {
            check_non_negative(&format!("weather.temperature_sensitivity.{}", mode), *sensitivity)?;
        }
        check_weather_factor("weather.temperature_factor_min", weather.temperature_factor_min)?;
        check_weather_factor("weather.temperature_factor_max", weather.temperature_factor_max)?;
        if weather.temperature_factor_min > weather.temperature_factor_max {
            return Err(ConfigError::invalid(
                "weather.temperature_factor",
                "钳制下限大于上限",
            ));
        }
        for (mode, bands) in weather.wind_bands.entries() {
            check_bands(&format!("weather.wind_bands.{}", mode), bands)?;
        }
        for (mode, bands) in weather.precipitation_bands.entries() {
            check_bands(&format!("weather.precipitation_bands.{}", mode), bands)?;
        }
        check_bands("weather.humidity_bands", &weather.humidity_bands)?;

        // 范围三
        check_non_negative("scope_3.resource_factor", self.scope_3.resource_factor)?;
        check_non_negative("scope_3.packaging_share", self.scope_3.packaging_share)?;
        check_non_negative("scope_3.warehousing_share", self.scope_3.warehousing_share)?;

        // 异常阈值
        let threshold = self.anomaly.z_score_threshold;
        if !(threshold.is_finite() && threshold > 0.0) {
            return Err(ConfigError::invalid(
                "anomaly.z_score_threshold",
                format!("阈值必须为正数: {}", threshold),
            ));
        }

        // 运营缺省值
        let load = self.operational.load_factor;
        if !(load > 0.0 && load <= 1.0) {
            return Err(ConfigError::invalid(
                "operational.load_factor",
                format!("装载率必须位于 (0, 1]: {}", load),
            ));
        }
        let fuel = self.operational.fuel_efficiency;
        if !(fuel.is_finite() && fuel > 0.0) {
            return Err(ConfigError::invalid(
                "operational.fuel_efficiency",
                format!("燃油效率系数必须为正数: {}", fuel),
            ));
        }

        Ok(())
    }
}

fn is_true(v: &str) -> bool {
    matches!(
        v.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "y" | "on"
    )
}

fn check_non_negative(key: &str, value: f64) -> ConfigResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(key, format!("必须为非负有限值: {}", value)))
    }
}

fn check_weather_factor(key: &str, value: f64) -> ConfigResult<()> {
    let (min, max) = WEATHER_FACTOR_BOUNDS;
    if value >= min && value <= max {
        Ok(())
    } else {
        Err(ConfigError::invalid(
            key,
            format!("天气系数 {} 超出范围 [{}, {}]", value, min, max),
        ))
    }
}

fn check_bands(key: &str, bands: &[StepBand]) -> ConfigResult<()> {
    for (idx, band) in bands.iter().enumerate() {
        if !band.above.is_finite() {
            return Err(ConfigError::invalid(
                key,
                format!("第 {} 段阈值非有限值", idx),
            ));
        }
        check_weather_factor(key, band.factor)?;
    }
    // 阈值严格降序, 保证"首个命中"即最严重的一档
    if bands.windows(2).any(|pair| pair[0].above <= pair[1].above) {
        return Err(ConfigError::invalid(key, "分段阈值必须严格降序"));
    }
    Ok(())
}
