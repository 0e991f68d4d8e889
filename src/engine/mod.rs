// ==========================================
// 供应链碳排放核算 - 引擎层
// ==========================================
// 职责: 排放因子物理计算, 天气/运营修正, GWP 折算, 范围三估算
// 红线: 纯计算, 无 I/O, 无跨调用可变状态
// ==========================================

pub mod emissions;
pub mod error;
pub mod orchestrator;
pub mod transformation;
pub mod weather;

// 重导出核心引擎
pub use emissions::{round_to, EmissionsEngine, ROUNDING_DECIMALS};
pub use error::{EngineError, EngineResult};
pub use orchestrator::{BatchOutcome, CarbonOrchestrator};
pub use transformation::{
    aggregate_by_supplier, carbon_intensity_per_km, record_to_input, EnrichmentOutcome,
    TransformationPipeline,
};
pub use weather::{WeatherAssessment, WeatherModel};
