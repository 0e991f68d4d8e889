// ==========================================
// 供应链碳排放核算 - 核心库
// ==========================================
// 职责: 运输排放核算 + 供应链汇总 + 数据质量与异常筛查
// 系统定位: 纯计算库 (无网络、无持久化、无调度), 由调用方同步调用
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 配置层 - 策略常量
pub mod config;

// 引擎层 - 排放计算
pub mod engine;

// 筛查层 - 数据质量与异常
pub mod quality;

// 导入层 - 外部运单文件
pub mod importer;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::{
    Anomaly, EmissionResult, Issue, IssueRule, QualityReport, ShipmentFailure, ShipmentInput,
    ShipmentRecord, SupplierEmissions, SupplyChainEmissions, TransportMode, WeatherImpact,
};

// 配置
pub use config::{CarbonConfig, ConfigError};

// 引擎
pub use engine::{
    BatchOutcome, CarbonOrchestrator, EmissionsEngine, EngineError, EngineResult,
    TransformationPipeline, WeatherAssessment, WeatherModel, ROUNDING_DECIMALS,
};

// 筛查器
pub use quality::DataQualityScreener;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "供应链碳排放核算";
