// ==========================================
// 供应链碳排放核算 - 领域层
// ==========================================
// 职责: 领域实体与类型定义 (无业务逻辑)
// ==========================================

pub mod emission;
pub mod shipment;
pub mod types;

// 重导出核心类型
pub use emission::{
    EmissionResult, ShipmentFailure, ShipmentInput, SupplyChainEmissions, WeatherImpact,
};
pub use shipment::{Anomaly, Issue, QualityReport, ShipmentRecord, SupplierEmissions};
pub use types::{IssueRule, TransportMode};
