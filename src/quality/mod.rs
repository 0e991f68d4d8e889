// ==========================================
// 供应链碳排放核算 - 数据质量与异常筛查层
// ==========================================
// 职责: 运单结构校验 + CO2 z-score 异常 + 报告汇总
// 原则: 校验与检测从不中断, 所有问题都以数据条目返回
// ==========================================

pub mod anomaly;
pub mod dq_validator;
pub mod report;

pub use anomaly::population_stats;
pub use dq_validator::DataQualityScreener;
