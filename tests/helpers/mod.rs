// ==========================================
// 集成测试公共辅助
// ==========================================

#![allow(dead_code)]

pub mod shipment_builder;
