// ==========================================
// 供应链碳排放核算 - 运单记录与数据质量对象
// ==========================================
// 职责: 筛查器输入 (ShipmentRecord) 与输出 (Issue/Anomaly/QualityReport)
// 说明: co2_kg 可能尚未由排放引擎回填, 筛查器必须两种情况都能处理
// ==========================================

use crate::domain::types::IssueRule;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ==========================================
// ShipmentRecord - 运单记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShipmentRecord {
    pub shipment_id: String,

    // 坐标 (允许缺失, 由校验规则报告)
    pub origin_lat: Option<f64>,
    pub origin_lng: Option<f64>,
    pub destination_lat: Option<f64>,
    pub destination_lng: Option<f64>,

    // 运输信息 (运输方式保持外部原始字符串, 进入引擎前再校验)
    pub transport_mode: String,
    pub weight_kg: f64,
    pub distance_km: f64,

    // 时间
    pub departure_time: NaiveDateTime,
    pub arrival_time: NaiveDateTime,
    pub created_at: NaiveDateTime,

    // 关联
    #[serde(default)]
    pub supplier_id: Option<String>,
    #[serde(default)]
    pub carrier_id: Option<String>,

    // 排放 (由引擎回填)
    #[serde(default)]
    pub co2_kg: Option<f64>,
    #[serde(default)]
    pub ch4_kg: Option<f64>,
    #[serde(default)]
    pub n2o_kg: Option<f64>,
    #[serde(default)]
    pub co2_equivalent_kg: Option<f64>,
}

impl ShipmentRecord {
    pub fn has_origin(&self) -> bool {
        self.origin_lat.is_some() && self.origin_lng.is_some()
    }

    pub fn has_destination(&self) -> bool {
        self.destination_lat.is_some() && self.destination_lng.is_some()
    }

    /// 可参与异常检测的 CO2 值 (缺失或非有限值视为不可用)
    pub fn usable_co2_kg(&self) -> Option<f64> {
        self.co2_kg.filter(|v| v.is_finite())
    }
}

// ==========================================
// Issue - 数据质量问题
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    pub shipment_id: String,
    pub rule: IssueRule,
    pub issue: String, // 规则描述文本
}

impl Issue {
    pub fn new(shipment_id: &str, rule: IssueRule) -> Self {
        Self {
            shipment_id: shipment_id.to_string(),
            rule,
            issue: rule.description().to_string(),
        }
    }
}

// ==========================================
// Anomaly - 排放异常
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Anomaly {
    pub shipment_id: String,
    pub z_score: f64,
    pub co2_kg: f64,
}

// ==========================================
// QualityReport - 数据质量报告
// ==========================================
// 纯快照, 核心层不负责持久化
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QualityReport {
    pub total_issues: usize,
    pub total_anomalies: usize,
    pub affected_shipments: usize,               // 至少命中一项问题或异常的运单数
    pub issues_by_rule: BTreeMap<IssueRule, usize>, // 按规则计数
    pub issues: Vec<Issue>,
    pub anomalies: Vec<Anomaly>,
}

impl QualityReport {
    pub fn is_clean(&self) -> bool {
        self.total_issues == 0 && self.total_anomalies == 0
    }
}

// ==========================================
// SupplierEmissions - 供应商维度汇总
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SupplierEmissions {
    pub supplier_id: String,
    pub total_co2_kg: f64,
    pub total_shipments: usize,
}
