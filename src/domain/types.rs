// ==========================================
// 供应链碳排放核算 - 领域类型定义
// ==========================================
// 运输方式: 封闭枚举, 所有分派走穷尽 match
// 数据质量规则: 封闭枚举, 描述文本为对外契约
// ==========================================

use crate::engine::error::EngineError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ==========================================
// 运输方式 (Transport Mode)
// ==========================================
// 序列化格式: lowercase (与上游数据一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    Air,    // 空运
    Ground, // 陆运
    Sea,    // 海运
}

impl TransportMode {
    pub const ALL: [TransportMode; 3] = [TransportMode::Air, TransportMode::Ground, TransportMode::Sea];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransportMode::Air => "air",
            TransportMode::Ground => "ground",
            TransportMode::Sea => "sea",
        }
    }
}

impl fmt::Display for TransportMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 边界校验: 外部传入的运输方式字符串
///
/// 忽略首尾空白与大小写; 其余取值一律 InvalidInput
impl FromStr for TransportMode {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "air" => Ok(TransportMode::Air),
            "ground" => Ok(TransportMode::Ground),
            "sea" => Ok(TransportMode::Sea),
            other => Err(EngineError::InvalidInput {
                field: "transport_mode".to_string(),
                message: format!("运输方式必须为 air/ground/sea, 实际: {:?}", other),
            }),
        }
    }
}

// ==========================================
// 数据质量规则 (Issue Rule)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum IssueRule {
    MissingOrigin,        // 起点坐标缺失
    MissingDestination,   // 终点坐标缺失
    NonPositiveWeight,    // 重量 <= 0
    NonPositiveDistance,  // 距离 <= 0
    DepartureAfterArrival, // 出发晚于到达
    DepartureInFuture,    // 出发晚于录入时间
}

impl IssueRule {
    /// 对外描述文本 (下游按字符串匹配, 不可随意修改)
    pub fn description(&self) -> &'static str {
        match self {
            IssueRule::MissingOrigin => "Missing origin coordinates",
            IssueRule::MissingDestination => "Missing destination coordinates",
            IssueRule::NonPositiveWeight => "Non-positive weight",
            IssueRule::NonPositiveDistance => "Non-positive distance",
            IssueRule::DepartureAfterArrival => "Departure after arrival",
            IssueRule::DepartureInFuture => "Departure in the future",
        }
    }
}

impl fmt::Display for IssueRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.description())
    }
}
