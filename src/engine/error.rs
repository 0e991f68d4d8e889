// ==========================================
// 供应链碳排放核算 - 引擎错误类型
// ==========================================
// 工具: thiserror 派生宏
// InvalidInput: 上游契约违规, 必须上抛, 不做静默修正
// ComputationFailure: 可选增强项计算失败, 本地以中性值恢复并记录日志
// ==========================================

use thiserror::Error;

/// 引擎错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    #[error("输入参数无效 (字段 {field}): {message}")]
    InvalidInput { field: String, message: String },

    #[error("计算失败: {0}")]
    ComputationFailure(String),
}

impl EngineError {
    pub fn invalid_input(field: &str, message: impl Into<String>) -> Self {
        EngineError::InvalidInput {
            field: field.to_string(),
            message: message.into(),
        }
    }

    pub fn is_invalid_input(&self) -> bool {
        matches!(self, EngineError::InvalidInput { .. })
    }

    pub fn is_computation_failure(&self) -> bool {
        matches!(self, EngineError::ComputationFailure(_))
    }
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
