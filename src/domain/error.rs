// ==========================================
// 产线产能负荷系统 - 领域层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 用途: 实体工厂校验 / 状态转换校验
// ==========================================

use thiserror::Error;

/// 领域层错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum DomainError {
    // ===== 字段校验 =====
    #[error("字段值错误 (field={field}): {message}")]
    FieldValueError { field: String, message: String },

    // ===== 状态转换 =====
    #[error("无效的状态转换: from={from} to={to}")]
    InvalidStateTransition { from: String, to: String },

    #[error("产线不匹配: work_order_line={work_order_line}, log_line={log_line}")]
    LineMismatch { work_order_line: i64, log_line: i64 },

    #[error("事件已关闭: event_id={0}")]
    AlreadyResolved(i64),
}

impl DomainError {
    /// 构造字段校验错误
    pub fn field(field: &str, message: impl Into<String>) -> Self {
        DomainError::FieldValueError {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// 为字段错误加上记录定位前缀 (如 `work_orders[WO-1].remaining_hours`)
    pub fn within(self, scope: &str) -> Self {
        match self {
            DomainError::FieldValueError { field, message } => DomainError::FieldValueError {
                field: format!("{}.{}", scope, field),
                message,
            },
            other => other,
        }
    }
}

/// 领域层 Result 类型别名
pub type DomainResult<T> = Result<T, DomainError>;
