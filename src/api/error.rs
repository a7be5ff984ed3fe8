// ==========================================
// 产线产能负荷系统 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型, 转换引擎/领域错误为调用方可读的错误消息
// 输出: 对外统一序列化为 {"error": "..."}
// ==========================================

use crate::domain::error::DomainError;
use crate::engine::error::EngineError;
use crate::i18n;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// 可查询的资源类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Entity {
    ProductionLine,
    WorkOrder,
}

impl Entity {
    fn not_found_key(&self) -> &'static str {
        match self {
            Entity::ProductionLine => "error.line_not_found",
            Entity::WorkOrder => "error.work_order_not_found",
        }
    }
}

impl fmt::Display for Entity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entity::ProductionLine => write!(f, "ProductionLine"),
            Entity::WorkOrder => write!(f, "WorkOrder"),
        }
    }
}

/// API层错误类型
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 业务规则错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("资源未找到: {entity}(id={id})")]
    NotFound { entity: Entity, id: String },

    /// 引擎错误原样透出 (例如 "Invalid daily capacity configuration")
    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl ApiError {
    pub fn not_found(entity: Entity, id: impl ToString) -> Self {
        ApiError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// 按语言渲染错误消息
    ///
    /// NotFound 走 `error.*` 翻译键; 其余错误使用 Display 文案
    pub fn localized_message(&self, locale: &str) -> String {
        match self {
            ApiError::NotFound { entity, id } => {
                i18n::t_in(locale, entity.not_found_key(), &[("id", id.as_str())])
            }
            other => other.to_string(),
        }
    }
}

/// 快照边界校验失败 -> 引擎领域错误
impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        ApiError::Engine(EngineError::Domain(err))
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

// ==========================================
// ErrorBody - 对外错误结构
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn localized(err: &ApiError, locale: &str) -> Self {
        Self {
            error: err.localized_message(locale),
        }
    }
}

impl From<&ApiError> for ErrorBody {
    fn from(err: &ApiError) -> Self {
        Self {
            error: err.to_string(),
        }
    }
}
