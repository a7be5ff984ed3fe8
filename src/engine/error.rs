// ==========================================
// 产线产能负荷系统 - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// 说明: 配置错误以结构化错误值返回, 由调用方决定如何展示
// ==========================================

use crate::domain::error::DomainError;
use thiserror::Error;

/// 引擎层错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// 日产能 <= 0 (working_hours_per_day 或 efficiency_rate 配置错误)
    ///
    /// 不重试: 属于数据问题, 不是瞬时故障
    #[error("Invalid daily capacity configuration")]
    InvalidDailyCapacity { line_id: i64, daily_capacity: f64 },

    #[error("Invalid forecast days: {0} (must be >= 1)")]
    InvalidForecastDays(u32),

    /// 累计工时过大, 预测完工日期超出日期可表示范围
    #[error("Projected finish date out of range for work order {work_order_no}")]
    ProjectionOutOfRange { work_order_no: String },

    #[error(transparent)]
    Domain(#[from] DomainError),
}

/// 引擎层 Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
