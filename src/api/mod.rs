// ==========================================
// 产线产能负荷系统 - API 层
// ==========================================
// 职责: 提供业务 API 接口, 供 CLI 调用
// ==========================================

pub mod error;
pub mod line_api;

// 重导出核心类型
pub use error::{ApiError, ApiResult, Entity, ErrorBody};
pub use line_api::{LineApi, WorkOrderRiskView};
