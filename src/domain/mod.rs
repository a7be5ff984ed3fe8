// ==========================================
// 产线产能负荷系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型、工厂校验
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod capacity;
pub mod error;
pub mod event;
pub mod line;
pub mod risk;
pub mod simulation;
pub mod snapshot;
pub mod types;
pub mod work_order;

// 重导出核心类型
pub use capacity::{round2, CapacitySummary, RebalanceSuggestion, RecommendedAction};
pub use error::{DomainError, DomainResult};
pub use event::{ProductionEvent, ProductionEventDraft};
pub use line::ProductionLine;
pub use risk::RiskClassification;
pub use simulation::SimulationEntry;
pub use snapshot::{LineScope, PlantSnapshot};
pub use types::{CapacityRiskLevel, ConstraintType, OrderRiskLevel, Priority, WorkOrderStatus};
pub use work_order::{ProductionLog, WorkOrder, WorkOrderDraft};
