// ==========================================
// 产线产能负荷系统 - 引擎层
// ==========================================
// 职责: 实现业务规则引擎, 纯计算, 无 I/O
// 红线: 引擎只读快照, 不修改入参
// ==========================================

pub mod capacity;
pub mod error;
pub mod lifecycle;
pub mod plant;
pub mod rebalance;
pub mod risk;
pub mod simulation;

// 重导出核心引擎
pub use capacity::{
    assess_risk, validated_daily_capacity, LineCapacityCalculator, PlantRoster, RiskAssessment,
    CRITICAL_UTILIZATION, DEFAULT_FORECAST_DAYS, WARNING_UTILIZATION,
};
pub use error::{EngineError, EngineResult};
pub use lifecycle::{LogOutcome, WorkOrderLifecycle};
pub use plant::{LineCapacityOutcome, PlantCapacityReport, PlantCapacityService};
pub use rebalance::{LineSpare, RebalanceAdvisor};
pub use risk::WorkOrderRiskClassifier;
pub use simulation::{compute_delay, LineOrderSimulator};
