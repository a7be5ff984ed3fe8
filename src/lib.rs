// ==========================================
// 产线产能负荷系统 - 核心库
// ==========================================
// 职责: 产能风险评估 / 自动平衡建议 / 工单排程模拟 / 工单风险分级
// 系统定位: 决策支持 (只读快照, 建议由人工确认)
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "en");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 业务规则
pub mod engine;

// 配置层 - 系统配置
pub mod config;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// API 层 - 业务接口
pub mod api;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{
    CapacityRiskLevel, ConstraintType, OrderRiskLevel, Priority, WorkOrderStatus,
};

// 领域实体
pub use domain::{
    CapacitySummary, DomainError, PlantSnapshot, ProductionEvent, ProductionLine, ProductionLog,
    RebalanceSuggestion, RecommendedAction, RiskClassification, SimulationEntry, WorkOrder,
};

// 引擎
pub use engine::{
    EngineError, LineCapacityCalculator, LineOrderSimulator, PlantCapacityService,
    RebalanceAdvisor, WorkOrderLifecycle, WorkOrderRiskClassifier,
};

// API
pub use api::{ApiError, LineApi};

// 配置
pub use config::AppConfig;

// ==========================================
// 版本信息
// ==========================================
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const APP_NAME: &str = "产线产能负荷系统";
