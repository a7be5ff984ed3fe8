// ==========================================
// 产线产能负荷系统 - 工单风险分级领域模型
// ==========================================

use crate::domain::types::{ConstraintType, OrderRiskLevel};
use serde::{Deserialize, Serialize};

// ==========================================
// RiskClassification - 工单风险分级结果
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RiskClassification {
    pub overall_risk_level: OrderRiskLevel,
    pub primary_constraint_type: Option<ConstraintType>, // SAFE 时为 null
    pub overall_delay_days: i64,
}

impl RiskClassification {
    /// 无延期天数的分级结果
    pub fn flagged(level: OrderRiskLevel, constraint: ConstraintType) -> Self {
        Self {
            overall_risk_level: level,
            primary_constraint_type: Some(constraint),
            overall_delay_days: 0,
        }
    }

    /// 安全
    pub fn safe() -> Self {
        Self {
            overall_risk_level: OrderRiskLevel::Safe,
            primary_constraint_type: None,
            overall_delay_days: 0,
        }
    }

    /// 是否需要关注 (非 SAFE)
    pub fn needs_attention(&self) -> bool {
        self.overall_risk_level != OrderRiskLevel::Safe
    }
}
