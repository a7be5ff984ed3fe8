// ==========================================
// 产线产能负荷系统 - 工单风险分级引擎
// ==========================================
// 职责: 单工单风险分级 (纯决策表, 不依赖产能数据)
// 输入: WorkOrder + 当前日期
// 输出: RiskClassification
// ==========================================
// 规则顺序 (首个命中生效):
// 1. HOLD        -> CRITICAL / HOLD
// 2. 生产交期已过 -> CRITICAL / OVERDUE (延期天数 = today - due)
// 3. NPI         -> RISK / NPI
// 4. 工程暂停     -> RISK / ENGINEERING
// 5. 其余         -> SAFE
// ==========================================

use crate::domain::risk::RiskClassification;
use crate::domain::types::{ConstraintType, OrderRiskLevel, WorkOrderStatus};
use crate::domain::work_order::WorkOrder;
use chrono::NaiveDate;
use tracing::debug;

// ==========================================
// WorkOrderRiskClassifier - 工单风险分级引擎
// ==========================================
pub struct WorkOrderRiskClassifier {
    // 无状态引擎,不需要注入依赖
}

impl WorkOrderRiskClassifier {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    /// 工单风险分级
    ///
    /// 未设置 production_due_date 的工单跳过逾期规则
    pub fn classify(&self, work_order: &WorkOrder, today: NaiveDate) -> RiskClassification {
        let result = Self::decide(work_order, today);
        debug!(
            work_order_no = %work_order.work_order_no,
            risk_level = %result.overall_risk_level,
            delay_days = result.overall_delay_days,
            "工单风险分级完成"
        );
        result
    }

    /// 批量分级 (保持输入顺序)
    pub fn classify_all<'a>(
        &self,
        work_orders: &'a [WorkOrder],
        today: NaiveDate,
    ) -> Vec<(&'a WorkOrder, RiskClassification)> {
        work_orders
            .iter()
            .map(|wo| (wo, self.classify(wo, today)))
            .collect()
    }

    fn decide(work_order: &WorkOrder, today: NaiveDate) -> RiskClassification {
        if work_order.status == WorkOrderStatus::Hold {
            return RiskClassification::flagged(OrderRiskLevel::Critical, ConstraintType::Hold);
        }

        if let Some(due) = work_order.production_due_date {
            if due < today {
                return RiskClassification {
                    overall_risk_level: OrderRiskLevel::Critical,
                    primary_constraint_type: Some(ConstraintType::Overdue),
                    overall_delay_days: (today - due).num_days(),
                };
            }
        }

        if work_order.is_npi {
            return RiskClassification::flagged(OrderRiskLevel::Risk, ConstraintType::Npi);
        }

        if work_order.engineering_hold {
            return RiskClassification::flagged(OrderRiskLevel::Risk, ConstraintType::Engineering);
        }

        RiskClassification::safe()
    }
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for WorkOrderRiskClassifier {
    fn default() -> Self {
        Self::new()
    }
}
