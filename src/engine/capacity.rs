// ==========================================
// 产线产能负荷系统 - 产线产能计算引擎
// ==========================================
// 职责: 单产线预测窗口内的产能/利用率/风险汇总
// 输入: 产线 + 该产线工单 + 该产线未关闭事件 (+ 全厂名册, 用于自动平衡)
// 输出: CapacitySummary
// ==========================================
// 红线: 日产能校验必须先于任何除法
// 红线: 风险阈值为固定策略常量, 不可配置
// ==========================================

use crate::domain::capacity::{round2, CapacitySummary, RecommendedAction};
use crate::domain::event::ProductionEvent;
use crate::domain::line::ProductionLine;
use crate::domain::types::CapacityRiskLevel;
use crate::domain::work_order::WorkOrder;
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::rebalance::RebalanceAdvisor;
use tracing::{debug, info, instrument, warn};

/// 默认预测窗口（天）
pub const DEFAULT_FORECAST_DAYS: u32 = 5;

/// 利用率 >= 0.9 -> CRITICAL
pub const CRITICAL_UTILIZATION: f64 = 0.9;

/// 利用率 >= 0.7 -> WARNING
pub const WARNING_UTILIZATION: f64 = 0.7;

// ==========================================
// PlantRoster - 全厂名册 (自动平衡候选)
// ==========================================
#[derive(Debug, Clone, Copy)]
pub struct PlantRoster<'a> {
    pub lines: &'a [ProductionLine],
    pub work_orders: &'a [WorkOrder],
}

impl<'a> PlantRoster<'a> {
    pub fn new(lines: &'a [ProductionLine], work_orders: &'a [WorkOrder]) -> Self {
        Self { lines, work_orders }
    }
}

/// 风险判定结果 (未取整)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskAssessment {
    pub risk_level: CapacityRiskLevel,
    pub overload_gap_hours: f64,
    pub escalation_required: bool,
    pub suggested_overtime_hours_per_day: u32,
    pub action: RecommendedAction,
}

/// 校验并返回日产能
///
/// # 返回
/// - Ok(daily_capacity): 日产能 > 0
/// - Err(InvalidDailyCapacity): 日产能 <= 0 或非有限值
pub fn validated_daily_capacity(line: &ProductionLine) -> EngineResult<f64> {
    let daily_capacity = line.daily_capacity_hours();
    // NaN 也视为配置错误
    if !(daily_capacity > 0.0) || !daily_capacity.is_finite() {
        warn!(
            line_id = line.id,
            daily_capacity,
            "日产能配置无效"
        );
        return Err(EngineError::InvalidDailyCapacity {
            line_id: line.id,
            daily_capacity,
        });
    }
    Ok(daily_capacity)
}

/// 风险等级判定（首个命中规则生效）
///
/// 规则顺序:
/// 1) open_hours > net_available_hours -> OVERLOAD
/// 2) utilization >= 0.9 -> CRITICAL
/// 3) utilization >= 0.7 -> WARNING
/// 4) 其余 -> SAFE
pub fn assess_risk(
    open_hours: f64,
    net_available_hours: f64,
    utilization: f64,
    forecast_days: u32,
) -> RiskAssessment {
    if open_hours > net_available_hours {
        let overload_gap_hours = open_hours - net_available_hours;
        let overtime = (overload_gap_hours / forecast_days as f64).ceil() as u32;
        return RiskAssessment {
            risk_level: CapacityRiskLevel::Overload,
            overload_gap_hours,
            escalation_required: true,
            suggested_overtime_hours_per_day: overtime,
            action: RecommendedAction::AddOvertime {
                hours_per_day: overtime,
                forecast_days,
            },
        };
    }

    let (risk_level, action) = if utilization >= CRITICAL_UTILIZATION {
        (CapacityRiskLevel::Critical, RecommendedAction::PrepareOvertime)
    } else if utilization >= WARNING_UTILIZATION {
        (CapacityRiskLevel::Warning, RecommendedAction::MonitorClosely)
    } else {
        (CapacityRiskLevel::Safe, RecommendedAction::CapacityHealthy)
    };

    RiskAssessment {
        risk_level,
        overload_gap_hours: 0.0,
        escalation_required: false,
        suggested_overtime_hours_per_day: 0,
        action,
    }
}

// ==========================================
// LineCapacityCalculator - 产线产能计算引擎
// ==========================================
pub struct LineCapacityCalculator {
    advisor: RebalanceAdvisor,
}

impl LineCapacityCalculator {
    /// 构造函数
    pub fn new() -> Self {
        Self {
            advisor: RebalanceAdvisor::new(),
        }
    }

    // ==========================================
    // 核心方法
    // ==========================================

    /// 计算产线产能汇总
    ///
    /// # 参数
    /// - `line`: 产线
    /// - `work_orders`: 该产线全部工单
    /// - `events`: 该产线事件 (仅未关闭事件计入)
    /// - `roster`: 全厂名册; None 时不做自动平衡
    /// - `forecast_days`: 预测窗口 (>= 1)
    ///
    /// # 返回
    /// - Ok(CapacitySummary)
    /// - Err(InvalidDailyCapacity / InvalidForecastDays)
    #[instrument(skip(self, line, work_orders, events, roster), fields(
        line_id = line.id,
        work_orders_count = work_orders.len(),
        events_count = events.len()
    ))]
    pub fn calculate(
        &self,
        line: &ProductionLine,
        work_orders: &[WorkOrder],
        events: &[ProductionEvent],
        roster: Option<PlantRoster<'_>>,
        forecast_days: u32,
    ) -> EngineResult<CapacitySummary> {
        // 1. 日产能校验
        let daily_capacity = validated_daily_capacity(line)?;
        if forecast_days == 0 {
            return Err(EngineError::InvalidForecastDays(forecast_days));
        }

        // 2. 开放/阻塞工时 (二者互斥)
        let open_orders: Vec<&WorkOrder> = work_orders.iter().filter(|wo| wo.is_open()).collect();
        let open_hours: f64 = open_orders.iter().map(|wo| wo.remaining_hours).sum();
        let blocked_hours: f64 = work_orders
            .iter()
            .filter(|wo| wo.is_blocked())
            .map(|wo| wo.remaining_hours)
            .sum();

        // 3. 事件损失
        let event_impact_hours: f64 = events
            .iter()
            .filter(|e| e.affects_line(line.id))
            .map(|e| e.impact_hours)
            .sum();

        // 4. 可用工时
        let available_hours = daily_capacity * forecast_days as f64;
        let net_available_hours = (available_hours - event_impact_hours).max(0.0);

        // 5. 利用率
        let utilization = if net_available_hours > 0.0 {
            open_hours / net_available_hours
        } else {
            0.0
        };

        debug!(
            open_hours,
            blocked_hours,
            event_impact_hours,
            net_available_hours,
            utilization,
            "产能指标计算完成"
        );

        // 6. 风险判定
        let assessment = assess_risk(open_hours, net_available_hours, utilization, forecast_days);

        // 7. 超负荷时尝试自动平衡
        let auto_rebalance = match (assessment.risk_level, roster) {
            (CapacityRiskLevel::Overload, Some(roster)) => self.advisor.suggest(
                line,
                assessment.overload_gap_hours,
                &open_orders,
                roster,
                forecast_days,
            ),
            _ => None,
        };

        info!(
            risk_level = %assessment.risk_level,
            utilization = round2(utilization),
            overload_gap_hours = round2(assessment.overload_gap_hours),
            rebalance_line_id = auto_rebalance.as_ref().map(|r| r.suggested_line_id),
            "产线产能计算完成"
        );

        // 8. 输出取整
        Ok(CapacitySummary {
            line_id: line.id,
            daily_capacity_hours: round2(daily_capacity),
            forecast_days,
            available_hours: round2(available_hours),
            event_impact_hours: round2(event_impact_hours),
            net_available_hours: round2(net_available_hours),
            open_hours: round2(open_hours),
            blocked_hours: round2(blocked_hours),
            current_utilization: round2(utilization),
            risk_level: assessment.risk_level,
            risk_label: assessment.risk_level.label().to_string(),
            overload_gap_hours: round2(assessment.overload_gap_hours),
            escalation_required: assessment.escalation_required,
            suggested_overtime_hours_per_day: assessment.suggested_overtime_hours_per_day,
            recommended_action: assessment.action.to_string(),
            action: assessment.action,
            auto_rebalance,
        })
    }
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for LineCapacityCalculator {
    fn default() -> Self {
        Self::new()
    }
}

// ==========================================
// 单元测试
// ==========================================
#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::types::{Priority, WorkOrderStatus};
    use chrono::NaiveDate;

    fn line(id: i64, hours: f64, efficiency: f64) -> ProductionLine {
        ProductionLine::new(id, &format!("L{}", id), hours, efficiency).unwrap()
    }

    fn order(no: &str, line_id: i64, hours: f64, ready: bool, status: WorkOrderStatus) -> WorkOrder {
        WorkOrder {
            id: 0,
            work_order_no: no.to_string(),
            production_line_id: line_id,
            planned_hours: hours,
            actual_hours: 0.0,
            remaining_hours: hours,
            priority: Priority::Normal,
            promise_date: NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
            production_due_date: None,
            status,
            is_material_ready: ready,
            material_ready_date: None,
            is_npi: false,
            engineering_hold: false,
            started_at: None,
            completed_at: None,
        }
    }

    fn event(line_id: i64, impact: f64, resolved: bool) -> ProductionEvent {
        ProductionEvent {
            id: 1,
            production_line_id: line_id,
            event_type: "DOWN".to_string(),
            impact_hours: impact,
            description: None,
            event_date: NaiveDate::from_ymd_opt(2026, 2, 1).unwrap(),
            is_resolved: resolved,
            resolved_at: None,
        }
    }

    #[test]
    fn test_assess_risk_bands() {
        assert_eq!(assess_risk(10.0, 40.0, 0.25, 5).risk_level, CapacityRiskLevel::Safe);
        assert_eq!(assess_risk(28.0, 40.0, 0.7, 5).risk_level, CapacityRiskLevel::Warning);
        assert_eq!(assess_risk(36.0, 40.0, 0.9, 5).risk_level, CapacityRiskLevel::Critical);
        assert_eq!(assess_risk(40.0, 40.0, 1.0, 5).risk_level, CapacityRiskLevel::Critical);
    }

    #[test]
    fn test_assess_risk_overload_ignores_utilization() {
        // 净可用为 0 时利用率为 0, 但仍判定 OVERLOAD
        let a = assess_risk(3.0, 0.0, 0.0, 5);
        assert_eq!(a.risk_level, CapacityRiskLevel::Overload);
        assert_eq!(a.overload_gap_hours, 3.0);
        assert_eq!(a.suggested_overtime_hours_per_day, 1);
        assert!(a.escalation_required);
    }

    #[test]
    fn test_events_reduce_net_available() {
        let calc = LineCapacityCalculator::new();
        let l = line(1, 8.0, 1.0);
        let orders = vec![order("A", 1, 20.0, true, WorkOrderStatus::Open)];
        let events = vec![event(1, 15.0, false), event(1, 100.0, true), event(2, 7.0, false)];

        let s = calc.calculate(&l, &orders, &events, None, 5).unwrap();
        assert_eq!(s.event_impact_hours, 15.0);
        assert_eq!(s.net_available_hours, 25.0);
        assert_eq!(s.current_utilization, 0.8);
        assert_eq!(s.risk_level, CapacityRiskLevel::Warning);
    }

    #[test]
    fn test_net_available_floored_at_zero() {
        let calc = LineCapacityCalculator::new();
        let l = line(1, 8.0, 1.0);
        let events = vec![event(1, 100.0, false)];

        let s = calc.calculate(&l, &[], &events, None, 5).unwrap();
        assert_eq!(s.net_available_hours, 0.0);
        assert_eq!(s.current_utilization, 0.0);
        assert_eq!(s.risk_level, CapacityRiskLevel::Safe);
    }

    #[test]
    fn test_blocked_and_done_excluded_from_utilization() {
        let calc = LineCapacityCalculator::new();
        let l = line(1, 8.0, 1.0);
        let orders = vec![
            order("A", 1, 10.0, true, WorkOrderStatus::Running),
            order("B", 1, 6.0, false, WorkOrderStatus::BlockedMaterial),
            order("C", 1, 99.0, true, WorkOrderStatus::Done),
        ];

        let s = calc.calculate(&l, &orders, &[], None, 5).unwrap();
        assert_eq!(s.open_hours, 10.0);
        assert_eq!(s.blocked_hours, 6.0);
        assert_eq!(s.current_utilization, 0.25);
    }

    #[test]
    fn test_invalid_capacity_checked_first() {
        let calc = LineCapacityCalculator::new();
        let l = line(1, 8.0, 0.0);
        let err = calc.calculate(&l, &[], &[], None, 0).unwrap_err();
        assert!(matches!(err, EngineError::InvalidDailyCapacity { line_id: 1, .. }));
        assert_eq!(err.to_string(), "Invalid daily capacity configuration");
    }

    #[test]
    fn test_zero_forecast_days_rejected() {
        let calc = LineCapacityCalculator::new();
        let l = line(1, 8.0, 1.0);
        let err = calc.calculate(&l, &[], &[], None, 0).unwrap_err();
        assert_eq!(err, EngineError::InvalidForecastDays(0));
    }

    #[test]
    fn test_efficiency_applied_and_rounded() {
        let calc = LineCapacityCalculator::new();
        let l = line(1, 7.5, 0.85);
        let orders = vec![order("A", 1, 10.0, true, WorkOrderStatus::Open)];

        let s = calc.calculate(&l, &orders, &[], None, 3).unwrap();
        assert_eq!(s.daily_capacity_hours, 6.38); // 6.375
        assert_eq!(s.available_hours, 19.13); // 19.125
        assert_eq!(s.current_utilization, 0.52);
    }
}
