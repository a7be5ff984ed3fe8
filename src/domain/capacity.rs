// ==========================================
// 产线产能负荷系统 - 产能汇总领域模型
// ==========================================
// 用途: 产能计算输出（不落库）
// 所有工时字段为展示值, 已四舍五入到 2 位小数
// ==========================================

use crate::domain::types::CapacityRiskLevel;
use serde::{Deserialize, Serialize};
use std::fmt;

/// 四舍五入到 2 位小数（仅用于展示输出）
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

// ==========================================
// RecommendedAction - 建议动作
// ==========================================
// Display 输出英文标准文案; 其他语言见 i18n::render_action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecommendedAction {
    AddOvertime {
        hours_per_day: u32,
        forecast_days: u32,
    },
    PrepareOvertime,
    MonitorClosely,
    #[default]
    CapacityHealthy,
}

impl RecommendedAction {
    /// 多语言资源键
    pub fn i18n_key(&self) -> &'static str {
        match self {
            RecommendedAction::AddOvertime { .. } => "capacity.action.add_overtime",
            RecommendedAction::PrepareOvertime => "capacity.action.prepare_overtime",
            RecommendedAction::MonitorClosely => "capacity.action.monitor_closely",
            RecommendedAction::CapacityHealthy => "capacity.action.capacity_healthy",
        }
    }
}

impl fmt::Display for RecommendedAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecommendedAction::AddOvertime {
                hours_per_day,
                forecast_days,
            } => write!(
                f,
                "Add {} overtime hours per day for next {} days",
                hours_per_day, forecast_days
            ),
            RecommendedAction::PrepareOvertime => write!(f, "Prepare overtime or redistribute load"),
            RecommendedAction::MonitorClosely => write!(f, "Monitor closely"),
            RecommendedAction::CapacityHealthy => write!(f, "Capacity healthy"),
        }
    }
}

// ==========================================
// RebalanceSuggestion - 自动平衡建议
// ==========================================
// 非约束性建议: 单目标产线, 工单不可拆分
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RebalanceSuggestion {
    pub suggested_line_id: i64,
    pub transfer_hours: f64,
    pub suggested_work_orders: Vec<String>,
    pub remaining_gap_after_transfer: f64,
}

// ==========================================
// CapacitySummary - 产线产能汇总
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapacitySummary {
    pub line_id: i64,
    pub daily_capacity_hours: f64,
    pub forecast_days: u32,

    // ===== 工时 =====
    pub available_hours: f64,     // 预测窗口总工时
    pub event_impact_hours: f64,  // 未关闭事件损失工时
    pub net_available_hours: f64, // 净可用工时 (>= 0)
    pub open_hours: f64,          // 开放工单剩余工时
    pub blocked_hours: f64,       // 缺料工单剩余工时 (仅展示)

    // ===== 风险 =====
    pub current_utilization: f64,
    pub risk_level: CapacityRiskLevel,
    #[serde(default)]
    pub risk_label: String, // 展示名, 按输出语言渲染
    pub overload_gap_hours: f64,
    pub escalation_required: bool,
    pub suggested_overtime_hours_per_day: u32,
    pub recommended_action: String,
    #[serde(skip)]
    pub action: RecommendedAction,

    // ===== 自动平衡 =====
    pub auto_rebalance: Option<RebalanceSuggestion>,
}
