// ==========================================
// 产线产能负荷系统 - 自动平衡建议引擎
// ==========================================
// 职责: 超负荷产线 -> 选择一条富余产线 + 待转移工单
// 输入: 超负荷产线 + 缺口工时 + 开放工单 + 全厂名册
// 输出: RebalanceSuggestion (无富余产线时为 None)
// ==========================================
// 策略: 单趟贪心, 不拆分工单, 不跨多条目标产线
// 策略: 优先转出低优先级/晚承诺的工单, 紧急工单留在原产线
// ==========================================

use crate::domain::capacity::{round2, RebalanceSuggestion};
use crate::domain::line::ProductionLine;
use crate::domain::work_order::WorkOrder;
use crate::engine::capacity::PlantRoster;
use tracing::{debug, info};

/// 候选产线富余工时
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSpare {
    pub line_id: i64,
    pub spare_capacity: f64,
}

// ==========================================
// RebalanceAdvisor - 自动平衡建议引擎
// ==========================================
pub struct RebalanceAdvisor {
    // 无状态引擎,不需要注入依赖
}

impl RebalanceAdvisor {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    /// 生成自动平衡建议
    ///
    /// # 参数
    /// - `overloaded_line`: 超负荷产线
    /// - `overload_gap_hours`: 缺口工时 (未取整)
    /// - `open_orders`: 超负荷产线的开放工单
    /// - `roster`: 全厂产线/工单名册
    /// - `forecast_days`: 预测窗口
    ///
    /// # 返回
    /// - Some(RebalanceSuggestion): 找到富余产线
    /// - None: 名册为空或无富余产线 (不是错误)
    pub fn suggest(
        &self,
        overloaded_line: &ProductionLine,
        overload_gap_hours: f64,
        open_orders: &[&WorkOrder],
        roster: PlantRoster<'_>,
        forecast_days: u32,
    ) -> Option<RebalanceSuggestion> {
        if roster.lines.is_empty() || roster.work_orders.is_empty() {
            debug!(line_id = overloaded_line.id, "名册为空, 跳过自动平衡");
            return None;
        }

        // 1. 候选产线富余工时
        let candidates = self.spare_capacities(overloaded_line.id, roster, forecast_days);

        // 2-3. 选择富余最大的产线
        let target = match Self::pick_target(&candidates) {
            Some(target) => target,
            None => {
                info!(line_id = overloaded_line.id, "无富余产线, 无法自动平衡");
                return None;
            }
        };

        // 4. 转移工时
        let transfer_hours = overload_gap_hours.min(target.spare_capacity);

        // 5-6. 按 (优先级秩, 承诺日期) 降序贪心选单
        let selected = Self::select_orders(open_orders, transfer_hours);

        info!(
            line_id = overloaded_line.id,
            target_line_id = target.line_id,
            transfer_hours = round2(transfer_hours),
            selected_count = selected.len(),
            "自动平衡建议生成"
        );

        Some(RebalanceSuggestion {
            suggested_line_id: target.line_id,
            transfer_hours: round2(transfer_hours),
            suggested_work_orders: selected,
            remaining_gap_after_transfer: round2(overload_gap_hours - transfer_hours),
        })
    }

    /// 计算除超负荷产线外, 各产线的富余工时 (仅保留 > 0)
    ///
    /// spare = 日产能 * 预测天数 - 该产线开放工时
    /// 候选产线的事件损失不参与计算
    pub fn spare_capacities(
        &self,
        overloaded_line_id: i64,
        roster: PlantRoster<'_>,
        forecast_days: u32,
    ) -> Vec<LineSpare> {
        roster
            .lines
            .iter()
            .filter(|line| line.id != overloaded_line_id)
            .filter_map(|line| {
                let line_open_hours: f64 = roster
                    .work_orders
                    .iter()
                    .filter(|wo| wo.production_line_id == line.id && wo.is_open())
                    .map(|wo| wo.remaining_hours)
                    .sum();

                let line_available = line.daily_capacity_hours() * forecast_days as f64;
                let spare_capacity = line_available - line_open_hours;

                (spare_capacity > 0.0).then_some(LineSpare {
                    line_id: line.id,
                    spare_capacity,
                })
            })
            .collect()
    }

    /// 选择富余最大的产线
    ///
    /// 并列时取名册中最先出现者。这只是遍历顺序的结果, 不代表业务含义;
    /// 名册顺序变化可能改变并列时的选择。
    pub fn pick_target(candidates: &[LineSpare]) -> Option<LineSpare> {
        let mut best: Option<LineSpare> = None;
        for candidate in candidates {
            match best {
                Some(b) if candidate.spare_capacity <= b.spare_capacity => {}
                _ => best = Some(*candidate),
            }
        }
        best
    }

    /// 贪心选单: 累计剩余工时达到 transfer_hours 即停止 (允许超出)
    pub fn select_orders(open_orders: &[&WorkOrder], transfer_hours: f64) -> Vec<String> {
        let mut ordered: Vec<&WorkOrder> = open_orders.to_vec();
        // 稳定排序: 同键工单保持原顺序
        ordered.sort_by(|a, b| b.schedule_key().cmp(&a.schedule_key()));

        let mut selected = Vec::new();
        let mut accumulated = 0.0;
        for wo in ordered {
            if accumulated >= transfer_hours {
                break;
            }
            selected.push(wo.work_order_no.clone());
            accumulated += wo.remaining_hours;
        }
        selected
    }
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for RebalanceAdvisor {
    fn default() -> Self {
        Self::new()
    }
}
