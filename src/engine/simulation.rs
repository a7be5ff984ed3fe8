// ==========================================
// 产线产能负荷系统 - 产线工单排程模拟引擎
// ==========================================
// 职责: 按优先级/承诺日期排列开放工单, 预测完工日期, 标记延期
// 输入: 产线 + 该产线工单 (+ 未关闭事件, 当前不参与计算)
// 输出: Vec<SimulationEntry> (顺序即执行顺序)
// ==========================================
// 模型: 单服务台累计排队 - 工单严格按序共享同一日产能
// ==========================================

use crate::domain::event::ProductionEvent;
use crate::domain::line::ProductionLine;
use crate::domain::simulation::SimulationEntry;
use crate::domain::types::WorkOrderStatus;
use crate::domain::work_order::WorkOrder;
use crate::engine::capacity::validated_daily_capacity;
use crate::engine::error::{EngineError, EngineResult};
use chrono::{NaiveDate, TimeDelta};
use tracing::{info, instrument, warn};

/// 延期换算
///
/// 输出 (展示天数, 是否延期):
/// - 展示天数 = max(raw_delay, 0)
/// - 是否延期 = raw_delay > 0 (取自未截断值)
pub fn compute_delay(raw_delay_days: i64) -> (i64, bool) {
    (raw_delay_days.max(0), raw_delay_days > 0)
}

// ==========================================
// LineOrderSimulator - 排程模拟引擎
// ==========================================
pub struct LineOrderSimulator {
    // 无状态引擎,不需要注入依赖
}

impl LineOrderSimulator {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    /// 模拟产线开放工单的完工日期
    ///
    /// 排序键: (优先级秩, 承诺日期) 升序 - 高优先级、早承诺先做
    ///
    /// # 参数
    /// - `line`: 产线
    /// - `work_orders`: 该产线工单
    /// - `_events`: 未关闭事件 (保留接口对称, 暂不参与排程)
    /// - `today`: 模拟起点日期
    ///
    /// # 返回
    /// - Ok(Vec<SimulationEntry>)
    /// - Err(InvalidDailyCapacity)
    /// - Err(ProjectionOutOfRange): 累计工时折算的完工日期超出日期范围
    #[instrument(skip(self, line, work_orders, _events), fields(
        line_id = line.id,
        work_orders_count = work_orders.len()
    ))]
    pub fn simulate(
        &self,
        line: &ProductionLine,
        work_orders: &[WorkOrder],
        _events: &[ProductionEvent],
        today: NaiveDate,
    ) -> EngineResult<Vec<SimulationEntry>> {
        let daily_capacity = validated_daily_capacity(line)?;

        let mut open_orders: Vec<&WorkOrder> = work_orders.iter().filter(|wo| wo.is_open()).collect();
        open_orders.sort_by_key(|wo| wo.schedule_key());

        let mut entries = Vec::with_capacity(open_orders.len());
        let mut accumulated_hours = 0.0;

        for wo in open_orders {
            accumulated_hours += wo.remaining_hours;

            let days_needed = (accumulated_hours / daily_capacity).ceil() as i64;
            let estimated_finish_date = TimeDelta::try_days(days_needed)
                .and_then(|offset| today.checked_add_signed(offset))
                .ok_or_else(|| {
                    warn!(
                        work_order_no = %wo.work_order_no,
                        accumulated_hours,
                        "完工日期超出可表示范围"
                    );
                    EngineError::ProjectionOutOfRange {
                        work_order_no: wo.work_order_no.clone(),
                    }
                })?;

            let raw_delay = (estimated_finish_date - wo.promise_date).num_days();
            let (delay_days, will_delay) = compute_delay(raw_delay);

            entries.push(SimulationEntry {
                work_order_no: wo.work_order_no.clone(),
                priority: wo.priority,
                remaining_hours: wo.remaining_hours,
                estimated_finish_date,
                promise_date: wo.promise_date,
                delay_days,
                will_delay,
                status: WorkOrderStatus::Running,
            });
        }

        info!(
            entries_count = entries.len(),
            delayed_count = entries.iter().filter(|e| e.will_delay).count(),
            "排程模拟完成"
        );

        Ok(entries)
    }
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for LineOrderSimulator {
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
    use crate::domain::types::Priority;
    use crate::engine::error::EngineError;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
    }

    fn order(no: &str, hours: f64, priority: Priority, promise: NaiveDate, ready: bool) -> WorkOrder {
        WorkOrder {
            id: 0,
            work_order_no: no.to_string(),
            production_line_id: 1,
            planned_hours: hours,
            actual_hours: 0.0,
            remaining_hours: hours,
            priority,
            promise_date: promise,
            production_due_date: None,
            status: WorkOrderStatus::Open,
            is_material_ready: ready,
            material_ready_date: None,
            is_npi: false,
            engineering_hold: false,
            started_at: None,
            completed_at: None,
        }
    }

    #[test]
    fn test_compute_delay() {
        assert_eq!(compute_delay(3), (3, true));
        assert_eq!(compute_delay(0), (0, false));
        assert_eq!(compute_delay(-4), (0, false));
    }

    #[test]
    fn test_simulate_order_and_dates() {
        let sim = LineOrderSimulator::new();
        let line = ProductionLine::new(1, "L1", 8.0, 1.0).unwrap();
        let d = |days: i64| today() + TimeDelta::days(days);
        let orders = vec![
            order("LOW", 4.0, Priority::Low, d(1), true),
            order("HIGH-LATE", 8.0, Priority::High, d(10), true),
            order("HIGH-EARLY", 4.0, Priority::High, d(1), true),
            order("BLOCKED", 50.0, Priority::High, d(1), false),
        ];

        let entries = sim.simulate(&line, &orders, &[], today()).unwrap();
        let nos: Vec<&str> = entries.iter().map(|e| e.work_order_no.as_str()).collect();
        assert_eq!(nos, vec!["HIGH-EARLY", "HIGH-LATE", "LOW"]);

        // 累计 4h -> ceil(0.5)=1 天
        assert_eq!(entries[0].estimated_finish_date, d(1));
        assert!(!entries[0].will_delay);
        // 累计 12h -> ceil(1.5)=2 天
        assert_eq!(entries[1].estimated_finish_date, d(2));
        // 累计 16h -> 2 天, 承诺 d(1) -> 延期 1 天
        assert_eq!(entries[2].estimated_finish_date, d(2));
        assert_eq!(entries[2].delay_days, 1);
        assert!(entries[2].will_delay);
        assert!(entries.iter().all(|e| e.status == WorkOrderStatus::Running));
    }

    #[test]
    fn test_simulate_invalid_capacity() {
        let sim = LineOrderSimulator::new();
        let line = ProductionLine::new(1, "L1", 0.0, 1.0).unwrap();
        let err = sim.simulate(&line, &[], &[], today()).unwrap_err();
        assert!(matches!(err, EngineError::InvalidDailyCapacity { .. }));
    }

    #[test]
    fn test_zero_hour_order_finishes_today() {
        let sim = LineOrderSimulator::new();
        let line = ProductionLine::new(1, "L1", 8.0, 1.0).unwrap();
        let orders = vec![order("ZERO", 0.0, Priority::Normal, today(), true)];
        let entries = sim.simulate(&line, &orders, &[], today()).unwrap();
        assert_eq!(entries[0].estimated_finish_date, today());
        assert_eq!(entries[0].delay_days, 0);
    }
}
