// ==========================================
// 产线产能负荷系统 - 全厂产能汇总服务
// ==========================================
// 职责: 对快照内每条产线计算产能汇总 (扇出)
// 说明: 单产线配置错误只记录在该产线结果中, 不中断整份报告
// 说明: 各产线计算互不共享可变状态, 可并发执行
// ==========================================

use crate::domain::capacity::CapacitySummary;
use crate::domain::line::ProductionLine;
use crate::domain::snapshot::PlantSnapshot;
use crate::domain::types::CapacityRiskLevel;
use crate::engine::capacity::{LineCapacityCalculator, PlantRoster};
use crate::engine::error::EngineResult;
use chrono::{NaiveDate, NaiveDateTime, Utc};
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument, warn};
use uuid::Uuid;

/// 单产线计算结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LineCapacityOutcome {
    Computed(CapacitySummary),
    Failed { line_id: i64, error: String },
}

impl LineCapacityOutcome {
    pub fn line_id(&self) -> i64 {
        match self {
            LineCapacityOutcome::Computed(summary) => summary.line_id,
            LineCapacityOutcome::Failed { line_id, .. } => *line_id,
        }
    }

    pub fn summary(&self) -> Option<&CapacitySummary> {
        match self {
            LineCapacityOutcome::Computed(summary) => Some(summary),
            LineCapacityOutcome::Failed { .. } => None,
        }
    }
}

/// 全厂产能报告
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantCapacityReport {
    pub report_id: String,
    pub as_of: NaiveDate,
    pub generated_at: NaiveDateTime,
    pub forecast_days: u32,
    pub overload_count: usize,
    pub failed_count: usize,
    pub lines: Vec<LineCapacityOutcome>,
}

// ==========================================
// PlantCapacityService - 全厂产能汇总服务
// ==========================================
pub struct PlantCapacityService {
    calculator: LineCapacityCalculator,
}

impl PlantCapacityService {
    /// 构造函数
    pub fn new() -> Self {
        Self {
            calculator: LineCapacityCalculator::new(),
        }
    }

    /// 计算单条产线 (自动平衡名册 = 启用产线 + 全部工单)
    ///
    /// # 返回
    /// - None: 产线不存在
    /// - Some(Err): 产线配置错误
    pub fn compute_line(
        &self,
        snapshot: &PlantSnapshot,
        line_id: i64,
        forecast_days: u32,
    ) -> Option<EngineResult<CapacitySummary>> {
        let scope = snapshot.line_scope(line_id)?;
        let roster_lines = snapshot.active_lines();
        let roster = PlantRoster::new(&roster_lines, &snapshot.work_orders);

        Some(self.calculator.calculate(
            &scope.line,
            &scope.work_orders,
            &scope.unresolved_events,
            Some(roster),
            forecast_days,
        ))
    }

    /// 计算单条产线, 错误折叠为 Failed 结果
    pub fn evaluate_line(
        &self,
        snapshot: &PlantSnapshot,
        line_id: i64,
        forecast_days: u32,
    ) -> Option<LineCapacityOutcome> {
        let outcome = match self.compute_line(snapshot, line_id, forecast_days)? {
            Ok(summary) => LineCapacityOutcome::Computed(summary),
            Err(e) => {
                warn!(line_id, error = %e, "产线产能计算失败");
                LineCapacityOutcome::Failed {
                    line_id,
                    error: e.to_string(),
                }
            }
        };
        Some(outcome)
    }

    /// 生成全厂报告 (顺序计算, 结果顺序 = 快照产线顺序)
    #[instrument(skip(self, snapshot), fields(lines_count = snapshot.lines.len()))]
    pub fn report(
        &self,
        snapshot: &PlantSnapshot,
        forecast_days: u32,
        include_inactive: bool,
        as_of: NaiveDate,
    ) -> PlantCapacityReport {
        let outcomes = Self::target_lines(snapshot, include_inactive)
            .iter()
            .filter_map(|line| self.evaluate_line(snapshot, line.id, forecast_days))
            .collect();

        Self::assemble(outcomes, forecast_days, as_of)
    }

    /// 生成全厂报告 (每条产线一个阻塞任务并发计算)
    ///
    /// 结果顺序与 `report` 一致
    pub async fn report_concurrent(
        self: Arc<Self>,
        snapshot: Arc<PlantSnapshot>,
        forecast_days: u32,
        include_inactive: bool,
        as_of: NaiveDate,
    ) -> PlantCapacityReport {
        let tasks = Self::target_lines(&snapshot, include_inactive)
            .into_iter()
            .map(|line| {
                let service = Arc::clone(&self);
                let snapshot = Arc::clone(&snapshot);
                tokio::task::spawn_blocking(move || {
                    service.evaluate_line(&snapshot, line.id, forecast_days)
                })
            });

        let mut outcomes = Vec::new();
        for joined in join_all(tasks).await {
            match joined {
                Ok(Some(outcome)) => outcomes.push(outcome),
                Ok(None) => {}
                Err(e) => warn!(error = %e, "产线计算任务异常退出"),
            }
        }

        Self::assemble(outcomes, forecast_days, as_of)
    }

    fn target_lines(snapshot: &PlantSnapshot, include_inactive: bool) -> Vec<ProductionLine> {
        if include_inactive {
            snapshot.lines.clone()
        } else {
            snapshot.active_lines()
        }
    }

    fn assemble(
        outcomes: Vec<LineCapacityOutcome>,
        forecast_days: u32,
        as_of: NaiveDate,
    ) -> PlantCapacityReport {
        let overload_count = outcomes
            .iter()
            .filter_map(|o| o.summary())
            .filter(|s| s.risk_level == CapacityRiskLevel::Overload)
            .count();
        let failed_count = outcomes.iter().filter(|o| o.summary().is_none()).count();

        info!(
            lines_count = outcomes.len(),
            overload_count,
            failed_count,
            "全厂产能报告生成"
        );

        PlantCapacityReport {
            report_id: Uuid::new_v4().to_string(),
            as_of,
            generated_at: Utc::now().naive_utc(),
            forecast_days,
            overload_count,
            failed_count,
            lines: outcomes,
        }
    }
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for PlantCapacityService {
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
    use crate::domain::work_order::WorkOrder;

    fn as_of() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 6, 1).unwrap()
    }

    fn order(no: &str, line_id: i64, hours: f64) -> WorkOrder {
        WorkOrder {
            id: 0,
            work_order_no: no.to_string(),
            production_line_id: line_id,
            planned_hours: hours,
            actual_hours: 0.0,
            remaining_hours: hours,
            priority: Priority::Normal,
            promise_date: as_of(),
            production_due_date: None,
            status: WorkOrderStatus::Open,
            is_material_ready: true,
            material_ready_date: None,
            is_npi: false,
            engineering_hold: false,
            started_at: None,
            completed_at: None,
        }
    }

    fn snapshot() -> PlantSnapshot {
        PlantSnapshot::new(
            vec![
                ProductionLine::new(1, "L1", 8.0, 1.0).unwrap(),
                ProductionLine::new(2, "L2", 0.0, 1.0).unwrap(),
                ProductionLine::new(3, "L3", 8.0, 1.0).unwrap(),
                ProductionLine::new(4, "L4", 8.0, 1.0).unwrap().deactivated(),
            ],
            vec![order("A", 1, 50.0), order("B", 3, 5.0)],
            vec![],
        )
    }

    #[test]
    fn test_report_collects_failures_and_rebalances() {
        let service = PlantCapacityService::new();
        let report = service.report(&snapshot(), 5, false, as_of());

        let ids: Vec<i64> = report.lines.iter().map(|o| o.line_id()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(report.overload_count, 1);
        assert_eq!(report.failed_count, 1);

        let l1 = report.lines[0].summary().unwrap();
        let rebalance = l1.auto_rebalance.as_ref().unwrap();
        // 停用产线 L4 不作为目标; L3 富余 35
        assert_eq!(rebalance.suggested_line_id, 3);
        assert_eq!(rebalance.transfer_hours, 10.0);

        match &report.lines[1] {
            LineCapacityOutcome::Failed { error, .. } => {
                assert_eq!(error, "Invalid daily capacity configuration")
            }
            other => panic!("unexpected outcome: {:?}", other),
        }
    }

    #[test]
    fn test_report_include_inactive() {
        let service = PlantCapacityService::new();
        let report = service.report(&snapshot(), 5, true, as_of());
        assert_eq!(report.lines.len(), 4);
    }

    #[tokio::test]
    async fn test_concurrent_report_matches_sequential() {
        let service = Arc::new(PlantCapacityService::new());
        let snap = Arc::new(snapshot());

        let sequential = service.report(&snap, 5, false, as_of());
        let concurrent = Arc::clone(&service)
            .report_concurrent(Arc::clone(&snap), 5, false, as_of())
            .await;

        assert_eq!(sequential.lines, concurrent.lines);
        assert_eq!(sequential.overload_count, concurrent.overload_count);
    }
}
