// ==========================================
// 产线产能负荷系统 - 工单生命周期引擎
// ==========================================
// 职责: 报工 -> 更新工时 + 状态流转
// 状态机: OPEN -> RUNNING (首次报工) -> DONE (剩余工时归零)
// 说明: 不修改入参, 返回更新后的工单副本
// 说明: 物料扣减 / 库存流水 不在本引擎范围
// ==========================================

use crate::domain::error::DomainError;
use crate::domain::types::WorkOrderStatus;
use crate::domain::work_order::{ProductionLog, WorkOrder};
use crate::engine::error::EngineResult;
use chrono::{NaiveDate, NaiveDateTime};
use tracing::{info, instrument};

/// 报工结果
#[derive(Debug, Clone, PartialEq)]
pub struct LogOutcome {
    pub work_order: WorkOrder,
    /// 实际计入的工时 (已截断到剩余工时)
    pub applied_hours: f64,
    pub previous_status: WorkOrderStatus,
}

impl LogOutcome {
    pub fn status_changed(&self) -> bool {
        self.previous_status != self.work_order.status
    }
}

// ==========================================
// WorkOrderLifecycle - 工单生命周期引擎
// ==========================================
pub struct WorkOrderLifecycle {
    // 无状态引擎,不需要注入依赖
}

impl WorkOrderLifecycle {
    /// 构造函数
    pub fn new() -> Self {
        Self {}
    }

    /// 应用一条报工记录
    ///
    /// # 校验
    /// 1) produced_hours > 0
    /// 2) log_date 不晚于 today
    /// 3) 工单状态可执行 (OPEN / RUNNING)
    /// 4) 报工产线与工单产线一致
    ///
    /// # 参数
    /// - `work_order`: 当前工单
    /// - `log`: 报工记录
    /// - `now`: 当前时间 (today 取其日期部分)
    #[instrument(skip(self, work_order, log), fields(
        work_order_no = %work_order.work_order_no,
        produced_hours = log.produced_hours
    ))]
    pub fn apply_log(
        &self,
        work_order: &WorkOrder,
        log: &ProductionLog,
        now: NaiveDateTime,
    ) -> EngineResult<LogOutcome> {
        Self::validate_log(work_order, log, now.date())?;

        let previous_status = work_order.status;
        let applied_hours = log.produced_hours.min(work_order.remaining_hours);

        let mut updated = work_order.clone();
        updated.remaining_hours -= applied_hours;
        updated.actual_hours += applied_hours;

        if updated.status == WorkOrderStatus::Open {
            updated.status = WorkOrderStatus::Running;
            updated.started_at = Some(now);
        }

        if updated.remaining_hours <= 0.0 {
            updated.remaining_hours = 0.0;
            updated.status = WorkOrderStatus::Done;
            updated.completed_at = Some(now);
        }

        info!(
            from = %previous_status,
            to = %updated.status,
            applied_hours,
            remaining_hours = updated.remaining_hours,
            "报工完成"
        );

        Ok(LogOutcome {
            work_order: updated,
            applied_hours,
            previous_status,
        })
    }

    fn validate_log(
        work_order: &WorkOrder,
        log: &ProductionLog,
        today: NaiveDate,
    ) -> Result<(), DomainError> {
        if !log.produced_hours.is_finite() || log.produced_hours <= 0.0 {
            return Err(DomainError::field("produced_hours", "报工工时必须为正数"));
        }
        if log.log_date > today {
            return Err(DomainError::field(
                "log_date",
                format!("报工日期不能晚于今天: {}", log.log_date),
            ));
        }
        if !work_order.status.is_executable() {
            return Err(DomainError::InvalidStateTransition {
                from: work_order.status.to_string(),
                to: WorkOrderStatus::Running.to_string(),
            });
        }
        if work_order.production_line_id != log.production_line_id {
            return Err(DomainError::LineMismatch {
                work_order_line: work_order.production_line_id,
                log_line: log.production_line_id,
            });
        }
        Ok(())
    }
}

// ==========================================
// Default trait 实现
// ==========================================
impl Default for WorkOrderLifecycle {
    fn default() -> Self {
        Self::new()
    }
}
