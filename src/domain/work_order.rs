// ==========================================
// 产线产能负荷系统 - 工单领域模型
// ==========================================
// 工时驱动: planned_hours / actual_hours / remaining_hours
// 物料门控: is_material_ready 决定工单是否计入产能负荷
// ==========================================

use crate::domain::error::{DomainError, DomainResult};
use crate::domain::line::check_non_negative;
use crate::domain::types::{Priority, WorkOrderStatus};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

// ==========================================
// WorkOrder - 工单
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkOrder {
    pub id: i64,
    pub work_order_no: String,
    pub production_line_id: i64,

    // ===== 工时 =====
    pub planned_hours: f64,
    #[serde(default)]
    pub actual_hours: f64,
    pub remaining_hours: f64,

    // ===== 优先级与交期 =====
    #[serde(default)]
    pub priority: Priority,
    pub promise_date: NaiveDate,               // 客户承诺日期 (产能/模拟使用)
    #[serde(default)]
    pub production_due_date: Option<NaiveDate>, // 生产交期 (风险分级使用)

    // ===== 状态 =====
    pub status: WorkOrderStatus,
    #[serde(default)]
    pub is_material_ready: bool,
    #[serde(default)]
    pub material_ready_date: Option<NaiveDate>,

    // ===== 风险标记 =====
    #[serde(default)]
    pub is_npi: bool,
    #[serde(default)]
    pub engineering_hold: bool,

    // ===== 执行时间线 =====
    #[serde(default)]
    pub started_at: Option<NaiveDateTime>,
    #[serde(default)]
    pub completed_at: Option<NaiveDateTime>,
}

/// 工单创建参数
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkOrderDraft {
    pub id: i64,
    pub work_order_no: String,
    pub production_line_id: i64,
    pub planned_hours: f64,
    /// 上游原始优先级文本，未知值按 NORMAL
    pub priority: String,
    pub promise_date: NaiveDate,
    #[serde(default)]
    pub production_due_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_material_ready: bool,
    #[serde(default)]
    pub material_ready_date: Option<NaiveDate>,
    #[serde(default)]
    pub is_npi: bool,
    #[serde(default)]
    pub engineering_hold: bool,
}

impl WorkOrder {
    /// 校验并创建工单
    ///
    /// # 规则
    /// - 物料齐套 -> OPEN，否则 BLOCKED_MATERIAL
    /// - remaining_hours 初始等于 planned_hours
    pub fn create(draft: WorkOrderDraft) -> DomainResult<Self> {
        let status = if draft.is_material_ready {
            WorkOrderStatus::Open
        } else {
            WorkOrderStatus::BlockedMaterial
        };

        let work_order = Self {
            id: draft.id,
            work_order_no: draft.work_order_no.trim().to_string(),
            production_line_id: draft.production_line_id,
            planned_hours: draft.planned_hours,
            actual_hours: 0.0,
            remaining_hours: draft.planned_hours,
            priority: Priority::from_label(&draft.priority),
            promise_date: draft.promise_date,
            production_due_date: draft.production_due_date,
            status,
            is_material_ready: draft.is_material_ready,
            material_ready_date: draft.material_ready_date,
            is_npi: draft.is_npi,
            engineering_hold: draft.engineering_hold,
            started_at: None,
            completed_at: None,
        };
        work_order.validate()?;
        Ok(work_order)
    }

    /// 字段校验 (工厂与快照边界共用)
    pub fn validate(&self) -> DomainResult<()> {
        if self.work_order_no.trim().is_empty() {
            return Err(DomainError::field("work_order_no", "工单号不能为空"));
        }
        check_non_negative("planned_hours", self.planned_hours)?;
        check_non_negative("actual_hours", self.actual_hours)?;
        check_non_negative("remaining_hours", self.remaining_hours)
    }

    /// 开放工单: 未完工且物料齐套，计入产能负荷
    pub fn is_open(&self) -> bool {
        self.status != WorkOrderStatus::Done && self.is_material_ready
    }

    /// 阻塞工单: 未完工且物料未齐套，仅展示不计入负荷
    pub fn is_blocked(&self) -> bool {
        self.status != WorkOrderStatus::Done && !self.is_material_ready
    }

    /// 排序键 (优先级秩, 承诺日期)
    pub fn schedule_key(&self) -> (u8, NaiveDate) {
        (self.priority.rank(), self.promise_date)
    }
}

// ==========================================
// ProductionLog - 报工记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionLog {
    pub production_line_id: i64,
    pub work_order_id: i64,
    pub produced_hours: f64,
    #[serde(default)]
    pub scrap_hours: f64,
    #[serde(default)]
    pub rework_hours: f64,
    pub log_date: NaiveDate,
}
