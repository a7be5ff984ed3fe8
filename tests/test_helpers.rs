// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 提供产线/工单/事件测试数据构建器、临时配置文件
// ==========================================
#![allow(dead_code)]

use chrono::NaiveDate;
use line_capacity_aps::domain::event::ProductionEvent;
use line_capacity_aps::domain::line::ProductionLine;
use line_capacity_aps::domain::types::{Priority, WorkOrderStatus};
use line_capacity_aps::domain::work_order::WorkOrder;
use std::io::Write;
use tempfile::NamedTempFile;

/// 测试基准日期
pub fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 3, 2).unwrap()
}

/// 基准日期偏移 n 天
pub fn day(offset: i64) -> NaiveDate {
    today() + chrono::Duration::days(offset)
}

// ==========================================
// ProductionLine 构建器
// ==========================================

pub struct LineBuilder {
    id: i64,
    line_name: String,
    working_hours_per_day: f64,
    efficiency_rate: f64,
    is_active: bool,
}

impl LineBuilder {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            line_name: format!("LINE-{}", id),
            working_hours_per_day: 8.0,
            efficiency_rate: 1.0,
            is_active: true,
        }
    }

    pub fn hours(mut self, hours: f64) -> Self {
        self.working_hours_per_day = hours;
        self
    }

    pub fn efficiency(mut self, rate: f64) -> Self {
        self.efficiency_rate = rate;
        self
    }

    pub fn inactive(mut self) -> Self {
        self.is_active = false;
        self
    }

    /// 直接构造 (绕过工厂校验, 用于配置错误场景)
    pub fn build(self) -> ProductionLine {
        ProductionLine {
            id: self.id,
            line_name: self.line_name,
            working_hours_per_day: self.working_hours_per_day,
            efficiency_rate: self.efficiency_rate,
            is_active: self.is_active,
        }
    }
}

// ==========================================
// WorkOrder 构建器
// ==========================================

pub struct WorkOrderBuilder {
    order: WorkOrder,
}

impl WorkOrderBuilder {
    pub fn new(work_order_no: &str, line_id: i64) -> Self {
        Self {
            order: WorkOrder {
                id: 0,
                work_order_no: work_order_no.to_string(),
                production_line_id: line_id,
                planned_hours: 0.0,
                actual_hours: 0.0,
                remaining_hours: 0.0,
                priority: Priority::Normal,
                promise_date: day(10),
                production_due_date: None,
                status: WorkOrderStatus::Open,
                is_material_ready: true,
                material_ready_date: None,
                is_npi: false,
                engineering_hold: false,
                started_at: None,
                completed_at: None,
            },
        }
    }

    pub fn id(mut self, id: i64) -> Self {
        self.order.id = id;
        self
    }

    pub fn remaining(mut self, hours: f64) -> Self {
        self.order.planned_hours = hours;
        self.order.remaining_hours = hours;
        self
    }

    pub fn priority(mut self, priority: Priority) -> Self {
        self.order.priority = priority;
        self
    }

    pub fn promise(mut self, date: NaiveDate) -> Self {
        self.order.promise_date = date;
        self
    }

    pub fn due(mut self, date: NaiveDate) -> Self {
        self.order.production_due_date = Some(date);
        self
    }

    pub fn status(mut self, status: WorkOrderStatus) -> Self {
        self.order.status = status;
        self
    }

    pub fn material_missing(mut self) -> Self {
        self.order.is_material_ready = false;
        self
    }

    pub fn npi(mut self) -> Self {
        self.order.is_npi = true;
        self
    }

    pub fn engineering_hold(mut self) -> Self {
        self.order.engineering_hold = true;
        self
    }

    pub fn build(self) -> WorkOrder {
        self.order
    }
}

// ==========================================
// ProductionEvent 构建器
// ==========================================

pub struct EventBuilder {
    event: ProductionEvent,
}

impl EventBuilder {
    pub fn new(id: i64, line_id: i64, impact_hours: f64) -> Self {
        Self {
            event: ProductionEvent {
                id,
                production_line_id: line_id,
                event_type: "MACHINE_DOWN".to_string(),
                impact_hours,
                description: None,
                event_date: today(),
                is_resolved: false,
                resolved_at: None,
            },
        }
    }

    pub fn resolved(mut self) -> Self {
        self.event.is_resolved = true;
        self.event.resolved_at = today().and_hms_opt(18, 0, 0);
        self
    }

    pub fn build(self) -> ProductionEvent {
        self.event
    }
}

// ==========================================
// 临时文件
// ==========================================

/// 写入临时 JSON 文件 (需要保持返回值存活)
pub fn write_temp_json(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}
