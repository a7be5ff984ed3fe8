// ==========================================
// 产线产能负荷系统 - 排程模拟输出
// ==========================================

use crate::domain::types::{Priority, WorkOrderStatus};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// SimulationEntry - 单工单完工预测
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationEntry {
    pub work_order_no: String,
    pub priority: Priority, // 已归一化: 未知优先级文本输出为 NORMAL
    pub remaining_hours: f64,
    pub estimated_finish_date: NaiveDate,
    pub promise_date: NaiveDate,
    pub delay_days: i64, // 已截断为 >= 0
    pub will_delay: bool,
    // 固定为 RUNNING, 模拟器不区分未开工/已开工
    pub status: WorkOrderStatus,
}
