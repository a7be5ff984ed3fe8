// ==========================================
// 产线产能负荷系统 - 数据快照
// ==========================================
// 职责: 调用方提供的某一时点一致性快照 (产线/工单/事件)
// 说明: 引擎只读快照, 不负责快照的获取与刷新
// ==========================================

use crate::domain::error::DomainResult;
use crate::domain::event::ProductionEvent;
use crate::domain::line::ProductionLine;
use crate::domain::work_order::WorkOrder;
use serde::{Deserialize, Serialize};

// ==========================================
// PlantSnapshot - 全厂快照
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlantSnapshot {
    #[serde(default)]
    pub lines: Vec<ProductionLine>,
    #[serde(default)]
    pub work_orders: Vec<WorkOrder>,
    #[serde(default)]
    pub events: Vec<ProductionEvent>,
}

/// 单产线作用域: 产线 + 其工单 + 其未关闭事件
#[derive(Debug, Clone, PartialEq)]
pub struct LineScope {
    pub line: ProductionLine,
    pub work_orders: Vec<WorkOrder>,
    pub unresolved_events: Vec<ProductionEvent>,
}

impl PlantSnapshot {
    pub fn new(
        lines: Vec<ProductionLine>,
        work_orders: Vec<WorkOrder>,
        events: Vec<ProductionEvent>,
    ) -> Self {
        Self {
            lines,
            work_orders,
            events,
        }
    }

    /// 从 JSON 文本解析快照 (仅反序列化, 字段校验见 `validate`)
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }

    /// 边界校验: 对每条记录执行与工厂相同的字段校验
    ///
    /// # 返回
    /// - Err(FieldValueError): field 带记录定位, 如 `lines[id=2].line_name`
    pub fn validate(&self) -> DomainResult<()> {
        for line in &self.lines {
            line.validate()
                .map_err(|e| e.within(&format!("lines[id={}]", line.id)))?;
        }
        for wo in &self.work_orders {
            wo.validate()
                .map_err(|e| e.within(&format!("work_orders[{}]", wo.work_order_no)))?;
        }
        for event in &self.events {
            event
                .validate()
                .map_err(|e| e.within(&format!("events[id={}]", event.id)))?;
        }
        Ok(())
    }

    pub fn find_line(&self, line_id: i64) -> Option<&ProductionLine> {
        self.lines.iter().find(|l| l.id == line_id)
    }

    pub fn find_work_order(&self, work_order_no: &str) -> Option<&WorkOrder> {
        self.work_orders
            .iter()
            .find(|wo| wo.work_order_no == work_order_no)
    }

    /// 启用中的产线 (保持快照顺序)
    pub fn active_lines(&self) -> Vec<ProductionLine> {
        self.lines.iter().filter(|l| l.is_active).cloned().collect()
    }

    /// 截取单产线作用域
    ///
    /// # 返回
    /// - Some(LineScope): 产线存在
    /// - None: 产线不存在
    pub fn line_scope(&self, line_id: i64) -> Option<LineScope> {
        let line = self.find_line(line_id)?.clone();

        let work_orders = self
            .work_orders
            .iter()
            .filter(|wo| wo.production_line_id == line_id)
            .cloned()
            .collect();

        let unresolved_events = self
            .events
            .iter()
            .filter(|e| e.affects_line(line_id))
            .cloned()
            .collect();

        Some(LineScope {
            line,
            work_orders,
            unresolved_events,
        })
    }
}
