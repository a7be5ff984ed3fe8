// ==========================================
// 产线产能负荷系统 - 异常事件领域模型
// ==========================================
// 未关闭事件按 impact_hours 扣减产线净可用工时
// ==========================================

use crate::domain::error::{DomainError, DomainResult};
use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

// ==========================================
// ProductionEvent - 生产异常事件
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionEvent {
    pub id: i64,
    pub production_line_id: i64,
    pub event_type: String,
    pub impact_hours: f64, // 损失工时 (>0)
    #[serde(default)]
    pub description: Option<String>,
    pub event_date: NaiveDate,

    // ===== 关闭控制 =====
    #[serde(default)]
    pub is_resolved: bool,
    #[serde(default)]
    pub resolved_at: Option<NaiveDateTime>,
}

/// 事件登记参数
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductionEventDraft {
    pub id: i64,
    pub production_line_id: i64,
    pub event_type: String,
    pub impact_hours: f64,
    #[serde(default)]
    pub description: Option<String>,
    pub event_date: NaiveDate,
}

impl ProductionEvent {
    /// 校验并登记事件
    ///
    /// # 规则
    /// - impact_hours 必须 > 0
    /// - event_date 不能晚于 today
    pub fn record(draft: ProductionEventDraft, today: NaiveDate) -> DomainResult<Self> {
        check_impact_hours(draft.impact_hours)?;
        if draft.event_date > today {
            return Err(DomainError::field(
                "event_date",
                format!("事件日期不能晚于今天: {}", draft.event_date),
            ));
        }

        Ok(Self {
            id: draft.id,
            production_line_id: draft.production_line_id,
            event_type: draft.event_type,
            impact_hours: draft.impact_hours,
            description: draft.description,
            event_date: draft.event_date,
            is_resolved: false,
            resolved_at: None,
        })
    }

    /// 字段校验 (快照边界使用; 事件日期依赖 today, 仅在登记时校验)
    pub fn validate(&self) -> DomainResult<()> {
        check_impact_hours(self.impact_hours)
    }

    /// 关闭事件（返回新副本）
    pub fn resolve(&self, at: NaiveDateTime) -> DomainResult<Self> {
        if self.is_resolved {
            return Err(DomainError::AlreadyResolved(self.id));
        }
        Ok(Self {
            is_resolved: true,
            resolved_at: Some(at),
            ..self.clone()
        })
    }

    /// 是否影响指定产线的产能
    pub fn affects_line(&self, line_id: i64) -> bool {
        !self.is_resolved && self.production_line_id == line_id
    }
}

fn check_impact_hours(value: f64) -> DomainResult<()> {
    if !value.is_finite() || value <= 0.0 {
        return Err(DomainError::field("impact_hours", "损失工时必须为正数"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 2, 10).unwrap()
    }

    fn draft(impact: f64, date: NaiveDate) -> ProductionEventDraft {
        ProductionEventDraft {
            id: 7,
            production_line_id: 1,
            event_type: "MACHINE_DOWN".to_string(),
            impact_hours: impact,
            description: None,
            event_date: date,
        }
    }

    #[test]
    fn test_record_valid_event() {
        let event = ProductionEvent::record(draft(4.0, today()), today()).unwrap();
        assert!(!event.is_resolved);
        assert!(event.affects_line(1));
        assert!(!event.affects_line(2));
    }

    #[test]
    fn test_record_rejects_non_positive_impact() {
        assert!(ProductionEvent::record(draft(0.0, today()), today()).is_err());
        assert!(ProductionEvent::record(draft(-2.0, today()), today()).is_err());
    }

    #[test]
    fn test_record_rejects_future_date() {
        let tomorrow = today().succ_opt().unwrap();
        assert!(ProductionEvent::record(draft(1.0, tomorrow), today()).is_err());
    }

    #[test]
    fn test_resolve_once() {
        let event = ProductionEvent::record(draft(4.0, today()), today()).unwrap();
        let at = today().and_hms_opt(9, 30, 0).unwrap();
        let resolved = event.resolve(at).unwrap();
        assert!(resolved.is_resolved);
        assert_eq!(resolved.resolved_at, Some(at));
        assert!(!resolved.affects_line(1));

        assert_eq!(resolved.resolve(at), Err(DomainError::AlreadyResolved(7)));
    }
}
