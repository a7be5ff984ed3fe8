// ==========================================
// 产线产能负荷系统 - 产线领域模型
// ==========================================
// 产能模型: 小时制
// 日产能 = working_hours_per_day * efficiency_rate
// ==========================================

use crate::domain::error::{DomainError, DomainResult};
use serde::{Deserialize, Serialize};

fn default_active() -> bool {
    true
}

fn default_efficiency() -> f64 {
    1.0
}

// ==========================================
// ProductionLine - 产线
// ==========================================
// 日产能 <= 0 属于配置错误, 由引擎在计算前拦截 (不视为零产能)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionLine {
    pub id: i64,
    pub line_name: String,

    // ===== 产能参数 =====
    pub working_hours_per_day: f64, // 每日工作小时
    #[serde(default = "default_efficiency")]
    pub efficiency_rate: f64,       // 效率系数

    #[serde(default = "default_active")]
    pub is_active: bool,
}

impl ProductionLine {
    /// 校验并创建产线
    ///
    /// 允许 0 小时/0 效率（由产能计算时报配置错误），
    /// 但拒绝空名称、负数与非有限值。
    pub fn new(
        id: i64,
        line_name: &str,
        working_hours_per_day: f64,
        efficiency_rate: f64,
    ) -> DomainResult<Self> {
        let line = Self {
            id,
            line_name: line_name.trim().to_string(),
            working_hours_per_day,
            efficiency_rate,
            is_active: true,
        };
        line.validate()?;
        Ok(line)
    }

    /// 字段校验 (工厂与快照边界共用)
    pub fn validate(&self) -> DomainResult<()> {
        if self.line_name.trim().is_empty() {
            return Err(DomainError::field("line_name", "产线名称不能为空"));
        }
        check_non_negative("working_hours_per_day", self.working_hours_per_day)?;
        check_non_negative("efficiency_rate", self.efficiency_rate)
    }

    /// 停用产线（返回新副本）
    pub fn deactivated(&self) -> Self {
        Self {
            is_active: false,
            ..self.clone()
        }
    }

    /// 日产能（小时）
    pub fn daily_capacity_hours(&self) -> f64 {
        self.working_hours_per_day * self.efficiency_rate
    }
}

pub(crate) fn check_non_negative(field: &str, value: f64) -> DomainResult<()> {
    if !value.is_finite() {
        return Err(DomainError::field(field, format!("必须为有限数值, 实际 {}", value)));
    }
    if value < 0.0 {
        return Err(DomainError::field(field, format!("不能为负数, 实际 {}", value)));
    }
    Ok(())
}
