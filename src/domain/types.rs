// ==========================================
// 产线产能负荷系统 - 领域类型定义
// ==========================================
// 状态/优先级/风险等级均为封闭枚举
// 序列化格式: SCREAMING_SNAKE_CASE (与上游数据一致)
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 工单状态 (Work Order Status)
// ==========================================
// 生命周期: OPEN/BLOCKED_MATERIAL -> RUNNING -> DONE
// BLOCKED / HOLD 由外部设置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WorkOrderStatus {
    Open,            // 待生产
    Running,         // 生产中
    Blocked,         // 阻塞
    BlockedMaterial, // 缺料
    Done,            // 已完工
    Hold,            // 冻结
}

impl fmt::Display for WorkOrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl WorkOrderStatus {
    /// 转换为存储/展示字符串
    pub fn as_str(&self) -> &'static str {
        match self {
            WorkOrderStatus::Open => "OPEN",
            WorkOrderStatus::Running => "RUNNING",
            WorkOrderStatus::Blocked => "BLOCKED",
            WorkOrderStatus::BlockedMaterial => "BLOCKED_MATERIAL",
            WorkOrderStatus::Done => "DONE",
            WorkOrderStatus::Hold => "HOLD",
        }
    }

    /// 是否可报工（DONE / BLOCKED / BLOCKED_MATERIAL / HOLD 不可执行）
    pub fn is_executable(&self) -> bool {
        matches!(self, WorkOrderStatus::Open | WorkOrderStatus::Running)
    }
}

// ==========================================
// 工单优先级 (Priority)
// ==========================================
// 排序秩: HIGH=1 < NORMAL=2 < LOW=3
// 未知优先级一律按 NORMAL 处理（静默降级，不报错）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Priority {
    High,
    Normal,
    Low,
}

impl Default for Priority {
    fn default() -> Self {
        Priority::Normal
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Priority::High => write!(f, "HIGH"),
            Priority::Normal => write!(f, "NORMAL"),
            Priority::Low => write!(f, "LOW"),
        }
    }
}

// 反序列化同样走 from_label，快照中的未知优先级不会导致解析失败
impl<'de> Deserialize<'de> for Priority {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Priority::from_label(&raw))
    }
}

impl Priority {
    /// 从上游文本解析优先级
    ///
    /// 规则: 去空白、忽略大小写; 无法识别的值回退为 NORMAL
    pub fn from_label(s: &str) -> Self {
        match s.trim().to_uppercase().as_str() {
            "HIGH" => Priority::High,
            "LOW" => Priority::Low,
            _ => Priority::Normal,
        }
    }

    /// 排序秩（越小越紧急）
    pub fn rank(&self) -> u8 {
        match self {
            Priority::High => 1,
            Priority::Normal => 2,
            Priority::Low => 3,
        }
    }
}

// ==========================================
// 产线产能风险等级 (Capacity Risk Level)
// ==========================================
// 顺序: Safe < Warning < Critical < Overload
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CapacityRiskLevel {
    Safe,     // 产能健康
    Warning,  // 需关注 (利用率 >= 0.7)
    Critical, // 紧张 (利用率 >= 0.9)
    Overload, // 超负荷 (开放工时 > 净可用工时)
}

impl CapacityRiskLevel {
    /// 英文展示名 (其他语言见 i18n::render_risk_level)
    pub fn label(&self) -> &'static str {
        match self {
            CapacityRiskLevel::Safe => "Safe",
            CapacityRiskLevel::Warning => "Warning",
            CapacityRiskLevel::Critical => "Critical",
            CapacityRiskLevel::Overload => "Overload",
        }
    }
}

impl fmt::Display for CapacityRiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CapacityRiskLevel::Safe => write!(f, "SAFE"),
            CapacityRiskLevel::Warning => write!(f, "WARNING"),
            CapacityRiskLevel::Critical => write!(f, "CRITICAL"),
            CapacityRiskLevel::Overload => write!(f, "OVERLOAD"),
        }
    }
}

// ==========================================
// 单工单风险等级 (Order Risk Level)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderRiskLevel {
    Safe,
    Risk,
    Critical,
}

impl fmt::Display for OrderRiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OrderRiskLevel::Safe => write!(f, "SAFE"),
            OrderRiskLevel::Risk => write!(f, "RISK"),
            OrderRiskLevel::Critical => write!(f, "CRITICAL"),
        }
    }
}

// ==========================================
// 主约束类型 (Constraint Type)
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConstraintType {
    Hold,        // 工单冻结
    Overdue,     // 生产交期已过
    Npi,         // 新产品导入
    Engineering, // 工程暂停
}

impl fmt::Display for ConstraintType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConstraintType::Hold => write!(f, "HOLD"),
            ConstraintType::Overdue => write!(f, "OVERDUE"),
            ConstraintType::Npi => write!(f, "NPI"),
            ConstraintType::Engineering => write!(f, "ENGINEERING"),
        }
    }
}
