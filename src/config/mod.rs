// ==========================================
// 产线产能负荷系统 - 配置层
// ==========================================
// 职责: 系统配置管理, 支持文件 + 环境变量覆写
// ==========================================

pub mod config_manager;

// 重导出核心配置
pub use config_manager::{
    config_keys, default_config_path, AppConfig, ConfigError, SUPPORTED_LOCALES,
};
