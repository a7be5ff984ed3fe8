// ==========================================
// 产线产能负荷系统 - 配置管理器
// ==========================================
// 职责: 配置加载、环境变量覆写、校验
// 存储: JSON 文件 (缺失时全部使用默认值)
// 优先级: 环境变量 > 配置文件 > 默认值
// 说明: 风险阈值 (0.9 / 0.7) 为固定策略, 不在配置项中
// ==========================================

use crate::engine::capacity::DEFAULT_FORECAST_DAYS;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

// ==========================================
// 配置键 (环境变量)
// ==========================================
pub mod config_keys {
    /// 配置文件路径
    pub const CONFIG_PATH: &str = "LINE_CAPACITY_APS_CONFIG";
    /// 默认预测窗口 (天)
    pub const FORECAST_DAYS: &str = "LINE_CAPACITY_APS_FORECAST_DAYS";
    /// 输出语言
    pub const LOCALE: &str = "LINE_CAPACITY_APS_LOCALE";
}

/// 支持的语言
pub const SUPPORTED_LOCALES: &[&str] = &["en", "zh-CN"];

/// 配置错误类型
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("配置文件读取失败 ({path}): {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("配置文件解析失败 ({path}): {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("配置项无效 (key={key}): {message}")]
    Invalid { key: String, message: String },
}

fn default_forecast_days() -> u32 {
    DEFAULT_FORECAST_DAYS
}

fn default_locale() -> String {
    "en".to_string()
}

// ==========================================
// AppConfig - 应用配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// 默认预测窗口 (>= 1)
    #[serde(default = "default_forecast_days")]
    pub default_forecast_days: u32,

    /// 输出语言 (en / zh-CN)
    #[serde(default = "default_locale")]
    pub locale: String,

    /// 固定"今天" (复现历史计算用); None 表示取本地当前日期
    #[serde(default)]
    pub as_of_date: Option<NaiveDate>,

    /// 全厂报告是否包含停用产线
    #[serde(default)]
    pub include_inactive_lines: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_forecast_days: default_forecast_days(),
            locale: default_locale(),
            as_of_date: None,
            include_inactive_lines: false,
        }
    }
}

impl AppConfig {
    /// 按默认路径加载配置, 应用环境变量覆写并校验
    pub fn load() -> Result<Self, ConfigError> {
        let path = default_config_path();
        tracing::debug!(path = %path.display(), "加载配置文件");

        Self::load_from_path(&path)?
            .apply_overrides(|key| std::env::var(key).ok())
            .and_then(|config| {
                config.validate()?;
                Ok(config)
            })
    }

    /// 从指定文件加载配置
    ///
    /// 文件不存在时返回默认配置
    pub fn load_from_path(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            tracing::info!(path = %path.display(), "配置文件不存在, 使用默认配置");
            return Ok(Self::default());
        }

        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;

        serde_json::from_str(&raw).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// 应用覆写
    ///
    /// # 参数
    /// - `lookup`: 键 -> 值 (生产环境为环境变量)
    pub fn apply_overrides<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(raw) = lookup(config_keys::FORECAST_DAYS) {
            let trimmed = raw.trim();
            if !trimmed.is_empty() {
                self.default_forecast_days =
                    trimmed.parse::<u32>().map_err(|e| ConfigError::Invalid {
                        key: config_keys::FORECAST_DAYS.to_string(),
                        message: format!("{}: {}", trimmed, e),
                    })?;
            }
        }

        if let Some(raw) = lookup(config_keys::LOCALE) {
            let trimmed = raw.trim();
            if !trimmed.is_empty() {
                self.locale = trimmed.to_string();
            }
        }

        Ok(self)
    }

    /// 校验配置
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_forecast_days == 0 {
            return Err(ConfigError::Invalid {
                key: "default_forecast_days".to_string(),
                message: "预测窗口必须 >= 1".to_string(),
            });
        }
        if !SUPPORTED_LOCALES.contains(&self.locale.as_str()) {
            return Err(ConfigError::Invalid {
                key: "locale".to_string(),
                message: format!("不支持的语言: {}", self.locale),
            });
        }
        Ok(())
    }

    /// 计算基准日期
    pub fn today(&self) -> NaiveDate {
        self.as_of_date
            .unwrap_or_else(|| Local::now().date_naive())
    }
}

/// 默认配置文件路径
///
/// 1) 环境变量 LINE_CAPACITY_APS_CONFIG
/// 2) 用户配置目录/line-capacity-aps/config.json
/// 3) ./line_capacity_aps.json
pub fn default_config_path() -> PathBuf {
    if let Ok(path) = std::env::var(config_keys::CONFIG_PATH) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return PathBuf::from(trimmed);
        }
    }

    match dirs::config_dir() {
        Some(dir) => dir.join("line-capacity-aps").join("config.json"),
        None => PathBuf::from("./line_capacity_aps.json"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.default_forecast_days, 5);
        assert_eq!(config.locale, "en");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::default()
            .apply_overrides(lookup(&[
                (config_keys::FORECAST_DAYS, " 7 "),
                (config_keys::LOCALE, "zh-CN"),
            ]))
            .unwrap();
        assert_eq!(config.default_forecast_days, 7);
        assert_eq!(config.locale, "zh-CN");
    }

    #[test]
    fn test_invalid_override() {
        let err = AppConfig::default()
            .apply_overrides(lookup(&[(config_keys::FORECAST_DAYS, "five")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }

    #[test]
    fn test_validate_rejects_zero_days_and_unknown_locale() {
        let mut config = AppConfig::default();
        config.default_forecast_days = 0;
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.locale = "fr".to_string();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_today_uses_as_of_date() {
        let mut config = AppConfig::default();
        let fixed = NaiveDate::from_ymd_opt(2026, 1, 5).unwrap();
        config.as_of_date = Some(fixed);
        assert_eq!(config.today(), fixed);
    }
}
