// ==========================================
// 产线产能负荷系统 - 日志初始化
// ==========================================
// 工具: tracing + tracing-subscriber (EnvFilter)
// 输出: stderr (stdout 保留给 CLI 的 JSON 结果)
// 主要字段: line_id / risk_level / utilization / overload_gap_hours
//           rebalance_line_id / target_line_id / delayed_count
// 配置错误 (日产能 <= 0) 以 warn 级别记录
// ==========================================

use tracing_subscriber::{fmt, EnvFilter};

/// 默认过滤级别 (RUST_LOG 未设置时)
const DEFAULT_LEVEL: &str = "info";

/// CLI 选择 JSON 日志格式的环境变量
pub const LOG_FORMAT_ENV: &str = "LINE_CAPACITY_APS_LOG_FORMAT";

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LEVEL))
}

fn wants_json(format: Option<&str>) -> bool {
    format.map(|v| v.trim().eq_ignore_ascii_case("json")).unwrap_or(false)
}

/// 按环境变量选择日志格式并初始化
///
/// `LINE_CAPACITY_APS_LOG_FORMAT=json` 输出 JSON 行, 否则输出文本
pub fn init_from_env() {
    if wants_json(std::env::var(LOG_FORMAT_ENV).ok().as_deref()) {
        init_json();
    } else {
        init();
    }
}

/// 初始化文本日志
///
/// # 环境变量
/// - RUST_LOG: 日志级别过滤器（默认: info）
///   例如: RUST_LOG=line_capacity_aps::engine=debug
pub fn init() {
    fmt()
        .with_env_filter(env_filter())
        .with_target(true)
        .with_line_number(true)
        .with_writer(std::io::stderr)
        .init();
}

/// 初始化 JSON 行日志 (日志采集使用)
pub fn init_json() {
    fmt()
        .json()
        .with_env_filter(env_filter())
        .with_current_span(true)
        .with_writer(std::io::stderr)
        .init();
}

/// 初始化测试日志 (debug 级别, 重复调用无副作用)
pub fn init_test() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new("debug"))
        .with_test_writer()
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_selection() {
        assert!(wants_json(Some("json")));
        assert!(wants_json(Some(" JSON ")));
        assert!(!wants_json(Some("text")));
        assert!(!wants_json(None));
    }
}
