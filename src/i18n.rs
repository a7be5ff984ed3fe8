// ==========================================
// 国际化 (i18n) 模块
// ==========================================
// 使用 rust-i18n 库
// 支持英文（默认）和中文
// ==========================================
// 注意: rust_i18n::i18n! 宏已在 lib.rs 中初始化
// 注意: 建议动作的渲染使用显式 locale, 不读写全局语言
// ==========================================

use crate::domain::capacity::RecommendedAction;
use crate::domain::types::CapacityRiskLevel;

/// 获取当前语言
pub fn current_locale() -> String {
    rust_i18n::locale().to_string()
}

/// 设置语言
///
/// # 参数
/// - locale: 语言代码（"en" 或 "zh-CN"）
pub fn set_locale(locale: &str) {
    rust_i18n::set_locale(locale);
}

/// 按指定语言翻译（带参数）
///
/// # 示例
/// ```no_run
/// use line_capacity_aps::i18n::t_in;
/// let msg = t_in("zh-CN", "error.line_not_found", &[("id", "7")]);
/// ```
pub fn t_in(locale: &str, key: &str, args: &[(&str, &str)]) -> String {
    fill_args(rust_i18n::t!(key, locale = locale).to_string(), args)
}

/// 渲染建议动作文本
///
/// # 参数
/// - action: 建议动作
/// - locale: 目标语言
pub fn render_action(action: &RecommendedAction, locale: &str) -> String {
    match action {
        RecommendedAction::AddOvertime {
            hours_per_day,
            forecast_days,
        } => t_in(
            locale,
            action.i18n_key(),
            &[
                ("hours", &hours_per_day.to_string()),
                ("days", &forecast_days.to_string()),
            ],
        ),
        _ => t_in(locale, action.i18n_key(), &[]),
    }
}

/// 渲染产能风险等级
pub fn render_risk_level(level: CapacityRiskLevel, locale: &str) -> String {
    t_in(locale, &format!("capacity.risk.{}", level), &[])
}

fn fill_args(mut result: String, args: &[(&str, &str)]) -> String {
    for (k, v) in args {
        let placeholder = format!("%{{{}}}", k);
        result = result.replace(&placeholder, v);
    }
    result
}
