// ==========================================
// 产线产能负荷系统 - 命令行入口
// ==========================================
// 用法:
//   line-capacity-aps <snapshot.json> [report]
//   line-capacity-aps <snapshot.json> capacity <line_id> [forecast_days]
//   line-capacity-aps <snapshot.json> simulation <line_id>
//   line-capacity-aps <snapshot.json> risk [work_order_no]
//
// 输出: stdout 为格式化 JSON; 日志写 stderr
// 失败: 输出 {"error": "..."} 并以退出码 1 结束
// ==========================================

use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{anyhow, bail, Context};
use line_capacity_aps::api::{ApiError, ErrorBody, LineApi};
use line_capacity_aps::config::AppConfig;
use line_capacity_aps::domain::PlantSnapshot;
use line_capacity_aps::{i18n, logging};

/// 子命令
#[derive(Debug)]
enum Command {
    Report,
    Capacity {
        line_id: i64,
        forecast_days: Option<u32>,
    },
    Simulation {
        line_id: i64,
    },
    Risk {
        work_order_no: Option<String>,
    },
}

#[derive(Debug)]
struct CliArgs {
    snapshot_path: PathBuf,
    command: Command,
}

fn parse_args<I: Iterator<Item = String>>(mut args: I) -> anyhow::Result<CliArgs> {
    let snapshot_path = args
        .next()
        .map(PathBuf::from)
        .ok_or_else(|| anyhow!("缺少快照文件路径: line-capacity-aps <snapshot.json> [command]"))?;

    let command = match args.next().as_deref() {
        None | Some("report") => Command::Report,
        Some("capacity") => {
            let line_id = parse_line_id(args.next())?;
            let forecast_days = args
                .next()
                .map(|raw| {
                    raw.trim()
                        .parse::<u32>()
                        .with_context(|| format!("预测窗口无效: {}", raw))
                })
                .transpose()?;
            Command::Capacity {
                line_id,
                forecast_days,
            }
        }
        Some("simulation") => Command::Simulation {
            line_id: parse_line_id(args.next())?,
        },
        Some("risk") => Command::Risk {
            work_order_no: args.next(),
        },
        Some(other) => bail!("未知命令: {}", other),
    };

    Ok(CliArgs {
        snapshot_path,
        command,
    })
}

fn parse_line_id(raw: Option<String>) -> anyhow::Result<i64> {
    let raw = raw.ok_or_else(|| anyhow!("缺少产线ID"))?;
    raw.trim()
        .parse::<i64>()
        .with_context(|| format!("产线ID无效: {}", raw))
}

fn load_snapshot(path: &Path) -> anyhow::Result<PlantSnapshot> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("快照文件读取失败: {}", path.display()))?;
    PlantSnapshot::from_json(&raw)
        .with_context(|| format!("快照文件解析失败: {}", path.display()))
}

async fn run(cli: CliArgs) -> anyhow::Result<serde_json::Value> {
    let config = AppConfig::load()?;
    i18n::set_locale(&config.locale);

    let snapshot = Arc::new(load_snapshot(&cli.snapshot_path)?);
    tracing::info!(
        lines = snapshot.lines.len(),
        work_orders = snapshot.work_orders.len(),
        events = snapshot.events.len(),
        "快照加载完成"
    );

    let api = LineApi::new(snapshot, config)?;

    let value = match cli.command {
        Command::Report => serde_json::to_value(api.plant_report().await)?,
        Command::Capacity {
            line_id,
            forecast_days,
        } => serde_json::to_value(api.line_capacity(line_id, forecast_days)?)?,
        Command::Simulation { line_id } => serde_json::to_value(api.line_simulation(line_id)?)?,
        Command::Risk {
            work_order_no: Some(no),
        } => serde_json::to_value(api.work_order_risk(&no)?)?,
        Command::Risk {
            work_order_no: None,
        } => serde_json::to_value(api.all_work_order_risks())?,
    };
    Ok(value)
}

fn error_body(err: &anyhow::Error, locale: &str) -> ErrorBody {
    match err.downcast_ref::<ApiError>() {
        Some(api_err) => ErrorBody::localized(api_err, locale),
        None => ErrorBody {
            error: format!("{:#}", err),
        },
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    logging::init_from_env();

    tracing::debug!("{} v{}", line_capacity_aps::APP_NAME, line_capacity_aps::VERSION);

    let result = match parse_args(std::env::args().skip(1)) {
        Ok(cli) => run(cli).await,
        Err(e) => Err(e),
    };

    match result {
        Ok(value) => match serde_json::to_string_pretty(&value) {
            Ok(text) => {
                println!("{}", text);
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("{}", e);
                ExitCode::FAILURE
            }
        },
        Err(e) => {
            tracing::error!(error = %format!("{:#}", e), "执行失败");
            let body = error_body(&e, &i18n::current_locale());
            match serde_json::to_string(&body) {
                Ok(text) => println!("{}", text),
                Err(_) => println!("{{\"error\": \"{}\"}}", body.error),
            }
            ExitCode::FAILURE
        }
    }
}
