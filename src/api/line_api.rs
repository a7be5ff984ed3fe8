// ==========================================
// 产线产能负荷系统 - 产线 API
// ==========================================
// 职责: 产能汇总 / 排程模拟 / 工单风险 / 全厂报告 查询入口
// 说明: 只读快照, 每次调用独立计算, 不缓存结果
// 说明: 自动平衡名册 = 快照内启用产线 + 全部工单
// ==========================================

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::api::error::{ApiError, ApiResult, Entity};
use crate::config::AppConfig;
use crate::domain::capacity::CapacitySummary;
use crate::domain::risk::RiskClassification;
use crate::domain::simulation::SimulationEntry;
use crate::domain::snapshot::PlantSnapshot;
use crate::engine::plant::{LineCapacityOutcome, PlantCapacityReport, PlantCapacityService};
use crate::engine::risk::WorkOrderRiskClassifier;
use crate::engine::simulation::LineOrderSimulator;
use crate::i18n;

/// 工单风险查询结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkOrderRiskView {
    pub work_order_no: String,
    pub production_line_id: i64,
    #[serde(flatten)]
    pub classification: RiskClassification,
}

// ==========================================
// LineApi - 产线 API
// ==========================================
pub struct LineApi {
    snapshot: Arc<PlantSnapshot>,
    config: AppConfig,
    plant_service: Arc<PlantCapacityService>,
    simulator: LineOrderSimulator,
    classifier: WorkOrderRiskClassifier,
}

impl LineApi {
    /// 创建新的LineApi实例
    ///
    /// 快照在此做边界校验 (与实体工厂相同的字段规则), 校验失败不创建实例
    ///
    /// # 参数
    /// - snapshot: 全厂快照
    /// - config: 应用配置 (预测窗口 / 语言 / 基准日期)
    ///
    /// # 返回
    /// - Err(Engine(Domain(FieldValueError))): 快照含非法记录
    pub fn new(snapshot: Arc<PlantSnapshot>, config: AppConfig) -> ApiResult<Self> {
        snapshot.validate()?;

        Ok(Self {
            snapshot,
            config,
            plant_service: Arc::new(PlantCapacityService::new()),
            simulator: LineOrderSimulator::new(),
            classifier: WorkOrderRiskClassifier::new(),
        })
    }

    pub fn config(&self) -> &AppConfig {
        &self.config
    }

    // ==========================================
    // 查询接口
    // ==========================================

    /// 单产线产能汇总
    ///
    /// # 参数
    /// - line_id: 产线ID
    /// - forecast_days: 预测窗口, None 时取配置默认值
    ///
    /// # 返回
    /// - Ok(CapacitySummary): recommended_action 已按配置语言渲染
    /// - Err(NotFound / InvalidInput / Engine)
    #[instrument(skip(self))]
    pub fn line_capacity(
        &self,
        line_id: i64,
        forecast_days: Option<u32>,
    ) -> ApiResult<CapacitySummary> {
        let days = forecast_days.unwrap_or(self.config.default_forecast_days);
        if days == 0 {
            return Err(ApiError::InvalidInput("预测窗口必须 >= 1".to_string()));
        }

        let summary = self
            .plant_service
            .compute_line(&self.snapshot, line_id, days)
            .ok_or_else(|| ApiError::not_found(Entity::ProductionLine, line_id))??;

        Ok(self.localize(summary))
    }

    /// 单产线排程模拟
    #[instrument(skip(self))]
    pub fn line_simulation(&self, line_id: i64) -> ApiResult<Vec<SimulationEntry>> {
        let scope = self
            .snapshot
            .line_scope(line_id)
            .ok_or_else(|| ApiError::not_found(Entity::ProductionLine, line_id))?;

        let entries = self.simulator.simulate(
            &scope.line,
            &scope.work_orders,
            &scope.unresolved_events,
            self.config.today(),
        )?;
        Ok(entries)
    }

    /// 工单风险分级
    #[instrument(skip(self))]
    pub fn work_order_risk(&self, work_order_no: &str) -> ApiResult<WorkOrderRiskView> {
        let work_order_no = work_order_no.trim();
        if work_order_no.is_empty() {
            return Err(ApiError::InvalidInput("工单号不能为空".to_string()));
        }

        let wo = self
            .snapshot
            .find_work_order(work_order_no)
            .ok_or_else(|| ApiError::not_found(Entity::WorkOrder, work_order_no))?;

        Ok(WorkOrderRiskView {
            work_order_no: wo.work_order_no.clone(),
            production_line_id: wo.production_line_id,
            classification: self.classifier.classify(wo, self.config.today()),
        })
    }

    /// 快照内全部工单的风险分级 (保持快照顺序)
    pub fn all_work_order_risks(&self) -> Vec<WorkOrderRiskView> {
        self.classifier
            .classify_all(&self.snapshot.work_orders, self.config.today())
            .into_iter()
            .map(|(wo, classification)| WorkOrderRiskView {
                work_order_no: wo.work_order_no.clone(),
                production_line_id: wo.production_line_id,
                classification,
            })
            .collect()
    }

    /// 全厂产能报告 (各产线并发计算)
    pub async fn plant_report(&self) -> PlantCapacityReport {
        let mut report = Arc::clone(&self.plant_service)
            .report_concurrent(
                Arc::clone(&self.snapshot),
                self.config.default_forecast_days,
                self.config.include_inactive_lines,
                self.config.today(),
            )
            .await;

        report.lines = report
            .lines
            .into_iter()
            .map(|outcome| match outcome {
                LineCapacityOutcome::Computed(summary) => {
                    LineCapacityOutcome::Computed(self.localize(summary))
                }
                failed => failed,
            })
            .collect();

        info!(
            report_id = %report.report_id,
            lines_count = report.lines.len(),
            "全厂产能报告完成"
        );
        report
    }

    // ==========================================
    // 内部辅助
    // ==========================================

    fn localize(&self, mut summary: CapacitySummary) -> CapacitySummary {
        summary.recommended_action = i18n::render_action(&summary.action, &self.config.locale);
        summary.risk_label = i18n::render_risk_level(summary.risk_level, &self.config.locale);
        summary
    }
}
