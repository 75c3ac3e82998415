// ==========================================
// 末端配送车队仿真 - 仿真 API
// ==========================================
// 职责: 运行仿真并记录历史、查询历史运行
// 流程: 鉴权 -> 参数校验 -> 读取规则 -> 加载快照 -> 引擎计算 -> 追加历史
// 红线: 参数校验失败或司机不足时不写历史
// ==========================================

use std::sync::Arc;

use chrono::Local;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::api::auth_api::AuthenticatedManager;
use crate::api::error::{ApiError, ApiResult};
use crate::config::SimulationRulesReader;
use crate::domain::simulation::{
    DeliveryBreakdown, FuelCostBreakdown, SimulationParams, SimulationResults, SimulationRun,
};
use crate::engine::{ParameterValidator, SimulationEngine};
use crate::repository::fleet_snapshot_repo::FleetSnapshotRepository;
use crate::repository::simulation_run_repo::SimulationRunRepository;

/// 历史查询条数上限
pub const MAX_HISTORY_LIMIT: usize = 100;

/// 运行仿真请求（字段缺失由校验阶段报告）
pub type RunSimulationRequest = SimulationParams;

// ==========================================
// SimulationResponse - 仿真响应
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResponse {
    pub results: SimulationResults,
    pub delivery_breakdown: DeliveryBreakdown,
    pub fuel_cost_breakdown: FuelCostBreakdown,
    pub simulation_id: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub skipped_order_ids: Vec<String>,
}

// ==========================================
// SimulationApi
// ==========================================
pub struct SimulationApi {
    snapshot_repo: Arc<FleetSnapshotRepository>,
    run_repo: Arc<SimulationRunRepository>,
    rules_reader: Arc<dyn SimulationRulesReader>,
}

impl SimulationApi {
    pub fn new(
        snapshot_repo: Arc<FleetSnapshotRepository>,
        run_repo: Arc<SimulationRunRepository>,
        rules_reader: Arc<dyn SimulationRulesReader>,
    ) -> Self {
        Self {
            snapshot_repo,
            run_repo,
            rules_reader,
        }
    }

    /// 运行一次仿真并写入历史
    ///
    /// # 错误
    /// - ValidationError (400): 参数缺失/越界/格式错误
    /// - InsufficientDrivers (400): 名册人数少于请求人数
    /// - ConfigError (500): 规则读取失败
    #[instrument(skip(self, caller, request), fields(manager = %caller.username()))]
    pub async fn run_simulation(
        &self,
        caller: &AuthenticatedManager,
        request: RunSimulationRequest,
    ) -> ApiResult<SimulationResponse> {
        // 先校验，失败时不读取任何数据
        ParameterValidator::validate(&request).map_err(|e| ApiError::ValidationError(e.to_string()))?;

        let rules = self
            .rules_reader
            .load_simulation_rules()
            .await
            .map_err(|e| ApiError::ConfigError(e.to_string()))?;

        let fleet = self.snapshot_repo.load()?;

        let outcome = SimulationEngine::new(rules).run(
            &request,
            &fleet.drivers,
            &fleet.routes,
            &fleet.orders,
        )?;

        let run = SimulationRun::from_outcome(
            &outcome,
            Local::now().naive_local(),
            Some(caller.username().to_string()),
        );
        let simulation_id = self.run_repo.insert(&run)?;

        info!(
            simulation_id = %simulation_id,
            total_profit = outcome.results.total_profit,
            efficiency = outcome.results.efficiency_score,
            skipped = outcome.skipped_order_ids.len(),
            "仿真运行已记录"
        );

        Ok(SimulationResponse {
            results: outcome.results,
            delivery_breakdown: outcome.delivery_breakdown,
            fuel_cost_breakdown: outcome.fuel_cost_breakdown,
            simulation_id,
            skipped_order_ids: outcome.skipped_order_ids,
        })
    }

    /// 最近一次运行（无历史时返回 None）
    pub fn get_latest_run(&self, _caller: &AuthenticatedManager) -> ApiResult<Option<SimulationRun>> {
        Ok(self.run_repo.find_latest()?)
    }

    /// 最近 N 次运行，按创建时间倒序
    pub fn list_recent_runs(
        &self,
        _caller: &AuthenticatedManager,
        limit: usize,
    ) -> ApiResult<Vec<SimulationRun>> {
        if limit == 0 || limit > MAX_HISTORY_LIMIT {
            return Err(ApiError::InvalidInput(format!(
                "limit 必须在 1 到 {} 之间（实际: {}）",
                MAX_HISTORY_LIMIT, limit
            )));
        }
        Ok(self.run_repo.list_recent(limit)?)
    }

    pub fn get_run(&self, _caller: &AuthenticatedManager, simulation_id: &str) -> ApiResult<SimulationRun> {
        if simulation_id.trim().is_empty() {
            return Err(ApiError::InvalidInput("simulation_id不能为空".to_string()));
        }
        self.run_repo
            .find_by_id(simulation_id)?
            .ok_or_else(|| ApiError::NotFound(format!("仿真运行(id={})不存在", simulation_id)))
    }
}
