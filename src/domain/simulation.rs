// ==========================================
// 末端配送车队仿真 - 仿真运行领域模型
// ==========================================
// 职责: 仿真请求参数、单订单结果投影、汇总结果、历史运行记录
// 序列化: camelCase (与对外接口字段一致)
// ==========================================

use crate::domain::types::TrafficLevel;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ==========================================
// SimulationParams - 仿真请求参数（未校验）
// ==========================================
// 字段均为 Option: 缺失字段由引擎校验阶段报告
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationParams {
    pub available_drivers: Option<i64>,
    pub start_time: Option<String>,
    pub max_hours_per_day: Option<i64>,
}

impl SimulationParams {
    pub fn new(available_drivers: i64, start_time: impl Into<String>, max_hours_per_day: i64) -> Self {
        Self {
            available_drivers: Some(available_drivers),
            start_time: Some(start_time.into()),
            max_hours_per_day: Some(max_hours_per_day),
        }
    }
}

// ==========================================
// ValidatedParams - 校验通过的仿真参数
// ==========================================
// start_time / max_hours_per_day 只校验与留档,不参与计算
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidatedParams {
    pub available_drivers: usize,
    pub start_time: String,
    pub max_hours_per_day: u32,
}

// ==========================================
// OrderOutcome - 单订单仿真结果投影
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderOutcome {
    pub order_id: String,
    pub route_id: String,
    pub assigned_driver_id: String,
    pub driver_fatigued: bool,
    pub traffic_level: TrafficLevel,
    pub actual_delivery_time: i64, // 分钟
    pub is_on_time: bool,
    pub penalty: i64,
    pub bonus: f64,
    pub fuel_cost: f64,
    pub profit: f64, // value + bonus - penalty - fuel
    pub delivery_timestamp: String,
}

// ==========================================
// SimulationResults - 汇总结果
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResults {
    pub total_profit: i64,
    pub efficiency_score: f64, // 百分比,保留两位小数
    pub on_time_deliveries: usize,
    pub total_deliveries: usize, // 含线路悬空被跳过的订单
    pub fuel_cost: i64,
    pub penalties: i64,
    pub bonuses: i64,
}

// ==========================================
// DeliveryBreakdown - 准时/延误分布
// ==========================================
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeliveryBreakdown {
    pub on_time: usize,
    pub late: usize,
}

// ==========================================
// FuelCostBreakdown - 按路况分档的燃油成本
// ==========================================
// 三档始终输出,即使为 0
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FuelCostBreakdown {
    #[serde(rename = "Low")]
    pub low: i64,
    #[serde(rename = "Medium")]
    pub medium: i64,
    #[serde(rename = "High")]
    pub high: i64,
}

impl FuelCostBreakdown {
    pub fn total(&self) -> i64 {
        self.low + self.medium + self.high
    }
}

// ==========================================
// SimulationOutcome - 引擎输出
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationOutcome {
    pub params: ValidatedParams,
    pub results: SimulationResults,
    pub delivery_breakdown: DeliveryBreakdown,
    pub fuel_cost_breakdown: FuelCostBreakdown,
    pub order_outcomes: Vec<OrderOutcome>,
    pub skipped_order_ids: Vec<String>, // 线路悬空被跳过的订单
}

// ==========================================
// SimulationRun - 历史运行记录
// ==========================================
// 创建后不可变,由历史仓储追加写入
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationRun {
    pub simulation_id: String,
    pub created_at: NaiveDateTime,
    pub created_by: Option<String>,
    pub available_drivers: usize,
    pub start_time: String,
    pub max_hours_per_day: u32,
    pub results: SimulationResults,
    pub delivery_breakdown: DeliveryBreakdown,
    pub fuel_cost_breakdown: FuelCostBreakdown,
}

impl SimulationRun {
    /// 由引擎输出生成运行记录（新分配 simulation_id）
    pub fn from_outcome(
        outcome: &SimulationOutcome,
        created_at: NaiveDateTime,
        created_by: Option<String>,
    ) -> Self {
        Self {
            simulation_id: uuid::Uuid::new_v4().to_string(),
            created_at,
            created_by,
            available_drivers: outcome.params.available_drivers,
            start_time: outcome.params.start_time.clone(),
            max_hours_per_day: outcome.params.max_hours_per_day,
            results: outcome.results.clone(),
            delivery_breakdown: outcome.delivery_breakdown,
            fuel_cost_breakdown: outcome.fuel_cost_breakdown,
        }
    }
}
