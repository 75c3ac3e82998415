// ==========================================
// 末端配送车队仿真 - 线路领域模型
// ==========================================

use crate::domain::types::TrafficLevel;
use serde::{Deserialize, Serialize};

// ==========================================
// Route - 配送线路
// ==========================================
// 仿真期间只读
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Route {
    pub route_id: String,            // 线路ID (唯一)
    pub distance_km: f64,            // 距离 (km, >0)
    pub traffic_level: TrafficLevel, // 路况等级
    pub base_time_min: f64,          // 标准配送时长 (分钟, >0)
}

impl Route {
    pub fn new(
        route_id: impl Into<String>,
        distance_km: f64,
        traffic_level: TrafficLevel,
        base_time_min: f64,
    ) -> Self {
        Self {
            route_id: route_id.into(),
            distance_km,
            traffic_level,
            base_time_min,
        }
    }
}
