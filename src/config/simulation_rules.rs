// ==========================================
// 末端配送车队仿真 - 仿真规则参数
// ==========================================
// 默认值即业务基线: 疲劳>8h ×1.3、宽限10分钟、延误罚金50、
// 金额>1000 奖励10%、燃油 5/km、拥堵附加 2/km
// ==========================================

use serde::{Deserialize, Serialize};

/// 仿真规则参数
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationRules {
    /// 疲劳阈值（当班小时数严格大于该值）
    pub fatigue_threshold_hours: f64,
    /// 疲劳时长系数
    pub fatigue_time_multiplier: f64,
    /// 延误宽限（分钟）
    pub late_grace_minutes: i64,
    /// 延误罚金（固定）
    pub late_penalty: i64,
    /// 高价值订单金额阈值（严格大于）
    pub bonus_value_threshold: f64,
    /// 高价值准时奖励比例
    pub bonus_rate: f64,
    /// 基础燃油费（每公里）
    pub base_fuel_rate_per_km: f64,
    /// 拥堵路况燃油附加费（每公里）
    pub high_traffic_surcharge_per_km: f64,
}

impl Default for SimulationRules {
    fn default() -> Self {
        Self {
            fatigue_threshold_hours: 8.0,
            fatigue_time_multiplier: 1.3,
            late_grace_minutes: 10,
            late_penalty: 50,
            bonus_value_threshold: 1000.0,
            bonus_rate: 0.10,
            base_fuel_rate_per_km: 5.0,
            high_traffic_surcharge_per_km: 2.0,
        }
    }
}
