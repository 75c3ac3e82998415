// ==========================================
// 末端配送车队仿真 - Simulation Core 纯函数库
// ==========================================
// 职责: 疲劳、送达时长、延误、奖励、燃油、效率的计算规则
// 红线: 无状态、无副作用、无 I/O 操作
// ==========================================

use crate::config::SimulationRules;
use crate::domain::types::TrafficLevel;

// ==========================================
// SimulationCore - 纯函数工具类
// ==========================================
pub struct SimulationCore;

impl SimulationCore {
    /// 四舍五入到整数（.5 向上取整）
    pub fn round_half_up(value: f64) -> f64 {
        (value + 0.5).floor()
    }

    /// 四舍五入到两位小数
    pub fn round_to_2(value: f64) -> f64 {
        Self::round_half_up(value * 100.0) / 100.0
    }

    /// 疲劳判定: 当班小时数严格大于阈值
    pub fn is_fatigued(current_shift_hours: f64, rules: &SimulationRules) -> bool {
        current_shift_hours > rules.fatigue_threshold_hours
    }

    /// 实际送达时长（分钟）
    ///
    /// # 规则
    /// - 疲劳: round(base_time × 1.3)
    /// - 非疲劳: round(base_time)
    pub fn actual_delivery_time(base_time_min: f64, fatigued: bool, rules: &SimulationRules) -> i64 {
        let minutes = if fatigued {
            base_time_min * rules.fatigue_time_multiplier
        } else {
            base_time_min
        };
        Self::round_half_up(minutes) as i64
    }

    /// 延误判定: 实际时长 > 标准时长 + 宽限
    pub fn is_late(actual_delivery_time: i64, base_time_min: f64, rules: &SimulationRules) -> bool {
        (actual_delivery_time as f64) > base_time_min + rules.late_grace_minutes as f64
    }

    /// 准时订单的高价值奖励（延误订单不调用）
    pub fn on_time_bonus(value_rs: f64, rules: &SimulationRules) -> f64 {
        if value_rs > rules.bonus_value_threshold {
            value_rs * rules.bonus_rate
        } else {
            0.0
        }
    }

    /// 燃油成本: 基础费率 × 距离，拥堵路况另加附加费
    pub fn fuel_cost(distance_km: f64, traffic_level: TrafficLevel, rules: &SimulationRules) -> f64 {
        let base = rules.base_fuel_rate_per_km * distance_km;
        match traffic_level {
            TrafficLevel::High => base + rules.high_traffic_surcharge_per_km * distance_km,
            TrafficLevel::Medium | TrafficLevel::Low => base,
        }
    }

    /// 效率得分: 准时率 × 100，保留两位小数；无订单时为 0
    pub fn efficiency_score(on_time: usize, total: usize) -> f64 {
        if total == 0 {
            return 0.0;
        }
        Self::round_to_2(on_time as f64 / total as f64 * 100.0)
    }
}
