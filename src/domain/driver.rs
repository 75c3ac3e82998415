// ==========================================
// 末端配送车队仿真 - 司机领域模型
// ==========================================
// 红线: 疲劳标记是单次仿真内的派生值,不落库,
//       由引擎按 SimulationRules 阈值计算
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// Driver - 司机
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Driver {
    pub driver_id: String,          // 司机ID
    pub name: String,               // 姓名
    pub current_shift_hours: f64,   // 当班已工作小时数 (>=0)
    pub past_7_day_work_hours: f64, // 近7日累计工时 (>=0, 仅展示)
}

impl Driver {
    pub fn new(
        driver_id: impl Into<String>,
        name: impl Into<String>,
        current_shift_hours: f64,
        past_7_day_work_hours: f64,
    ) -> Self {
        Self {
            driver_id: driver_id.into(),
            name: name.into(),
            current_shift_hours,
            past_7_day_work_hours,
        }
    }
}
