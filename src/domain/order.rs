// ==========================================
// 末端配送车队仿真 - 订单领域模型
// ==========================================
// 红线: 仿真计算字段只存在于 OrderOutcome 投影中,
//       Order 本体不被仿真修改
// ==========================================

use serde::{Deserialize, Serialize};

// ==========================================
// Order - 配送订单
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: String,           // 订单ID (唯一)
    pub value_rs: f64,              // 订单金额 (>0)
    pub route_id: String,           // 关联线路 (可能悬空)
    pub delivery_timestamp: String, // 计划送达时间 (原样透传,不参与计算)
}

impl Order {
    pub fn new(
        order_id: impl Into<String>,
        value_rs: f64,
        route_id: impl Into<String>,
        delivery_timestamp: impl Into<String>,
    ) -> Self {
        Self {
            order_id: order_id.into(),
            value_rs,
            route_id: route_id.into(),
            delivery_timestamp: delivery_timestamp.into(),
        }
    }
}
