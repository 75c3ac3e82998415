// ==========================================
// 末端配送车队仿真 - 实体边界校验器
// ==========================================
// 职责: 司机/线路/订单写入前的字段校验
// 规则: 收集全部违规后一次性返回，消息指明字段与约束
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::driver::Driver;
use crate::domain::order::Order;
use crate::domain::route::Route;

/// 单条违规
#[derive(Debug, Clone, PartialEq)]
pub struct FieldViolation {
    pub field: &'static str,
    pub message: String,
}

impl FieldViolation {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

// ==========================================
// EntityValidator
// ==========================================
pub struct EntityValidator;

impl EntityValidator {
    pub fn validate_driver(driver: &Driver) -> ApiResult<()> {
        let mut violations = Vec::new();
        check_id(&mut violations, "driver_id", &driver.driver_id);
        if driver.name.trim().is_empty() {
            violations.push(FieldViolation::new("name", "不能为空"));
        }
        check_non_negative(&mut violations, "current_shift_hours", driver.current_shift_hours);
        check_non_negative(&mut violations, "past_7_day_work_hours", driver.past_7_day_work_hours);
        into_result("司机", violations)
    }

    pub fn validate_route(route: &Route) -> ApiResult<()> {
        let mut violations = Vec::new();
        check_id(&mut violations, "route_id", &route.route_id);
        check_positive(&mut violations, "distance_km", route.distance_km);
        check_positive(&mut violations, "base_time_min", route.base_time_min);
        into_result("线路", violations)
    }

    pub fn validate_order(order: &Order) -> ApiResult<()> {
        let mut violations = Vec::new();
        check_id(&mut violations, "order_id", &order.order_id);
        check_id(&mut violations, "route_id", &order.route_id);
        check_positive(&mut violations, "value_rs", order.value_rs);
        into_result("订单", violations)
    }
}

fn check_id(violations: &mut Vec<FieldViolation>, field: &'static str, value: &str) {
    if value.trim().is_empty() {
        violations.push(FieldViolation::new(field, "不能为空"));
    }
}

fn check_non_negative(violations: &mut Vec<FieldViolation>, field: &'static str, value: f64) {
    if !value.is_finite() || value < 0.0 {
        violations.push(FieldViolation::new(field, format!("必须为非负数（实际: {}）", value)));
    }
}

fn check_positive(violations: &mut Vec<FieldViolation>, field: &'static str, value: f64) {
    if !value.is_finite() || value <= 0.0 {
        violations.push(FieldViolation::new(field, format!("必须大于 0（实际: {}）", value)));
    }
}

fn into_result(entity: &str, violations: Vec<FieldViolation>) -> ApiResult<()> {
    if violations.is_empty() {
        return Ok(());
    }

    let detail = violations
        .iter()
        .map(|v| format!("{} {}", v.field, v.message))
        .collect::<Vec<_>>()
        .join("; ");
    Err(ApiError::InvalidInput(format!("{}数据校验失败: {}", entity, detail)))
}
