// ==========================================
// 末端配送车队仿真 - 仿真参数校验
// ==========================================
// 校验顺序（决定错误信息的确定性）:
// 1. 必填字段  2. 司机数量范围  3. 每日工时范围  4. 开始时间格式
// ==========================================

use crate::domain::simulation::{SimulationParams, ValidatedParams};
use crate::engine::error::ValidationError;
use regex::Regex;
use std::sync::LazyLock;

pub const MIN_AVAILABLE_DRIVERS: i64 = 1;
pub const MAX_AVAILABLE_DRIVERS: i64 = 50;
pub const MIN_HOURS_PER_DAY: i64 = 1;
pub const MAX_HOURS_PER_DAY: i64 = 24;

/// 24 小时制 HH:MM
static START_TIME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([01]\d|2[0-3]):([0-5]\d)$").expect("static regex"));

// ==========================================
// ParameterValidator - 仿真参数校验器
// ==========================================
pub struct ParameterValidator;

impl ParameterValidator {
    /// 校验仿真参数
    ///
    /// # 返回
    /// - Ok(ValidatedParams): 校验通过
    /// - Err(ValidationError): 第一个违反的约束
    pub fn validate(params: &SimulationParams) -> Result<ValidatedParams, ValidationError> {
        let available_drivers = params
            .available_drivers
            .ok_or(ValidationError::MissingField { field: "availableDrivers" })?;
        let start_time = params
            .start_time
            .as_deref()
            .filter(|s| !s.is_empty())
            .ok_or(ValidationError::MissingField { field: "startTime" })?;
        let max_hours_per_day = params
            .max_hours_per_day
            .ok_or(ValidationError::MissingField { field: "maxHoursPerDay" })?;

        if !(MIN_AVAILABLE_DRIVERS..=MAX_AVAILABLE_DRIVERS).contains(&available_drivers) {
            return Err(ValidationError::DriverCountOutOfRange {
                value: available_drivers,
                min: MIN_AVAILABLE_DRIVERS,
                max: MAX_AVAILABLE_DRIVERS,
            });
        }

        if !(MIN_HOURS_PER_DAY..=MAX_HOURS_PER_DAY).contains(&max_hours_per_day) {
            return Err(ValidationError::HoursOutOfRange {
                value: max_hours_per_day,
                min: MIN_HOURS_PER_DAY,
                max: MAX_HOURS_PER_DAY,
            });
        }

        if !Self::is_valid_start_time(start_time) {
            return Err(ValidationError::BadTimeFormat {
                value: start_time.to_string(),
            });
        }

        Ok(ValidatedParams {
            available_drivers: available_drivers as usize,
            start_time: start_time.to_string(),
            max_hours_per_day: max_hours_per_day as u32,
        })
    }

    /// 判断开始时间是否为合法的 HH:MM
    pub fn is_valid_start_time(value: &str) -> bool {
        START_TIME_PATTERN.is_match(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_params() {
        let params = SimulationParams::new(5, "09:30", 8);
        let validated = ParameterValidator::validate(&params).unwrap();
        assert_eq!(validated.available_drivers, 5);
        assert_eq!(validated.start_time, "09:30");
        assert_eq!(validated.max_hours_per_day, 8);
    }

    #[test]
    fn test_missing_field_reported_first() {
        // 缺字段优先于范围错误
        let params = SimulationParams {
            available_drivers: Some(999),
            start_time: None,
            max_hours_per_day: Some(0),
        };
        assert_eq!(
            ParameterValidator::validate(&params),
            Err(ValidationError::MissingField { field: "startTime" })
        );

        let params = SimulationParams::default();
        assert_eq!(
            ParameterValidator::validate(&params),
            Err(ValidationError::MissingField { field: "availableDrivers" })
        );
    }

    #[test]
    fn test_empty_start_time_is_missing() {
        let params = SimulationParams::new(3, "", 8);
        assert_eq!(
            ParameterValidator::validate(&params),
            Err(ValidationError::MissingField { field: "startTime" })
        );
    }

    #[test]
    fn test_driver_count_checked_before_hours_and_time() {
        let params = SimulationParams::new(0, "99:99", 100);
        assert!(matches!(
            ParameterValidator::validate(&params),
            Err(ValidationError::DriverCountOutOfRange { value: 0, .. })
        ));

        let params = SimulationParams::new(51, "09:00", 8);
        assert!(matches!(
            ParameterValidator::validate(&params),
            Err(ValidationError::DriverCountOutOfRange { value: 51, .. })
        ));
    }

    #[test]
    fn test_hours_checked_before_time() {
        let params = SimulationParams::new(1, "bad", 25);
        assert!(matches!(
            ParameterValidator::validate(&params),
            Err(ValidationError::HoursOutOfRange { value: 25, .. })
        ));
    }

    #[test]
    fn test_start_time_format() {
        for ok in ["00:00", "09:05", "19:59", "23:59"] {
            assert!(ParameterValidator::is_valid_start_time(ok), "{}", ok);
        }
        for bad in ["24:00", "9:05", "12:60", "12-30", "12:30:00", " 12:30", "ab:cd"] {
            assert!(!ParameterValidator::is_valid_start_time(bad), "{}", bad);
        }
    }
}
