// ==========================================
// 末端配送车队仿真 - 引擎错误类型
// ==========================================
// 工具: thiserror 派生宏
// 红线: 所有错误均为纯值返回，不重试、不部分写入
// ==========================================

use thiserror::Error;

/// 参数校验错误（访问任何数据之前检出）
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("缺少必填参数: {field}")]
    MissingField { field: &'static str },

    #[error("availableDrivers 必须在 {min} 到 {max} 之间（实际: {value}）")]
    DriverCountOutOfRange { value: i64, min: i64, max: i64 },

    #[error("maxHoursPerDay 必须在 {min} 到 {max} 之间（实际: {value}）")]
    HoursOutOfRange { value: i64, min: i64, max: i64 },

    #[error("startTime 格式错误，应为 24 小时制 HH:MM（实际: {value}）")]
    BadTimeFormat { value: String },
}

/// 仿真错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SimulationError {
    #[error("参数校验失败: {0}")]
    Validation(#[from] ValidationError),

    #[error("可用司机不足: 找到 {found} 名，请求 {requested} 名")]
    InsufficientDrivers { found: usize, requested: usize },
}

/// Result 类型别名
pub type SimulationResult<T> = Result<T, SimulationError>;
