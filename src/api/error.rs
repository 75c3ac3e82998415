// ==========================================
// 末端配送车队仿真 - API层错误类型
// ==========================================
// 职责: 定义API层错误类型，将引擎/仓储/导入错误转换为用户可读的错误消息
// ==========================================

use crate::engine::error::SimulationError;
use crate::importer::error::ImportError;
use crate::repository::error::RepositoryError;
use thiserror::Error;

/// API层错误类型
/// 所有错误信息必须指明违反的约束
#[derive(Error, Debug)]
pub enum ApiError {
    // ==========================================
    // 鉴权错误
    // ==========================================
    #[error("未授权: {0}")]
    Unauthorized(String),

    // ==========================================
    // 输入与业务规则错误
    // ==========================================
    #[error("无效输入: {0}")]
    InvalidInput(String),

    #[error("参数校验失败: {0}")]
    ValidationError(String),

    #[error("可用司机不足: 找到 {found} 名，请求 {requested} 名")]
    InsufficientDrivers { found: usize, requested: usize },

    #[error("资源未找到: {0}")]
    NotFound(String),

    #[error("资源冲突: {0}")]
    Conflict(String),

    // ==========================================
    // 数据访问错误
    // ==========================================
    #[error("数据库错误: {0}")]
    DatabaseError(String),

    #[error("数据库连接失败: {0}")]
    DatabaseConnectionError(String),

    // ==========================================
    // 导入与配置错误
    // ==========================================
    #[error("文件导入失败: {0}")]
    ImportError(String),

    #[error("配置读取失败: {0}")]
    ConfigError(String),

    // ==========================================
    // 通用错误
    // ==========================================
    #[error("内部错误: {0}")]
    InternalError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl ApiError {
    /// 对应的 HTTP 状态码（供外部 HTTP 适配层使用）
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::Unauthorized(_) => 401,
            ApiError::InvalidInput(_)
            | ApiError::ValidationError(_)
            | ApiError::InsufficientDrivers { .. }
            | ApiError::ImportError(_) => 400,
            ApiError::NotFound(_) => 404,
            ApiError::Conflict(_) => 409,
            ApiError::DatabaseError(_)
            | ApiError::DatabaseConnectionError(_)
            | ApiError::ConfigError(_)
            | ApiError::InternalError(_)
            | ApiError::Other(_) => 500,
        }
    }
}

// ==========================================
// 从 SimulationError 转换
// ==========================================
impl From<SimulationError> for ApiError {
    fn from(err: SimulationError) -> Self {
        match err {
            SimulationError::Validation(e) => ApiError::ValidationError(e.to_string()),
            SimulationError::InsufficientDrivers { found, requested } => {
                ApiError::InsufficientDrivers { found, requested }
            }
        }
    }
}

// ==========================================
// 从 RepositoryError 转换
// ==========================================
impl From<RepositoryError> for ApiError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::NotFound { entity, id } => {
                ApiError::NotFound(format!("{}(id={})不存在", entity, id))
            }
            RepositoryError::LockError(msg) => {
                ApiError::DatabaseConnectionError(format!("数据库锁获取失败: {}", msg))
            }
            RepositoryError::DatabaseQueryError(msg) => ApiError::DatabaseError(msg),
            RepositoryError::UniqueConstraintViolation(msg) => {
                ApiError::Conflict(format!("唯一约束违反: {}", msg))
            }
            RepositoryError::CheckConstraintViolation(msg) => {
                ApiError::InvalidInput(format!("字段取值违反约束: {}", msg))
            }
            RepositoryError::SerializationError(msg) => ApiError::InternalError(msg),
            RepositoryError::Other(err) => ApiError::Other(err),
        }
    }
}

// ==========================================
// 从 ImportError 转换
// ==========================================
impl From<ImportError> for ApiError {
    fn from(err: ImportError) -> Self {
        match err {
            ImportError::Repository(e) => e.into(),
            other => ApiError::ImportError(other.to_string()),
        }
    }
}

/// Result 类型别名
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::error::ValidationError;

    #[test]
    fn test_simulation_error_conversion() {
        let api_err: ApiError = SimulationError::InsufficientDrivers { found: 2, requested: 5 }.into();
        assert_eq!(api_err.status_code(), 400);
        let msg = api_err.to_string();
        assert!(msg.contains('2') && msg.contains('5'));

        let api_err: ApiError =
            SimulationError::Validation(ValidationError::HoursOutOfRange { value: 30, min: 1, max: 24 }).into();
        match api_err {
            ApiError::ValidationError(msg) => assert!(msg.contains("maxHoursPerDay")),
            other => panic!("Expected ValidationError, got {:?}", other),
        }
    }

    #[test]
    fn test_repository_error_conversion() {
        let api_err: ApiError = RepositoryError::not_found("Route", "R9").into();
        assert_eq!(api_err.status_code(), 404);
        assert!(api_err.to_string().contains("R9"));

        let api_err: ApiError = RepositoryError::UniqueConstraintViolation("route.route_id".into()).into();
        assert_eq!(api_err.status_code(), 409);
    }
}
