// ==========================================
// 末端配送车队仿真 - API 层
// ==========================================
// 职责: 对外业务接口（鉴权、车队数据、仿真与历史）
// HTTP 适配层按 ApiError::status_code() 映射状态码
// ==========================================

pub mod auth_api;
pub mod error;
pub mod fleet_api;
pub mod simulation_api;
pub mod validator;

// 重导出核心类型
pub use auth_api::{AuthApi, AuthenticatedManager, LoginResponse};
pub use error::{ApiError, ApiResult};
pub use fleet_api::FleetApi;
pub use simulation_api::{RunSimulationRequest, SimulationApi, SimulationResponse, MAX_HISTORY_LIMIT};
pub use validator::{EntityValidator, FieldViolation};
