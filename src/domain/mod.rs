// ==========================================
// 末端配送车队仿真 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod driver;
pub mod manager;
pub mod order;
pub mod route;
pub mod simulation;
pub mod types;

// 重导出核心类型
pub use driver::Driver;
pub use manager::Manager;
pub use order::Order;
pub use route::Route;
pub use simulation::{
    DeliveryBreakdown, FuelCostBreakdown, OrderOutcome, SimulationOutcome, SimulationParams,
    SimulationResults, SimulationRun, ValidatedParams,
};
pub use types::TrafficLevel;
