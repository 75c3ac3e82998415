// ==========================================
// 末端配送车队仿真 - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// 职责: 提供数据访问接口,屏蔽数据库细节
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================

pub mod driver_repo;
pub mod error;
pub mod fleet_snapshot_repo;
pub mod manager_repo;
pub mod order_repo;
pub mod route_repo;
pub mod simulation_run_repo;

// 重导出核心仓储
pub use driver_repo::DriverRepository;
pub use error::{RepositoryError, RepositoryResult};
pub use fleet_snapshot_repo::{FleetSnapshot, FleetSnapshotRepository};
pub use manager_repo::ManagerRepository;
pub use order_repo::OrderRepository;
pub use route_repo::RouteRepository;
pub use simulation_run_repo::SimulationRunRepository;
