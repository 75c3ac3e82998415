// ==========================================
// 末端配送车队仿真 - 应用状态
// ==========================================
// 职责: 管理应用级别的共享连接、仓储与 API 实例
// ==========================================

use std::sync::{Arc, Mutex};

use crate::api::{AuthApi, FleetApi, SimulationApi};
use crate::config::{AppConfig, ConfigManager};
use crate::db::{init_schema, open_sqlite_connection};
use crate::importer::FleetImporterImpl;
use crate::repository::{
    DriverRepository, FleetSnapshotRepository, ManagerRepository, OrderRepository, RouteRepository,
    SimulationRunRepository,
};

/// 应用状态
///
/// 所有仓储共享同一个 SQLite 连接
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// 鉴权API
    pub auth_api: Arc<AuthApi>,

    /// 车队数据API
    pub fleet_api: Arc<FleetApi>,

    /// 仿真API
    pub simulation_api: Arc<SimulationApi>,

    /// 仿真规则配置
    pub config_manager: Arc<ConfigManager>,

    /// 种子数据导入器
    pub importer: Arc<FleetImporterImpl>,
}

impl AppState {
    /// 创建新的AppState实例
    ///
    /// # 说明
    /// 1. 打开数据库连接并初始化表结构（幂等）
    /// 2. 初始化所有Repository
    /// 3. 创建所有API实例
    pub fn new(config: AppConfig) -> Result<Self, String> {
        tracing::info!("初始化AppState，数据库路径: {}", config.db_path);

        let conn = open_sqlite_connection(&config.db_path)
            .map_err(|e| format!("无法打开数据库: {}", e))?;
        init_schema(&conn).map_err(|e| format!("数据库表结构初始化失败: {}", e))?;
        let conn = Arc::new(Mutex::new(conn));

        // ==========================================
        // 初始化Repository层
        // ==========================================
        let driver_repo = Arc::new(DriverRepository::new(conn.clone()));
        let route_repo = Arc::new(RouteRepository::new(conn.clone()));
        let order_repo = Arc::new(OrderRepository::new(conn.clone()));
        let snapshot_repo = Arc::new(FleetSnapshotRepository::new(conn.clone()));
        let run_repo = Arc::new(SimulationRunRepository::new(conn.clone()));
        let manager_repo = Arc::new(ManagerRepository::new(conn.clone()));
        let config_manager = Arc::new(ConfigManager::from_connection(conn));

        // ==========================================
        // 初始化API层
        // ==========================================
        let auth_api = Arc::new(AuthApi::new(manager_repo, &config));
        let fleet_api = Arc::new(FleetApi::new(
            driver_repo.clone(),
            route_repo.clone(),
            order_repo.clone(),
        ));
        let simulation_api = Arc::new(SimulationApi::new(
            snapshot_repo,
            run_repo,
            config_manager.clone(),
        ));
        let importer = Arc::new(FleetImporterImpl::new(driver_repo, route_repo, order_repo));

        tracing::info!("AppState初始化完成");

        Ok(Self {
            db_path: config.db_path,
            auth_api,
            fleet_api,
            simulation_api,
            config_manager,
            importer,
        })
    }
}
