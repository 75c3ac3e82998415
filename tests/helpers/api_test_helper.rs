// ==========================================
// API集成测试辅助工具
// ==========================================
// 职责: 基于临时数据库装配 AppState，并提供登录与数据准备辅助
// ==========================================

#![allow(dead_code)]

#[path = "../test_helpers.rs"]
mod test_helpers;

use std::sync::Arc;
use tempfile::NamedTempFile;

use fleet_sim::api::{AuthApi, AuthenticatedManager, FleetApi, SimulationApi};
use fleet_sim::app::AppState;
use fleet_sim::config::{AppConfig, ConfigManager};
use fleet_sim::importer::FleetImporterImpl;

pub const TEST_JWT_SECRET: &str = "fleet-sim-test-secret";
pub const TEST_MANAGER: &str = "dispatcher";
pub const TEST_PASSWORD: &str = "s3cret-pass";

// ==========================================
// API测试环境
// ==========================================
pub struct ApiTestEnv {
    pub db_path: String,
    pub auth_api: Arc<AuthApi>,
    pub fleet_api: Arc<FleetApi>,
    pub simulation_api: Arc<SimulationApi>,
    pub config_manager: Arc<ConfigManager>,
    pub importer: Arc<FleetImporterImpl>,

    // 临时文件（确保生命周期）
    _temp_file: NamedTempFile,
}

impl ApiTestEnv {
    /// 创建新的测试环境
    pub fn new() -> Result<Self, String> {
        fleet_sim::logging::init_test();

        let (temp_file, db_path) =
            test_helpers::create_test_db().map_err(|e| format!("无法创建测试数据库: {}", e))?;

        let state = AppState::new(AppConfig::with_db_path(db_path.clone(), TEST_JWT_SECRET))?;

        Ok(Self {
            db_path,
            auth_api: state.auth_api,
            fleet_api: state.fleet_api,
            simulation_api: state.simulation_api,
            config_manager: state.config_manager,
            importer: state.importer,
            _temp_file: temp_file,
        })
    }

    /// 注册默认调度管理员并换取已鉴权身份
    pub fn login(&self) -> AuthenticatedManager {
        self.login_as(TEST_MANAGER, TEST_PASSWORD)
    }

    pub fn login_as(&self, username: &str, password: &str) -> AuthenticatedManager {
        self.auth_api
            .register_manager(username, password)
            .expect("注册失败");
        let login = self.auth_api.login(username, password).expect("登录失败");
        self.auth_api.authenticate(&login.token).expect("鉴权失败")
    }

    /// 写入标准测试车队（3 名司机 / 3 条线路 / 3 个订单）
    pub fn seed_standard_fleet(&self) {
        for driver in test_helpers::standard_drivers() {
            self.fleet_api.create_driver(driver).expect("创建司机失败");
        }
        for route in test_helpers::standard_routes() {
            self.fleet_api.create_route(route).expect("创建线路失败");
        }
        for order in test_helpers::standard_orders() {
            self.fleet_api.create_order(order).expect("创建订单失败");
        }
    }
}
