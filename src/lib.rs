// ==========================================
// 末端配送车队仿真 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: 调度决策支持 (按假设场景估算利润与准时率)
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 仿真规则
pub mod engine;

// 导入层 - 种子数据
pub mod importer;

// 配置层 - 仿真规则与运行环境
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA/表结构）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// 应用层 - 装配
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::TrafficLevel;

// 领域实体
pub use domain::{
    DeliveryBreakdown, Driver, FuelCostBreakdown, Manager, Order, OrderOutcome, Route,
    SimulationOutcome, SimulationParams, SimulationResults, SimulationRun,
};

// 引擎
pub use engine::{run_simulation, SimulationEngine, SimulationError, ValidationError};

// API
pub use api::{ApiError, AuthApi, FleetApi, SimulationApi};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "末端配送车队仿真";
