// ==========================================
// 末端配送车队仿真 - 配置层
// ==========================================
// 职责: 仿真规则与运行环境配置
// 存储: config_kv 表 / 环境变量
// ==========================================

pub mod app_config;
pub mod config_manager;
pub mod rules_reader;
pub mod simulation_rules;

// 重导出核心配置类型
pub use app_config::{default_db_path, AppConfig};
pub use config_manager::{config_keys, ConfigManager};
pub use rules_reader::SimulationRulesReader;
pub use simulation_rules::SimulationRules;
