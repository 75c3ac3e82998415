// ==========================================
// 末端配送车队仿真 - 仿真规则读取 Trait
// ==========================================
// 职责: 定义仿真所需的配置读取接口（不包含实现）
// 红线: 不包含配置写入、不包含业务逻辑
// ==========================================

use crate::config::simulation_rules::SimulationRules;
use async_trait::async_trait;
use std::error::Error;

// ==========================================
// SimulationRulesReader Trait
// ==========================================
// 实现者: ConfigManager（从 config_kv 表读取）
#[async_trait]
pub trait SimulationRulesReader: Send + Sync {
    /// 读取完整的仿真规则
    ///
    /// # 返回
    /// - 缺失或格式错误的配置项回退为默认值
    async fn load_simulation_rules(&self) -> Result<SimulationRules, Box<dyn Error + Send + Sync>>;
}
