// ==========================================
// 末端配送车队仿真 - 配置管理器
// ==========================================
// 职责: 仿真规则加载、覆写、快照
// 存储: config_kv 表 (key-value + scope)
// ==========================================

use crate::config::rules_reader::SimulationRulesReader;
use crate::config::simulation_rules::SimulationRules;
use async_trait::async_trait;
use rusqlite::{params, Connection};
use std::collections::BTreeMap;
use std::error::Error;
use std::str::FromStr;
use std::sync::{Arc, Mutex};

// ==========================================
// 配置键
// ==========================================
pub mod config_keys {
    // 疲劳
    pub const FATIGUE_THRESHOLD_HOURS: &str = "fatigue_threshold_hours";
    pub const FATIGUE_TIME_MULTIPLIER: &str = "fatigue_time_multiplier";

    // 延误与奖励
    pub const LATE_GRACE_MINUTES: &str = "late_grace_minutes";
    pub const LATE_PENALTY: &str = "late_penalty";
    pub const BONUS_VALUE_THRESHOLD: &str = "bonus_value_threshold";
    pub const BONUS_RATE: &str = "bonus_rate";

    // 燃油
    pub const BASE_FUEL_RATE_PER_KM: &str = "base_fuel_rate_per_km";
    pub const HIGH_TRAFFIC_SURCHARGE_PER_KM: &str = "high_traffic_surcharge_per_km";
}

type ConfigError = Box<dyn Error + Send + Sync>;

// ==========================================
// ConfigManager - 配置管理器
// ==========================================
pub struct ConfigManager {
    conn: Arc<Mutex<Connection>>,
}

impl ConfigManager {
    /// 从已有连接创建 ConfigManager
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 读取 global scope 配置值
    pub fn get_config_value(&self, key: &str) -> Result<Option<String>, ConfigError> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let result = conn.query_row(
            "SELECT value FROM config_kv WHERE scope_id = 'global' AND key = ?1",
            params![key],
            |row| row.get::<_, String>(0),
        );

        match result {
            Ok(value) => Ok(Some(value)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(Box::new(e)),
        }
    }

    /// 写入 global scope 配置值（UPSERT）
    pub fn set_config_value(&self, key: &str, value: &str) -> Result<(), ConfigError> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        conn.execute(
            "INSERT INTO config_kv (scope_id, key, value, updated_at)
             VALUES ('global', ?1, ?2, datetime('now'))
             ON CONFLICT(scope_id, key) DO UPDATE SET value = ?2, updated_at = datetime('now')",
            params![key, value],
        )?;

        tracing::info!(config_key = key, value = value, "配置已更新");
        Ok(())
    }

    /// 获取所有 global 配置的快照（JSON格式,按键排序）
    pub fn get_config_snapshot(&self) -> Result<String, ConfigError> {
        let conn = self.conn.lock().map_err(|e| format!("锁获取失败: {}", e))?;

        let mut stmt =
            conn.prepare("SELECT key, value FROM config_kv WHERE scope_id = 'global' ORDER BY key")?;

        let rows = stmt.query_map([], |row| {
            Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?))
        })?;

        let mut config_map: BTreeMap<String, String> = BTreeMap::new();
        for row in rows {
            let (key, value) = row?;
            config_map.insert(key, value);
        }

        Ok(serde_json::to_string(&config_map)?)
    }

    /// 读取并解析配置值
    ///
    /// 缺失、格式错误或超出取值范围时回退默认值
    fn get_parsed_or_default<T>(
        &self,
        key: &str,
        default: T,
        in_range: impl Fn(T) -> bool,
    ) -> Result<T, ConfigError>
    where
        T: FromStr + Copy + std::fmt::Display,
    {
        let raw = match self.get_config_value(key)? {
            None => return Ok(default),
            Some(raw) => raw,
        };

        match raw.trim().parse::<T>() {
            Ok(v) if in_range(v) => Ok(v),
            Ok(_) => {
                tracing::warn!(
                    config_key = key,
                    raw_value = %raw,
                    default = %default,
                    "配置超出取值范围，使用默认值"
                );
                Ok(default)
            }
            Err(_) => {
                tracing::warn!(
                    config_key = key,
                    raw_value = %raw,
                    default = %default,
                    "配置格式错误，使用默认值"
                );
                Ok(default)
            }
        }
    }

    /// 同步读取完整仿真规则
    ///
    /// 取值范围: 疲劳系数 >= 1，其余项 >= 0，浮点项必须有限
    pub fn read_simulation_rules(&self) -> Result<SimulationRules, ConfigError> {
        let d = SimulationRules::default();

        Ok(SimulationRules {
            fatigue_threshold_hours: self.get_parsed_or_default(
                config_keys::FATIGUE_THRESHOLD_HOURS,
                d.fatigue_threshold_hours,
                non_negative,
            )?,
            fatigue_time_multiplier: self.get_parsed_or_default(
                config_keys::FATIGUE_TIME_MULTIPLIER,
                d.fatigue_time_multiplier,
                |v: f64| v.is_finite() && v >= 1.0,
            )?,
            late_grace_minutes: self.get_parsed_or_default(
                config_keys::LATE_GRACE_MINUTES,
                d.late_grace_minutes,
                |v: i64| v >= 0,
            )?,
            late_penalty: self.get_parsed_or_default(config_keys::LATE_PENALTY, d.late_penalty, |v: i64| {
                v >= 0
            })?,
            bonus_value_threshold: self.get_parsed_or_default(
                config_keys::BONUS_VALUE_THRESHOLD,
                d.bonus_value_threshold,
                non_negative,
            )?,
            bonus_rate: self.get_parsed_or_default(config_keys::BONUS_RATE, d.bonus_rate, non_negative)?,
            base_fuel_rate_per_km: self.get_parsed_or_default(
                config_keys::BASE_FUEL_RATE_PER_KM,
                d.base_fuel_rate_per_km,
                non_negative,
            )?,
            high_traffic_surcharge_per_km: self.get_parsed_or_default(
                config_keys::HIGH_TRAFFIC_SURCHARGE_PER_KM,
                d.high_traffic_surcharge_per_km,
                non_negative,
            )?,
        })
    }
}

fn non_negative(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}

// ==========================================
// SimulationRulesReader Trait 实现
// ==========================================
#[async_trait]
impl SimulationRulesReader for ConfigManager {
    async fn load_simulation_rules(&self) -> Result<SimulationRules, ConfigError> {
        self.read_simulation_rules()
    }
}
