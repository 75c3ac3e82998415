// ==========================================
// 末端配送车队仿真 - 运行环境配置
// ==========================================
// 来源: 环境变量
// - FLEET_SIM_DB_PATH: 数据库路径
// - FLEET_SIM_JWT_SECRET: 令牌签名密钥
// - FLEET_SIM_TOKEN_TTL_HOURS: 令牌有效期（小时）
// ==========================================

use std::path::PathBuf;

pub const ENV_DB_PATH: &str = "FLEET_SIM_DB_PATH";
pub const ENV_JWT_SECRET: &str = "FLEET_SIM_JWT_SECRET";
pub const ENV_TOKEN_TTL_HOURS: &str = "FLEET_SIM_TOKEN_TTL_HOURS";

const DEFAULT_JWT_SECRET: &str = "fleet-sim-dev-secret";
const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;
/// 令牌有效期上限（一年）
pub const MAX_TOKEN_TTL_HOURS: i64 = 8_760;

/// 应用级配置
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub db_path: String,
    pub jwt_secret: String,
    pub token_ttl_hours: i64,
}

impl AppConfig {
    /// 从环境变量解析配置
    pub fn from_env() -> Self {
        let jwt_secret = match read_env(ENV_JWT_SECRET) {
            Some(secret) => secret,
            None => {
                tracing::warn!("{} 未设置，使用开发期默认密钥", ENV_JWT_SECRET);
                DEFAULT_JWT_SECRET.to_string()
            }
        };

        let token_ttl_hours = parse_token_ttl_hours(read_env(ENV_TOKEN_TTL_HOURS).as_deref());

        Self {
            db_path: default_db_path(),
            jwt_secret,
            token_ttl_hours,
        }
    }

    /// 指定数据库路径与密钥（测试/嵌入场景）
    pub fn with_db_path(db_path: impl Into<String>, jwt_secret: impl Into<String>) -> Self {
        Self {
            db_path: db_path.into(),
            jwt_secret: jwt_secret.into(),
            token_ttl_hours: DEFAULT_TOKEN_TTL_HOURS,
        }
    }
}

/// 解析令牌有效期，缺失或超出 1..=8760 时使用默认值
pub fn parse_token_ttl_hours(raw: Option<&str>) -> i64 {
    let Some(raw) = raw else {
        return DEFAULT_TOKEN_TTL_HOURS;
    };

    match raw.parse::<i64>() {
        Ok(hours) if (1..=MAX_TOKEN_TTL_HOURS).contains(&hours) => hours,
        _ => {
            tracing::warn!(
                "{} 取值无效: {}，使用默认值 {}",
                ENV_TOKEN_TTL_HOURS,
                raw,
                DEFAULT_TOKEN_TTL_HOURS
            );
            DEFAULT_TOKEN_TTL_HOURS
        }
    }
}

fn read_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// 默认数据库路径
///
/// 优先级: FLEET_SIM_DB_PATH > 用户数据目录/fleet-sim/fleet_sim.db > ./fleet_sim.db
pub fn default_db_path() -> String {
    if let Some(path) = read_env(ENV_DB_PATH) {
        return path;
    }

    let mut path = PathBuf::from("./fleet_sim.db");
    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("fleet-sim");
        if let Err(e) = std::fs::create_dir_all(&dir) {
            tracing::warn!("无法创建数据目录 {}: {}，回退到当前目录", dir.display(), e);
        } else {
            path = dir.join("fleet_sim.db");
        }
    }

    path.to_string_lossy().to_string()
}
