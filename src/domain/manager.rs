// ==========================================
// 末端配送车队仿真 - 调度管理员领域模型
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

// ==========================================
// Manager - 调度管理员（仿真调用方）
// ==========================================
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Manager {
    pub username: String,
    #[serde(skip_serializing)]
    pub password_hash: String, // argon2 PHC 字符串
    pub created_at: NaiveDateTime,
}
