// ==========================================
// 末端配送车队仿真 - 鉴权 API
// ==========================================
// 职责: 调度管理员注册、登录签发令牌、令牌校验
// 令牌: HS256 JWT (sub = username)
// 口令: argon2 哈希，明文不落库
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::config::AppConfig;
use crate::domain::manager::Manager;
use crate::repository::manager_repo::ManagerRepository;
use argon2::password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::{Duration, Local, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, instrument, warn};

const MIN_PASSWORD_LEN: usize = 6;
const MAX_USERNAME_LEN: usize = 64;
const BEARER_PREFIX: &str = "Bearer ";

/// 令牌载荷
#[derive(Debug, Serialize, Deserialize)]
struct Claims {
    sub: String,
    exp: usize,
    iat: usize,
}

/// 登录响应
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginResponse {
    pub token: String,
    pub expires_at: i64, // Unix 秒
}

// ==========================================
// AuthenticatedManager - 已通过鉴权的调用方
// ==========================================
// 只能由 AuthApi::authenticate 构造
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedManager {
    username: String,
}

impl AuthenticatedManager {
    pub fn username(&self) -> &str {
        &self.username
    }
}

// ==========================================
// AuthApi
// ==========================================
pub struct AuthApi {
    manager_repo: Arc<ManagerRepository>,
    jwt_secret: String,
    token_ttl_hours: i64,
}

impl AuthApi {
    pub fn new(manager_repo: Arc<ManagerRepository>, config: &AppConfig) -> Self {
        Self {
            manager_repo,
            jwt_secret: config.jwt_secret.clone(),
            token_ttl_hours: config.token_ttl_hours,
        }
    }

    /// 注册调度管理员
    ///
    /// # 错误
    /// - InvalidInput: 用户名为空/过长，口令过短
    /// - Conflict: 用户名已存在
    #[instrument(skip(self, password))]
    pub fn register_manager(&self, username: &str, password: &str) -> ApiResult<()> {
        let username = username.trim();
        if username.is_empty() {
            return Err(ApiError::InvalidInput("用户名不能为空".to_string()));
        }
        if username.chars().count() > MAX_USERNAME_LEN {
            return Err(ApiError::InvalidInput(format!(
                "用户名长度不能超过 {} 个字符",
                MAX_USERNAME_LEN
            )));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(ApiError::InvalidInput(format!(
                "口令长度不能少于 {} 个字符",
                MIN_PASSWORD_LEN
            )));
        }

        if self.manager_repo.find_by_username(username)?.is_some() {
            return Err(ApiError::Conflict(format!("用户名 {} 已存在", username)));
        }

        let manager = Manager {
            username: username.to_string(),
            password_hash: hash_password(password)?,
            created_at: Local::now().naive_local(),
        };
        self.manager_repo.create(&manager)?;

        info!(username = %username, "调度管理员注册成功");
        Ok(())
    }

    /// 登录并签发令牌
    ///
    /// 用户不存在与口令错误返回同一条消息
    #[instrument(skip(self, password))]
    pub fn login(&self, username: &str, password: &str) -> ApiResult<LoginResponse> {
        let manager = self
            .manager_repo
            .find_by_username(username.trim())?
            .ok_or_else(|| ApiError::Unauthorized("用户名或密码错误".to_string()))?;

        if !verify_password(password, &manager.password_hash)? {
            warn!(username = %manager.username, "登录失败: 口令错误");
            return Err(ApiError::Unauthorized("用户名或密码错误".to_string()));
        }

        let now = Utc::now();
        let expires_at = Duration::try_hours(self.token_ttl_hours)
            .and_then(|ttl| now.checked_add_signed(ttl))
            .ok_or_else(|| {
                ApiError::InternalError(format!("令牌有效期配置无效: {} 小时", self.token_ttl_hours))
            })?;
        let claims = Claims {
            sub: manager.username.clone(),
            exp: expires_at.timestamp() as usize,
            iat: now.timestamp() as usize,
        };

        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.jwt_secret.as_bytes()),
        )
        .map_err(|e| ApiError::InternalError(format!("令牌签发失败: {}", e)))?;

        info!(username = %manager.username, "登录成功");
        Ok(LoginResponse {
            token,
            expires_at: expires_at.timestamp(),
        })
    }

    /// 校验令牌（可带 "Bearer " 前缀）
    ///
    /// 令牌有效但账号已不存在时同样拒绝
    pub fn authenticate(&self, token: &str) -> ApiResult<AuthenticatedManager> {
        let token = token.trim();
        let token = token.strip_prefix(BEARER_PREFIX).unwrap_or(token).trim();
        if token.is_empty() {
            return Err(ApiError::Unauthorized("缺少访问令牌".to_string()));
        }

        let data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.jwt_secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .map_err(|e| ApiError::Unauthorized(format!("令牌无效: {}", e)))?;

        let username = data.claims.sub;
        if self.manager_repo.find_by_username(&username)?.is_none() {
            return Err(ApiError::Unauthorized(format!("账号 {} 不存在", username)));
        }

        Ok(AuthenticatedManager { username })
    }
}

fn hash_password(password: &str) -> ApiResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ApiError::InternalError(format!("口令哈希失败: {}", e)))
}

fn verify_password(password: &str, stored_hash: &str) -> ApiResult<bool> {
    let parsed = PasswordHash::new(stored_hash)
        .map_err(|e| ApiError::InternalError(format!("口令哈希格式错误: {}", e)))?;
    Ok(Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_hash_verify() {
        let hash = hash_password("secret-123").unwrap();
        assert_ne!(hash, "secret-123");
        assert!(verify_password("secret-123", &hash).unwrap());
        assert!(!verify_password("wrong", &hash).unwrap());
    }

    #[test]
    fn test_bad_stored_hash_is_internal_error() {
        let err = verify_password("x", "not-a-phc-string").unwrap_err();
        assert_eq!(err.status_code(), 500);
    }
}
