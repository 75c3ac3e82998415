use crate::domain::manager::Manager;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

// ==========================================
// ManagerRepository - 调度管理员账号仓储
// ==========================================
pub struct ManagerRepository {
    conn: Arc<Mutex<Connection>>,
}

impl ManagerRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 创建账号（username 唯一）
    pub fn create(&self, manager: &Manager) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        conn.execute(
            "INSERT INTO manager (username, password_hash, created_at) VALUES (?, ?, ?)",
            params![
                &manager.username,
                &manager.password_hash,
                manager.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            ],
        )?;

        Ok(())
    }

    pub fn find_by_username(&self, username: &str) -> RepositoryResult<Option<Manager>> {
        let conn = self.get_conn()?;

        let manager = conn
            .query_row(
                "SELECT username, password_hash, created_at FROM manager WHERE username = ?",
                params![username],
                |row| {
                    Ok(Manager {
                        username: row.get(0)?,
                        password_hash: row.get(1)?,
                        created_at: NaiveDateTime::parse_from_str(
                            &row.get::<_, String>(2)?,
                            "%Y-%m-%d %H:%M:%S",
                        )
                        .map_err(|e| {
                            rusqlite::Error::FromSqlConversionFailure(
                                2,
                                rusqlite::types::Type::Text,
                                Box::new(e),
                            )
                        })?,
                    })
                },
            )
            .optional()?;

        Ok(manager)
    }
}
