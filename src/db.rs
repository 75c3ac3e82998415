// ==========================================
// 末端配送车队仿真 - SQLite 连接初始化
// ==========================================
// 目标:
// - 统一所有 Connection::open 的 PRAGMA 行为
// - 统一 busy_timeout，减少并发写入时的偶发 busy 错误
// - 提供建库脚本（幂等）
// ==========================================

use rusqlite::Connection;
use rusqlite::OptionalExtension;
use std::time::Duration;

/// 默认 busy_timeout（毫秒）
pub const DEFAULT_BUSY_TIMEOUT_MS: u64 = 5_000;

/// 当前代码所期望的 schema_version
pub const CURRENT_SCHEMA_VERSION: i64 = 1;

/// 配置 SQLite 连接的统一 PRAGMA
///
/// 说明：busy_timeout 需要"每个连接"单独配置；表间无外键，订单线路引用在仿真时解析
pub fn configure_sqlite_connection(conn: &Connection) -> rusqlite::Result<()> {
    conn.busy_timeout(Duration::from_millis(DEFAULT_BUSY_TIMEOUT_MS))?;
    Ok(())
}

/// 打开 SQLite 连接并应用统一配置
pub fn open_sqlite_connection(db_path: &str) -> rusqlite::Result<Connection> {
    let conn = Connection::open(db_path)?;
    configure_sqlite_connection(&conn)?;
    Ok(conn)
}

/// 初始化数据库 schema（幂等）
///
/// 说明：delivery_order.route_id 不加外键约束，
/// 悬空线路引用由仿真引擎按"跳过"策略处理。
pub fn init_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE TABLE IF NOT EXISTS config_kv (
            scope_id TEXT NOT NULL,
            key TEXT NOT NULL,
            value TEXT NOT NULL,
            updated_at TEXT NOT NULL DEFAULT (datetime('now')),
            PRIMARY KEY (scope_id, key)
        );

        CREATE TABLE IF NOT EXISTS driver (
            driver_id TEXT PRIMARY KEY,
            name TEXT NOT NULL,
            current_shift_hours REAL NOT NULL DEFAULT 0 CHECK (current_shift_hours >= 0),
            past_7_day_work_hours REAL NOT NULL DEFAULT 0 CHECK (past_7_day_work_hours >= 0)
        );

        CREATE TABLE IF NOT EXISTS route (
            route_id TEXT PRIMARY KEY,
            distance_km REAL NOT NULL CHECK (distance_km > 0),
            traffic_level TEXT NOT NULL CHECK (traffic_level IN ('Low', 'Medium', 'High')),
            base_time_min REAL NOT NULL CHECK (base_time_min > 0)
        );

        CREATE TABLE IF NOT EXISTS delivery_order (
            order_id TEXT PRIMARY KEY,
            value_rs REAL NOT NULL CHECK (value_rs > 0),
            route_id TEXT NOT NULL,
            delivery_timestamp TEXT NOT NULL DEFAULT ''
        );

        CREATE TABLE IF NOT EXISTS simulation_run (
            simulation_id TEXT PRIMARY KEY,
            created_at TEXT NOT NULL,
            created_by TEXT,
            available_drivers INTEGER NOT NULL,
            start_time TEXT NOT NULL,
            max_hours_per_day INTEGER NOT NULL,
            results_json TEXT NOT NULL,
            delivery_breakdown_json TEXT NOT NULL,
            fuel_cost_breakdown_json TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_simulation_run_created_at
            ON simulation_run(created_at DESC);

        CREATE TABLE IF NOT EXISTS manager (
            username TEXT PRIMARY KEY,
            password_hash TEXT NOT NULL,
            created_at TEXT NOT NULL
        );
        "#,
    )?;

    conn.execute(
        "INSERT OR IGNORE INTO schema_version (version) VALUES (?1)",
        [CURRENT_SCHEMA_VERSION],
    )?;

    Ok(())
}

/// 读取 schema_version（若表不存在则返回 None）
pub fn read_schema_version(conn: &Connection) -> rusqlite::Result<Option<i64>> {
    let has_table: bool = conn
        .query_row(
            "SELECT 1 FROM sqlite_master WHERE type='table' AND name='schema_version' LIMIT 1",
            [],
            |_row| Ok(true),
        )
        .optional()?
        .unwrap_or(false);

    if !has_table {
        return Ok(None);
    }

    let v: Option<i64> = conn.query_row("SELECT MAX(version) FROM schema_version", [], |row| row.get(0))?;
    Ok(v)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_schema_is_idempotent() {
        let conn = Connection::open_in_memory().unwrap();
        assert_eq!(read_schema_version(&conn).unwrap(), None);

        init_schema(&conn).unwrap();
        init_schema(&conn).unwrap();

        assert_eq!(read_schema_version(&conn).unwrap(), Some(CURRENT_SCHEMA_VERSION));
    }
}
