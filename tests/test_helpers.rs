// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 临时数据库初始化、标准测试车队数据
// ==========================================

#![allow(dead_code)]

use fleet_sim::db::{init_schema, open_sqlite_connection};
use fleet_sim::domain::{Driver, Order, Route, TrafficLevel};
use rusqlite::Connection;
use std::error::Error;
use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;

/// 创建临时测试数据库并初始化 schema
///
/// # 返回
/// - NamedTempFile: 临时数据库文件（需要保持存活）
/// - String: 数据库文件路径
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file.path().to_str().unwrap().to_string();

    let conn = open_sqlite_connection(&db_path)?;
    init_schema(&conn)?;

    Ok((temp_file, db_path))
}

/// 打开共享连接（仓储层测试使用）
pub fn open_shared_connection(db_path: &str) -> Result<Arc<Mutex<Connection>>, Box<dyn Error>> {
    let conn = open_sqlite_connection(db_path)?;
    Ok(Arc::new(Mutex::new(conn)))
}

// ==========================================
// 标准测试车队
// ==========================================
// D1 当班 6h（不疲劳）, D2 当班 9h（疲劳）, D3 当班 8h（不疲劳，边界）
pub fn standard_drivers() -> Vec<Driver> {
    vec![
        Driver::new("D1", "Amit", 6.0, 42.0),
        Driver::new("D2", "Priya", 9.0, 51.0),
        Driver::new("D3", "Rohit", 8.0, 38.5),
    ]
}

pub fn standard_routes() -> Vec<Route> {
    vec![
        Route::new("R1", 10.0, TrafficLevel::High, 30.0),
        Route::new("R2", 12.0, TrafficLevel::Low, 40.0),
        Route::new("R3", 5.0, TrafficLevel::Medium, 20.0),
    ]
}

/// O1 -> D1 / R1, O2 -> D2 / R2, O3 -> D3 / R3（轮询）
pub fn standard_orders() -> Vec<Order> {
    vec![
        Order::new("O1", 1200.0, "R1", "11:15"),
        Order::new("O2", 900.0, "R2", "12:40"),
        Order::new("O3", 400.0, "R3", "09:05"),
    ]
}
