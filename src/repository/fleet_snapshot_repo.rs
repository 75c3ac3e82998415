use crate::domain::driver::Driver;
use crate::domain::order::Order;
use crate::domain::route::Route;
use crate::repository::driver_repo::DriverRepository;
use crate::repository::error::{RepositoryError, RepositoryResult};
use crate::repository::order_repo::OrderRepository;
use crate::repository::route_repo::RouteRepository;
use rusqlite::Connection;
use std::sync::{Arc, Mutex};

// ==========================================
// FleetSnapshot - 仿真输入快照
// ==========================================
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FleetSnapshot {
    pub drivers: Vec<Driver>, // 名册顺序
    pub routes: Vec<Route>,
    pub orders: Vec<Order>, // 插入顺序 = 分配顺序
}

// ==========================================
// FleetSnapshotRepository - 快照加载
// ==========================================
// 三张表在同一把锁、同一个读事务内读取，并发写入只会整体可见或整体不可见
pub struct FleetSnapshotRepository {
    conn: Arc<Mutex<Connection>>,
}

impl FleetSnapshotRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 加载司机名册、线路与订单
    pub fn load(&self) -> RepositoryResult<FleetSnapshot> {
        let conn = self.get_conn()?;
        let tx = conn.unchecked_transaction()?;

        let snapshot = FleetSnapshot {
            drivers: DriverRepository::list_all_with(&tx)?,
            routes: RouteRepository::list_all_with(&tx)?,
            orders: OrderRepository::list_all_with(&tx)?,
        };

        tx.commit()?;
        Ok(snapshot)
    }
}
