use crate::domain::order::Order;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

// ==========================================
// OrderRepository - 订单仓储
// ==========================================
// 表名 delivery_order（避开 SQL 关键字 ORDER）
pub struct OrderRepository {
    conn: Arc<Mutex<Connection>>,
}

impl OrderRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 创建订单（order_id 唯一；route_id 不做存在性校验）
    pub fn create(&self, order: &Order) -> RepositoryResult<String> {
        let conn = self.get_conn()?;

        conn.execute(
            r#"INSERT INTO delivery_order (order_id, value_rs, route_id, delivery_timestamp)
               VALUES (?, ?, ?, ?)"#,
            params![
                &order.order_id,
                order.value_rs,
                &order.route_id,
                &order.delivery_timestamp,
            ],
        )?;

        Ok(order.order_id.clone())
    }

    /// 插入或覆盖订单（导入使用）
    pub fn upsert(&self, order: &Order) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        conn.execute(
            r#"INSERT INTO delivery_order (order_id, value_rs, route_id, delivery_timestamp)
               VALUES (?1, ?2, ?3, ?4)
               ON CONFLICT(order_id) DO UPDATE SET
                   value_rs = ?2, route_id = ?3, delivery_timestamp = ?4"#,
            params![
                &order.order_id,
                order.value_rs,
                &order.route_id,
                &order.delivery_timestamp,
            ],
        )?;

        Ok(())
    }

    pub fn find_by_id(&self, order_id: &str) -> RepositoryResult<Option<Order>> {
        let conn = self.get_conn()?;

        let order = conn
            .query_row(
                r#"SELECT order_id, value_rs, route_id, delivery_timestamp
                   FROM delivery_order
                   WHERE order_id = ?"#,
                params![order_id],
                Self::map_row,
            )
            .optional()?;

        Ok(order)
    }

    /// 查询全部订单（插入顺序，即仿真处理顺序）
    pub fn list_all(&self) -> RepositoryResult<Vec<Order>> {
        let conn = self.get_conn()?;
        Self::list_all_with(&conn)
    }

    pub(crate) fn list_all_with(conn: &Connection) -> RepositoryResult<Vec<Order>> {
        let mut stmt = conn.prepare(
            r#"SELECT order_id, value_rs, route_id, delivery_timestamp
               FROM delivery_order
               ORDER BY rowid ASC"#,
        )?;

        let orders = stmt
            .query_map([], Self::map_row)?
            .collect::<Result<Vec<Order>, _>>()?;

        Ok(orders)
    }

    pub fn update(&self, order: &Order) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        let affected = conn.execute(
            r#"UPDATE delivery_order
               SET value_rs = ?, route_id = ?, delivery_timestamp = ?
               WHERE order_id = ?"#,
            params![
                order.value_rs,
                &order.route_id,
                &order.delivery_timestamp,
                &order.order_id,
            ],
        )?;

        if affected == 0 {
            return Err(RepositoryError::not_found("Order", &order.order_id));
        }
        Ok(())
    }

    pub fn delete(&self, order_id: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        let affected =
            conn.execute("DELETE FROM delivery_order WHERE order_id = ?", params![order_id])?;
        if affected == 0 {
            return Err(RepositoryError::not_found("Order", order_id));
        }
        Ok(())
    }

    fn map_row(row: &rusqlite::Row) -> rusqlite::Result<Order> {
        Ok(Order {
            order_id: row.get(0)?,
            value_rs: row.get(1)?,
            route_id: row.get(2)?,
            delivery_timestamp: row.get(3)?,
        })
    }
}
