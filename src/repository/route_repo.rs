use crate::domain::route::Route;
use crate::domain::types::TrafficLevel;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

// ==========================================
// RouteRepository - 线路目录仓储
// ==========================================
pub struct RouteRepository {
    conn: Arc<Mutex<Connection>>,
}

impl RouteRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 创建线路（route_id 唯一）
    pub fn create(&self, route: &Route) -> RepositoryResult<String> {
        let conn = self.get_conn()?;

        conn.execute(
            r#"INSERT INTO route (route_id, distance_km, traffic_level, base_time_min)
               VALUES (?, ?, ?, ?)"#,
            params![
                &route.route_id,
                route.distance_km,
                route.traffic_level.as_str(),
                route.base_time_min,
            ],
        )?;

        Ok(route.route_id.clone())
    }

    /// 插入或覆盖线路（导入使用）
    pub fn upsert(&self, route: &Route) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        conn.execute(
            r#"INSERT INTO route (route_id, distance_km, traffic_level, base_time_min)
               VALUES (?1, ?2, ?3, ?4)
               ON CONFLICT(route_id) DO UPDATE SET
                   distance_km = ?2, traffic_level = ?3, base_time_min = ?4"#,
            params![
                &route.route_id,
                route.distance_km,
                route.traffic_level.as_str(),
                route.base_time_min,
            ],
        )?;

        Ok(())
    }

    pub fn find_by_id(&self, route_id: &str) -> RepositoryResult<Option<Route>> {
        let conn = self.get_conn()?;

        let route = conn
            .query_row(
                r#"SELECT route_id, distance_km, traffic_level, base_time_min
                   FROM route
                   WHERE route_id = ?"#,
                params![route_id],
                Self::map_row,
            )
            .optional()?;

        Ok(route)
    }

    pub fn list_all(&self) -> RepositoryResult<Vec<Route>> {
        let conn = self.get_conn()?;
        Self::list_all_with(&conn)
    }

    pub(crate) fn list_all_with(conn: &Connection) -> RepositoryResult<Vec<Route>> {
        let mut stmt = conn.prepare(
            r#"SELECT route_id, distance_km, traffic_level, base_time_min
               FROM route
               ORDER BY rowid ASC"#,
        )?;

        let routes = stmt
            .query_map([], Self::map_row)?
            .collect::<Result<Vec<Route>, _>>()?;

        Ok(routes)
    }

    pub fn update(&self, route: &Route) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        let affected = conn.execute(
            r#"UPDATE route
               SET distance_km = ?, traffic_level = ?, base_time_min = ?
               WHERE route_id = ?"#,
            params![
                route.distance_km,
                route.traffic_level.as_str(),
                route.base_time_min,
                &route.route_id,
            ],
        )?;

        if affected == 0 {
            return Err(RepositoryError::not_found("Route", &route.route_id));
        }
        Ok(())
    }

    /// 删除线路
    ///
    /// 引用该线路的订单保持不变（仿真时按悬空引用跳过）
    pub fn delete(&self, route_id: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        let affected = conn.execute("DELETE FROM route WHERE route_id = ?", params![route_id])?;
        if affected == 0 {
            return Err(RepositoryError::not_found("Route", route_id));
        }
        Ok(())
    }

    fn map_row(row: &rusqlite::Row) -> rusqlite::Result<Route> {
        let traffic_raw: String = row.get(2)?;
        let traffic_level = traffic_raw.parse::<TrafficLevel>().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(2, rusqlite::types::Type::Text, e.into())
        })?;

        Ok(Route {
            route_id: row.get(0)?,
            distance_km: row.get(1)?,
            traffic_level,
            base_time_min: row.get(3)?,
        })
    }
}
