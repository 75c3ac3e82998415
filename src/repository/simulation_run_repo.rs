// ==========================================
// 末端配送车队仿真 - 仿真历史仓储
// ==========================================
// 只追加: 不提供 update / delete
// 排序: created_at DESC（同一时刻按写入顺序倒序）
// ==========================================

use crate::domain::simulation::SimulationRun;
use crate::repository::error::{RepositoryError, RepositoryResult};
use chrono::NaiveDateTime;
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

const TS_FORMAT: &str = "%Y-%m-%d %H:%M:%S%.3f";

const SELECT_COLUMNS: &str = r#"SELECT simulation_id, created_at, created_by,
       available_drivers, start_time, max_hours_per_day,
       results_json, delivery_breakdown_json, fuel_cost_breakdown_json
FROM simulation_run"#;

// ==========================================
// SimulationRunRepository - 仿真历史仓储
// ==========================================
pub struct SimulationRunRepository {
    conn: Arc<Mutex<Connection>>,
}

impl SimulationRunRepository {
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 追加一条运行记录
    pub fn insert(&self, run: &SimulationRun) -> RepositoryResult<String> {
        let results_json = serde_json::to_string(&run.results)?;
        let delivery_json = serde_json::to_string(&run.delivery_breakdown)?;
        let fuel_json = serde_json::to_string(&run.fuel_cost_breakdown)?;

        let conn = self.get_conn()?;
        conn.execute(
            r#"INSERT INTO simulation_run (
                simulation_id, created_at, created_by,
                available_drivers, start_time, max_hours_per_day,
                results_json, delivery_breakdown_json, fuel_cost_breakdown_json
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
            params![
                &run.simulation_id,
                run.created_at.format(TS_FORMAT).to_string(),
                &run.created_by,
                run.available_drivers as i64,
                &run.start_time,
                run.max_hours_per_day as i64,
                results_json,
                delivery_json,
                fuel_json,
            ],
        )?;

        Ok(run.simulation_id.clone())
    }

    /// 按ID查询
    pub fn find_by_id(&self, simulation_id: &str) -> RepositoryResult<Option<SimulationRun>> {
        let conn = self.get_conn()?;

        let sql = format!("{} WHERE simulation_id = ?", SELECT_COLUMNS);
        let run = conn
            .query_row(&sql, params![simulation_id], Self::map_row)
            .optional()?;

        Ok(run)
    }

    /// 最近一次运行
    pub fn find_latest(&self) -> RepositoryResult<Option<SimulationRun>> {
        Ok(self.list_recent(1)?.into_iter().next())
    }

    /// 最近 N 次运行（时间倒序）
    pub fn list_recent(&self, limit: usize) -> RepositoryResult<Vec<SimulationRun>> {
        let conn = self.get_conn()?;

        let sql = format!(
            "{} ORDER BY created_at DESC, rowid DESC LIMIT ?",
            SELECT_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;

        let runs = stmt
            .query_map(params![limit as i64], Self::map_row)?
            .collect::<Result<Vec<SimulationRun>, _>>()?;

        Ok(runs)
    }

    /// 运行记录总数
    pub fn count(&self) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let n: i64 = conn.query_row("SELECT COUNT(*) FROM simulation_run", [], |row| row.get(0))?;
        Ok(n as usize)
    }

    fn map_row(row: &rusqlite::Row) -> rusqlite::Result<SimulationRun> {
        Ok(SimulationRun {
            simulation_id: row.get(0)?,
            created_at: NaiveDateTime::parse_from_str(&row.get::<_, String>(1)?, TS_FORMAT)
                .map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(1, rusqlite::types::Type::Text, Box::new(e))
                })?,
            created_by: row.get(2)?,
            available_drivers: row.get::<_, i64>(3)? as usize,
            start_time: row.get(4)?,
            max_hours_per_day: row.get::<_, i64>(5)? as u32,
            results: parse_json_column(row, 6)?,
            delivery_breakdown: parse_json_column(row, 7)?,
            fuel_cost_breakdown: parse_json_column(row, 8)?,
        })
    }
}

fn parse_json_column<T: serde::de::DeserializeOwned>(
    row: &rusqlite::Row,
    idx: usize,
) -> rusqlite::Result<T> {
    let raw: String = row.get(idx)?;
    serde_json::from_str(&raw).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}
