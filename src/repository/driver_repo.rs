use crate::domain::driver::Driver;
use crate::repository::error::{RepositoryError, RepositoryResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::sync::{Arc, Mutex};

// ==========================================
// DriverRepository - 司机名册仓储
// ==========================================
// 名册顺序 = 插入顺序 (rowid)，仿真按此顺序取前 N 名
pub struct DriverRepository {
    conn: Arc<Mutex<Connection>>,
}

impl DriverRepository {
    /// 创建新的DriverRepository实例
    pub fn new(conn: Arc<Mutex<Connection>>) -> Self {
        Self { conn }
    }

    /// 获取数据库连接
    fn get_conn(&self) -> RepositoryResult<std::sync::MutexGuard<Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 创建司机
    ///
    /// # 返回
    /// - `Ok(driver_id)`: 成功
    /// - `Err(UniqueConstraintViolation)`: driver_id 已存在
    pub fn create(&self, driver: &Driver) -> RepositoryResult<String> {
        let conn = self.get_conn()?;

        conn.execute(
            r#"INSERT INTO driver (driver_id, name, current_shift_hours, past_7_day_work_hours)
               VALUES (?, ?, ?, ?)"#,
            params![
                &driver.driver_id,
                &driver.name,
                driver.current_shift_hours,
                driver.past_7_day_work_hours,
            ],
        )?;

        Ok(driver.driver_id.clone())
    }

    /// 插入或覆盖司机（导入使用，保留原 rowid 顺序）
    pub fn upsert(&self, driver: &Driver) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        conn.execute(
            r#"INSERT INTO driver (driver_id, name, current_shift_hours, past_7_day_work_hours)
               VALUES (?1, ?2, ?3, ?4)
               ON CONFLICT(driver_id) DO UPDATE SET
                   name = ?2, current_shift_hours = ?3, past_7_day_work_hours = ?4"#,
            params![
                &driver.driver_id,
                &driver.name,
                driver.current_shift_hours,
                driver.past_7_day_work_hours,
            ],
        )?;

        Ok(())
    }

    /// 按driver_id查询司机
    pub fn find_by_id(&self, driver_id: &str) -> RepositoryResult<Option<Driver>> {
        let conn = self.get_conn()?;

        let driver = conn
            .query_row(
                r#"SELECT driver_id, name, current_shift_hours, past_7_day_work_hours
                   FROM driver
                   WHERE driver_id = ?"#,
                params![driver_id],
                Self::map_row,
            )
            .optional()?;

        Ok(driver)
    }

    /// 查询全部司机（名册顺序）
    pub fn list_all(&self) -> RepositoryResult<Vec<Driver>> {
        let conn = self.get_conn()?;
        Self::list_all_with(&conn)
    }

    /// 在调用方已持有的连接上查询（快照加载共用同一把锁）
    pub(crate) fn list_all_with(conn: &Connection) -> RepositoryResult<Vec<Driver>> {
        let mut stmt = conn.prepare(
            r#"SELECT driver_id, name, current_shift_hours, past_7_day_work_hours
               FROM driver
               ORDER BY rowid ASC"#,
        )?;

        let drivers = stmt
            .query_map([], Self::map_row)?
            .collect::<Result<Vec<Driver>, _>>()?;

        Ok(drivers)
    }

    /// 更新司机
    pub fn update(&self, driver: &Driver) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        let affected = conn.execute(
            r#"UPDATE driver
               SET name = ?, current_shift_hours = ?, past_7_day_work_hours = ?
               WHERE driver_id = ?"#,
            params![
                &driver.name,
                driver.current_shift_hours,
                driver.past_7_day_work_hours,
                &driver.driver_id,
            ],
        )?;

        if affected == 0 {
            return Err(RepositoryError::not_found("Driver", &driver.driver_id));
        }
        Ok(())
    }

    /// 删除司机
    pub fn delete(&self, driver_id: &str) -> RepositoryResult<()> {
        let conn = self.get_conn()?;

        let affected = conn.execute("DELETE FROM driver WHERE driver_id = ?", params![driver_id])?;
        if affected == 0 {
            return Err(RepositoryError::not_found("Driver", driver_id));
        }
        Ok(())
    }

    /// 司机总数
    pub fn count(&self) -> RepositoryResult<usize> {
        let conn = self.get_conn()?;
        let n: i64 = conn.query_row("SELECT COUNT(*) FROM driver", [], |row| row.get(0))?;
        Ok(n as usize)
    }

    /// 映射数据库行到Driver对象
    fn map_row(row: &rusqlite::Row) -> rusqlite::Result<Driver> {
        Ok(Driver {
            driver_id: row.get(0)?,
            name: row.get(1)?,
            current_shift_hours: row.get(2)?,
            past_7_day_work_hours: row.get(3)?,
        })
    }
}
