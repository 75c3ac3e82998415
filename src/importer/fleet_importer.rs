// ==========================================
// 末端配送车队仿真 - 车队基础数据导入
// ==========================================
// 职责: CSV → driver / route / delivery_order（逐行 upsert）
// 策略: 行级错误记录并跳过，不中断整个文件
// ==========================================

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{error, info, warn};

use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::FieldMapper;
use crate::importer::file_parser::{CsvParser, FileParser, RawRecord};
use crate::repository::{DriverRepository, OrderRepository, RouteRepository};

// ==========================================
// FleetEntity - 导入对象类型
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FleetEntity {
    Drivers,
    Routes,
    Orders,
}

impl FleetEntity {
    pub const ALL: [FleetEntity; 3] = [FleetEntity::Drivers, FleetEntity::Routes, FleetEntity::Orders];

    /// 目录导入时的约定文件名
    pub fn file_name(&self) -> &'static str {
        match self {
            FleetEntity::Drivers => "drivers.csv",
            FleetEntity::Routes => "routes.csv",
            FleetEntity::Orders => "orders.csv",
        }
    }
}

/// 行级导入错误
#[derive(Debug, Clone, Serialize)]
pub struct ImportRowError {
    pub row_number: usize,
    pub message: String,
}

/// 单文件导入汇总
#[derive(Debug, Clone, Serialize)]
pub struct FleetImportSummary {
    pub entity: FleetEntity,
    pub file: String,
    pub total_rows: usize,
    pub imported: usize,
    pub failed: usize,
    pub errors: Vec<ImportRowError>,
}

// ==========================================
// FleetImporter Trait
// ==========================================
// 实现者: FleetImporterImpl
#[async_trait]
pub trait FleetImporter: Send + Sync {
    /// 导入司机名册（行顺序即名册顺序）
    async fn import_drivers<P: AsRef<Path> + Send>(&self, file_path: P) -> ImportResult<FleetImportSummary>;

    /// 导入线路目录
    async fn import_routes<P: AsRef<Path> + Send>(&self, file_path: P) -> ImportResult<FleetImportSummary>;

    /// 导入订单
    async fn import_orders<P: AsRef<Path> + Send>(&self, file_path: P) -> ImportResult<FleetImportSummary>;

    /// 导入目录下的 drivers.csv / routes.csv / orders.csv（并发执行，缺失文件跳过）
    async fn import_directory<P: AsRef<Path> + Send>(
        &self,
        dir: P,
    ) -> ImportResult<Vec<Result<FleetImportSummary, String>>>;
}

// ==========================================
// FleetImporterImpl
// ==========================================
pub struct FleetImporterImpl {
    driver_repo: Arc<DriverRepository>,
    route_repo: Arc<RouteRepository>,
    order_repo: Arc<OrderRepository>,
    parser: CsvParser,
    mapper: FieldMapper,
}

impl FleetImporterImpl {
    pub fn new(
        driver_repo: Arc<DriverRepository>,
        route_repo: Arc<RouteRepository>,
        order_repo: Arc<OrderRepository>,
    ) -> Self {
        Self {
            driver_repo,
            route_repo,
            order_repo,
            parser: CsvParser,
            mapper: FieldMapper,
        }
    }

    /// 导入单个文件
    pub fn import_file(&self, entity: FleetEntity, file_path: &Path) -> ImportResult<FleetImportSummary> {
        let file = file_path.display().to_string();
        info!(entity = ?entity, file = %file, "开始导入文件");

        let records = self.parser.parse_to_raw_records(file_path)?;
        let summary = self.import_records(entity, file, &records)?;

        info!(
            entity = ?entity,
            total = summary.total_rows,
            imported = summary.imported,
            failed = summary.failed,
            "文件导入完成"
        );
        Ok(summary)
    }

    /// 导入已解析的行记录
    pub fn import_records(
        &self,
        entity: FleetEntity,
        file: String,
        records: &[RawRecord],
    ) -> ImportResult<FleetImportSummary> {
        let mut summary = FleetImportSummary {
            entity,
            file,
            total_rows: records.len(),
            imported: 0,
            failed: 0,
            errors: Vec::new(),
        };

        for (idx, row) in records.iter().enumerate() {
            let row_number = idx + 2;
            match self.import_row(entity, row, row_number) {
                Ok(()) => summary.imported += 1,
                // 写库失败视为整体失败
                Err(ImportError::Repository(e)) => return Err(ImportError::Repository(e)),
                Err(e) => {
                    warn!(entity = ?entity, row = row_number, error = %e, "行数据无效，跳过");
                    summary.failed += 1;
                    summary.errors.push(ImportRowError {
                        row_number,
                        message: e.to_string(),
                    });
                }
            }
        }

        Ok(summary)
    }

    fn import_row(&self, entity: FleetEntity, row: &RawRecord, row_number: usize) -> ImportResult<()> {
        match entity {
            FleetEntity::Drivers => {
                let driver = self.mapper.map_driver(row, row_number)?;
                self.driver_repo.upsert(&driver)?;
            }
            FleetEntity::Routes => {
                let route = self.mapper.map_route(row, row_number)?;
                self.route_repo.upsert(&route)?;
            }
            FleetEntity::Orders => {
                let order = self.mapper.map_order(row, row_number)?;
                self.order_repo.upsert(&order)?;
            }
        }
        Ok(())
    }
}

#[async_trait]
impl FleetImporter for FleetImporterImpl {
    async fn import_drivers<P: AsRef<Path> + Send>(&self, file_path: P) -> ImportResult<FleetImportSummary> {
        self.import_file(FleetEntity::Drivers, file_path.as_ref())
    }

    async fn import_routes<P: AsRef<Path> + Send>(&self, file_path: P) -> ImportResult<FleetImportSummary> {
        self.import_file(FleetEntity::Routes, file_path.as_ref())
    }

    async fn import_orders<P: AsRef<Path> + Send>(&self, file_path: P) -> ImportResult<FleetImportSummary> {
        self.import_file(FleetEntity::Orders, file_path.as_ref())
    }

    async fn import_directory<P: AsRef<Path> + Send>(
        &self,
        dir: P,
    ) -> ImportResult<Vec<Result<FleetImportSummary, String>>> {
        use futures::future::join_all;

        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(ImportError::FileNotFound(dir.display().to_string()));
        }

        let targets: Vec<(FleetEntity, PathBuf)> = FleetEntity::ALL
            .iter()
            .map(|entity| (*entity, dir.join(entity.file_name())))
            .filter(|(entity, path)| {
                let exists = path.exists();
                if !exists {
                    warn!(entity = ?entity, file = %path.display(), "文件不存在，跳过");
                }
                exists
            })
            .collect();

        info!(count = targets.len(), dir = %dir.display(), "开始批量导入目录");

        let tasks = targets.into_iter().map(|(entity, path)| async move {
            self.import_file(entity, &path).map_err(|e| {
                error!(entity = ?entity, file = %path.display(), error = %e, "文件导入失败");
                format!("文件 {} 导入失败: {}", path.display(), e)
            })
        });

        let results = join_all(tasks).await;

        info!(
            total = results.len(),
            success = results.iter().filter(|r| r.is_ok()).count(),
            failed = results.iter().filter(|r| r.is_err()).count(),
            "批量导入完成"
        );

        Ok(results)
    }
}
