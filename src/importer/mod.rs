// ==========================================
// 末端配送车队仿真 - 导入层
// ==========================================
// 职责: 外部种子数据导入（司机 / 线路 / 订单）
// 支持: CSV
// ==========================================

pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod fleet_importer;

// 重导出核心类型
pub use error::{ImportError, ImportResult};
pub use field_mapper::FieldMapper;
pub use file_parser::{CsvParser, FileParser, RawRecord};
pub use fleet_importer::{
    FleetEntity, FleetImportSummary, FleetImporter, FleetImporterImpl, ImportRowError,
};
