// ==========================================
// 末端配送车队仿真 - 字段映射器
// ==========================================
// 职责: CSV 原始行 → Driver / Route / Order + 类型转换与范围校验
// 行号: 表头为第 1 行，数据从第 2 行起
// ==========================================

use crate::domain::{Driver, Order, Route, TrafficLevel};
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::RawRecord;

pub struct FieldMapper;

impl FieldMapper {
    /// 司机行: driver_id(可选), name, shift_hours, past_week_hours
    pub fn map_driver(&self, row: &RawRecord, row_number: usize) -> ImportResult<Driver> {
        let name = self.require_string(row, "name", row_number)?;
        let driver_id = self.get_string(row, "driver_id").unwrap_or_else(|| name.clone());

        let current_shift_hours = self.require_f64(row, "shift_hours", row_number)?;
        if current_shift_hours < 0.0 {
            return Err(ImportError::ValueRangeError {
                row: row_number,
                field: "shift_hours".to_string(),
                message: format!("不能为负数: {}", current_shift_hours),
            });
        }

        let past_7_day_work_hours = match self.get_string(row, "past_week_hours") {
            Some(raw) => self.parse_week_hours(&raw, row_number)?,
            None => 0.0,
        };

        Ok(Driver {
            driver_id,
            name,
            current_shift_hours,
            past_7_day_work_hours,
        })
    }

    /// 线路行: route_id, distance_km, traffic_level, base_time_min
    pub fn map_route(&self, row: &RawRecord, row_number: usize) -> ImportResult<Route> {
        let route_id = self.require_string(row, "route_id", row_number)?;
        let distance_km = self.require_positive(row, "distance_km", row_number)?;
        let traffic_raw = self.require_string(row, "traffic_level", row_number)?;
        let traffic_level = traffic_raw
            .parse::<TrafficLevel>()
            .map_err(|message| ImportError::TypeConversionError {
                row: row_number,
                field: "traffic_level".to_string(),
                message,
            })?;
        let base_time_min = self.require_positive(row, "base_time_min", row_number)?;

        Ok(Route {
            route_id,
            distance_km,
            traffic_level,
            base_time_min,
        })
    }

    /// 订单行: order_id, value_rs, route_id, delivery_time
    pub fn map_order(&self, row: &RawRecord, row_number: usize) -> ImportResult<Order> {
        Ok(Order {
            order_id: self.require_string(row, "order_id", row_number)?,
            value_rs: self.require_positive(row, "value_rs", row_number)?,
            route_id: self.require_string(row, "route_id", row_number)?,
            delivery_timestamp: self.get_string(row, "delivery_time").unwrap_or_default(),
        })
    }

    /// 近7日工时: 单个数值，或以 `|` 分隔的每日工时（求和）
    fn parse_week_hours(&self, raw: &str, row_number: usize) -> ImportResult<f64> {
        let mut total = 0.0;
        for part in raw.split('|').map(str::trim).filter(|p| !p.is_empty()) {
            let hours = part
                .parse::<f64>()
                .map_err(|e| ImportError::TypeConversionError {
                    row: row_number,
                    field: "past_week_hours".to_string(),
                    message: format!("{} ({})", e, part),
                })?;
            if hours < 0.0 {
                return Err(ImportError::ValueRangeError {
                    row: row_number,
                    field: "past_week_hours".to_string(),
                    message: format!("不能为负数: {}", hours),
                });
            }
            total += hours;
        }
        Ok(total)
    }

    /// 列名别名
    fn aliases(key: &str) -> &'static [&'static str] {
        match key {
            "driver_id" => &["driver_id", "id"],
            "name" => &["name", "driver_name"],
            "shift_hours" => &["shift_hours", "current_shift_hours"],
            "past_week_hours" => &["past_week_hours", "past_7_day_work_hours"],
            "route_id" => &["route_id", "assigned_route"],
            "distance_km" => &["distance_km", "distance"],
            "traffic_level" => &["traffic_level", "traffic"],
            "base_time_min" => &["base_time_min", "base_time"],
            "order_id" => &["order_id"],
            "value_rs" => &["value_rs", "value"],
            "delivery_time" => &["delivery_time", "delivery_timestamp"],
            _ => &[],
        }
    }

    /// 提取字符串字段（空值视为缺失）
    fn get_string(&self, row: &RawRecord, key: &str) -> Option<String> {
        Self::aliases(key)
            .iter()
            .filter_map(|alias| row.get(*alias))
            .map(|v| v.trim())
            .find(|v| !v.is_empty())
            .map(str::to_string)
    }

    fn require_string(&self, row: &RawRecord, key: &str, row_number: usize) -> ImportResult<String> {
        self.get_string(row, key)
            .ok_or_else(|| ImportError::RequiredFieldMissing {
                row: row_number,
                field: key.to_string(),
            })
    }

    fn require_f64(&self, row: &RawRecord, key: &str, row_number: usize) -> ImportResult<f64> {
        let raw = self.require_string(row, key, row_number)?;
        raw.parse::<f64>()
            .ok()
            .filter(|v| v.is_finite())
            .ok_or_else(|| ImportError::TypeConversionError {
                row: row_number,
                field: key.to_string(),
                message: format!("无法解析为数值: {}", raw),
            })
    }

    fn require_positive(&self, row: &RawRecord, key: &str, row_number: usize) -> ImportResult<f64> {
        let value = self.require_f64(row, key, row_number)?;
        if value <= 0.0 {
            return Err(ImportError::ValueRangeError {
                row: row_number,
                field: key.to_string(),
                message: format!("必须大于 0: {}", value),
            });
        }
        Ok(value)
    }
}
