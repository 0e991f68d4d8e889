// ==========================================
// 供应链碳排放核算 - 运单字段映射器
// ==========================================
// 职责: 原始行记录 → ShipmentRecord + 类型转换
// 约定: 空单元格视为 None; 坐标与 co2_kg 允许缺失 (由筛查器报告)
// ==========================================

use crate::domain::shipment::ShipmentRecord;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::file_parser::RawRow;
use chrono::{DateTime, NaiveDateTime};

pub struct ShipmentFieldMapper;

impl ShipmentFieldMapper {
    /// 映射单行
    ///
    /// # 参数
    /// - row: 原始行记录
    /// - row_number: 数据行号 (从 1 开始, 用于错误定位)
    pub fn map_to_shipment(&self, row: &RawRow, row_number: usize) -> ImportResult<ShipmentRecord> {
        Ok(ShipmentRecord {
            shipment_id: self.require_string(row, "shipment_id", row_number)?,

            origin_lat: self.parse_f64(row, "origin_lat", row_number)?,
            origin_lng: self.parse_f64(row, "origin_lng", row_number)?,
            destination_lat: self.parse_f64(row, "destination_lat", row_number)?,
            destination_lng: self.parse_f64(row, "destination_lng", row_number)?,

            transport_mode: self.require_string(row, "transport_mode", row_number)?,
            weight_kg: self.require_f64(row, "weight_kg", row_number)?,
            distance_km: self.require_f64(row, "distance_km", row_number)?,

            departure_time: self.require_datetime(row, "departure_time", row_number)?,
            arrival_time: self.require_datetime(row, "arrival_time", row_number)?,
            created_at: self.require_datetime(row, "created_at", row_number)?,

            supplier_id: self.get_string(row, "supplier_id"),
            carrier_id: self.get_string(row, "carrier_id"),

            co2_kg: self.parse_f64(row, "co2_kg", row_number)?,
            ch4_kg: None,
            n2o_kg: None,
            co2_equivalent_kg: None,
        })
    }

    /// 映射全部行, 遇到第一条错误即返回
    pub fn map_all(&self, rows: &[RawRow]) -> ImportResult<Vec<ShipmentRecord>> {
        rows.iter()
            .enumerate()
            .map(|(idx, row)| self.map_to_shipment(row, idx + 1))
            .collect()
    }

    /// 提取字符串字段 (空白视为 None)
    fn get_string(&self, row: &RawRow, key: &str) -> Option<String> {
        row.get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .map(|v| v.to_string())
    }

    fn require_string(&self, row: &RawRow, key: &str, row_number: usize) -> ImportResult<String> {
        self.get_string(row, key).ok_or_else(|| ImportError::MissingField {
            row: row_number,
            field: key.to_string(),
        })
    }

    /// 解析浮点数
    fn parse_f64(&self, row: &RawRow, key: &str, row_number: usize) -> ImportResult<Option<f64>> {
        match self.get_string(row, key) {
            None => Ok(None),
            Some(value) => value
                .parse::<f64>()
                .map(Some)
                .map_err(|_| ImportError::TypeConversionError {
                    row: row_number,
                    field: key.to_string(),
                    message: format!("无法解析为浮点数: {}", value),
                }),
        }
    }

    fn require_f64(&self, row: &RawRow, key: &str, row_number: usize) -> ImportResult<f64> {
        self.parse_f64(row, key, row_number)?
            .ok_or_else(|| ImportError::MissingField {
                row: row_number,
                field: key.to_string(),
            })
    }

    /// 解析日期时间
    ///
    /// 支持: `YYYY-MM-DD HH:MM:SS` / `YYYY-MM-DDTHH:MM:SS` / RFC 3339 (换算为 UTC)
    fn require_datetime(&self, row: &RawRow, key: &str, row_number: usize) -> ImportResult<NaiveDateTime> {
        let value = self.require_string(row, key, row_number)?;

        NaiveDateTime::parse_from_str(&value, "%Y-%m-%d %H:%M:%S")
            .or_else(|_| NaiveDateTime::parse_from_str(&value, "%Y-%m-%dT%H:%M:%S"))
            .or_else(|_| DateTime::parse_from_rfc3339(&value).map(|dt| dt.naive_utc()))
            .map_err(|_| ImportError::DateFormatError {
                row: row_number,
                field: key.to_string(),
                value: value.clone(),
            })
    }
}
