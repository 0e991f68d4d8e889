// ==========================================
// 供应链碳排放核算 - 导入层
// ==========================================
// 职责: 外部运单文件 → ShipmentRecord
// 支持: CSV (首行表头)
// ==========================================

pub mod error;
pub mod field_mapper;
pub mod file_parser;

pub use error::{ImportError, ImportResult};
pub use field_mapper::ShipmentFieldMapper;
pub use file_parser::{CsvShipmentParser, RawRow};

use crate::domain::shipment::ShipmentRecord;
use std::path::Path;

/// 读取 CSV 运单文件
pub fn load_shipments_from_csv<P: AsRef<Path>>(path: P) -> ImportResult<Vec<ShipmentRecord>> {
    let path = path.as_ref();
    let rows = CsvShipmentParser.parse_to_raw_records(path)?;
    let records = ShipmentFieldMapper.map_all(&rows)?;

    tracing::info!(
        path = %path.display(),
        record_count = records.len(),
        "运单文件导入完成"
    );

    Ok(records)
}
