// ==========================================
// 供应链碳排放核算 - CSV 文件解析器
// ==========================================
// 职责: CSV → 原始行记录 (HashMap<列名, 值>)
// ==========================================

use crate::importer::error::{ImportError, ImportResult};
use csv::ReaderBuilder;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// 原始行记录
pub type RawRow = HashMap<String, String>;

// ==========================================
// CsvShipmentParser
// ==========================================
pub struct CsvShipmentParser;

impl CsvShipmentParser {
    /// 解析 CSV 文件
    pub fn parse_to_raw_records(&self, file_path: &Path) -> ImportResult<Vec<RawRow>> {
        // 检查文件存在
        if !file_path.exists() {
            return Err(ImportError::FileNotFound(file_path.display().to_string()));
        }

        // 检查扩展名
        if let Some(ext) = file_path.extension() {
            if !ext.eq_ignore_ascii_case("csv") {
                return Err(ImportError::UnsupportedFormat(
                    ext.to_string_lossy().to_string(),
                ));
            }
        }

        let file = File::open(file_path)?;
        self.parse_reader(file)
    }

    /// 从任意 reader 解析 (首行为表头)
    pub fn parse_reader<R: Read>(&self, reader: R) -> ImportResult<Vec<RawRow>> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(reader);

        // 读取表头
        let headers: Vec<String> = reader
            .headers()?
            .iter()
            .map(|h| h.trim().to_string())
            .collect();

        let mut records = Vec::new();
        for result in reader.records() {
            let record = result?;
            let row: RawRow = record
                .iter()
                .enumerate()
                .filter_map(|(col_idx, value)| {
                    headers
                        .get(col_idx)
                        .map(|header| (header.clone(), value.trim().to_string()))
                })
                .collect();

            // 跳过完全空白的行
            if row.values().all(|v| v.is_empty()) {
                continue;
            }

            records.push(row);
        }

        tracing::debug!(row_count = records.len(), "CSV 解析完成");
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_reader_trims_and_skips_blank_rows() {
        let data = "shipment_id, weight_kg\n S1 , 100\n,\nS2,200\n";
        let rows = CsvShipmentParser.parse_reader(data.as_bytes()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["shipment_id"], "S1");
        assert_eq!(rows[0]["weight_kg"], "100");
        assert_eq!(rows[1]["shipment_id"], "S2");
    }

    #[test]
    fn test_missing_file() {
        let result = CsvShipmentParser.parse_to_raw_records(Path::new("/nonexistent/shipments.csv"));
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[test]
    fn test_unsupported_extension() {
        let file = tempfile::Builder::new().suffix(".xlsx").tempfile().unwrap();
        let result = CsvShipmentParser.parse_to_raw_records(file.path());
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(_))));
    }
}
