// ==========================================
// CSV 运单导入集成测试
// ==========================================
// 测试目标: 文件 → ShipmentRecord → 批处理
// ==========================================

use carbon_analytics::config::CarbonConfig;
use carbon_analytics::engine::CarbonOrchestrator;
use carbon_analytics::importer::{load_shipments_from_csv, ImportError};
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

// ==========================================
// 测试辅助函数
// ==========================================

const HEADER: &str = "shipment_id,origin_lat,origin_lng,destination_lat,destination_lng,transport_mode,weight_kg,distance_km,departure_time,arrival_time,created_at,supplier_id,carrier_id,co2_kg";

fn write_csv(rows: &[&str]) -> NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
    writeln!(file, "{}", HEADER).unwrap();
    for row in rows {
        writeln!(file, "{}", row).unwrap();
    }
    file.flush().unwrap();
    file
}

// ==========================================
// 测试用例
// ==========================================

#[test]
fn test_load_valid_csv() {
    println!("\n=== 测试：导入合法 CSV ===");

    let file = write_csv(&[
        "S1,40.71,-74.00,41.88,-87.63,ground,10000,1000,2024-06-01 08:00:00,2024-06-04 08:00:00,2024-06-01 09:00:00,SUP-A,CAR-1,",
        "S2,,-74.00,41.88,-87.63,air,2000,500,2024-06-01T08:00:00,2024-06-01T20:00:00,2024-06-01T09:00:00,,,",
    ]);

    let records = load_shipments_from_csv(file.path()).unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].shipment_id, "S1");
    assert_eq!(records[0].supplier_id.as_deref(), Some("SUP-A"));
    assert_eq!(records[0].carrier_id.as_deref(), Some("CAR-1"));
    assert_eq!(records[1].origin_lat, None);
    assert_eq!(records[1].supplier_id, None);
    assert_eq!(records[1].transport_mode, "air");
}

#[test]
fn test_imported_records_run_through_batch() {
    println!("\n=== 测试：导入后批处理 ===");

    let file = write_csv(&[
        "S1,40.71,-74.00,41.88,-87.63,ground,10000,1000,2024-06-01 08:00:00,2024-06-04 08:00:00,2024-06-01 09:00:00,SUP-A,,",
        "S2,,-74.00,41.88,-87.63,air,2000,500,2024-06-01 08:00:00,2024-06-01 20:00:00,2024-06-01 09:00:00,SUP-A,,",
    ]);

    let mut records = load_shipments_from_csv(file.path()).unwrap();
    let orchestrator = CarbonOrchestrator::new(Arc::new(CarbonConfig::default()));
    let outcome = orchestrator.run_batch(&mut records, Some(false));

    assert_eq!(outcome.emissions.shipment_count, 2);
    assert_eq!(outcome.quality.total_issues, 1);
    assert_eq!(outcome.quality.issues[0].shipment_id, "S2");
    assert_eq!(outcome.suppliers.len(), 1);
    assert_eq!(outcome.suppliers[0].total_shipments, 2);
}

#[test]
fn test_missing_file() {
    println!("\n=== 测试：文件不存在 ===");

    let err = load_shipments_from_csv("/nonexistent/shipments.csv").unwrap_err();
    assert!(matches!(err, ImportError::FileNotFound(_)));
}

#[test]
fn test_missing_required_field_reports_row() {
    println!("\n=== 测试：必填字段缺失定位行号 ===");

    let file = write_csv(&[
        "S1,40.71,-74.00,41.88,-87.63,ground,10000,1000,2024-06-01 08:00:00,2024-06-04 08:00:00,2024-06-01 09:00:00,,,",
        "S2,40.71,-74.00,41.88,-87.63,ground,,1000,2024-06-01 08:00:00,2024-06-04 08:00:00,2024-06-01 09:00:00,,,",
    ]);

    let err = load_shipments_from_csv(file.path()).unwrap_err();
    assert!(matches!(err, ImportError::MissingField { row: 2, ref field } if field == "weight_kg"));
}

#[test]
fn test_bad_datetime_rejected() {
    println!("\n=== 测试：日期格式错误 ===");

    let file = write_csv(&[
        "S1,40.71,-74.00,41.88,-87.63,ground,10000,1000,06/01/2024,2024-06-04 08:00:00,2024-06-01 09:00:00,,,",
    ]);

    let err = load_shipments_from_csv(file.path()).unwrap_err();
    assert!(matches!(err, ImportError::DateFormatError { row: 1, .. }));
}
