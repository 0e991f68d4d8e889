// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use chrono::{Duration, NaiveDate, NaiveDateTime};
use carbon_analytics::domain::ShipmentRecord;

/// 测试基准时间 2024-06-01 08:00:00
pub fn base_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 1)
        .unwrap()
        .and_hms_opt(8, 0, 0)
        .unwrap()
}

// ==========================================
// ShipmentRecord 构建器
// ==========================================

pub struct ShipmentBuilder {
    record: ShipmentRecord,
}

impl ShipmentBuilder {
    /// 默认: 坐标齐全, 陆运 1000 km × 10 t, 出发后 1 小时录入, 3 天后到达
    pub fn new(shipment_id: &str) -> Self {
        Self {
            record: ShipmentRecord {
                shipment_id: shipment_id.to_string(),
                origin_lat: Some(40.7128),
                origin_lng: Some(-74.0060),
                destination_lat: Some(41.8781),
                destination_lng: Some(-87.6298),
                transport_mode: "ground".to_string(),
                weight_kg: 10_000.0,
                distance_km: 1000.0,
                departure_time: base_time(),
                arrival_time: base_time() + Duration::days(3),
                created_at: base_time() + Duration::hours(1),
                supplier_id: None,
                carrier_id: None,
                co2_kg: None,
                ch4_kg: None,
                n2o_kg: None,
                co2_equivalent_kg: None,
            },
        }
    }

    pub fn mode(mut self, mode: &str) -> Self {
        self.record.transport_mode = mode.to_string();
        self
    }

    pub fn weight_kg(mut self, weight_kg: f64) -> Self {
        self.record.weight_kg = weight_kg;
        self
    }

    pub fn distance_km(mut self, distance_km: f64) -> Self {
        self.record.distance_km = distance_km;
        self
    }

    pub fn supplier(mut self, supplier_id: &str) -> Self {
        self.record.supplier_id = Some(supplier_id.to_string());
        self
    }

    pub fn co2_kg(mut self, co2_kg: f64) -> Self {
        self.record.co2_kg = Some(co2_kg);
        self
    }

    pub fn without_origin_lat(mut self) -> Self {
        self.record.origin_lat = None;
        self
    }

    pub fn without_destination(mut self) -> Self {
        self.record.destination_lat = None;
        self.record.destination_lng = None;
        self
    }

    /// 到达时间早于出发时间 (仍晚于录入时间判定的基准)
    pub fn arrival_before_departure(mut self) -> Self {
        self.record.arrival_time = self.record.departure_time - Duration::hours(5);
        self
    }

    /// 录入时间早于出发时间
    pub fn created_before_departure(mut self) -> Self {
        self.record.created_at = self.record.departure_time - Duration::days(2);
        self
    }

    pub fn build(self) -> ShipmentRecord {
        self.record
    }
}

/// 确定性样本: 均值约 10, 均匀散布于 [7.5, 12.5] (步长 0.05, 非正态)
///
/// 加入一个远端值后, 其 z-score 远大于 3, 而样本内任一值都不超过 1
pub fn evenly_spread_co2_values(count: usize) -> Vec<f64> {
    (0..count)
        .map(|i| {
            let offset = ((i * 37) % 101) as f64 - 50.0;
            10.0 + offset / 20.0
        })
        .collect()
}
