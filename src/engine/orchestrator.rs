// ==========================================
// 供应链碳排放核算 - 批处理编排器
// ==========================================
// 流程: 排放回填 → 供应链汇总 → 结构校验 → 异常检测 → 质量报告 → 供应商汇总
// 编排器只串联各引擎, 不包含业务规则
// ==========================================

use crate::config::CarbonConfig;
use crate::domain::emission::{EmissionResult, SupplyChainEmissions};
use crate::domain::shipment::{QualityReport, ShipmentRecord, SupplierEmissions};
use crate::engine::emissions::EmissionsEngine;
use crate::engine::transformation::{
    aggregate_by_supplier, EnrichmentOutcome, TransformationPipeline,
};
use crate::quality::DataQualityScreener;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

// ==========================================
// BatchOutcome - 批处理结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BatchOutcome {
    pub emissions: SupplyChainEmissions,
    pub quality: QualityReport,
    pub suppliers: Vec<SupplierEmissions>,
}

// ==========================================
// CarbonOrchestrator - 编排器
// ==========================================
pub struct CarbonOrchestrator {
    config: Arc<CarbonConfig>,
    engine: EmissionsEngine,
    screener: DataQualityScreener,
}

impl CarbonOrchestrator {
    pub fn new(config: Arc<CarbonConfig>) -> Self {
        Self {
            engine: EmissionsEngine::new(Arc::clone(&config)),
            screener: DataQualityScreener::new(Arc::clone(&config)),
            config,
        }
    }

    pub fn engine(&self) -> &EmissionsEngine {
        &self.engine
    }

    pub fn screener(&self) -> &DataQualityScreener {
        &self.screener
    }

    /// 执行一批运单
    ///
    /// # 参数
    /// - `records`: 运单记录 (就地回填排放值)
    /// - `include_scope_3`: None 时取配置缺省值
    ///
    /// # 返回
    /// BatchOutcome; `emissions.failures` 中的 index 对应 `records` 下标
    pub fn run_batch(
        &self,
        records: &mut [ShipmentRecord],
        include_scope_3: Option<bool>,
    ) -> BatchOutcome {
        let include_scope_3 = include_scope_3.unwrap_or(self.config.operational.include_scope_3);
        tracing::info!(record_count = records.len(), include_scope_3, "开始批处理");

        // 1. 排放回填 (每票只计算一次)
        let enrichment =
            TransformationPipeline::new(&self.engine).enrich_shipments(records);

        // 2. 供应链汇总 (复用回填结果; 运输方式无法识别的记录已在回填阶段记为失败)
        let emissions = self.aggregate(records, enrichment, include_scope_3);

        // 3. 数据质量
        let issues = self.screener.validate_shipments(records);
        let anomalies = self.screener.flag_anomalous_emissions(records, None);
        let quality = self.screener.generate_data_quality_report(&issues, &anomalies);

        // 4. 供应商汇总
        let suppliers = aggregate_by_supplier(records);

        tracing::info!(
            shipment_count = emissions.shipment_count,
            failed_count = emissions.failed_count,
            total_issues = quality.total_issues,
            total_anomalies = quality.total_anomalies,
            "批处理完成"
        );

        BatchOutcome {
            emissions,
            quality,
            suppliers,
        }
    }

    fn aggregate(
        &self,
        records: &[ShipmentRecord],
        enrichment: EnrichmentOutcome,
        include_scope_3: bool,
    ) -> SupplyChainEmissions {
        let computed: Vec<(EmissionResult, f64)> = enrichment
            .computed
            .into_iter()
            .map(|(index, emissions)| (emissions, records[index].weight_kg))
            .collect();

        self.engine
            .summarize_emissions(&computed, enrichment.failures, include_scope_3)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::emission::ShipmentInput;
    use chrono::NaiveDate;

    fn create_test_record(shipment_id: &str, mode: &str, weight_kg: f64) -> ShipmentRecord {
        let t = NaiveDate::from_ymd_opt(2024, 5, 1)
            .unwrap()
            .and_hms_opt(9, 0, 0)
            .unwrap();
        ShipmentRecord {
            shipment_id: shipment_id.to_string(),
            origin_lat: Some(1.0),
            origin_lng: Some(1.0),
            destination_lat: Some(2.0),
            destination_lng: Some(2.0),
            transport_mode: mode.to_string(),
            weight_kg,
            distance_km: 1000.0,
            departure_time: t,
            arrival_time: t,
            created_at: t,
            supplier_id: Some("SUP-1".to_string()),
            carrier_id: None,
            co2_kg: None,
            ch4_kg: None,
            n2o_kg: None,
            co2_equivalent_kg: None,
        }
    }

    #[test]
    fn test_failure_indices_map_to_records() {
        let orchestrator = CarbonOrchestrator::new(Arc::new(CarbonConfig::default()));
        let mut records = vec![
            create_test_record("S0", "rail", 10_000.0),
            create_test_record("S1", "ground", 10_000.0),
            create_test_record("S2", "ground", -1.0),
        ];

        let outcome = orchestrator.run_batch(&mut records, Some(false));

        assert_eq!(outcome.emissions.shipment_count, 1);
        assert_eq!(outcome.emissions.failed_count, 2);
        let indices: Vec<usize> = outcome.emissions.failures.iter().map(|f| f.index).collect();
        assert_eq!(indices, vec![0, 2]);
        assert_eq!(outcome.emissions.failures[1].shipment_id.as_deref(), Some("S2"));
    }

    #[test]
    fn test_batch_totals_match_engine_totals() {
        let config = Arc::new(CarbonConfig::default());
        let orchestrator = CarbonOrchestrator::new(Arc::clone(&config));
        let mut records = vec![
            create_test_record("S0", "ground", 10_000.0),
            create_test_record("S1", "sea", 0.0),
            create_test_record("S2", "air", 2_000.0),
        ];
        let inputs: Vec<ShipmentInput> = records
            .iter()
            .map(|r| crate::engine::transformation::record_to_input(r).unwrap())
            .collect();

        let expected = orchestrator.engine().calculate_supply_chain_emissions(&inputs, true);
        let outcome = orchestrator.run_batch(&mut records, Some(true));

        assert_eq!(outcome.emissions.total_co2_kg, expected.total_co2_kg);
        assert_eq!(outcome.emissions.total_co2_equivalent_kg, expected.total_co2_equivalent_kg);
        assert_eq!(outcome.emissions.scope_3_emissions_kg, expected.scope_3_emissions_kg);
        assert_eq!(outcome.emissions.shipment_count, 2);
        assert_eq!(outcome.emissions.failures[0].index, 1);
        assert_eq!(outcome.emissions.failures[0].shipment_id.as_deref(), Some("S1"));
    }

    #[test]
    fn test_scope_3_defaults_from_config() {
        let mut config = CarbonConfig::default();
        config.operational.include_scope_3 = false;
        let orchestrator = CarbonOrchestrator::new(Arc::new(config));
        let mut records = vec![create_test_record("S1", "ground", 10_000.0)];

        let outcome = orchestrator.run_batch(&mut records, None);

        assert_eq!(outcome.emissions.scope_3_emissions_kg, 0.0);
        assert_eq!(outcome.suppliers[0].total_co2_kg, 712.0);
    }
}
