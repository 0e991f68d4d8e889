// ==========================================
// 供应链碳排放核算 - 运单转换管道
// ==========================================
// 职责: 运单记录 → 排放回填 / 供应商汇总 / 派生指标
// 失败策略: 与供应链汇总一致, 跳过并报告
// ==========================================

use crate::domain::emission::{EmissionResult, ShipmentFailure, ShipmentInput};
use crate::domain::shipment::{ShipmentRecord, SupplierEmissions};
use crate::domain::types::TransportMode;
use crate::engine::emissions::{round_to, EmissionsEngine, ROUNDING_DECIMALS};
use crate::engine::error::EngineResult;
use std::collections::BTreeMap;

/// 运单记录 → 引擎输入 (在此处完成运输方式的边界校验)
pub fn record_to_input(record: &ShipmentRecord) -> EngineResult<ShipmentInput> {
    let mode: TransportMode = record.transport_mode.parse()?;
    Ok(ShipmentInput::new(record.distance_km, record.weight_kg, mode)
        .with_shipment_id(record.shipment_id.clone()))
}

/// 每公里碳强度 (kg CO2 / km)
///
/// co2_kg 缺失或距离非正时返回 None
pub fn carbon_intensity_per_km(record: &ShipmentRecord) -> Option<f64> {
    let co2_kg = record.co2_kg?;
    (record.distance_km > 0.0).then(|| co2_kg / record.distance_km)
}

/// 按供应商汇总 CO2
///
/// 无 supplier_id 的记录跳过; co2_kg 缺失按 0 计; 结果按供应商编号排序
pub fn aggregate_by_supplier(records: &[ShipmentRecord]) -> Vec<SupplierEmissions> {
    let mut grouped: BTreeMap<&str, (f64, usize)> = BTreeMap::new();

    for record in records {
        let supplier_id = match record.supplier_id.as_deref() {
            Some(id) if !id.trim().is_empty() => id,
            _ => continue,
        };
        let entry = grouped.entry(supplier_id).or_insert((0.0, 0));
        entry.0 += record.co2_kg.unwrap_or(0.0);
        entry.1 += 1;
    }

    tracing::info!(supplier_count = grouped.len(), "供应商维度汇总完成");

    grouped
        .into_iter()
        .map(|(supplier_id, (total_co2_kg, total_shipments))| SupplierEmissions {
            supplier_id: supplier_id.to_string(),
            total_co2_kg: round_to(total_co2_kg, ROUNDING_DECIMALS),
            total_shipments,
        })
        .collect()
}

// ==========================================
// TransformationPipeline - 转换管道
// ==========================================
pub struct TransformationPipeline<'a> {
    engine: &'a EmissionsEngine,
}

impl<'a> TransformationPipeline<'a> {
    pub fn new(engine: &'a EmissionsEngine) -> Self {
        Self { engine }
    }

    /// 为运单记录回填排放值 (使用配置中的装载率/燃油效率缺省值, 不含天气)
    ///
    /// # 返回
    /// 未能回填的运单 (记录本身保持原样)
    pub fn calculate_emissions_for_shipments(
        &self,
        records: &mut [ShipmentRecord],
    ) -> Vec<ShipmentFailure> {
        self.enrich_shipments(records).failures
    }

    /// 回填排放值并保留单票结果, 供下游汇总复用
    pub fn enrich_shipments(&self, records: &mut [ShipmentRecord]) -> EnrichmentOutcome {
        let mut outcome = EnrichmentOutcome::default();

        for (index, record) in records.iter_mut().enumerate() {
            let result = record_to_input(record)
                .and_then(|input| self.engine.calculate_transport_emissions(&input));

            match result {
                Ok(emissions) => {
                    record.co2_kg = Some(emissions.co2_kg);
                    record.ch4_kg = Some(emissions.ch4_kg);
                    record.n2o_kg = Some(emissions.n2o_kg);
                    record.co2_equivalent_kg = Some(emissions.co2_equivalent_kg);
                    outcome.computed.push((index, emissions));
                }
                Err(e) => {
                    tracing::warn!(
                        index,
                        shipment_id = %record.shipment_id,
                        error = %e,
                        "运单排放回填失败, 已跳过"
                    );
                    outcome.failures.push(ShipmentFailure {
                        index,
                        shipment_id: Some(record.shipment_id.clone()),
                        reason: e.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            enriched = outcome.computed.len(),
            failed = outcome.failures.len(),
            "运单排放回填完成"
        );

        outcome
    }
}

// ==========================================
// EnrichmentOutcome - 回填结果
// ==========================================
// computed / failures 中的下标均对应输入记录, 按下标升序
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EnrichmentOutcome {
    pub computed: Vec<(usize, EmissionResult)>,
    pub failures: Vec<ShipmentFailure>,
}
