// ==========================================
// 供应链碳排放核算 - 排放异常检测
// ==========================================
// 方法: 全局 z-score (总体标准差, 除以 N)
// 不做滑动窗口, 不按运输方式归一化
// ==========================================

use crate::domain::shipment::{Anomaly, ShipmentRecord};
use crate::quality::dq_validator::DataQualityScreener;

/// 总体均值与标准差
///
/// 空样本返回 None
pub fn population_stats(values: &[f64]) -> Option<(f64, f64)> {
    if values.is_empty() {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / n;
    Some((mean, variance.sqrt()))
}

impl DataQualityScreener {
    /// 标记排放异常运单
    ///
    /// # 参数
    /// - `records`: 运单记录 (co2_kg 缺失的记录被跳过, 不按 0 处理)
    /// - `threshold`: z-score 阈值, None 时取配置值 (缺省 3.0)
    ///
    /// # 返回
    /// z > threshold 的运单; 样本为空或标准差为 0 时返回空列表
    pub fn flag_anomalous_emissions(
        &self,
        records: &[ShipmentRecord],
        threshold: Option<f64>,
    ) -> Vec<Anomaly> {
        let threshold = threshold.unwrap_or(self.config.anomaly.z_score_threshold);

        let values: Vec<f64> = records.iter().filter_map(|r| r.usable_co2_kg()).collect();
        let (mean, std) = match population_stats(&values) {
            Some(stats) => stats,
            None => return Vec::new(),
        };

        // 退化样本: 无法区分异常
        if std == 0.0 {
            tracing::debug!(sample_size = values.len(), "CO2 标准差为 0, 跳过异常检测");
            return Vec::new();
        }

        let anomalies: Vec<Anomaly> = records
            .iter()
            .filter_map(|record| {
                let co2_kg = record.usable_co2_kg()?;
                let z_score = ((co2_kg - mean) / std).abs();
                (z_score > threshold).then(|| Anomaly {
                    shipment_id: record.shipment_id.clone(),
                    z_score,
                    co2_kg,
                })
            })
            .collect();

        tracing::info!(
            sample_size = values.len(),
            mean,
            std,
            threshold,
            anomaly_count = anomalies.len(),
            "排放异常检测完成"
        );

        anomalies
    }
}
