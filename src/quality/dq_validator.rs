// ==========================================
// 供应链碳排放核算 - 运单结构校验
// ==========================================
// 职责: 坐标缺失 / 非正数值 / 时间倒置 / 出发晚于录入
// 原则: 不抛错, 每条违规生成一条 Issue; 单条记录可命中多条规则
// ==========================================

use crate::config::CarbonConfig;
use crate::domain::shipment::{Issue, ShipmentRecord};
use crate::domain::types::IssueRule;
use std::sync::Arc;

// ==========================================
// DataQualityScreener - 数据质量筛查器
// ==========================================
// 无跨调用状态, 仅持有不可变配置
pub struct DataQualityScreener {
    pub(crate) config: Arc<CarbonConfig>,
}

impl DataQualityScreener {
    pub fn new(config: Arc<CarbonConfig>) -> Self {
        Self { config }
    }

    /// 校验运单记录
    ///
    /// # 返回
    /// 问题列表 (无问题时为空列表), 顺序与输入记录及规则表顺序一致
    pub fn validate_shipments(&self, records: &[ShipmentRecord]) -> Vec<Issue> {
        let issues: Vec<Issue> = records
            .iter()
            .flat_map(|record| {
                Self::violated_rules(record)
                    .into_iter()
                    .map(move |rule| Issue::new(&record.shipment_id, rule))
            })
            .collect();

        tracing::info!(
            record_count = records.len(),
            issues_found = issues.len(),
            "运单数据质量校验完成"
        );

        issues
    }

    /// 单条记录命中的规则
    fn violated_rules(record: &ShipmentRecord) -> Vec<IssueRule> {
        let mut rules = Vec::new();

        if !record.has_origin() {
            rules.push(IssueRule::MissingOrigin);
        }
        if !record.has_destination() {
            rules.push(IssueRule::MissingDestination);
        }
        // NaN 同样视为非正
        if !(record.weight_kg > 0.0) {
            rules.push(IssueRule::NonPositiveWeight);
        }
        if !(record.distance_km > 0.0) {
            rules.push(IssueRule::NonPositiveDistance);
        }
        if record.departure_time > record.arrival_time {
            rules.push(IssueRule::DepartureAfterArrival);
        }
        if record.departure_time > record.created_at {
            rules.push(IssueRule::DepartureInFuture);
        }

        rules
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, NaiveDate, NaiveDateTime};

    fn base_time() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 6, 1)
            .unwrap()
            .and_hms_opt(8, 0, 0)
            .unwrap()
    }

    fn create_test_record(shipment_id: &str) -> ShipmentRecord {
        ShipmentRecord {
            shipment_id: shipment_id.to_string(),
            origin_lat: Some(40.7128),
            origin_lng: Some(-74.0060),
            destination_lat: Some(34.0522),
            destination_lng: Some(-118.2437),
            transport_mode: "ground".to_string(),
            weight_kg: 1200.0,
            distance_km: 4500.0,
            departure_time: base_time(),
            arrival_time: base_time() + Duration::days(3),
            created_at: base_time() + Duration::hours(1),
            supplier_id: None,
            carrier_id: None,
            co2_kg: None,
            ch4_kg: None,
            n2o_kg: None,
            co2_equivalent_kg: None,
        }
    }

    fn screener() -> DataQualityScreener {
        DataQualityScreener::new(Arc::new(CarbonConfig::default()))
    }

    #[test]
    fn test_clean_record_has_no_issues() {
        let issues = screener().validate_shipments(&[create_test_record("S1")]);
        assert!(issues.is_empty());
    }

    #[test]
    fn test_empty_input_returns_empty_list() {
        assert!(screener().validate_shipments(&[]).is_empty());
    }

    #[test]
    fn test_missing_origin_lng_only() {
        let mut record = create_test_record("S1");
        record.origin_lng = None;

        let issues = screener().validate_shipments(&[record]);

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].rule, IssueRule::MissingOrigin);
        assert_eq!(issues[0].issue, "Missing origin coordinates");
    }

    #[test]
    fn test_missing_destination() {
        let mut record = create_test_record("S1");
        record.destination_lat = None;
        record.destination_lng = None;

        let issues = screener().validate_shipments(&[record]);

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].issue, "Missing destination coordinates");
    }

    #[test]
    fn test_non_positive_weight_and_distance() {
        let mut record = create_test_record("S1");
        record.weight_kg = 0.0;
        record.distance_km = -3.0;

        let rules: Vec<IssueRule> = screener()
            .validate_shipments(&[record])
            .into_iter()
            .map(|i| i.rule)
            .collect();

        assert_eq!(
            rules,
            vec![IssueRule::NonPositiveWeight, IssueRule::NonPositiveDistance]
        );
    }

    #[test]
    fn test_departure_after_arrival_only() {
        let mut record = create_test_record("S1");
        // 出发时间仍早于录入时间, 只命中时间倒置
        record.arrival_time = base_time() - Duration::hours(2);

        let issues = screener().validate_shipments(&[record]);

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].issue, "Departure after arrival");
    }

    #[test]
    fn test_departure_in_future() {
        let mut record = create_test_record("S1");
        record.created_at = base_time() - Duration::days(1);

        let issues = screener().validate_shipments(&[record]);

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].rule, IssueRule::DepartureInFuture);
    }

    #[test]
    fn test_equal_timestamps_are_not_flagged() {
        let mut record = create_test_record("S1");
        record.arrival_time = base_time();
        record.created_at = base_time();

        assert!(screener().validate_shipments(&[record]).is_empty());
    }

    #[test]
    fn test_issues_keep_record_order() {
        let mut first = create_test_record("S1");
        first.weight_kg = -1.0;
        let mut second = create_test_record("S2");
        second.origin_lat = None;

        let issues = screener().validate_shipments(&[first, second]);

        assert_eq!(issues.len(), 2);
        assert_eq!(issues[0].shipment_id, "S1");
        assert_eq!(issues[1].shipment_id, "S2");
    }
}
