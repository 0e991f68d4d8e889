// ==========================================
// 供应链碳排放核算 - 数据质量报告
// ==========================================
// 纯汇总: 计数 + 原样列表, 不重新计算, 无隐藏计数器
// ==========================================

use crate::domain::shipment::{Anomaly, Issue, QualityReport};
use crate::quality::dq_validator::DataQualityScreener;
use std::collections::{BTreeMap, BTreeSet};

impl DataQualityScreener {
    /// 生成数据质量报告
    pub fn generate_data_quality_report(
        &self,
        issues: &[Issue],
        anomalies: &[Anomaly],
    ) -> QualityReport {
        let mut issues_by_rule = BTreeMap::new();
        for issue in issues {
            *issues_by_rule.entry(issue.rule).or_insert(0) += 1;
        }

        let affected_shipments = issues
            .iter()
            .map(|i| i.shipment_id.as_str())
            .chain(anomalies.iter().map(|a| a.shipment_id.as_str()))
            .collect::<BTreeSet<_>>()
            .len();

        let report = QualityReport {
            total_issues: issues.len(),
            total_anomalies: anomalies.len(),
            affected_shipments,
            issues_by_rule,
            issues: issues.to_vec(),
            anomalies: anomalies.to_vec(),
        };

        tracing::info!(
            total_issues = report.total_issues,
            total_anomalies = report.total_anomalies,
            affected_shipments = report.affected_shipments,
            "数据质量报告已生成"
        );

        report
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CarbonConfig;
    use crate::domain::types::IssueRule;
    use std::sync::Arc;

    fn screener() -> DataQualityScreener {
        DataQualityScreener::new(Arc::new(CarbonConfig::default()))
    }

    #[test]
    fn test_empty_report() {
        let report = screener().generate_data_quality_report(&[], &[]);

        assert!(report.is_clean());
        assert_eq!(report.affected_shipments, 0);
        assert!(report.issues_by_rule.is_empty());
    }

    #[test]
    fn test_report_counts() {
        let issues = vec![
            Issue::new("S1", IssueRule::MissingOrigin),
            Issue::new("S1", IssueRule::DepartureAfterArrival),
            Issue::new("S2", IssueRule::MissingOrigin),
        ];
        let anomalies = vec![Anomaly {
            shipment_id: "S3".to_string(),
            z_score: 4.2,
            co2_kg: 900.0,
        }];

        let report = screener().generate_data_quality_report(&issues, &anomalies);

        assert_eq!(report.total_issues, 3);
        assert_eq!(report.total_anomalies, 1);
        assert_eq!(report.affected_shipments, 3);
        assert_eq!(report.issues_by_rule[&IssueRule::MissingOrigin], 2);
        assert_eq!(report.issues_by_rule[&IssueRule::DepartureAfterArrival], 1);
        assert_eq!(report.issues, issues);
        assert_eq!(report.anomalies, anomalies);
    }

    #[test]
    fn test_report_serializes_rule_keys() {
        let issues = vec![Issue::new("S1", IssueRule::NonPositiveWeight)];
        let report = screener().generate_data_quality_report(&issues, &[]);

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["issues_by_rule"]["NON_POSITIVE_WEIGHT"], 1);
        assert_eq!(json["issues"][0]["issue"], "Non-positive weight");
    }
}
