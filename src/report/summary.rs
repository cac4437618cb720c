use crate::domain::model::{ExecutiveSummary, Record, ReportDefinition};
use serde_json::Value;

pub const SALES_SHEET: &str = "Sales";
pub const SHIPMENTS_SHEET: &str = "Shipments";
pub const PAYMENTS_SHEET: &str = "Payments";

const COMPLETED_STATUS: &str = "COMPLETED";

impl ExecutiveSummary {
    /// Totals over the datasets whose sheet name matches exactly (case
    /// included); other datasets do not contribute.
    pub fn from_reports(reports: &[ReportDefinition]) -> Self {
        let mut summary = ExecutiveSummary::default();

        for report in reports {
            match report.sheet_name.as_str() {
                SALES_SHEET => {
                    summary.total_sales_count += report.data.len();
                    summary.total_revenue += sum_field(&report.data, "total_sale_amount");
                }
                SHIPMENTS_SHEET => {
                    summary.total_shipments += report.data.len();
                    summary.active_shipments += report
                        .data
                        .iter()
                        .filter(|r| r.get("status").and_then(Value::as_str) != Some(COMPLETED_STATUS))
                        .count();
                }
                PAYMENTS_SHEET => {
                    summary.total_paid += sum_field(&report.data, "amount_paid");
                    summary.pending_amount += report
                        .data
                        .iter()
                        .map(|payment| {
                            let sale_total = payment
                                .get("sale")
                                .and_then(|sale| sale.get("total_sale_amount"))
                                .map(numeric)
                                .unwrap_or(0.0);
                            sale_total - payment.get("amount_paid").map(numeric).unwrap_or(0.0)
                        })
                        .sum::<f64>();
                }
                other => {
                    tracing::debug!("Dataset '{}' does not feed the executive summary", other);
                }
            }
        }

        summary
    }
}

fn sum_field(records: &[Record], field: &str) -> f64 {
    records
        .iter()
        .filter_map(|r| r.get(field))
        .map(numeric)
        .sum()
}

/// Amounts arrive as JSON numbers or as decimal strings.
pub fn numeric(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn records(values: Vec<Value>) -> Vec<Record> {
        values
            .into_iter()
            .filter_map(|v| v.as_object().cloned())
            .collect()
    }

    #[test]
    fn test_revenue_and_sales_count() {
        let reports = vec![ReportDefinition::new(
            "Sales",
            records(vec![
                json!({"total_sale_amount": 100.00}),
                json!({"total_sale_amount": "250.50"}),
                json!({"total_sale_amount": 49.50}),
            ]),
        )];
        let summary = ExecutiveSummary::from_reports(&reports);
        assert!((summary.total_revenue - 400.00).abs() < 1e-9);
        assert_eq!(summary.total_sales_count, 3);
    }

    #[test]
    fn test_sheet_name_match_is_case_sensitive() {
        let reports = vec![ReportDefinition::new(
            "sales",
            records(vec![json!({"total_sale_amount": 100})]),
        )];
        let summary = ExecutiveSummary::from_reports(&reports);
        assert_eq!(summary.total_revenue, 0.0);
        assert_eq!(summary.total_sales_count, 0);
    }

    #[test]
    fn test_shipment_counts() {
        let reports = vec![ReportDefinition::new(
            "Shipments",
            records(vec![
                json!({"status": "COMPLETED"}),
                json!({"status": "IN_TRANSIT"}),
                json!({"status": "completed"}),
                json!({}),
            ]),
        )];
        let summary = ExecutiveSummary::from_reports(&reports);
        assert_eq!(summary.total_shipments, 4);
        assert_eq!(summary.active_shipments, 3);
    }

    #[test]
    fn test_pending_amount_differs_from_outstanding_balance() {
        let reports = vec![
            ReportDefinition::new(
                "Sales",
                records(vec![
                    json!({"total_sale_amount": 300}),
                    json!({"total_sale_amount": 200}),
                ]),
            ),
            ReportDefinition::new(
                "Payments",
                records(vec![
                    json!({"amount_paid": 100, "sale": {"total_sale_amount": 300}}),
                    json!({"amount_paid": "50", "sale": "8f0e0c39-0000-0000-0000-000000000000"}),
                ]),
            ),
        ];
        let summary = ExecutiveSummary::from_reports(&reports);

        assert_eq!(summary.total_paid, 150.0);
        // 300 - 100 for the expanded sale, 0 - 50 for the bare reference
        assert_eq!(summary.pending_amount, 150.0);
        assert_eq!(summary.outstanding_balance(), 350.0);
        assert_ne!(summary.pending_amount, summary.outstanding_balance());
    }

    #[test]
    fn test_numeric_parsing() {
        assert_eq!(numeric(&json!("12.5")), 12.5);
        assert_eq!(numeric(&json!(" 7 ")), 7.0);
        assert_eq!(numeric(&json!("n/a")), 0.0);
        assert_eq!(numeric(&json!(null)), 0.0);
    }
}
