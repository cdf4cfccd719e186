//! # Inventory Data Transfer Objects
//!
//! Inventory reports are stock-count reconciliations for one warehouse;
//! inventory report plans schedule them across warehouses.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::auth::Account;
use super::warehouse::WarehouseRef;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InventoryReportStatus {
    NotYet,
    InProgress,
    Reporting,
    AwaitingApproval,
    Finished,
    #[serde(untagged)]
    Other(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InventoryReportPlanStatus {
    NotYet,
    InProgress,
    Finished,
    #[serde(untagged)]
    Other(String),
}

/// Expected versus counted quantity for one receipt
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InventoryReportDetail {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_code: Option<String>,
    pub expected_quantity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_quantity: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

impl InventoryReportDetail {
    /// Counted minus expected; `None` until the line is recorded.
    pub fn discrepancy(&self) -> Option<i64> {
        self.actual_quantity
            .map(|actual| actual.saturating_sub(self.expected_quantity))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InventoryReport {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub status: InventoryReportStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warehouse: Option<WarehouseRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warehouse_keeper: Option<Account>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inventory_report_plan_id: Option<String>,
    #[serde(default)]
    pub inventory_report_detail: Vec<InventoryReportDetail>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Counted quantity for one detail line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RecordInventoryDetail {
    pub inventory_report_detail_id: String,
    pub actual_quantity: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Body of `PATCH /inventory-report/{id}/record`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RecordInventoryReport {
    pub details: Vec<RecordInventoryDetail>,
}

/// One warehouse assignment inside a plan
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InventoryReportPlanDetail {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warehouse: Option<WarehouseRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warehouse_staff: Option<Account>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inventory_report: Option<InventoryReport>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InventoryReportPlan {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub title: String,
    pub status: InventoryReportPlanStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub from: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default)]
    pub inventory_report_plan_detail: Vec<InventoryReportPlanDetail>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discrepancy_only_after_recording() {
        let mut detail = InventoryReportDetail {
            id: "d1".to_string(),
            receipt_id: None,
            receipt_code: None,
            expected_quantity: 40,
            actual_quantity: None,
            note: None,
        };
        assert_eq!(detail.discrepancy(), None);

        detail.actual_quantity = Some(37);
        assert_eq!(detail.discrepancy(), Some(-3));
    }

    #[test]
    fn test_inventory_report_defaults_details() {
        let json = r#"{"id":"ir1","status":"IN_PROGRESS"}"#;
        let report: InventoryReport = serde_json::from_str(json).unwrap();
        assert_eq!(report.status, InventoryReportStatus::InProgress);
        assert!(report.inventory_report_detail.is_empty());
    }
}
