//! # Inspection Data Transfer Objects
//!
//! An inspection request is a pending quality check on an incoming batch;
//! an inspection report is the completed check.
//!
//! ## Endpoints Using These DTOs
//!
//! - `GET /inspection-request` -> `Paginated<InspectionRequest>`
//! - `GET /inspection-request/{id}` -> [`InspectionRequest`]
//! - `GET /inspection-request/statistic` -> [`InspectionRequestStatistic`]
//! - `POST /inspection-report` - [`CreateInspectionReport`] -> [`InspectionReport`]
//! - `GET /inspection-report/{id}` -> [`InspectionReport`]

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::warehouse::{GoodsType, ImportRequest};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InspectionRequestStatus {
    Inspecting,
    Inspected,
    Cancelled,
    #[serde(untagged)]
    Other(String),
}

impl InspectionRequestStatus {
    /// Wire value, as used in query filters.
    pub fn as_str(&self) -> &str {
        match self {
            InspectionRequestStatus::Inspecting => "INSPECTING",
            InspectionRequestStatus::Inspected => "INSPECTED",
            InspectionRequestStatus::Cancelled => "CANCELLED",
            InspectionRequestStatus::Other(value) => value,
        }
    }
}

/// Pending quality check on an incoming batch
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InspectionRequest {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub status: InspectionRequestStatus,
    #[serde(rename = "type")]
    pub request_type: GoodsType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub import_request: Option<ImportRequest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inspection_report: Option<InspectionReportSummary>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Report reference embedded in an inspection request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InspectionReportSummary {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
}

/// Aggregated counters for the inspection dashboard
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InspectionRequestStatistic {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub inspecting: u64,
    #[serde(default)]
    pub inspected: u64,
    #[serde(default)]
    pub cancelled: u64,
    /// Pieces that passed inspection across all reports in range
    #[serde(default)]
    pub passed: u64,
    /// Pieces rejected across all reports in range
    #[serde(default)]
    pub failed: u64,
}

/// Defect occurrence recorded against a report line
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InspectionReportDetailDefect {
    pub defect_id: String,
    pub quantity_by_piece: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// One inspected line (material package or product size)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InspectionReportDetail {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub item_id: String,
    pub quantity_by_pack: u64,
    pub approved_quantity_by_pack: u64,
    pub defect_quantity_by_pack: u64,
    #[serde(default)]
    pub defects: Vec<InspectionReportDetailDefect>,
}

/// Completed inspection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct InspectionReport {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub inspection_request_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inspected_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub inspection_report_detail: Vec<InspectionReportDetail>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateInspectionReportDetail {
    pub item_id: String,
    pub quantity_by_pack: u64,
    pub approved_quantity_by_pack: u64,
    pub defect_quantity_by_pack: u64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub defects: Vec<InspectionReportDetailDefect>,
}

/// Body of `POST /inspection-report`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreateInspectionReport {
    pub inspection_request_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    pub inspection_report_detail: Vec<CreateInspectionReportDetail>,
}
