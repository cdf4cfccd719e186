//! # Warehouse Data Transfer Objects
//!
//! Defects, import requests and receipts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Whether an entity concerns raw material or finished product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum GoodsType {
    Material,
    Product,
    #[serde(untagged)]
    Other(String),
}

/// Catalogued defect that inspectors attach to rejected pieces
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Defect {
    pub id: String,
    pub description: String,
    #[serde(rename = "type")]
    pub defect_type: GoodsType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImportRequestStatus {
    Arrived,
    Approved,
    Rejected,
    Inspecting,
    Inspected,
    AwaitToImport,
    Importing,
    Imported,
    Cancelled,
    #[serde(untagged)]
    Other(String),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ImportRequestType {
    MaterialByPo,
    MaterialReturnFromProduction,
    MaterialNotByPo,
    ProductByBatch,
    ProductReturn,
    #[serde(untagged)]
    Other(String),
}

/// Warehouse reference embedded in several DTOs
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct WarehouseRef {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Request to bring goods into a warehouse
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ImportRequest {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub status: ImportRequestStatus,
    #[serde(rename = "type")]
    pub request_type: ImportRequestType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub warehouse: Option<WarehouseRef>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReceiptStatus {
    Available,
    AwaitingStoreIn,
    PartialAvailable,
    NotAvailable,
    #[serde(untagged)]
    Other(String),
}

/// Material or product receipt, scanned by code on the warehouse floor
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Receipt {
    pub id: String,
    pub code: String,
    #[serde(rename = "type")]
    pub receipt_type: GoodsType,
    pub status: ReceiptStatus,
    #[serde(default)]
    pub quantity_by_pack: i64,
    #[serde(default)]
    pub remain_quantity_by_pack: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expire_date: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub import_date: Option<DateTime<Utc>>,
    /// Variant payload (material package or product size); shape differs by type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub item: Option<serde_json::Value>,
}
