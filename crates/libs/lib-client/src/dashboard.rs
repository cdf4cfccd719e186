//! # Dashboard Figures
//!
//! Pass/fail percentages for inspections, status breakdowns and inventory
//! counting progress. Pure functions over the DTOs.

use std::collections::BTreeMap;

use serde::Serialize;
use shared::{
    InspectionReport, InspectionRequest, InspectionRequestStatistic, InspectionRequestStatus,
    InventoryReport,
};

fn percentage(part: u64, total: u64) -> f64 {
    if total == 0 {
        0.0
    } else {
        part as f64 * 100.0 / total as f64
    }
}

/// Passed versus failed quantities.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PassFail {
    pub passed: u64,
    pub failed: u64,
}

impl PassFail {
    pub fn new(passed: u64, failed: u64) -> Self {
        Self { passed, failed }
    }

    pub fn from_statistic(statistic: &InspectionRequestStatistic) -> Self {
        Self::new(statistic.passed, statistic.failed)
    }

    /// Approved against defective packs over every report line.
    pub fn from_report(report: &InspectionReport) -> Self {
        report
            .inspection_report_detail
            .iter()
            .fold(Self::default(), |acc, line| Self {
                passed: acc.passed.saturating_add(line.approved_quantity_by_pack),
                failed: acc.failed.saturating_add(line.defect_quantity_by_pack),
            })
    }

    pub fn total(&self) -> u64 {
        self.passed.saturating_add(self.failed)
    }

    /// 0.0 when nothing was inspected.
    pub fn pass_percentage(&self) -> f64 {
        percentage(self.passed, self.total())
    }

    pub fn fail_percentage(&self) -> f64 {
        percentage(self.failed, self.total())
    }
}

/// Number of requests per status, keyed by the wire value.
pub fn count_by_status(requests: &[InspectionRequest]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for request in requests {
        *counts.entry(request.status.as_str().to_string()).or_insert(0) += 1;
    }
    counts
}

pub fn filter_by_status<'a>(
    requests: &'a [InspectionRequest],
    status: &InspectionRequestStatus,
) -> Vec<&'a InspectionRequest> {
    requests.iter().filter(|r| &r.status == status).collect()
}

/// How many lines of an inventory report have been counted.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InventoryProgress {
    pub counted: u64,
    pub total: u64,
    /// Sum of |actual - expected| over counted lines
    pub discrepancy: u64,
}

impl InventoryProgress {
    pub fn from_report(report: &InventoryReport) -> Self {
        let details = &report.inventory_report_detail;
        Self {
            counted: details.iter().filter(|d| d.actual_quantity.is_some()).count() as u64,
            total: details.len() as u64,
            discrepancy: details
                .iter()
                .filter_map(|d| d.discrepancy())
                .map(i64::unsigned_abs)
                .fold(0u64, u64::saturating_add),
        }
    }

    pub fn percentage(&self) -> f64 {
        percentage(self.counted, self.total)
    }

    pub fn is_complete(&self) -> bool {
        self.counted == self.total
    }
}
