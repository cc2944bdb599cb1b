//! A single inspection row.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One inspection-day-and-part row.
///
/// `defect_counts` is positionally aligned with the owning dataset's
/// defect-column list; the [`Dataset`](crate::dataset::Dataset)
/// constructor enforces the alignment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InspectionRecord {
    /// Inspection date.
    pub date: NaiveDate,
    /// Part identifier.
    pub part: String,
    /// Quantity inspected that day.
    pub inspected_qty: u64,
    /// Total quantity rejected that day.
    pub total_rejected: u64,
    /// Per-defect rejection counts, aligned with the dataset's
    /// defect-column list.
    pub defect_counts: Vec<u64>,
}
