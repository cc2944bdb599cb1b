//! The in-memory dataset table and its aggregations.

use std::fmt;

use ahash::AHashMap;
use serde::{Deserialize, Serialize};

use crate::dataset::record::InspectionRecord;
use crate::error::{EngineError, Result};

/// A calendar month used for bucketing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MonthKey {
    /// Calendar year.
    pub year: i32,
    /// Month number, 1-based.
    pub month: u32,
}

impl fmt::Display for MonthKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// Month-bucketed inspection totals.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MonthlyBucket {
    /// The bucket's month.
    pub month: MonthKey,
    /// Total inspected quantity in the month.
    pub inspected: u64,
    /// Total rejected quantity in the month.
    pub rejected: u64,
}

impl MonthlyBucket {
    /// Rejection rate for the month as a percentage.
    pub fn rejection_rate(&self) -> f64 {
        crate::util::percentage(self.rejected, self.inspected)
    }
}

/// A read-only quality-inspection table.
///
/// Construction validates that every record's defect counts align with the
/// defect-column list; after that, all access is immutable.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    defect_columns: Vec<String>,
    records: Vec<InspectionRecord>,
}

impl Dataset {
    /// Build a dataset from pre-parsed records.
    ///
    /// Fails when a record's defect counts are not aligned with the
    /// defect-column list.
    pub fn from_records(
        defect_columns: Vec<String>,
        records: Vec<InspectionRecord>,
    ) -> Result<Self> {
        for (i, record) in records.iter().enumerate() {
            if record.defect_counts.len() != defect_columns.len() {
                return Err(EngineError::dataset(format!(
                    "record {} has {} defect counts, expected {}",
                    i,
                    record.defect_counts.len(),
                    defect_columns.len()
                )));
            }
        }
        Ok(Dataset { defect_columns, records })
    }

    /// Defect-column names, in table order.
    pub fn defect_columns(&self) -> &[String] {
        &self.defect_columns
    }

    /// All records.
    pub fn records(&self) -> &[InspectionRecord] {
        &self.records
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the dataset holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Total quantity inspected across the whole table.
    pub fn total_inspected(&self) -> u64 {
        self.records.iter().map(|r| r.inspected_qty).sum()
    }

    /// Total quantity rejected across the whole table.
    pub fn total_rejected(&self) -> u64 {
        self.records.iter().map(|r| r.total_rejected).sum()
    }

    /// Overall rejection ratio as a percentage.
    pub fn rejection_ratio(&self) -> f64 {
        crate::util::percentage(self.total_rejected(), self.total_inspected())
    }

    /// Number of distinct part identifiers.
    pub fn unique_parts(&self) -> usize {
        let mut parts: Vec<&str> = self.records.iter().map(|r| r.part.as_str()).collect();
        parts.sort_unstable();
        parts.dedup();
        parts.len()
    }

    /// Totals per defect column, descending. Columns with a zero total are
    /// excluded; equal totals order by column name for stable output.
    pub fn defect_totals(&self) -> Vec<(String, u64)> {
        self.defect_totals_where(|_| true)
    }

    /// Like [`defect_totals`](Self::defect_totals), restricted to one
    /// month. A `None` year matches that month in any year.
    pub fn defect_totals_in(&self, month: u32, year: Option<i32>) -> Vec<(String, u64)> {
        self.defect_totals_where(|r| in_month(r, month, year))
    }

    fn defect_totals_where<F>(&self, keep: F) -> Vec<(String, u64)>
    where
        F: Fn(&InspectionRecord) -> bool,
    {
        let mut totals = vec![0u64; self.defect_columns.len()];
        for record in self.records.iter().filter(|r| keep(r)) {
            for (total, count) in totals.iter_mut().zip(&record.defect_counts) {
                *total += count;
            }
        }

        let mut out: Vec<(String, u64)> = self
            .defect_columns
            .iter()
            .zip(totals)
            .filter(|(_, total)| *total > 0)
            .map(|(name, total)| (name.clone(), total))
            .collect();
        out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        out
    }

    /// Total rejections per part, descending; equal totals order by part
    /// name.
    pub fn part_totals(&self) -> Vec<(String, u64)> {
        let mut totals: AHashMap<&str, u64> = AHashMap::new();
        for record in &self.records {
            *totals.entry(record.part.as_str()).or_insert(0) += record.total_rejected;
        }

        let mut out: Vec<(String, u64)> = totals
            .into_iter()
            .map(|(name, total)| (name.to_string(), total))
            .collect();
        out.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        out
    }

    /// Records whose part identifier contains `entity`, case-insensitive.
    pub fn part_slice(&self, entity: &str) -> Vec<&InspectionRecord> {
        let needle = entity.to_lowercase();
        self.records
            .iter()
            .filter(|r| r.part.to_lowercase().contains(&needle))
            .collect()
    }

    /// Month-bucketed totals, oldest first.
    pub fn monthly_buckets(&self) -> Vec<MonthlyBucket> {
        use chrono::Datelike;

        let mut buckets: AHashMap<MonthKey, (u64, u64)> = AHashMap::new();
        for record in &self.records {
            let key = MonthKey { year: record.date.year(), month: record.date.month() };
            let entry = buckets.entry(key).or_insert((0, 0));
            entry.0 += record.inspected_qty;
            entry.1 += record.total_rejected;
        }

        let mut out: Vec<MonthlyBucket> = buckets
            .into_iter()
            .map(|(month, (inspected, rejected))| MonthlyBucket { month, inspected, rejected })
            .collect();
        out.sort_by_key(|b| b.month);
        out
    }

    /// The newest month present in the data.
    pub fn latest_month(&self) -> Option<MonthKey> {
        use chrono::Datelike;

        self.records
            .iter()
            .map(|r| MonthKey { year: r.date.year(), month: r.date.month() })
            .max()
    }

    /// Total rejections in one month. A `None` year matches that month in
    /// any year.
    pub fn rejected_in(&self, month: u32, year: Option<i32>) -> u64 {
        self.records
            .iter()
            .filter(|r| in_month(r, month, year))
            .map(|r| r.total_rejected)
            .sum()
    }
}

fn in_month(record: &InspectionRecord, month: u32, year: Option<i32>) -> bool {
    use chrono::Datelike;

    record.date.month() == month && year.is_none_or(|y| record.date.year() == y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn sample() -> Dataset {
        Dataset::from_records(
            vec!["Burr".into(), "Damage".into(), "Toolmark".into()],
            vec![
                InspectionRecord {
                    date: date(2024, 5, 10),
                    part: "PART-1001".into(),
                    inspected_qty: 500,
                    total_rejected: 60,
                    defect_counts: vec![40, 20, 0],
                },
                InspectionRecord {
                    date: date(2024, 6, 2),
                    part: "PART-1001".into(),
                    inspected_qty: 400,
                    total_rejected: 30,
                    defect_counts: vec![10, 20, 0],
                },
                InspectionRecord {
                    date: date(2024, 6, 3),
                    part: "PART-2002".into(),
                    inspected_qty: 300,
                    total_rejected: 10,
                    defect_counts: vec![0, 10, 0],
                },
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_misaligned_records_are_rejected() {
        let result = Dataset::from_records(
            vec!["Burr".into()],
            vec![InspectionRecord {
                date: date(2024, 1, 1),
                part: "P".into(),
                inspected_qty: 1,
                total_rejected: 0,
                defect_counts: vec![0, 0],
            }],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_defect_totals_sorted_and_filtered() {
        let totals = sample().defect_totals();
        // Toolmark never occurred and is dropped.
        assert_eq!(
            totals,
            vec![("Burr".to_string(), 50), ("Damage".to_string(), 50)]
        );
        // Equal totals fall back to name order (asserted above by Burr
        // sorting before Damage).
    }

    #[test]
    fn test_defect_totals_scoped_to_month() {
        let totals = sample().defect_totals_in(6, Some(2024));
        assert_eq!(
            totals,
            vec![("Damage".to_string(), 30), ("Burr".to_string(), 10)]
        );
        assert!(sample().defect_totals_in(7, None).is_empty());
    }

    #[test]
    fn test_part_totals() {
        let totals = sample().part_totals();
        assert_eq!(
            totals,
            vec![("PART-1001".to_string(), 90), ("PART-2002".to_string(), 10)]
        );
    }

    #[test]
    fn test_part_slice_is_case_insensitive_substring() {
        let dataset = sample();
        assert_eq!(dataset.part_slice("part-1001").len(), 2);
        assert_eq!(dataset.part_slice("2002").len(), 1);
        assert!(dataset.part_slice("PART-9999").is_empty());
    }

    #[test]
    fn test_monthly_buckets() {
        let buckets = sample().monthly_buckets();
        assert_eq!(buckets.len(), 2);
        assert_eq!(buckets[0].month, MonthKey { year: 2024, month: 5 });
        assert_eq!(buckets[0].rejected, 60);
        assert_eq!(buckets[1].month, MonthKey { year: 2024, month: 6 });
        assert_eq!(buckets[1].rejected, 40);
        assert_eq!(buckets[1].inspected, 700);
    }

    #[test]
    fn test_summary_figures() {
        let dataset = sample();
        assert_eq!(dataset.total_inspected(), 1200);
        assert_eq!(dataset.total_rejected(), 100);
        assert_eq!(dataset.unique_parts(), 2);
        assert!((dataset.rejection_ratio() - 8.333).abs() < 0.01);
        assert_eq!(dataset.latest_month(), Some(MonthKey { year: 2024, month: 6 }));
        assert_eq!(dataset.rejected_in(6, None), 40);
    }

    #[test]
    fn test_month_key_display() {
        assert_eq!(MonthKey { year: 2024, month: 6 }.to_string(), "2024-06");
    }
}
