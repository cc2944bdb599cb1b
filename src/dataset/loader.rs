//! CSV loading with defect-column discovery.
//!
//! The export format carries four fixed columns plus one column per defect
//! category. Defect columns are whatever remains after the reserved ones:
//! blank headers and spreadsheet artifacts ("Unnamed: 0") are skipped, and
//! the discovery happens exactly once, here.

use std::path::Path;

use chrono::NaiveDate;
use log::info;

use crate::dataset::record::InspectionRecord;
use crate::dataset::table::Dataset;
use crate::error::{EngineError, Result};

/// Column names with fixed meaning; everything else is a defect category.
pub const RESERVED_COLUMNS: &[&str] = &["Date", "Part Name", "Inspected Qty.", "Total Rej Qty."];

/// Date formats accepted by the loader, tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d-%m-%Y", "%Y/%m/%d"];

impl Dataset {
    /// Load a dataset from a CSV file.
    ///
    /// The header row must contain every reserved column; all other
    /// non-blank, non-"Unnamed" headers become defect columns. Blank
    /// numeric cells read as zero.
    pub fn load_csv<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_path(path.as_ref())?;

        let headers = reader.headers()?.clone();
        let layout = ColumnLayout::discover(&headers)?;

        let mut records = Vec::new();
        for (row_index, row) in reader.records().enumerate() {
            let row = row?;
            records.push(layout.parse_row(&row, row_index)?);
        }

        info!(
            "loaded {} records, {} defect columns from {}",
            records.len(),
            layout.defect_columns.len(),
            path.as_ref().display()
        );
        Dataset::from_records(layout.defect_columns, records)
    }
}

/// Resolved column positions for one file.
struct ColumnLayout {
    date: usize,
    part: usize,
    inspected: usize,
    rejected: usize,
    defect_indices: Vec<usize>,
    defect_columns: Vec<String>,
}

impl ColumnLayout {
    fn discover(headers: &csv::StringRecord) -> Result<Self> {
        let position = |name: &str| -> Result<usize> {
            headers
                .iter()
                .position(|h| h == name)
                .ok_or_else(|| EngineError::dataset(format!("missing required column '{name}'")))
        };

        let date = position("Date")?;
        let part = position("Part Name")?;
        let inspected = position("Inspected Qty.")?;
        let rejected = position("Total Rej Qty.")?;

        let mut defect_indices = Vec::new();
        let mut defect_columns = Vec::new();
        for (i, header) in headers.iter().enumerate() {
            if header.is_empty()
                || header.starts_with("Unnamed")
                || RESERVED_COLUMNS.contains(&header)
            {
                continue;
            }
            defect_indices.push(i);
            defect_columns.push(header.to_string());
        }

        Ok(ColumnLayout { date, part, inspected, rejected, defect_indices, defect_columns })
    }

    fn parse_row(&self, row: &csv::StringRecord, row_index: usize) -> Result<InspectionRecord> {
        let cell = |i: usize| row.get(i).unwrap_or("");

        let date = parse_date(cell(self.date))
            .ok_or_else(|| EngineError::dataset(format!("row {}: bad date '{}'", row_index + 1, cell(self.date))))?;
        let part = cell(self.part).to_string();
        if part.is_empty() {
            return Err(EngineError::dataset(format!("row {}: empty part name", row_index + 1)));
        }

        let quantity = |i: usize| -> Result<u64> {
            parse_quantity(cell(i)).ok_or_else(|| {
                EngineError::dataset(format!("row {}: bad quantity '{}'", row_index + 1, cell(i)))
            })
        };

        let inspected_qty = quantity(self.inspected)?;
        let total_rejected = quantity(self.rejected)?;
        let defect_counts = self
            .defect_indices
            .iter()
            .map(|&i| quantity(i))
            .collect::<Result<Vec<u64>>>()?;

        Ok(InspectionRecord { date, part, inspected_qty, total_rejected, defect_counts })
    }
}

fn parse_date(cell: &str) -> Option<NaiveDate> {
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(cell, format).ok())
}

/// Parse a count cell. Empty cells are zero; fractional exports ("12.0")
/// are accepted and truncated.
fn parse_quantity(cell: &str) -> Option<u64> {
    if cell.is_empty() {
        return Some(0);
    }
    if let Ok(n) = cell.parse::<u64>() {
        return Some(n);
    }
    cell.parse::<f64>()
        .ok()
        .filter(|f| f.is_finite() && *f >= 0.0)
        .map(|f| f as u64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    use tempfile::NamedTempFile;

    fn write_csv(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_load_discovers_defect_columns() {
        let file = write_csv(
            "Unnamed: 0,Date,Part Name,Inspected Qty.,Total Rej Qty.,Burr,Damage,Toolmark\n\
             0,2024-06-01,PART-1001,500,45,30,15,0\n\
             1,2024-06-02,PART-2002,300,12,,12,\n",
        );

        let dataset = Dataset::load_csv(file.path()).unwrap();
        assert_eq!(dataset.defect_columns(), ["Burr", "Damage", "Toolmark"]);
        assert_eq!(dataset.len(), 2);

        // Blank cells read as zero.
        let second = &dataset.records()[1];
        assert_eq!(second.defect_counts, vec![0, 12, 0]);
        assert_eq!(second.part, "PART-2002");
    }

    #[test]
    fn test_load_accepts_fractional_counts() {
        let file = write_csv(
            "Date,Part Name,Inspected Qty.,Total Rej Qty.,Burr\n\
             2024-06-01,PART-1001,500.0,45.0,30.0\n",
        );

        let dataset = Dataset::load_csv(file.path()).unwrap();
        assert_eq!(dataset.records()[0].inspected_qty, 500);
        assert_eq!(dataset.records()[0].defect_counts, vec![30]);
    }

    #[test]
    fn test_missing_required_column() {
        let file = write_csv("Date,Part Name,Burr\n2024-06-01,PART-1001,3\n");
        let error = Dataset::load_csv(file.path()).unwrap_err();
        assert!(error.to_string().contains("Inspected Qty."));
    }

    #[test]
    fn test_bad_date_is_reported_with_row() {
        let file = write_csv(
            "Date,Part Name,Inspected Qty.,Total Rej Qty.,Burr\n\
             junk,PART-1001,500,45,30\n",
        );
        let error = Dataset::load_csv(file.path()).unwrap_err();
        assert!(error.to_string().contains("row 1"));
    }
}
