//! The quality-inspection dataset.
//!
//! One [`InspectionRecord`] per inspection-day-and-part, with a variable
//! set of named defect-count columns discovered once at load time. The
//! question-answering core treats the dataset as a read-only, already
//! validated table; every method here is a pure aggregation.

pub mod loader;
pub mod record;
pub mod table;

pub use loader::RESERVED_COLUMNS;
pub use record::InspectionRecord;
pub use table::{Dataset, MonthKey, MonthlyBucket};
