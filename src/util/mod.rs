//! Small shared utilities.

pub mod fmt;

pub use fmt::{group_digits, month_name, percentage};
