//! Time-series aggregation handler.

use std::fmt::Write;

use crate::dataset::Dataset;
use crate::error::{EngineError, Result};
use crate::handlers::Answer;
use crate::util::group_digits;

/// Summarize the month-over-month rejection movement.
pub fn trend_summary(dataset: &Dataset) -> Result<Answer> {
    let buckets = dataset.monthly_buckets();
    if buckets.is_empty() {
        return Err(EngineError::handler("no inspection records to bucket by month"));
    }

    let first = &buckets[0];
    let latest = &buckets[buckets.len() - 1];
    let direction = if latest.rejected < first.rejected {
        "improving"
    } else if latest.rejected > first.rejected {
        "declining"
    } else {
        "flat"
    };
    let average_rate =
        buckets.iter().map(|b| b.rejection_rate()).sum::<f64>() / buckets.len() as f64;

    let mut text = String::new();
    let _ = writeln!(text, "**Monthly rejection trend:**");
    let _ = writeln!(text);
    let _ = writeln!(
        text,
        "- Direction: {direction} ({} in {}, {} in {})",
        group_digits(first.rejected),
        first.month,
        group_digits(latest.rejected),
        latest.month
    );
    let _ = writeln!(
        text,
        "- Latest month {}: {} rejections, {:.2}% rejection rate",
        latest.month,
        group_digits(latest.rejected),
        latest.rejection_rate()
    );
    let _ = writeln!(text, "- Average monthly rejection rate: {average_rate:.2}%");
    let _ = writeln!(text, "- Months covered: {}", buckets.len());
    let _ = writeln!(
        text,
        "- Overall rejection ratio: {:.2}% ({} rejected of {} inspected)",
        dataset.rejection_ratio(),
        group_digits(dataset.total_rejected()),
        group_digits(dataset.total_inspected())
    );

    Ok(Answer::text(text.trim_end()))
}
