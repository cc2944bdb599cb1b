//! The charting handler.
//!
//! Builds a structured chart artifact plus a short narrative. When the
//! request leaves the chart kind on `Auto`, a fixed secondary policy picks
//! one from the data focus: defect questions get a pie only when they talk
//! about a "distribution", trends get a line, everything else a bar.

use std::fmt::Write;

use log::debug;

use crate::dataset::Dataset;
use crate::error::{EngineError, Result};
use crate::handlers::{Answer, ChartArtifact, ChartPoint, ChartSeries, HandlerRequest};
use crate::intent::{ChartKind, DataFocus};
use crate::util::{group_digits, percentage};

/// Default number of categories shown when the question states no count.
pub const DEFAULT_CHART_COUNT: usize = 15;

/// Pie charts stay readable only up to this many slices.
const MAX_PIE_SLICES: usize = 10;

/// Build the chart answer for a visualization request.
pub fn chart_answer(
    dataset: &Dataset,
    request: &HandlerRequest,
    folded_question: &str,
) -> Result<Answer> {
    let count = request.requested_count.unwrap_or(DEFAULT_CHART_COUNT);
    let kind = resolve_kind(request.chart_type, request.data_focus, folded_question);
    debug!("charting: kind={kind} focus={:?} count={count}", request.data_focus);

    match kind {
        ChartKind::Pie => defect_pie(dataset, count),
        ChartKind::Line => trend_line(dataset),
        _ if request.data_focus == DataFocus::Parts => parts_bar(dataset, count),
        // Scatter has no pairwise series in this table; it falls back to
        // the ranked bar like every other remainder.
        _ => defect_bar(dataset, count),
    }
}

/// The fixed chart-kind policy applied when the request says `Auto`.
fn resolve_kind(requested: ChartKind, focus: DataFocus, folded_question: &str) -> ChartKind {
    match requested {
        ChartKind::Auto => match focus {
            DataFocus::Defects => {
                if folded_question.contains("distribution") {
                    ChartKind::Pie
                } else {
                    ChartKind::Bar
                }
            }
            DataFocus::Trends => ChartKind::Line,
            DataFocus::Parts => ChartKind::Bar,
            _ => ChartKind::Bar,
        },
        other => other,
    }
}

fn defect_pie(dataset: &Dataset, count: usize) -> Result<Answer> {
    let totals = dataset.defect_totals();
    if totals.is_empty() {
        return Err(EngineError::handler("no defect occurrences to chart"));
    }

    let shown: Vec<_> = totals.iter().take(count.min(MAX_PIE_SLICES)).collect();
    let grand_total: u64 = totals.iter().map(|(_, n)| n).sum();
    let (top_name, top_count) = shown[0];

    let artifact = ChartArtifact {
        kind: ChartKind::Pie,
        title: format!("Top {} Rejection Reasons Distribution", shown.len()),
        series: vec![ChartSeries {
            name: "Rejections".to_string(),
            points: shown
                .iter()
                .map(|(name, total)| ChartPoint { label: name.clone(), value: *total as f64 })
                .collect(),
        }],
    };

    let mut text = String::new();
    let _ = writeln!(text, "**Pie chart: rejection reasons distribution**");
    let _ = writeln!(text);
    let _ = writeln!(
        text,
        "- Dominant defect: {top_name} ({} parts, {:.1}%)",
        group_digits(*top_count),
        percentage(*top_count, grand_total)
    );
    let _ = writeln!(text, "- Categories shown: {}", shown.len());
    let _ = writeln!(text, "- Total rejections: {} parts", group_digits(grand_total));

    Ok(Answer::with_chart(text.trim_end(), artifact))
}

fn defect_bar(dataset: &Dataset, count: usize) -> Result<Answer> {
    let totals = dataset.defect_totals();
    if totals.is_empty() {
        return Err(EngineError::handler("no defect occurrences to chart"));
    }

    let shown: Vec<_> = totals.iter().take(count).collect();
    let grand_total: u64 = totals.iter().map(|(_, n)| n).sum();
    let top_three: u64 = totals.iter().take(3).map(|(_, n)| n).sum();

    let artifact = ChartArtifact {
        kind: ChartKind::Bar,
        title: format!("Top {} Rejection Causes", shown.len()),
        series: vec![ChartSeries {
            name: "Rejections".to_string(),
            points: shown
                .iter()
                .map(|(name, total)| ChartPoint { label: name.clone(), value: *total as f64 })
                .collect(),
        }],
    };

    let mut text = String::new();
    let _ = writeln!(text, "**Bar chart: top {} rejection causes**", shown.len());
    let _ = writeln!(text);
    let _ = writeln!(
        text,
        "- Leading defect: {} ({} parts)",
        shown[0].0,
        group_digits(shown[0].1)
    );
    let _ = writeln!(
        text,
        "- The top 3 defects account for {:.1}% of all rejections",
        percentage(top_three, grand_total)
    );

    Ok(Answer::with_chart(text.trim_end(), artifact))
}

fn parts_bar(dataset: &Dataset, count: usize) -> Result<Answer> {
    let totals = dataset.part_totals();
    if totals.is_empty() {
        return Err(EngineError::handler("no parts to chart"));
    }

    let shown: Vec<_> = totals.iter().take(count).collect();

    let artifact = ChartArtifact {
        kind: ChartKind::Bar,
        title: format!("Top {} Parts by Rejection Count", shown.len()),
        series: vec![ChartSeries {
            name: "Rejections".to_string(),
            points: shown
                .iter()
                .map(|(part, total)| ChartPoint { label: part.clone(), value: *total as f64 })
                .collect(),
        }],
    };

    let mut text = String::new();
    let _ = writeln!(text, "**Bar chart: top {} parts by rejection count**", shown.len());
    let _ = writeln!(text);
    let _ = writeln!(
        text,
        "- Worst performer: {} ({} rejections)",
        shown[0].0,
        group_digits(shown[0].1)
    );
    let _ = writeln!(text, "- Distinct parts tracked: {}", dataset.unique_parts());

    Ok(Answer::with_chart(text.trim_end(), artifact))
}

fn trend_line(dataset: &Dataset) -> Result<Answer> {
    let buckets = dataset.monthly_buckets();
    if buckets.is_empty() {
        return Err(EngineError::handler("no inspection records to chart over time"));
    }

    let rejected_series = ChartSeries {
        name: "Total Rejections".to_string(),
        points: buckets
            .iter()
            .map(|b| ChartPoint { label: b.month.to_string(), value: b.rejected as f64 })
            .collect(),
    };
    let rate_series = ChartSeries {
        name: "Rejection Rate (%)".to_string(),
        points: buckets
            .iter()
            .map(|b| ChartPoint { label: b.month.to_string(), value: b.rejection_rate() })
            .collect(),
    };

    let artifact = ChartArtifact {
        kind: ChartKind::Line,
        title: "Monthly Rejection Trend".to_string(),
        series: vec![rejected_series, rate_series],
    };

    let first = &buckets[0];
    let latest = &buckets[buckets.len() - 1];
    let direction = if latest.rejected < first.rejected { "improving" } else { "declining" };

    let mut text = String::new();
    let _ = writeln!(text, "**Line chart: monthly rejection trend**");
    let _ = writeln!(text);
    let _ = writeln!(text, "- Direction: {direction}");
    let _ = writeln!(
        text,
        "- Latest month {}: {} rejections, {:.2}% rejection rate",
        latest.month,
        group_digits(latest.rejected),
        latest.rejection_rate()
    );
    let _ = writeln!(text, "- Months plotted: {}", buckets.len());

    Ok(Answer::with_chart(text.trim_end(), artifact))
}
