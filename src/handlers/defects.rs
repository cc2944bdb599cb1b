//! Rejection-reason aggregation handlers.

use std::fmt::Write;

use log::debug;

use crate::dataset::Dataset;
use crate::error::{EngineError, Result};
use crate::handlers::{Answer, HandlerRequest};
use crate::intent::TimeScope;
use crate::util::{group_digits, month_name, percentage};

/// Default number of reasons when the question states no count.
pub const DEFAULT_REASON_COUNT: usize = 5;

/// Answer "what are the top rejection reasons", optionally restricted to a
/// month. Fails when the (scoped) dataset holds no defect occurrences.
pub fn top_rejection_reasons(dataset: &Dataset, request: &HandlerRequest) -> Result<Answer> {
    let count = request.requested_count.unwrap_or(DEFAULT_REASON_COUNT);
    let (totals, scope_label, recorded) = scoped_totals(dataset, request.time_scope.as_ref());
    debug!("rejection-reason aggregation: {} active defect types", totals.len());

    if totals.is_empty() {
        return Err(EngineError::handler("no defect occurrences in the requested scope"));
    }

    let grand_total: u64 = totals.iter().map(|(_, n)| n).sum();
    let top: Vec<_> = totals.iter().take(count).collect();

    let mut text = String::new();
    let _ = writeln!(text, "**Top {} rejection reasons{}:**", top.len(), scope_label);
    let _ = writeln!(text);
    for (i, (name, total)) in top.iter().enumerate() {
        let _ = writeln!(
            text,
            "{}. {}: {} parts ({:.1}%)",
            i + 1,
            name,
            group_digits(*total),
            percentage(*total, grand_total)
        );
    }

    let _ = writeln!(text);
    let _ = writeln!(text, "**Summary:**");
    let _ = writeln!(text, "- Defect categories tracked: {}", dataset.defect_columns().len());
    let _ = writeln!(text, "- Active defect types: {}", totals.len());
    let _ = writeln!(text, "- Total rejections: {} parts", group_digits(grand_total));
    if let Some(recorded) = recorded {
        let _ = writeln!(
            text,
            "- Recorded rejections{}: {} parts",
            scope_label,
            group_digits(recorded)
        );
    }

    // Cumulative impact of the leading defects.
    let cumulative = |n: usize| -> f64 {
        let sum: u64 = totals.iter().take(n).map(|(_, c)| c).sum();
        percentage(sum, grand_total)
    };
    let _ = writeln!(text, "- Top 1 defect accounts for {:.1}% of all rejections", cumulative(1));
    if totals.len() >= 3 {
        let _ = writeln!(text, "- Top 3 defects account for {:.1}% of all rejections", cumulative(3));
    }
    if totals.len() >= 5 {
        let _ = writeln!(text, "- Top 5 defects account for {:.1}% of all rejections", cumulative(5));
    }

    Ok(Answer::text(text.trim_end()))
}

/// Answer "why does this part get rejected": per-part rejection breakdown
/// for the entity a follow-up resolved to. Fails when no part matches.
pub fn entity_breakdown(dataset: &Dataset, entity: &str) -> Result<Answer> {
    let slice = dataset.part_slice(entity);
    if slice.is_empty() {
        return Err(EngineError::handler(format!("no inspection records match part '{entity}'")));
    }

    let total_rejected: u64 = slice.iter().map(|r| r.total_rejected).sum();
    let total_inspected: u64 = slice.iter().map(|r| r.inspected_qty).sum();

    // Resolve the display name: prefer the actual part identifier when the
    // match is unambiguous.
    let mut names: Vec<&str> = slice.iter().map(|r| r.part.as_str()).collect();
    names.sort_unstable();
    names.dedup();
    let display = if names.len() == 1 { names[0] } else { entity };

    let mut defect_totals: Vec<(&str, u64)> = dataset
        .defect_columns()
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let total: u64 = slice.iter().map(|r| r.defect_counts[i]).sum();
            (name.as_str(), total)
        })
        .filter(|(_, total)| *total > 0)
        .collect();
    defect_totals.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

    let mut text = String::new();
    let _ = writeln!(text, "**Rejection breakdown for {display}:**");
    let _ = writeln!(text);
    let _ = writeln!(text, "- Total rejections: {} parts", group_digits(total_rejected));
    let _ = writeln!(
        text,
        "- Rejection rate: {:.2}% of {} inspected",
        percentage(total_rejected, total_inspected),
        group_digits(total_inspected)
    );
    let _ = writeln!(text, "- Inspection days tracked: {}", slice.len());

    if defect_totals.is_empty() {
        let _ = writeln!(text);
        let _ = writeln!(text, "A defect-level breakdown is not available for this part.");
        return Ok(Answer::text(text.trim_end()));
    }

    let _ = writeln!(text);
    let _ = writeln!(text, "**Top defect types:**");
    for (i, (name, total)) in defect_totals.iter().take(5).enumerate() {
        let _ = writeln!(
            text,
            "{}. {}: {} parts ({:.1}% of this part's rejections)",
            i + 1,
            name,
            group_digits(*total),
            percentage(*total, total_rejected)
        );
    }

    if defect_totals.len() >= 2 {
        let top_two: u64 = defect_totals.iter().take(2).map(|(_, n)| n).sum();
        let share = percentage(top_two, total_rejected);
        if share > 60.0 {
            let _ = writeln!(text);
            let _ = writeln!(
                text,
                "The two leading defect types account for {share:.1}% of this part's \
                 rejections; fixing them has the largest impact."
            );
        }
    }

    Ok(Answer::text(text.trim_end()))
}

/// Resolve a time scope to scoped defect totals, a narrative label, and
/// the recorded rejection total for the scope. Defect-column sums and the
/// recorded total can differ in real exports, so scoped answers show both.
fn scoped_totals(
    dataset: &Dataset,
    scope: Option<&TimeScope>,
) -> (Vec<(String, u64)>, String, Option<u64>) {
    match scope {
        Some(TimeScope::Month { month, year }) => {
            let label = match year {
                Some(y) => format!(" in {} {}", month_name(*month), y),
                None => format!(" in {}", month_name(*month)),
            };
            (
                dataset.defect_totals_in(*month, *year),
                label,
                Some(dataset.rejected_in(*month, *year)),
            )
        }
        Some(TimeScope::LatestMonth) => match dataset.latest_month() {
            Some(key) => (
                dataset.defect_totals_in(key.month, Some(key.year)),
                format!(" in {} (latest month on record)", key),
                Some(dataset.rejected_in(key.month, Some(key.year))),
            ),
            None => (dataset.defect_totals(), String::new(), None),
        },
        None => (dataset.defect_totals(), String::new(), None),
    }
}
