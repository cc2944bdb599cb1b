//! Per-part aggregation handlers.

use std::fmt::Write;

use serde::{Deserialize, Serialize};

use crate::dataset::Dataset;
use crate::error::{EngineError, Result};
use crate::handlers::{Answer, HandlerRequest};
use crate::util::{group_digits, percentage};

/// Default number of parts listed when the question states no count.
pub const DEFAULT_PART_COUNT: usize = 5;

/// Superlative direction detected in a part question.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Superlative {
    /// "highest", the worst performer.
    Highest,
    /// "lowest", the best performer.
    Lowest,
}

/// Answer part-focused questions: a named part's totals, the best/worst
/// performer, or a ranked list.
pub fn part_analysis(
    dataset: &Dataset,
    request: &HandlerRequest,
    superlative: Option<Superlative>,
) -> Result<Answer> {
    if dataset.is_empty() {
        return Err(EngineError::handler("no inspection records loaded"));
    }

    if let Some(entity) = &request.referenced_entity {
        return named_part_summary(dataset, entity);
    }

    let totals = dataset.part_totals();
    let grand_total = dataset.total_rejected();

    match superlative {
        Some(Superlative::Highest) => {
            let (part, rejected) = &totals[0];
            Ok(Answer::text(format!(
                "{part} has the highest total rejections: {} parts ({:.1}% of all rejections).",
                group_digits(*rejected),
                percentage(*rejected, grand_total)
            )))
        }
        Some(Superlative::Lowest) => {
            let (part, rejected) = totals.last().expect("totals follow a non-empty dataset");
            Ok(Answer::text(format!(
                "{part} has the lowest total rejections: {} parts ({:.1}% of all rejections).",
                group_digits(*rejected),
                percentage(*rejected, grand_total)
            )))
        }
        None => ranked_part_list(dataset, &totals, request),
    }
}

/// Totals for a part the question named explicitly. An unknown identifier
/// is a normal answer here, not a failure: the question was understood.
fn named_part_summary(dataset: &Dataset, entity: &str) -> Result<Answer> {
    let slice = dataset.part_slice(entity);
    if slice.is_empty() {
        return Ok(Answer::text(format!(
            "No inspection records match part '{entity}'. Check the identifier and ask again."
        )));
    }

    let rejected: u64 = slice.iter().map(|r| r.total_rejected).sum();
    let inspected: u64 = slice.iter().map(|r| r.inspected_qty).sum();

    let mut names: Vec<&str> = slice.iter().map(|r| r.part.as_str()).collect();
    names.sort_unstable();
    names.dedup();
    let display = if names.len() == 1 { names[0] } else { entity };

    Ok(Answer::text(format!(
        "{display} has {} total rejections out of {} inspected ({:.2}% rejection rate) \
         across {} inspection days.",
        group_digits(rejected),
        group_digits(inspected),
        percentage(rejected, inspected),
        slice.len()
    )))
}

fn ranked_part_list(
    dataset: &Dataset,
    totals: &[(String, u64)],
    request: &HandlerRequest,
) -> Result<Answer> {
    let count = request.requested_count.unwrap_or(DEFAULT_PART_COUNT);
    let top: Vec<_> = totals.iter().take(count).collect();
    let grand_total = dataset.total_rejected();

    let mut text = String::new();
    let _ = writeln!(text, "**Top {} parts by rejections:**", top.len());
    let _ = writeln!(text);
    for (i, (part, rejected)) in top.iter().enumerate() {
        let _ = writeln!(
            text,
            "{}. {}: {} parts ({:.1}%)",
            i + 1,
            part,
            group_digits(*rejected),
            percentage(*rejected, grand_total)
        );
    }
    let _ = writeln!(text);
    let _ = writeln!(text, "Distinct parts tracked: {}", dataset.unique_parts());

    Ok(Answer::text(text.trim_end()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::dataset::InspectionRecord;
    use crate::handlers::HandlerKind;
    use crate::intent::{ChartKind, DataFocus};

    fn request(entity: Option<&str>) -> HandlerRequest {
        HandlerRequest {
            handler: HandlerKind::PartPerformance,
            chart_type: ChartKind::Auto,
            data_focus: DataFocus::Parts,
            requested_count: None,
            referenced_entity: entity.map(str::to_string),
            time_scope: None,
        }
    }

    fn sample() -> Dataset {
        let record = |part: &str, inspected, rejected| InspectionRecord {
            date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            part: part.into(),
            inspected_qty: inspected,
            total_rejected: rejected,
            defect_counts: vec![rejected],
        };
        Dataset::from_records(
            vec!["Burr".into()],
            vec![
                record("PART-1001", 500, 80),
                record("PART-2002", 400, 15),
                record("PART-3003", 300, 5),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_highest_superlative() {
        let answer = part_analysis(&sample(), &request(None), Some(Superlative::Highest)).unwrap();
        assert!(answer.text.starts_with("PART-1001 has the highest total rejections: 80 parts"));
    }

    #[test]
    fn test_lowest_superlative() {
        let answer = part_analysis(&sample(), &request(None), Some(Superlative::Lowest)).unwrap();
        assert!(answer.text.starts_with("PART-3003 has the lowest total rejections: 5 parts"));
    }

    #[test]
    fn test_ranked_list_default() {
        let answer = part_analysis(&sample(), &request(None), None).unwrap();
        assert!(answer.text.contains("**Top 3 parts by rejections:**"));
        assert!(answer.text.contains("1. PART-1001: 80 parts (80.0%)"));
        assert!(answer.text.contains("Distinct parts tracked: 3"));
    }

    #[test]
    fn test_named_part() {
        let answer = part_analysis(&sample(), &request(Some("part-2002")), None).unwrap();
        assert!(answer.text.starts_with("PART-2002 has 15 total rejections"));
    }

    #[test]
    fn test_unknown_named_part_is_a_normal_answer() {
        let answer = part_analysis(&sample(), &request(Some("PART-9999")), None).unwrap();
        assert!(answer.text.contains("No inspection records match part 'PART-9999'"));
    }

    #[test]
    fn test_empty_dataset_fails() {
        let dataset = Dataset::from_records(vec![], vec![]).unwrap();
        assert!(part_analysis(&dataset, &request(None), None).is_err());
    }
}
