//! End-to-end conversation tests over an in-memory dataset.

use chrono::NaiveDate;

use inquest::dataset::{Dataset, InspectionRecord};
use inquest::engine::ConversationEngine;
use inquest::error::Result;
use inquest::intent::{ChartKind, DataFocus, QuestionType};

fn record(
    year: i32,
    month: u32,
    day: u32,
    part: &str,
    inspected: u64,
    rejected: u64,
    counts: Vec<u64>,
) -> InspectionRecord {
    InspectionRecord {
        date: NaiveDate::from_ymd_opt(year, month, day).unwrap(),
        part: part.to_string(),
        inspected_qty: inspected,
        total_rejected: rejected,
        defect_counts: counts,
    }
}

fn sample_dataset() -> Result<Dataset> {
    Dataset::from_records(
        vec![
            "Burr".to_string(),
            "Damage".to_string(),
            "Toolmark".to_string(),
            "Oversize".to_string(),
        ],
        vec![
            record(2024, 4, 3, "PART-1001", 900, 110, vec![60, 30, 15, 5]),
            record(2024, 5, 7, "PART-1001", 800, 90, vec![50, 25, 10, 5]),
            record(2024, 6, 2, "PART-1001", 700, 60, vec![30, 20, 5, 5]),
            record(2024, 5, 9, "PART-2002", 600, 30, vec![5, 20, 5, 0]),
            record(2024, 6, 11, "PART-2002", 500, 20, vec![5, 10, 5, 0]),
            record(2024, 6, 12, "CYL HEAD 30534763", 400, 10, vec![2, 4, 4, 0]),
        ],
    )
}

#[test]
fn test_context_carry_over() -> Result<()> {
    let engine = ConversationEngine::new(sample_dataset()?);

    let first = engine.ask("which part has the highest rejections?");
    assert!(first.text.contains("PART-1001"), "answer was: {}", first.text);

    let second = engine.ask("why does this part fail so much?");
    assert!(
        second.text.contains("Rejection breakdown for PART-1001"),
        "answer was: {}",
        second.text
    );
    // The follow-up gets the per-part breakdown, not a generic top-N list.
    assert!(second.text.contains("of this part's rejections"));

    let ctx = engine.context_snapshot();
    assert_eq!(ctx.current_focus_entity(), Some("PART-1001"));
    assert!(ctx.mentioned_entities().contains(&"PART-1001".to_string()));
    Ok(())
}

#[test]
fn test_context_reset_safety() -> Result<()> {
    let engine = ConversationEngine::new(sample_dataset()?);

    // A fresh session cannot resolve a follow-up; the answer must be a
    // clarification request, never an arbitrary entity.
    let answer = engine.ask("why?");
    assert!(answer.text.contains("name the part"), "answer was: {}", answer.text);
    assert!(!answer.text.contains("PART-1001"));
    assert!(engine.context_snapshot().current_focus_entity().is_none());

    // The clarification turn is still recorded for continuity.
    assert_eq!(engine.context_snapshot().last_question(), "why?");
    Ok(())
}

#[test]
fn test_fallback_safety() -> Result<()> {
    let engine = ConversationEngine::new(sample_dataset()?);

    // Nothing in this question matches any axis; the safe default is the
    // rejection-reason summary.
    let answer = engine.ask("hello there");
    assert!(!answer.text.is_empty());
    assert!(answer.text.contains("rejection reasons"), "answer was: {}", answer.text);
    Ok(())
}

#[test]
fn test_count_clamping_end_to_end() -> Result<()> {
    let engine = ConversationEngine::new(sample_dataset()?);

    // 47 clamps to 20; only 4 defect columns exist, so everything shows.
    let answer = engine.ask("top 47 rejection reasons");
    assert!(answer.text.contains("**Top 4 rejection reasons:**"), "answer was: {}", answer.text);

    // 0 clamps to 1.
    let answer = engine.ask("top 0 rejection reasons");
    assert!(answer.text.contains("**Top 1 rejection reasons:**"), "answer was: {}", answer.text);
    Ok(())
}

#[test]
fn test_classification_determinism() -> Result<()> {
    let engine = ConversationEngine::new(sample_dataset()?);
    let question = "show me the top 10 rejection reasons as a bar chart";

    let first = engine.analyze(question);
    for _ in 0..5 {
        assert_eq!(engine.analyze(question), first);
    }
    Ok(())
}

#[test]
fn test_axis_independence() -> Result<()> {
    let engine = ConversationEngine::new(sample_dataset()?);

    let pie = engine.analyze("pie chart of rejection reasons");
    let bar = engine.analyze("bar chart of rejection reasons");

    assert_eq!(pie.data_focus, DataFocus::Defects);
    assert_eq!(bar.data_focus, DataFocus::Defects);
    assert_eq!(pie.chart_type, ChartKind::Pie);
    assert_eq!(bar.chart_type, ChartKind::Bar);
    Ok(())
}

#[test]
fn test_tie_break_prefers_pie() -> Result<()> {
    let engine = ConversationEngine::new(sample_dataset()?);
    let intent = engine.analyze("distribution of top defects");
    assert_eq!(intent.chart_type, ChartKind::Pie);
    Ok(())
}

#[test]
fn test_append_once_memory() -> Result<()> {
    let engine = ConversationEngine::new(sample_dataset()?);

    engine.ask("which part has the highest rejections?");
    engine.ask("why does this part fail so much?");
    engine.ask("what caused this part to fail?");
    engine.ask("why is that part rejected?");

    let snapshot = engine.context_snapshot();
    let mentions: Vec<&String> = snapshot
        .mentioned_entities()
        .iter()
        .filter(|e| *e == "PART-1001")
        .collect();
    assert_eq!(mentions.len(), 1);
    Ok(())
}

#[test]
fn test_visualization_request_yields_chart() -> Result<()> {
    let engine = ConversationEngine::new(sample_dataset()?);

    let answer = engine.ask("draw a bar chart of the top 3 rejection causes");
    let chart = answer.chart.expect("visualization request should attach a chart");
    assert_eq!(chart.kind, ChartKind::Bar);
    assert_eq!(chart.series[0].points.len(), 3);
    // Burr leads across the sample data.
    assert_eq!(chart.series[0].points[0].label, "Burr");
    Ok(())
}

#[test]
fn test_trend_question_routes_to_monthly_summary() -> Result<()> {
    let engine = ConversationEngine::new(sample_dataset()?);

    let answer = engine.ask("is quality improving over time?");
    assert!(answer.text.contains("Monthly rejection trend"), "answer was: {}", answer.text);
    assert!(answer.text.contains("improving"));
    Ok(())
}

#[test]
fn test_month_scoped_question() -> Result<()> {
    let engine = ConversationEngine::new(sample_dataset()?);

    let answer = engine.ask("how many rejections by reason in june 2024?");
    assert!(answer.text.contains("in June 2024"), "answer was: {}", answer.text);
    Ok(())
}

#[test]
fn test_digit_run_part_number_follow_up() -> Result<()> {
    let engine = ConversationEngine::new(sample_dataset()?);

    let answer = engine.ask("total rejections for part number 30534763");
    assert!(answer.text.contains("30534763"), "answer was: {}", answer.text);

    // The digit run carried into context supports a follow-up.
    let follow_up = engine.ask("why does this part get rejected?");
    assert!(
        follow_up.text.contains("CYL HEAD 30534763"),
        "answer was: {}",
        follow_up.text
    );
    Ok(())
}

#[test]
fn test_question_type_precedence_end_to_end() -> Result<()> {
    let engine = ConversationEngine::new(sample_dataset()?);

    assert_eq!(
        engine.analyze("compare the top parts").question_type,
        QuestionType::Comparison
    );
    assert_eq!(
        engine.analyze("top 5 rejection reasons").question_type,
        QuestionType::Ranking
    );
    assert_eq!(engine.analyze("hello there").question_type, QuestionType::General);
    Ok(())
}
