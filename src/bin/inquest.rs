//! Inquest CLI demo.
//!
//! Loads a rejection CSV and answers questions, either interactively or
//! from a question file. This shell only feeds questions in and prints
//! answers; everything interesting happens in the library.

use std::fs;
use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::process;

use clap::Parser;
use env_logger::Builder;
use log::LevelFilter;

use inquest::dataset::Dataset;
use inquest::engine::ConversationEngine;
use inquest::error::Result;

#[derive(Debug, Parser)]
#[command(name = "inquest", version, about = "Ask questions about quality-inspection data")]
struct Args {
    /// Path to the rejection-data CSV file.
    data: PathBuf,

    /// Answer the questions in this file (one per line) instead of
    /// reading from stdin.
    #[arg(short, long)]
    questions: Option<PathBuf>,

    /// Print answers as JSON (text plus any chart artifact).
    #[arg(long)]
    json: bool,

    /// Increase log verbosity (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        _ => LevelFilter::Debug,
    };

    Builder::new()
        .filter_level(log_level)
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();

    if let Err(e) = run(args) {
        eprintln!("Error: {e}");
        process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    let dataset = Dataset::load_csv(&args.data)?;
    println!(
        "Loaded {} records, {} parts, {} defect categories, {} total rejections.",
        dataset.len(),
        dataset.unique_parts(),
        dataset.defect_columns().len(),
        dataset.total_rejected()
    );

    let engine = ConversationEngine::new(dataset);

    match &args.questions {
        Some(path) => {
            for line in fs::read_to_string(path)?.lines() {
                let question = line.trim();
                if question.is_empty() || question.starts_with('#') {
                    continue;
                }
                println!("\n> {question}");
                print_answer(&engine, question, args.json)?;
            }
        }
        None => {
            let stdin = io::stdin();
            print!("? ");
            io::stdout().flush()?;
            for line in stdin.lock().lines() {
                let line = line?;
                let question = line.trim();
                if !question.is_empty() {
                    print_answer(&engine, question, args.json)?;
                }
                print!("? ");
                io::stdout().flush()?;
            }
        }
    }

    Ok(())
}

fn print_answer(engine: &ConversationEngine, question: &str, json: bool) -> Result<()> {
    let answer = engine.ask(question);
    if json {
        println!("{}", serde_json::to_string_pretty(&answer)?);
    } else {
        println!("{}", answer.text);
        if let Some(chart) = &answer.chart {
            println!("[chart: {} \"{}\", {} series]", chart.kind, chart.title, chart.series.len());
        }
    }
    Ok(())
}
