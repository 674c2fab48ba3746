use std::fs::File;
use std::io::Read;
use std::time::Duration;

use anyhow::Context;
use mzdex_core::responses::{AnnotationItem, AnnotationReport};
use mzdex_core::values::{CellValue, Record};
use mzdex_search::SearchEngine;
use mzdex_search::annotate::AnnotateOptions;
use mzdex_search::csv_input::read_masses;
use serde::Serialize;
use tokio::time::Instant;

use crate::cli::root_commands::AnnotateArgs;
use crate::cli::{GlobalFlags, OutputFormat};
use crate::output::output;

/// Columns tried, in order, to label a best match in table output.
const LABEL_COLUMNS: [&str; 3] = ["name", "formula", "id"];

/// One line of the table view of an annotation report.
#[derive(Debug, Serialize)]
struct AnnotationRow {
    mz: f64,
    matches: usize,
    best_match: Option<String>,
    error: Option<String>,
}

#[derive(Debug, Serialize)]
struct AnnotationTable {
    items: Vec<AnnotationRow>,
    total_annotated: usize,
    tolerance_ppm: u32,
    deadline_exceeded: bool,
}

/// Handle `mzdex annotate FILE`.
pub async fn handle(
    args: &AnnotateArgs,
    engine: &SearchEngine,
    flags: &GlobalFlags,
) -> anyhow::Result<()> {
    let reader: Box<dyn Read> = if args.file.as_os_str() == "-" {
        Box::new(std::io::stdin())
    } else {
        Box::new(
            File::open(&args.file)
                .with_context(|| format!("failed to open {}", args.file.display()))?,
        )
    };
    let masses = read_masses(reader, &args.mz_column)?;

    let mut options = AnnotateOptions::from_engine(engine);
    if let Some(ppm) = args.tol_ppm {
        options.tolerance_ppm = ppm;
    }
    if let Some(max) = args.max_candidates {
        anyhow::ensure!(max > 0, "--max-candidates must be > 0");
        options.max_candidates = max;
    }
    if let Some(concurrency) = args.concurrency {
        anyhow::ensure!(concurrency > 0, "--concurrency must be > 0");
        options.concurrency = concurrency;
    }
    options.deadline = args
        .timeout_secs
        .map(|secs| Instant::now() + Duration::from_secs(secs));

    let report = engine.annotate(&masses, &options).await;
    if report.deadline_exceeded && !flags.quiet {
        eprintln!(
            "mzdex: deadline passed after {} of {} masses",
            report.items.len(),
            masses.len()
        );
    }

    match flags.format {
        OutputFormat::Table => output(&table_view(report), flags.format),
        OutputFormat::Json | OutputFormat::Raw => output(&report, flags.format),
    }
}

fn table_view(report: AnnotationReport) -> AnnotationTable {
    AnnotationTable {
        items: report.items.into_iter().map(row).collect(),
        total_annotated: report.total_annotated,
        tolerance_ppm: report.tolerance_ppm,
        deadline_exceeded: report.deadline_exceeded,
    }
}

fn row(item: AnnotationItem) -> AnnotationRow {
    AnnotationRow {
        mz: item.mz,
        matches: item.candidates.len(),
        best_match: item.best_match.as_ref().and_then(label),
        error: item.error,
    }
}

fn label(record: &Record) -> Option<String> {
    LABEL_COLUMNS
        .iter()
        .find_map(|column| record.get(column).and_then(CellValue::to_text))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn table_rows_summarize_items() {
        let glucose = Record::new().with("id", 1_i64).with("name", "glucose");
        let report = AnnotationReport {
            items: vec![
                AnnotationItem::from_candidates(180.063, vec![glucose]),
                AnnotationItem::failed(f64::NAN, "invalid request: mass must be a finite number"),
            ],
            total_annotated: 2,
            tolerance_ppm: 10,
            deadline_exceeded: false,
        };

        let view = table_view(report);
        assert_eq!(view.items[0].matches, 1);
        assert_eq!(view.items[0].best_match.as_deref(), Some("glucose"));
        assert_eq!(view.items[1].matches, 0);
        assert!(view.items[1].best_match.is_none());
        assert!(view.items[1].error.is_some());
    }

    #[test]
    fn label_falls_back_to_id() {
        let record = Record::new().with("id", 42_i64).with("name", CellValue::Null);
        assert_eq!(label(&record).as_deref(), Some("42"));
    }
}
