//! Batch mass annotation against a seeded database.

mod common;

use common::{engine_with, standard_engine};
use mzdex_core::values::CellValue;
use mzdex_search::AnnotateOptions;
use mzdex_search::csv_input::read_masses;
use pretty_assertions::assert_eq;
use tokio::time::{Duration, Instant};

fn options(max_candidates: u32, concurrency: usize) -> AnnotateOptions {
    AnnotateOptions {
        tolerance_ppm: 10,
        max_candidates,
        concurrency,
        deadline: None,
    }
}

#[tokio::test]
async fn every_mass_gets_an_item_in_order() {
    let (_dir, engine) = standard_engine().await;
    let report = engine
        .annotate(&[180.063, -1.0, 9_999_999.0], &options(5, 1))
        .await;

    assert_eq!(report.items.len(), 3);
    assert_eq!(report.total_annotated, 3);
    assert_eq!(report.tolerance_ppm, 10);
    assert!(!report.deadline_exceeded);

    let mzs: Vec<f64> = report.items.iter().map(|i| i.mz).collect();
    assert_eq!(mzs, vec![180.063, -1.0, 9_999_999.0]);

    let first = &report.items[0];
    assert_eq!(first.candidates.len(), 2);
    assert_eq!(first.best_match.as_ref(), first.candidates.first());
    assert_eq!(
        first.best_match.as_ref().and_then(|r| r.get("name")),
        Some(&CellValue::from("glucose"))
    );

    for empty in &report.items[1..] {
        assert!(empty.candidates.is_empty());
        assert!(empty.best_match.is_none());
        assert!(empty.error.is_none());
    }
}

#[tokio::test]
async fn candidates_are_capped() {
    let (_dir, engine) = standard_engine().await;
    let report = engine.annotate(&[180.063], &options(1, 1)).await;
    assert_eq!(report.items[0].candidates.len(), 1);
}

#[tokio::test]
async fn non_finite_mass_fails_alone() {
    let (_dir, engine) = standard_engine().await;
    let report = engine
        .annotate(&[f64::NAN, 147.0532], &options(5, 1))
        .await;
    assert_eq!(report.items.len(), 2);
    assert!(report.items[0].error.is_some());
    assert!(report.items[0].candidates.is_empty());
    assert!(report.items[1].error.is_none());
    assert!(report.items[1].is_annotated());
}

#[tokio::test]
async fn concurrent_annotation_matches_sequential() {
    let (_dir, engine) = standard_engine().await;
    let masses = [180.063, 75.032, 1.0, 147.0532, 88.016, 180.0634];
    let sequential = engine.annotate(&masses, &options(5, 1)).await;
    let concurrent = engine.annotate(&masses, &options(5, 4)).await;
    assert_eq!(sequential, concurrent);
}

#[tokio::test]
async fn repeated_annotation_is_identical() {
    let (_dir, engine) = standard_engine().await;
    let masses = [180.063, 88.016];
    let first = engine.annotate(&masses, &options(5, 1)).await;
    let second = engine.annotate(&masses, &options(5, 1)).await;
    assert_eq!(first, second);
}

#[tokio::test]
async fn passed_deadline_stops_the_batch() {
    let (_dir, engine) = standard_engine().await;
    let mut opts = options(5, 1);
    opts.deadline = Some(Instant::now());
    let report = engine.annotate(&[180.063, 88.016], &opts).await;
    assert!(report.deadline_exceeded);
    assert!(report.items.is_empty());
    assert_eq!(report.total_annotated, 0);
}

#[tokio::test]
async fn generous_deadline_finishes() {
    let (_dir, engine) = standard_engine().await;
    let mut opts = options(5, 2);
    opts.deadline = Some(Instant::now() + Duration::from_secs(60));
    let report = engine.annotate(&[180.063, 88.016], &opts).await;
    assert!(!report.deadline_exceeded);
    assert_eq!(report.items.len(), 2);
}

#[tokio::test]
async fn missing_metabolite_table_yields_error_items() {
    let (_dir, engine) = engine_with("CREATE TABLE samples (id INTEGER);").await;
    let report = engine.annotate(&[180.063, 88.016], &options(5, 1)).await;
    assert_eq!(report.items.len(), 2);
    for item in &report.items {
        let error = item.error.as_deref().unwrap();
        assert!(error.contains("no candidate table"), "{error}");
    }
}

#[tokio::test]
async fn metabolite_table_without_mass_column_is_an_error() {
    let (_dir, engine) = engine_with(
        "CREATE TABLE metabolites (name TEXT, formula TEXT);
         INSERT INTO metabolites VALUES ('glucose', 'C6H12O6');",
    )
    .await;
    let report = engine.annotate(&[180.063], &options(5, 1)).await;
    assert!(report.items[0].candidates.is_empty());
    assert!(report.items[0].error.is_some());
}

#[tokio::test]
async fn csv_masses_flow_through_annotation() {
    let (_dir, engine) = standard_engine().await;
    let masses = read_masses("mz,intensity\n180.063,10\nbroken,3\n".as_bytes(), "mz").unwrap();
    let report = engine.annotate(&masses, &options(5, 1)).await;
    assert_eq!(report.items.len(), 2);
    assert!(report.items[0].is_annotated());
    assert!(report.items[1].error.is_some());
}

#[tokio::test]
async fn options_follow_configuration() {
    let (_dir, engine) = standard_engine().await;
    let opts = AnnotateOptions::from_engine(&engine);
    assert_eq!(opts.tolerance_ppm, 10);
    assert_eq!(opts.max_candidates, 5);
    assert_eq!(opts.concurrency, 1);
    assert!(opts.deadline.is_none());
}

const TEXT_MASSES: &str = "
    CREATE TABLE metabolites (name TEXT, exact_mass TEXT);
    INSERT INTO metabolites (name, exact_mass) VALUES
        ('heavy', '1000.0'),
        ('glucose', '180.063'),
        ('label', 'n/a');
";

#[tokio::test]
async fn masses_stored_as_text_are_searched_numerically() {
    let (_dir, engine) = engine_with(TEXT_MASSES).await;
    let request = mzdex_core::request::SearchRequest::default().with_mass(1000.0, 10);
    let response = engine.search_metabolites(&request).await.unwrap();

    assert_eq!(response.total, 1);
    assert_eq!(
        response.results[0].get("name"),
        Some(&CellValue::from("heavy"))
    );
}

#[tokio::test]
async fn masses_stored_as_text_are_annotated() {
    let (_dir, engine) = engine_with(TEXT_MASSES).await;
    let report = engine.annotate(&[1000.0, 180.063, 0.0], &options(5, 1)).await;

    let counts: Vec<usize> = report.items.iter().map(|i| i.candidates.len()).collect();
    assert_eq!(counts, vec![1, 1, 0]);
    assert_eq!(
        report.items[0].best_match.as_ref().and_then(|r| r.get("name")),
        Some(&CellValue::from("heavy"))
    );
}
