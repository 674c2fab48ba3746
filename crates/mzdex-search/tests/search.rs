//! End-to-end search behavior against a seeded database.

mod common;

use common::{engine_with, standard_engine};
use mzdex_core::request::{SearchRequest, SortDirection};
use mzdex_core::responses::SearchWarning;
use mzdex_core::values::{CellValue, Record};
use mzdex_search::SearchError;
use pretty_assertions::assert_eq;
use rstest::rstest;

fn names(results: &[Record]) -> Vec<String> {
    results
        .iter()
        .filter_map(|r| match r.get("name") {
            Some(CellValue::Text(name)) => Some(name.clone()),
            _ => None,
        })
        .collect()
}

#[tokio::test]
async fn metabolite_text_search_only_looks_at_descriptive_columns() {
    let (_dir, engine) = standard_engine().await;
    let response = engine
        .search_metabolites(&SearchRequest::default().with_text("glu"))
        .await
        .unwrap();

    // pyruvate mentions "glu" only in its notes column.
    assert_eq!(names(&response.results), vec!["glucose", "glutamate"]);
    assert_eq!(response.total, 2);
    assert_eq!(response.table, "metabolites");
    assert!(response.warnings.is_empty());
}

#[tokio::test]
async fn generic_search_covers_every_column() {
    let (_dir, engine) = standard_engine().await;
    let response = engine
        .search_table(&SearchRequest::for_table("metabolites").with_text("glu"))
        .await
        .unwrap();
    assert_eq!(
        names(&response.results),
        vec!["glucose", "glutamate", "pyruvate"]
    );
    assert_eq!(
        response.columns,
        vec!["id", "name", "formula", "class", "exact_mass", "notes"]
    );
}

#[tokio::test]
async fn text_match_is_case_sensitive() {
    let (_dir, engine) = standard_engine().await;
    let response = engine
        .search_metabolites(&SearchRequest::default().with_text("GLU"))
        .await
        .unwrap();
    assert_eq!(response.total, 0);
    assert!(response.results.is_empty());
}

#[tokio::test]
async fn empty_text_is_no_text() {
    let (_dir, engine) = standard_engine().await;
    let with_empty = engine
        .search_metabolites(&SearchRequest::default().with_text(""))
        .await
        .unwrap();
    let without = engine
        .search_metabolites(&SearchRequest::default())
        .await
        .unwrap();
    assert_eq!(with_empty, without);
    assert_eq!(without.total, 5);
}

#[tokio::test]
async fn mass_search_uses_ppm_window() {
    let (_dir, engine) = standard_engine().await;
    let response = engine
        .search_metabolites(&SearchRequest::default().with_mass(180.063, 10))
        .await
        .unwrap();
    assert_eq!(names(&response.results), vec!["glucose", "fructose"]);

    let narrow = engine
        .search_metabolites(&SearchRequest::default().with_mass(180.063, 1))
        .await
        .unwrap();
    assert_eq!(names(&narrow.results), vec!["glucose"]);
}

#[tokio::test]
async fn text_and_mass_combine() {
    let (_dir, engine) = standard_engine().await;
    let request = SearchRequest::default()
        .with_text("fru")
        .with_mass(180.063, 10);
    let response = engine.search_metabolites(&request).await.unwrap();
    assert_eq!(names(&response.results), vec!["fructose"]);
}

#[rstest]
#[case(1, 2, vec!["glucose", "fructose"])]
#[case(2, 2, vec!["glutamate", "glycine"])]
#[case(3, 2, vec!["pyruvate"])]
#[case(4, 2, vec![])]
#[tokio::test]
async fn pages_partition_the_result_set(
    #[case] page: u32,
    #[case] size: u32,
    #[case] expected: Vec<&str>,
) {
    let (_dir, engine) = standard_engine().await;
    let response = engine
        .search_table(&SearchRequest::for_table("metabolites").with_page(page, size))
        .await
        .unwrap();
    assert_eq!(names(&response.results), expected);
    assert_eq!(response.total, 5);
    assert_eq!(response.total_pages, 3);
    assert_eq!(response.page, page);
    assert_eq!(response.page_size, size);
}

#[tokio::test]
async fn sort_key_orders_results() {
    let (_dir, engine) = standard_engine().await;
    let request = SearchRequest::for_table("metabolites")
        .with_sort("exact_mass", SortDirection::Asc)
        .with_page(1, 2);
    let response = engine.search_table(&request).await.unwrap();
    assert_eq!(names(&response.results), vec!["glycine", "pyruvate"]);
}

#[tokio::test]
async fn sort_on_missing_column_is_column_not_found() {
    let (_dir, engine) = standard_engine().await;
    let request =
        SearchRequest::for_table("metabolites").with_sort("retention_time", SortDirection::Desc);
    let err = engine.search_table(&request).await.unwrap_err();
    assert!(matches!(err, SearchError::ColumnNotFound { ref column, .. } if column == "retention_time"));
}

#[tokio::test]
async fn unknown_table_is_table_not_found() {
    let (_dir, engine) = standard_engine().await;
    let err = engine
        .search_table(&SearchRequest::for_table("spectra"))
        .await
        .unwrap_err();
    assert!(matches!(err, SearchError::TableNotFound(ref t) if t == "spectra"));
}

#[tokio::test]
async fn generic_search_requires_a_table() {
    let (_dir, engine) = standard_engine().await;
    let err = engine
        .search_table(&SearchRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, SearchError::InvalidRequest(_)));
}

#[tokio::test]
async fn zero_page_is_invalid() {
    let (_dir, engine) = standard_engine().await;
    let err = engine
        .search_metabolites(&SearchRequest::default().with_page(0, 10))
        .await
        .unwrap_err();
    assert!(matches!(err, SearchError::InvalidRequest(_)));
}

#[tokio::test]
async fn numeric_value_without_mass_column_warns() {
    let (_dir, engine) = standard_engine().await;
    let response = engine
        .search_table(&SearchRequest::for_table("samples").with_mass(180.0, 10))
        .await
        .unwrap();
    assert_eq!(response.total, 2);
    assert!(matches!(
        response.warnings.as_slice(),
        [SearchWarning::AmbiguousNumericFilter { table, .. }] if table == "samples"
    ));
}

#[tokio::test]
async fn filter_on_missing_field_is_column_not_found() {
    let (_dir, engine) = standard_engine().await;
    let request = SearchRequest::for_table("samples").with_filter("organism_type", "plant");
    let err = engine.search_table(&request).await.unwrap_err();
    assert!(matches!(err, SearchError::ColumnNotFound { .. }));
}

#[rstest]
#[case(Some("plant"), vec!["RuBisCO"])]
#[case(Some("animal"), vec!["hexokinase", "catalase"])]
#[case(Some("all"), vec!["hexokinase", "glucose oxidase", "RuBisCO", "catalase"])]
#[case(Some("Все"), vec!["hexokinase", "glucose oxidase", "RuBisCO", "catalase"])]
#[case(None, vec!["hexokinase", "glucose oxidase", "RuBisCO", "catalase"])]
#[tokio::test]
async fn enzyme_organism_filter(#[case] organism: Option<&str>, #[case] expected: Vec<&str>) {
    let (_dir, engine) = standard_engine().await;
    let response = engine
        .search_enzymes(&SearchRequest::default(), organism)
        .await
        .unwrap();
    assert_eq!(names(&response.results), expected);
}

#[tokio::test]
async fn enzyme_text_search_covers_ec_and_organism() {
    let (_dir, engine) = standard_engine().await;
    let by_ec = engine
        .search_enzymes(&SearchRequest::default().with_text("2.7.1"), None)
        .await
        .unwrap();
    assert_eq!(names(&by_ec.results), vec!["hexokinase"]);

    let by_organism = engine
        .search_enzymes(&SearchRequest::default().with_text("niger"), None)
        .await
        .unwrap();
    assert_eq!(names(&by_organism.results), vec!["glucose oxidase"]);
}

#[tokio::test]
async fn domain_table_resolves_by_keyword() {
    let (_dir, engine) = engine_with(
        "CREATE TABLE samples (id INTEGER);
         CREATE TABLE raw_metabolite_data (name TEXT, monoisotopic_mass REAL);
         INSERT INTO raw_metabolite_data VALUES ('citrate', 192.027);
         CREATE TABLE enzyme_list (name TEXT);",
    )
    .await;
    let response = engine
        .search_metabolites(&SearchRequest::default().with_mass(192.027, 5))
        .await
        .unwrap();
    assert_eq!(response.table, "raw_metabolite_data");
    assert_eq!(names(&response.results), vec!["citrate"]);
}

#[tokio::test]
async fn unresolvable_domain_lists_the_catalogue() {
    let (_dir, engine) = engine_with("CREATE TABLE samples (id INTEGER);").await;
    let err = engine
        .search_metabolites(&SearchRequest::default())
        .await
        .unwrap_err();
    match err {
        SearchError::NoCandidateTable {
            canonical,
            available,
            ..
        } => {
            assert_eq!(canonical, "metabolites");
            assert_eq!(available, vec!["samples"]);
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn repeated_searches_are_identical() {
    let (_dir, engine) = standard_engine().await;
    let request = SearchRequest::default().with_text("ose").with_page(1, 3);
    let first = engine.search_metabolites(&request).await.unwrap();
    let second = engine.search_metabolites(&request).await.unwrap();
    assert_eq!(first, second);
}

#[tokio::test]
async fn schema_changes_are_seen_without_restart() {
    let (_dir, engine) = standard_engine().await;
    engine
        .db()
        .connect()
        .unwrap()
        .execute("ALTER TABLE samples ADD COLUMN peak_mz REAL", ())
        .await
        .unwrap();
    let response = engine
        .search_table(&SearchRequest::for_table("samples").with_mass(180.0, 10))
        .await
        .unwrap();
    assert!(response.warnings.is_empty());
    assert_eq!(response.total, 0);
    assert!(response.columns.contains(&"peak_mz".to_string()));
}
