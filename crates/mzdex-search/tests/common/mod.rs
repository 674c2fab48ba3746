//! Shared fixtures for mzdex-search integration tests.
#![allow(dead_code)]

use mzdex_config::MzdexConfig;
use mzdex_db::MzdexDb;
use mzdex_search::SearchEngine;
use tempfile::TempDir;

/// Canonical metabolite and enzyme tables plus an unrelated table without
/// any mass-like column.
pub const STANDARD: &str = "
    CREATE TABLE metabolites (
        id INTEGER PRIMARY KEY,
        name TEXT,
        formula TEXT,
        class TEXT,
        exact_mass REAL,
        notes TEXT
    );
    INSERT INTO metabolites (id, name, formula, class, exact_mass, notes) VALUES
        (1, 'glucose', 'C6H12O6', 'hexose', 180.063, NULL),
        (2, 'fructose', 'C6H12O6', 'hexose', 180.0634, NULL),
        (3, 'glutamate', 'C5H9NO4', 'amino acid', 147.0532, NULL),
        (4, 'glycine', 'C2H5NO2', 'amino acid', 75.032, NULL),
        (5, 'pyruvate', 'C3H4O3', 'keto acid', 88.016, 'feeds glu synthesis');

    CREATE TABLE enzymes (
        id INTEGER PRIMARY KEY,
        name TEXT,
        ec_number TEXT,
        organism TEXT,
        organism_type TEXT,
        molecular_weight REAL
    );
    INSERT INTO enzymes (id, name, ec_number, organism, organism_type, molecular_weight) VALUES
        (1, 'hexokinase', '2.7.1.1', 'Homo sapiens', 'animal', 102000.0),
        (2, 'glucose oxidase', '1.1.3.4', 'Aspergillus niger', 'fungus', 160000.0),
        (3, 'RuBisCO', '4.1.1.39', 'Spinacia oleracea', 'plant', 550000.0),
        (4, 'catalase', '1.11.1.6', 'Bos taurus', 'animal', 240000.0);

    CREATE TABLE samples (
        id INTEGER PRIMARY KEY,
        label TEXT,
        intensity REAL
    );
    INSERT INTO samples (id, label, intensity) VALUES
        (1, 'blank', 0.0),
        (2, 'leaf extract', 1200.5);
";

/// Seed a temp-file database with `sql` and wrap it in an engine using the
/// default configuration.
pub async fn engine_with(sql: &str) -> (TempDir, SearchEngine) {
    engine_with_config(sql, MzdexConfig::default()).await
}

pub async fn engine_with_config(sql: &str, mut config: MzdexConfig) -> (TempDir, SearchEngine) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mzdex.db");
    let path = path.to_str().unwrap().to_string();

    let db = MzdexDb::open_local(&path).await.unwrap();
    if !sql.trim().is_empty() {
        db.connect().unwrap().execute_batch(sql).await.unwrap();
    }
    config.database.path = path;
    (dir, SearchEngine::new(db, config))
}

pub async fn standard_engine() -> (TempDir, SearchEngine) {
    engine_with(STANDARD).await
}
