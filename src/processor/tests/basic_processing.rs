//! Basic batch processing tests

use crate::config::ParseConfig;
use crate::header::tests::{ames_1001, full_icartt, minimal_icartt};
use crate::models::FormatKind;
use crate::processor::BatchProcessor;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Helper to create a campaign directory with one file per fixture
fn create_campaign(temp_dir: &TempDir) -> PathBuf {
    let root = temp_dir.path().join("campaign");
    let flight = root.join("flight1");
    fs::create_dir_all(&flight).unwrap();

    fs::write(flight.join("TEST-TP_20240715_R0.ict"), minimal_icartt()).unwrap();
    fs::write(flight.join("DC8-O3_20080401_R0.ict"), full_icartt()).unwrap();
    fs::write(root.join("cnc_910214.na"), ames_1001()).unwrap();
    fs::write(root.join("notes.txt"), "not a data file").unwrap();

    root
}

#[tokio::test]
async fn test_parse_directory() {
    let temp_dir = TempDir::new().unwrap();
    let root = create_campaign(&temp_dir);

    let processor = BatchProcessor::new(ParseConfig::default().with_workers(2)).unwrap();
    let outcome = processor.parse_directory(&root).await.unwrap();

    assert_eq!(outcome.stats.files_parsed, 3);
    assert_eq!(outcome.stats.files_failed, 0);
    // 3 + 4 + 3 rows
    assert_eq!(outcome.stats.total_rows, 10);

    let kinds: Vec<FormatKind> = outcome.parsed().map(|p| p.format_kind()).collect();
    assert_eq!(kinds.iter().filter(|k| **k == FormatKind::Icartt).count(), 2);
    assert_eq!(kinds.iter().filter(|k| **k == FormatKind::Ames1001).count(), 1);
}

#[tokio::test]
async fn test_outcomes_keep_input_order() {
    let temp_dir = TempDir::new().unwrap();
    let root = create_campaign(&temp_dir);

    let paths = vec![
        root.join("cnc_910214.na"),
        root.join("flight1").join("TEST-TP_20240715_R0.ict"),
        root.join("flight1").join("DC8-O3_20080401_R0.ict"),
    ];
    let processor = BatchProcessor::new(ParseConfig::default().with_workers(3)).unwrap();
    let outcome = processor.parse_files(paths.clone()).await.unwrap();

    let returned: Vec<PathBuf> = outcome.files.iter().map(|f| f.path.clone()).collect();
    assert_eq!(returned, paths);

    let sources: Vec<&str> = outcome.parsed().map(|p| p.source()).collect();
    assert_eq!(
        sources,
        vec![
            "cnc_910214.na",
            "TEST-TP_20240715_R0.ict",
            "DC8-O3_20080401_R0.ict"
        ]
    );
}

#[tokio::test]
async fn test_parse_glob() {
    let temp_dir = TempDir::new().unwrap();
    let root = create_campaign(&temp_dir);

    let processor = BatchProcessor::new(ParseConfig::default()).unwrap();
    let pattern = format!("{}/**/*.ict", root.display());
    let outcome = processor.parse_glob(&pattern).await.unwrap();

    assert_eq!(outcome.stats.files_parsed, 2);
    assert!(outcome.parsed().all(|p| p.format_kind() == FormatKind::Icartt));
}

#[tokio::test]
async fn test_empty_batch() {
    let temp_dir = TempDir::new().unwrap();
    let processor = BatchProcessor::new(ParseConfig::default()).unwrap();
    let outcome = processor.parse_directory(temp_dir.path()).await.unwrap();

    assert!(outcome.files.is_empty());
    assert_eq!(outcome.stats.files_parsed, 0);
    assert_eq!(outcome.stats.total_rows, 0);
}
