//! Tests for header parsing against both grammars

use super::*;
use crate::config::ParseConfig;
use crate::error::NasError;
use crate::header::parse_header;
use crate::lines::RawLines;
use crate::models::{FormatKind, HeaderKey};
use chrono::NaiveDate;

fn parse(text: &str, kind: FormatKind) -> crate::Result<crate::header::Header> {
    parse_header(&RawLines::from_text(text), kind, &ParseConfig::default())
}

#[test]
fn test_minimal_icartt_header() {
    let header = parse(&minimal_icartt(), FormatKind::Icartt).unwrap();

    assert_eq!(header.format_kind, FormatKind::Icartt);
    assert_eq!(header.ffi, 1001);
    assert_eq!(header.version, None);
    assert_eq!(header.n_header_lines, 17);
    assert_eq!(header.n_data_lines, 3);
    assert_eq!(header.pi_name(), "Doe, John");
    assert_eq!(header.organization(), "NASA Langley Research Center");
    assert_eq!(header.mission(), "TESTMISSION");
    assert_eq!(header.start_date, NaiveDate::from_ymd_opt(2024, 7, 15).unwrap());
    assert_eq!(header.revision_date, NaiveDate::from_ymd_opt(2024, 8, 1).unwrap());
    assert_eq!(header.data_interval, vec![0.0]);

    assert_eq!(header.independent.name, "Start_UTC");
    assert_eq!(header.independent.units, "seconds");

    assert_eq!(header.variable_names(), vec!["TEMP", "PRESS"]);
    assert_eq!(header.missing_values, vec![-9999.0, -9999.0]);
    assert_eq!(header.scale_factors, vec![1.0, 1.0]);
    assert_eq!(header.variables[1].units, "hPa");
    assert_eq!(header.variables[1].description, "static pressure");
    assert_eq!(header.variables[1].index, 1);

    assert_eq!(
        header.column_header,
        Some(vec![
            "Start_UTC".to_string(),
            "TEMP".to_string(),
            "PRESS".to_string()
        ])
    );
    assert!(header.normal_comments.is_empty());
}

#[test]
fn test_full_icartt_header() {
    let header = parse(&full_icartt(), FormatKind::Icartt).unwrap();

    assert_eq!(header.version.as_deref(), Some("V02_2016"));
    assert_eq!(header.n_header_lines, 27);
    assert_eq!(header.n_data_lines, 4);
    assert_eq!(header.scale_factors, vec![1.0, 1.0, 0.1]);
    assert_eq!(header.missing_value("RH"), Some(-99999.0));
    assert_eq!(header.scale_factor("RH"), Some(0.1));
    assert_eq!(header.variable("Temp").unwrap().units, "K");
    assert_eq!(header.variable("Temp").unwrap().description, "");

    assert_eq!(header.special_comments.len(), 2);
    assert_eq!(header.special_comments[1], "Data gap between 120 and 180 s");

    // column header line removed, everything else verbatim
    assert_eq!(header.normal_comments.len(), 7);
    assert_eq!(header.normal_comments[6], "Free text comment");

    assert_eq!(header.field(HeaderKey::Platform), "NASA DC-8");
    assert_eq!(header.field(HeaderKey::LlodFlag), "-8888");
    assert_eq!(header.field(HeaderKey::InstrumentInfo), "UV absorption");
    assert_eq!(header.get("ulod_flag"), Some("-7777"));
    assert_eq!(header.get("R0"), Some("Initial release"));
    assert_eq!(header.get("LLOD_VALUE"), None);
    assert_eq!(header.field(HeaderKey::LlodValue), "");

    let scalars = header.scalar_fields();
    assert_eq!(scalars.get("PI_NAME").map(String::as_str), Some("Smith, Jane"));
    assert_eq!(scalars.get("R0").map(String::as_str), Some("Initial release"));
}

#[test]
fn test_ames_header() {
    let header = parse(&ames_1001(), FormatKind::Ames1001).unwrap();

    assert_eq!(header.format_kind, FormatKind::Ames1001);
    assert_eq!(header.n_header_lines, 20);
    assert_eq!(header.n_data_lines, 3);
    assert_eq!(header.pi_name(), "O'BRIEN, ANTHONY");
    assert_eq!(header.independent.name, "Time");
    assert_eq!(header.independent.units, "seconds from 00:00 UT");
    assert_eq!(header.scale_factors, vec![1.0, 1.0, 1.0]);
    assert_eq!(header.missing_values, vec![9999.9, 999.9, 99999.0]);
    assert_eq!(
        header.variable_names(),
        vec!["PRESSURE", "TOTAL CONCENTRATION", "TEMPERATURE"]
    );
    assert_eq!(header.variables[1].units, "cm-3");
    assert_eq!(header.special_comments, vec!["Special comment line"]);
    assert_eq!(header.normal_comments, vec!["Normal comment line"]);
    assert_eq!(header.column_header, None);
}

#[test]
fn test_unsupported_ffi() {
    let text = replace_line(&minimal_icartt(), 1, "17, 2010");
    let result = parse(&text, FormatKind::Icartt);
    assert!(matches!(result, Err(NasError::UnsupportedFFI { found: 2010 })));
}

#[test]
fn test_declared_count_one_too_small() {
    let text = replace_line(&minimal_icartt(), 1, "16, 1001");
    let result = parse(&text, FormatKind::Icartt);
    assert!(matches!(
        result,
        Err(NasError::HeaderLineCountMismatch {
            declared: 16,
            consumed: 17
        })
    ));
}

#[test]
fn test_declared_count_one_too_large() {
    let text = replace_line(&minimal_icartt(), 1, "18, 1001");
    let result = parse(&text, FormatKind::Icartt);
    assert!(matches!(
        result,
        Err(NasError::HeaderLineCountMismatch {
            declared: 18,
            consumed: 17
        })
    ));
}

#[test]
fn test_missing_value_count_mismatch() {
    let text = replace_line(&minimal_icartt(), 12, "-9999");
    let result = parse(&text, FormatKind::Icartt);
    assert!(matches!(
        result,
        Err(NasError::InvalidHeaderField { line: 12, .. })
    ));
}

#[test]
fn test_non_numeric_missing_value() {
    let text = replace_line(&minimal_icartt(), 12, "-9999, N/A");
    let err = parse(&text, FormatKind::Icartt).unwrap_err();
    assert_eq!(err.line(), Some(12));
    assert!(err.to_string().contains("VMISS"));
}

#[test]
fn test_invalid_start_date() {
    let text = replace_line(&minimal_icartt(), 7, "2024, 13, 15, 2024, 08, 01");
    let result = parse(&text, FormatKind::Icartt);
    assert!(matches!(
        result,
        Err(NasError::InvalidDateFields { line: 7, .. })
    ));

    let text = replace_line(&minimal_icartt(), 7, "2023, 02, 29, 2024, 08, 01");
    assert!(matches!(
        parse(&text, FormatKind::Icartt),
        Err(NasError::InvalidDateFields { line: 7, .. })
    ));
}

#[test]
fn test_duplicate_variable_names() {
    let text = replace_line(&minimal_icartt(), 14, "TEMP, K");
    let result = parse(&text, FormatKind::Icartt);
    assert!(matches!(
        result,
        Err(NasError::DuplicateVariable { line: 14, ref name }) if name == "TEMP"
    ));
}

#[test]
fn test_truncated_header() {
    let text: String = minimal_icartt().lines().take(12).collect::<Vec<_>>().join("\n");
    let result = parse(&text, FormatKind::Icartt);
    assert!(matches!(result, Err(NasError::TruncatedHeader { line: 13, .. })));
}

#[test]
fn test_trailing_whitespace_and_mixed_delimiters() {
    let text = replace_line(&minimal_icartt(), 11, "1 1   ");
    let text = replace_line(&text, 12, "  -9999,-9999\t");
    let header = parse(&text, FormatKind::Icartt).unwrap();
    assert_eq!(header.missing_values, vec![-9999.0, -9999.0]);
}

#[test]
fn test_comment_field_extraction_disabled() {
    let config = ParseConfig::default()
        .without_comment_fields()
        .without_column_header();
    let header = parse_header(
        &RawLines::from_text(&full_icartt()),
        FormatKind::Icartt,
        &config,
    )
    .unwrap();

    assert_eq!(header.get("PLATFORM"), None);
    assert!(header.extra_fields().is_empty());
    assert_eq!(header.column_header, None);
    assert_eq!(header.normal_comments.len(), 8);
    // fixed-line fields are always present
    assert_eq!(header.pi_name(), "Smith, Jane");
}

#[test]
fn test_header_is_deterministic() {
    let first = parse(&full_icartt(), FormatKind::Icartt).unwrap();
    let second = parse(&full_icartt(), FormatKind::Icartt).unwrap();
    assert_eq!(first, second);
}

#[test]
fn test_variable_count_beyond_file_length() {
    let text = replace_line(&minimal_icartt(), 10, "1000000000000");
    let result = parse(&text, FormatKind::Icartt);
    assert!(matches!(
        result,
        Err(NasError::InvalidHeaderField { line: 10, ref field, .. }) if field == "NV"
    ));
}
