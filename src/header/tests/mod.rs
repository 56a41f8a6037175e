//! Test fixtures shared by the parser test modules
//!
//! Small but complete ICARTT and NASA Ames files written inline so every
//! line number used in assertions can be read straight off the fixture.

mod header_tests;

/// Minimal two-variable ICARTT file: 17 header lines, data on lines 18-20
pub fn minimal_icartt() -> String {
    [
        "17, 1001",
        "Doe, John",
        "NASA Langley Research Center",
        "Test temperature and pressure sensor",
        "TESTMISSION",
        "1, 1",
        "2024, 07, 15, 2024, 08, 01",
        "0",
        "Start_UTC, seconds, elapsed seconds from midnight UTC",
        "2",
        "1, 1",
        "-9999, -9999",
        "TEMP, C, air temperature",
        "PRESS, hPa, static pressure",
        "0",
        "1",
        "Start_UTC,TEMP,PRESS",
        "0,25.0,1000.0",
        "60,-9999,1001.2",
        "120,26.1,999.8",
    ]
    .join("\n")
        + "\n"
}

/// Three-variable ICARTT v2 file with comment blocks: 27 header lines,
/// data on lines 28-31 followed by trailing blank lines
pub fn full_icartt() -> String {
    [
        "27, 1001, V02_2016",
        "Smith, Jane",
        "Princeton University",
        "Ozone photometer",
        "ARCTAS",
        "1, 1",
        "2008, 04, 01, 2008, 06, 15",
        "1.0",
        "Start_UTC, seconds, Elapsed seconds from 0 hours UT",
        "3",
        "1, 1, 0.1",
        "-9999, -9999, -99999",
        "O3, ppbv, Ozone mixing ratio",
        "Temp, K",
        "RH, %, relative humidity",
        "2",
        "Instrument calibrated on 2008-03-30",
        "Data gap between 120 and 180 s",
        "8",
        "PI_CONTACT_INFO: jane@example.org",
        "PLATFORM: NASA DC-8",
        "LLOD_FLAG: -8888",
        "ULOD_FLAG: -7777",
        "R0: Initial release",
        "INSTRUMENT_INFO: UV absorption",
        "Free text comment",
        "Start_UTC, O3, Temp, RH",
        "0, 41.2, 250.1, 45",
        "1, -8888, 250.3, 46",
        "2, 43.0, -9999, -99999",
        "3, 44.5, 251.0, -7777",
        "",
        "   ",
    ]
    .join("\n")
        + "\n"
}

/// NASA Ames FFI 1001 file with a wrapped scale factor line:
/// 20 header lines, data on lines 21-23
pub fn ames_1001() -> String {
    [
        "20 1001",
        "O'BRIEN, ANTHONY",
        "PRINCETON UNIVERSITY",
        "CONDENSATION NUCLEUS COUNTER",
        "TEST FLIGHT 1",
        "1 1",
        "1991 02 14 1991 03 01",
        "10.0",
        "Time (seconds from 00:00 UT)",
        "3",
        "1.0 1.0",
        "1.0",
        "9999.9 999.9 99999",
        "PRESSURE (mb)",
        "TOTAL CONCENTRATION (cm-3)",
        "TEMPERATURE (K)",
        "1",
        "Special comment line",
        "1",
        "Normal comment line",
        "36000 1013.2 1500 288.1",
        "36010 1012.9 99999 288.0",
        "36020   1012.5   1520   287.9",
    ]
    .join("\r\n")
        + "\r\n"
}

/// Replace one 1-based line of a fixture
pub fn replace_line(text: &str, number: usize, replacement: &str) -> String {
    text.lines()
        .enumerate()
        .map(|(i, line)| if i + 1 == number { replacement } else { line })
        .collect::<Vec<_>>()
        .join("\n")
        + "\n"
}
