//! Format constants for ICARTT and NASA Ames files
//!
//! Fixed line positions, supported FFI values, recognised time units and the
//! defaults used by the parser and the adapters.

// =============================================================================
// File Format Index
// =============================================================================

/// The only File Format Index this crate parses
pub const SUPPORTED_FFI: i64 = 1001;

/// File extensions commonly used for ICARTT files
pub const ICARTT_EXTENSIONS: &[&str] = &["ict", "icartt"];

/// File extensions commonly used for NASA Ames files
pub const AMES_EXTENSIONS: &[&str] = &["na", "nas", "ames", "prn"];

// =============================================================================
// Fixed Header Layout (1-based line numbers)
// =============================================================================

/// Positions of the fixed header lines that are checked before parsing
pub mod lines {
    /// `NLHEAD, FFI[, version]`
    pub const FIRST: usize = 1;

    /// File volume number, number of file volumes
    pub const VOLUME: usize = 6;

    /// Start date and revision date (six integers)
    pub const DATES: usize = 7;
}

// =============================================================================
// Missing Value Flags
// =============================================================================

/// Header fields whose values also denote missing data in ICARTT files
pub const DEFAULT_EXTRA_MISSING_FLAGS: &[&str] = &["LLOD_FLAG", "ULOD_FLAG"];

// =============================================================================
// Time Handling
// =============================================================================

/// Recognised independent-variable units and their length in seconds
pub mod time_units {
    pub const SECONDS: &[&str] = &["s", "sec", "secs", "second", "seconds"];
    pub const MINUTES: &[&str] = &["min", "mins", "minute", "minutes"];
    pub const HOURS: &[&str] = &["h", "hr", "hrs", "hour", "hours"];
    pub const DAYS: &[&str] = &["d", "day", "days"];

    pub const SECONDS_PER_MINUTE: f64 = 60.0;
    pub const SECONDS_PER_HOUR: f64 = 3_600.0;
    pub const SECONDS_PER_DAY: f64 = 86_400.0;
}

// =============================================================================
// DataFrame Adapter
// =============================================================================

/// Name of the derived timestamp column
pub const DATETIME_COLUMN: &str = "DATETIME";
