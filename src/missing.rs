//! Missing-value sentinels and opt-in masking.
//!
//! Parsing never alters sentinels. Masking happens only when a caller asks
//! for it, using the declared sentinel of each column plus the numeric values
//! of extra header flags such as `LLOD_FLAG`.

use crate::header::Header;
use tracing::debug;

/// Sentinel values of one dependent column
#[derive(Debug, Clone, PartialEq)]
pub struct MissingValues {
    pub column: String,
    /// Declared sentinel first, then extra flag values
    pub values: Vec<f64>,
}

impl MissingValues {
    pub fn is_missing(&self, value: f64) -> bool {
        self.values.contains(&value)
    }
}

/// Numeric values of the named header flags; absent or non-numeric flags are skipped
pub fn flag_values<S: AsRef<str>>(header: &Header, flags: &[S]) -> Vec<f64> {
    flags
        .iter()
        .filter_map(|flag| {
            let flag = flag.as_ref();
            let raw = header.get(flag)?;
            match raw.trim().parse::<f64>() {
                Ok(value) => Some(value),
                Err(_) => {
                    debug!("Ignoring non-numeric missing flag {} = '{}'", flag, raw);
                    None
                }
            }
        })
        .collect()
}

/// Per-column sentinel sets, in declaration order
pub fn missing_values<S: AsRef<str>>(header: &Header, flags: &[S]) -> Vec<MissingValues> {
    let extra = flag_values(header, flags);
    header
        .variables
        .iter()
        .map(|variable| {
            let mut values = vec![header.missing_values[variable.index]];
            for value in &extra {
                if !values.contains(value) {
                    values.push(*value);
                }
            }
            MissingValues {
                column: variable.name.clone(),
                values,
            }
        })
        .collect()
}

/// Replace sentinel occurrences with `None`
pub fn mask(values: &[f64], missing: &MissingValues) -> Vec<Option<f64>> {
    values
        .iter()
        .map(|v| if missing.is_missing(*v) { None } else { Some(*v) })
        .collect()
}
