//! Core data structures for parsed ICARTT and NASA Ames files.
//!
//! Defines the format tag, variable descriptors, the enumerated set of known
//! header keys and the columnar data block.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The two grammars this crate understands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FormatKind {
    /// ICARTT, comma delimited
    Icartt,
    /// NASA Ames FFI 1001, whitespace delimited
    Ames1001,
}

impl FormatKind {
    pub fn name(&self) -> &'static str {
        match self {
            FormatKind::Icartt => "ICARTT",
            FormatKind::Ames1001 => "NASA Ames",
        }
    }
}

impl fmt::Display for FormatKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Descriptor of one dependent variable, in declaration order
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableDescriptor {
    pub name: String,
    pub units: String,
    /// Long name or description, empty when the file gives none
    pub description: String,
    /// 0-based position in the data block after the independent column
    pub index: usize,
}

/// Descriptor of the independent (time) variable
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndependentVariable {
    pub name: String,
    pub units: String,
    pub description: String,
}

/// Known scalar header fields.
///
/// The first four come from fixed header lines, the rest from `KEY: value`
/// normal comments as laid out by the ICARTT standard. Anything else lands in
/// the header's overflow map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum HeaderKey {
    PiName,
    Organization,
    DataSourceDescription,
    MissionName,
    PiContactInfo,
    Platform,
    Location,
    AssociatedData,
    InstrumentInfo,
    DataInfo,
    Uncertainty,
    UlodFlag,
    UlodValue,
    LlodFlag,
    LlodValue,
    DmContactInfo,
    ProjectInfo,
    StipulationsOnUse,
    OtherComments,
    Revision,
}

impl HeaderKey {
    pub const ALL: [HeaderKey; 20] = [
        HeaderKey::PiName,
        HeaderKey::Organization,
        HeaderKey::DataSourceDescription,
        HeaderKey::MissionName,
        HeaderKey::PiContactInfo,
        HeaderKey::Platform,
        HeaderKey::Location,
        HeaderKey::AssociatedData,
        HeaderKey::InstrumentInfo,
        HeaderKey::DataInfo,
        HeaderKey::Uncertainty,
        HeaderKey::UlodFlag,
        HeaderKey::UlodValue,
        HeaderKey::LlodFlag,
        HeaderKey::LlodValue,
        HeaderKey::DmContactInfo,
        HeaderKey::ProjectInfo,
        HeaderKey::StipulationsOnUse,
        HeaderKey::OtherComments,
        HeaderKey::Revision,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            HeaderKey::PiName => "PI_NAME",
            HeaderKey::Organization => "ORGANIZATION",
            HeaderKey::DataSourceDescription => "DATA_SOURCE_DESCRIPTION",
            HeaderKey::MissionName => "MISSION_NAME",
            HeaderKey::PiContactInfo => "PI_CONTACT_INFO",
            HeaderKey::Platform => "PLATFORM",
            HeaderKey::Location => "LOCATION",
            HeaderKey::AssociatedData => "ASSOCIATED_DATA",
            HeaderKey::InstrumentInfo => "INSTRUMENT_INFO",
            HeaderKey::DataInfo => "DATA_INFO",
            HeaderKey::Uncertainty => "UNCERTAINTY",
            HeaderKey::UlodFlag => "ULOD_FLAG",
            HeaderKey::UlodValue => "ULOD_VALUE",
            HeaderKey::LlodFlag => "LLOD_FLAG",
            HeaderKey::LlodValue => "LLOD_VALUE",
            HeaderKey::DmContactInfo => "DM_CONTACT_INFO",
            HeaderKey::ProjectInfo => "PROJECT_INFO",
            HeaderKey::StipulationsOnUse => "STIPULATIONS_ON_USE",
            HeaderKey::OtherComments => "OTHER_COMMENTS",
            HeaderKey::Revision => "REVISION",
        }
    }

    /// Look up a key by its upper-case field name
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim().to_uppercase();
        Self::ALL.into_iter().find(|key| key.as_str() == name)
    }
}

impl fmt::Display for HeaderKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Column data aligned with the header's variable list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataBlock {
    /// Independent column values (typically elapsed seconds)
    pub independent: Vec<f64>,

    /// Dependent variable names, in declaration order
    pub names: Vec<String>,

    /// Dependent columns, `columns[i]` belongs to `names[i]`
    pub columns: Vec<Vec<f64>>,
}

impl DataBlock {
    /// Create an empty block for the given variable names
    pub fn with_names(names: Vec<String>) -> Self {
        let columns = vec![Vec::new(); names.len()];
        Self {
            independent: Vec::new(),
            names,
            columns,
        }
    }

    /// Number of data rows
    pub fn len(&self) -> usize {
        self.independent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.independent.is_empty()
    }

    /// Values of the named dependent column
    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.names
            .iter()
            .position(|n| n == name)
            .map(|i| self.columns[i].as_slice())
    }

    /// Iterate `(name, values)` pairs in declaration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.names
            .iter()
            .zip(&self.columns)
            .map(|(name, values)| (name.as_str(), values.as_slice()))
    }

    /// Largest independent value, ignoring NaN
    pub fn max_independent(&self) -> Option<f64> {
        self.independent
            .iter()
            .copied()
            .filter(|v| !v.is_nan())
            .fold(None, |acc, v| Some(acc.map_or(v, |m: f64| m.max(v))))
    }
}

/// Summary of a batch parse
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchStats {
    pub files_parsed: usize,
    pub files_failed: usize,
    pub total_rows: usize,
    pub processing_time_ms: u128,
}
