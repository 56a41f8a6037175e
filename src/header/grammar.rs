//! Grammar table keyed by format kind
//!
//! Both formats share the same line order; they differ in how descriptor
//! lines are written, whether value lists may wrap, and whether a trailing
//! column-header line closes the normal comments.

use crate::fields::split_comma;
use crate::models::FormatKind;

/// How variable descriptor lines are laid out
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptorStyle {
    /// `name, units[, description]`
    CommaSeparated,
    /// `name (units)`, or comma separated when the name itself is followed by a comma
    Parenthesized,
}

/// Grammar rules for one format kind
#[derive(Debug, Clone, Copy)]
pub struct Grammar {
    pub kind: FormatKind,
    pub descriptor_style: DescriptorStyle,
    /// Scale factor and missing value lists may continue on following lines
    pub values_may_wrap: bool,
    /// Last normal comment line may repeat the column names
    pub has_column_header: bool,
}

static ICARTT: Grammar = Grammar {
    kind: FormatKind::Icartt,
    descriptor_style: DescriptorStyle::CommaSeparated,
    values_may_wrap: false,
    has_column_header: true,
};

static AMES_1001: Grammar = Grammar {
    kind: FormatKind::Ames1001,
    descriptor_style: DescriptorStyle::Parenthesized,
    values_may_wrap: true,
    has_column_header: false,
};

impl Grammar {
    pub fn for_kind(kind: FormatKind) -> &'static Grammar {
        match kind {
            FormatKind::Icartt => &ICARTT,
            FormatKind::Ames1001 => &AMES_1001,
        }
    }

    /// Split a descriptor line into `(name, units, description)`
    pub fn split_descriptor<'a>(&self, line: &'a str) -> (&'a str, &'a str, &'a str) {
        let line = line.trim();
        if self.descriptor_style == DescriptorStyle::Parenthesized {
            if let Some(split) = split_parenthesized(line) {
                return split;
            }
            if !line.contains(',') {
                return (line, "", "");
            }
        }
        let parts = split_comma(line, 3);
        (
            parts.first().copied().unwrap_or(""),
            parts.get(1).copied().unwrap_or(""),
            parts.get(2).copied().unwrap_or(""),
        )
    }
}

/// `name (units)`; commas may appear inside the units but not in the name
fn split_parenthesized(line: &str) -> Option<(&str, &str, &str)> {
    if !line.ends_with(')') {
        return None;
    }
    let open = line.rfind('(')?;
    let name = line[..open].trim();
    if name.is_empty() || name.contains(',') {
        return None;
    }
    let units = line[open + 1..line.len() - 1].trim();
    Some((name, units, ""))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_grammar_table() {
        assert_eq!(Grammar::for_kind(FormatKind::Icartt).kind, FormatKind::Icartt);
        assert!(Grammar::for_kind(FormatKind::Icartt).has_column_header);
        assert!(Grammar::for_kind(FormatKind::Ames1001).values_may_wrap);
    }

    #[test]
    fn test_icartt_descriptor() {
        let grammar = Grammar::for_kind(FormatKind::Icartt);
        assert_eq!(
            grammar.split_descriptor("Start_UTC, seconds, elapsed seconds from 0 hours UT"),
            ("Start_UTC", "seconds", "elapsed seconds from 0 hours UT")
        );
        assert_eq!(grammar.split_descriptor("TEMP, K  "), ("TEMP", "K", ""));
        assert_eq!(grammar.split_descriptor("TEMP"), ("TEMP", "", ""));
    }

    #[test]
    fn test_ames_descriptor() {
        let grammar = Grammar::for_kind(FormatKind::Ames1001);
        assert_eq!(
            grammar.split_descriptor("Time (seconds from 00:00 UT)"),
            ("Time", "seconds from 00:00 UT", "")
        );
        assert_eq!(
            grammar.split_descriptor("TOTAL CONCENTRATION (cm-3)"),
            ("TOTAL CONCENTRATION", "cm-3", "")
        );
        assert_eq!(grammar.split_descriptor("PRESSURE, mb"), ("PRESSURE", "mb", ""));
        assert_eq!(grammar.split_descriptor("TEMPERATURE"), ("TEMPERATURE", "", ""));
        assert_eq!(grammar.split_descriptor("(K)"), ("(K)", "", ""));
    }

    #[test]
    fn test_ames_units_containing_commas() {
        let grammar = Grammar::for_kind(FormatKind::Ames1001);
        assert_eq!(
            grammar.split_descriptor("Time (seconds from 00:00 UT, 14 Feb 1991)"),
            ("Time", "seconds from 00:00 UT, 14 Feb 1991", "")
        );
        assert_eq!(
            grammar.split_descriptor("PRESSURE (mb, static)"),
            ("PRESSURE", "mb, static", "")
        );
        // a comma before the parenthesis means comma layout
        assert_eq!(
            grammar.split_descriptor("PRESSURE, mb (static)"),
            ("PRESSURE", "mb (static)", "")
        );
    }
}
