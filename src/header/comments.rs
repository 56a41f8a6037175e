//! `KEY: value` extraction from normal comment lines

use crate::models::HeaderKey;
use regex::Regex;
use std::collections::BTreeMap;
use std::sync::LazyLock;

static KEY_VALUE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([A-Za-z][A-Za-z0-9_]*)\s*:\s*(.*?)\s*$").expect("key/value pattern is valid")
});

/// Split a comment line into an upper-cased key and a trimmed value
pub fn parse_key_value(line: &str) -> Option<(String, String)> {
    let captures = KEY_VALUE.captures(line)?;
    Some((captures[1].to_uppercase(), captures[2].to_string()))
}

/// Sort `KEY: value` comment lines into known fields and overflow fields.
///
/// A key given twice keeps its last value.
pub fn collect_fields<'a, I>(
    comments: I,
    fields: &mut BTreeMap<HeaderKey, String>,
    extra: &mut BTreeMap<String, String>,
) where
    I: IntoIterator<Item = &'a String>,
{
    for (key, value) in comments.into_iter().filter_map(|line| parse_key_value(line)) {
        match HeaderKey::from_name(&key) {
            Some(known) => {
                fields.insert(known, value);
            }
            None => {
                extra.insert(key, value);
            }
        }
    }
}
