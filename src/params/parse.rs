//! Flat parameter maps and numeric text parsing
//!
//! Form fields arrive as free text. Parsing follows leading-prefix float
//! semantics: `"12abc"` reads as 12, while `""` or `"abc"` read as NaN.
//! NaN is carried through into the projection rather than rejected here.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::ParamError;

/// Parse a numeric form value using leading-prefix semantics
pub fn parse_number(text: &str) -> f64 {
    let trimmed = text.trim_start();

    for (literal, value) in [
        ("Infinity", f64::INFINITY),
        ("+Infinity", f64::INFINITY),
        ("-Infinity", f64::NEG_INFINITY),
    ] {
        if trimmed.starts_with(literal) {
            return value;
        }
    }

    let prefix = numeric_prefix(trimmed);
    if prefix.is_empty() {
        return f64::NAN;
    }
    prefix.parse().unwrap_or(f64::NAN)
}

/// Longest prefix of `text` that forms a decimal literal
fn numeric_prefix(text: &str) -> &str {
    let bytes = text.as_bytes();
    let mut i = 0;

    if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
        i += 1;
    }

    let mut has_digits = false;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
        has_digits = true;
    }
    if i < bytes.len() && bytes[i] == b'.' {
        i += 1;
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
            has_digits = true;
        }
    }
    if !has_digits {
        return "";
    }

    // Exponent only counts when followed by at least one digit
    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        let exponent_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exponent_start {
            i = j;
        }
    }

    &text[..i]
}

/// Flat mapping from parameter name to numeric value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterMap {
    values: BTreeMap<String, f64>,
}

impl ParameterMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an already-numeric value
    pub fn insert(&mut self, name: impl Into<String>, value: f64) {
        self.values.insert(name.into(), value);
    }

    /// Insert a raw text value, parsed with [`parse_number`]
    pub fn insert_text(&mut self, name: impl Into<String>, text: &str) {
        self.values.insert(name.into(), parse_number(text));
    }

    /// Apply a `name=value` override as given on the command line
    pub fn insert_override(&mut self, assignment: &str) -> Result<(), ParamError> {
        let (name, text) = assignment
            .split_once('=')
            .ok_or_else(|| ParamError::MalformedOverride(assignment.to_string()))?;
        let name = name.trim();
        if name.is_empty() {
            return Err(ParamError::MalformedOverride(assignment.to_string()));
        }
        self.insert_text(name, text);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    /// Layer `other` on top of this map; later values win
    pub fn merge(&mut self, other: &ParameterMap) {
        for (name, value) in &other.values {
            self.values.insert(name.clone(), *value);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.values.iter().map(|(name, value)| (name.as_str(), *value))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(String, f64)> for ParameterMap {
    fn from_iter<I: IntoIterator<Item = (String, f64)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}
