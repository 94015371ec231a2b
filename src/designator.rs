//! Grid designators and pin exception sets.
//!
//! Array packages name their balls or pins `<row letters><column number>`.
//! The letters I, O, Q, S and Z are never used in row names; after `Y` the
//! sequence continues with `AA`, `AB`, ... like spreadsheet columns.

use std::sync::OnceLock;

use indexmap::IndexSet;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};

use crate::error::{FpwError, FpwResult};

/// Letters usable in row names, in order.
pub const ROW_ALPHABET: &[u8; 21] = b"ABCDEFGHJKLMNPRTUVWXY";

/// Returns the letter sequence for a zero-based row index.
#[must_use]
#[allow(clippy::cast_possible_truncation)] // n % base indexes a 21-letter table
pub fn row_letters(row: u32) -> String {
    let base = ROW_ALPHABET.len() as u64;
    let mut letters = Vec::new();
    let mut n = u64::from(row) + 1;
    while n > 0 {
        n -= 1;
        letters.push(char::from(ROW_ALPHABET[(n % base) as usize]));
        n /= base;
    }
    letters.iter().rev().collect()
}

/// Returns the designator for a zero-based grid cell, e.g. `(0, 0)` is `A1`.
#[must_use]
pub fn designator_for(row: u32, col: u32) -> String {
    format!("{}{}", row_letters(row), u64::from(col) + 1)
}

/// Parses a designator back into a zero-based `(row, col)` cell.
///
/// Returns `None` for text that [`designator_for`] can never produce.
#[must_use]
pub fn parse_designator(designator: &str) -> Option<(u32, u32)> {
    let split = designator.find(|c: char| c.is_ascii_digit())?;
    let (letters, digits) = designator.split_at(split);
    if letters.is_empty() || digits.starts_with('0') {
        return None;
    }
    let col: u32 = digits.parse().ok()?;

    let base = ROW_ALPHABET.len() as u32;
    let mut row: u32 = 0;
    for c in letters.bytes() {
        let digit = ROW_ALPHABET.iter().position(|&l| l == c)? as u32;
        row = row.checked_mul(base)?.checked_add(digit + 1)?;
    }
    Some((row - 1, col - 1))
}

fn token_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Z]*[0-9]+$").expect("valid designator pattern"))
}

/// Designators of pins or balls that are not populated.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct PinExceptions(IndexSet<String>);

impl PinExceptions {
    /// Creates an empty exception set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a list of designators separated by commas, semicolons or whitespace.
    ///
    /// Designators are upper-cased. Empty input yields an empty set.
    ///
    /// # Errors
    ///
    /// Returns an error for a token that is not a designator or pin number.
    pub fn parse(list: &str) -> FpwResult<Self> {
        let mut set = IndexSet::new();
        for token in list
            .split(|c: char| c == ',' || c == ';' || c.is_whitespace())
            .filter(|t| !t.is_empty())
        {
            let token = token.to_uppercase();
            if !token_pattern().is_match(&token) {
                return Err(FpwError::invalid_parameter(
                    "pin_pad_exceptions",
                    format!("'{token}' is not a pin or ball designator"),
                ));
            }
            set.insert(token);
        }
        Ok(Self(set))
    }

    /// Adds a designator to the set.
    pub fn insert(&mut self, designator: impl Into<String>) -> bool {
        self.0.insert(designator.into().to_uppercase())
    }

    /// Returns `false` iff the designator is listed as an exception.
    #[must_use]
    pub fn is_populated(&self, designator: &str) -> bool {
        !self.0.contains(designator)
    }

    /// Number of listed designators.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if nothing is excluded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the designators in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }
}

impl<S: Into<String>> FromIterator<S> for PinExceptions {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(|s| s.into().to_uppercase()).collect())
    }
}

/// Free-function form of [`PinExceptions::is_populated`].
#[must_use]
pub fn is_populated(designator: &str, exceptions: &PinExceptions) -> bool {
    exceptions.is_populated(designator)
}

impl<'de> Deserialize<'de> for PinExceptions {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            List(Vec<String>),
            Text(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::List(items) => Ok(items.into_iter().collect()),
            Repr::Text(text) => Self::parse(&text).map_err(serde::de::Error::custom),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn first_rows() {
        assert_eq!(designator_for(0, 0), "A1");
        assert_eq!(designator_for(7, 9), "H10");
        assert_eq!(designator_for(8, 0), "J1");
        assert_eq!(designator_for(9, 9), "K10");
    }

    #[test]
    fn largest_indices_do_not_overflow() {
        assert_eq!(designator_for(0, u32::MAX), "A4294967296");
        let letters = row_letters(u32::MAX);
        assert!(!letters.is_empty());
        assert!(letters.bytes().all(|b| ROW_ALPHABET.contains(&b)));
    }

    #[test]
    fn letter_sequence_skips_reserved() {
        let letters: String = (0..21).map(row_letters).collect();
        assert_eq!(letters, "ABCDEFGHJKLMNPRTUVWXY");
        assert_eq!(row_letters(21), "AA");
        assert_eq!(row_letters(22), "AB");
        assert_eq!(row_letters(41), "AY");
        assert_eq!(row_letters(42), "BA");
    }

    #[test]
    fn designators_unique_and_clean() {
        let mut seen = HashSet::new();
        for row in 0..50 {
            for col in 0..50 {
                let d = designator_for(row, col);
                let letters: String = d.chars().take_while(char::is_ascii_alphabetic).collect();
                assert!(!letters.contains(['I', 'O', 'Q', 'S', 'Z']), "{d}");
                assert!(seen.insert(d));
            }
        }
        assert_eq!(seen.len(), 2500);
    }

    #[test]
    fn parse_inverts_designator() {
        for row in 0..60 {
            for col in [0, 5, 43] {
                assert_eq!(parse_designator(&designator_for(row, col)), Some((row, col)));
            }
        }
        assert_eq!(parse_designator("AM32"), Some((32, 31)));
        assert_eq!(parse_designator("I1"), None);
        assert_eq!(parse_designator("12"), None);
        assert_eq!(parse_designator("A0"), None);
        assert_eq!(parse_designator("A"), None);
    }

    #[test]
    fn exceptions_parse_and_match() {
        let exceptions = PinExceptions::parse("a1, B2;AM32  17").unwrap();
        assert_eq!(exceptions.len(), 4);
        assert!(!exceptions.is_populated("A1"));
        assert!(!exceptions.is_populated("17"));
        assert!(exceptions.is_populated("A2"));
        assert!(is_populated("C3", &exceptions));
    }

    #[test]
    fn empty_exceptions_populate_everything() {
        let exceptions = PinExceptions::parse("  ").unwrap();
        assert!(exceptions.is_empty());
        assert!(exceptions.is_populated("A1"));
    }

    #[test]
    fn bad_token_rejected() {
        assert!(PinExceptions::parse("A1, B-2").is_err());
    }

    #[test]
    fn deserialize_list_or_text() {
        let from_list: PinExceptions = serde_json::from_str(r#"["A1", "b2"]"#).unwrap();
        let from_text: PinExceptions = serde_json::from_str(r#""A1 B2""#).unwrap();
        assert_eq!(from_list, from_text);
        assert_eq!(serde_json::to_string(&from_list).unwrap(), r#"["A1","B2"]"#);
    }
}
