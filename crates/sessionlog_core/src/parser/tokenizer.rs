//! Prefix tokenizer.
//!
//! # Responsibility
//! - Split command arguments into a preamble and prefixed segments.
//!
//! # Invariants
//! - A marker only delimits when it opens the argument text or follows
//!   whitespace, and only when it belongs to the caller's prefix set.
//! - Every occurrence of a prefix is kept, in input order.
//! - Preamble and segment values are trimmed.

use crate::parser::error::{ParseError, ParseResult};
use crate::parser::syntax::Prefix;
use std::collections::BTreeMap;

/// Prefix-to-values mapping produced for one input line.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArgumentMap {
    preamble: String,
    values: BTreeMap<Prefix, Vec<String>>,
}

impl ArgumentMap {
    /// Text before the first recognised marker.
    pub fn preamble(&self) -> &str {
        self.preamble.as_str()
    }

    /// Last value given for `prefix`.
    pub fn value(&self, prefix: Prefix) -> Option<&str> {
        self.values
            .get(&prefix)
            .and_then(|values| values.last())
            .map(String::as_str)
    }

    /// Every value given for `prefix`, in input order.
    pub fn all_values(&self, prefix: Prefix) -> &[String] {
        self.values
            .get(&prefix)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn contains(&self, prefix: Prefix) -> bool {
        self.values.contains_key(&prefix)
    }

    /// Adds one value after tokenization.
    pub fn push(&mut self, prefix: Prefix, value: impl Into<String>) {
        self.values.entry(prefix).or_default().push(value.into());
    }

    /// Rejects any of `prefixes` that occurred more than once.
    pub fn verify_no_duplicate_prefixes_for(&self, prefixes: &[Prefix]) -> ParseResult<()> {
        let repeats: Vec<(Prefix, usize)> = prefixes
            .iter()
            .map(|prefix| (*prefix, self.all_values(*prefix).len()))
            .filter(|(_, count)| *count > 1)
            .collect();
        if repeats.is_empty() {
            Ok(())
        } else {
            Err(ParseError::DuplicateField(repeats))
        }
    }

    /// Rejects the map when any of `prefixes` is absent.
    pub fn require_prefixes(&self, prefixes: &[Prefix], usage: &'static str) -> ParseResult<()> {
        let missing: Vec<Prefix> = prefixes
            .iter()
            .copied()
            .filter(|prefix| !self.contains(*prefix))
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(ParseError::MissingField { missing, usage })
        }
    }
}

/// Splits `args` on the given prefix markers.
pub fn tokenize(args: &str, prefixes: &[Prefix]) -> ArgumentMap {
    let positions = find_prefix_positions(args, prefixes);

    let preamble_end = positions.first().map_or(args.len(), |(start, _)| *start);
    let mut map = ArgumentMap {
        preamble: args[..preamble_end].trim().to_string(),
        values: BTreeMap::new(),
    };

    for (i, (start, prefix)) in positions.iter().enumerate() {
        let value_start = start + prefix.as_str().len();
        let value_end = positions
            .get(i + 1)
            .map_or(args.len(), |(next_start, _)| *next_start);
        map.push(*prefix, args[value_start..value_end].trim());
    }

    map
}

fn find_prefix_positions(args: &str, prefixes: &[Prefix]) -> Vec<(usize, Prefix)> {
    let mut positions: Vec<(usize, Prefix)> = prefixes
        .iter()
        .flat_map(|prefix| {
            args.match_indices(prefix.as_str())
                .filter(|(start, _)| starts_segment(args, *start))
                .map(move |(start, _)| (start, *prefix))
        })
        .collect();
    positions.sort_by_key(|(start, _)| *start);
    positions.dedup_by_key(|(start, _)| *start);
    positions
}

fn starts_segment(args: &str, start: usize) -> bool {
    args[..start]
        .chars()
        .next_back()
        .map_or(true, char::is_whitespace)
}
