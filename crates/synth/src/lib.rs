//! Deterministic identifier synthesis.
//!
//! Converts a raw, possibly-invalid ordered list of names into stable,
//! collision-free, source-safe identifiers with assigned integer values, plus
//! change detection against a previously persisted snapshot and a
//! deterministic renderer for the generated artifact.
//!
//! The whole pipeline is pure: identical input produces byte-identical
//! output, so downstream consumers can skip regeneration (and the rebuilds it
//! triggers) whenever the input list is unchanged.

use std::collections::HashSet;
use std::sync::LazyLock;

use regex::Regex;

mod render;


pub use render::{FILE_MARKER, render};

/// Entries beyond this count are dropped; the target integer runs out of
/// single-bit values past its width.
pub const MAX_ENTRIES: usize = 32;

static WHITESPACE_RUN: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));
static LEADING_DIGITS: LazyLock<Regex> =
	LazyLock::new(|| Regex::new(r"^[0-9]+").expect("valid digit pattern"));

/// One synthesized entry: a source-safe identifier and its assigned value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthEntry {
	/// Sanitized, de-duplicated identifier.
	pub identifier: String,
	/// Assigned integer value.
	pub value: i64,
	/// The raw input name this entry was derived from.
	pub original: String,
}

impl SynthEntry {
	/// Returns `true` if sanitization changed the name.
	pub fn renamed(&self) -> bool {
		self.identifier != self.original
	}
}

/// Result of a synthesis run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Synthesis {
	/// Surviving entries, in input order.
	pub entries: Vec<SynthEntry>,
	/// Length of the raw input, before truncation.
	pub input_len: usize,
}

impl Synthesis {
	/// Returns `true` if the input exceeded [`MAX_ENTRIES`] and was cut off.
	pub fn truncated(&self) -> bool {
		self.input_len > MAX_ENTRIES
	}
}

/// Synthesizes identifiers for the first [`MAX_ENTRIES`] raw names.
///
/// Per entry, in order: trim surrounding whitespace, collapse internal
/// whitespace runs to a single underscore, strip leading decimal digits,
/// substitute `Tag_<index>` if nothing remains, then disambiguate against all
/// identifiers already assigned in this call by appending `_<n>` with the
/// smallest unused `n`, scanning from 0.
pub fn synthesize(raw: &[String]) -> Synthesis {
	let mut used: HashSet<String> = HashSet::new();
	let mut entries = Vec::with_capacity(raw.len().min(MAX_ENTRIES));

	for (index, original) in raw.iter().take(MAX_ENTRIES).enumerate() {
		let trimmed = original.trim();
		let mut tag = WHITESPACE_RUN.replace_all(trimmed, "_").into_owned();
		tag = LEADING_DIGITS.replace(&tag, "").into_owned();
		if tag.is_empty() {
			tag = format!("Tag_{index}");
		}

		let mut candidate = tag.clone();
		let mut n = 0;
		while !used.insert(candidate.clone()) {
			candidate = format!("{tag}_{n}");
			n += 1;
		}

		entries.push(SynthEntry {
			identifier: candidate,
			value: bit_value(index),
			original: original.clone(),
		});
	}

	Synthesis {
		entries,
		input_len: raw.len(),
	}
}

// 2^(n - 1), computed through f64 and truncated. The first entry comes out
// as 0; generated artifacts in circulation depend on this numbering.
fn bit_value(index: usize) -> i64 {
	2f64.powi(index as i32 - 1) as i64
}

/// Returns `true` if the current name list differs from the previous one.
///
/// Differing means: exactly one side is absent, the lengths differ, or any
/// element at the same position differs by ordinal comparison. Two absent
/// lists are unchanged.
pub fn has_changed(previous: Option<&[String]>, current: Option<&[String]>) -> bool {
	match (previous, current) {
		(None, None) => false,
		(None, Some(_)) | (Some(_), None) => true,
		(Some(a), Some(b)) => a.len() != b.len() || a.iter().zip(b.iter()).any(|(x, y)| x != y),
	}
}
