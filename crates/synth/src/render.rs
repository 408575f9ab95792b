//! Deterministic rendering of a synthesis into source text.

use crate::{MAX_ENTRIES, Synthesis};

/// Marker comment placed at the head and foot of every generated file.
pub const FILE_MARKER: &str =
	"/*\tTHIS FILE IS AUTO-GENERATED. MANUAL CHANGES MAY RESULT IN ERRORS AND SHOULD BE AVOIDED.\t*/";

const TRUNCATION_WARNING: &str =
	"| Warning: the number of input names exceeds 32. Not all entries are included in the bitmask.";

/// Renders the synthesized entries as a Rust enum declaration.
///
/// Pure function of its input: identical syntheses render to byte-identical
/// text. Entries appear in input order, separated by commas except after the
/// last; entries whose identifier differs from the raw name carry a doc line
/// naming the original; a warning annotation is embedded when the input was
/// truncated.
pub fn render(synthesis: &Synthesis) -> String {
	let mut out = String::new();

	out.push_str(FILE_MARKER);
	out.push_str("\n\n");
	out.push_str("/// Bitmask values synthesized from the project tag table.\n");

	let warning = if synthesis.truncated() {
		format!(" {TRUNCATION_WARNING}")
	} else {
		String::new()
	};
	out.push_str(&format!(
		"#[repr(i64)]\npub enum Tags {{\t// {} of {}{}\n",
		synthesis.input_len, MAX_ENTRIES, warning
	));

	let count = synthesis.entries.len();
	for (i, entry) in synthesis.entries.iter().enumerate() {
		if entry.renamed() {
			out.push_str(&format!(
				"\t/// Name was changed to stay source-safe. Original name: '{}'\n",
				entry.original
			));
		}
		let separator = if i + 1 < count { "," } else { "" };
		out.push_str(&format!(
			"\t{} = {}{}\n",
			entry.identifier, entry.value, separator
		));
	}

	out.push_str("}\n\n");
	out.push_str(FILE_MARKER);
	out.push('\n');

	out
}
