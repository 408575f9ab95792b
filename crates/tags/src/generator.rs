use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use thiserror::Error;

use stencil_generator::{
	ButtonLabel, Generator, GeneratorButtons, GeneratorCore, GeneratorReg, GeneratorSpec,
	PropertyDecl, StringDecorator, downcast, downcast_mut,
};
use stencil_store::{OverridePolicy, PrefKey, PrefKind, PrefStore, PrefValue, StoreError};
use stencil_synth::{MAX_ENTRIES, has_changed, render, synthesize};

use crate::result::GenerationResult;
use crate::symbols;

/// Namespace under which the tag generator keeps its own persisted state.
pub const SNAPSHOT_NAMESPACE: &str = "stencil.tags";

/// Symbol gating consumers of the generated enum.
pub const TAGS_SYMBOL: &str = "STENCIL_CUST_TAGS";

const SNAPSHOT_CATEGORY: &str = "TAG_GENERATOR";
const SNAPSHOT_NAME: &str = "EDITOR_TAGS";

/// Directory all configured paths resolve under.
const ASSETS_DIR: &str = "assets";

static SPEC: GeneratorSpec = GeneratorSpec {
	id: "stencil-tags::tag_enum",
	name: "Tag enum",
	description: "Synthesizes a bitmask enum from the project tag table.",
};

static PROPERTIES: &[PropertyDecl] = &[
	PropertyDecl {
		name: "SourcePath",
		kind: PrefKind::String,
		tooltip: Some("Newline-delimited tag list, relative to the assets folder."),
		decorator: Some(StringDecorator {
			prefix: Some("assets/"),
			suffix: None,
		}),
		getter: Some(|g| downcast::<TagEnumGenerator>(g).source_path.clone().into()),
		setter: Some(|g, v| {
			if let PrefValue::String(v) = v {
				downcast_mut::<TagEnumGenerator>(g).source_path = v;
			}
		}),
	},
	PropertyDecl {
		name: "OutputPath",
		kind: PrefKind::String,
		tooltip: Some("The path of the output file, relative to the assets folder."),
		decorator: Some(StringDecorator {
			prefix: Some("assets/"),
			suffix: None,
		}),
		getter: Some(|g| downcast::<TagEnumGenerator>(g).output_path.clone().into()),
		setter: Some(|g, v| {
			if let PrefValue::String(v) = v {
				downcast_mut::<TagEnumGenerator>(g).set_output_path(v);
			}
		}),
	},
];

static BUTTONS: &[ButtonLabel] = &[
	ButtonLabel {
		label: "Generate and enable tags",
		tooltip: Some("May trigger a workspace rebuild."),
	},
	ButtonLabel {
		label: "Disable tags",
		tooltip: Some("May trigger a workspace rebuild."),
	},
];

inventory::submit! {
	GeneratorReg::new(|| Ok(Box::new(TagEnumGenerator::new())))
}

#[derive(Debug, Error)]
enum TagError {
	#[error("I/O error accessing {path}: {error}")]
	Io {
		path: PathBuf,
		error: std::io::Error,
	},

	#[error(transparent)]
	Store(#[from] StoreError),

	#[error("malformed tag snapshot: {0}")]
	Snapshot(#[from] serde_json::Error),
}

/// Generates a Rust bitmask enum from the project tag table.
pub struct TagEnumGenerator {
	core: GeneratorCore,
	root: PathBuf,
	source_path: String,
	output_path: String,
	last_result: Option<GenerationResult>,
}

impl TagEnumGenerator {
	/// Creates a generator resolving paths under the current directory.
	pub fn new() -> Self {
		Self::with_root(".")
	}

	/// Creates a generator resolving paths under `root`.
	pub fn with_root(root: impl Into<PathBuf>) -> Self {
		Self {
			core: GeneratorCore::new(),
			root: root.into(),
			source_path: String::new(),
			output_path: String::new(),
			last_result: None,
		}
	}

	/// Configured tag-list path, relative to the assets folder.
	pub fn source_path(&self) -> &str {
		&self.source_path
	}

	/// Configured artifact path, relative to the assets folder.
	pub fn output_path(&self) -> &str {
		&self.output_path
	}

	/// Outcome of the most recent generation attempt, if any.
	pub fn last_result(&self) -> Option<&GenerationResult> {
		self.last_result.as_ref()
	}

	fn full_path(&self, name: &str) -> Option<PathBuf> {
		let trimmed = name.trim();
		if trimmed.is_empty() {
			return None;
		}
		Some(self.root.join(ASSETS_DIR).join(trimmed))
	}

	/// Reconfigures the tag-list path. No processing; the path is checked at
	/// generation time.
	pub fn set_source_path(&mut self, value: impl Into<String>) {
		self.source_path = value.into();
	}

	/// Reconfigures the artifact path.
	///
	/// Outside restoration the new path must name a `.rs` file, and an
	/// existing artifact is moved along; the move is refused when something
	/// already exists at the target.
	pub fn set_output_path(&mut self, value: String) {
		// During restoration, assign verbatim without processing.
		if !self.core.is_restored() {
			self.output_path = value;
			return;
		}
		if self.output_path == value {
			return;
		}

		let Some(new_path) = self.full_path(&value) else {
			tracing::error!("new output path is invalid (must name a .rs file)");
			return;
		};
		if new_path.extension().is_none_or(|ext| ext != "rs") {
			tracing::error!(
				path = %new_path.display(),
				"new output path is invalid (must name a .rs file)",
			);
			return;
		}

		// An existing artifact moves along with the path.
		if let Some(old_path) = self.full_path(&self.output_path)
			&& old_path.exists()
		{
			if new_path.exists() {
				tracing::error!(
					path = %new_path.display(),
					"a file already exists at the new output path; output path not updated",
				);
				return;
			}
			if let Err(error) = fs::rename(&old_path, &new_path) {
				tracing::error!(
					path = %new_path.display(),
					%error,
					"failed to move existing artifact; output path not updated",
				);
				return;
			}
		}

		self.output_path = value;
	}

	fn snapshot_key() -> PrefKey {
		PrefKey::new(SNAPSHOT_NAMESPACE, SNAPSHOT_CATEGORY, SNAPSHOT_NAME)
	}

	fn validate_output(&self) -> Result<PathBuf, String> {
		let Some(path) = self.full_path(&self.output_path) else {
			return Err(format!(
				"output file path ('{}') is invalid",
				self.output_path
			));
		};
		if path.extension().is_none_or(|ext| ext != "rs") {
			return Err(format!(
				"output file path ('{}') is invalid (must name a .rs file)",
				path.display()
			));
		}
		if let Some(parent) = path.parent()
			&& !parent.exists()
			&& fs::create_dir_all(parent).is_err()
		{
			return Err(format!(
				"output directory ('{}') could not be created",
				parent.display()
			));
		}
		Ok(path)
	}

	fn read_tags(&self) -> Result<Vec<String>, String> {
		let Some(path) = self.full_path(&self.source_path) else {
			return Err(format!("tag source path ('{}') is invalid", self.source_path));
		};
		match fs::read_to_string(&path) {
			Ok(content) => Ok(content.lines().map(str::to_string).collect()),
			Err(error) => Err(format!(
				"could not read tag source ('{}'): {error}",
				path.display()
			)),
		}
	}

	fn load_snapshot(&self, store: &PrefStore) -> Result<Option<Vec<String>>, TagError> {
		let Some(json) = store.get_as::<String>(&Self::snapshot_key())? else {
			return Ok(None);
		};
		Ok(Some(serde_json::from_str(&json)?))
	}

	fn store_snapshot(&self, store: &mut PrefStore, tags: &[String]) -> Result<(), TagError> {
		let json = serde_json::to_string(tags)?;
		store.set(
			Self::snapshot_key(),
			json,
			OverridePolicy::AlwaysOverwrite,
		);
		store.save()?;
		Ok(())
	}

	/// Runs one generation attempt.
	///
	/// Skips regeneration when the tag list is unchanged since the last
	/// successful run. Path errors abort only this attempt; persisted
	/// configuration is left untouched.
	pub fn generate(&mut self, store: &mut PrefStore) -> GenerationResult {
		if !self.core.is_restored() {
			return GenerationResult::error("generator has not been restored yet");
		}

		let output = match self.validate_output() {
			Ok(path) => path,
			Err(message) => {
				return GenerationResult::error(format!("tag enum was not generated: {message}"));
			}
		};
		let current = match self.read_tags() {
			Ok(tags) => tags,
			Err(message) => {
				return GenerationResult::error(format!("tag enum was not generated: {message}"));
			}
		};

		let previous = match self.load_snapshot(store) {
			Ok(previous) => previous,
			Err(error) => {
				tracing::warn!(%error, "previous tag snapshot unreadable; regenerating");
				None
			}
		};
		if !has_changed(previous.as_deref(), Some(&current)) {
			return GenerationResult::success("tag enum did not need to be regenerated");
		}

		if let Err(error) = self.store_snapshot(store, &current) {
			return GenerationResult::error(format!("could not persist tag snapshot: {error}"));
		}

		let synthesis = synthesize(&current);
		if let Err(error) = write_artifact(&output, &render(&synthesis)) {
			return GenerationResult::error(format!("could not write tag enum: {error}"));
		}

		if let Err(error) = symbols::add_symbol(store, symbols::DEFAULT_TARGET, TAGS_SYMBOL) {
			tracing::warn!(%error, "tag enum generated but the tag symbol could not be persisted");
		}

		if synthesis.truncated() {
			GenerationResult::warning(format!(
				"tag enum generated at '{}'; input exceeded {MAX_ENTRIES} entries and was truncated",
				output.display()
			))
		} else {
			GenerationResult::success(format!("tag enum generated at '{}'", output.display()))
		}
	}
}

impl Default for TagEnumGenerator {
	fn default() -> Self {
		Self::new()
	}
}

impl Generator for TagEnumGenerator {
	fn spec(&self) -> &'static GeneratorSpec {
		&SPEC
	}

	fn core(&self) -> &GeneratorCore {
		&self.core
	}

	fn core_mut(&mut self) -> &mut GeneratorCore {
		&mut self.core
	}

	fn properties(&self) -> &'static [PropertyDecl] {
		PROPERTIES
	}

	fn on_apply(&mut self, store: &mut PrefStore) {
		let result = self.generate(store);
		if result.completed() {
			tracing::info!(%result, "tag generation finished");
		} else {
			tracing::error!(%result, "tag generation aborted");
		}
		self.last_result = Some(result);
	}

	fn buttons(&self) -> Option<&dyn GeneratorButtons> {
		Some(self)
	}

	fn buttons_mut(&mut self) -> Option<&mut dyn GeneratorButtons> {
		Some(self)
	}
}

impl GeneratorButtons for TagEnumGenerator {
	fn button_labels(&self) -> &'static [ButtonLabel] {
		BUTTONS
	}

	fn is_button_interactable(&self, index: usize, store: &PrefStore) -> bool {
		match index {
			0 => true,
			1 => symbols::has_symbol(store, symbols::DEFAULT_TARGET, TAGS_SYMBOL),
			_ => false,
		}
	}

	fn on_button_click(&mut self, index: usize, store: &mut PrefStore) {
		match index {
			0 => {
				let result = self.generate(store);
				tracing::info!(%result, "tag generation finished");
				self.last_result = Some(result);
			}
			1 => {
				if let Err(error) = symbols::remove_symbol(store, symbols::DEFAULT_TARGET, TAGS_SYMBOL)
				{
					tracing::error!(%error, "failed to remove the tag symbol");
				}
			}
			_ => {}
		}
	}
}

// Open, write fully, flush, release; the handle is dropped even when a write
// fails partway, at the cost of a possibly partial artifact.
fn write_artifact(path: &Path, content: &str) -> Result<(), TagError> {
	let mut file = File::create(path).map_err(|error| TagError::Io {
		path: path.to_path_buf(),
		error,
	})?;
	file.write_all(content.as_bytes())
		.map_err(|error| TagError::Io {
			path: path.to_path_buf(),
			error,
		})?;
	file.flush().map_err(|error| TagError::Io {
		path: path.to_path_buf(),
		error,
	})
}
