//! Outcome reporting for generation attempts.

use std::fmt;

/// Severity of a finished generation attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenerationState {
	/// The attempt completed; the artifact is current.
	Success,
	/// The attempt completed with a caveat (e.g. truncated input).
	Warning,
	/// The attempt was aborted; prior configuration is untouched.
	Error,
}

/// Result of one generation attempt, suitable for host display.
#[derive(Debug, Clone)]
pub struct GenerationResult {
	/// Outcome severity.
	pub state: GenerationState,
	/// Human-readable outcome description.
	pub message: String,
	/// Completion time, milliseconds since the Unix epoch.
	pub timestamp: i64,
}

impl GenerationResult {
	fn new(state: GenerationState, message: impl Into<String>) -> Self {
		Self {
			state,
			message: message.into(),
			timestamp: chrono::Utc::now().timestamp_millis(),
		}
	}

	/// Creates a success result.
	pub fn success(message: impl Into<String>) -> Self {
		Self::new(GenerationState::Success, message)
	}

	/// Creates a warning result.
	pub fn warning(message: impl Into<String>) -> Self {
		Self::new(GenerationState::Warning, message)
	}

	/// Creates an error result.
	pub fn error(message: impl Into<String>) -> Self {
		Self::new(GenerationState::Error, message)
	}

	/// Returns `true` unless the attempt was aborted.
	pub fn completed(&self) -> bool {
		self.state != GenerationState::Error
	}
}

impl fmt::Display for GenerationResult {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		let state = match self.state {
			GenerationState::Success => "success",
			GenerationState::Warning => "warning",
			GenerationState::Error => "error",
		};
		write!(f, "[{state}] {}", self.message)
	}
}
