//! Transient user-facing messages.

use std::time::Duration;

/// How loud a notice is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Severity {
	Info,
	Warning,
	Error,
}

impl Severity {
	/// Indicator colour of the toast.
	pub fn indicator(self) -> &'static str {
		match self {
			Severity::Info => "blue",
			Severity::Warning => "yellow",
			Severity::Error => "red",
		}
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Notice {
	pub message: String,
	pub severity: Severity,
	pub duration: Duration,
}

impl Notice {
	pub fn info(message: impl Into<String>) -> Self {
		Self::new(message, Severity::Info, Duration::from_secs(5))
	}

	pub fn warning(message: impl Into<String>) -> Self {
		Self::new(message, Severity::Warning, Duration::from_secs(5))
	}

	pub fn error(message: impl Into<String>) -> Self {
		Self::new(message, Severity::Error, Duration::from_secs(7))
	}

	pub fn new(message: impl Into<String>, severity: Severity, duration: Duration) -> Self {
		Self {
			message: message.into(),
			severity,
			duration,
		}
	}
}
