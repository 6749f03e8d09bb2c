use serde::Deserialize;

use crate::error::{ConfigError, Result};
use selwatch_dom::SELECTION_CHANGE;

/// How a [`SelectionObserver`](crate::SelectionObserver) attaches to its document.
///
/// ```toml
/// event = "selectionchange"
/// bind_on_create = true
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ObserverOptions {
	/// Document event that invalidates the cached views.
	pub event: String,
	/// Attach the listener when the observer is constructed.
	pub bind_on_create: bool,
}

impl Default for ObserverOptions {
	fn default() -> Self {
		Self {
			event: SELECTION_CHANGE.to_owned(),
			bind_on_create: true,
		}
	}
}

impl ObserverOptions {
	/// Parses options from TOML, filling unspecified fields with defaults.
	pub fn from_toml_str(source: &str) -> Result<Self> {
		let options: Self = toml::from_str(source)?;
		options.validate()?;
		Ok(options)
	}

	/// Checks that the options describe a usable binding.
	pub fn validate(&self) -> Result<()> {
		if self.event.trim().is_empty() {
			return Err(ConfigError::EmptyEvent);
		}
		Ok(())
	}
}
