use thiserror::Error;

/// Errors that can occur when loading observer configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
	/// Error parsing TOML syntax or shape.
	#[error("TOML parse error: {0}")]
	Toml(#[from] toml::de::Error),

	/// The configured event name is empty.
	#[error("event name must not be empty")]
	EmptyEvent,
}

/// Result type for configuration operations.
pub type Result<T> = std::result::Result<T, ConfigError>;
