//! Error types for manifest loading.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when loading a manifest.
#[derive(Debug, Error)]
pub enum ManifestError {
	/// Error reading a manifest file.
	#[error("I/O error reading {path}: {error}")]
	Io {
		/// Path to the file that failed to read.
		path: PathBuf,
		/// The underlying I/O error.
		error: std::io::Error,
	},

	/// Error parsing TOML syntax or the manifest schema.
	#[error("failed to parse {path}: {error}")]
	Toml {
		path: PathBuf,
		error: toml::de::Error,
	},

	/// A type reference is not of the form `Outer.Inner` or `pkg:Outer.Inner`.
	#[error("{path}:{line}: invalid type name '{name}'")]
	InvalidTypeName {
		path: PathBuf,
		line: u32,
		name: String,
	},
}

/// Result type for manifest operations.
pub type Result<T> = std::result::Result<T, ManifestError>;
