//! Process-wide options passed to the processor as `key=value` arguments.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::decl::BaseTypeDecl;

/// Enables or disables retention rule generation. Defaults to `true`.
pub const OPTION_GENERATE_PROGUARD_RULES: &str = "moshi.generateProguardRules";

/// Errors from parsing processor arguments.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum OptionsError {
	/// A boolean option had a value other than `true` or `false`.
	#[error("invalid value for {key}: '{value}' (expected 'true' or 'false')")]
	InvalidBool { key: String, value: String },

	/// An argument was not of the form `key=value`.
	#[error("malformed processor argument '{0}' (expected key=value)")]
	Malformed(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Options {
	pub generate_proguard_rules: bool,
}

impl Default for Options {
	fn default() -> Self {
		Self {
			generate_proguard_rules: true,
		}
	}
}

impl Options {
	/// Builds options from key/value pairs. Later pairs override earlier ones.
	/// Unknown keys are ignored.
	pub fn from_args<I, K, V>(args: I) -> Result<Self, OptionsError>
	where
		I: IntoIterator<Item = (K, V)>,
		K: AsRef<str>,
		V: AsRef<str>,
	{
		let mut options = Self::default();
		for (key, value) in args {
			let (key, value) = (key.as_ref(), value.as_ref());
			match key {
				OPTION_GENERATE_PROGUARD_RULES => {
					options.generate_proguard_rules = parse_bool(key, value)?;
				}
				_ => tracing::debug!(key, "ignoring unknown processor option"),
			}
		}
		Ok(options)
	}

	/// Whether retention rules are emitted for `base`. A per-declaration
	/// override wins over the process-wide setting.
	pub fn retention_enabled(&self, base: &BaseTypeDecl) -> bool {
		base.generate_proguard_rules.unwrap_or(self.generate_proguard_rules)
	}
}

/// Splits a `key=value` argument.
pub fn parse_arg(arg: &str) -> Result<(String, String), OptionsError> {
	match arg.split_once('=') {
		Some((key, value)) if !key.trim().is_empty() => Ok((key.trim().to_string(), value.trim().to_string())),
		_ => Err(OptionsError::Malformed(arg.to_string())),
	}
}

fn parse_bool(key: &str, value: &str) -> Result<bool, OptionsError> {
	match value.trim() {
		v if v.eq_ignore_ascii_case("true") => Ok(true),
		v if v.eq_ignore_ascii_case("false") => Ok(false),
		_ => Err(OptionsError::InvalidBool {
			key: key.to_string(),
			value: value.to_string(),
		}),
	}
}
