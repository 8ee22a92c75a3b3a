//! `sealgen.toml` configuration.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::Deserialize;

/// Looked up in the working directory when `--config` is not given.
pub const DEFAULT_CONFIG: &str = "sealgen.toml";

/// Output root used when neither the command line nor the config names one.
pub const DEFAULT_OUT_DIR: &str = "build/generated";

#[derive(Debug, Default, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
	pub out_dir: Option<PathBuf>,
	pub cache: Option<bool>,
	/// Processor options; booleans and numbers are passed on as text.
	pub options: BTreeMap<String, toml::Value>,
}

impl Config {
	/// Loads `explicit`, or [`DEFAULT_CONFIG`] if it exists. An explicit path
	/// must exist.
	pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
		let path = match explicit {
			Some(path) => path.to_path_buf(),
			None => {
				let fallback = PathBuf::from(DEFAULT_CONFIG);
				if !fallback.is_file() {
					return Ok(Self::default());
				}
				fallback
			}
		};
		let text = std::fs::read_to_string(&path).with_context(|| format!("failed to read {}", path.display()))?;
		let config = Self::parse(&text).with_context(|| format!("failed to parse {}", path.display()))?;
		tracing::debug!(path = %path.display(), "loaded config");
		Ok(config)
	}

	pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
		toml::from_str(text)
	}

	/// Processor options as `key=value` pairs, in key order.
	pub fn option_pairs(&self) -> impl Iterator<Item = (String, String)> + '_ {
		self.options.iter().map(|(key, value)| {
			let value = match value {
				toml::Value::String(s) => s.clone(),
				other => other.to_string(),
			};
			(key.clone(), value)
		})
	}
}
