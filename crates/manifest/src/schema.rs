//! On-disk manifest layout.

use serde::Deserialize;
use toml::Spanned;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawManifest {
	#[serde(default)]
	pub package: String,
	#[serde(default = "first_round")]
	pub round: u32,
	#[serde(default, rename = "base")]
	pub bases: Vec<RawBase>,
	#[serde(default, rename = "variant")]
	pub variants: Vec<RawVariant>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawBase {
	pub name: Spanned<String>,
	#[serde(default = "default_label_key")]
	pub type_label_key: String,
	#[serde(default = "enabled")]
	pub generate_adapter: bool,
	pub generate_proguard_rules: Option<bool>,
	#[serde(default)]
	pub default_null: bool,
	#[serde(default)]
	pub permits: Vec<Spanned<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct RawVariant {
	pub name: Spanned<String>,
	pub supertype: Spanned<String>,
	pub label: String,
	#[serde(default)]
	pub alternate_labels: Vec<String>,
	#[serde(default)]
	pub kind: RawKind,
	#[serde(default)]
	pub type_parameters: usize,
	#[serde(default)]
	pub default_object: bool,
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum RawKind {
	#[default]
	Class,
	Object,
}

fn first_round() -> u32 {
	1
}

fn default_label_key() -> String {
	sealgen_processor::DEFAULT_LABEL_KEY.to_string()
}

fn enabled() -> bool {
	true
}
