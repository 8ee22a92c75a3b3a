//! File-based host for the sealgen processor.
//!
//! Each TOML manifest describes one compilation unit: a package, the discovery
//! round its declarations become visible in, and any number of `[[base]]` and
//! `[[variant]]` tables. Type references are relative to the manifest's
//! package unless written as `pkg:Outer.Inner`.
//!
//! ```toml
//! package = "test"
//!
//! [[base]]
//! name = "BaseType"
//!
//! [[variant]]
//! name = "BaseType.TypeA"
//! supertype = "BaseType"
//! label = "a"
//! alternate_labels = ["aa"]
//! ```

mod error;
mod schema;

use std::collections::BTreeMap;
use std::ops::Range;
use std::path::{Path, PathBuf};

use sealgen_processor::{BaseTypeDecl, Decl, Location, TypeLabel, TypeName, VariantDecl, VariantShape};
use toml::Spanned;

pub use crate::error::{ManifestError, Result};
use crate::schema::{RawBase, RawKind, RawManifest, RawVariant};

/// One parsed compilation unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Manifest {
	pub path: PathBuf,
	pub package: String,
	/// Discovery round the declarations become visible in.
	pub round: u32,
	/// Bases first, then variants, each in file order.
	pub decls: Vec<Decl>,
}

impl Manifest {
	/// Reads and parses the manifest at `path`.
	pub fn load(path: &Path) -> Result<Self> {
		let text = std::fs::read_to_string(path).map_err(|error| ManifestError::Io {
			path: path.to_path_buf(),
			error,
		})?;
		Self::parse(path, &text)
	}

	/// Parses manifest text. `path` is recorded in declaration locations.
	pub fn parse(path: &Path, text: &str) -> Result<Self> {
		let raw: RawManifest = toml::from_str(text).map_err(|error| ManifestError::Toml {
			path: path.to_path_buf(),
			error,
		})?;
		let unit = Unit { path, text, package: &raw.package };

		let mut decls = Vec::with_capacity(raw.bases.len() + raw.variants.len());
		for base in &raw.bases {
			decls.push(unit.base(base)?.into());
		}
		for variant in &raw.variants {
			decls.push(unit.variant(variant)?.into());
		}
		tracing::debug!(path = %path.display(), round = raw.round, decls = decls.len(), "parsed manifest");

		Ok(Self {
			path: path.to_path_buf(),
			package: raw.package,
			round: raw.round,
			decls,
		})
	}
}

/// Groups manifests into discovery rounds, ordered by round number. Within a
/// round declarations keep manifest order.
pub fn into_rounds<I>(manifests: I) -> Vec<Vec<Decl>>
where
	I: IntoIterator<Item = Manifest>,
{
	let mut rounds: BTreeMap<u32, Vec<Decl>> = BTreeMap::new();
	for manifest in manifests {
		rounds.entry(manifest.round).or_default().extend(manifest.decls);
	}
	rounds.into_values().collect()
}

struct Unit<'a> {
	path: &'a Path,
	text: &'a str,
	package: &'a str,
}

impl Unit<'_> {
	fn base(&self, raw: &RawBase) -> Result<BaseTypeDecl> {
		let name = self.type_name(&raw.name)?;
		let permits = raw
			.permits
			.iter()
			.map(|permit| self.type_name(permit))
			.collect::<Result<Vec<_>>>()?;

		let mut decl = BaseTypeDecl::new(name)
			.label_key(raw.type_label_key.as_str())
			.generate_adapter(raw.generate_adapter)
			.default_null(raw.default_null)
			.permits(permits)
			.located(self.location(raw.name.span()));
		if let Some(on) = raw.generate_proguard_rules {
			decl = decl.generate_proguard_rules(on);
		}
		Ok(decl)
	}

	fn variant(&self, raw: &RawVariant) -> Result<VariantDecl> {
		let shape = match raw.kind {
			RawKind::Class => VariantShape::Constructible,
			RawKind::Object => VariantShape::Singleton,
		};
		let label = TypeLabel::new(raw.label.as_str()).with_alternates(raw.alternate_labels.iter().map(String::as_str));
		Ok(VariantDecl::new(self.type_name(&raw.name)?, self.type_name(&raw.supertype)?, label)
			.shape(shape)
			.type_parameters(raw.type_parameters)
			.default_object(raw.default_object)
			.located(self.location(raw.name.span())))
	}

	/// Resolves `Outer.Inner` against the unit's package, or `pkg:Outer.Inner`
	/// against `pkg`.
	fn type_name(&self, raw: &Spanned<String>) -> Result<TypeName> {
		let value = raw.get_ref().trim();
		let (package, names) = value.split_once(':').unwrap_or((self.package, value));
		TypeName::nested_path(package.trim(), names.trim()).ok_or_else(|| ManifestError::InvalidTypeName {
			path: self.path.to_path_buf(),
			line: self.location(raw.span()).line,
			name: value.to_string(),
		})
	}

	/// One-based line and column of a byte span's start.
	fn location(&self, span: Range<usize>) -> Location {
		let before = self.text.get(..span.start).unwrap_or(self.text);
		let line = before.matches('\n').count() + 1;
		let column = before.rsplit('\n').next().map_or(0, |l| l.chars().count()) + 1;
		Location::new(self.path, line as u32, column as u32)
	}
}
