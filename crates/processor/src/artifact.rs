//! Emitted files.

use std::fmt;
use std::path::PathBuf;

use crate::name::TypeName;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ArtifactKind {
	/// Kotlin source for a polymorphic adapter.
	Adapter,
	/// Shrinker retention rules.
	RetentionRules,
}

impl fmt::Display for ArtifactKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Adapter => write!(f, "adapter"),
			Self::RetentionRules => write!(f, "retention rules"),
		}
	}
}

/// A generated file, addressed relative to the output root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artifact {
	pub kind: ArtifactKind,
	/// Base type the file was generated for.
	pub origin: TypeName,
	pub path: PathBuf,
	pub contents: String,
}
