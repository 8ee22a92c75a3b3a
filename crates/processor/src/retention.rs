//! Shrinker retention rules for generated adapters.
//!
//! Moshi locates a generated adapter reflectively from the base type's binary
//! name, so both the base type's name and the adapter's `Moshi` constructor
//! must survive shrinking. Every rule is conditional on the base type being
//! kept at all.

use std::path::PathBuf;

use crate::artifact::{Artifact, ArtifactKind};
use crate::generate::{MOSHI, adapter_type_name};
use crate::validate::ValidatedHierarchy;

const RULES_DIR: &str = "resources/META-INF/proguard";

/// Renders the retention rules for a validated hierarchy.
pub fn render_retention_rules(hierarchy: &ValidatedHierarchy) -> Artifact {
	let base = hierarchy.name();
	let target = base.reflection_name();
	let adapter = adapter_type_name(base).reflection_name();

	let contents = format!(
		"-if class {target}\n\
		 -keepnames class {target}\n\
		 -if class {target}\n\
		 -keep class {adapter} {{\n    \
		 public <init>({MOSHI});\n\
		 }}\n"
	);

	Artifact {
		kind: ArtifactKind::RetentionRules,
		origin: base.clone(),
		path: PathBuf::from(RULES_DIR).join(format!("moshi-sealed-{}.pro", base.canonical_name())),
		contents,
	}
}
