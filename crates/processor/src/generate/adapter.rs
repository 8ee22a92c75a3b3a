//! Kotlin source for the polymorphic adapter of one hierarchy.
//!
//! The adapter delegates every call to a `PolymorphicJsonAdapterFactory`
//! instance. One `withSubtype` call is emitted per label, primary first, so
//! alternates decode to the same type while encoding only ever writes the
//! primary label. Singletons get an `ObjectJsonAdapter` registered on a derived
//! `Moshi` before the factory creates its delegate, which keeps the factory from
//! reflectively constructing them.

use std::path::PathBuf;

use super::kotlin::{TypeRefs, escape_package, string_literal};
use super::writer::SourceWriter;
use crate::artifact::{Artifact, ArtifactKind};
use crate::name::TypeName;
use crate::validate::{Fallback, ValidatedHierarchy};

pub const FILE_COMMENT: &str = "// Code generated by moshi-sealed. Do not edit.";
pub const MOSHI: &str = "com.squareup.moshi.Moshi";

const JSON_ADAPTER: &str = "com.squareup.moshi.JsonAdapter";
const JSON_READER: &str = "com.squareup.moshi.JsonReader";
const JSON_WRITER: &str = "com.squareup.moshi.JsonWriter";
const POLYMORPHIC_FACTORY: &str = "com.squareup.moshi.adapters.PolymorphicJsonAdapterFactory";
const SUPPRESS: &str = "kotlin.Suppress";
const UNIT: &str = "kotlin.Unit";
const EMPTY_SET: &str = "kotlin.collections.emptySet";
const ADD_ADAPTER: &str = "com.squareup.moshi.addAdapter";
const OBJECT_ADAPTER: &str = "dev.zacsweers.moshix.`sealed`.runtime.`internal`.ObjectJsonAdapter";
const EXPERIMENTAL_STDLIB: &str = "kotlin.ExperimentalStdlibApi";
const OPT_IN: &str = "kotlin.OptIn";

const SUPPRESSIONS: [&str; 2] = [
	r#"@Suppress("DEPRECATION", "unused", "ClassName", "REDUNDANT_PROJECTION", "RedundantExplicitType","#,
	r#"    "LocalVariableName", "RedundantVisibilityModifier")"#,
];

/// Simple name of the adapter class generated for `base`.
///
/// Nested base types join their enclosing names with `_`.
pub fn adapter_class_name(base: &TypeName) -> String {
	format!("{}JsonAdapter", base.simple_names().join("_"))
}

/// Identity of the adapter class generated for `base`.
pub fn adapter_type_name(base: &TypeName) -> TypeName {
	TypeName::new(base.package(), adapter_class_name(base))
}

/// Renders the adapter source file for a validated hierarchy.
pub fn render_adapter(hierarchy: &ValidatedHierarchy) -> Artifact {
	let base = hierarchy.name();
	let package = base.package();
	let adapter = adapter_class_name(base);
	let singletons: Vec<&TypeName> = hierarchy
		.variants
		.iter()
		.filter(|v| v.is_singleton())
		.map(|v| &v.name)
		.collect();

	let mut fixed = vec![
		JSON_ADAPTER,
		JSON_READER,
		JSON_WRITER,
		MOSHI,
		POLYMORPHIC_FACTORY,
		SUPPRESS,
		UNIT,
		EMPTY_SET,
	];
	if !singletons.is_empty() {
		fixed.extend([ADD_ADAPTER, OBJECT_ADAPTER, EXPERIMENTAL_STDLIB, OPT_IN]);
	}
	let referenced = std::iter::once(base)
		.chain(hierarchy.variants.iter().map(|v| &v.name))
		.chain(match &hierarchy.fallback {
			Fallback::Object(object) => Some(object),
			_ => None,
		});
	let refs = TypeRefs::new(package, &fixed, &[adapter.as_str()], referenced);
	let base_ref = refs.spell(base);

	let mut w = SourceWriter::new();
	w.line(0, FILE_COMMENT);
	if !package.is_empty() {
		w.line(0, format!("package {}", escape_package(package)));
	}
	w.blank();
	for import in refs.imports() {
		w.line(0, format!("import {import}"));
	}
	w.blank();

	for line in SUPPRESSIONS {
		w.line(0, line);
	}
	w.line(0, format!("public class {adapter}("));
	w.line(2, "moshi: Moshi,");
	w.line(0, format!(") : JsonAdapter<{base_ref}>() {{"));
	w.line(2, r#"@Suppress("UNCHECKED_CAST")"#);
	if !singletons.is_empty() {
		w.line(2, "@OptIn(ExperimentalStdlibApi::class)");
	}
	w.line(2, format!("private val runtimeAdapter: JsonAdapter<{base_ref}> ="));
	w.line(
		6,
		format!(
			"PolymorphicJsonAdapterFactory.of({base_ref}::class.java, {})",
			string_literal(&hierarchy.base.label_key)
		),
	);
	for variant in &hierarchy.variants {
		let variant_ref = refs.spell(&variant.name);
		for label in variant.label.iter() {
			w.line(
				8,
				format!(
					".withSubtype({variant_ref}::class.java, {})",
					string_literal(label.value)
				),
			);
		}
	}
	match &hierarchy.fallback {
		Fallback::None => {}
		Fallback::Null => w.line(8, ".withDefaultValue(null)"),
		Fallback::Object(object) => w.line(8, format!(".withDefaultValue({})", refs.spell(object))),
	}

	let create = format!(".create({base_ref}::class.java, emptySet(), ");
	let cast = format!(" as JsonAdapter<{base_ref}>");
	if singletons.is_empty() {
		w.line(8, format!("{create}moshi){cast}"));
	} else {
		w.line(8, format!("{create}moshi.newBuilder()"));
		for (i, singleton) in singletons.iter().enumerate() {
			let singleton_ref = refs.spell(singleton);
			let indent = if i == 0 { 10 } else { 6 };
			w.line(
				indent,
				format!(".addAdapter<{singleton_ref}>(ObjectJsonAdapter({singleton_ref}))"),
			);
		}
		w.line(6, format!(".build()){cast}"));
	}
	w.blank();
	w.blank();

	w.line(
		2,
		format!(
			"public override fun fromJson(reader: JsonReader): {base_ref}? = runtimeAdapter.fromJson(reader)"
		),
	);
	w.blank();
	w.line(
		2,
		format!("public override fun toJson(writer: JsonWriter, value_: {base_ref}?): Unit {{"),
	);
	w.line(4, "runtimeAdapter.toJson(writer, value_)");
	w.line(2, "}");
	w.line(0, "}");

	Artifact {
		kind: ArtifactKind::Adapter,
		origin: base.clone(),
		path: adapter_path(base, &adapter),
		contents: w.finish(),
	}
}

fn adapter_path(base: &TypeName, adapter: &str) -> PathBuf {
	let mut path = PathBuf::from("kotlin");
	path.extend(base.package().split('.').filter(|s| !s.is_empty()));
	path.push(format!("{adapter}.kt"));
	path
}
