use pretty_assertions::assert_eq;
use rstest::rstest;
use sealgen_processor::{
	ArtifactKind, BaseTypeDecl, Decl, DiagnosticKind, Location, TypeLabel, TypeName, VariantDecl,
};

use crate::common::{base, base_name, class, object, run};

#[test]
fn duplicate_labels() {
	let run = run(vec![base(), class("TypeA", "a", &[]).into(), class("TypeB", "a", &[]).into()]);
	assert_eq!(run.messages(), ["Duplicate label"]);
	assert_eq!(run.count(ArtifactKind::Adapter), 0);
	assert_eq!(run.diagnostics()[0].subject, base_name().nested("TypeB"));
}

#[test]
fn duplicate_alternate_labels() {
	let run = run(vec![
		base(),
		class("TypeA", "a", &["aa"]).into(),
		class("TypeB", "b", &["aa"]).into(),
	]);
	assert_eq!(run.messages(), ["Duplicate alternate label"]);
	assert!(run.artifacts.is_empty());
}

#[rstest]
#[case::alternate_equals_own_primary(&["a"])]
#[case::repeated_alternate(&["x", "x"])]
fn self_aliasing_is_a_collision(#[case] alternates: &[&str]) {
	let run = run(vec![base(), class("TypeA", "a", alternates).into()]);
	assert_eq!(run.messages(), ["Duplicate alternate label"]);
}

#[test]
fn generic_subtypes() {
	let run = run(vec![
		base(),
		class("TypeA", "a", &[]).into(),
		class("TypeB", "b", &[]).type_parameters(1).into(),
	]);
	assert_eq!(run.messages(), ["Moshi-sealed subtypes cannot be generic."]);
	assert!(run.artifacts.is_empty());
}

#[test]
fn generic_subtypes_are_reported_alongside_label_errors() {
	let run = run(vec![
		base(),
		class("TypeA", "a", &[]).into(),
		class("TypeB", "a", &[]).type_parameters(2).into(),
	]);
	let mut messages = run.messages();
	messages.sort();
	assert_eq!(messages, ["Duplicate label", "Moshi-sealed subtypes cannot be generic."]);
}

#[test]
fn base_without_variants_is_empty() {
	let run = run(vec![base()]);
	assert_eq!(run.diagnostics()[0].kind, DiagnosticKind::EmptyHierarchy);
}

#[test]
fn variants_without_base_are_unresolved() {
	let run = run(vec![class("TypeB", "b", &[]).into(), class("TypeA", "a", &[]).into()]);
	let diagnostics = run.diagnostics();
	assert_eq!(diagnostics.len(), 1);
	assert_eq!(diagnostics[0].kind, DiagnosticKind::UnresolvedHierarchy);
	assert_eq!(diagnostics[0].subject, base_name().nested("TypeB"));
}

#[rstest]
#[case::null_and_object(
	BaseTypeDecl::new(base_name()).default_null(true),
	vec![object("Unknown", "u").default_object(true).into()],
	DiagnosticKind::ConflictingDefaults
)]
#[case::two_objects(
	BaseTypeDecl::new(base_name()),
	vec![
		object("Unknown", "u").default_object(true).into(),
		object("Other", "o").default_object(true).into(),
	],
	DiagnosticKind::MultipleDefaultObjects
)]
#[case::class_as_default(
	BaseTypeDecl::new(base_name()),
	vec![class("Unknown", "u", &[]).default_object(true).into()],
	DiagnosticKind::DefaultObjectNotSingleton
)]
fn fallback_rules(#[case] base: BaseTypeDecl, #[case] variants: Vec<Decl>, #[case] expected: DiagnosticKind) {
	let mut decls = vec![Decl::from(base)];
	decls.extend(variants);
	let run = run(decls);
	let kinds: Vec<DiagnosticKind> = run.diagnostics().iter().map(|d| d.kind).collect();
	assert_eq!(kinds, [expected]);
}

#[test]
fn failure_is_scoped_to_its_hierarchy() {
	let other = TypeName::new("test", "Other");
	let run = run(vec![
		base(),
		class("TypeA", "a", &[]).into(),
		class("TypeB", "a", &[]).into(),
		BaseTypeDecl::new(other.clone()).into(),
		VariantDecl::new(other.nested("Leaf"), other.clone(), TypeLabel::new("a")).into(),
	]);
	assert_eq!(run.messages(), ["Duplicate label"]);
	assert!(run.file("kotlin/test/OtherJsonAdapter.kt").is_some());
	assert!(run.file("kotlin/test/BaseTypeJsonAdapter.kt").is_none());
}

#[test]
fn diagnostics_carry_locations() {
	let run = run(vec![
		base(),
		class("TypeA", "a", &[]).into(),
		class("TypeB", "a", &[]).located(Location::new("BaseType.kt", 9, 3)).into(),
	]);
	assert_eq!(
		run.diagnostics()[0].to_string(),
		"BaseType.kt:9:3: error: Duplicate label \
		 (test.BaseType.TypeB: 'a' is already the primary label of test.BaseType.TypeA)"
	);
}
