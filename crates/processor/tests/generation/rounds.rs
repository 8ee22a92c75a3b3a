use std::collections::BTreeSet;

use pretty_assertions::assert_eq;
use rstest::rstest;
use sealgen_processor::{ArtifactKind, BaseTypeDecl, Decl, DiagnosticKind, Options};

use crate::common::{base, base_name, class, object, run_rounds};

const ADAPTER_PATH: &str = "kotlin/test/BaseTypeJsonAdapter.kt";

fn valid_decls() -> Vec<Decl> {
	vec![
		base(),
		class("TypeA", "a", &["aa"]).into(),
		class("TypeB", "b", &[]).into(),
		object("TypeC", "c").into(),
	]
}

fn invalid_decls() -> Vec<Decl> {
	vec![
		base(),
		class("TypeA", "a", &["x"]).into(),
		class("TypeB", "a", &[]).into(),
		class("TypeC", "c", &["x"]).type_parameters(1).into(),
	]
}

/// Splits `decls` into rounds: `plan[i]` is the round of `decls[i]`, each
/// round in the order given by `order`.
fn schedule(decls: Vec<Decl>, order: &[usize], plan: &[usize]) -> Vec<Vec<Decl>> {
	let rounds = plan.iter().copied().max().unwrap_or(0) + 1;
	let mut out: Vec<Vec<Decl>> = vec![Vec::new(); rounds];
	for &i in order {
		out[plan[i]].push(decls[i].clone());
	}
	out
}

/// The (type, label) pairs registered by the adapter, ignoring their order.
fn registrations(contents: &str) -> BTreeSet<String> {
	contents
		.lines()
		.filter(|l| l.trim_start().starts_with(".withSubtype("))
		.map(|l| l.trim().to_string())
		.collect()
}

#[rstest]
#[case::one_round(&[0, 1, 2, 3], &[0, 0, 0, 0])]
#[case::reversed(&[3, 2, 1, 0], &[0, 0, 0, 0])]
#[case::base_last(&[1, 2, 3, 0], &[1, 0, 0, 1])]
#[case::one_per_round(&[0, 1, 2, 3], &[3, 2, 1, 0])]
#[case::interleaved(&[2, 0, 3, 1], &[0, 1, 0, 1])]
fn round_order_does_not_change_the_outcome(#[case] order: &[usize], #[case] plan: &[usize]) {
	let reference = run_rounds(Options::default(), vec![valid_decls()]);
	let shuffled = run_rounds(Options::default(), schedule(valid_decls(), order, plan));

	assert_eq!(shuffled.result, Ok(()));
	assert_eq!(
		registrations(shuffled.file(ADAPTER_PATH).unwrap()),
		registrations(reference.file(ADAPTER_PATH).unwrap())
	);
	assert_eq!(shuffled.artifacts.len(), reference.artifacts.len());

	let reference = run_rounds(Options::default(), vec![invalid_decls()]);
	let shuffled = run_rounds(Options::default(), schedule(invalid_decls(), order, plan));
	assert!(!reference.diagnostics().is_empty());
	assert_eq!(shuffled.diagnostics(), reference.diagnostics());
}

#[test]
fn late_variants_are_reported_not_merged() {
	let run = run_rounds(
		Options::default(),
		vec![
			vec![base(), class("TypeA", "a", &[]).into()],
			Vec::new(),
			vec![class("TypeB", "b", &[]).into()],
		],
	);
	assert_eq!(run.count(ArtifactKind::Adapter), 1);
	assert!(!run.file(ADAPTER_PATH).unwrap().contains("TypeB"));
	let kinds: Vec<DiagnosticKind> = run.diagnostics().iter().map(|d| d.kind).collect();
	assert_eq!(kinds, [DiagnosticKind::LateVariant]);
}

#[test]
fn permitted_variants_hold_the_hierarchy_open() {
	let permitting = || -> Decl {
		BaseTypeDecl::new(base_name())
			.permits([base_name().nested("TypeA"), base_name().nested("TypeB")])
			.into()
	};

	let run = run_rounds(
		Options::default(),
		vec![
			vec![permitting(), class("TypeA", "a", &[]).into()],
			Vec::new(),
			Vec::new(),
			vec![class("TypeB", "b", &[]).into()],
			Vec::new(),
		],
	);
	assert_eq!(run.result, Ok(()));
	let adapter = run.file(ADAPTER_PATH).unwrap();
	assert!(adapter.contains(".withSubtype(BaseType.TypeB::class.java, \"b\")"));

	let run = run_rounds(
		Options::default(),
		vec![vec![permitting(), class("TypeA", "a", &[]).into()], Vec::new()],
	);
	assert!(run.artifacts.is_empty());
	let diagnostics = run.diagnostics();
	assert_eq!(diagnostics.len(), 1);
	assert_eq!(diagnostics[0].kind, DiagnosticKind::UnresolvedHierarchy);
	assert_eq!(
		diagnostics[0].detail.as_deref(),
		Some("subtypes never became visible: test.BaseType.TypeB")
	);
}
