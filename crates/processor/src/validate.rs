//! Validation of closed hierarchies.
//!
//! Variant-level checks never stop at the first problem, so a single run
//! reports everything wrong with a hierarchy. Checks walk the variants in
//! identity order, which keeps the reported diagnostics independent of the
//! order declarations were discovered in.

use std::sync::Arc;

use rustc_hash::FxHashMap;

use crate::decl::{BaseTypeDecl, VariantDecl};
use crate::diag::{Diagnostic, DiagnosticKind};
use crate::driver::ClosedHierarchy;
use crate::label::LabelKind;
use crate::name::TypeName;

/// What an unknown label decodes to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Fallback {
	/// Unknown labels are a decoding error.
	None,
	/// Unknown labels decode to null.
	Null,
	/// Unknown labels decode to the given singleton.
	Object(TypeName),
}

/// A hierarchy that passed every check and is ready for generation.
#[derive(Clone, Debug)]
pub struct ValidatedHierarchy {
	pub base: Arc<BaseTypeDecl>,
	/// Variants in merge order.
	pub variants: Vec<Arc<VariantDecl>>,
	pub fallback: Fallback,
}

impl ValidatedHierarchy {
	pub fn name(&self) -> &TypeName {
		&self.base.name
	}

	pub fn has_singletons(&self) -> bool {
		self.variants.iter().any(|v| v.is_singleton())
	}
}

/// Checks a closed hierarchy and returns either a validated descriptor or every
/// problem found.
pub fn validate(hierarchy: ClosedHierarchy) -> Result<ValidatedHierarchy, Vec<Diagnostic>> {
	let ClosedHierarchy { base, variants } = hierarchy;

	if variants.is_empty() {
		return Err(vec![
			Diagnostic::new(DiagnosticKind::EmptyHierarchy, base.name.clone(), base.name.clone())
				.at(base.location.as_ref()),
		]);
	}

	let mut ordered: Vec<&VariantDecl> = variants.iter().map(Arc::as_ref).collect();
	ordered.sort_by(|a, b| a.name.cmp(&b.name));

	let mut diagnostics = check_labels(&base, &ordered);
	diagnostics.extend(check_generics(&base, &ordered));
	diagnostics.extend(check_fallback(&base, &ordered));
	if !diagnostics.is_empty() {
		return Err(diagnostics);
	}

	let fallback = match ordered.iter().find(|v| v.default_object) {
		Some(object) => Fallback::Object(object.name.clone()),
		None if base.default_null => Fallback::Null,
		None => Fallback::None,
	};
	Ok(ValidatedHierarchy {
		base,
		variants,
		fallback,
	})
}

fn check_labels(base: &BaseTypeDecl, variants: &[&VariantDecl]) -> Vec<Diagnostic> {
	let mut seen: FxHashMap<&str, (&TypeName, LabelKind)> = FxHashMap::default();
	let mut diagnostics = Vec::new();

	for variant in variants {
		for label in variant.label.iter() {
			let Some((owner, owner_kind)) = seen.get(label.value).copied() else {
				seen.insert(label.value, (&variant.name, label.kind));
				continue;
			};
			let kind = match label.kind {
				LabelKind::Primary => DiagnosticKind::DuplicateLabel,
				LabelKind::Alternate => DiagnosticKind::DuplicateAlternateLabel,
			};
			diagnostics.push(
				Diagnostic::new(kind, base.name.clone(), variant.name.clone())
					.detail(format!(
						"'{}' is already the {owner_kind} label of {owner}",
						label.value
					))
					.at(variant.location.as_ref()),
			);
		}
	}
	diagnostics
}

fn check_generics<'a>(
	base: &'a BaseTypeDecl,
	variants: &'a [&'a VariantDecl],
) -> impl Iterator<Item = Diagnostic> + 'a {
	variants.iter().filter(|v| v.type_parameters > 0).map(|variant| {
		Diagnostic::new(DiagnosticKind::GenericVariant, base.name.clone(), variant.name.clone())
			.detail(format!("declares {} type parameter(s)", variant.type_parameters))
			.at(variant.location.as_ref())
	})
}

fn check_fallback(base: &BaseTypeDecl, variants: &[&VariantDecl]) -> Vec<Diagnostic> {
	let objects: Vec<&VariantDecl> = variants.iter().copied().filter(|v| v.default_object).collect();
	let mut diagnostics = Vec::new();

	if base.default_null
		&& let Some(first) = objects.first()
	{
		diagnostics.push(
			Diagnostic::new(DiagnosticKind::ConflictingDefaults, base.name.clone(), first.name.clone())
				.detail(format!("{} also declares a null default", base.name))
				.at(first.location.as_ref()),
		);
	}
	if let Some((first, rest)) = objects.split_first() {
		for extra in rest {
			diagnostics.push(
				Diagnostic::new(DiagnosticKind::MultipleDefaultObjects, base.name.clone(), extra.name.clone())
					.detail(format!("{} is already the default object", first.name))
					.at(extra.location.as_ref()),
			);
		}
	}
	for object in objects.iter().filter(|v| !v.is_singleton()) {
		diagnostics.push(
			Diagnostic::new(DiagnosticKind::DefaultObjectNotSingleton, base.name.clone(), object.name.clone())
				.at(object.location.as_ref()),
		);
	}
	diagnostics
}
