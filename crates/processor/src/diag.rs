//! Diagnostics collected during a processing run.
//!
//! Each [`DiagnosticKind`] has one fixed message. Build tooling matches on
//! those strings, so they must not change. Context such as the offending label
//! goes in [`Diagnostic::detail`].

use std::fmt;

use crate::name::{Location, TypeName};

/// Classification of a processing failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum DiagnosticKind {
	/// A primary label collides with another label in the hierarchy.
	DuplicateLabel,
	/// An alternate label collides with another label in the hierarchy.
	DuplicateAlternateLabel,
	/// A variant declares type parameters.
	GenericVariant,
	/// A base type never reached closure before the final round.
	UnresolvedHierarchy,
	/// A closed hierarchy has no variants.
	EmptyHierarchy,
	/// A variant arrived after its hierarchy was closed and emitted.
	LateVariant,
	/// Both a null default and an object default were declared.
	ConflictingDefaults,
	/// More than one variant is marked as the default object.
	MultipleDefaultObjects,
	/// A default object is not a singleton.
	DefaultObjectNotSingleton,
}

impl DiagnosticKind {
	pub fn message(self) -> &'static str {
		match self {
			Self::DuplicateLabel => "Duplicate label",
			Self::DuplicateAlternateLabel => "Duplicate alternate label",
			Self::GenericVariant => "Moshi-sealed subtypes cannot be generic.",
			Self::UnresolvedHierarchy => "Moshi-sealed hierarchy could not be resolved.",
			Self::EmptyHierarchy => "Moshi-sealed base types must have at least one labeled subtype.",
			Self::LateVariant => "Moshi-sealed subtype was discovered after its hierarchy was closed.",
			Self::ConflictingDefaults => "Only one of @DefaultNull or @DefaultObject can be used.",
			Self::MultipleDefaultObjects => "Only one @DefaultObject can be present.",
			Self::DefaultObjectNotSingleton => "@DefaultObject can only be applied to objects.",
		}
	}
}

impl fmt::Display for DiagnosticKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.message())
	}
}

/// A single reported problem.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Diagnostic {
	pub kind: DiagnosticKind,
	/// Base type identity of the hierarchy the problem belongs to.
	pub hierarchy: TypeName,
	/// The declaration the problem is reported against.
	pub subject: TypeName,
	pub detail: Option<String>,
	pub location: Option<Location>,
}

impl Diagnostic {
	pub fn new(kind: DiagnosticKind, hierarchy: TypeName, subject: TypeName) -> Self {
		Self {
			kind,
			hierarchy,
			subject,
			detail: None,
			location: None,
		}
	}

	pub fn detail(mut self, detail: impl Into<String>) -> Self {
		self.detail = Some(detail.into());
		self
	}

	pub fn at(mut self, location: Option<&Location>) -> Self {
		self.location = location.cloned();
		self
	}

	pub fn message(&self) -> &'static str {
		self.kind.message()
	}
}

impl fmt::Display for Diagnostic {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		if let Some(location) = &self.location {
			write!(f, "{location}: ")?;
		}
		write!(f, "error: {}", self.kind)?;
		match &self.detail {
			Some(detail) => write!(f, " ({}: {detail})", self.subject),
			None => write!(f, " ({})", self.subject),
		}
	}
}

impl std::error::Error for Diagnostic {}

/// Run-wide collection of diagnostics.
#[derive(Debug, Default, Clone)]
pub struct Diagnostics {
	entries: Vec<Diagnostic>,
}

impl Diagnostics {
	pub fn new() -> Self {
		Self::default()
	}

	/// Records a diagnostic and logs it.
	pub fn report(&mut self, diagnostic: Diagnostic) {
		tracing::error!(
			kind = ?diagnostic.kind,
			hierarchy = %diagnostic.hierarchy,
			subject = %diagnostic.subject,
			"{}",
			diagnostic.kind
		);
		self.entries.push(diagnostic);
	}

	pub fn extend<I: IntoIterator<Item = Diagnostic>>(&mut self, diagnostics: I) {
		for diagnostic in diagnostics {
			self.report(diagnostic);
		}
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> + '_ {
		self.entries.iter()
	}

	/// Whether any diagnostic was reported against the given hierarchy.
	pub fn affects(&self, hierarchy: &TypeName) -> bool {
		self.entries.iter().any(|d| &d.hierarchy == hierarchy)
	}

	/// Diagnostics in a stable order that does not depend on discovery order.
	pub fn into_sorted(mut self) -> Vec<Diagnostic> {
		self.entries.sort_by(|a, b| {
			a.hierarchy
				.cmp(&b.hierarchy)
				.then_with(|| a.subject.cmp(&b.subject))
				.then_with(|| a.kind.cmp(&b.kind))
				.then_with(|| a.detail.cmp(&b.detail))
		});
		self.entries
	}
}
