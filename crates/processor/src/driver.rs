//! Multi-round resolution of hierarchies.
//!
//! The host makes declarations visible in rounds. A hierarchy closes at the end
//! of a round that added nothing to it, provided its base type is known and
//! every variant the base type permits has been seen. The final round closes
//! everything that can close; the rest is reported as unresolved.

use std::sync::Arc;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::decl::{BaseTypeDecl, Decl, VariantDecl};
use crate::diag::{Diagnostic, DiagnosticKind};
use crate::index::{HierarchyEntry, HierarchyIndex, Merge};
use crate::name::TypeName;

/// Host signal attached to each round.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RoundSignal {
	/// More rounds may follow.
	Continue,
	/// No further rounds will occur.
	Final,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ClosureState {
	Pending,
	Closed,
}

/// A hierarchy whose variant set is final.
#[derive(Clone, Debug)]
pub struct ClosedHierarchy {
	pub base: Arc<BaseTypeDecl>,
	/// Variants in merge order.
	pub variants: Vec<Arc<VariantDecl>>,
}

impl ClosedHierarchy {
	pub fn name(&self) -> &TypeName {
		&self.base.name
	}
}

/// What a single round produced.
#[derive(Debug, Default)]
pub struct RoundOutcome {
	pub round: u32,
	pub closed: Vec<ClosedHierarchy>,
	pub diagnostics: Vec<Diagnostic>,
}

/// Drives the index through discovery rounds and tracks closure.
#[derive(Default)]
pub struct ResolutionDriver {
	index: HierarchyIndex,
	states: FxHashMap<TypeName, ClosureState>,
	round: u32,
	finished: bool,
}

impl ResolutionDriver {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn index(&self) -> &HierarchyIndex {
		&self.index
	}

	/// Number of rounds processed so far.
	pub fn round(&self) -> u32 {
		self.round
	}

	/// Whether the final round has been processed.
	pub fn is_finished(&self) -> bool {
		self.finished
	}

	pub fn state(&self, base: &TypeName) -> Option<ClosureState> {
		self.states.get(base).copied()
	}

	/// Merges one round of declarations and re-evaluates closure.
	pub fn run_round<I>(&mut self, decls: I, signal: RoundSignal) -> RoundOutcome
	where
		I: IntoIterator<Item = Decl>,
	{
		if self.finished {
			tracing::warn!(round = self.round, "round received after the final round; ignoring");
			return RoundOutcome {
				round: self.round,
				..RoundOutcome::default()
			};
		}
		self.round += 1;
		let mut outcome = RoundOutcome {
			round: self.round,
			..RoundOutcome::default()
		};

		let mut touched: FxHashSet<TypeName> = FxHashSet::default();
		for decl in decls {
			let hierarchy = decl.hierarchy().clone();
			if self.state(&hierarchy) == Some(ClosureState::Closed) {
				if let Some(diagnostic) = self.late_declaration(&decl) {
					outcome.diagnostics.push(diagnostic);
				}
				continue;
			}
			self.states.entry(hierarchy.clone()).or_insert(ClosureState::Pending);
			if self.index.register(decl) == Merge::Inserted {
				touched.insert(hierarchy);
			}
		}

		let is_final = signal == RoundSignal::Final;
		for entry in self.index.snapshot() {
			if self.state(&entry.name) != Some(ClosureState::Pending) {
				continue;
			}
			let ready = entry.base.is_some() && missing_permits(&entry).is_empty();
			if ready && (is_final || !touched.contains(&entry.name)) {
				self.states.insert(entry.name.clone(), ClosureState::Closed);
				let Some(base) = entry.base else { continue };
				tracing::debug!(round = self.round, base = %base.name, variants = entry.variants.len(), "hierarchy closed");
				outcome.closed.push(ClosedHierarchy {
					base,
					variants: entry.variants,
				});
			} else if is_final {
				outcome.diagnostics.push(unresolved(&entry));
			}
		}

		if is_final {
			self.finished = true;
		}
		tracing::debug!(
			round = self.round,
			merged = touched.len(),
			closed = outcome.closed.len(),
			is_final,
			"round complete"
		);
		outcome
	}

	fn late_declaration(&self, decl: &Decl) -> Option<Diagnostic> {
		let Decl::Variant(variant) = decl else {
			return None;
		};
		let known = self
			.index
			.get(&variant.supertype)
			.is_some_and(|entry| entry.contains_variant(&variant.name));
		if known {
			return None;
		}
		Some(
			Diagnostic::new(DiagnosticKind::LateVariant, variant.supertype.clone(), variant.name.clone())
				.detail(format!("{} was already closed in an earlier round", variant.supertype))
				.at(variant.location.as_ref()),
		)
	}
}

fn missing_permits(entry: &HierarchyEntry) -> Vec<&TypeName> {
	let Some(base) = &entry.base else {
		return Vec::new();
	};
	base.permits.iter().filter(|name| !entry.contains_variant(name)).collect()
}

fn unresolved(entry: &HierarchyEntry) -> Diagnostic {
	match &entry.base {
		Some(base) => {
			let missing: Vec<String> = missing_permits(entry).iter().map(|n| n.to_string()).collect();
			Diagnostic::new(DiagnosticKind::UnresolvedHierarchy, base.name.clone(), base.name.clone())
				.detail(format!("subtypes never became visible: {}", missing.join(", ")))
				.at(base.location.as_ref())
		}
		None => {
			let first = entry.variants.first();
			let subject = first.map_or_else(|| entry.name.clone(), |v| v.name.clone());
			Diagnostic::new(DiagnosticKind::UnresolvedHierarchy, entry.name.clone(), subject)
				.detail(format!("no sealed base type {} was declared", entry.name))
				.at(first.and_then(|v| v.location.as_ref()))
		}
	}
}
