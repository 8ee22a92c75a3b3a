//! Aggregation of declarations into hierarchies.
//!
//! # Invariants
//!
//! - Variants are kept in merge order. Generated output follows that order.
//! - A declaration identity is merged at most once; re-registration is a no-op.
//! - A variant may be merged before its base type; the entry then has no base
//!   until the base is registered.
//!
//! # Concurrency
//!
//! Writers are serialized by an internal mutex, so `register` may be called
//! from several threads during a round. Snapshots are meant to be taken at
//! round boundaries once every registration for the round has completed.

use std::sync::Arc;

use indexmap::IndexMap;
use parking_lot::Mutex;
use rustc_hash::{FxBuildHasher, FxHashSet};

use crate::decl::{BaseTypeDecl, Decl, VariantDecl};
use crate::name::TypeName;

/// Everything merged so far for one base type identity.
#[derive(Clone, Debug)]
pub struct HierarchyEntry {
	pub name: TypeName,
	pub base: Option<Arc<BaseTypeDecl>>,
	pub variants: Vec<Arc<VariantDecl>>,
}

impl HierarchyEntry {
	fn new(name: TypeName) -> Self {
		Self {
			name,
			base: None,
			variants: Vec::new(),
		}
	}

	/// Whether a variant with this identity has been merged.
	pub fn contains_variant(&self, name: &TypeName) -> bool {
		self.variants.iter().any(|v| &v.name == name)
	}
}

/// Result of a single registration.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Merge {
	/// The declaration was new and is now part of its hierarchy.
	Inserted,
	/// A declaration with the same identity was already merged.
	AlreadyKnown,
}

#[derive(Default)]
struct IndexState {
	entries: IndexMap<TypeName, HierarchyEntry, FxBuildHasher>,
	variants: FxHashSet<TypeName>,
}

/// Mapping from base type identity to its declarations.
#[derive(Default)]
pub struct HierarchyIndex {
	state: Mutex<IndexState>,
}

impl HierarchyIndex {
	pub fn new() -> Self {
		Self::default()
	}

	/// Merges a declaration into the hierarchy it belongs to.
	pub fn register(&self, decl: Decl) -> Merge {
		let mut state = self.state.lock();
		let key = decl.hierarchy().clone();

		match decl {
			Decl::Base(base) => {
				let entry = state
					.entries
					.entry(key.clone())
					.or_insert_with(|| HierarchyEntry::new(key));
				if entry.base.is_some() {
					return Merge::AlreadyKnown;
				}
				tracing::trace!(base = %base.name, "merged base type");
				entry.base = Some(Arc::new(base));
			}
			Decl::Variant(variant) => {
				if !state.variants.insert(variant.name.clone()) {
					return Merge::AlreadyKnown;
				}
				tracing::trace!(variant = %variant.name, base = %key, "merged variant");
				state
					.entries
					.entry(key.clone())
					.or_insert_with(|| HierarchyEntry::new(key))
					.variants
					.push(Arc::new(variant));
			}
		}
		Merge::Inserted
	}

	/// Current state of every known hierarchy, in first-seen order.
	pub fn snapshot(&self) -> Vec<HierarchyEntry> {
		self.state.lock().entries.values().cloned().collect()
	}

	/// Current state of a single hierarchy.
	pub fn get(&self, base: &TypeName) -> Option<HierarchyEntry> {
		self.state.lock().entries.get(base).cloned()
	}

	/// Number of distinct base identities referenced so far.
	pub fn len(&self) -> usize {
		self.state.lock().entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}
}
