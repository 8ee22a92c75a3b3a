//! Build-time generation of polymorphic Moshi adapters for sealed hierarchies.
//!
//! A host reports base and variant declarations in discovery rounds. The
//! processor aggregates them per base type, waits until a hierarchy can no
//! longer grow, validates its label space and emits a Kotlin adapter plus
//! shrinker retention rules for it.
//!
//! # Modules
//!
//! - [`name`], [`label`], [`decl`] - declaration model
//! - [`index`] - aggregation of declarations by base identity
//! - [`driver`] - discovery rounds and hierarchy closure
//! - [`validate`] - label uniqueness, variant shape and fallback checks
//! - [`generate`] - adapter source
//! - [`retention`] - shrinker rules
//! - [`diag`] - diagnostics
//! - [`processor`] - the facade hosts drive
//! - [`options`], [`cache`] - process options and the incremental cache
//!
//! # Example
//!
//! ```
//! use sealgen_processor::{
//! 	BaseTypeDecl, Decl, Options, RoundSignal, SealedProcessor, TypeLabel, TypeName, VariantDecl,
//! };
//!
//! let base = TypeName::new("test", "BaseType");
//! let mut processor = SealedProcessor::new(Options::default());
//! let artifacts = processor.process_round(
//! 	[
//! 		Decl::from(BaseTypeDecl::new(base.clone())),
//! 		Decl::from(VariantDecl::new(base.nested("TypeA"), base.clone(), TypeLabel::new("a"))),
//! 	],
//! 	RoundSignal::Final,
//! );
//! assert_eq!(artifacts.len(), 2);
//! assert!(processor.finish().is_ok());
//! ```

pub mod artifact;
pub mod cache;
pub mod decl;
pub mod diag;
pub mod driver;
pub mod generate;
pub mod index;
pub mod label;
pub mod name;
pub mod options;
pub mod processor;
pub mod retention;
pub mod validate;

#[cfg(test)]
mod test_fixtures;

pub use artifact::{Artifact, ArtifactKind};
pub use cache::{ArtifactCache, CacheEntry, CacheError};
pub use decl::{BaseTypeDecl, DEFAULT_LABEL_KEY, Decl, VariantDecl, VariantShape};
pub use diag::{Diagnostic, DiagnosticKind, Diagnostics};
pub use driver::{ClosedHierarchy, ClosureState, ResolutionDriver, RoundOutcome, RoundSignal};
pub use generate::{adapter_class_name, render_adapter};
pub use index::{HierarchyEntry, HierarchyIndex, Merge};
pub use label::{LabelKind, TypeLabel};
pub use name::{Location, TypeName};
pub use options::{OPTION_GENERATE_PROGUARD_RULES, Options, OptionsError};
pub use processor::{ProcessError, SealedProcessor, Summary};
pub use retention::render_retention_rules;
pub use validate::{Fallback, ValidatedHierarchy, validate};
