//! Round-by-round processing facade.
//!
//! [`SealedProcessor`] is what a host drives. Each round it merges the
//! declarations the host discovered, validates every hierarchy that closed and
//! returns the artifacts for the ones that passed. Diagnostics accumulate for
//! the whole run and are returned from [`SealedProcessor::finish`].
//!
//! # Concurrency
//!
//! Hierarchies closed in the same round are independent. With the `parallel`
//! feature they are validated and rendered on the rayon pool. Output order is
//! the closure order either way.

use thiserror::Error;

use crate::artifact::Artifact;
use crate::decl::Decl;
use crate::diag::{Diagnostic, Diagnostics};
use crate::driver::{ClosedHierarchy, ResolutionDriver, RoundSignal};
use crate::generate::render_adapter;
use crate::options::Options;
use crate::retention::render_retention_rules;
use crate::validate::validate;

#[derive(Debug, Error)]
pub enum ProcessError {
	/// At least one diagnostic was reported during the run. Hierarchies that
	/// validated in the implicit final round still produced `trailing`.
	#[error("{} error(s) reported by moshi-sealed processing", diagnostics.len())]
	Diagnostics {
		diagnostics: Vec<Diagnostic>,
		trailing: Vec<Artifact>,
	},
}

/// Totals for a successful run.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Summary {
	pub rounds: u32,
	/// Hierarchies that validated, whether or not they emitted anything.
	pub validated: usize,
	pub artifacts: usize,
	/// Artifacts from the implicit final round, when the host never sent one.
	pub trailing: Vec<Artifact>,
}

pub struct SealedProcessor {
	driver: ResolutionDriver,
	options: Options,
	diagnostics: Diagnostics,
	validated: usize,
	artifacts: usize,
}

enum Emitted {
	Artifacts(Vec<Artifact>),
	Rejected(Vec<Diagnostic>),
}

impl SealedProcessor {
	pub fn new(options: Options) -> Self {
		Self {
			driver: ResolutionDriver::new(),
			options,
			diagnostics: Diagnostics::new(),
			validated: 0,
			artifacts: 0,
		}
	}

	pub fn options(&self) -> &Options {
		&self.options
	}

	pub fn driver(&self) -> &ResolutionDriver {
		&self.driver
	}

	pub fn diagnostics(&self) -> &Diagnostics {
		&self.diagnostics
	}

	/// Processes one discovery round and returns the artifacts of every
	/// hierarchy that closed and validated in it.
	pub fn process_round<I>(&mut self, decls: I, signal: RoundSignal) -> Vec<Artifact>
	where
		I: IntoIterator<Item = Decl>,
	{
		let outcome = self.driver.run_round(decls, signal);
		self.diagnostics.extend(outcome.diagnostics);

		let options = self.options;
		#[cfg(feature = "parallel")]
		let emitted: Vec<Emitted> = {
			use rayon::prelude::*;
			outcome.closed.into_par_iter().map(|h| emit(h, &options)).collect()
		};
		#[cfg(not(feature = "parallel"))]
		let emitted: Vec<Emitted> = outcome.closed.into_iter().map(|h| emit(h, &options)).collect();

		let mut artifacts = Vec::new();
		for result in emitted {
			match result {
				Emitted::Artifacts(files) => {
					self.validated += 1;
					artifacts.extend(files);
				}
				Emitted::Rejected(diagnostics) => self.diagnostics.extend(diagnostics),
			}
		}
		self.artifacts += artifacts.len();
		tracing::debug!(round = outcome.round, artifacts = artifacts.len(), "round processed");
		artifacts
	}

	/// Ends the run. Runs an empty final round first if the host never sent
	/// one, and fails if any diagnostic was reported. Artifacts from that
	/// round are returned either way.
	pub fn finish(mut self) -> Result<Summary, ProcessError> {
		let trailing = if self.driver.is_finished() {
			Vec::new()
		} else {
			self.process_round(std::iter::empty(), RoundSignal::Final)
		};
		if !self.diagnostics.is_empty() {
			return Err(ProcessError::Diagnostics {
				diagnostics: self.diagnostics.into_sorted(),
				trailing,
			});
		}
		Ok(Summary {
			rounds: self.driver.round(),
			validated: self.validated,
			artifacts: self.artifacts,
			trailing,
		})
	}
}

fn emit(hierarchy: ClosedHierarchy, options: &Options) -> Emitted {
	let validated = match validate(hierarchy) {
		Ok(validated) => validated,
		Err(diagnostics) => return Emitted::Rejected(diagnostics),
	};
	let base = &validated.base;
	if !base.generate_adapter {
		tracing::debug!(base = %base.name, "adapter generation disabled");
		return Emitted::Artifacts(Vec::new());
	}

	let mut files = vec![render_adapter(&validated)];
	if options.retention_enabled(base) {
		files.push(render_retention_rules(&validated));
	}
	tracing::debug!(base = %base.name, files = files.len(), "hierarchy generated");
	Emitted::Artifacts(files)
}
