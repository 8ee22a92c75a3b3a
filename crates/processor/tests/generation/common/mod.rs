//! Declaration builders and a single-round driver for generation tests.

use std::path::Path;

use sealgen_processor::{
	Artifact, ArtifactKind, BaseTypeDecl, Decl, Diagnostic, Options, ProcessError, RoundSignal,
	SealedProcessor, TypeLabel, TypeName, VariantDecl, VariantShape,
};

pub fn base_name() -> TypeName {
	TypeName::new("test", "BaseType")
}

pub fn base() -> Decl {
	BaseTypeDecl::new(base_name()).into()
}

pub fn class(simple: &str, primary: &str, alternates: &[&str]) -> VariantDecl {
	VariantDecl::new(
		base_name().nested(simple),
		base_name(),
		TypeLabel::new(primary).with_alternates(alternates.iter().copied()),
	)
}

pub fn object(simple: &str, primary: &str) -> VariantDecl {
	class(simple, primary, &[]).shape(VariantShape::Singleton)
}

/// Result of a run: every artifact written plus the final verdict.
pub struct Run {
	pub artifacts: Vec<Artifact>,
	pub result: Result<(), Vec<Diagnostic>>,
}

impl Run {
	pub fn file(&self, path: &str) -> Option<&str> {
		self.artifacts
			.iter()
			.find(|a| a.path == Path::new(path))
			.map(|a| a.contents.as_str())
	}

	pub fn count(&self, kind: ArtifactKind) -> usize {
		self.artifacts.iter().filter(|a| a.kind == kind).count()
	}

	pub fn diagnostics(&self) -> &[Diagnostic] {
		match &self.result {
			Ok(()) => &[],
			Err(diagnostics) => diagnostics,
		}
	}

	pub fn messages(&self) -> Vec<String> {
		self.diagnostics().iter().map(|d| d.message().to_string()).collect()
	}
}

/// Feeds each inner vector as one round, then finishes the run.
pub fn run_rounds(options: Options, rounds: Vec<Vec<Decl>>) -> Run {
	let mut processor = SealedProcessor::new(options);
	let mut artifacts = Vec::new();
	let last = rounds.len().saturating_sub(1);
	for (i, round) in rounds.into_iter().enumerate() {
		let signal = if i == last { RoundSignal::Final } else { RoundSignal::Continue };
		artifacts.extend(processor.process_round(round, signal));
	}
	let result = match processor.finish() {
		Ok(summary) => {
			artifacts.extend(summary.trailing);
			Ok(())
		}
		Err(ProcessError::Diagnostics { diagnostics, trailing }) => {
			artifacts.extend(trailing);
			Err(diagnostics)
		}
	};
	Run { artifacts, result }
}

/// Everything in one final round.
pub fn run(decls: Vec<Decl>) -> Run {
	run_rounds(Options::default(), vec![decls])
}
