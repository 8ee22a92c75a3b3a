//! Structured type names and source locations.
//!
//! A [`TypeName`] keeps the package separate from the chain of nested simple
//! names, so `test.BaseType.TypeA` is unambiguous about where the package ends.
//! That split decides what the generated source imports and how shrinker rules
//! spell nested classes.

use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Fully qualified identity of a declaration.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TypeName {
	package: String,
	simple_names: Vec<String>,
}

impl TypeName {
	/// Creates a top-level type name.
	pub fn new(package: impl Into<String>, simple_name: impl Into<String>) -> Self {
		Self {
			package: package.into(),
			simple_names: vec![simple_name.into()],
		}
	}

	/// Creates a name from a package and a dotted chain of simple names (`Outer.Inner`).
	///
	/// Returns `None` if the chain is empty or contains an empty segment.
	pub fn nested_path(package: impl Into<String>, names: &str) -> Option<Self> {
		let simple_names: Vec<String> = names.split('.').map(String::from).collect();
		if simple_names.iter().any(|s| s.is_empty()) {
			return None;
		}
		Some(Self {
			package: package.into(),
			simple_names,
		})
	}

	/// Returns a name nested inside this one.
	pub fn nested(&self, simple_name: impl Into<String>) -> Self {
		let mut simple_names = self.simple_names.clone();
		simple_names.push(simple_name.into());
		Self {
			package: self.package.clone(),
			simple_names,
		}
	}

	pub fn package(&self) -> &str {
		&self.package
	}

	pub fn simple_names(&self) -> &[String] {
		&self.simple_names
	}

	/// Innermost simple name.
	pub fn simple_name(&self) -> &str {
		self.simple_names.last().map(String::as_str).unwrap_or_default()
	}

	/// The outermost enclosing class, which is what an import statement names.
	pub fn top_level(&self) -> TypeName {
		Self {
			package: self.package.clone(),
			simple_names: self.simple_names.iter().take(1).cloned().collect(),
		}
	}

	pub fn is_top_level(&self) -> bool {
		self.simple_names.len() == 1
	}

	/// `Outer.Inner`, without the package.
	pub fn relative_name(&self) -> String {
		self.simple_names.join(".")
	}

	/// `pkg.Outer.Inner`.
	pub fn canonical_name(&self) -> String {
		if self.package.is_empty() {
			self.relative_name()
		} else {
			format!("{}.{}", self.package, self.relative_name())
		}
	}

	/// `pkg.Outer$Inner`, the binary name seen by bytecode tooling.
	pub fn reflection_name(&self) -> String {
		let nested = self.simple_names.join("$");
		if self.package.is_empty() {
			nested
		} else {
			format!("{}.{nested}", self.package)
		}
	}
}

impl fmt::Display for TypeName {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(&self.canonical_name())
	}
}

/// Where a declaration was written.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
	pub file: PathBuf,
	pub line: u32,
	pub column: u32,
}

impl Location {
	pub fn new(file: impl Into<PathBuf>, line: u32, column: u32) -> Self {
		Self {
			file: file.into(),
			line,
			column,
		}
	}
}

impl fmt::Display for Location {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}:{}:{}", self.file.display(), self.line, self.column)
	}
}
