//! Discriminant labels attached to a variant declaration.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Whether a label is produced on encode or only accepted on decode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LabelKind {
	/// Canonical value; written on encode and accepted on decode.
	Primary,
	/// Accepted on decode only.
	Alternate,
}

impl fmt::Display for LabelKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Primary => write!(f, "primary"),
			Self::Alternate => write!(f, "alternate"),
		}
	}
}

/// One label string borrowed from its owning [`TypeLabel`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Label<'a> {
	pub value: &'a str,
	pub kind: LabelKind,
}

/// The primary label of a variant and its ordered alternates.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TypeLabel {
	primary: String,
	alternates: Vec<String>,
}

impl TypeLabel {
	pub fn new(primary: impl Into<String>) -> Self {
		Self {
			primary: primary.into(),
			alternates: Vec::new(),
		}
	}

	/// Appends alternate labels, keeping their declaration order.
	pub fn with_alternates<I, S>(mut self, alternates: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		self.alternates.extend(alternates.into_iter().map(Into::into));
		self
	}

	pub fn primary(&self) -> &str {
		&self.primary
	}

	pub fn alternates(&self) -> &[String] {
		&self.alternates
	}

	/// Primary first, then alternates in declaration order.
	pub fn iter(&self) -> impl Iterator<Item = Label<'_>> + '_ {
		std::iter::once(Label {
			value: self.primary.as_str(),
			kind: LabelKind::Primary,
		})
		.chain(self.alternates.iter().map(|value| Label {
			value: value.as_str(),
			kind: LabelKind::Alternate,
		}))
	}

	/// Total number of label strings.
	pub fn count(&self) -> usize {
		1 + self.alternates.len()
	}
}
