//! Declarations observed by the host during discovery.
//!
//! Declarations are immutable once discovered. A variant refers to its base
//! type by identity only, so the two may come from different compilation units
//! and arrive in any order.

use serde::{Deserialize, Serialize};

use crate::label::TypeLabel;
use crate::name::{Location, TypeName};

/// Discriminant field used when a base type does not configure one.
pub const DEFAULT_LABEL_KEY: &str = "type";

/// How the runtime obtains an instance of a variant.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VariantShape {
	/// Decoded by the regular reflective or generated adapter.
	#[default]
	Constructible,
	/// A single shared instance; decoding returns it and ignores the body.
	Singleton,
}

/// The closed base type of a hierarchy.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BaseTypeDecl {
	pub name: TypeName,
	/// Name of the JSON field holding the discriminant.
	pub label_key: String,
	pub generate_adapter: bool,
	/// Per-declaration override of the process-wide retention default.
	pub generate_proguard_rules: Option<bool>,
	/// Unknown labels decode to null.
	pub default_null: bool,
	/// Variants the base type is known to enumerate. Each must become visible
	/// before the hierarchy can close.
	pub permits: Vec<TypeName>,
	pub location: Option<Location>,
}

impl BaseTypeDecl {
	pub fn new(name: TypeName) -> Self {
		Self {
			name,
			label_key: DEFAULT_LABEL_KEY.to_string(),
			generate_adapter: true,
			generate_proguard_rules: None,
			default_null: false,
			permits: Vec::new(),
			location: None,
		}
	}

	pub fn label_key(mut self, key: impl Into<String>) -> Self {
		self.label_key = key.into();
		self
	}

	pub fn generate_adapter(mut self, on: bool) -> Self {
		self.generate_adapter = on;
		self
	}

	pub fn generate_proguard_rules(mut self, on: bool) -> Self {
		self.generate_proguard_rules = Some(on);
		self
	}

	pub fn default_null(mut self, on: bool) -> Self {
		self.default_null = on;
		self
	}

	pub fn permits<I: IntoIterator<Item = TypeName>>(mut self, variants: I) -> Self {
		self.permits.extend(variants);
		self
	}

	pub fn located(mut self, location: Location) -> Self {
		self.location = Some(location);
		self
	}
}

/// One labeled member of a hierarchy.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VariantDecl {
	pub name: TypeName,
	/// Identity of the base type this variant belongs to.
	pub supertype: TypeName,
	pub label: TypeLabel,
	pub shape: VariantShape,
	pub type_parameters: usize,
	/// Singleton returned when decoding an unknown label.
	pub default_object: bool,
	pub location: Option<Location>,
}

impl VariantDecl {
	pub fn new(name: TypeName, supertype: TypeName, label: TypeLabel) -> Self {
		Self {
			name,
			supertype,
			label,
			shape: VariantShape::Constructible,
			type_parameters: 0,
			default_object: false,
			location: None,
		}
	}

	pub fn shape(mut self, shape: VariantShape) -> Self {
		self.shape = shape;
		self
	}

	pub fn type_parameters(mut self, count: usize) -> Self {
		self.type_parameters = count;
		self
	}

	pub fn default_object(mut self, on: bool) -> Self {
		self.default_object = on;
		self
	}

	pub fn located(mut self, location: Location) -> Self {
		self.location = Some(location);
		self
	}

	pub fn is_singleton(&self) -> bool {
		self.shape == VariantShape::Singleton
	}
}

/// Anything the host reports in a discovery round.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Decl {
	Base(BaseTypeDecl),
	Variant(VariantDecl),
}

impl Decl {
	pub fn name(&self) -> &TypeName {
		match self {
			Self::Base(base) => &base.name,
			Self::Variant(variant) => &variant.name,
		}
	}

	/// Identity of the hierarchy this declaration contributes to.
	pub fn hierarchy(&self) -> &TypeName {
		match self {
			Self::Base(base) => &base.name,
			Self::Variant(variant) => &variant.supertype,
		}
	}

	pub fn location(&self) -> Option<&Location> {
		match self {
			Self::Base(base) => base.location.as_ref(),
			Self::Variant(variant) => variant.location.as_ref(),
		}
	}
}

impl From<BaseTypeDecl> for Decl {
	fn from(base: BaseTypeDecl) -> Self {
		Self::Base(base)
	}
}

impl From<VariantDecl> for Decl {
	fn from(variant: VariantDecl) -> Self {
		Self::Variant(variant)
	}
}
