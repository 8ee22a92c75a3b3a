//! Declaration builders shared by unit tests.

use crate::decl::{BaseTypeDecl, Decl, VariantDecl, VariantShape};
use crate::label::TypeLabel;
use crate::name::TypeName;

pub(crate) fn base_name() -> TypeName {
	TypeName::new("test", "BaseType")
}

pub(crate) fn base() -> BaseTypeDecl {
	BaseTypeDecl::new(base_name())
}

/// A variant nested in `test.BaseType`.
pub(crate) fn variant(simple: &str, primary: &str, alternates: &[&str]) -> VariantDecl {
	VariantDecl::new(
		base_name().nested(simple),
		base_name(),
		TypeLabel::new(primary).with_alternates(alternates.iter().copied()),
	)
}

pub(crate) fn object(simple: &str, primary: &str) -> VariantDecl {
	variant(simple, primary, &[]).shape(VariantShape::Singleton)
}

pub(crate) fn decls<I: IntoIterator<Item = D>, D: Into<Decl>>(items: I) -> Vec<Decl> {
	items.into_iter().map(Into::into).collect()
}
