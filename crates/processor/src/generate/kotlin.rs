//! Kotlin lexical helpers and import resolution.

use std::collections::BTreeSet;

use rustc_hash::{FxHashMap, FxHashSet};

use crate::name::TypeName;

/// Hard keywords, which cannot appear unescaped as identifiers.
const KEYWORDS: &[&str] = &[
	"as", "break", "class", "continue", "do", "else", "false", "for", "fun", "if", "in",
	"interface", "is", "null", "object", "package", "return", "super", "this", "throw", "true",
	"try", "typealias", "typeof", "val", "var", "when", "while",
];

pub(crate) fn escape_identifier(name: &str) -> String {
	if KEYWORDS.contains(&name) {
		format!("`{name}`")
	} else {
		name.to_string()
	}
}

pub(crate) fn escape_package(package: &str) -> String {
	package.split('.').map(escape_identifier).collect::<Vec<_>>().join(".")
}

fn escape_segments(segments: &[String]) -> String {
	segments.iter().map(|s| escape_identifier(s)).collect::<Vec<_>>().join(".")
}

fn qualified(package: &str, segments: &[String]) -> String {
	if package.is_empty() {
		escape_segments(segments)
	} else {
		format!("{}.{}", escape_package(package), escape_segments(segments))
	}
}

/// Renders a string literal, including the surrounding quotes.
pub(crate) fn string_literal(value: &str) -> String {
	let mut out = String::with_capacity(value.len() + 2);
	out.push('"');
	for c in value.chars() {
		match c {
			'\\' => out.push_str("\\\\"),
			'"' => out.push_str("\\\""),
			'$' => out.push_str("${'$'}"),
			'\n' => out.push_str("\\n"),
			'\r' => out.push_str("\\r"),
			'\t' => out.push_str("\\t"),
			'\u{8}' => out.push_str("\\b"),
			c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
			c => out.push(c),
		}
	}
	out.push('"');
	out
}

/// Decides how each referenced type is spelled in one generated file.
///
/// Types in the file's package are written by their nested name. Types from
/// other packages are imported by their top-level class when its simple name
/// is unambiguous in the file, and written fully qualified otherwise.
pub(crate) struct TypeRefs {
	imports: BTreeSet<String>,
	qualify: FxHashSet<TypeName>,
}

impl TypeRefs {
	/// `fixed_imports` are fully qualified names imported regardless of the
	/// referenced types; their simple names are reserved.
	pub(crate) fn new<'a>(
		package: &str,
		fixed_imports: &[&str],
		local_names: &[&str],
		types: impl IntoIterator<Item = &'a TypeName>,
	) -> Self {
		let fixed: FxHashSet<&str> = fixed_imports.iter().map(|import| simple_name_of(import)).collect();
		let tops: BTreeSet<TypeName> = types.into_iter().map(TypeName::top_level).collect();

		let mut reserved: FxHashSet<&str> = fixed.clone();
		reserved.extend(local_names.iter().copied());
		reserved.extend(tops.iter().filter(|t| t.package() == package).map(TypeName::simple_name));

		let mut foreign_by_simple: FxHashMap<&str, usize> = FxHashMap::default();
		for top in tops.iter().filter(|t| t.package() != package) {
			*foreign_by_simple.entry(top.simple_name()).or_default() += 1;
		}

		let mut imports: BTreeSet<String> = fixed_imports.iter().map(|s| s.to_string()).collect();
		let mut qualify = FxHashSet::default();
		for top in &tops {
			let simple = top.simple_name();
			let ambiguous = if top.package() == package {
				fixed.contains(simple)
			} else {
				reserved.contains(simple) || foreign_by_simple.get(simple).is_some_and(|&n| n > 1)
			};
			if ambiguous {
				qualify.insert(top.clone());
			} else if top.package() != package && !top.package().is_empty() {
				imports.insert(qualified(top.package(), top.simple_names()));
			}
		}

		Self { imports, qualify }
	}

	/// Sorted import lines, without the `import` keyword.
	pub(crate) fn imports(&self) -> impl Iterator<Item = &str> + '_ {
		self.imports.iter().map(String::as_str)
	}

	/// How `name` is written inside the file.
	pub(crate) fn spell(&self, name: &TypeName) -> String {
		if self.qualify.contains(&name.top_level()) {
			qualified(name.package(), name.simple_names())
		} else {
			escape_segments(name.simple_names())
		}
	}
}

fn simple_name_of(import: &str) -> &str {
	import.rsplit('.').next().unwrap_or(import).trim_matches('`')
}
