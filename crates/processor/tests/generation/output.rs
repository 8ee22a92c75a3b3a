use pretty_assertions::assert_eq;
use sealgen_processor::{ArtifactKind, BaseTypeDecl, Decl, Options, TypeLabel, TypeName, VariantDecl};

use crate::common::{base, base_name, class, object, run, run_rounds};

const ADAPTER_PATH: &str = "kotlin/test/BaseTypeJsonAdapter.kt";
const RULES_PATH: &str = "resources/META-INF/proguard/moshi-sealed-test.BaseType.pro";

#[test]
fn smoke() {
	let run = run(vec![
		base(),
		class("TypeA", "a", &["aa"]).into(),
		class("TypeB", "b", &[]).into(),
	]);
	assert_eq!(run.result, Ok(()));

	assert_eq!(
		run.file(ADAPTER_PATH),
		Some(
			r#"// Code generated by moshi-sealed. Do not edit.
package test

import com.squareup.moshi.JsonAdapter
import com.squareup.moshi.JsonReader
import com.squareup.moshi.JsonWriter
import com.squareup.moshi.Moshi
import com.squareup.moshi.adapters.PolymorphicJsonAdapterFactory
import kotlin.Suppress
import kotlin.Unit
import kotlin.collections.emptySet

@Suppress("DEPRECATION", "unused", "ClassName", "REDUNDANT_PROJECTION", "RedundantExplicitType",
    "LocalVariableName", "RedundantVisibilityModifier")
public class BaseTypeJsonAdapter(
  moshi: Moshi,
) : JsonAdapter<BaseType>() {
  @Suppress("UNCHECKED_CAST")
  private val runtimeAdapter: JsonAdapter<BaseType> =
      PolymorphicJsonAdapterFactory.of(BaseType::class.java, "type")
        .withSubtype(BaseType.TypeA::class.java, "a")
        .withSubtype(BaseType.TypeA::class.java, "aa")
        .withSubtype(BaseType.TypeB::class.java, "b")
        .create(BaseType::class.java, emptySet(), moshi) as JsonAdapter<BaseType>


  public override fun fromJson(reader: JsonReader): BaseType? = runtimeAdapter.fromJson(reader)

  public override fun toJson(writer: JsonWriter, value_: BaseType?): Unit {
    runtimeAdapter.toJson(writer, value_)
  }
}
"#
		)
	);

	assert_eq!(run.count(ArtifactKind::RetentionRules), 1);
	assert_eq!(
		run.file(RULES_PATH),
		Some(
			"-if class test.BaseType
-keepnames class test.BaseType
-if class test.BaseType
-keep class test.BaseTypeJsonAdapter {
    public <init>(com.squareup.moshi.Moshi);
}
"
		)
	);
}

#[test]
fn disabled_retention_leaves_adapter_unchanged() {
	let decls = || {
		vec![
			base(),
			class("TypeA", "a", &["aa"]).into(),
			class("TypeB", "b", &[]).into(),
		]
	};
	let enabled = run(decls());
	let disabled = run_rounds(
		Options::from_args([("moshi.generateProguardRules", "false")]).unwrap(),
		vec![decls()],
	);

	assert_eq!(disabled.result, Ok(()));
	assert_eq!(disabled.count(ArtifactKind::RetentionRules), 0);
	assert_eq!(disabled.count(ArtifactKind::Adapter), 1);
	assert_eq!(disabled.file(ADAPTER_PATH), enabled.file(ADAPTER_PATH));
}

#[test]
fn object_adapters() {
	let run = run(vec![base(), object("TypeA", "a").into(), object("TypeB", "b").into()]);
	assert_eq!(run.result, Ok(()));

	assert_eq!(
		run.file(ADAPTER_PATH),
		Some(
			r#"// Code generated by moshi-sealed. Do not edit.
package test

import com.squareup.moshi.JsonAdapter
import com.squareup.moshi.JsonReader
import com.squareup.moshi.JsonWriter
import com.squareup.moshi.Moshi
import com.squareup.moshi.adapters.PolymorphicJsonAdapterFactory
import com.squareup.moshi.addAdapter
import dev.zacsweers.moshix.`sealed`.runtime.`internal`.ObjectJsonAdapter
import kotlin.ExperimentalStdlibApi
import kotlin.OptIn
import kotlin.Suppress
import kotlin.Unit
import kotlin.collections.emptySet

@Suppress("DEPRECATION", "unused", "ClassName", "REDUNDANT_PROJECTION", "RedundantExplicitType",
    "LocalVariableName", "RedundantVisibilityModifier")
public class BaseTypeJsonAdapter(
  moshi: Moshi,
) : JsonAdapter<BaseType>() {
  @Suppress("UNCHECKED_CAST")
  @OptIn(ExperimentalStdlibApi::class)
  private val runtimeAdapter: JsonAdapter<BaseType> =
      PolymorphicJsonAdapterFactory.of(BaseType::class.java, "type")
        .withSubtype(BaseType.TypeA::class.java, "a")
        .withSubtype(BaseType.TypeB::class.java, "b")
        .create(BaseType::class.java, emptySet(), moshi.newBuilder()
          .addAdapter<BaseType.TypeA>(ObjectJsonAdapter(BaseType.TypeA))
      .addAdapter<BaseType.TypeB>(ObjectJsonAdapter(BaseType.TypeB))
      .build()) as JsonAdapter<BaseType>


  public override fun fromJson(reader: JsonReader): BaseType? = runtimeAdapter.fromJson(reader)

  public override fun toJson(writer: JsonWriter, value_: BaseType?): Unit {
    runtimeAdapter.toJson(writer, value_)
  }
}
"#
		)
	);
}

#[test]
fn separate_files() {
	let sub_type = VariantDecl::new(
		TypeName::new("test", "SubType"),
		base_name(),
		TypeLabel::new("a"),
	);
	let run = run_rounds(
		Options::default(),
		vec![vec![base()], vec![Decl::from(sub_type)], Vec::new()],
	);
	assert_eq!(run.result, Ok(()));
	assert_eq!(run.count(ArtifactKind::Adapter), 1);

	let adapter = run.file(ADAPTER_PATH).unwrap();
	assert!(adapter.contains(
		"      PolymorphicJsonAdapterFactory.of(BaseType::class.java, \"type\")\n\
		 \x20       .withSubtype(SubType::class.java, \"a\")\n\
		 \x20       .create(BaseType::class.java, emptySet(), moshi) as JsonAdapter<BaseType>\n"
	));
	assert!(!adapter.contains("import test."));
}

#[test]
fn custom_discriminant_key() {
	let run = run(vec![
		BaseTypeDecl::new(base_name()).label_key("kind").into(),
		class("TypeA", "a", &[]).into(),
	]);
	assert!(
		run.file(ADAPTER_PATH)
			.unwrap()
			.contains("PolymorphicJsonAdapterFactory.of(BaseType::class.java, \"kind\")")
	);
}

#[test]
fn default_object_is_the_fallback() {
	let run = run(vec![
		base(),
		class("TypeA", "a", &[]).into(),
		object("Unknown", "unknown").default_object(true).into(),
	]);
	assert_eq!(run.result, Ok(()));
	let adapter = run.file(ADAPTER_PATH).unwrap();
	assert!(adapter.contains(
		"        .withSubtype(BaseType.Unknown::class.java, \"unknown\")\n        \
		 .withDefaultValue(BaseType.Unknown)\n"
	));
}

#[test]
fn default_null_is_the_fallback() {
	let run = run(vec![
		BaseTypeDecl::new(base_name()).default_null(true).into(),
		class("TypeA", "a", &[]).into(),
	]);
	assert!(run.file(ADAPTER_PATH).unwrap().contains("        .withDefaultValue(null)\n"));
}

#[test]
fn adapter_generation_can_be_disabled() {
	let run = run(vec![
		BaseTypeDecl::new(base_name()).generate_adapter(false).into(),
		class("TypeA", "a", &[]).into(),
	]);
	assert_eq!(run.result, Ok(()));
	assert!(run.artifacts.is_empty());
}
