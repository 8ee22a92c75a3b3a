//! Adapter source generation.

mod adapter;
mod kotlin;
mod writer;

pub use adapter::{FILE_COMMENT, MOSHI, adapter_class_name, adapter_type_name, render_adapter};
