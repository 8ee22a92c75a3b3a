//! `sealgen` binary.
//!
//! Loads declaration manifests, feeds them to the processor round by round
//! and writes the generated adapters and retention rules under the output
//! root. Exits with status 1 if any diagnostic was reported and 2 on I/O or
//! configuration errors.

mod config;
mod write;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::Parser;
use sealgen_manifest::{Manifest, into_rounds};
use sealgen_processor::options::parse_arg;
use sealgen_processor::{Options, ProcessError, RoundSignal, SealedProcessor, Summary};
use tracing::info;

use crate::config::{Config, DEFAULT_OUT_DIR};
use crate::write::ArtifactWriter;

/// Command line arguments.
#[derive(Parser, Debug)]
#[command(name = "sealgen")]
#[command(about = "Generate polymorphic Moshi adapters for sealed type hierarchies")]
#[command(version)]
struct Args {
	/// Declaration manifests, one per compilation unit
	#[arg(required = true, value_name = "MANIFEST")]
	manifests: Vec<PathBuf>,

	/// Output root for generated files
	#[arg(short, long, value_name = "DIR")]
	out_dir: Option<PathBuf>,

	/// Configuration file (defaults to ./sealgen.toml if present)
	#[arg(short, long, value_name = "PATH")]
	config: Option<PathBuf>,

	/// Processor option, repeatable; overrides the config file
	#[arg(short = 'A', value_name = "KEY=VALUE", value_parser = parse_arg)]
	options: Vec<(String, String)>,

	/// Write every artifact and leave the cache untouched
	#[arg(long)]
	no_cache: bool,

	/// Verbose logging
	#[arg(short, long)]
	verbose: bool,
}

fn main() -> ExitCode {
	let args = Args::parse();

	tracing_subscriber::fmt()
		.with_max_level(if args.verbose {
			tracing::Level::DEBUG
		} else {
			tracing::Level::INFO
		})
		.with_writer(std::io::stderr)
		.init();

	match run(args) {
		Ok(true) => ExitCode::SUCCESS,
		Ok(false) => ExitCode::from(1),
		Err(error) => {
			eprintln!("error: {error:#}");
			ExitCode::from(2)
		}
	}
}

/// Returns whether the run finished without diagnostics.
fn run(args: Args) -> anyhow::Result<bool> {
	let config = Config::load(args.config.as_deref())?;
	let options = Options::from_args(config.option_pairs().chain(args.options))
		.context("invalid processor options")?;
	let out_dir = args
		.out_dir
		.or(config.out_dir)
		.unwrap_or_else(|| PathBuf::from(DEFAULT_OUT_DIR));
	let use_cache = !args.no_cache && config.cache.unwrap_or(true);

	let manifests = args
		.manifests
		.iter()
		.map(|path| Manifest::load(path))
		.collect::<Result<Vec<_>, _>>()?;
	let rounds = into_rounds(manifests);
	info!(rounds = rounds.len(), out_dir = %out_dir.display(), "processing");

	let mut processor = SealedProcessor::new(options);
	let mut writer = ArtifactWriter::open(&out_dir, use_cache)?;
	let last = rounds.len().saturating_sub(1);
	for (i, round) in rounds.into_iter().enumerate() {
		let signal = if i == last { RoundSignal::Final } else { RoundSignal::Continue };
		let artifacts = processor.process_round(round, signal);
		writer.write_round(&artifacts)?;
	}

	let outcome = processor.finish();
	match &outcome {
		Ok(Summary { trailing, .. }) | Err(ProcessError::Diagnostics { trailing, .. }) => {
			writer.write_round(trailing)?;
		}
	}
	let stats = writer.finish()?;

	match outcome {
		Ok(summary) => {
			info!(
				hierarchies = summary.validated,
				written = stats.written,
				unchanged = stats.unchanged,
				removed = stats.removed,
				"done"
			);
			Ok(true)
		}
		Err(ProcessError::Diagnostics { diagnostics, .. }) => {
			for diagnostic in &diagnostics {
				eprintln!("{diagnostic}");
			}
			eprintln!("{} error(s)", diagnostics.len());
			Ok(false)
		}
	}
}
