//! Writes artifacts under the output root, consulting the incremental cache.

use std::path::{Path, PathBuf};

use anyhow::Context;
use indexmap::IndexMap;
use rustc_hash::FxHashSet;
use sealgen_processor::cache::fingerprint;
use sealgen_processor::{Artifact, ArtifactCache, CacheEntry, TypeName};

/// Cache file name, relative to the output root.
pub const CACHE_FILE: &str = ".sealgen-cache";

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WriteStats {
	pub written: usize,
	pub unchanged: usize,
	pub removed: usize,
}

pub struct ArtifactWriter {
	out_dir: PathBuf,
	cache: Option<ArtifactCache>,
	/// Base types that produced artifacts this run.
	seen: FxHashSet<TypeName>,
	stats: WriteStats,
}

impl ArtifactWriter {
	/// Opens `out_dir`, loading its cache unless `use_cache` is off.
	pub fn open(out_dir: &Path, use_cache: bool) -> anyhow::Result<Self> {
		let cache = if use_cache {
			let path = out_dir.join(CACHE_FILE);
			Some(ArtifactCache::load(&path).with_context(|| format!("failed to load cache {}", path.display()))?)
		} else {
			None
		};
		Ok(Self {
			out_dir: out_dir.to_path_buf(),
			cache,
			seen: FxHashSet::default(),
			stats: WriteStats::default(),
		})
	}

	/// Writes one round's artifacts. Files of a hierarchy whose fingerprint
	/// matches the cache are left alone if they still exist.
	pub fn write_round(&mut self, artifacts: &[Artifact]) -> anyhow::Result<()> {
		let mut by_origin: IndexMap<&TypeName, Vec<&Artifact>> = IndexMap::new();
		for artifact in artifacts {
			by_origin.entry(&artifact.origin).or_default().push(artifact);
		}
		for (origin, files) in by_origin {
			self.write_hierarchy(origin, &files)?;
		}
		Ok(())
	}

	fn write_hierarchy(&mut self, origin: &TypeName, files: &[&Artifact]) -> anyhow::Result<()> {
		let print = fingerprint(files.iter().copied());
		let paths: Vec<PathBuf> = files.iter().map(|a| a.path.clone()).collect();
		self.seen.insert(origin.clone());

		if let Some(cache) = &self.cache
			&& cache.is_fresh(origin, print)
			&& paths.iter().all(|p| self.out_dir.join(p).is_file())
		{
			tracing::debug!(base = %origin, "artifacts unchanged");
			self.stats.unchanged += files.len();
			return Ok(());
		}

		for artifact in files {
			let target = self.out_dir.join(&artifact.path);
			if let Some(parent) = target.parent() {
				std::fs::create_dir_all(parent).with_context(|| format!("failed to create {}", parent.display()))?;
			}
			std::fs::write(&target, &artifact.contents)
				.with_context(|| format!("failed to write {}", target.display()))?;
			tracing::debug!(kind = %artifact.kind, path = %target.display(), "wrote artifact");
			self.stats.written += 1;
		}

		if let Some(cache) = &mut self.cache {
			for stale in cache.stale_paths(origin, &paths) {
				if remove_output(&self.out_dir, &stale)? {
					self.stats.removed += 1;
				}
			}
			cache.record(origin, CacheEntry { fingerprint: print, paths });
		}
		Ok(())
	}

	/// Removes the outputs of base types that produced nothing this run and
	/// persists the cache, if one is in use.
	pub fn finish(mut self) -> anyhow::Result<WriteStats> {
		if let Some(cache) = &mut self.cache {
			for entry in cache.remove_except(&self.seen) {
				for path in &entry.paths {
					if remove_output(&self.out_dir, path)? {
						self.stats.removed += 1;
					}
				}
			}
			let path = self.out_dir.join(CACHE_FILE);
			cache.save(&path).with_context(|| format!("failed to save cache {}", path.display()))?;
		}
		Ok(self.stats)
	}
}

/// Deletes `path` under `out_dir`. Returns whether a file was there.
fn remove_output(out_dir: &Path, path: &Path) -> anyhow::Result<bool> {
	let target = out_dir.join(path);
	match std::fs::remove_file(&target) {
		Ok(()) => {
			tracing::debug!(path = %target.display(), "removed stale artifact");
			Ok(true)
		}
		Err(error) if error.kind() == std::io::ErrorKind::NotFound => Ok(false),
		Err(error) => Err(error).with_context(|| format!("failed to remove {}", target.display())),
	}
}
