//! Incremental artifact cache.
//!
//! Remembers, per base type, a fingerprint of the artifacts last written for it
//! and where they were written. A host consults it to skip rewriting unchanged
//! files and to remove files a hierarchy no longer produces.
//!
//! On disk the cache is a postcard blob behind an 8-byte magic and a
//! little-endian schema version. A blob with a foreign header is discarded.

use std::collections::BTreeMap;
use std::hash::{Hash, Hasher};
use std::mem::size_of;
use std::path::{Path, PathBuf};

use rustc_hash::{FxHashSet, FxHasher};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::artifact::Artifact;
use crate::name::TypeName;

/// Magic bytes identifying a cache blob.
pub const MAGIC: &[u8; 8] = b"SEALGENC";

/// Bumped whenever the payload layout or fingerprint function changes.
pub const SCHEMA_VERSION: u32 = 1;

/// Total header size in bytes (magic + version).
pub const HEADER_SIZE: usize = MAGIC.len() + size_of::<u32>();

#[derive(Debug, Error)]
pub enum CacheError {
	#[error("I/O error on cache {path}: {error}")]
	Io { path: PathBuf, error: std::io::Error },

	#[error("corrupt cache {path}: {error}")]
	Decode { path: PathBuf, error: postcard::Error },

	#[error("failed to encode cache: {0}")]
	Encode(postcard::Error),
}

/// What was last written for one base type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheEntry {
	pub fingerprint: u64,
	/// Artifact paths relative to the output root.
	pub paths: Vec<PathBuf>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactCache {
	entries: BTreeMap<String, CacheEntry>,
}

impl ArtifactCache {
	pub fn new() -> Self {
		Self::default()
	}

	/// Loads the cache at `path`. A missing file or a blob written by another
	/// schema yields an empty cache.
	pub fn load(path: &Path) -> Result<Self, CacheError> {
		let data = match std::fs::read(path) {
			Ok(data) => data,
			Err(error) if error.kind() == std::io::ErrorKind::NotFound => return Ok(Self::default()),
			Err(error) => {
				return Err(CacheError::Io {
					path: path.to_path_buf(),
					error,
				});
			}
		};
		let Some(payload) = validate_blob(&data) else {
			tracing::warn!(path = %path.display(), "discarding cache with unknown header");
			return Ok(Self::default());
		};
		let cache: Self = postcard::from_bytes(payload).map_err(|error| CacheError::Decode {
			path: path.to_path_buf(),
			error,
		})?;
		tracing::debug!(path = %path.display(), entries = cache.entries.len(), "loaded artifact cache");
		Ok(cache)
	}

	pub fn save(&self, path: &Path) -> Result<(), CacheError> {
		let payload = postcard::to_allocvec(self).map_err(CacheError::Encode)?;
		let mut data = Vec::with_capacity(HEADER_SIZE + payload.len());
		data.extend_from_slice(MAGIC);
		data.extend_from_slice(&SCHEMA_VERSION.to_le_bytes());
		data.extend_from_slice(&payload);

		let io = |error| CacheError::Io {
			path: path.to_path_buf(),
			error,
		};
		if let Some(parent) = path.parent() {
			std::fs::create_dir_all(parent).map_err(io)?;
		}
		std::fs::write(path, data).map_err(io)
	}

	pub fn get(&self, base: &TypeName) -> Option<&CacheEntry> {
		self.entries.get(&base.canonical_name())
	}

	/// Whether the artifacts last recorded for `base` had this fingerprint.
	pub fn is_fresh(&self, base: &TypeName, fingerprint: u64) -> bool {
		self.get(base).is_some_and(|entry| entry.fingerprint == fingerprint)
	}

	/// Records what was written for `base`, returning the previous entry.
	pub fn record(&mut self, base: &TypeName, entry: CacheEntry) -> Option<CacheEntry> {
		self.entries.insert(base.canonical_name(), entry)
	}

	/// Forgets `base`, returning its entry.
	pub fn remove(&mut self, base: &TypeName) -> Option<CacheEntry> {
		self.entries.remove(&base.canonical_name())
	}

	/// Forgets every base type not in `live`, returning the dropped entries.
	pub fn remove_except<'a, I>(&mut self, live: I) -> Vec<CacheEntry>
	where
		I: IntoIterator<Item = &'a TypeName>,
	{
		let live: FxHashSet<String> = live.into_iter().map(TypeName::canonical_name).collect();
		let dead: Vec<String> = self.entries.keys().filter(|key| !live.contains(*key)).cloned().collect();
		dead.iter().filter_map(|key| self.entries.remove(key)).collect()
	}

	/// Paths recorded for `base` that are not among `current`.
	pub fn stale_paths(&self, base: &TypeName, current: &[PathBuf]) -> Vec<PathBuf> {
		self.get(base)
			.map(|entry| entry.paths.iter().filter(|p| !current.contains(p)).cloned().collect())
			.unwrap_or_default()
	}

	pub fn len(&self) -> usize {
		self.entries.len()
	}

	pub fn is_empty(&self) -> bool {
		self.entries.is_empty()
	}
}

/// Fingerprint of a set of artifacts, independent of their order.
pub fn fingerprint<'a, I>(artifacts: I) -> u64
where
	I: IntoIterator<Item = &'a Artifact>,
{
	let mut sorted: Vec<&Artifact> = artifacts.into_iter().collect();
	sorted.sort_by(|a, b| a.path.cmp(&b.path));

	let mut hasher = FxHasher::default();
	for artifact in sorted {
		artifact.path.hash(&mut hasher);
		artifact.contents.hash(&mut hasher);
	}
	hasher.finish()
}

fn validate_blob(data: &[u8]) -> Option<&[u8]> {
	let (magic, rest) = data.split_first_chunk::<8>()?;
	if magic != MAGIC {
		return None;
	}
	let (version, payload) = rest.split_first_chunk::<4>()?;
	(u32::from_le_bytes(*version) == SCHEMA_VERSION).then_some(payload)
}
