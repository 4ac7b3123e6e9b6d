//! Manifest index cache.
//!
//! Indexes are built at most once per (root, version band). Lookups of a
//! published index never block; the per-key build lock is only taken while
//! an index is missing.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use crate::core::index::ManifestIndex;
use crate::core::manifest::ManifestError;

type IndexKey = (PathBuf, String);

#[derive(Default)]
struct IndexSlot {
    index: OnceLock<Arc<ManifestIndex>>,
    build_lock: Mutex<()>,
}

/// Process-lifetime cache of manifest indexes, owned by a resolver context.
pub struct IndexCache {
    /// Runtime identifier used to pick platform-specific pack aliases
    host_rid: String,

    slots: Mutex<HashMap<IndexKey, Arc<IndexSlot>>>,
}

impl IndexCache {
    /// Create an empty cache.
    pub fn new(host_rid: impl Into<String>) -> Self {
        IndexCache {
            host_rid: host_rid.into(),
            slots: Mutex::new(HashMap::new()),
        }
    }

    /// Get the runtime identifier indexes are built for.
    pub fn host_rid(&self) -> &str {
        &self.host_rid
    }

    /// Get the index for `root` and `version_band`, loading it from disk
    /// on first use.
    pub fn get_or_load(
        &self,
        root: &Path,
        version_band: &str,
    ) -> Result<Arc<ManifestIndex>, ManifestError> {
        self.get_or_build(root, version_band, || {
            ManifestIndex::load(root, version_band, &self.host_rid)
        })
    }

    /// Get the index for a key, building it with `build` on first use.
    ///
    /// Concurrent callers for the same key wait for a single build. A failed
    /// build publishes nothing, so a later call builds again.
    pub fn get_or_build<F>(
        &self,
        root: &Path,
        version_band: &str,
        build: F,
    ) -> Result<Arc<ManifestIndex>, ManifestError>
    where
        F: FnOnce() -> Result<ManifestIndex, ManifestError>,
    {
        let slot = self.slot(root, version_band);
        if let Some(index) = slot.index.get() {
            return Ok(Arc::clone(index));
        }

        let _guard = slot.build_lock.lock().unwrap_or_else(PoisonError::into_inner);

        // Double-check after acquiring the build lock
        if let Some(index) = slot.index.get() {
            return Ok(Arc::clone(index));
        }

        tracing::debug!(
            "building manifest index for {} (band {})",
            root.display(),
            version_band
        );
        let index = Arc::new(build()?);
        let published = slot.index.get_or_init(|| Arc::clone(&index));
        Ok(Arc::clone(published))
    }

    /// Get a published index without building it.
    pub fn get(&self, root: &Path, version_band: &str) -> Option<Arc<ManifestIndex>> {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots
            .get(&(root.to_path_buf(), version_band.to_string()))
            .and_then(|slot| slot.index.get().cloned())
    }

    /// Number of published indexes.
    pub fn len(&self) -> usize {
        let slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        slots.values().filter(|slot| slot.index.get().is_some()).count()
    }

    /// Check if no index has been published yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn slot(&self, root: &Path, version_band: &str) -> Arc<IndexSlot> {
        let mut slots = self.slots.lock().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(
            slots
                .entry((root.to_path_buf(), version_band.to_string()))
                .or_default(),
        )
    }
}

impl std::fmt::Debug for IndexCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IndexCache")
            .field("host_rid", &self.host_rid)
            .field("published", &self.len())
            .finish()
    }
}
