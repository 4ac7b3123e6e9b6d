//! Manifest providers - WHERE installed manifests come from.

use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::core::manifest::{ManifestError, WorkloadManifest, MANIFEST_FILE_NAME};
use crate::core::version_band::feature_band;

/// Directory under the SDK root that holds manifests, one subdirectory per band.
pub const SDK_MANIFESTS_DIR: &str = "sdk-manifests";

/// A source of installed workload manifests for one (root, band) pair.
pub trait ManifestProvider {
    /// Get the provider name for display.
    fn name(&self) -> &str;

    /// The SDK root the manifests describe.
    fn root(&self) -> &Path;

    /// The version band the manifests were selected for.
    fn version_band(&self) -> &str;

    /// Read every installed manifest, in a stable discovery order.
    fn manifests(&self) -> Result<Vec<WorkloadManifest>, ManifestError>;
}

/// Reads manifests from `<root>/sdk-manifests/<band>/<manifest id>/`.
#[derive(Debug, Clone)]
pub struct SdkDirectoryProvider {
    root: PathBuf,
    version_band: String,
}

impl SdkDirectoryProvider {
    pub fn new(root: impl Into<PathBuf>, version_band: impl Into<String>) -> Self {
        SdkDirectoryProvider {
            root: root.into(),
            version_band: version_band.into(),
        }
    }

    /// The manifest directory for the band, if one is installed.
    ///
    /// Falls back to the feature band directory when the exact band
    /// directory is missing.
    pub fn manifest_dir(&self) -> Option<PathBuf> {
        let base = self.root.join(SDK_MANIFESTS_DIR);

        let exact = base.join(&self.version_band);
        if exact.is_dir() {
            return Some(exact);
        }

        let band = feature_band(&self.version_band)?;
        if band == self.version_band {
            return None;
        }
        let fallback = base.join(&band);
        if fallback.is_dir() {
            tracing::debug!(
                "no manifests for band {}, using feature band {}",
                self.version_band,
                band
            );
            return Some(fallback);
        }
        None
    }
}

impl ManifestProvider for SdkDirectoryProvider {
    fn name(&self) -> &str {
        "sdk-directory"
    }

    fn root(&self) -> &Path {
        &self.root
    }

    fn version_band(&self) -> &str {
        &self.version_band
    }

    fn manifests(&self) -> Result<Vec<WorkloadManifest>, ManifestError> {
        let Some(dir) = self.manifest_dir() else {
            tracing::debug!(
                "no manifest directory for band {} under {}",
                self.version_band,
                self.root.display()
            );
            return Ok(Vec::new());
        };

        let mut manifests = Vec::new();
        for entry in WalkDir::new(&dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| ManifestError::Io {
                path: dir.clone(),
                source: e.into(),
            })?;
            if !entry.file_type().is_dir() {
                continue;
            }

            let manifest_path = entry.path().join(MANIFEST_FILE_NAME);
            if !manifest_path.is_file() {
                tracing::debug!(
                    "skipping {}: no {}",
                    entry.path().display(),
                    MANIFEST_FILE_NAME
                );
                continue;
            }

            manifests.push(WorkloadManifest::load(&manifest_path)?);
        }

        tracing::debug!("discovered {} manifests in {}", manifests.len(), dir.display());
        Ok(manifests)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::SdkFixture;

    #[test]
    fn test_missing_manifest_dir_is_empty() {
        let fixture = SdkFixture::new("6.0.100");
        let provider = SdkDirectoryProvider::new(fixture.root(), "6.0.100");

        assert!(provider.manifest_dir().is_none());
        assert!(provider.manifests().unwrap().is_empty());
    }

    #[test]
    fn test_discovery_is_sorted_and_skips_non_manifests() {
        let fixture = SdkFixture::new("6.0.100")
            .manifest("zeta", &[("zeta-pack", "sdk", "1.0.0")], &[])
            .manifest("alpha", &[("alpha-pack", "sdk", "1.0.0")], &[]);
        let band_dir = fixture.root().join(SDK_MANIFESTS_DIR).join("6.0.100");
        std::fs::create_dir_all(band_dir.join("empty")).unwrap();
        std::fs::write(band_dir.join("README"), "not a manifest").unwrap();

        let provider = SdkDirectoryProvider::new(fixture.root(), "6.0.100");
        let ids: Vec<_> = provider
            .manifests()
            .unwrap()
            .into_iter()
            .map(|m| m.id)
            .collect();

        assert_eq!(ids, vec!["alpha", "zeta"]);
    }

    #[test]
    fn test_feature_band_fallback() {
        let fixture =
            SdkFixture::new("6.0.100").manifest("wasm", &[("wasm-tools", "sdk", "6.0.100")], &[]);

        let provider = SdkDirectoryProvider::new(fixture.root(), "6.0.105");
        assert!(provider.manifest_dir().unwrap().ends_with("6.0.100"));
        assert_eq!(provider.manifests().unwrap().len(), 1);
    }

    #[test]
    fn test_malformed_manifest_fails() {
        let fixture = SdkFixture::new("6.0.100").raw_manifest("broken", "{ \"version\": ");

        let provider = SdkDirectoryProvider::new(fixture.root(), "6.0.100");
        assert!(matches!(
            provider.manifests(),
            Err(ManifestError::Parse { .. })
        ));
    }
}
