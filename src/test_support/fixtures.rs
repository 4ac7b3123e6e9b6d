//! On-disk SDK layouts for tests.

use std::fs;
use std::path::{Path, PathBuf};

use serde_json::{json, Map, Value};
use tempfile::TempDir;

use crate::core::index::ManifestIndex;
use crate::core::manifest::MANIFEST_FILE_NAME;
use crate::core::pack::{PACKS_DIR, SDK_SUBDIR};
use crate::resolver::AUTO_IMPORT_MARKER;
use crate::sources::provider::SDK_MANIFESTS_DIR;

/// Host platform the fixture index is built for.
pub const FIXTURE_RID: &str = "linux-x64";

/// A temporary SDK root with manifests and installed packs.
///
/// ```text
/// <root>/sdk/<band>/
/// <root>/sdk-manifests/<band>/<manifest>/WorkloadManifest.json
/// <root>/packs/<pack>/<version>/Sdk/
/// ```
pub struct SdkFixture {
    dir: TempDir,
    band: String,
}

impl SdkFixture {
    /// Create an empty SDK root for `band`.
    pub fn new(band: impl Into<String>) -> Self {
        SdkFixture {
            dir: TempDir::new().unwrap(),
            band: band.into(),
        }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn band(&self) -> &str {
        &self.band
    }

    /// Write a manifest for the fixture's band.
    ///
    /// `packs` are `(id, kind, version)`, `workloads` are `(id, pack ids)`.
    pub fn manifest(
        self,
        id: &str,
        packs: &[(&str, &str, &str)],
        workloads: &[(&str, &[&str])],
    ) -> Self {
        let band = self.band.clone();
        self.band_manifest(&band, id, packs, workloads)
    }

    /// Write a manifest for another band of the same root.
    pub fn band_manifest(
        self,
        band: &str,
        id: &str,
        packs: &[(&str, &str, &str)],
        workloads: &[(&str, &[&str])],
    ) -> Self {
        let mut pack_map = Map::new();
        for (pack_id, kind, version) in packs {
            pack_map.insert(
                pack_id.to_string(),
                json!({ "kind": kind, "version": version }),
            );
        }

        let mut workload_map = Map::new();
        for (workload_id, pack_ids) in workloads {
            workload_map.insert(
                workload_id.to_string(),
                json!({ "description": workload_id, "packs": pack_ids }),
            );
        }

        let content = json!({
            "version": band,
            "packs": Value::Object(pack_map),
            "workloads": Value::Object(workload_map),
        });
        self.write_manifest(band, id, &serde_json::to_string_pretty(&content).unwrap())
    }

    /// Write manifest content verbatim.
    pub fn raw_manifest(self, id: &str, content: &str) -> Self {
        let band = self.band.clone();
        self.write_manifest(&band, id, content)
    }

    fn write_manifest(self, band: &str, id: &str, content: &str) -> Self {
        let dir = self.root().join(SDK_MANIFESTS_DIR).join(band).join(id);
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join(MANIFEST_FILE_NAME), content).unwrap();
        self
    }

    /// Create the install directory of a pack.
    pub fn install_pack(self, id: &str, version: &str) -> Self {
        fs::create_dir_all(self.pack_dir(id, version).join(SDK_SUBDIR)).unwrap();
        self
    }

    /// Install a pack that ships the auto-import marker.
    pub fn auto_import(self, id: &str, version: &str) -> Self {
        let sdk_dir = self.pack_dir(id, version).join(SDK_SUBDIR);
        fs::create_dir_all(&sdk_dir).unwrap();
        fs::write(sdk_dir.join(AUTO_IMPORT_MARKER), "<Project />\n").unwrap();
        self
    }

    pub fn pack_dir(&self, id: &str, version: &str) -> PathBuf {
        self.root().join(PACKS_DIR).join(id).join(version)
    }

    /// The host toolset directory, `<root>/sdk/<band>`, created on demand.
    pub fn host_dir(&self) -> PathBuf {
        let dir = self.root().join("sdk").join(&self.band);
        fs::create_dir_all(&dir).unwrap();
        dir
    }

    /// Load the index of the fixture's band.
    pub fn index(&self) -> ManifestIndex {
        ManifestIndex::load(self.root(), &self.band, FIXTURE_RID).unwrap()
    }
}
