//! Manifest index - the merged, read-only view of installed manifests.
//!
//! An index is built once per (root, version band) and never mutated.
//! Packs and workloads are kept in id order so every query that returns a
//! sequence is deterministic regardless of manifest discovery order.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::core::manifest::{ManifestError, PackDeclaration, WorkloadDefinition, WorkloadManifest};
use crate::core::pack::{InstalledPack, PackKind};
use crate::sources::provider::{ManifestProvider, SdkDirectoryProvider};

/// A manifest that contributed to an index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndexedManifest {
    pub id: String,
    pub version: String,
    pub path: PathBuf,
}

/// Merged view of every manifest installed for one (root, band) pair.
#[derive(Debug)]
pub struct ManifestIndex {
    root: PathBuf,
    version_band: String,
    manifests: Vec<IndexedManifest>,
    /// Packs available on the host platform, by id
    packs: BTreeMap<String, InstalledPack>,
    /// Every declared pack id -> (declaration, defining manifest)
    declarations: BTreeMap<String, (PackDeclaration, String)>,
    workloads: BTreeMap<String, (WorkloadDefinition, String)>,
}

impl ManifestIndex {
    /// Load the index for `root` and `version_band` from disk.
    ///
    /// A missing manifest directory yields an empty index.
    pub fn load(root: &Path, version_band: &str, host_rid: &str) -> Result<Self, ManifestError> {
        let provider = SdkDirectoryProvider::new(root, version_band);
        Self::from_provider(&provider, host_rid)
    }

    /// Build an index from any manifest provider.
    pub fn from_provider(
        provider: &dyn ManifestProvider,
        host_rid: &str,
    ) -> Result<Self, ManifestError> {
        let manifests = provider.manifests()?;
        let index = Self::from_manifests(
            provider.root().to_path_buf(),
            provider.version_band().to_string(),
            host_rid,
            manifests,
        )?;

        tracing::info!(
            "indexed {} packs and {} workloads from {} manifests (band {}, {})",
            index.packs.len(),
            index.workloads.len(),
            index.manifests.len(),
            index.version_band,
            provider.name()
        );

        Ok(index)
    }

    /// Merge already-parsed manifests.
    ///
    /// Fails if two manifests disagree about a pack, or both define the
    /// same workload.
    pub fn from_manifests(
        root: PathBuf,
        version_band: String,
        host_rid: &str,
        manifests: Vec<WorkloadManifest>,
    ) -> Result<Self, ManifestError> {
        let mut index = ManifestIndex {
            root,
            version_band,
            manifests: Vec::with_capacity(manifests.len()),
            packs: BTreeMap::new(),
            declarations: BTreeMap::new(),
            workloads: BTreeMap::new(),
        };

        for manifest in manifests {
            index.merge(manifest, host_rid)?;
        }

        Ok(index)
    }

    fn merge(&mut self, manifest: WorkloadManifest, host_rid: &str) -> Result<(), ManifestError> {
        for decl in manifest.packs {
            if let Some((existing, origin)) = self.declarations.get(&decl.id) {
                if let Some(detail) = declaration_mismatch(existing, &decl) {
                    return Err(ManifestError::Conflict {
                        id: decl.id,
                        first: origin.clone(),
                        second: manifest.id,
                        detail,
                    });
                }
                // Identical redeclaration; the first manifest stays canonical.
                continue;
            }

            match decl.for_platform(host_rid) {
                Some(pack) => {
                    self.packs.insert(decl.id.clone(), pack);
                }
                None => tracing::debug!(
                    "pack `{}` has no alias for {}, not available on this platform",
                    decl.id,
                    host_rid
                ),
            }
            self.declarations
                .insert(decl.id.clone(), (decl, manifest.id.clone()));
        }

        for workload in manifest.workloads {
            if let Some((_, origin)) = self.workloads.get(&workload.id) {
                return Err(ManifestError::Conflict {
                    id: workload.id,
                    first: origin.clone(),
                    second: manifest.id,
                    detail: "workload is defined more than once".to_string(),
                });
            }
            self.workloads
                .insert(workload.id.clone(), (workload, manifest.id.clone()));
        }

        self.manifests.push(IndexedManifest {
            id: manifest.id,
            version: manifest.version,
            path: manifest.path,
        });

        Ok(())
    }

    /// The SDK root this index describes.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The version band this index was loaded for.
    pub fn version_band(&self) -> &str {
        &self.version_band
    }

    /// Manifests that contributed, in discovery order.
    pub fn manifests(&self) -> &[IndexedManifest] {
        &self.manifests
    }

    /// Check if no packs or workloads are installed.
    pub fn is_empty(&self) -> bool {
        self.packs.is_empty() && self.workloads.is_empty()
    }

    /// Get the recorded version of a pack.
    pub fn version_of(&self, pack_id: &str) -> Option<&str> {
        self.packs.get(pack_id).map(|p| p.version())
    }

    /// Get a pack by id.
    pub fn pack(&self, pack_id: &str) -> Option<&InstalledPack> {
        self.packs.get(pack_id)
    }

    /// All packs, in id order.
    pub fn packs(&self) -> impl Iterator<Item = &InstalledPack> {
        self.packs.values()
    }

    /// Packs of one kind, in id order.
    pub fn packs_by_kind(&self, kind: PackKind) -> Vec<&InstalledPack> {
        self.packs.values().filter(|p| p.kind() == kind).collect()
    }

    /// Where a pack is expected to be installed.
    pub fn install_path(&self, pack: &InstalledPack) -> PathBuf {
        pack.install_path(&self.root)
    }

    /// Get a workload definition by id.
    pub fn workload(&self, workload_id: &str) -> Option<&WorkloadDefinition> {
        self.workloads.get(workload_id).map(|(w, _)| w)
    }

    /// All workload definitions, in id order.
    pub fn workloads(&self) -> impl Iterator<Item = &WorkloadDefinition> {
        self.workloads.values().map(|(w, _)| w)
    }

    /// The manifest that defines a pack or workload id.
    pub fn defining_manifest(&self, id: &str) -> Option<&str> {
        self.declarations
            .get(id)
            .map(|(_, origin)| origin.as_str())
            .or_else(|| self.workloads.get(id).map(|(_, origin)| origin.as_str()))
    }

    /// Pack ids of a workload, including those of the workloads it extends.
    ///
    /// Own packs come first, then each extended workload depth-first.
    /// Duplicates and extension cycles are ignored.
    pub fn workload_packs(&self, workload_id: &str) -> Option<Vec<String>> {
        self.workload(workload_id)?;

        let mut visited = Vec::new();
        let mut packs = Vec::new();
        self.collect_workload_packs(workload_id, &mut visited, &mut packs);
        Some(packs)
    }

    fn collect_workload_packs(
        &self,
        workload_id: &str,
        visited: &mut Vec<String>,
        packs: &mut Vec<String>,
    ) {
        if visited.iter().any(|v| v == workload_id) {
            return;
        }
        visited.push(workload_id.to_string());

        let Some(workload) = self.workload(workload_id) else {
            tracing::warn!("workload `{}` extends unknown workload", workload_id);
            return;
        };

        for pack_id in &workload.pack_ids {
            if !packs.contains(pack_id) {
                packs.push(pack_id.clone());
            }
        }
        for base in &workload.extends {
            self.collect_workload_packs(base, visited, packs);
        }
    }

    /// Non-abstract workloads for `host_rid` whose packs include `pack_id`,
    /// in id order.
    pub fn workloads_containing(&self, pack_id: &str, host_rid: &str) -> Vec<&str> {
        self.workloads()
            .filter(|w| !w.is_abstract && w.supports_platform(host_rid))
            .filter(|w| {
                self.workload_packs(&w.id)
                    .is_some_and(|packs| packs.iter().any(|p| p == pack_id))
            })
            .map(|w| w.id.as_str())
            .collect()
    }
}

fn declaration_mismatch(first: &PackDeclaration, second: &PackDeclaration) -> Option<String> {
    if first.version != second.version {
        Some(format!(
            "version {} conflicts with version {}",
            first.version, second.version
        ))
    } else if first.kind != second.kind {
        Some(format!("kind {} conflicts with kind {}", first.kind, second.kind))
    } else if first.alias_to != second.alias_to {
        Some("platform aliases differ".to_string())
    } else {
        None
    }
}
