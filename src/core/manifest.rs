//! WorkloadManifest.json parsing and schema.
//!
//! Each installed manifest lives in its own directory under
//! `<root>/sdk-manifests/<band>/` and declares the packs and workloads
//! it contributes.

use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::core::pack::{InstalledPack, PackKind};

/// File name of a manifest document inside its manifest directory.
pub const MANIFEST_FILE_NAME: &str = "WorkloadManifest.json";

/// Errors raised while reading or merging installed manifests.
#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to parse workload manifest {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },

    #[error("conflicting declarations of `{id}` in manifests `{first}` and `{second}`: {detail}")]
    Conflict {
        id: String,
        first: String,
        second: String,
        detail: String,
    },

    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl ManifestError {
    fn parse(path: &Path, message: impl Into<String>) -> Self {
        ManifestError::Parse {
            path: path.to_path_buf(),
            message: message.into(),
        }
    }
}

/// A pack as declared by one manifest, before platform aliases are applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackDeclaration {
    pub id: String,
    pub kind: PackKind,
    pub version: String,
    /// Runtime identifier -> platform-specific pack id
    pub alias_to: BTreeMap<String, String>,
}

impl PackDeclaration {
    /// Materialize the declaration for a host runtime identifier.
    ///
    /// Returns `None` when the pack is aliased but has no alias for `rid`.
    pub fn for_platform(&self, rid: &str) -> Option<InstalledPack> {
        let pack = InstalledPack::new(self.id.clone(), self.kind, self.version.clone());
        if self.alias_to.is_empty() {
            return Some(pack);
        }
        self.alias_to
            .get(rid)
            .map(|alias| pack.with_resolved_id(alias.clone()))
    }
}

/// A named workload: a bundle of packs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkloadDefinition {
    pub id: String,
    pub description: Option<String>,
    /// Ordered set; duplicates dropped at parse time
    pub pack_ids: Vec<String>,
    pub platforms: Vec<String>,
    pub extends: Vec<String>,
    pub is_abstract: bool,
}

impl WorkloadDefinition {
    /// Whether the workload applies to a platform. An empty platform list
    /// means every platform.
    pub fn supports_platform(&self, rid: &str) -> bool {
        self.platforms.is_empty() || self.platforms.iter().any(|p| p == rid)
    }
}

/// A parsed manifest.
#[derive(Debug, Clone)]
pub struct WorkloadManifest {
    /// The manifest directory name
    pub id: String,
    pub version: String,
    pub description: Option<String>,
    /// Pack declarations ordered by id
    pub packs: Vec<PackDeclaration>,
    /// Workload definitions ordered by id
    pub workloads: Vec<WorkloadDefinition>,
    /// Where the manifest was read from
    pub path: PathBuf,
}

/// Raw manifest as deserialized from JSON.
#[derive(Debug, Deserialize)]
struct RawManifest {
    version: String,

    #[serde(default)]
    description: Option<String>,

    #[serde(default)]
    workloads: BTreeMap<String, RawWorkload>,

    #[serde(default)]
    packs: BTreeMap<String, RawPack>,
}

#[derive(Debug, Deserialize)]
struct RawWorkload {
    #[serde(default)]
    description: Option<String>,

    #[serde(default)]
    packs: Vec<String>,

    #[serde(default)]
    platforms: Vec<String>,

    #[serde(default)]
    extends: Vec<String>,

    #[serde(default, rename = "abstract")]
    is_abstract: bool,
}

#[derive(Debug, Deserialize)]
struct RawPack {
    kind: String,

    version: String,

    #[serde(default, rename = "alias-to")]
    alias_to: BTreeMap<String, String>,
}

impl WorkloadManifest {
    /// Load a manifest from its `WorkloadManifest.json` path.
    ///
    /// The manifest id is the name of the containing directory.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = std::fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let id = path
            .parent()
            .and_then(|dir| dir.file_name())
            .map(|name| name.to_string_lossy().into_owned())
            .ok_or_else(|| {
                ManifestError::parse(path, "manifest is not inside a manifest directory")
            })?;

        Self::parse(&content, id, path)
    }

    /// Parse manifest content.
    pub fn parse(content: &str, id: impl Into<String>, path: &Path) -> Result<Self, ManifestError> {
        let raw: RawManifest =
            serde_json::from_str(content).map_err(|e| ManifestError::parse(path, e.to_string()))?;

        if raw.version.trim().is_empty() {
            return Err(ManifestError::parse(path, "manifest version is empty"));
        }

        let mut packs = Vec::with_capacity(raw.packs.len());
        for (pack_id, raw_pack) in raw.packs {
            packs.push(Self::convert_pack(pack_id, raw_pack, path)?);
        }

        let workloads = raw
            .workloads
            .into_iter()
            .map(|(workload_id, raw_workload)| Self::convert_workload(workload_id, raw_workload))
            .collect();

        Ok(WorkloadManifest {
            id: id.into(),
            version: raw.version,
            description: raw.description,
            packs,
            workloads,
            path: path.to_path_buf(),
        })
    }

    fn convert_pack(
        id: String,
        raw: RawPack,
        path: &Path,
    ) -> Result<PackDeclaration, ManifestError> {
        if id.trim().is_empty() {
            return Err(ManifestError::parse(path, "pack id is empty"));
        }
        let kind = raw
            .kind
            .parse::<PackKind>()
            .map_err(|e| ManifestError::parse(path, format!("pack `{}`: {}", id, e)))?;
        if raw.version.trim().is_empty() {
            return Err(ManifestError::parse(
                path,
                format!("pack `{}` has an empty version", id),
            ));
        }

        Ok(PackDeclaration {
            id,
            kind,
            version: raw.version,
            alias_to: raw.alias_to,
        })
    }

    fn convert_workload(id: String, raw: RawWorkload) -> WorkloadDefinition {
        let mut pack_ids: Vec<String> = Vec::with_capacity(raw.packs.len());
        for pack_id in raw.packs {
            if !pack_ids.contains(&pack_id) {
                pack_ids.push(pack_id);
            }
        }

        WorkloadDefinition {
            id,
            description: raw.description,
            pack_ids,
            platforms: raw.platforms,
            extends: raw.extends,
            is_abstract: raw.is_abstract,
        }
    }

    /// Get a pack declaration by id.
    pub fn pack(&self, id: &str) -> Option<&PackDeclaration> {
        self.packs.iter().find(|p| p.id == id)
    }

    /// Get a workload definition by id.
    pub fn workload(&self, id: &str) -> Option<&WorkloadDefinition> {
        self.workloads.iter().find(|w| w.id == id)
    }
}
