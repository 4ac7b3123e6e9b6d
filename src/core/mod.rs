//! Core data structures.
//!
//! This module contains the foundational types used throughout the resolver:
//! - Pack kinds and installed packs
//! - Workload manifests and their declarations
//! - SDK version bands
//! - The merged manifest index

pub mod index;
pub mod manifest;
pub mod pack;
pub mod version_band;

pub use index::{IndexedManifest, ManifestIndex};
pub use manifest::{
    ManifestError, PackDeclaration, WorkloadDefinition, WorkloadManifest, MANIFEST_FILE_NAME,
};
pub use pack::{InstalledPack, PackKind, PACKS_DIR, SDK_SUBDIR};
pub use version_band::feature_band;
