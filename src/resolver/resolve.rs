//! Reference resolution against a manifest index.
//!
//! `resolve` is a pure function of the request, the index and the
//! filesystem state at call time. It never fails: unknown references are
//! `NotHandled` and known-but-missing packs are reported as data.

use std::path::PathBuf;

use crate::core::index::ManifestIndex;
use crate::core::pack::PackKind;
use crate::locator::LocatorContext;
use crate::resolver::outcome::{
    ResolutionOutcome, ResultBuilder, ResultItem, MISSING_WORKLOAD_PACK_ITEM, VERSION_METADATA,
};

/// Reserved reference name that asks for every auto-import directory.
pub const AUTO_IMPORT_LOCATOR_NAME: &str = "Microsoft.NET.SDK.WorkloadAutoImportPropsLocator";

/// Marker file that opts an SDK pack into auto-import.
pub const AUTO_IMPORT_MARKER: &str = "AutoImport.props";

/// One reference the host asks about.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionRequest {
    pub reference_name: String,
    /// Advisory; the installed version is authoritative
    pub reference_version: Option<String>,
    pub solution_or_project_path: Option<PathBuf>,
    /// Informational; locating keys off the project path and host directory
    pub host_version: String,
}

impl ResolutionRequest {
    pub fn new(reference_name: impl Into<String>) -> Self {
        ResolutionRequest {
            reference_name: reference_name.into(),
            ..Default::default()
        }
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.reference_version = Some(version.into());
        self
    }

    pub fn with_project_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.solution_or_project_path = Some(path.into());
        self
    }

    pub fn with_host_version(mut self, version: impl Into<String>) -> Self {
        self.host_version = version.into();
        self
    }

    /// The part of the request the locator looks at.
    pub fn locator_context(&self) -> LocatorContext<'_> {
        LocatorContext {
            solution_or_project_path: self.solution_or_project_path.as_deref(),
        }
    }

    /// Whether this is the reserved auto-import aggregate query.
    pub fn is_auto_import_query(&self) -> bool {
        self.reference_name
            .eq_ignore_ascii_case(AUTO_IMPORT_LOCATOR_NAME)
    }
}

/// Resolve a reference against an index.
pub fn resolve(request: &ResolutionRequest, index: &ManifestIndex) -> ResolutionOutcome {
    if request.is_auto_import_query() {
        return resolve_auto_imports(request, index);
    }
    resolve_pack(request, index)
}

/// `Sdk` directories of every SDK pack that ships the auto-import marker,
/// in pack id order.
fn resolve_auto_imports(request: &ResolutionRequest, index: &ManifestIndex) -> ResolutionOutcome {
    let paths: Vec<PathBuf> = index
        .packs_by_kind(PackKind::Sdk)
        .into_iter()
        .map(|pack| pack.sdk_dir(index.root()))
        .filter(|sdk_dir| sdk_dir.join(AUTO_IMPORT_MARKER).is_file())
        .collect();

    tracing::debug!("{} SDK packs provide auto-imports", paths.len());

    ResultBuilder::new()
        .import_paths(paths)
        .version(request.reference_version.as_deref())
        .build()
}

fn resolve_pack(request: &ResolutionRequest, index: &ManifestIndex) -> ResolutionOutcome {
    let Some(pack) = index.pack(&request.reference_name) else {
        tracing::trace!("`{}` is not a known workload pack", request.reference_name);
        return ResolutionOutcome::NotHandled;
    };
    let version = pack.version();

    let install_path = index.install_path(pack);
    if install_path.is_dir() {
        tracing::debug!("resolved `{}` to {}", pack.id(), install_path.display());
        return ResultBuilder::new()
            .import_path(pack.sdk_dir(index.root()))
            .version(Some(version))
            .build();
    }

    tracing::debug!(
        "workload pack `{}` {} is not installed at {}",
        pack.id(),
        version,
        install_path.display()
    );
    ResultBuilder::new()
        .version(request.reference_version.as_deref())
        .item(
            MISSING_WORKLOAD_PACK_ITEM,
            ResultItem::new(pack.id()).with_metadata(VERSION_METADATA, version),
        )
        .build()
}
