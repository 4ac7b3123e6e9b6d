//! Workload SDK resolution.
//!
//! Resolves build-time SDK references against the workload manifests
//! installed with an SDK: a reference that names a known workload pack
//! resolves to the pack's `Sdk` directory, or to a report that the pack is
//! missing; anything else is left to the next resolver.

pub mod core;
pub mod locator;
pub mod ops;
pub mod resolver;
pub mod sources;
pub mod util;

/// Test utilities for unit tests.
///
/// This module is only available when compiling with `--cfg test`. It
/// builds temporary SDK layouts on disk.
#[cfg(test)]
pub mod test_support;

pub use crate::core::{
    index::ManifestIndex, manifest::WorkloadManifest, pack::InstalledPack, pack::PackKind,
};
pub use locator::{RootLocator, SdkLocation};
pub use ops::WorkloadSdkResolver;
pub use resolver::{ResolutionOutcome, ResolutionRequest, ResolveError, SdkResult};
