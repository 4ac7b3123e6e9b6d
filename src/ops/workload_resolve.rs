//! The resolver context handed to the host.
//!
//! A `WorkloadSdkResolver` is created once by the host adapter and shared
//! by every resolution in the process. It owns the locator strategies and
//! the manifest index cache; nothing else is shared between calls.

use std::sync::Arc;

use crate::core::index::ManifestIndex;
use crate::locator::{RootLocator, SdkLocation};
use crate::resolver::{resolve, ResolutionOutcome, ResolutionRequest, ResolveError, SdkResult};
use crate::sources::IndexCache;
use crate::util::config::ResolverSettings;
use crate::util::diagnostic::Diagnostic;

/// Name the resolver registers with the host under.
pub const RESOLVER_NAME: &str = "Microsoft.DotNet.MSBuildWorkloadSdkResolver";

/// Priority the host orders this resolver by (lower runs first).
pub const RESOLVER_PRIORITY: i32 = 4000;

#[derive(Debug)]
pub struct WorkloadSdkResolver {
    locator: RootLocator,
    cache: IndexCache,
}

impl WorkloadSdkResolver {
    /// Create a resolver from explicit parts.
    pub fn new(locator: RootLocator, host_rid: impl Into<String>) -> Self {
        WorkloadSdkResolver {
            locator,
            cache: IndexCache::new(host_rid),
        }
    }

    /// Create a resolver with the standard locator chain.
    pub fn from_settings(settings: &ResolverSettings) -> Self {
        Self::new(
            RootLocator::from_settings(settings),
            settings.effective_host_rid(),
        )
    }

    pub fn name(&self) -> &'static str {
        RESOLVER_NAME
    }

    pub fn priority(&self) -> i32 {
        RESOLVER_PRIORITY
    }

    pub fn cache(&self) -> &IndexCache {
        &self.cache
    }

    /// Runtime identifier packs and workloads are selected for.
    pub fn host_rid(&self) -> &str {
        self.cache.host_rid()
    }

    /// Determine the SDK root and band for a request.
    pub fn locate(&self, request: &ResolutionRequest) -> Result<SdkLocation, ResolveError> {
        Ok(self.locator.locate(&request.locator_context())?)
    }

    /// Get the manifest index a request resolves against.
    pub fn index_for(
        &self,
        request: &ResolutionRequest,
    ) -> Result<Arc<ManifestIndex>, ResolveError> {
        let location = self.locate(request)?;
        Ok(self
            .cache
            .get_or_load(&location.root, &location.version_band)?)
    }

    /// Resolve one reference.
    ///
    /// Errors only when the SDK cannot be located or its manifests cannot be
    /// loaded.
    pub fn resolve(&self, request: &ResolutionRequest) -> Result<ResolutionOutcome, ResolveError> {
        let index = self.index_for(request)?;
        Ok(resolve(request, &index))
    }
}

/// User-facing diagnostics for the missing packs of a result.
///
/// Only workloads available on `host_rid` are suggested.
pub fn missing_pack_diagnostics(
    result: &SdkResult,
    index: &ManifestIndex,
    host_rid: &str,
) -> Vec<Diagnostic> {
    result
        .missing_packs()
        .iter()
        .map(|missing| {
            let expected_dir = index.pack(&missing.id).map(|p| index.install_path(p));
            let workloads = index.workloads_containing(&missing.id, host_rid);
            missing.to_diagnostic(expected_dir.as_deref(), &workloads)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::locator::PIN_FILE_NAME;
    use crate::test_support::SdkFixture;

    fn settings_for(fixture: &SdkFixture) -> ResolverSettings {
        ResolverSettings {
            host_dir: Some(fixture.host_dir()),
            host_rid: Some("linux-x64".to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_resolve_through_context() {
        let fixture = SdkFixture::new("6.0.100")
            .manifest("m", &[("wasm-tools", "sdk", "6.0.100")], &[])
            .install_pack("wasm-tools", "6.0.100");
        let resolver = WorkloadSdkResolver::from_settings(&settings_for(&fixture));

        let outcome = resolver.resolve(&ResolutionRequest::new("wasm-tools")).unwrap();
        assert_eq!(outcome.as_success().unwrap().import_paths().len(), 1);
        assert_eq!(
            resolver.resolve(&ResolutionRequest::new("other")).unwrap(),
            ResolutionOutcome::NotHandled
        );
        assert_eq!(resolver.cache().len(), 1);
        assert_eq!(resolver.name(), RESOLVER_NAME);
        assert_eq!(resolver.priority(), 4000);
    }

    #[test]
    fn test_pinned_band_uses_separate_index() {
        let fixture = SdkFixture::new("6.0.100")
            .manifest("m", &[("wasm-tools", "sdk", "6.0.100")], &[])
            .band_manifest("6.0.300", "m", &[("wasm-tools", "sdk", "6.0.300")], &[]);
        let project_dir = fixture.root().join("project");
        std::fs::create_dir_all(&project_dir).unwrap();
        std::fs::write(
            project_dir.join(PIN_FILE_NAME),
            r#"{ "sdk": { "version": "6.0.300" } }"#,
        )
        .unwrap();
        let resolver = WorkloadSdkResolver::from_settings(&settings_for(&fixture));

        let ambient = resolver
            .resolve(&ResolutionRequest::new("wasm-tools"))
            .unwrap();
        let pinned_request =
            ResolutionRequest::new("wasm-tools").with_project_path(project_dir.join("app.csproj"));
        let pinned = resolver.resolve(&pinned_request).unwrap();

        let ambient_items = ambient.as_success().unwrap().items();
        let pinned_items = pinned.as_success().unwrap().items();
        assert_eq!(
            ambient_items.get("MissingWorkloadPack").unwrap().metadata().get("Version").unwrap(),
            "6.0.100"
        );
        assert_eq!(
            pinned_items.get("MissingWorkloadPack").unwrap().metadata().get("Version").unwrap(),
            "6.0.300"
        );
        assert_eq!(resolver.cache().len(), 2);
    }

    #[test]
    fn test_locator_failure_is_error() {
        let resolver = WorkloadSdkResolver::new(RootLocator::new(), "linux-x64");
        let err = resolver.resolve(&ResolutionRequest::new("wasm-tools")).unwrap_err();
        assert!(matches!(err, ResolveError::Locator(_)));
    }

    #[test]
    fn test_conflicting_manifests_are_error() {
        let fixture = SdkFixture::new("6.0.100")
            .manifest("a", &[("wasm-tools", "sdk", "6.0.100")], &[])
            .manifest("b", &[("wasm-tools", "sdk", "6.0.200")], &[]);
        let resolver = WorkloadSdkResolver::from_settings(&settings_for(&fixture));

        let err = resolver.resolve(&ResolutionRequest::new("unrelated")).unwrap_err();
        assert!(matches!(err, ResolveError::Manifest(_)));
        assert!(resolver.cache().is_empty());
    }

    #[test]
    fn test_missing_pack_diagnostics_name_workloads() {
        let fixture = SdkFixture::new("6.0.100").manifest(
            "m",
            &[("maui-workload", "sdk", "6.0.100")],
            &[("maui", &["maui-workload"])],
        );
        let resolver = WorkloadSdkResolver::from_settings(&settings_for(&fixture));
        let request = ResolutionRequest::new("maui-workload");

        let outcome = resolver.resolve(&request).unwrap();
        let index = resolver.index_for(&request).unwrap();
        let diagnostics =
            missing_pack_diagnostics(outcome.as_success().unwrap(), &index, resolver.host_rid());

        assert_eq!(diagnostics.len(), 1);
        let output = diagnostics[0].format(false);
        assert!(output.contains("Install the `maui` workload"));
        assert!(output.contains("packs"));
    }

    #[test]
    fn test_missing_pack_diagnostics_skip_other_platforms() {
        let fixture = SdkFixture::new("6.0.100").raw_manifest(
            "m",
            r#"{ "version": "6.0.100",
                "packs": { "mobile-sdk": { "kind": "sdk", "version": "6.0.100" } },
                "workloads": {
                    "windows-mobile": { "packs": ["mobile-sdk"], "platforms": ["win-x64"] },
                    "mac-mobile": { "packs": ["mobile-sdk"], "platforms": ["osx-arm64"] }
                } }"#,
        );
        let settings = ResolverSettings {
            host_rid: Some("osx-arm64".to_string()),
            ..settings_for(&fixture)
        };
        let resolver = WorkloadSdkResolver::from_settings(&settings);
        let request = ResolutionRequest::new("mobile-sdk");

        let outcome = resolver.resolve(&request).unwrap();
        let index = resolver.index_for(&request).unwrap();
        let diagnostics =
            missing_pack_diagnostics(outcome.as_success().unwrap(), &index, resolver.host_rid());

        let output = diagnostics[0].format(false);
        assert!(output.contains("Install the `mac-mobile` workload"));
        assert!(!output.contains("windows-mobile"));
    }
}
