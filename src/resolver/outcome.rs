//! Resolution outcomes and the builder that shapes them.
//!
//! An outcome is either `NotHandled` (defer to the next resolver) or a
//! `Success` carrying import paths plus case-insensitive property and item
//! maps. The two never mix.

use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::util::case_map::CaseInsensitiveMap;
use crate::util::diagnostic::Diagnostic;

/// Item key reporting a known pack that is not installed.
pub const MISSING_WORKLOAD_PACK_ITEM: &str = "MissingWorkloadPack";

/// Metadata key carrying the expected version of a missing pack.
pub const VERSION_METADATA: &str = "Version";

/// A named value with metadata, handed to the host as a build item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultItem {
    value: String,
    metadata: CaseInsensitiveMap<String>,
}

impl ResultItem {
    pub fn new(value: impl Into<String>) -> Self {
        ResultItem {
            value: value.into(),
            metadata: CaseInsensitiveMap::new(),
        }
    }

    /// Add metadata. An existing key (ignoring case) is kept.
    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key, value.into());
        self
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn metadata(&self) -> &CaseInsensitiveMap<String> {
        &self.metadata
    }
}

/// Data returned to the host on success.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SdkResult {
    import_paths: Vec<PathBuf>,
    version: Option<String>,
    properties: CaseInsensitiveMap<String>,
    items: CaseInsensitiveMap<ResultItem>,
}

impl SdkResult {
    /// Directories the host imports build logic from, in order.
    pub fn import_paths(&self) -> &[PathBuf] {
        &self.import_paths
    }

    pub fn version(&self) -> Option<&str> {
        self.version.as_deref()
    }

    pub fn properties(&self) -> &CaseInsensitiveMap<String> {
        &self.properties
    }

    pub fn items(&self) -> &CaseInsensitiveMap<ResultItem> {
        &self.items
    }

    /// Packs reported as known but not installed.
    pub fn missing_packs(&self) -> Vec<MissingPack> {
        self.items
            .iter()
            .filter(|(key, _)| key.eq_ignore_ascii_case(MISSING_WORKLOAD_PACK_ITEM))
            .map(|(_, item)| MissingPack {
                id: item.value().to_string(),
                version: item.metadata().get(VERSION_METADATA).cloned(),
            })
            .collect()
    }
}

/// The answer to one resolution request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "kebab-case")]
pub enum ResolutionOutcome {
    /// The reference is not ours; the host should ask the next resolver.
    NotHandled,
    Success(SdkResult),
}

impl ResolutionOutcome {
    pub fn is_handled(&self) -> bool {
        matches!(self, ResolutionOutcome::Success(_))
    }

    pub fn as_success(&self) -> Option<&SdkResult> {
        match self {
            ResolutionOutcome::Success(result) => Some(result),
            ResolutionOutcome::NotHandled => None,
        }
    }
}

/// Builds a `Success` outcome.
///
/// Properties, items and item metadata use first-write-wins on
/// case-insensitive keys.
#[derive(Debug, Default)]
pub struct ResultBuilder {
    result: SdkResult,
}

impl ResultBuilder {
    pub fn new() -> Self {
        ResultBuilder::default()
    }

    pub fn import_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.result.import_paths.push(path.into());
        self
    }

    pub fn import_paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.result
            .import_paths
            .extend(paths.into_iter().map(Into::into));
        self
    }

    pub fn version(mut self, version: Option<&str>) -> Self {
        self.result.version = version.map(str::to_string);
        self
    }

    pub fn property(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.result.properties.insert(key, value.into());
        self
    }

    pub fn item(mut self, key: impl Into<String>, item: ResultItem) -> Self {
        self.result.items.insert(key, item);
        self
    }

    pub fn build(self) -> ResolutionOutcome {
        ResolutionOutcome::Success(self.result)
    }
}

/// A known pack whose install directory is absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MissingPack {
    pub id: String,
    pub version: Option<String>,
}

impl MissingPack {
    /// Turn into a user-facing diagnostic.
    ///
    /// `workloads` names the workloads that would install the pack.
    pub fn to_diagnostic(&self, expected_dir: Option<&Path>, workloads: &[&str]) -> Diagnostic {
        let message = match &self.version {
            Some(version) => format!(
                "workload pack `{}` version {} is not installed",
                self.id, version
            ),
            None => format!("workload pack `{}` is not installed", self.id),
        };

        let mut diag = Diagnostic::warning(message);
        if let Some(dir) = expected_dir {
            diag = diag.with_context(format!("expected at {}", dir.display()));
        }

        if workloads.is_empty() {
            diag.with_suggestion("Install the workload that provides this pack")
        } else {
            for workload in workloads {
                diag = diag.with_suggestion(format!("Install the `{}` workload", workload));
            }
            diag
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_properties_first_write_wins() {
        let outcome = ResultBuilder::new()
            .property("TestProperty1", "AOEU")
            .property("testproperty1", "ASDF")
            .property("TestProperty2", "ASDF")
            .build();

        let result = outcome.as_success().unwrap();
        assert_eq!(result.properties().len(), 2);
        assert_eq!(result.properties().get("TESTPROPERTY1").unwrap(), "AOEU");
    }

    #[test]
    fn test_items_case_insensitive() {
        let outcome = ResultBuilder::new()
            .item("TestItem1", ResultItem::new("TestItem1Value").with_metadata("a", "b"))
            .item(
                "TestItem2",
                ResultItem::new("TestItem2Value")
                    .with_metadata("c", "d")
                    .with_metadata("e", "f")
                    .with_metadata("E", "g"),
            )
            .build();

        let result = outcome.as_success().unwrap();
        let item1 = result.items().get("testitem1").unwrap();
        assert_eq!(item1.value(), "TestItem1Value");
        assert_eq!(item1.metadata().get("A").unwrap(), "b");

        let item2 = result.items().get("TESTITEM2").unwrap();
        assert_eq!(item2.metadata().len(), 2);
        assert_eq!(item2.metadata().get("e").unwrap(), "f");
    }

    #[test]
    fn test_not_handled_carries_nothing() {
        let outcome = ResolutionOutcome::NotHandled;
        assert!(!outcome.is_handled());
        assert!(outcome.as_success().is_none());
    }

    #[test]
    fn test_missing_packs() {
        let outcome = ResultBuilder::new()
            .item(
                MISSING_WORKLOAD_PACK_ITEM,
                ResultItem::new("maui-workload").with_metadata(VERSION_METADATA, "6.0.100"),
            )
            .build();

        let missing = outcome.as_success().unwrap().missing_packs();
        assert_eq!(
            missing,
            vec![MissingPack {
                id: "maui-workload".to_string(),
                version: Some("6.0.100".to_string()),
            }]
        );

        let output = missing[0]
            .to_diagnostic(Some(Path::new("/sdk/packs/maui-workload/6.0.100")), &["maui"])
            .format(false);
        assert!(output
            .contains("warning: workload pack `maui-workload` version 6.0.100 is not installed"));
        assert!(output.contains("/sdk/packs/maui-workload/6.0.100"));
        assert!(output.contains("1. Install the `maui` workload"));
    }

    #[test]
    fn test_outcome_serialization() {
        let json = serde_json::to_value(ResolutionOutcome::NotHandled).unwrap();
        assert_eq!(json["outcome"], "not-handled");

        let json = serde_json::to_value(
            ResultBuilder::new()
                .import_path("/sdk/packs/a/1.0.0/Sdk")
                .version(Some("1.0.0"))
                .build(),
        )
        .unwrap();
        assert_eq!(json["outcome"], "success");
        assert_eq!(json["import_paths"][0], "/sdk/packs/a/1.0.0/Sdk");
        assert_eq!(json["version"], "1.0.0");
    }
}
