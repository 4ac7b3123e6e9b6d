//! Root/version location.
//!
//! Decides which SDK root and version band a resolution runs against.
//! Strategies are tried in order and the first one that produces a location
//! wins: an explicit pin is authoritative, otherwise the location of the
//! running host toolset is used.

pub mod host;
pub mod pin_file;
pub mod pinned;

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::util::config::ResolverSettings;

pub use host::HostLocator;
pub use pin_file::{find_pin_file, PinFile, PIN_FILE_NAME};
pub use pinned::PinnedLocator;

/// Errors raised while locating the SDK.
#[derive(Debug, Error)]
pub enum LocatorError {
    #[error("could not determine the SDK root: no pinned SDK and no host toolset location")]
    NotFound,

    #[error("SDK pin `{pinned}` does not determine a {missing}")]
    IncompletePin {
        pinned: String,
        missing: &'static str,
    },

    #[error("invalid pin file {}: {message}", path.display())]
    InvalidPinFile { path: PathBuf, message: String },

    #[error("failed to read {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Where resolution happens: an SDK root and the version band of its manifests.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SdkLocation {
    pub root: PathBuf,
    pub version_band: String,
}

impl SdkLocation {
    pub fn new(root: impl Into<PathBuf>, version_band: impl Into<String>) -> Self {
        SdkLocation {
            root: root.into(),
            version_band: version_band.into(),
        }
    }
}

/// What the host tells the locator about the current request.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocatorContext<'a> {
    pub solution_or_project_path: Option<&'a Path>,
}

/// A strategy for finding the SDK location.
pub trait Locator: Send + Sync {
    /// Get the strategy name for display.
    fn name(&self) -> &str;

    /// Produce a location, or `None` if this strategy does not apply.
    fn try_locate(&self, ctx: &LocatorContext<'_>) -> Result<Option<SdkLocation>, LocatorError>;
}

/// An ordered set of locator strategies.
pub struct RootLocator {
    strategies: Vec<Box<dyn Locator>>,
}

impl RootLocator {
    /// Create a locator with no strategies.
    pub fn new() -> Self {
        RootLocator {
            strategies: Vec::new(),
        }
    }

    /// The standard chain: pinned first, then the host toolset.
    pub fn from_settings(settings: &ResolverSettings) -> Self {
        let host = HostLocator::new(settings.host_dir.clone());
        let pinned = PinnedLocator::new(settings.sdk_root.clone(), settings.version_band.clone())
            .with_host(host.clone());

        let mut locator = RootLocator::new();
        locator.add(Box::new(pinned));
        locator.add(Box::new(host));
        locator
    }

    /// Add a strategy after the existing ones.
    pub fn add(&mut self, strategy: Box<dyn Locator>) {
        self.strategies.push(strategy);
    }

    /// Locate the SDK, failing if no strategy applies.
    pub fn locate(&self, ctx: &LocatorContext<'_>) -> Result<SdkLocation, LocatorError> {
        for strategy in &self.strategies {
            if let Some(location) = strategy.try_locate(ctx)? {
                tracing::debug!(
                    "{} locator selected {} (band {})",
                    strategy.name(),
                    location.root.display(),
                    location.version_band
                );
                return Ok(location);
            }
        }
        Err(LocatorError::NotFound)
    }
}

impl Default for RootLocator {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RootLocator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let names: Vec<_> = self.strategies.iter().map(|s| s.name()).collect();
        f.debug_struct("RootLocator").field("strategies", &names).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::SdkFixture;

    struct Fixed(Option<SdkLocation>);

    impl Locator for Fixed {
        fn name(&self) -> &str {
            "fixed"
        }

        fn try_locate(
            &self,
            _ctx: &LocatorContext<'_>,
        ) -> Result<Option<SdkLocation>, LocatorError> {
            Ok(self.0.clone())
        }
    }

    #[test]
    fn test_first_strategy_wins() {
        let mut locator = RootLocator::new();
        locator.add(Box::new(Fixed(None)));
        locator.add(Box::new(Fixed(Some(SdkLocation::new("/a", "6.0.100")))));
        locator.add(Box::new(Fixed(Some(SdkLocation::new("/b", "7.0.100")))));

        let location = locator.locate(&LocatorContext::default()).unwrap();
        assert_eq!(location, SdkLocation::new("/a", "6.0.100"));
    }

    #[test]
    fn test_no_strategy_is_error() {
        let mut locator = RootLocator::new();
        locator.add(Box::new(Fixed(None)));

        assert!(matches!(
            locator.locate(&LocatorContext::default()),
            Err(LocatorError::NotFound)
        ));
    }

    #[test]
    fn test_pin_file_beats_host() {
        let fixture = SdkFixture::new("6.0.100");
        let project_dir = fixture.root().join("work");
        std::fs::create_dir_all(&project_dir).unwrap();
        std::fs::write(
            project_dir.join(PIN_FILE_NAME),
            r#"{ "sdk": { "version": "6.0.300" } }"#,
        )
        .unwrap();

        let settings = ResolverSettings {
            host_dir: Some(fixture.host_dir()),
            ..Default::default()
        };
        let locator = RootLocator::from_settings(&settings);

        let pinned = locator
            .locate(&LocatorContext {
                solution_or_project_path: Some(&project_dir.join("app.csproj")),
            })
            .unwrap();
        assert_eq!(pinned, SdkLocation::new(fixture.root(), "6.0.300"));

        let ambient = locator.locate(&LocatorContext::default()).unwrap();
        assert_eq!(ambient, SdkLocation::new(fixture.root(), "6.0.100"));
    }
}
