//! Explicitly pinned SDK location.
//!
//! A pin comes from configuration (`sdk-root` / `version-band`) or from the
//! nearest `global.json` above the project. Configuration beats the pin
//! file. Whatever half of the location is not pinned is taken from the host
//! toolset; if the host cannot supply it either, locating fails rather than
//! guessing.

use std::path::PathBuf;

use super::host::HostLocator;
use super::pin_file::{find_pin_file, PinFile};
use super::{Locator, LocatorContext, LocatorError, SdkLocation};

#[derive(Debug, Clone, Default)]
pub struct PinnedLocator {
    sdk_root: Option<PathBuf>,
    version_band: Option<String>,
    /// Supplies the unpinned half of a partial pin
    host: Option<HostLocator>,
}

impl PinnedLocator {
    pub fn new(sdk_root: Option<PathBuf>, version_band: Option<String>) -> Self {
        PinnedLocator {
            sdk_root,
            version_band,
            host: None,
        }
    }

    /// Complete partial pins from the host toolset location.
    pub fn with_host(mut self, host: HostLocator) -> Self {
        self.host = Some(host);
        self
    }

    /// The pinned band: configured, else from the nearest pin file.
    fn pinned_band(&self, ctx: &LocatorContext<'_>) -> Result<Option<String>, LocatorError> {
        if let Some(band) = &self.version_band {
            return Ok(Some(band.clone()));
        }

        let Some(start) = ctx.solution_or_project_path else {
            return Ok(None);
        };
        let Some(path) = find_pin_file(start) else {
            return Ok(None);
        };

        let pin = PinFile::load(&path)?;
        if let Some(version) = &pin.sdk_version {
            tracing::debug!("SDK pinned to {} by {}", version, path.display());
        }
        Ok(pin.sdk_version)
    }

    fn host_location(&self, ctx: &LocatorContext<'_>) -> Result<Option<SdkLocation>, LocatorError> {
        match &self.host {
            Some(host) => host.try_locate(ctx),
            None => Ok(None),
        }
    }
}

impl Locator for PinnedLocator {
    fn name(&self) -> &str {
        "pinned"
    }

    fn try_locate(&self, ctx: &LocatorContext<'_>) -> Result<Option<SdkLocation>, LocatorError> {
        let band = self.pinned_band(ctx)?;

        match (self.sdk_root.clone(), band) {
            (None, None) => Ok(None),
            (Some(root), Some(band)) => Ok(Some(SdkLocation::new(root, band))),
            (None, Some(band)) => match self.host_location(ctx)? {
                Some(host) => Ok(Some(SdkLocation::new(host.root, band))),
                None => Err(LocatorError::IncompletePin {
                    pinned: band,
                    missing: "root",
                }),
            },
            (Some(root), None) => match self.host_location(ctx)? {
                Some(host) => Ok(Some(SdkLocation::new(root, host.version_band))),
                None => Err(LocatorError::IncompletePin {
                    pinned: root.display().to_string(),
                    missing: "version band",
                }),
            },
        }
    }
}
