//! Ambient location from the running host toolset.
//!
//! Host binaries live in `<root>/sdk/<band>/`: the band is the name of that
//! directory and the root is two levels above it.

use std::path::{Path, PathBuf};

use super::{Locator, LocatorContext, LocatorError, SdkLocation};

/// Derives the SDK location from the host toolset directory.
#[derive(Debug, Clone, Default)]
pub struct HostLocator {
    /// Explicit host directory; defaults to the running executable's directory
    host_dir: Option<PathBuf>,
}

impl HostLocator {
    pub fn new(host_dir: Option<PathBuf>) -> Self {
        HostLocator { host_dir }
    }

    /// The directory the host binaries run from, if it can be determined.
    pub fn host_dir(&self) -> Option<PathBuf> {
        if let Some(dir) = &self.host_dir {
            return Some(dir.clone());
        }

        match std::env::current_exe() {
            Ok(exe) => exe.parent().map(Path::to_path_buf),
            Err(e) => {
                tracing::debug!("cannot determine running executable: {}", e);
                None
            }
        }
    }

    /// Split a host directory into (root, band).
    pub fn location_of(host_dir: &Path) -> Option<SdkLocation> {
        let band = host_dir.file_name()?.to_str()?;
        let root = host_dir.parent()?.parent()?;
        if root.as_os_str().is_empty() {
            return None;
        }
        Some(SdkLocation::new(root, band))
    }
}

impl Locator for HostLocator {
    fn name(&self) -> &str {
        "host"
    }

    fn try_locate(&self, _ctx: &LocatorContext<'_>) -> Result<Option<SdkLocation>, LocatorError> {
        let Some(dir) = self.host_dir() else {
            return Ok(None);
        };

        let location = Self::location_of(&dir);
        if location.is_none() {
            tracing::debug!(
                "host directory {} is not inside an SDK layout",
                dir.display()
            );
        }
        Ok(location)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_location_of_host_dir() {
        let location =
            HostLocator::location_of(Path::new("/usr/share/dotnet/sdk/6.0.100")).unwrap();
        assert_eq!(location.root, PathBuf::from("/usr/share/dotnet"));
        assert_eq!(location.version_band, "6.0.100");
    }

    #[test]
    fn test_shallow_host_dir_has_no_location() {
        assert!(HostLocator::location_of(Path::new("/6.0.100")).is_none());
        assert!(HostLocator::location_of(Path::new("sdk/6.0.100")).is_none());
        assert!(HostLocator::location_of(Path::new("/")).is_none());
    }

    #[test]
    fn test_explicit_host_dir() {
        let locator = HostLocator::new(Some(PathBuf::from("/opt/dotnet/sdk/7.0.100")));
        let location = locator.try_locate(&LocatorContext::default()).unwrap().unwrap();
        assert_eq!(location, SdkLocation::new("/opt/dotnet", "7.0.100"));
    }
}
