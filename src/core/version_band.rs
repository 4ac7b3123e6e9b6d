//! SDK version band handling.
//!
//! Manifests are shared by every SDK in a feature band: `6.0.105` and
//! `6.0.100` both read `sdk-manifests/6.0.100`.

use semver::{Prerelease, Version};

/// Parse a version string, allowing for incomplete versions.
pub fn parse_version_lenient(s: &str) -> Option<Version> {
    if let Ok(v) = s.parse() {
        return Some(v);
    }

    let parts: Vec<&str> = s.split('.').collect();
    match parts.len() {
        1 => {
            let major: u64 = parts[0].parse().ok()?;
            Some(Version::new(major, 0, 0))
        }
        2 => {
            let major: u64 = parts[0].parse().ok()?;
            let minor: u64 = parts[1].parse().ok()?;
            Some(Version::new(major, minor, 0))
        }
        _ => None,
    }
}

/// Compute the feature band of an SDK version.
///
/// The patch is floored to the hundred and at most two prerelease
/// identifiers are kept, e.g. `6.0.105` -> `6.0.100` and
/// `7.0.100-preview.4.22252.9` -> `7.0.100-preview.4`.
pub fn feature_band(sdk_version: &str) -> Option<String> {
    let version = parse_version_lenient(sdk_version)?;

    let mut band = Version::new(version.major, version.minor, version.patch / 100 * 100);
    if !version.pre.is_empty() {
        let kept: Vec<&str> = version.pre.as_str().split('.').take(2).collect();
        band.pre = Prerelease::new(&kept.join(".")).ok()?;
    }

    Some(band.to_string())
}
