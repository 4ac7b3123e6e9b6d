//! Installed packs - WHAT a manifest says is on disk.
//!
//! A pack is identified by its id, has a kind and exactly one version
//! inside a manifest index. The install path is derived, never stored in
//! the manifest.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Directory under the SDK root that holds installed packs.
pub const PACKS_DIR: &str = "packs";

/// Subdirectory of an installed pack that the host imports build logic from.
pub const SDK_SUBDIR: &str = "Sdk";

/// The kind of content a pack carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PackKind {
    /// MSBuild SDK content, importable by the host
    Sdk,
    /// Targeting or runtime framework
    Framework,
    /// Project/item templates
    Template,
    /// Tooling executables
    Tool,
    /// Libraries consumed by package reference
    Library,
}

impl PackKind {
    /// All kinds, in declaration order.
    pub const ALL: [PackKind; 5] = [
        PackKind::Sdk,
        PackKind::Framework,
        PackKind::Template,
        PackKind::Tool,
        PackKind::Library,
    ];

    /// The lowercase manifest spelling of this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            PackKind::Sdk => "sdk",
            PackKind::Framework => "framework",
            PackKind::Template => "template",
            PackKind::Tool => "tool",
            PackKind::Library => "library",
        }
    }
}

impl fmt::Display for PackKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PackKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PackKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| {
                format!(
                    "unknown pack kind `{}` (expected one of: {})",
                    s,
                    "sdk, framework, template, tool, library"
                )
            })
    }
}

/// A pack as recorded in the merged manifest index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InstalledPack {
    id: String,
    kind: PackKind,
    version: String,
    /// Id of the directory the pack is materialized under. Differs from
    /// `id` only for platform-aliased packs.
    resolved_id: String,
}

impl InstalledPack {
    /// Create a pack that is installed under its own id.
    pub fn new(id: impl Into<String>, kind: PackKind, version: impl Into<String>) -> Self {
        let id = id.into();
        InstalledPack {
            resolved_id: id.clone(),
            id,
            kind,
            version: version.into(),
        }
    }

    /// Materialize the pack under a platform-specific alias.
    pub fn with_resolved_id(mut self, resolved_id: impl Into<String>) -> Self {
        self.resolved_id = resolved_id.into();
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn kind(&self) -> PackKind {
        self.kind
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    pub fn resolved_id(&self) -> &str {
        &self.resolved_id
    }

    /// Whether the pack lives under a different id than it is referenced by.
    pub fn is_aliased(&self) -> bool {
        self.id != self.resolved_id
    }

    /// `<root>/packs/<resolved id>/<version>`
    pub fn install_path(&self, root: &Path) -> PathBuf {
        root.join(PACKS_DIR)
            .join(&self.resolved_id)
            .join(&self.version)
    }

    /// `<install path>/Sdk`
    pub fn sdk_dir(&self, root: &Path) -> PathBuf {
        self.install_path(root).join(SDK_SUBDIR)
    }
}

impl fmt::Display for InstalledPack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ({})", self.id, self.version, self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_install_path() {
        let pack = InstalledPack::new("wasm-tools", PackKind::Sdk, "6.0.100");
        let root = Path::new("/opt/sdk");

        assert_eq!(
            pack.install_path(root),
            PathBuf::from("/opt/sdk/packs/wasm-tools/6.0.100")
        );
        assert_eq!(
            pack.sdk_dir(root),
            PathBuf::from("/opt/sdk/packs/wasm-tools/6.0.100/Sdk")
        );
        assert!(!pack.is_aliased());
    }

    #[test]
    fn test_aliased_install_path() {
        let pack = InstalledPack::new("Workload.Tools", PackKind::Tool, "1.0.0")
            .with_resolved_id("Workload.Tools.linux-x64");

        assert!(pack.is_aliased());
        assert_eq!(pack.id(), "Workload.Tools");
        assert!(pack
            .install_path(Path::new("/r"))
            .ends_with("packs/Workload.Tools.linux-x64/1.0.0"));
    }

    #[test]
    fn test_kind_parsing() {
        assert_eq!("sdk".parse::<PackKind>().unwrap(), PackKind::Sdk);
        assert_eq!("Framework".parse::<PackKind>().unwrap(), PackKind::Framework);
        assert!("driver".parse::<PackKind>().is_err());
        assert_eq!(PackKind::Library.to_string(), "library");
    }
}
