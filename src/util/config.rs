//! Configuration file support.
//!
//! Two configuration file locations are read:
//! - Global: `~/.workload-resolver/config.toml` - User-wide defaults
//! - Project: `.workload-resolver/config.toml` - Overrides for the current directory
//!
//! Project config takes precedence over global config; command-line flags
//! take precedence over both.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Name of the configuration directory, global and per project.
pub const CONFIG_DIR_NAME: &str = ".workload-resolver";

/// Resolver configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Location and platform settings
    pub resolver: ResolverSettings,
}

/// Where to resolve from and for which platform.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ResolverSettings {
    /// Pinned SDK root (contains `sdk-manifests/` and `packs/`)
    pub sdk_root: Option<PathBuf>,

    /// Pinned version band
    pub version_band: Option<String>,

    /// Directory of the host toolset binaries (`<root>/sdk/<band>`)
    pub host_dir: Option<PathBuf>,

    /// Runtime identifier used to pick platform-specific packs
    pub host_rid: Option<String>,
}

impl ResolverSettings {
    /// The configured runtime identifier, or the one of this process.
    pub fn effective_host_rid(&self) -> String {
        self.host_rid.clone().unwrap_or_else(default_host_rid)
    }

    /// Merge another settings block into this one (other takes precedence).
    pub fn merge(&mut self, other: ResolverSettings) {
        if other.sdk_root.is_some() {
            self.sdk_root = other.sdk_root;
        }
        if other.version_band.is_some() {
            self.version_band = other.version_band;
        }
        if other.host_dir.is_some() {
            self.host_dir = other.host_dir;
        }
        if other.host_rid.is_some() {
            self.host_rid = other.host_rid;
        }
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if the file is missing
    /// or unreadable.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        self.resolver.merge(other.resolver);
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.workload-resolver/config.toml)
/// 2. Global config (~/.workload-resolver/config.toml)
/// 3. Defaults
pub fn load_config(global_path: Option<&Path>, project_path: &Path) -> Config {
    let mut config = Config::default();

    if let Some(global) = global_path {
        config.merge(Config::load_or_default(global));
    }

    config.merge(Config::load_or_default(project_path));

    config
}

/// Get the global config directory (~/.workload-resolver).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(CONFIG_DIR_NAME))
}

/// Get the global config path (~/.workload-resolver/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.workload-resolver/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(CONFIG_DIR_NAME).join("config.toml")
}

/// Runtime identifier of the running process, e.g. `linux-x64`.
pub fn default_host_rid() -> String {
    let os = match std::env::consts::OS {
        "macos" => "osx",
        "windows" => "win",
        other => other,
    };
    let arch = match std::env::consts::ARCH {
        "x86_64" => "x64",
        "aarch64" => "arm64",
        "x86" => "x86",
        "arm" => "arm",
        other => other,
    };
    format!("{}-{}", os, arch)
}
