//! Command implementations

pub mod locate;
pub mod packs;
pub mod resolve;
pub mod workloads;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};

use crate::cli::LocationArgs;
use workload_resolver::util::config::{
    global_config_path, load_config, project_config_path, Config, ResolverSettings,
};
use workload_resolver::{ManifestIndex, ResolutionRequest, WorkloadSdkResolver};

/// State shared by every command: the resolver context and the request
/// parameters taken from the command line.
pub struct Session {
    pub resolver: WorkloadSdkResolver,
    pub settings: ResolverSettings,
    pub project: Option<PathBuf>,
    pub color: bool,
}

impl Session {
    pub fn new(location: &LocationArgs, config_path: Option<&Path>, color: bool) -> Result<Self> {
        let mut config = match config_path {
            Some(path) => Config::load(path)?,
            None => {
                let cwd = std::env::current_dir().context("failed to get current directory")?;
                load_config(global_config_path().as_deref(), &project_config_path(&cwd))
            }
        };

        config.resolver.merge(ResolverSettings {
            sdk_root: location.sdk_root.clone(),
            version_band: location.band.clone(),
            host_dir: location.host_dir.clone(),
            host_rid: location.rid.clone(),
        });
        tracing::debug!("effective settings: {:?}", config.resolver);

        Ok(Session {
            resolver: WorkloadSdkResolver::from_settings(&config.resolver),
            settings: config.resolver,
            project: location.project.clone(),
            color,
        })
    }

    /// A request for `name`, carrying the project path if one was given.
    pub fn request(&self, name: &str) -> ResolutionRequest {
        let request = ResolutionRequest::new(name);
        match &self.project {
            Some(project) => request.with_project_path(project.clone()),
            None => request,
        }
    }

    /// The index the session's requests resolve against.
    pub fn index(&self) -> Result<Arc<ManifestIndex>> {
        Ok(self.resolver.index_for(&self.request(""))?)
    }
}
