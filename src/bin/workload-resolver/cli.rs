//! CLI definitions using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// workload-resolver - Resolve SDK references against installed workload packs
#[derive(Parser)]
#[command(name = "workload-resolver")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Read configuration from this file instead of the default locations
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(flatten)]
    pub location: LocationArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Flags that override where and for which platform resolution happens.
#[derive(Args, Debug, Clone, Default)]
pub struct LocationArgs {
    /// SDK root containing sdk-manifests/ and packs/
    #[arg(long, global = true, env = "WORKLOAD_RESOLVER_SDK_ROOT", value_name = "DIR")]
    pub sdk_root: Option<PathBuf>,

    /// SDK version band to read manifests for
    #[arg(long, global = true, value_name = "BAND")]
    pub band: Option<String>,

    /// Host toolset directory (<root>/sdk/<band>)
    #[arg(long, global = true, value_name = "DIR")]
    pub host_dir: Option<PathBuf>,

    /// Project or solution path used to find a global.json pin
    #[arg(long, global = true, value_name = "PATH")]
    pub project: Option<PathBuf>,

    /// Runtime identifier used to pick platform-specific packs
    #[arg(long, global = true, value_name = "RID")]
    pub rid: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Resolve an SDK reference
    Resolve(ResolveArgs),

    /// List the workload packs known to the installed manifests
    Packs(PacksArgs),

    /// List workloads and the packs they install
    Workloads(WorkloadsArgs),

    /// Show the SDK root and version band resolution runs against
    Locate,
}

#[derive(Args)]
pub struct ResolveArgs {
    /// Reference name (a pack id, or the auto-import locator name)
    pub name: String,

    /// Requested version (advisory)
    #[arg(long)]
    pub version: Option<String>,

    /// Print the outcome as JSON
    #[arg(long)]
    pub json: bool,

    /// Fail instead of warning when the pack is not installed
    #[arg(long)]
    pub deny_missing: bool,
}

#[derive(Args)]
pub struct PacksArgs {
    /// Only list packs of this kind (sdk, framework, template, tool, library)
    #[arg(long)]
    pub kind: Option<String>,

    /// Print the list as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct WorkloadsArgs {
    /// Print the list as JSON
    #[arg(long)]
    pub json: bool,
}
