//! High-level operations.
//!
//! These functions implement the main resolver commands.

pub mod workload_resolve;

pub use workload_resolve::{
    missing_pack_diagnostics, WorkloadSdkResolver, RESOLVER_NAME, RESOLVER_PRIORITY,
};
