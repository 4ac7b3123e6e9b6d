//! Manifest sources.
//!
//! Providers discover and parse the manifests installed for an SDK root;
//! the cache keeps the resulting indexes alive for the whole process.

pub mod cache;
pub mod provider;

pub use cache::IndexCache;
pub use provider::{ManifestProvider, SdkDirectoryProvider, SDK_MANIFESTS_DIR};
