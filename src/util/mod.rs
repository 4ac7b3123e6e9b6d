//! Shared utilities

pub mod case_map;
pub mod config;
pub mod diagnostic;

pub use case_map::CaseInsensitiveMap;
pub use config::Config;
pub use diagnostic::Diagnostic;
