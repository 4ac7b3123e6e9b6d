//! Resolution error types and diagnostics.
//!
//! Only load-time failures are errors. Unknown references and missing packs
//! are ordinary outcomes.

use thiserror::Error;

use crate::core::manifest::ManifestError;
use crate::locator::LocatorError;
use crate::util::diagnostic::{suggestions, Diagnostic};

/// A resolution context could not be set up.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error(transparent)]
    Locator(#[from] LocatorError),

    #[error(transparent)]
    Manifest(#[from] ManifestError),
}

impl ResolveError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ResolveError::Locator(LocatorError::NotFound) => {
                Diagnostic::error("could not determine which SDK to resolve workloads from")
                    .with_context("no SDK is pinned and the host toolset location is unknown")
                    .with_suggestion(suggestions::NO_SDK_LOCATION)
            }

            ResolveError::Locator(LocatorError::IncompletePin { pinned, missing }) => {
                Diagnostic::error(format!("SDK pin `{}` is incomplete", pinned))
                    .with_context(format!("no {} could be determined for it", missing))
                    .with_suggestion(suggestions::INCOMPLETE_PIN)
            }

            ResolveError::Locator(LocatorError::InvalidPinFile { path, message }) => {
                Diagnostic::error("invalid SDK pin file")
                    .with_location(path)
                    .with_context(message.clone())
                    .with_suggestion(suggestions::INVALID_PIN_FILE)
            }

            ResolveError::Manifest(ManifestError::Parse { path, message }) => {
                Diagnostic::error("installed workload manifest is malformed")
                    .with_location(path)
                    .with_context(message.clone())
                    .with_suggestion(suggestions::REPAIR_INSTALL)
            }

            ResolveError::Manifest(ManifestError::Conflict {
                id,
                first,
                second,
                detail,
            }) => Diagnostic::error(format!("installed manifests disagree about `{}`", id))
                .with_context(format!("declared by `{}` and `{}`", first, second))
                .with_context(detail.clone())
                .with_suggestion(suggestions::REPAIR_INSTALL),

            ResolveError::Locator(LocatorError::Io { path, source })
            | ResolveError::Manifest(ManifestError::Io { path, source }) => {
                Diagnostic::error(format!("failed to read {}", path.display()))
                    .with_context(source.to_string())
            }
        }
    }
}
