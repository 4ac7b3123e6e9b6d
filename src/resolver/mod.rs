//! Reference resolution.
//!
//! The resolver core decides between the auto-import aggregate query, a
//! direct pack lookup and "not handled". It performs existence checks only;
//! all manifest I/O happens before resolution, when the index is built.

pub mod errors;
pub mod outcome;
pub mod resolve;

pub use errors::ResolveError;
pub use outcome::{
    MissingPack, ResolutionOutcome, ResultBuilder, ResultItem, SdkResult,
    MISSING_WORKLOAD_PACK_ITEM, VERSION_METADATA,
};
pub use resolve::{resolve, ResolutionRequest, AUTO_IMPORT_LOCATOR_NAME, AUTO_IMPORT_MARKER};
