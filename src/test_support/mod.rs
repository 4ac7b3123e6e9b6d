//! Test utilities for unit tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use workload_resolver::test_support::SdkFixture;
//!
//! #[test]
//! fn test_example() {
//!     let fixture = SdkFixture::new("6.0.100")
//!         .manifest("wasm", &[("wasm-tools", "sdk", "6.0.100")], &[])
//!         .install_pack("wasm-tools", "6.0.100");
//!     let index = fixture.index();
//!     // Resolve against index...
//! }
//! ```

pub mod fixtures;

pub use fixtures::*;
