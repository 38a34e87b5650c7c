//! Logging setup shared by the storefront binaries and tests.

pub mod tracing;
