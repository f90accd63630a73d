//! Workspace façade crate.
//!
//! Host applications depend on `courier-workspace` and pick bridges through
//! feature flags instead of wiring `core-service`, `core-runtime` and the
//! desktop adapters individually. With the default `desktop-shims` feature
//! the whole dispatcher API is re-exported from `core-service`.

#[cfg(feature = "desktop-shims")]
pub use core_service::*;
