//! # Core Runtime Module
//!
//! Provides foundational runtime infrastructure for the request dispatcher:
//! - Logging and tracing infrastructure
//! - Configuration management with fail-fast bridge validation
//!
//! ## Overview
//!
//! This crate contains the runtime utilities that other modules depend on.
//! It establishes the logging conventions and the `CoreConfig` builder used
//! to inject platform bridges into the core.

pub mod config;
pub mod error;
pub mod logging;

pub use config::{CoreConfig, CoreConfigBuilder, DispatchMessages};
pub use error::{Error, Result};
