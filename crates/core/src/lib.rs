//! Core utilities for the apkforge Android build tools
//!
//! This crate provides shared functionality used by the variant resolver
//! and the CLI:
//!
//! - **Error handling**: Enterprise-grade errors with codes, context, and recovery suggestions
//! - **Configuration**: TOML-based build configuration with validation
//! - **Process execution**: Safe command execution with output capture
//! - **Health checks**: Verify the Android build environment
//!
//! # Example
//!
//! ```rust,no_run
//! use apkforge_core::config::Config;
//! use apkforge_core::health::HealthChecker;
//!
//! // Check environment health
//! let report = HealthChecker::new()
//!     .with_android_checks()
//!     .run();
//!
//! if !report.is_healthy() {
//!     eprintln!("Environment issues detected!");
//! }
//!
//! // Load the project build configuration
//! let config = Config::load(None).expect("Failed to load configuration");
//! println!("{} build types", config.schema.build_types.len());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod error;
pub mod health;
pub mod process;
pub mod validation;

pub use error::{Error, ErrorCode, Result, ResultExt};

/// Re-export commonly used types
pub mod prelude {
    pub use crate::config::{Config, ConfigSchema};
    pub use crate::error::{exit_codes, Error, ErrorCode, Result, ResultExt};
    pub use crate::health::{HealthChecker, HealthReport, HealthStatus};
    pub use crate::process::CommandResult;
    pub use crate::validation::{ValidationResult, Validator};
}
