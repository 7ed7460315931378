//! Build-variant resolution for Android application projects
//!
//! Given a declared configuration (build types, signing identities, SDK
//! version set), this crate resolves a requested build type into a
//! [`plan::ResolvedBuildPlan`] and hands it to an injected
//! [`executor::BuildExecutor`]:
//!
//! - [`model`] — immutable domain values built from the configuration
//! - [`resolver`] — the single-shot resolution lookup and its errors
//! - [`plan`] — the resolved output and its Gradle task mapping
//! - [`executor`] — the build-execution capability (Gradle wrapper)
//! - [`verify`] — whole-configuration validation
//! - [`keystore`] — keystore existence and fingerprint checks

#![warn(missing_docs)]

pub mod executor;
pub mod keystore;
pub mod model;
pub mod plan;
pub mod resolver;
pub mod verify;

pub use model::{BuildTypeSpec, ProjectInfo, SdkVersionSet, SigningIdentity, VariantCatalog};
pub use plan::{ArtifactKind, ResolvedBuildPlan};
pub use resolver::{resolve, ResolveError};
