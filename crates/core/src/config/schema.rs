//! Configuration schema definitions
//!
//! Declarative build configuration for an Android application project:
//! project metadata, SDK version set, signing configs, and build types.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Root configuration schema
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigSchema {
    #[serde(default)]
    pub project: ProjectConfig,

    #[serde(default)]
    pub sdk: SdkConfig,

    /// Signing configs keyed by alias
    #[serde(default)]
    pub signing: BTreeMap<String, SigningConfig>,

    /// Build types keyed by name
    #[serde(default)]
    pub build_types: BTreeMap<String, BuildTypeConfig>,
}

impl ConfigSchema {
    /// Ensure the `debug` and `release` build types exist.
    ///
    /// A configuration file may override either, but both are always
    /// declared: `debug` is debuggable and unsigned, `release` is neither
    /// unless the file says otherwise.
    pub fn ensure_default_build_types(&mut self) {
        self.build_types
            .entry("debug".to_string())
            .or_insert_with(BuildTypeConfig::debug_defaults);
        self.build_types
            .entry("release".to_string())
            .or_insert_with(BuildTypeConfig::default);
    }
}

/// Project identity and toolchain metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectConfig {
    /// Android namespace (package for generated R classes)
    #[serde(default = "default_namespace")]
    pub namespace: String,

    /// Application ID as shipped to the store
    #[serde(default = "default_namespace")]
    pub application_id: String,

    /// Pinned NDK version, if the project builds native code
    #[serde(default)]
    pub ndk_version: Option<String>,

    /// Java source/target compatibility level
    #[serde(default = "default_java_version")]
    pub java_version: u32,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            application_id: default_namespace(),
            ndk_version: None,
            java_version: default_java_version(),
        }
    }
}

fn default_namespace() -> String {
    "com.example.app".to_string()
}

fn default_java_version() -> u32 {
    11
}

/// SDK version set
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SdkConfig {
    /// SDK the project is compiled against
    #[serde(default = "default_compile_sdk")]
    pub compile: u32,

    /// Lowest supported device SDK
    #[serde(default = "default_min_sdk")]
    pub min: u32,

    /// SDK the project targets at runtime
    #[serde(default = "default_compile_sdk")]
    pub target: u32,

    /// Monotonic store version code
    #[serde(default = "default_version_code")]
    pub version_code: u32,

    /// Human-readable version string
    #[serde(default = "default_version_name")]
    pub version_name: String,
}

impl Default for SdkConfig {
    fn default() -> Self {
        Self {
            compile: default_compile_sdk(),
            min: default_min_sdk(),
            target: default_compile_sdk(),
            version_code: default_version_code(),
            version_name: default_version_name(),
        }
    }
}

fn default_compile_sdk() -> u32 {
    34
}

fn default_min_sdk() -> u32 {
    21
}

fn default_version_code() -> u32 {
    1
}

fn default_version_name() -> String {
    "1.0.0".to_string()
}

/// A named signing config (keystore plus credentials)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SigningConfig {
    /// Path to the keystore file, relative to the project root
    #[serde(default)]
    pub store_file: String,

    /// Keystore password
    #[serde(default)]
    pub store_password: String,

    /// Password for the key inside the keystore
    #[serde(default)]
    pub key_password: String,
}

/// A named build type
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct BuildTypeConfig {
    /// Alias of the signing config to sign with, if any
    #[serde(default)]
    pub signing_config: Option<String>,

    /// Enable code shrinking (R8)
    #[serde(default)]
    pub minify: bool,

    /// Strip unused resources (only meaningful with minify)
    #[serde(default)]
    pub shrink_resources: bool,

    /// Build a debuggable artifact
    #[serde(default)]
    pub debuggable: bool,
}

impl BuildTypeConfig {
    fn debug_defaults() -> Self {
        Self {
            debuggable: true,
            ..Self::default()
        }
    }
}
