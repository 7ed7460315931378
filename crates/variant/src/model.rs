//! Domain model for build-variant resolution
//!
//! Immutable values built once from the loaded configuration: signing
//! identities, build types, the SDK version set, and project metadata.

use apkforge_core::config::{
    BuildTypeConfig, ConfigSchema, ProjectConfig, SdkConfig, SigningConfig,
};
use serde::{Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;
use std::path::PathBuf;

fn redact_secret<S: Serializer>(_value: &str, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str("<redacted>")
}

/// Returns true for values of the form `${VAR}`, which are resolved from
/// the environment instead of being stored inline.
pub fn is_env_reference(value: &str) -> bool {
    value.starts_with("${") && value.ends_with('}')
}

fn expand_secret(value: &str) -> String {
    if is_env_reference(value) {
        // An unset variable yields an empty secret, which resolution then
        // reports as an incomplete identity.
        shellexpand::env(value)
            .map(|v| v.into_owned())
            .unwrap_or_default()
    } else {
        value.to_string()
    }
}

/// A signing identity: the credential bundle used to sign an artifact
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct SigningIdentity {
    /// Alias the identity is referenced by
    pub alias: String,
    /// Path to the keystore file (tilde and env expanded)
    pub store_path: PathBuf,
    /// Keystore password
    #[serde(serialize_with = "redact_secret")]
    pub store_password: String,
    /// Key password
    #[serde(serialize_with = "redact_secret")]
    pub key_password: String,
}

impl SigningIdentity {
    /// Build an identity from its configuration entry
    pub fn from_config(alias: &str, config: &SigningConfig) -> Self {
        let store_path = shellexpand::full(&config.store_file)
            .map(|p| PathBuf::from(p.into_owned()))
            .unwrap_or_else(|_| PathBuf::from(&config.store_file));

        Self {
            alias: alias.to_string(),
            store_path,
            store_password: expand_secret(&config.store_password),
            key_password: expand_secret(&config.key_password),
        }
    }

    /// All four fields must be non-empty for the identity to be usable
    pub fn is_complete(&self) -> bool {
        !self.alias.is_empty()
            && !self.store_path.as_os_str().is_empty()
            && !self.store_password.is_empty()
            && !self.key_password.is_empty()
    }

    /// Names of the fields that are still empty
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.alias.is_empty() {
            missing.push("alias");
        }
        if self.store_path.as_os_str().is_empty() {
            missing.push("store_file");
        }
        if self.store_password.is_empty() {
            missing.push("store_password");
        }
        if self.key_password.is_empty() {
            missing.push("key_password");
        }
        missing
    }
}

// Passwords never appear in debug output or logs.
impl fmt::Debug for SigningIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SigningIdentity")
            .field("alias", &self.alias)
            .field("store_path", &self.store_path)
            .field("store_password", &"<redacted>")
            .field("key_password", &"<redacted>")
            .finish()
    }
}

/// A named compilation profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BuildTypeSpec {
    /// Build type name (debug, release, or custom)
    pub name: String,
    /// Alias of the signing identity to sign with, if any
    pub signing_config: Option<String>,
    /// Enable code shrinking
    pub minify_enabled: bool,
    /// Strip unused resources
    pub shrink_resources: bool,
    /// Build a debuggable artifact
    pub debuggable: bool,
}

impl BuildTypeSpec {
    /// Build a spec from its configuration entry
    pub fn from_config(name: &str, config: &BuildTypeConfig) -> Self {
        Self {
            name: name.to_string(),
            signing_config: config.signing_config.clone(),
            minify_enabled: config.minify,
            shrink_resources: config.shrink_resources,
            debuggable: config.debuggable,
        }
    }
}

/// Compiler and runtime target bounds for the build
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SdkVersionSet {
    /// SDK the project is compiled against
    pub compile_sdk: u32,
    /// Lowest supported device SDK
    pub min_sdk: u32,
    /// SDK the project targets at runtime
    pub target_sdk: u32,
    /// Monotonic store version code
    pub version_code: u32,
    /// Human-readable version string
    pub version_name: String,
}

impl SdkVersionSet {
    /// Build a version set from its configuration entry
    pub fn from_config(config: &SdkConfig) -> Self {
        Self {
            compile_sdk: config.compile,
            min_sdk: config.min,
            target_sdk: config.target,
            version_code: config.version_code,
            version_name: config.version_name.clone(),
        }
    }

    /// `min_sdk <= target_sdk <= compile_sdk`
    pub fn range_is_valid(&self) -> bool {
        self.min_sdk <= self.target_sdk && self.target_sdk <= self.compile_sdk
    }
}

/// Project identity carried through to the resolved plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectInfo {
    /// Android namespace
    pub namespace: String,
    /// Application ID as shipped to the store
    pub application_id: String,
    /// Pinned NDK version, if any
    pub ndk_version: Option<String>,
    /// Java source/target compatibility level
    pub java_version: u32,
}

impl ProjectInfo {
    /// Build project info from its configuration entry
    pub fn from_config(config: &ProjectConfig) -> Self {
        Self {
            namespace: config.namespace.clone(),
            application_id: config.application_id.clone(),
            ndk_version: config.ndk_version.clone(),
            java_version: config.java_version,
        }
    }
}

/// The full set of declared variants: everything resolution reads.
///
/// Built once from the loaded configuration, read-only afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct VariantCatalog {
    /// Project metadata
    pub project: ProjectInfo,
    /// SDK version set shared by all build types
    pub sdk: SdkVersionSet,
    /// Signing identities keyed by alias
    pub identities: BTreeMap<String, SigningIdentity>,
    /// Build types keyed by name
    pub build_types: BTreeMap<String, BuildTypeSpec>,
}

impl VariantCatalog {
    /// Build the catalog from a loaded configuration schema
    pub fn from_schema(schema: &ConfigSchema) -> Self {
        let identities = schema
            .signing
            .iter()
            .map(|(alias, cfg)| (alias.clone(), SigningIdentity::from_config(alias, cfg)))
            .collect();

        let build_types = schema
            .build_types
            .iter()
            .map(|(name, cfg)| (name.clone(), BuildTypeSpec::from_config(name, cfg)))
            .collect();

        Self {
            project: ProjectInfo::from_config(&schema.project),
            sdk: SdkVersionSet::from_config(&schema.sdk),
            identities,
            build_types,
        }
    }

    /// Look up a signing identity by alias
    pub fn identity(&self, alias: &str) -> Option<&SigningIdentity> {
        self.identities.get(alias)
    }

    /// Look up a build type by name
    pub fn build_type(&self, name: &str) -> Option<&BuildTypeSpec> {
        self.build_types.get(name)
    }

    /// Names of all declared build types
    pub fn build_type_names(&self) -> Vec<&str> {
        self.build_types.keys().map(String::as_str).collect()
    }
}
