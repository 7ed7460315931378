//! Build-variant resolution
//!
//! Single-shot, stateless lookup: a requested build type plus the declared
//! catalog yields a [`ResolvedBuildPlan`] or a terminal configuration
//! error. Nothing here retries and nothing is cached; every error means
//! the configuration itself must be fixed.

use crate::model::VariantCatalog;
use crate::plan::ResolvedBuildPlan;
use apkforge_core::error::{exit_codes, Error, ErrorCode};
use thiserror::Error as ThisError;

/// Errors produced by variant resolution.
///
/// All are terminal configuration defects, surfaced immediately and never
/// recovered locally.
#[derive(ThisError, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The requested build type is not declared
    #[error("Unknown build type: {name} (declared: {available})")]
    UnknownBuildType {
        /// Requested name
        name: String,
        /// Comma-separated declared names
        available: String,
    },

    /// A build type references a signing alias that does not exist
    #[error("Build type '{build_type}' references unknown signing config: {alias}")]
    UnknownSigningAlias {
        /// Build type holding the dangling reference
        build_type: String,
        /// The missing alias
        alias: String,
    },

    /// The SDK version set violates `min <= target <= compile`
    #[error("Invalid SDK range: min {min}, target {target}, compile {compile} (min <= target <= compile must hold)")]
    InvalidSdkRange {
        /// Declared minimum SDK
        min: u32,
        /// Declared target SDK
        target: u32,
        /// Declared compile SDK
        compile: u32,
    },

    /// A referenced signing identity has empty required fields
    #[error("Signing config '{alias}' is incomplete: missing {fields}")]
    IncompleteSigningIdentity {
        /// Alias of the broken identity
        alias: String,
        /// Comma-separated missing field names
        fields: String,
    },
}

impl ResolveError {
    /// CLI exit code for this error class
    pub fn exit_code(&self) -> i32 {
        match self {
            ResolveError::InvalidSdkRange { .. }
            | ResolveError::IncompleteSigningIdentity { .. } => exit_codes::VALIDATION_ERROR,
            _ => exit_codes::RESOLVE_ERROR,
        }
    }
}

impl From<ResolveError> for Error {
    fn from(err: ResolveError) -> Self {
        let (code, suggestion) = match &err {
            ResolveError::UnknownBuildType { .. } => (
                ErrorCode::UnknownBuildType,
                "Declare the build type under [build_types] in the configuration".to_string(),
            ),
            ResolveError::UnknownSigningAlias { alias, .. } => (
                ErrorCode::UnknownSigningAlias,
                format!(
                    "Declare [signing.{}] or point signing_config at a declared alias",
                    alias
                ),
            ),
            ResolveError::InvalidSdkRange { .. } => (
                ErrorCode::InvalidSdkRange,
                "Adjust [sdk] so that min <= target <= compile".to_string(),
            ),
            ResolveError::IncompleteSigningIdentity { .. } => (
                ErrorCode::IncompleteSigningIdentity,
                "Fill in store_file, store_password and key_password for the signing config"
                    .to_string(),
            ),
        };
        Error::new(code, err.to_string()).with_suggestion(suggestion)
    }
}

/// Resolve a build type name against the catalog.
///
/// Pure function over the supplied configuration: identical inputs always
/// yield identical plans.
pub fn resolve(
    build_type_name: &str,
    catalog: &VariantCatalog,
) -> Result<ResolvedBuildPlan, ResolveError> {
    let build_type = catalog
        .build_type(build_type_name)
        .ok_or_else(|| ResolveError::UnknownBuildType {
            name: build_type_name.to_string(),
            available: catalog.build_type_names().join(", "),
        })?;

    if !catalog.sdk.range_is_valid() {
        return Err(ResolveError::InvalidSdkRange {
            min: catalog.sdk.min_sdk,
            target: catalog.sdk.target_sdk,
            compile: catalog.sdk.compile_sdk,
        });
    }

    let signing = match &build_type.signing_config {
        Some(alias) => {
            let identity =
                catalog
                    .identity(alias)
                    .ok_or_else(|| ResolveError::UnknownSigningAlias {
                        build_type: build_type.name.clone(),
                        alias: alias.clone(),
                    })?;

            if !identity.is_complete() {
                return Err(ResolveError::IncompleteSigningIdentity {
                    alias: alias.clone(),
                    fields: identity.missing_fields().join(", "),
                });
            }

            Some(identity.clone())
        }
        None => None,
    };

    Ok(ResolvedBuildPlan {
        project: catalog.project.clone(),
        build_type: build_type.clone(),
        signing,
        sdk: catalog.sdk.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        BuildTypeSpec, ProjectInfo, SdkVersionSet, SigningIdentity, VariantCatalog,
    };
    use std::collections::BTreeMap;
    use std::path::PathBuf;

    fn sdk(compile: u32, min: u32, target: u32) -> SdkVersionSet {
        SdkVersionSet {
            compile_sdk: compile,
            min_sdk: min,
            target_sdk: target,
            version_code: 1,
            version_name: "1.0.0".to_string(),
        }
    }

    fn upload_identity() -> SigningIdentity {
        SigningIdentity {
            alias: "upload".to_string(),
            store_path: PathBuf::from("upload-keystore.jks"),
            store_password: "secret".to_string(),
            key_password: "secret".to_string(),
        }
    }

    fn catalog(signing_ref: Option<&str>, identities: Vec<SigningIdentity>) -> VariantCatalog {
        let mut build_types = BTreeMap::new();
        build_types.insert(
            "debug".to_string(),
            BuildTypeSpec {
                name: "debug".to_string(),
                signing_config: None,
                minify_enabled: false,
                shrink_resources: false,
                debuggable: true,
            },
        );
        build_types.insert(
            "release".to_string(),
            BuildTypeSpec {
                name: "release".to_string(),
                signing_config: signing_ref.map(String::from),
                minify_enabled: false,
                shrink_resources: false,
                debuggable: false,
            },
        );

        VariantCatalog {
            project: ProjectInfo {
                namespace: "com.example.app".to_string(),
                application_id: "com.example.app".to_string(),
                ndk_version: None,
                java_version: 11,
            },
            sdk: sdk(34, 21, 34),
            identities: identities.into_iter().map(|i| (i.alias.clone(), i)).collect(),
            build_types,
        }
    }

    #[test]
    fn test_release_resolves_with_upload_identity() {
        let catalog = catalog(Some("upload"), vec![upload_identity()]);
        let plan = resolve("release", &catalog).unwrap();

        assert_eq!(plan.signing.as_ref().unwrap().alias, "upload");
        assert_eq!(plan.build_type.name, "release");
    }

    #[test]
    fn test_debug_resolves_unsigned() {
        let catalog = catalog(Some("upload"), vec![upload_identity()]);
        let plan = resolve("debug", &catalog).unwrap();

        assert!(plan.signing.is_none());
        assert!(plan.build_type.debuggable);
    }

    #[test]
    fn test_unknown_build_type() {
        let catalog = catalog(None, vec![]);
        let err = resolve("nightly", &catalog).unwrap_err();

        match &err {
            ResolveError::UnknownBuildType { name, available } => {
                assert_eq!(name, "nightly");
                assert!(available.contains("release"));
            }
            other => panic!("expected UnknownBuildType, got {:?}", other),
        }
        assert_eq!(err.exit_code(), exit_codes::RESOLVE_ERROR);
    }

    #[test]
    fn test_unknown_signing_alias() {
        let catalog = catalog(Some("missing"), vec![upload_identity()]);
        let err = resolve("release", &catalog).unwrap_err();

        assert_eq!(
            err,
            ResolveError::UnknownSigningAlias {
                build_type: "release".to_string(),
                alias: "missing".to_string(),
            }
        );
    }

    #[test]
    fn test_invalid_sdk_range() {
        let mut bad = catalog(None, vec![]);
        bad.sdk = sdk(30, 21, 34);
        let err = resolve("release", &bad).unwrap_err();

        assert_eq!(
            err,
            ResolveError::InvalidSdkRange {
                min: 21,
                target: 34,
                compile: 30,
            }
        );
        assert_eq!(err.exit_code(), exit_codes::VALIDATION_ERROR);
    }

    #[test]
    fn test_incomplete_identity() {
        let mut identity = upload_identity();
        identity.key_password.clear();
        let catalog = catalog(Some("upload"), vec![identity]);

        let err = resolve("release", &catalog).unwrap_err();
        match err {
            ResolveError::IncompleteSigningIdentity { alias, fields } => {
                assert_eq!(alias, "upload");
                assert!(fields.contains("key_password"));
            }
            other => panic!("expected IncompleteSigningIdentity, got {:?}", other),
        }
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let catalog = catalog(Some("upload"), vec![upload_identity()]);
        let first = resolve("release", &catalog).unwrap();
        let second = resolve("release", &catalog).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_error_converts_to_core_error() {
        let err: apkforge_core::Error = ResolveError::UnknownBuildType {
            name: "nightly".to_string(),
            available: "debug, release".to_string(),
        }
        .into();

        assert_eq!(err.code, ErrorCode::UnknownBuildType);
        assert!(err.suggestion.is_some());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            // resolve succeeds iff min <= target <= compile
            #[test]
            fn sdk_range_gates_resolution(compile in 1u32..50, min in 1u32..50, target in 1u32..50) {
                let mut c = catalog(None, vec![]);
                c.sdk = sdk(compile, min, target);

                let outcome = resolve("release", &c);
                if min <= target && target <= compile {
                    prop_assert!(outcome.is_ok());
                } else {
                    prop_assert_eq!(
                        outcome.unwrap_err(),
                        ResolveError::InvalidSdkRange { min, target, compile }
                    );
                }
            }

            // a resolved signing alias always exists in the identity map
            #[test]
            fn resolved_alias_is_declared(use_signing in any::<bool>()) {
                let c = catalog(
                    if use_signing { Some("upload") } else { None },
                    vec![upload_identity()],
                );
                let plan = resolve("release", &c).unwrap();
                if let Some(identity) = plan.signing {
                    prop_assert!(c.identity(&identity.alias).is_some());
                }
            }
        }
    }
}
