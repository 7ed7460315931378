//! Whole-configuration verification
//!
//! Unlike resolution, which stops at the first defect, verification walks
//! the entire configuration and reports every error and warning at once.

use crate::model::{is_env_reference, SigningIdentity};
use crate::keystore;
use apkforge_core::config::ConfigSchema;
use apkforge_core::validation::{ValidationError, ValidationResult, Validator};
use std::collections::BTreeSet;
use std::path::Path;

/// Verify a loaded configuration schema.
///
/// `project_dir` anchors relative keystore paths. With `deep`, a missing
/// or unreadable keystore is an error instead of a warning.
pub fn verify_schema(schema: &ConfigSchema, project_dir: &Path, deep: bool) -> ValidationResult {
    let mut result = Validator::new()
        .package_name("project.namespace", &schema.project.namespace)
        .package_name("project.application_id", &schema.project.application_id)
        .min_value("sdk.version_code", u64::from(schema.sdk.version_code), 1)
        .required("sdk.version_name", &schema.sdk.version_name)
        .ordered(
            "sdk.min",
            u64::from(schema.sdk.min),
            u64::from(schema.sdk.target),
            "min SDK must not exceed target SDK",
        )
        .ordered(
            "sdk.target",
            u64::from(schema.sdk.target),
            u64::from(schema.sdk.compile),
            "target SDK must not exceed compile SDK",
        )
        .validate();

    let mut referenced = BTreeSet::new();

    for (name, build_type) in &schema.build_types {
        let Some(alias) = &build_type.signing_config else {
            continue;
        };
        referenced.insert(alias.clone());

        let Some(signing) = schema.signing.get(alias) else {
            result.add_error(ValidationError {
                field: format!("build_types.{}.signing_config", name),
                message: format!("References undeclared signing config '{}'", alias),
                code: "UNKNOWN_ALIAS".to_string(),
                expected: Some(declared_aliases(schema)),
                actual: Some(alias.clone()),
            });
            continue;
        };

        let identity = SigningIdentity::from_config(alias, signing);
        for field in identity.missing_fields() {
            result.add_error(ValidationError {
                field: format!("signing.{}.{}", alias, field),
                message: "Field is required for a referenced signing config".to_string(),
                code: "REQUIRED".to_string(),
                expected: Some("non-empty value".to_string()),
                actual: Some("empty".to_string()),
            });
        }

        for (field, raw) in [
            ("store_password", &signing.store_password),
            ("key_password", &signing.key_password),
        ] {
            if !raw.is_empty() && !is_env_reference(raw) {
                result.add_warning(ValidationError {
                    field: format!("signing.{}.{}", alias, field),
                    message: "Stored as inline plaintext; use ${VAR} to read it from the environment"
                        .to_string(),
                    code: "INLINE_SECRET".to_string(),
                    expected: None,
                    actual: None,
                });
            }
        }

        check_keystore(&mut result, &identity, project_dir, deep);
    }

    for alias in schema.signing.keys() {
        if !referenced.contains(alias) {
            result.add_warning(ValidationError {
                field: format!("signing.{}", alias),
                message: "Declared but not referenced by any build type".to_string(),
                code: "UNREFERENCED".to_string(),
                expected: None,
                actual: None,
            });
        }
    }

    result
}

fn check_keystore(
    result: &mut ValidationResult,
    identity: &SigningIdentity,
    project_dir: &Path,
    deep: bool,
) {
    if identity.store_path.as_os_str().is_empty() {
        // Already reported as a missing field
        return;
    }

    let path = if identity.store_path.is_absolute() {
        identity.store_path.clone()
    } else {
        project_dir.join(&identity.store_path)
    };

    match keystore::inspect(&path) {
        Ok(_) => {}
        Err(e) => {
            let error = ValidationError {
                field: format!("signing.{}.store_file", identity.alias),
                message: e.message.clone(),
                code: "KEYSTORE".to_string(),
                expected: Some(path.display().to_string()),
                actual: Some("missing or unreadable".to_string()),
            };
            if deep {
                result.add_error(error);
            } else {
                result.add_warning(error);
            }
        }
    }
}

fn declared_aliases(schema: &ConfigSchema) -> String {
    if schema.signing.is_empty() {
        "no signing configs declared".to_string()
    } else {
        schema.signing.keys().cloned().collect::<Vec<_>>().join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn schema_from(toml: &str) -> ConfigSchema {
        let mut schema: ConfigSchema = toml::from_str(toml).unwrap();
        schema.ensure_default_build_types();
        schema
    }

    #[test]
    fn test_default_schema_verifies() {
        let schema = schema_from("");
        let result = verify_schema(&schema, Path::new("."), false);
        assert!(result.is_valid());
    }

    #[test]
    fn test_bad_sdk_ordering_is_reported() {
        let schema = schema_from("[sdk]\ncompile = 30\nmin = 21\ntarget = 34");
        let result = verify_schema(&schema, Path::new("."), false);

        assert!(!result.is_valid());
        assert!(result.errors().iter().any(|e| e.field == "sdk.target"));
    }

    #[test]
    fn test_dangling_signing_reference() {
        let schema = schema_from(
            r#"
            [build_types.release]
            signing_config = "missing"
            "#,
        );
        let result = verify_schema(&schema, Path::new("."), false);

        let error = &result.errors()[0];
        assert_eq!(error.code, "UNKNOWN_ALIAS");
        assert_eq!(error.field, "build_types.release.signing_config");
    }

    #[test]
    fn test_incomplete_referenced_identity() {
        let schema = schema_from(
            r#"
            [signing.upload]
            store_file = "upload-keystore.jks"

            [build_types.release]
            signing_config = "upload"
            "#,
        );
        let result = verify_schema(&schema, Path::new("."), false);

        let fields: Vec<&str> = result.errors().iter().map(|e| e.field.as_str()).collect();
        assert!(fields.contains(&"signing.upload.store_password"));
        assert!(fields.contains(&"signing.upload.key_password"));
    }

    #[test]
    fn test_inline_secrets_warn_but_pass() {
        let dir = tempfile::tempdir().unwrap();
        let ks = dir.path().join("upload-keystore.jks");
        let mut file = std::fs::File::create(&ks).unwrap();
        file.write_all(b"jks").unwrap();

        let schema = schema_from(
            r#"
            [signing.upload]
            store_file = "upload-keystore.jks"
            store_password = "hunter2"
            key_password = "${UPLOAD_KEY_PASS}"

            [build_types.release]
            signing_config = "upload"
            "#,
        );
        // key_password is an env reference that expands to nothing here, so
        // the identity is incomplete; only the store_password warns inline.
        let result = verify_schema(&schema, dir.path(), false);
        let inline: Vec<&ValidationError> = result
            .warnings()
            .iter()
            .filter(|w| w.code == "INLINE_SECRET")
            .collect();

        assert_eq!(inline.len(), 1);
        assert_eq!(inline[0].field, "signing.upload.store_password");
    }

    #[test]
    fn test_missing_keystore_warns_shallow_errors_deep() {
        let schema = schema_from(
            r#"
            [signing.upload]
            store_file = "does-not-exist.jks"
            store_password = "pw"
            key_password = "pw"

            [build_types.release]
            signing_config = "upload"
            "#,
        );

        let shallow = verify_schema(&schema, Path::new("/tmp"), false);
        assert!(shallow.is_valid());
        assert!(shallow.warnings().iter().any(|w| w.code == "KEYSTORE"));

        let deep = verify_schema(&schema, Path::new("/tmp"), true);
        assert!(!deep.is_valid());
        assert!(deep.errors().iter().any(|e| e.code == "KEYSTORE"));
    }

    #[test]
    fn test_unreferenced_identity_warns() {
        let schema = schema_from(
            r#"
            [signing.legacy]
            store_file = "legacy.jks"
            store_password = "pw"
            key_password = "pw"
            "#,
        );
        let result = verify_schema(&schema, Path::new("."), false);

        assert!(result.is_valid());
        assert!(result
            .warnings()
            .iter()
            .any(|w| w.code == "UNREFERENCED" && w.field == "signing.legacy"));
    }
}
