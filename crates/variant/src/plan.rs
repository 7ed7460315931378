//! The resolved build plan
//!
//! Output of resolution: one build type, its signing identity (or none),
//! the SDK version set, and project metadata. Constructed per invocation
//! and handed to a [`crate::executor::BuildExecutor`]; never retained.

use crate::model::{BuildTypeSpec, ProjectInfo, SdkVersionSet, SigningIdentity};
use serde::Serialize;

/// Artifact kind a plan can be built into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtifactKind {
    /// Installable APK
    Apk,
    /// App bundle (AAB) for store upload
    Bundle,
}

impl ArtifactKind {
    fn task_prefix(self) -> &'static str {
        match self {
            ArtifactKind::Apk => "assemble",
            ArtifactKind::Bundle => "bundle",
        }
    }
}

/// A fully resolved build plan
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedBuildPlan {
    /// Project metadata
    pub project: ProjectInfo,
    /// The selected build type
    pub build_type: BuildTypeSpec,
    /// Resolved signing identity, if the build type signs
    pub signing: Option<SigningIdentity>,
    /// SDK version set
    pub sdk: SdkVersionSet,
}

impl ResolvedBuildPlan {
    /// Gradle task this plan maps to (`assembleRelease`, `bundleDebug`, ...)
    pub fn gradle_task(&self, kind: ArtifactKind) -> String {
        format!("{}{}", kind.task_prefix(), capitalize(&self.build_type.name))
    }

    /// Whether the resulting artifact will be signed
    pub fn is_signed(&self) -> bool {
        self.signing.is_some()
    }

    /// Serialize the plan for `--json` output (passwords redacted)
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn plan(name: &str, signed: bool) -> ResolvedBuildPlan {
        ResolvedBuildPlan {
            project: ProjectInfo {
                namespace: "com.example.app".to_string(),
                application_id: "com.example.app".to_string(),
                ndk_version: None,
                java_version: 11,
            },
            build_type: BuildTypeSpec {
                name: name.to_string(),
                signing_config: signed.then(|| "upload".to_string()),
                minify_enabled: false,
                shrink_resources: false,
                debuggable: name == "debug",
            },
            signing: signed.then(|| SigningIdentity {
                alias: "upload".to_string(),
                store_path: PathBuf::from("upload-keystore.jks"),
                store_password: "secret".to_string(),
                key_password: "secret".to_string(),
            }),
            sdk: SdkVersionSet {
                compile_sdk: 34,
                min_sdk: 21,
                target_sdk: 34,
                version_code: 1,
                version_name: "1.0.0".to_string(),
            },
        }
    }

    #[test]
    fn test_gradle_task_mapping() {
        assert_eq!(plan("release", true).gradle_task(ArtifactKind::Apk), "assembleRelease");
        assert_eq!(plan("release", true).gradle_task(ArtifactKind::Bundle), "bundleRelease");
        assert_eq!(plan("debug", false).gradle_task(ArtifactKind::Apk), "assembleDebug");
        assert_eq!(plan("staging", false).gradle_task(ArtifactKind::Bundle), "bundleStaging");
    }

    #[test]
    fn test_is_signed() {
        assert!(plan("release", true).is_signed());
        assert!(!plan("debug", false).is_signed());
    }

    #[test]
    fn test_json_output_redacts_passwords() {
        let json = plan("release", true).to_json().unwrap();

        assert!(json.contains("assemble") || json.contains("release"));
        assert!(json.contains("upload-keystore.jks"));
        assert!(!json.contains("secret"));
    }
}
