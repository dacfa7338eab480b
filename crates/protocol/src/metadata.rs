//! Upload metadata sent with the plan request.

use serde::{Deserialize, Serialize};

/// Immutable description of the artifact being uploaded.
///
/// Serialized as a flat snake_case JSON object in the plan request.
/// Optional fields the caller left absent are omitted from the wire,
/// never sent as empty strings — the server treats empty and absent
/// differently for some fields (e.g. version-control attribution).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadMetadata {
    /// Artifact layout. Only single-file uploads are supported.
    pub structure: String,
    /// Local path of the primary artifact.
    pub primary_file_path: String,
    /// Local path of the optional expansion artifact.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expansion_file_path: Option<String>,

    pub version_component_1_major: String,
    pub version_component_2_minor: String,
    pub version_component_3_patch: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_component_extra: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version_component_meta: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_build_number: Option<String>,

    pub platform: String,
    pub stream: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub labels: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub architectures: Vec<String>,

    // CI attribution, filled by the host integration.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ci_pipeline: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ci_run_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ci_run_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ci_pipeline_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ci_build_duration: Option<String>,

    // Version-control attribution, user-supplied or provider-detected.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vc_host_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vc_host: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vc_repo_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vc_repo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vc_branch: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vc_commit_sha: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vc_commit_url: Option<String>,
}

impl UploadMetadata {
    /// Creates metadata with the required fields; everything else absent.
    pub fn new(
        primary_file_path: impl Into<String>,
        major: impl Into<String>,
        minor: impl Into<String>,
        patch: impl Into<String>,
        platform: impl Into<String>,
        stream: impl Into<String>,
    ) -> Self {
        Self {
            structure: "file".into(),
            primary_file_path: primary_file_path.into(),
            expansion_file_path: None,
            version_component_1_major: major.into(),
            version_component_2_minor: minor.into(),
            version_component_3_patch: patch.into(),
            version_component_extra: None,
            version_component_meta: None,
            custom_build_number: None,
            platform: platform.into(),
            stream: stream.into(),
            notes: None,
            labels: Vec::new(),
            architectures: Vec::new(),
            source: None,
            ci_pipeline: None,
            ci_run_id: None,
            ci_run_url: None,
            ci_pipeline_url: None,
            ci_build_duration: None,
            vc_host_type: None,
            vc_host: None,
            vc_repo_name: None,
            vc_repo_url: None,
            vc_branch: None,
            vc_commit_sha: None,
            vc_commit_url: None,
        }
    }
}
