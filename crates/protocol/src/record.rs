//! Verification-phase response: the final artifact record.

use serde::{Deserialize, Serialize};

/// Terminal result of a successful upload.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArtifactRecord {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub build_id: Option<String>,
    /// True when the artifact was accepted but server-side processing
    /// has not finished yet.
    #[serde(default)]
    pub pending_processing: bool,
    #[serde(default)]
    pub build_info_url: Option<String>,
    #[serde(default)]
    pub download_url: Option<String>,
    #[serde(default)]
    pub build: Option<BuildInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BuildInfo {
    #[serde(default)]
    pub platform: Option<PlatformInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlatformInfo {
    #[serde(default)]
    pub short_name: Option<String>,
}

impl ArtifactRecord {
    /// Platform short name from the nested build object, if available.
    pub fn platform_short_name(&self) -> Option<&str> {
        self.build
            .as_ref()?
            .platform
            .as_ref()?
            .short_name
            .as_deref()
    }
}
