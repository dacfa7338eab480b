//! Required-field validation, run before any network call.

use crate::UploadMetadata;

/// A required metadata field is missing or blank.
#[derive(Debug, thiserror::Error)]
#[error("{field} is required")]
pub struct ValidationError {
    pub field: &'static str,
}

fn require(value: &str, field: &'static str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError { field });
    }
    Ok(())
}

/// Checks that every required metadata field is present and non-blank.
pub fn validate_metadata(meta: &UploadMetadata) -> Result<(), ValidationError> {
    require(&meta.primary_file_path, "primary file path")?;
    require(&meta.version_component_1_major, "major version component")?;
    require(&meta.version_component_2_minor, "minor version component")?;
    require(&meta.version_component_3_patch, "patch version component")?;
    require(&meta.platform, "platform")?;
    require(&meta.stream, "stream")?;
    Ok(())
}
