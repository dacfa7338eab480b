//! Plan-phase types: the server's upload plan and per-part tickets.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Server response to a plan request.
///
/// The `pending_upload_id` correlates all three protocol phases. The
/// engine only consumes a plan; it never mutates one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadPlan {
    pub pending_upload_id: String,
    pub primary_file: FileTransferPlan,
    /// Expansion entries; the engine consumes the first, if any.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub expansion_files: Vec<FileTransferPlan>,
}

/// How one file is to be transferred: direct (one presigned PUT) or
/// chunked (fixed-size parts, one ticket per part).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileTransferPlan {
    #[serde(default)]
    pub chunked: bool,
    /// Part size in MiB; meaningful only when `chunked`.
    #[serde(default)]
    pub chunked_part_size_mb: u64,
    /// Total part count; meaningful only when `chunked`.
    #[serde(default)]
    pub chunked_number_parts: u32,
    /// Direct-transfer destination; present only when not chunked.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub presigned_data: Option<PresignedData>,
}

impl FileTransferPlan {
    /// Part size in bytes.
    pub fn part_size_bytes(&self) -> u64 {
        self.chunked_part_size_mb * 1024 * 1024
    }
}

/// Presigned destination for a direct transfer.
///
/// The header map carries exactly the headers the destination's
/// signature covers (content type, content disposition, access
/// control). Only headers the server supplied may be sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PresignedData {
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub headers: HashMap<String, serde_json::Value>,
}

impl PresignedData {
    /// Looks up a header value as a string.
    ///
    /// Some storage backends return header values as single-element
    /// arrays; both shapes are accepted.
    pub fn header(&self, name: &str) -> Option<String> {
        let value = self.headers.get(name)?;
        match value {
            serde_json::Value::String(s) => Some(s.clone()),
            serde_json::Value::Array(items) => items
                .first()
                .and_then(|v| v.as_str())
                .map(|s| s.to_string()),
            _ => None,
        }
    }
}

/// Body of a part-ticket request (`POST /upload/request/multipart`,
/// or `.../multipart/expansion` for the expansion file).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartTicketRequest {
    pub pending_upload_id: String,
    /// 1-based part number.
    pub part_number: u32,
    /// Exact byte length of this part.
    pub content_length: u64,
}

/// Single-use destination URL for one part transfer.
///
/// Requested immediately before each part; never cached or reused.
/// Unknown fields are ignored so a backend that adds per-part
/// completion tokens does not break parsing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartTransferTicket {
    pub part_presigned_url: String,
}

/// Body of the verification request (`POST /upload/verify`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VerifyRequest {
    pub pending_upload_id: String,
}
