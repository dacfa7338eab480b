//! Progress events emitted during an upload.

/// Discrete per-phase progress event.
///
/// Sent on the caller's mpsc channel; the engine owns no UI. A full
/// or dropped channel never fails the upload.
#[derive(Debug, Clone, PartialEq)]
pub enum UploadEvent {
    /// Plan request is being sent.
    PlanRequested,
    /// Plan received; all later phases carry this id.
    PlanReceived { pending_upload_id: String },
    /// A file transfer began.
    TransferStarted { file: String, chunked: bool },
    /// One chunked part finished.
    PartUploaded { part: u32, total: u32 },
    /// A file transfer finished.
    TransferFinished { file: String },
    /// Verification request is being sent.
    Verifying,
    /// Upload verified; terminal event.
    Completed { build_id: Option<String> },
}
