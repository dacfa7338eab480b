//! Upload error types.

/// Errors produced during an upload invocation.
#[derive(Debug, thiserror::Error)]
pub enum UploadError {
    #[error(transparent)]
    Client(#[from] shipstash_client::Error),

    #[error(transparent)]
    Transfer(#[from] shipstash_transfer::TransferError),

    /// A chunked part failed; names the part so operators can correlate
    /// with server-side logs. No later part is attempted.
    #[error("part {part} of {total} failed: {source}")]
    Part {
        part: u32,
        total: u32,
        #[source]
        source: shipstash_client::Error,
    },
}
