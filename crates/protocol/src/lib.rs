//! Wire types for the artifact upload protocol.
//!
//! An upload is a server-side *pending upload* spanning three phases:
//! plan request (`POST /upload/request`), file transfer (PUTs to
//! presigned URLs, optionally chunked via per-part tickets), and
//! verification (`POST /upload/verify`). This crate holds the JSON
//! types exchanged in each phase plus metadata validation.

mod metadata;
mod plan;
mod record;
mod validation;

pub use metadata::UploadMetadata;
pub use plan::{
    FileTransferPlan, PartTicketRequest, PartTransferTicket, PresignedData, UploadPlan,
    VerifyRequest,
};
pub use record::{ArtifactRecord, BuildInfo, PlatformInfo};
pub use validation::{ValidationError, validate_metadata};
