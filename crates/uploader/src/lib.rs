//! Upload orchestration for the artifact service.
//!
//! This crate implements the business logic of one upload invocation.
//! It is a library crate with no UI: the host (CLI or another
//! integration) supplies metadata and renders progress events.
//!
//! # Pipeline
//!
//! 1. **Plan**: request upload URLs for the primary (and optional
//!    expansion) file
//! 2. **Transfer primary**: one direct PUT, or parts 1..N in order
//! 3. **Transfer expansion**: same, when present
//! 4. **Verify**: finalize the pending upload, receive the record
//!
//! Every failure is fatal to the invocation: nothing is retried and no
//! partial result is returned. Phases and parts run strictly
//! sequentially, so memory and connection use stay bounded.

pub mod error;
pub mod events;
pub mod executor;
pub mod uploader;

pub use error::UploadError;
pub use events::UploadEvent;
pub use uploader::Uploader;
