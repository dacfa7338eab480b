//! HTTP client for the artifact service.
//!
//! All network I/O lives here. Two distinct request styles exist:
//! authenticated JSON POSTs to the artifact-service API (plan request,
//! part tickets, verification) and unauthenticated PUTs to presigned
//! storage URLs (direct file bodies and streamed part bodies). The
//! client never retries; callers own any retry policy.

mod client;

pub use client::{Client, DEFAULT_BASE_URL, Error, FileScope};
