//! Best-effort version-control attribution.
//!
//! A [`RepositoryInfoProvider`] knows how to read repository facts for
//! one source-control system from the CI environment. Detection is
//! capability-based: every probe returns `Option` — an unsupported or
//! absent capability is an empty result, never an error — and systems
//! without a provider are simply not enriched.
//!
//! [`enrich_metadata`] fills only fields the user left absent, so
//! explicit values always win over detection.

mod provider;
mod url;

pub use provider::{
    GitEnvProvider, RepositoryInfoProvider, SubversionEnvProvider, detect_provider,
    enrich_metadata,
};
pub use url::{commit_url, detect_host, repo_name_from_url};
