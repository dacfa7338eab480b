//! Repository-info providers, one per supported source-control system.

use std::collections::HashMap;

use shipstash_protocol::UploadMetadata;

use crate::url::{commit_url, detect_host, repo_name_from_url};

/// Read-only view of repository facts for one source-control system.
///
/// Every probe returns `Option`: an absent capability is an empty
/// result, never an error.
pub trait RepositoryInfoProvider {
    /// Source-control system name ("git", "svn").
    fn host_type(&self) -> &'static str;
    fn repo_url(&self) -> Option<String>;
    fn branch(&self) -> Option<String>;
    fn commit_id(&self) -> Option<String>;
}

fn env_value(env: &HashMap<String, String>, keys: &[&str]) -> Option<String> {
    keys.iter()
        .find_map(|k| env.get(*k))
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Git facts from CI environment variables.
pub struct GitEnvProvider {
    env: HashMap<String, String>,
}

impl GitEnvProvider {
    pub fn new(env: HashMap<String, String>) -> Self {
        Self { env }
    }
}

impl RepositoryInfoProvider for GitEnvProvider {
    fn host_type(&self) -> &'static str {
        "git"
    }

    fn repo_url(&self) -> Option<String> {
        env_value(&self.env, &["GIT_URL"])
    }

    fn branch(&self) -> Option<String> {
        // Jenkins exports "origin/main"; strip the remote prefix.
        let branch = env_value(&self.env, &["GIT_BRANCH", "BRANCH_NAME"])?;
        Some(
            branch
                .strip_prefix("origin/")
                .unwrap_or(&branch)
                .to_string(),
        )
    }

    fn commit_id(&self) -> Option<String> {
        env_value(&self.env, &["GIT_COMMIT"])
    }
}

/// Subversion facts from CI environment variables.
pub struct SubversionEnvProvider {
    env: HashMap<String, String>,
}

impl SubversionEnvProvider {
    pub fn new(env: HashMap<String, String>) -> Self {
        Self { env }
    }
}

impl RepositoryInfoProvider for SubversionEnvProvider {
    fn host_type(&self) -> &'static str {
        "svn"
    }

    fn repo_url(&self) -> Option<String> {
        env_value(&self.env, &["SVN_URL"])
    }

    fn branch(&self) -> Option<String> {
        None
    }

    fn commit_id(&self) -> Option<String> {
        env_value(&self.env, &["SVN_REVISION", "SVN_REV"])
    }
}

/// Picks the provider matching the environment, if any.
///
/// Systems without a provider yield `None` and no enrichment happens.
pub fn detect_provider(
    env: &HashMap<String, String>,
) -> Option<Box<dyn RepositoryInfoProvider>> {
    if env.contains_key("GIT_URL") || env.contains_key("GIT_COMMIT") {
        Some(Box::new(GitEnvProvider::new(env.clone())))
    } else if env.contains_key("SVN_URL") {
        Some(Box::new(SubversionEnvProvider::new(env.clone())))
    } else {
        None
    }
}

/// Fills absent version-control fields from a provider.
///
/// User-supplied values always win: only `None` fields are written.
pub fn enrich_metadata(meta: &mut UploadMetadata, provider: &dyn RepositoryInfoProvider) {
    if meta.vc_host_type.is_none() {
        meta.vc_host_type = Some(provider.host_type().to_string());
    }

    if let Some(repo_url) = provider.repo_url() {
        if meta.vc_host.is_none() {
            meta.vc_host = detect_host(&repo_url).map(str::to_string);
        }
        if meta.vc_repo_name.is_none() {
            meta.vc_repo_name = repo_name_from_url(&repo_url);
        }
        if meta.vc_repo_url.is_none() {
            meta.vc_repo_url = Some(repo_url);
        }
    }

    if meta.vc_branch.is_none() {
        meta.vc_branch = provider.branch();
    }
    if meta.vc_commit_sha.is_none() {
        meta.vc_commit_sha = provider.commit_id();
    }

    if meta.vc_commit_url.is_none()
        && let (Some(repo_url), Some(sha)) = (&meta.vc_repo_url, &meta.vc_commit_sha)
    {
        meta.vc_commit_url = commit_url(repo_url, sha);
    }
}
