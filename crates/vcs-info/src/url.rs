//! Pure helpers over repository URLs.

/// Identifies the hosting service from a repository URL.
pub fn detect_host(url: &str) -> Option<&'static str> {
    let lower = url.to_lowercase();
    if lower.contains("github.com") {
        Some("github")
    } else if lower.contains("gitlab.com") {
        Some("gitlab")
    } else if lower.contains("gitlab") {
        Some("gitlab-self")
    } else if lower.contains("bitbucket.org") {
        Some("bitbucket")
    } else if lower.contains("gitea") {
        Some("gitea")
    } else if lower.contains("codeberg") {
        Some("codeberg")
    } else if lower.contains("sourcehut") || lower.contains("sr.ht") {
        Some("sourcehut")
    } else {
        None
    }
}

/// Extracts the repository name from an HTTPS or SSH remote URL.
///
/// `https://github.com/acme/widget.git` and
/// `git@github.com:acme/widget.git` both yield `widget`.
pub fn repo_name_from_url(url: &str) -> Option<String> {
    let trimmed = url.trim_end_matches('/');
    let without_suffix = trimmed.strip_suffix(".git").unwrap_or(trimmed);

    // SSH form uses `host:path`; everything after the last colon that
    // is not part of a scheme is path-like, so splitting on both ':'
    // and '/' and taking the last segment covers both forms.
    let name = without_suffix
        .rsplit(['/', ':'])
        .next()?
        .split(['?', '#'])
        .next()?;

    if name.is_empty() {
        return None;
    }
    Some(name.to_string())
}

/// Builds a web URL for a commit, when the host's URL scheme is known.
///
/// Numeric revisions (Subversion) have no portable web URL format, so
/// they yield `None` and the field is left for the user to supply.
pub fn commit_url(repo_url: &str, commit_id: &str) -> Option<String> {
    if commit_id.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }

    let base = repo_url
        .trim_end_matches('/')
        .trim_end_matches(".git")
        .trim_end_matches('/');

    match detect_host(repo_url)? {
        "github" | "gitea" | "codeberg" | "sourcehut" => Some(format!("{base}/commit/{commit_id}")),
        "gitlab" | "gitlab-self" => Some(format!("{base}/-/commit/{commit_id}")),
        "bitbucket" => Some(format!("{base}/commits/{commit_id}")),
        _ => None,
    }
}
