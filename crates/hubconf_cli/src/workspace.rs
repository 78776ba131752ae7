//! Detection of the GitHub repository checked out in a directory.

use std::path::Path;

use regex::Regex;
use tracing::debug;

#[cfg(test)]
#[path = "workspace_tests.rs"]
mod tests;

const REMOTE_PATTERN: &str = r"^(?:[\w.-]+@[\w.-]+:|(?:https?|ssh|git)://(?:[^@/]+@)?[\w.:-]+/)(?P<owner>[\w.-]+)/(?P<repo>[\w.-]+?)(?:\.git)?/?$";

/// Owner and name of a GitHub repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceRepo {
    pub owner: String,
    pub repo: String,
}

/// Extracts owner and repository from an SSH or HTTPS remote url.
///
/// ```rust
/// use hubconf_cli::workspace::parse_remote_url;
///
/// let repo = parse_remote_url("git@github.com:octo/hello.git").unwrap();
/// assert_eq!((repo.owner.as_str(), repo.repo.as_str()), ("octo", "hello"));
/// ```
pub fn parse_remote_url(url: &str) -> Option<WorkspaceRepo> {
    let pattern = Regex::new(REMOTE_PATTERN).ok()?;
    let captures = pattern.captures(url.trim())?;
    Some(WorkspaceRepo {
        owner: captures["owner"].to_string(),
        repo: captures["repo"].to_string(),
    })
}

/// Looks up the `origin` remote of the git repository containing `dir`.
///
/// Returns `None` when `dir` is not inside a git repository, there is no
/// `origin` remote or its url is not recognised.
pub fn detect(dir: &Path) -> Option<WorkspaceRepo> {
    let repository = match git2::Repository::discover(dir) {
        Ok(r) => r,
        Err(e) => {
            debug!(dir = ?dir, error = %e, "Not inside a git repository");
            return None;
        }
    };

    let remote = repository.find_remote("origin").ok()?;
    let url = remote.url()?;
    let detected = parse_remote_url(url);
    debug!(url = url, detected = ?detected, "Inspected origin remote");
    detected
}
