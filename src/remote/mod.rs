//! Repository Identification
//!
//! Resolves the `owner/repo` identifier used to build firmware download URLs.
//! Precedence: explicit override, then the local git remote, then a fixed
//! placeholder with a warning. Resolution never fails.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::Command;

use regex_lite::Regex;

use crate::report::Reporter;

/// Fallback when no repository can be determined
pub const PLACEHOLDER_REPOSITORY: &str = "your-username/your-repo";

/// Narrow seam over the version-control lookup so tests can stub it
pub trait RemoteLookup {
    /// Best-effort `owner/repo` guess; any failure is `None`
    fn repository_hint(&self) -> Option<String>;
}

/// Reads the `origin` remote of a local git checkout
pub struct GitRemote {
    repo_root: PathBuf,
}

impl GitRemote {
    pub fn new(repo_root: &Path) -> Self {
        GitRemote {
            repo_root: repo_root.to_path_buf(),
        }
    }
}

impl RemoteLookup for GitRemote {
    fn repository_hint(&self) -> Option<String> {
        let output = Command::new("git")
            .args(["remote", "get-url", "origin"])
            .current_dir(&self.repo_root)
            .output()
            .ok()?;
        if !output.status.success() {
            return None;
        }
        let url = String::from_utf8(output.stdout).ok()?;
        parse_github_remote(url.trim())
    }
}

/// Extract `owner/repo` from a GitHub remote URL in SSH or HTTPS form.
///
/// Accepts anything containing `github.com`, strips a `.git` suffix and
/// surrounding slashes/colons.
pub fn parse_github_remote(url: &str) -> Option<String> {
    let pattern = Regex::new(r"github\.com[:/]+(.+?)(?:\.git)?/*$").expect("remote pattern is valid");
    let captures = pattern.captures(url)?;
    let repo = captures
        .get(1)?
        .as_str()
        .trim_matches(|c| c == '/' || c == ':');
    if repo.is_empty() {
        None
    } else {
        Some(repo.to_string())
    }
}

/// Resolve the repository identifier, always returning a usable string
pub fn resolve_repository<W: Write>(
    override_id: Option<&str>,
    lookup: &dyn RemoteLookup,
    reporter: &mut Reporter<W>,
) -> String {
    if let Some(repository) = override_id {
        return repository.to_string();
    }
    if let Some(repository) = lookup.repository_hint() {
        return repository;
    }
    reporter.warning(&format!(
        "could not detect repository, using placeholder: {}",
        PLACEHOLDER_REPOSITORY
    ));
    PLACEHOLDER_REPOSITORY.to_string()
}
