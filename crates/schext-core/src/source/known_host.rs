//! Raw-content hosting convention: `/{owner}/{repo}/{ref}/{path...}`.

use regex::Regex;
use std::sync::OnceLock;

/// Authority of the raw-content host whose URLs encode repository layout.
pub const RAW_CONTENT_HOST: &str = "raw.githubusercontent.com";

/// Repository components extracted from a raw-content URL path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoLocation {
    pub owner: String,
    pub repo: String,
    pub git_ref: String,
    /// Path inside the repository, without a leading slash.
    pub path: String,
}

fn repo_path_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // Owner: 1-39 alphanumerics or hyphens, no leading/trailing hyphen.
        Regex::new(
            r"^/([A-Za-z\d](?:[A-Za-z\d-]{0,37}[A-Za-z\d])?)/([\w.-]+)/([\w.-]+)/(.+)$",
        )
        .expect("repository path pattern is valid")
    })
}

impl RepoLocation {
    /// Parses the URL path of a raw-content URL. Returns `None` if it does not
    /// match the owner/repo/ref/path layout.
    pub fn from_url_path(path: &str) -> Option<Self> {
        let caps = repo_path_regex().captures(path)?;
        Some(RepoLocation {
            owner: caps[1].to_string(),
            repo: caps[2].to_string(),
            git_ref: caps[3].to_string(),
            path: caps[4].to_string(),
        })
    }

    /// Non-empty segments of the in-repository path.
    pub fn segments(&self) -> Vec<&str> {
        self.path.split('/').filter(|s| !s.is_empty()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_layout() {
        let loc =
            RepoLocation::from_url_path("/acme/widgets/main/extension/foo/package.schema.json")
                .unwrap();
        assert_eq!(loc.owner, "acme");
        assert_eq!(loc.repo, "widgets");
        assert_eq!(loc.git_ref, "main");
        assert_eq!(
            loc.segments(),
            vec!["extension", "foo", "package.schema.json"]
        );
    }

    #[test]
    fn rejects_bad_owner() {
        assert!(RepoLocation::from_url_path("/-acme/widgets/main/a.json").is_none());
        assert!(RepoLocation::from_url_path("/acme-/widgets/main/a.json").is_none());
        let long_owner = "a".repeat(40);
        assert!(
            RepoLocation::from_url_path(&format!("/{}/widgets/main/a.json", long_owner)).is_none()
        );
    }

    #[test]
    fn rejects_empty_repo_or_ref() {
        assert!(RepoLocation::from_url_path("/acme//main/a.json").is_none());
        assert!(RepoLocation::from_url_path("/acme/widgets//a.json").is_none());
    }

    #[test]
    fn rejects_missing_path() {
        assert!(RepoLocation::from_url_path("/acme/widgets/main").is_none());
        assert!(RepoLocation::from_url_path("/acme/widgets/main/").is_none());
    }
}
