//! Community template listing
//!
//! Community templates live as top-level folders in a shared GitHub
//! repository. This module lists those folder names via the GitHub contents
//! API. Errors are not handled here; they propagate to the caller.

use anyhow::{Context, Result};
use serde::Deserialize;

/// GitHub owner of the community templates repository
pub const COMMUNITY_OWNER: &str = "run-llama";
/// Repository holding the community templates
pub const COMMUNITY_REPO: &str = "create_llama_projects";

/// Source of community template folder names
#[allow(async_fn_in_trait)]
pub trait CommunitySource {
    /// Ordered top-level folder names of the community repository
    async fn list_root_folders(&self) -> Result<Vec<String>>;
}

/// One entry of a GitHub contents listing
#[derive(Debug, Deserialize)]
struct ContentsEntry {
    name: String,
    #[serde(rename = "type")]
    kind: String,
}

/// Keep directories only, in API order
fn root_folders_from_entries(entries: Vec<ContentsEntry>) -> Vec<String> {
    entries
        .into_iter()
        .filter(|e| e.kind == "dir")
        .map(|e| e.name)
        .collect()
}

/// Lists repository root folders through the GitHub API
pub struct GithubSource {
    client: reqwest::Client,
    owner: String,
    repo: String,
}

impl GithubSource {
    /// GitHub rejects requests without a user agent, so a client that cannot
    /// carry one is an error rather than a silent fallback
    pub fn new(owner: &str, repo: &str, user_agent: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(user_agent)
            .build()
            .context("Failed to build HTTP client")?;
        Ok(Self {
            client,
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }

    /// Source for the shared community templates repository
    pub fn community(user_agent: &str) -> Result<Self> {
        Self::new(COMMUNITY_OWNER, COMMUNITY_REPO, user_agent)
    }

    /// Browsable URL of the repository, for prompt messages
    pub fn html_url(&self) -> String {
        format!("https://github.com/{}/{}", self.owner, self.repo)
    }
}

impl CommunitySource for GithubSource {
    async fn list_root_folders(&self) -> Result<Vec<String>> {
        let url = format!(
            "https://api.github.com/repos/{}/{}/contents",
            self.owner, self.repo
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .with_context(|| format!("Failed to list repository contents from {}", url))?;

        if !response.status().is_success() {
            anyhow::bail!(
                "Failed to list {}/{} contents: HTTP {}",
                self.owner,
                self.repo,
                response.status()
            );
        }

        let entries: Vec<ContentsEntry> = response
            .json()
            .await
            .context("Failed to parse repository contents listing")?;

        Ok(root_folders_from_entries(entries))
    }
}

/// Fixed folder list, for tests and offline use
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    pub folders: Vec<String>,
}

impl StaticSource {
    pub fn new(folders: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            folders: folders.into_iter().map(Into::into).collect(),
        }
    }
}

impl CommunitySource for StaticSource {
    async fn list_root_folders(&self) -> Result<Vec<String>> {
        Ok(self.folders.clone())
    }
}
