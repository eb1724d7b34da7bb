use crate::config::GitHubSettings;
use crate::github::models::*;
use crate::github::RepoId;
use anyhow::{anyhow, Context, Result};
use reqwest::blocking::{Client as HttpClient, Response};
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, AUTHORIZATION};
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

const ACCEPT_HEADER: &str = "application/vnd.github.v3+json";
const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// GitHub client abstraction
pub enum GitHubClient {
    Real(RealGitHub),
    #[cfg(test)]
    Mock(MockGitHub),
}

impl GitHubClient {
    /// Create a new real GitHub client
    pub fn new(settings: &GitHubSettings, token: &str) -> Result<Self> {
        Ok(GitHubClient::Real(RealGitHub::new(settings, token)?))
    }

    /// Create a mock client for testing
    #[cfg(test)]
    pub fn mock() -> Self {
        GitHubClient::Mock(MockGitHub::new())
    }

    /// Fetch one page of issues (open and closed)
    pub fn fetch_issue_page(&self, page: u32, per_page: u32) -> Result<Vec<Issue>> {
        match self {
            GitHubClient::Real(client) => client.fetch_issue_page(page, per_page),
            #[cfg(test)]
            GitHubClient::Mock(client) => client.fetch_issue_page(page, per_page),
        }
    }

    /// Replace the body of an issue
    pub fn update_issue_body(&self, number: u64, body: &str) -> Result<()> {
        match self {
            GitHubClient::Real(client) => client.update_issue_body(number, body),
            #[cfg(test)]
            GitHubClient::Mock(client) => client.update_issue_body(number, body),
        }
    }
}

/// GitHub client talking to the REST API
pub struct RealGitHub {
    client: HttpClient,
    api_url: String,
    repo: RepoId,
}

impl RealGitHub {
    /// Create a new REST client for the configured repository
    pub fn new(settings: &GitHubSettings, token: &str) -> Result<Self> {
        let repo: RepoId = settings.repo.parse()?;

        let mut builder = HttpClient::builder()
            .user_agent(USER_AGENT)
            .default_headers(build_headers(token)?);
        if let Some(secs) = settings.timeout_secs {
            builder = builder.timeout(Duration::from_secs(secs));
        }
        let client = builder.build().context("Failed to create HTTP client")?;

        Ok(RealGitHub {
            client,
            api_url: settings.api_url.trim_end_matches('/').to_string(),
            repo,
        })
    }

    fn issues_url(&self) -> String {
        format!(
            "{}/repos/{}/{}/issues",
            self.api_url, self.repo.owner, self.repo.name
        )
    }

    /// Fetch one page of issues
    pub fn fetch_issue_page(&self, page: u32, per_page: u32) -> Result<Vec<Issue>> {
        let page_param = page.to_string();
        let per_page_param = per_page.to_string();

        debug!("GET {} page={} per_page={}", self.issues_url(), page, per_page);
        let response = self
            .client
            .get(self.issues_url())
            .query(&[
                ("state", "all"),
                ("page", page_param.as_str()),
                ("per_page", per_page_param.as_str()),
            ])
            .send()
            .with_context(|| format!("Failed to request issues page {}", page))?;

        parse_json(response)
    }

    /// Replace the body of an issue. Only HTTP 200 counts as success.
    pub fn update_issue_body(&self, number: u64, body: &str) -> Result<()> {
        let url = format!("{}/{}", self.issues_url(), number);

        debug!("PATCH {}", url);
        let response = self
            .client
            .patch(&url)
            .json(&IssueBodyUpdate { body })
            .send()
            .with_context(|| format!("Failed to send update for issue #{}", number))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(status_error(status, response));
        }

        Ok(())
    }
}

fn build_headers(token: &str) -> Result<HeaderMap> {
    let mut headers = HeaderMap::new();

    let mut auth = HeaderValue::from_str(&format!("Bearer {}", token))
        .context("Invalid GITHUB_TOKEN format")?;
    auth.set_sensitive(true);
    headers.insert(AUTHORIZATION, auth);
    headers.insert(ACCEPT, HeaderValue::from_static(ACCEPT_HEADER));

    Ok(headers)
}

/// Decode a successful JSON response, or turn the status into an error
fn parse_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        return Err(status_error(status, response));
    }

    response.json().context("Failed to parse GitHub JSON response")
}

fn status_error(status: StatusCode, response: Response) -> anyhow::Error {
    let body = response.text().unwrap_or_default();

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => anyhow!(
            "GitHub API returned {}: authentication failed, check GITHUB_TOKEN",
            status
        ),
        StatusCode::NOT_FOUND => anyhow!("GitHub API returned {}: repository not found", status),
        _ => anyhow!("GitHub API returned {}: {}", status, body.trim()),
    }
}

/// Mock GitHub client for testing
#[cfg(test)]
pub struct MockGitHub {
    /// Pages served in order; pages past the end are empty
    pub pages: Vec<Vec<Issue>>,
    /// Page number that answers with an error
    pub failing_page: Option<u32>,
    /// Issue numbers whose update is rejected
    pub failing_updates: Vec<u64>,
    pub requested_pages: std::cell::RefCell<Vec<u32>>,
    pub updates: std::cell::RefCell<Vec<(u64, String)>>,
}

#[cfg(test)]
impl MockGitHub {
    pub fn new() -> Self {
        MockGitHub {
            pages: vec![],
            failing_page: None,
            failing_updates: vec![],
            requested_pages: std::cell::RefCell::new(vec![]),
            updates: std::cell::RefCell::new(vec![]),
        }
    }

    pub fn with_page(mut self, issues: Vec<Issue>) -> Self {
        self.pages.push(issues);
        self
    }

    pub fn fetch_issue_page(&self, page: u32, _per_page: u32) -> Result<Vec<Issue>> {
        self.requested_pages.borrow_mut().push(page);

        if self.failing_page == Some(page) {
            return Err(anyhow!("GitHub API returned 500 Internal Server Error: boom"));
        }

        let index = (page as usize).saturating_sub(1);
        Ok(self.pages.get(index).cloned().unwrap_or_default())
    }

    pub fn update_issue_body(&self, number: u64, body: &str) -> Result<()> {
        if self.failing_updates.contains(&number) {
            return Err(anyhow!("GitHub API returned 422 Unprocessable Entity: rejected"));
        }

        self.updates.borrow_mut().push((number, body.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::create_test_issue;

    #[test]
    fn test_mock_serves_pages_in_order() {
        let mock = MockGitHub::new()
            .with_page(vec![create_test_issue(1, "one", IssueState::Open, "")])
            .with_page(vec![create_test_issue(2, "two", IssueState::Closed, "")]);
        let client = GitHubClient::Mock(mock);

        assert_eq!(client.fetch_issue_page(1, 100).unwrap()[0].number, 1);
        assert_eq!(client.fetch_issue_page(2, 100).unwrap()[0].number, 2);
        assert!(client.fetch_issue_page(3, 100).unwrap().is_empty());
    }

    #[test]
    fn test_mock_records_updates() {
        let client = GitHubClient::mock();
        client.update_issue_body(5, "updated").unwrap();

        match &client {
            GitHubClient::Mock(mock) => {
                assert_eq!(*mock.updates.borrow(), vec![(5, "updated".to_string())]);
            }
            _ => panic!("Expected mock client"),
        }
    }

    #[test]
    fn test_real_client_rejects_bad_repo() {
        let settings = GitHubSettings {
            repo: "not-a-repo".to_string(),
            ..GitHubSettings::default()
        };

        assert!(GitHubClient::new(&settings, "token").is_err());
    }

    #[test]
    fn test_issues_url_trims_trailing_slash() {
        let settings = GitHubSettings {
            repo: "octo/widgets".to_string(),
            api_url: "http://localhost:1234/".to_string(),
            ..GitHubSettings::default()
        };

        let client = RealGitHub::new(&settings, "token").unwrap();
        assert_eq!(
            client.issues_url(),
            "http://localhost:1234/repos/octo/widgets/issues"
        );
    }

    #[test]
    fn test_headers_carry_bearer_token() {
        let headers = build_headers("abc123").unwrap();
        assert_eq!(headers[AUTHORIZATION], "Bearer abc123");
        assert_eq!(headers[ACCEPT], ACCEPT_HEADER);
        assert!(build_headers("bad\ntoken").is_err());
    }
}
