use crate::github::{GitHubClient, Issue, IssueIndex};
use tracing::{debug, info, warn};

/// Every issue of the repository, in fetch order, plus a lookup by number
#[derive(Debug, Default)]
pub struct IssueSnapshot {
    pub issues: Vec<Issue>,
    pub index: IssueIndex,
}

/// Fetch all issues page by page.
///
/// Stops at the first empty page. A failing page ends the walk as well; the
/// issues gathered up to that point are still returned.
pub fn fetch_issues(client: &GitHubClient, per_page: u32) -> IssueSnapshot {
    info!("Fetching all issues from GitHub repository");
    let mut issues = Vec::new();
    let mut page = 1;

    loop {
        match client.fetch_issue_page(page, per_page) {
            Ok(batch) if batch.is_empty() => break,
            Ok(batch) => {
                debug!("Page {} returned {} issues", page, batch.len());
                issues.extend(batch);
                page += 1;
            }
            Err(e) => {
                warn!("Failed to fetch issues on page {}: {:#}", page, e);
                break;
            }
        }
    }

    info!("Total issues fetched: {}", issues.len());
    let index = IssueIndex::from_issues(&issues);
    IssueSnapshot { issues, index }
}
