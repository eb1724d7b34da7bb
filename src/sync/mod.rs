//! Keeps module tracker issues in sync with the state of their sub-issues.
//!
//! A run fetches every issue once, selects the module trackers by title
//! marker, and for each of them recomputes the progress counts and writes the
//! body back when the counts changed.

use crate::config::Config;
use crate::github::{GitHubClient, Issue, IssueIndex};
use tracing::{error, info};

mod calculator;
mod fetch;
mod filter;
mod parser;
mod rewriter;

pub use calculator::{calculate_progress, is_blocked, ProgressSnapshot};
pub use fetch::{fetch_issues, IssueSnapshot};
pub use filter::filter_module_issues;
pub use parser::parse_sub_issues;
pub use rewriter::{
    plan_update, recorded_progress, render_progress_section, rewrite_body, PROGRESS_SECTION,
    SUB_ISSUES_SECTION,
};

/// What happened to a single module issue
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueOutcome {
    NoSubIssues,
    Unchanged,
    Updated(ProgressSnapshot),
    /// Dry run: the update that would have been sent
    Planned(ProgressSnapshot),
    Failed(String),
}

/// Outcome of a whole run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct SyncReport {
    pub fetched: usize,
    pub modules: usize,
    pub updated: usize,
    pub planned: usize,
    pub unchanged: usize,
    pub without_sub_issues: usize,
    pub failed: usize,
}

impl SyncReport {
    fn record(&mut self, outcome: &IssueOutcome) {
        match outcome {
            IssueOutcome::NoSubIssues => self.without_sub_issues += 1,
            IssueOutcome::Unchanged => self.unchanged += 1,
            IssueOutcome::Updated(_) => self.updated += 1,
            IssueOutcome::Planned(_) => self.planned += 1,
            IssueOutcome::Failed(_) => self.failed += 1,
        }
    }
}

/// Run a full synchronization pass
pub fn run(client: &GitHubClient, config: &Config) -> SyncReport {
    let snapshot = fetch_issues(client, config.github.per_page);

    let marker = &config.sync.module_marker;
    info!("Filtering issues with '{}' in title", marker);
    let modules = filter_module_issues(&snapshot.issues, marker);
    info!("Found {} issues with '{}' in title", modules.len(), marker);

    let mut report = SyncReport {
        fetched: snapshot.issues.len(),
        modules: modules.len(),
        ..SyncReport::default()
    };

    for issue in modules {
        let outcome = sync_module_issue(client, issue, &snapshot.index, config.sync.dry_run);
        report.record(&outcome);
    }

    report
}

/// Recompute and, if needed, write back the progress of one module issue.
///
/// Failures are logged and reported, never propagated.
pub fn sync_module_issue(
    client: &GitHubClient,
    issue: &Issue,
    index: &IssueIndex,
    dry_run: bool,
) -> IssueOutcome {
    let sub_issues = parse_sub_issues(&issue.body);
    if sub_issues.is_empty() {
        info!("Issue #{} has no sub-issues, skipping", issue.number);
        return IssueOutcome::NoSubIssues;
    }

    let progress = calculate_progress(&sub_issues, index);
    let Some(new_body) = plan_update(&issue.body, &progress, index) else {
        info!("Issue #{} is already up to date", issue.number);
        return IssueOutcome::Unchanged;
    };

    if dry_run {
        info!("Dry run: would update issue #{} to {:?}", issue.number, progress);
        return IssueOutcome::Planned(progress);
    }

    match client.update_issue_body(issue.number, &new_body) {
        Ok(()) => {
            info!("Updated progress tracking for issue #{}", issue.number);
            IssueOutcome::Updated(progress)
        }
        Err(e) => {
            error!("Error updating issue #{}: {:#}", issue.number, e);
            IssueOutcome::Failed(format!("{:#}", e))
        }
    }
}
