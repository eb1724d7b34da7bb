//! Test utilities for gh-module-sync
#![cfg(test)]

use crate::github::{Issue, IssueIndex, IssueState};

/// Create a test issue
pub fn create_test_issue(number: u64, title: &str, state: IssueState, body: &str) -> Issue {
    Issue {
        number,
        title: title.to_string(),
        body: body.to_string(),
        state,
    }
}

/// Build an index over the given issues
pub fn index_of(issues: Vec<Issue>) -> IssueIndex {
    IssueIndex::from_issues(&issues)
}
