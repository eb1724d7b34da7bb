use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Represents a GitHub issue as returned by the REST issues endpoint
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct Issue {
    pub number: u64,
    #[serde(default)]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub body: String,
    pub state: IssueState,
}

impl Issue {
    pub fn is_open(&self) -> bool {
        self.state == IssueState::Open
    }

    pub fn is_closed(&self) -> bool {
        self.state == IssueState::Closed
    }
}

/// Issue state
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum IssueState {
    Open,
    Closed,
}

/// Payload for `PATCH /repos/{owner}/{repo}/issues/{number}`
#[derive(Debug, Serialize)]
pub struct IssueBodyUpdate<'a> {
    pub body: &'a str,
}

/// Lookup of every fetched issue by number.
///
/// Built once per run from the fetched snapshot and never mutated afterwards.
#[derive(Debug, Default, Clone)]
pub struct IssueIndex {
    issues: HashMap<u64, Issue>,
}

impl IssueIndex {
    /// Build an index from a snapshot. Later duplicates replace earlier ones.
    pub fn from_issues(issues: &[Issue]) -> Self {
        let issues = issues
            .iter()
            .map(|issue| (issue.number, issue.clone()))
            .collect();
        IssueIndex { issues }
    }

    pub fn get(&self, number: u64) -> Option<&Issue> {
        self.issues.get(&number)
    }

    /// Whether `number` is tracked and currently open
    pub fn is_open(&self, number: u64) -> bool {
        self.get(number).is_some_and(Issue::is_open)
    }

    /// Whether `number` is tracked and currently closed
    pub fn is_closed(&self, number: u64) -> bool {
        self.get(number).is_some_and(Issue::is_closed)
    }

    pub fn len(&self) -> usize {
        self.issues.len()
    }

    pub fn is_empty(&self) -> bool {
        self.issues.is_empty()
    }
}

// GitHub sends `"body": null` for issues created without a description
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
