use crate::github::{Issue, IssueIndex};
use crate::markdown::issue_references;
use serde::Serialize;
use std::collections::HashSet;
use tracing::warn;

/// Aggregate state of a module's sub-issues
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ProgressSnapshot {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub blocked: usize,
}

/// Classify every referenced sub-issue.
///
/// Repeated references count once. A reference missing from the index counts
/// toward `total` only.
pub fn calculate_progress(sub_issues: &[u64], index: &IssueIndex) -> ProgressSnapshot {
    let mut seen = HashSet::new();
    let mut progress = ProgressSnapshot::default();

    for &number in sub_issues {
        if !seen.insert(number) {
            continue;
        }
        progress.total += 1;

        let Some(issue) = index.get(number) else {
            warn!("Sub-issue #{} not found", number);
            continue;
        };

        if issue.is_closed() {
            progress.completed += 1;
        } else if is_blocked(issue, index) {
            progress.blocked += 1;
        } else {
            progress.in_progress += 1;
        }
    }

    progress
}

/// An issue is blocked when its body mentions another issue that is still open
pub fn is_blocked(issue: &Issue, index: &IssueIndex) -> bool {
    issue_references(&issue.body).any(|n| n != issue.number && index.is_open(n))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::IssueState::{Closed, Open};
    use crate::test_utils::{create_test_issue, index_of};

    #[test]
    fn test_empty_list() {
        let index = index_of(vec![]);
        assert_eq!(calculate_progress(&[], &index), ProgressSnapshot::default());
    }

    #[test]
    fn test_mixed_states() {
        let index = index_of(vec![
            create_test_issue(10, "done", Closed, ""),
            create_test_issue(11, "waiting", Open, "Blocked by #99"),
            create_test_issue(99, "blocker", Open, ""),
        ]);

        let progress = calculate_progress(&[10, 11], &index);
        assert_eq!(
            progress,
            ProgressSnapshot {
                total: 2,
                completed: 1,
                in_progress: 0,
                blocked: 1,
            }
        );
    }

    #[test]
    fn test_bucket_counts() {
        let index = index_of(vec![
            create_test_issue(1, "a", Closed, "#4"),
            create_test_issue(2, "b", Closed, ""),
            create_test_issue(3, "c", Open, "after #1 and #2"),
            create_test_issue(4, "d", Open, "needs #5"),
            create_test_issue(5, "e", Open, ""),
            create_test_issue(6, "f", Open, "mentions #404"),
        ]);

        let progress = calculate_progress(&[1, 2, 3, 4, 5, 6], &index);
        assert_eq!(progress.total, 6);
        assert_eq!(progress.completed, 2);
        // 4 waits on open #5
        assert_eq!(progress.blocked, 1);
        assert_eq!(progress.in_progress, 3);
    }

    #[test]
    fn test_missing_sub_issue_counts_in_total_only() {
        let index = index_of(vec![create_test_issue(1, "a", Open, "")]);

        let progress = calculate_progress(&[1, 42], &index);
        assert_eq!(progress.total, 2);
        assert_eq!(progress.in_progress, 1);
        assert_eq!(progress.completed + progress.in_progress + progress.blocked, 1);
    }

    #[test]
    fn test_duplicates_count_once() {
        let index = index_of(vec![create_test_issue(1, "a", Closed, "")]);

        let progress = calculate_progress(&[1, 1, 1], &index);
        assert_eq!(progress.total, 1);
        assert_eq!(progress.completed, 1);
    }

    #[test]
    fn test_self_reference_is_not_a_blocker() {
        let issue = create_test_issue(8, "self", Open, "Tracked in #8");
        let index = index_of(vec![issue.clone()]);
        assert!(!is_blocked(&issue, &index));
    }

    #[test]
    fn test_closed_reference_is_not_a_blocker() {
        let issue = create_test_issue(8, "x", Open, "after #2");
        let index = index_of(vec![issue.clone(), create_test_issue(2, "y", Closed, "")]);
        assert!(!is_blocked(&issue, &index));
    }
}
