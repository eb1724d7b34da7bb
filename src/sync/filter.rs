use crate::github::Issue;

/// Issues whose title contains `marker` (case-sensitive), in their original order
pub fn filter_module_issues<'a>(issues: &'a [Issue], marker: &str) -> Vec<&'a Issue> {
    issues
        .iter()
        .filter(|issue| issue.title.contains(marker))
        .collect()
}
