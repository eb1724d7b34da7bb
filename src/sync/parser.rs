use crate::markdown::Document;

/// Sub-issue numbers referenced by checklist lines (`- [ ] #12`, `- [x] #12`).
///
/// Order is preserved and duplicates are kept.
pub fn parse_sub_issues(body: &str) -> Vec<u64> {
    Document::parse(body)
        .checklist_items()
        .filter_map(|item| item.sub_issue())
        .collect()
}
