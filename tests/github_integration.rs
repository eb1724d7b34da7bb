use gh_module_sync::github::{Issue, IssueIndex};
use gh_module_sync::sync::{calculate_progress, filter_module_issues, parse_sub_issues};

// Integration tests focus on data model deserialization and the pure pipeline
// Mock client tests are better as unit tests inside the module

fn fixture_issues() -> Vec<Issue> {
    let issues_json = include_str!("fixtures/github/issues.json");
    serde_json::from_str(issues_json).unwrap()
}

#[test]
fn test_fixture_deserialization() {
    let issues = fixture_issues();

    assert_eq!(issues.len(), 7);
    assert_eq!(issues[0].number, 1);
    assert_eq!(issues[0].title, "[MODULE] Authentication");
    assert!(issues[1].is_closed());
    assert_eq!(issues[4].body, "");
    // pull requests come through the issues endpoint too
    assert_eq!(issues[6].number, 7);
}

#[test]
fn test_pipeline_on_fixture() {
    let issues = fixture_issues();
    let index = IssueIndex::from_issues(&issues);

    let modules = filter_module_issues(&issues, "[MODULE]");
    let numbers: Vec<u64> = modules.iter().map(|issue| issue.number).collect();
    assert_eq!(numbers, vec![1, 6]);

    let sub_issues = parse_sub_issues(&modules[0].body);
    assert_eq!(sub_issues, vec![2, 3, 4]);
    assert!(parse_sub_issues(&modules[1].body).is_empty());

    let progress = calculate_progress(&sub_issues, &index);
    insta::assert_json_snapshot!(progress, @r#"
    {
      "total": 3,
      "completed": 1,
      "in_progress": 1,
      "blocked": 1
    }
    "#);
}
