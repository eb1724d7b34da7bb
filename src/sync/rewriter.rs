//! Regenerates the progress section of a module issue body.

use crate::github::IssueIndex;
use crate::markdown::Document;
use crate::sync::ProgressSnapshot;
use regex::Regex;
use std::sync::LazyLock;

pub const PROGRESS_SECTION: &str = "Progress Tracking";
pub const SUB_ISSUES_SECTION: &str = "Related Sub-Issues";

static FIELD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*[-*]\s+\*\*([^*]+)\*\*\s*:\s*(\d+)").unwrap());

/// Format the progress section. It ends with a blank line.
pub fn render_progress_section(progress: &ProgressSnapshot) -> String {
    format!(
        "## {}\n\n- **Total Sub-Issues**: {}\n- **Completed**: {}\n- **In Progress**: {}\n- **Blocked**: {}\n",
        PROGRESS_SECTION, progress.total, progress.completed, progress.in_progress, progress.blocked
    )
}

/// Counts currently written in the body's progress section.
///
/// `None` when there is no section or any of the four fields is missing.
pub fn recorded_progress(body: &str) -> Option<ProgressSnapshot> {
    let doc = Document::parse(body);
    let range = doc.sections(PROGRESS_SECTION).into_iter().next()?;

    let (mut total, mut completed, mut in_progress, mut blocked) = (None, None, None, None);
    for block in &doc.blocks()[range] {
        let line = block.render();
        let Some(caps) = FIELD_RE.captures(&line) else {
            continue;
        };
        let Ok(value) = caps[2].parse::<usize>() else {
            continue;
        };
        match caps[1].trim() {
            "Total Sub-Issues" => total = Some(value),
            "Completed" => completed = Some(value),
            "In Progress" => in_progress = Some(value),
            "Blocked" => blocked = Some(value),
            _ => {}
        }
    }

    Some(ProgressSnapshot {
        total: total?,
        completed: completed?,
        in_progress: in_progress?,
        blocked: blocked?,
    })
}

/// Rewrite `body` with fresh progress counts and closed sub-issues checked off.
///
/// Existing progress sections are replaced; without one, the section is
/// appended. Checklist items are only ever checked, never unchecked.
pub fn rewrite_body(body: &str, progress: &ProgressSnapshot, index: &IssueIndex) -> String {
    let section = render_progress_section(progress);

    let mut doc = Document::parse(body);
    if !doc.replace_sections(PROGRESS_SECTION, &section) {
        doc = Document::parse(&append_section(body, &section));
    }

    for item in doc.section_checklist_mut(SUB_ISSUES_SECTION) {
        if !item.is_checked() && item.sub_issue().is_some_and(|n| index.is_closed(n)) {
            item.check();
        }
    }

    doc.render()
}

/// The body to write back, or `None` when the issue is already up to date
pub fn plan_update(body: &str, progress: &ProgressSnapshot, index: &IssueIndex) -> Option<String> {
    if recorded_progress(body).as_ref() == Some(progress) {
        return None;
    }

    let new_body = rewrite_body(body, progress, index);
    (new_body != body).then_some(new_body)
}

fn append_section(body: &str, section: &str) -> String {
    let body = body.trim_end();
    if body.is_empty() {
        section.to_string()
    } else {
        format!("{}\n\n{}", body, section)
    }
}
