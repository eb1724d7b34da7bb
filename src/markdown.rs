//! Line-oriented markdown model for issue bodies.
//!
//! Issue bodies are split into typed blocks (headings, checklist items and
//! plain text), one per line. Every block remembers enough of its source line
//! that rendering an untouched document reproduces the original text exactly.

use regex::Regex;
use std::ops::Range;
use std::sync::LazyLock;

static HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s{0,3}(#{1,6})(?:[ \t]+(.*?))?[ \t#]*$").unwrap());

static CHECKLIST_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(.*?)- \[(.)\] (.*)$").unwrap());

static ISSUE_NUMBER_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"#(\d+)").unwrap());

/// A single line of an issue body
#[derive(Debug, Clone, PartialEq)]
pub enum Block {
    Heading(Heading),
    Checklist(ChecklistItem),
    Text(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Heading {
    pub level: usize,
    pub text: String,
    raw: String,
}

/// A `- [ ] ...` / `- [x] ...` line
#[derive(Debug, Clone, PartialEq)]
pub struct ChecklistItem {
    prefix: String,
    mark: char,
    rest: String,
}

impl Heading {
    /// Whether this is a level-2 heading whose text starts with `title`
    pub fn opens_section(&self, title: &str) -> bool {
        self.level == 2 && self.text.starts_with(title)
    }
}

impl ChecklistItem {
    pub fn is_checked(&self) -> bool {
        self.mark != ' '
    }

    pub fn check(&mut self) {
        self.mark = 'x';
    }

    /// The issue this item points at, when the text right after the box is `#<digits>`
    pub fn sub_issue(&self) -> Option<u64> {
        let digits: String = self
            .rest
            .strip_prefix('#')?
            .chars()
            .take_while(|c| c.is_ascii_digit())
            .collect();
        digits.parse().ok()
    }

    fn render(&self) -> String {
        format!("{}- [{}] {}", self.prefix, self.mark, self.rest)
    }
}

impl Block {
    pub fn parse(line: &str) -> Block {
        if let Some(caps) = HEADING_RE.captures(line) {
            return Block::Heading(Heading {
                level: caps[1].len(),
                text: caps.get(2).map_or("", |m| m.as_str()).to_string(),
                raw: line.to_string(),
            });
        }

        if let Some(caps) = CHECKLIST_RE.captures(line) {
            if let Some(mark) = caps[2].chars().next() {
                return Block::Checklist(ChecklistItem {
                    prefix: caps[1].to_string(),
                    mark,
                    rest: caps[3].to_string(),
                });
            }
        }

        Block::Text(line.to_string())
    }

    pub fn render(&self) -> String {
        match self {
            Block::Heading(heading) => heading.raw.clone(),
            Block::Checklist(item) => item.render(),
            Block::Text(text) => text.clone(),
        }
    }

    pub fn as_heading(&self) -> Option<&Heading> {
        match self {
            Block::Heading(heading) => Some(heading),
            _ => None,
        }
    }
}

/// A parsed issue body
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    blocks: Vec<Block>,
}

impl Document {
    pub fn parse(body: &str) -> Self {
        Document {
            blocks: body.split('\n').map(Block::parse).collect(),
        }
    }

    pub fn render(&self) -> String {
        self.blocks
            .iter()
            .map(Block::render)
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    pub fn checklist_items(&self) -> impl Iterator<Item = &ChecklistItem> {
        self.blocks.iter().filter_map(|block| match block {
            Block::Checklist(item) => Some(item),
            _ => None,
        })
    }

    /// Block ranges of every section titled `title`.
    ///
    /// A section runs from its heading up to, but excluding, the next heading
    /// of level 2 or deeper. Level-1 headings stay inside the section.
    pub fn sections(&self, title: &str) -> Vec<Range<usize>> {
        let mut ranges = Vec::new();
        let mut start = None;

        for (i, block) in self.blocks.iter().enumerate() {
            let Some(heading) = block.as_heading().filter(|h| h.level >= 2) else {
                continue;
            };
            if let Some(s) = start.take() {
                ranges.push(s..i);
            }
            if heading.opens_section(title) {
                start = Some(i);
            }
        }

        if let Some(s) = start {
            ranges.push(s..self.blocks.len());
        }
        ranges
    }

    /// Replace every section titled `title` with `replacement`.
    ///
    /// Returns false when no such section exists.
    pub fn replace_sections(&mut self, title: &str, replacement: &str) -> bool {
        let ranges = self.sections(title);
        if ranges.is_empty() {
            return false;
        }

        let new_blocks: Vec<Block> = replacement.split('\n').map(Block::parse).collect();
        for range in ranges.into_iter().rev() {
            self.blocks.splice(range, new_blocks.iter().cloned());
        }
        true
    }

    /// Mutable access to checklist items inside sections titled `title`
    pub fn section_checklist_mut(&mut self, title: &str) -> Vec<&mut ChecklistItem> {
        let ranges = self.sections(title);
        self.blocks
            .iter_mut()
            .enumerate()
            .filter(|(i, _)| ranges.iter().any(|r| r.contains(i)))
            .filter_map(|(_, block)| match block {
                Block::Checklist(item) => Some(item),
                _ => None,
            })
            .collect()
    }
}

/// Every `#<digits>` reference anywhere in `text`, in order
pub fn issue_references(text: &str) -> impl Iterator<Item = u64> + '_ {
    ISSUE_NUMBER_RE
        .captures_iter(text)
        .filter_map(|caps| caps[1].parse().ok())
}
