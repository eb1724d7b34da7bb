use anyhow::{anyhow, Result};
use std::fmt;
use std::str::FromStr;

/// Identifies a GitHub repository
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoId {
    /// Repository owner (e.g., "cafe-sur-cour")
    pub owner: String,
    /// Repository name (e.g., "AREA")
    pub name: String,
}

impl fmt::Display for RepoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.name)
    }
}

impl FromStr for RepoId {
    type Err = anyhow::Error;

    /// Accepts `owner/name` or a `https://github.com/owner/name` URL
    fn from_str(input: &str) -> Result<Self> {
        let input = input.trim();
        let path = input
            .strip_prefix("https://github.com/")
            .unwrap_or(input)
            .trim_end_matches('/');
        let path = path.strip_suffix(".git").unwrap_or(path);

        let mut parts = path.split('/');
        match (parts.next(), parts.next(), parts.next()) {
            (Some(owner), Some(name), None) if is_valid_part(owner) && is_valid_part(name) => {
                Ok(RepoId {
                    owner: owner.to_string(),
                    name: name.to_string(),
                })
            }
            _ => Err(anyhow!(
                "Invalid repository '{}'. Expected owner/name (e.g. cafe-sur-cour/AREA)",
                input
            )),
        }
    }
}

fn is_valid_part(part: &str) -> bool {
    !part.is_empty()
        && part
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
}
