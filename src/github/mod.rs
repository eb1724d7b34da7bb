use anyhow::{anyhow, Context, Result};
use std::env;

mod models;
mod client;
mod repo;

pub use models::*;
pub use client::*;
pub use repo::RepoId;

#[cfg(test)]
pub use client::MockGitHub;

/// Environment variable holding the GitHub token
pub const TOKEN_ENV_VAR: &str = "GITHUB_TOKEN";

/// Get the GitHub token from the environment
pub fn get_token() -> Result<String> {
    let token = env::var(TOKEN_ENV_VAR)
        .with_context(|| format!("{} environment variable not set", TOKEN_ENV_VAR))?;
    validate_token(token)
}

fn validate_token(token: String) -> Result<String> {
    let token = token.trim().to_string();
    if token.is_empty() {
        return Err(anyhow!("{} is empty", TOKEN_ENV_VAR));
    }
    Ok(token)
}
