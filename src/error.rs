use std::fmt;

/// User-friendly error wrapper
#[derive(Debug)]
pub struct UserError {
    message: String,
    details: Option<String>,
    suggestion: Option<String>,
}

impl UserError {
    /// Create a new user error
    pub fn new(message: impl Into<String>) -> Self {
        UserError {
            message: message.into(),
            details: None,
            suggestion: None,
        }
    }

    /// Add details about the error
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Add a suggestion for how to fix the error
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn suggestion(&self) -> Option<&str> {
        self.suggestion.as_deref()
    }

    /// Format the error for display
    pub fn display(&self) {
        eprintln!("\n❌ Error: {}", self.message);

        if let Some(ref details) = self.details {
            eprintln!("\n   {}", details);
        }

        if let Some(ref suggestion) = self.suggestion {
            eprintln!("\n💡 {}", suggestion);
        }
    }
}

impl fmt::Display for UserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref details) = self.details {
            write!(f, ": {}", details)?;
        }
        Ok(())
    }
}

impl std::error::Error for UserError {}

/// Convert common errors to user-friendly messages
pub fn user_friendly_error(error: &anyhow::Error) -> UserError {
    let error_str = format!("{:#}", error);

    if error_str.contains("GITHUB_TOKEN") && error_str.contains("not set") {
        return UserError::new("GitHub token not configured")
            .with_details("A token is required to read and update issues")
            .with_suggestion("Set the GITHUB_TOKEN environment variable");
    }

    if error_str.contains("GITHUB_TOKEN is empty") {
        return UserError::new("GitHub token is empty")
            .with_details("GITHUB_TOKEN is set but contains no token")
            .with_suggestion("Export a personal access token with the 'repo' scope");
    }

    if error_str.contains("Invalid GITHUB_TOKEN format") {
        return UserError::new("GitHub token is malformed")
            .with_details("The token contains characters that cannot be sent in a header")
            .with_suggestion("Check GITHUB_TOKEN for stray whitespace or quotes");
    }

    if error_str.contains("Invalid repository") {
        return UserError::new("Invalid repository")
            .with_details(error_str)
            .with_suggestion("Pass the repository as owner/name, e.g. --repo cafe-sur-cour/AREA");
    }

    // Configuration errors
    if error_str.contains("Failed to read config") {
        return UserError::new("Configuration file not found")
            .with_details(error_str)
            .with_suggestion("Check the --config path or remove it to use the defaults");
    }

    if error_str.contains("Failed to parse config") {
        return UserError::new("Invalid configuration file")
            .with_details("The configuration file contains syntax errors")
            .with_suggestion("Check the TOML syntax of your config.toml file");
    }

    if error_str.contains("authentication failed") {
        return UserError::new("GitHub rejected the token")
            .with_details("The provided token was refused by the GitHub API")
            .with_suggestion("Check that GITHUB_TOKEN is valid and has access to the repository");
    }

    // Network errors
    if error_str.contains("error sending request") || error_str.contains("connection") {
        return UserError::new("Network connection failed")
            .with_details("Could not connect to the GitHub API")
            .with_suggestion("Check your internet connection and try again");
    }

    // Default fallback
    UserError::new("An unexpected error occurred").with_details(error_str)
}

/// Wrap a result with user-friendly error handling
pub trait UserFriendly<T> {
    fn user_friendly(self) -> Result<T, UserError>;
}

impl<T> UserFriendly<T> for anyhow::Result<T> {
    fn user_friendly(self) -> Result<T, UserError> {
        self.map_err(|e| user_friendly_error(&e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::{anyhow, Context};

    #[test]
    fn test_missing_token() {
        let error = anyhow!("GITHUB_TOKEN environment variable not set");
        let user_error = user_friendly_error(&error);
        assert_eq!(user_error.message(), "GitHub token not configured");
        assert_eq!(
            user_error.suggestion(),
            Some("Set the GITHUB_TOKEN environment variable")
        );
    }

    #[test]
    fn test_context_chain_is_inspected() {
        let result: anyhow::Result<()> = Err(anyhow!("expected `]`"))
            .context("Failed to parse config from \"/tmp/config.toml\"");
        let user_error = result.user_friendly().unwrap_err();
        assert_eq!(user_error.message(), "Invalid configuration file");
    }

    #[test]
    fn test_fallback_keeps_details() {
        let error = anyhow!("something odd");
        let user_error = user_friendly_error(&error);
        assert_eq!(user_error.message(), "An unexpected error occurred");
        assert_eq!(user_error.to_string(), "An unexpected error occurred: something odd");
    }
}
