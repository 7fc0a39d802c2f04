// src/types/domain_types.rs
//! Domain-specific newtypes for type safety and validation.

use super::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use url::Url;

/// Notion integration token. Redacted in `Display` and `Debug`.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    /// Accepts internal-integration tokens (`secret_` or `ntn_` prefix).
    pub fn new(key: impl Into<String>) -> Result<Self, ValidationError> {
        let key = key.into().trim().to_string();
        let reason = if key.is_empty() {
            Some("API key cannot be empty")
        } else if !key.starts_with("secret_") && !key.starts_with("ntn_") {
            Some("API key must start with 'secret_' or 'ntn_'")
        } else if key.len() < 20 {
            Some("API key is too short")
        } else {
            None
        };

        match reason {
            Some(reason) => Err(ValidationError::InvalidApiKey {
                reason: reason.to_string(),
            }),
            None => Ok(Self(key)),
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let visible: String = self.0.chars().take(10).collect();
        write!(f, "{}...", visible)
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ApiKey({})", self)
    }
}

/// Bearer token for the enrichment endpoint. Free-form, never displayed.
#[derive(Clone, PartialEq, Eq)]
pub struct EnrichmentKey(String);

impl EnrichmentKey {
    pub fn new(key: impl Into<String>) -> Result<Self, ValidationError> {
        let key = key.into();
        if key.trim().is_empty() {
            return Err(ValidationError::EmptyField("enrichment_key"));
        }
        Ok(Self(key))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for EnrichmentKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("EnrichmentKey(***)")
    }
}

/// An http(s) service endpoint with a host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedUrl(Url);

impl ValidatedUrl {
    pub fn parse(url: &str) -> Result<Self, ValidationError> {
        let invalid = |reason: String| ValidationError::InvalidUrl {
            url: url.to_string(),
            reason,
        };

        let parsed = Url::parse(url.trim()).map_err(|e| invalid(e.to_string()))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            return Err(invalid("Only HTTP and HTTPS URLs are supported".to_string()));
        }
        if parsed.host_str().map_or(true, str::is_empty) {
            return Err(invalid("URL has no host".to_string()));
        }
        Ok(Self(parsed))
    }

    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }

    pub fn host(&self) -> &str {
        self.0.host_str().unwrap_or_default()
    }
}

impl fmt::Display for ValidatedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Property name as it appears in the page's `properties` map
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PropertyName(String);

impl PropertyName {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PropertyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Non-fatal diagnostic collected while fetching or rendering
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Warning {
    pub level: WarningLevel,
    pub message: String,
    pub context: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningLevel {
    Info,
    Warning,
    Error,
}

impl Warning {
    pub fn new(level: WarningLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            context: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}] {}", self.level, self.message)?;
        if let Some(ctx) = &self.context {
            write!(f, " ({})", ctx)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_key_validation() {
        assert!(ApiKey::new("secret_abcdefghijklmnopqrs").is_ok());
        assert!(ApiKey::new("ntn_abcdefghijklmnopqrs").is_ok());
        assert!(ApiKey::new("").is_err());
        assert!(ApiKey::new("invalid_key").is_err());
        assert!(ApiKey::new("secret_short").is_err());
        assert_eq!(
            ApiKey::new("  ntn_abcdefghijklmnopqrs\n").unwrap().as_str(),
            "ntn_abcdefghijklmnopqrs"
        );
    }

    #[test]
    fn test_api_key_is_redacted() {
        let key = ApiKey::new("secret_abcdefghijklmnopqrs").unwrap();
        assert_eq!(key.to_string(), "secret_abc...");
        assert_eq!(format!("{:?}", key), "ApiKey(secret_abc...)");
        let enrichment = EnrichmentKey::new("sk-live-123").unwrap();
        assert_eq!(format!("{:?}", enrichment), "EnrichmentKey(***)");
    }

    #[test]
    fn test_url_validation() {
        assert!(ValidatedUrl::parse("https://ai.example.com/v1/chat/completions").is_ok());
        assert!(ValidatedUrl::parse("http://localhost:8080").is_ok());
        assert!(ValidatedUrl::parse("ftp://example.com").is_err());
        assert!(ValidatedUrl::parse("not a url").is_err());
        let endpoint = ValidatedUrl::parse(" https://openrouter.ai/api/v1/chat/completions ").unwrap();
        assert_eq!(endpoint.host(), "openrouter.ai");
    }

    #[test]
    fn test_warning_display() {
        let warning = Warning::new(WarningLevel::Warning, "subtree truncated").with_context("depth 11");
        assert_eq!(warning.to_string(), "[Warning] subtree truncated (depth 11)");
    }
}
