//! Chat-completion provider configuration.
//!
//! Single source of truth for supported providers and their defaults.

use std::fmt;
use std::str::FromStr;

/// Supported chat-completion providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Provider {
    #[default]
    OpenRouter,
    OpenAI,
}

impl Provider {
    /// All available providers
    pub const ALL: &'static [Provider] = &[Provider::OpenRouter, Provider::OpenAI];

    /// Provider name as used in config files, env and CLI
    pub const fn name(&self) -> &'static str {
        match self {
            Self::OpenRouter => "openrouter",
            Self::OpenAI => "openai",
        }
    }

    /// Default model identifier sent in the request body
    pub const fn default_model(&self) -> &'static str {
        match self {
            Self::OpenRouter => "meta-llama/llama-4-maverick:free",
            Self::OpenAI => "gpt-4.1-mini",
        }
    }

    /// Base URL the `/chat/completions` path is appended to
    pub const fn default_base_url(&self) -> &'static str {
        match self {
            Self::OpenRouter => "https://openrouter.ai/api/v1",
            Self::OpenAI => "https://api.openai.com/v1",
        }
    }

    /// Environment variable name for the API key
    pub const fn api_key_env(&self) -> &'static str {
        match self {
            Self::OpenRouter => "OPENROUTER_API_KEY",
            Self::OpenAI => "OPENAI_API_KEY",
        }
    }

    /// Environment variable name for a base URL override
    pub const fn base_url_env(&self) -> &'static str {
        match self {
            Self::OpenRouter => "OPENROUTER_BASE_URL",
            Self::OpenAI => "OPENAI_BASE_URL",
        }
    }

    /// Headers this provider expects beyond auth and content type.
    ///
    /// OpenRouter attributes traffic through `HTTP-Referer` and `X-Title`;
    /// both are sent even when empty.
    pub fn extra_headers(&self, site: &SiteMetadata) -> Vec<(String, String)> {
        match self {
            Self::OpenRouter => vec![
                ("HTTP-Referer".to_string(), site.url.clone()),
                ("X-Title".to_string(), site.name.clone()),
            ],
            Self::OpenAI => Vec::new(),
        }
    }

    /// Get all provider names as strings
    pub fn all_names() -> Vec<&'static str> {
        Self::ALL.iter().map(Self::name).collect()
    }
}

impl FromStr for Provider {
    type Err = ProviderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lower = s.trim().to_lowercase();
        Self::ALL
            .iter()
            .find(|p| p.name() == lower)
            .copied()
            .ok_or_else(|| ProviderError::Unknown(s.to_string()))
    }
}

impl fmt::Display for Provider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Provider configuration error
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Unknown provider: {0}. Supported: openrouter, openai")]
    Unknown(String),
}

/// Optional site attribution forwarded to providers that accept it
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SiteMetadata {
    /// Sourced from `SITE_URL`
    pub url: String,
    /// Sourced from `SITE_NAME`
    pub name: String,
}

/// Resolved settings for the provider selected for this run
#[derive(Debug, Clone, Default)]
pub struct ProviderConfig {
    pub provider: Provider,
    /// API key (loaded from env only)
    pub api_key: String,
    /// Model identifier
    pub model: String,
    /// Base URL without the `/chat/completions` suffix
    pub base_url: String,
    pub site: SiteMetadata,
}

impl ProviderConfig {
    /// Create config with defaults for a provider
    pub fn with_defaults(provider: Provider) -> Self {
        Self {
            provider,
            api_key: String::new(),
            model: provider.default_model().to_string(),
            base_url: provider.default_base_url().to_string(),
            site: SiteMetadata::default(),
        }
    }

    /// Full chat-completions endpoint
    pub fn endpoint(&self) -> String {
        format!("{}/chat/completions", self.base_url.trim_end_matches('/'))
    }

    /// Check if this config has an API key set
    pub fn has_api_key(&self) -> bool {
        !self.api_key.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_from_str() {
        assert_eq!(
            "openrouter".parse::<Provider>().ok(),
            Some(Provider::OpenRouter)
        );
        assert_eq!("OpenAI".parse::<Provider>().ok(), Some(Provider::OpenAI));
        assert!("anthropic".parse::<Provider>().is_err());
    }

    #[test]
    fn test_provider_defaults() {
        assert_eq!(
            Provider::default().default_model(),
            "meta-llama/llama-4-maverick:free"
        );
        assert_eq!(Provider::OpenAI.api_key_env(), "OPENAI_API_KEY");
        assert_eq!(Provider::OpenRouter.base_url_env(), "OPENROUTER_BASE_URL");
    }

    #[test]
    fn test_endpoint_trims_trailing_slash() {
        let mut config = ProviderConfig::with_defaults(Provider::OpenRouter);
        assert_eq!(
            config.endpoint(),
            "https://openrouter.ai/api/v1/chat/completions"
        );

        config.base_url = "http://127.0.0.1:8080/v1/".to_string();
        assert_eq!(config.endpoint(), "http://127.0.0.1:8080/v1/chat/completions");
    }

    #[test]
    fn test_extra_headers() {
        let site = SiteMetadata {
            url: "https://example.com".to_string(),
            name: "Example".to_string(),
        };

        let headers = Provider::OpenRouter.extra_headers(&site);
        assert_eq!(
            headers,
            vec![
                ("HTTP-Referer".to_string(), "https://example.com".to_string()),
                ("X-Title".to_string(), "Example".to_string()),
            ]
        );
        assert!(Provider::OpenAI.extra_headers(&site).is_empty());
    }
}
