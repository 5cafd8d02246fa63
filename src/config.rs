use crate::context::ReleaseContext;
use crate::log_debug;
use crate::log_warn;
use crate::providers::{Provider, ProviderConfig, SiteMetadata};

use anyhow::{Context, Result, anyhow};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Project configuration filename, looked up in the working directory
pub const PROJECT_CONFIG_FILENAME: &str = ".release-notes.toml";

/// Where the notes land unless overridden
pub const DEFAULT_OUTPUT_PATH: &str = "release_notes.md";

/// Environment variables holding the release inputs
pub const COMMITS_ENV: &str = "COMMITS";
pub const REPOSITORY_ENV: &str = "GITHUB_REPOSITORY";
pub const RELEASE_NAME_ENV: &str = "DOCKERLIKE_RELEASE_NAME";
pub const VERSION_ENV: &str = "NEW_VERSION";

/// Environment variables steering the tool itself
pub const PROVIDER_ENV: &str = "RELEASE_NOTES_PROVIDER";
pub const MODEL_ENV: &str = "RELEASE_NOTES_MODEL";
pub const OUTPUT_ENV: &str = "RELEASE_NOTES_OUTPUT";
pub const SITE_URL_ENV: &str = "SITE_URL";
pub const SITE_NAME_ENV: &str = "SITE_NAME";

/// Everything one run needs, assembled once at startup
#[derive(Clone, Debug)]
pub struct Config {
    pub context: ReleaseContext,
    pub provider: ProviderConfig,
    pub prompt: PromptSettings,
    pub output_path: PathBuf,
}

/// Knobs that shape the system instruction
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PromptSettings {
    /// Product the notes are written for; generic wording when unset
    pub product_name: Option<String>,
    /// Extra guidelines appended to the system instruction
    pub instructions: String,
    /// Replaces the built-in system instruction entirely
    pub system_prompt: Option<String>,
}

/// Values from the command line; these take precedence over everything else
#[derive(Clone, Debug, Default)]
pub struct ConfigOverrides {
    pub provider: Option<Provider>,
    pub model: Option<String>,
    pub output: Option<PathBuf>,
}

/// Optional per-repository settings file.
///
/// API keys are never taken from this file, it is meant to be committed.
#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct ProjectConfig {
    #[serde(default)]
    pub provider: Option<String>,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default)]
    pub output: Option<PathBuf>,
    #[serde(default)]
    pub product_name: Option<String>,
    #[serde(default)]
    pub instructions: Option<String>,
    #[serde(default)]
    pub system_prompt: Option<String>,
    /// Accepted so the file still parses, then ignored
    #[serde(default, skip_serializing)]
    pub api_key: Option<String>,
}

impl ProjectConfig {
    /// Load `.release-notes.toml` from `dir`, if present
    pub fn load_from_dir(dir: &Path) -> Result<Option<Self>> {
        let path = dir.join(PROJECT_CONFIG_FILENAME);
        if !path.exists() {
            return Ok(None);
        }

        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read project config file {}", path.display()))?;

        let config: Self = toml::from_str(&content).map_err(|e| {
            anyhow!(
                "Invalid project configuration file format: {}. Please check your {} file for syntax errors.",
                e,
                PROJECT_CONFIG_FILENAME
            )
        })?;

        if config.api_key.is_some() {
            log_warn!(
                "Ignoring api_key in {}; API keys are only read from the environment",
                PROJECT_CONFIG_FILENAME
            );
        }

        Ok(Some(config))
    }

    /// Whether provider-specific settings in this file apply to `provider`
    fn applies_to(&self, provider: Provider) -> bool {
        self.provider
            .as_deref()
            .and_then(|name| name.parse::<Provider>().ok())
            .is_none_or(|p| p == provider)
    }
}

impl Config {
    /// Load from the process environment and the project file in the working directory
    pub fn load(overrides: &ConfigOverrides) -> Result<Self> {
        let cwd = env::current_dir().context("Unable to determine working directory")?;
        let project = ProjectConfig::load_from_dir(&cwd)?;
        let config = Self::from_lookup(|key| env::var(key).ok(), project, overrides)?;
        log_debug!("Configuration loaded: {:?}", config.redacted());
        Ok(config)
    }

    /// Resolve configuration from an arbitrary variable lookup.
    ///
    /// Precedence: overrides, then environment, then project file, then provider defaults.
    /// Release inputs are taken verbatim; absent ones become the missing-value placeholder.
    pub fn from_lookup<F>(
        lookup: F,
        project: Option<ProjectConfig>,
        overrides: &ConfigOverrides,
    ) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let project = project.unwrap_or_default();
        let setting = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let provider = match overrides.provider {
            Some(provider) => provider,
            None => match setting(PROVIDER_ENV).or_else(|| project.provider.clone()) {
                Some(name) => name.parse::<Provider>()?,
                None => Provider::default(),
            },
        };

        let project_applies = project.applies_to(provider);

        let model = overrides
            .model
            .clone()
            .or_else(|| setting(MODEL_ENV))
            .or_else(|| project.model.clone().filter(|_| project_applies))
            .unwrap_or_else(|| provider.default_model().to_string());

        let base_url = setting(provider.base_url_env())
            .or_else(|| project.base_url.clone().filter(|_| project_applies))
            .unwrap_or_else(|| provider.default_base_url().to_string());

        let provider_config = ProviderConfig {
            provider,
            api_key: lookup(provider.api_key_env()).unwrap_or_default(),
            model,
            base_url,
            site: SiteMetadata {
                url: lookup(SITE_URL_ENV).unwrap_or_default(),
                name: lookup(SITE_NAME_ENV).unwrap_or_default(),
            },
        };

        let context = ReleaseContext::from_parts(
            lookup(COMMITS_ENV),
            lookup(REPOSITORY_ENV),
            lookup(RELEASE_NAME_ENV),
            lookup(VERSION_ENV),
        );

        let output_path = overrides
            .output
            .clone()
            .or_else(|| setting(OUTPUT_ENV).map(PathBuf::from))
            .or_else(|| project.output.clone())
            .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_PATH));

        let prompt = PromptSettings {
            product_name: project.product_name.clone(),
            instructions: project.instructions.clone().unwrap_or_default(),
            system_prompt: project.system_prompt.clone(),
        };

        Ok(Self {
            context,
            provider: provider_config,
            prompt,
            output_path,
        })
    }

    /// Copy safe to log: the API key is masked
    pub fn redacted(&self) -> Self {
        let mut copy = self.clone();
        if copy.provider.has_api_key() {
            copy.provider.api_key = "***".to_string();
        }
        copy
    }
}
