use crate::config::ConfigOverrides;
use crate::providers::Provider;
use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Clone, Default, Debug)]
pub struct CommonParams {
    /// Override the chat-completion provider
    #[arg(long, help = "Override the chat-completion provider", value_parser = available_providers_parser)]
    pub provider: Option<String>,

    /// Override the model identifier
    #[arg(long, help = "Override the model identifier")]
    pub model: Option<String>,

    /// Where to write the release notes
    #[arg(
        short,
        long,
        help = "Where to write the release notes (defaults to release_notes.md)"
    )]
    pub output: Option<PathBuf>,
}

impl CommonParams {
    /// Turn the flags into configuration overrides
    pub fn to_overrides(&self) -> Result<ConfigOverrides> {
        let provider = self
            .provider
            .as_deref()
            .map(str::parse::<Provider>)
            .transpose()?;

        Ok(ConfigOverrides {
            provider,
            model: self.model.clone().filter(|m| !m.trim().is_empty()),
            output: self.output.clone(),
        })
    }
}

/// Validates that a provider name is available in the system
pub fn available_providers_parser(s: &str) -> Result<String, String> {
    match s.parse::<Provider>() {
        Ok(provider) => Ok(provider.name().to_string()),
        Err(_) => Err(format!(
            "Invalid provider '{}'. Available providers: {}",
            s,
            Provider::all_names().join(", ")
        )),
    }
}
