use super::models::{CompletionRequest, CompletionResponse};
use super::prompt::{PayloadBuilder, build_chat_completion_request};
use crate::config::Config;
use crate::error::GenerateError;
use crate::transport::{JsonPost, Transport};
use crate::{log_debug, log_info, log_warn};
use std::fs;
use std::path::Path;

/// Struct responsible for generating release notes
pub struct ReleaseNotesGenerator<T: Transport> {
    transport: T,
    build_payload: PayloadBuilder,
}

impl<T: Transport> ReleaseNotesGenerator<T> {
    /// Generator using the standard two-message chat payload
    pub fn new(transport: T) -> Self {
        Self::with_payload_builder(transport, build_chat_completion_request)
    }

    pub fn with_payload_builder(transport: T, build_payload: PayloadBuilder) -> Self {
        Self {
            transport,
            build_payload,
        }
    }

    /// The request body this generator would send for `config`
    pub fn build_request(&self, config: &Config) -> CompletionRequest {
        (self.build_payload)(&config.context, &config.prompt, &config.provider.model)
    }

    /// Builds the HTTP request: endpoint, auth, provider headers and JSON body
    pub fn prepare(&self, config: &Config) -> Result<JsonPost, GenerateError> {
        let request = self.build_request(config);
        let body = serde_json::to_string(&request).map_err(GenerateError::Encode)?;

        let provider = &config.provider;
        let mut headers = vec![(
            "Authorization".to_string(),
            format!("Bearer {}", provider.api_key),
        )];
        headers.extend(provider.provider.extra_headers(&provider.site));

        Ok(JsonPost {
            url: provider.endpoint(),
            headers,
            body,
        })
    }

    /// Generates release notes for the configured release.
    ///
    /// Issues exactly one request and returns `choices[0].message.content`
    /// verbatim. Nothing is written to disk here.
    pub async fn generate(&self, config: &Config) -> Result<String, GenerateError> {
        if !config.provider.has_api_key() {
            log_warn!(
                "{} is not set; sending the request without a credential",
                config.provider.provider.api_key_env()
            );
        }
        let missing = config.context.missing_fields();
        if !missing.is_empty() {
            log_warn!("Release inputs not provided: {}", missing.join(", "));
        }

        let post = self.prepare(config)?;
        log_debug!(
            "Requesting release notes from {} using model {}",
            post.url,
            config.provider.model
        );

        let response = self.transport.post_json(post).await?;
        if !response.is_success() {
            log_debug!("Provider returned HTTP {}: {}", response.status, response.body);
            return Err(GenerateError::HttpStatus {
                status: response.status,
                body: response.body,
            });
        }

        extract_completion(&response.body)
    }

    /// Generates the notes and overwrites the configured output file with them
    pub async fn generate_to_file(&self, config: &Config) -> Result<String, GenerateError> {
        let notes = self.generate(config).await?;
        write_release_notes(&config.output_path, &notes)?;
        Ok(notes)
    }
}

/// Pull `choices[0].message.content` out of a raw response body
pub fn extract_completion(body: &str) -> Result<String, GenerateError> {
    let value: serde_json::Value =
        serde_json::from_str(body).map_err(|e| GenerateError::Parse(e.to_string()))?;

    if value.get("choices").is_none() {
        return Err(GenerateError::MissingCompletion);
    }

    let response: CompletionResponse =
        serde_json::from_value(value).map_err(|e| GenerateError::Parse(e.to_string()))?;

    response
        .into_first_content()
        .ok_or(GenerateError::MissingCompletion)
}

/// Replace `path` with exactly `notes`
pub fn write_release_notes(path: &Path, notes: &str) -> Result<(), GenerateError> {
    fs::write(path, notes).map_err(|source| GenerateError::Write {
        path: path.to_path_buf(),
        source,
    })?;
    log_info!("Wrote {} bytes to {}", notes.len(), path.display());
    Ok(())
}
