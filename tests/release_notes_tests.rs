use anyhow::Result;
use release_scribe::changes::{
    CompletionRequest, OutputOptions, Role, run_release_notes, write_release_notes,
};
use release_scribe::{GenerateError, ReleaseNotesGenerator};
use std::fs;
use tempfile::TempDir;

use test_utils::{FakeTransport, completion_body, config_in, release_env};

#[tokio::test]
async fn test_bug_fix_release_writes_exact_content() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = config_in(
        temp_dir.path(),
        &[("COMMITS", "fix: bug"), ("NEW_VERSION", "1.2.0")],
    );
    let generator =
        ReleaseNotesGenerator::new(FakeTransport::with_completion("## Bug Fixes\n- Fixed a bug"));

    generator.generate_to_file(&config).await?;

    let written = fs::read_to_string(temp_dir.path().join("release_notes.md"))?;
    assert_eq!(written, "## Bug Fixes\n- Fixed a bug");
    Ok(())
}

#[tokio::test]
async fn test_output_is_verbatim() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = config_in(temp_dir.path(), &release_env());
    let raw = "\n\n  Here are your notes:\n```md\n# v1.2.0\n```\n\t";
    let generator = ReleaseNotesGenerator::new(FakeTransport::with_completion(raw));

    let notes = generator.generate_to_file(&config).await?;

    assert_eq!(notes, raw);
    assert_eq!(fs::read_to_string(&config.output_path)?, raw);
    Ok(())
}

#[tokio::test]
async fn test_request_shape() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = config_in(
        temp_dir.path(),
        &[
            ("COMMITS", "feat: dark mode\nfix: crash on start"),
            ("NEW_VERSION", "2.0.0"),
            ("RELEASE_NOTES_MODEL", "mistralai/mistral-small"),
            ("OPENROUTER_API_KEY", "sk-test"),
        ],
    );
    let transport = FakeTransport::with_completion("notes");
    let generator = ReleaseNotesGenerator::new(transport.clone());

    generator.generate(&config).await?;

    let requests = transport.requests();
    assert_eq!(requests.len(), 1, "exactly one request per run");
    let post = &requests[0];
    assert_eq!(post.url, "https://openrouter.ai/api/v1/chat/completions");
    assert_eq!(post.header("Authorization"), Some("Bearer sk-test"));

    let body: serde_json::Value = serde_json::from_str(&post.body)?;
    assert_eq!(body["model"], "mistralai/mistral-small");
    let messages = body["messages"]
        .as_array()
        .expect("messages should be an array");
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["role"], "system");
    assert_eq!(messages[1]["role"], "user");

    let user = messages[1]["content"].as_str().unwrap_or_default();
    assert!(user.contains("Commit History: feat: dark mode\nfix: crash on start"));
    assert!(user.contains("Version: 2.0.0"));
    assert!(user.contains("Repository: (not provided)"));
    Ok(())
}

#[tokio::test]
async fn test_openrouter_attribution_headers() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let transport = FakeTransport::with_completion("notes");
    let generator = ReleaseNotesGenerator::new(transport.clone());

    generator
        .generate(&config_in(temp_dir.path(), &release_env()))
        .await?;
    generator
        .generate(&config_in(
            temp_dir.path(),
            &[("RELEASE_NOTES_PROVIDER", "openai"), ("OPENAI_API_KEY", "sk-oa")],
        ))
        .await?;

    let requests = transport.requests();
    assert_eq!(requests[0].header("HTTP-Referer"), Some("https://widgets.example"));
    assert_eq!(requests[0].header("X-Title"), Some("Widgets"));

    assert_eq!(requests[1].url, "https://api.openai.com/v1/chat/completions");
    assert_eq!(requests[1].header("Authorization"), Some("Bearer sk-oa"));
    assert_eq!(requests[1].header("HTTP-Referer"), None);
    Ok(())
}

#[tokio::test]
async fn test_missing_api_key_is_sent_empty() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let transport = FakeTransport::responding(401, r#"{"error":{"message":"No auth credentials found"}}"#);
    let generator = ReleaseNotesGenerator::new(transport.clone());

    let err = generator
        .generate(&config_in(temp_dir.path(), &[("COMMITS", "fix: bug")]))
        .await
        .expect_err("401 should fail the run");

    assert_eq!(err.status(), Some(401));
    assert_eq!(transport.requests()[0].header("Authorization"), Some("Bearer "));
    Ok(())
}

#[tokio::test]
async fn test_http_error_creates_no_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = config_in(temp_dir.path(), &release_env());
    let generator =
        ReleaseNotesGenerator::new(FakeTransport::responding(500, "upstream exploded"));

    let err = generator
        .generate_to_file(&config)
        .await
        .expect_err("500 should fail the run");

    match err {
        GenerateError::HttpStatus { status, body } => {
            assert_eq!(status, 500);
            assert_eq!(body, "upstream exploded");
        }
        other => panic!("expected HttpStatus, got {other:?}"),
    }
    assert!(!config.output_path.exists());
    Ok(())
}

#[tokio::test]
async fn test_http_error_leaves_previous_notes_untouched() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = config_in(temp_dir.path(), &release_env());
    fs::write(&config.output_path, "# Previous release")?;
    let generator = ReleaseNotesGenerator::new(FakeTransport::responding(429, "slow down"));

    assert!(generator.generate_to_file(&config).await.is_err());

    assert_eq!(fs::read_to_string(&config.output_path)?, "# Previous release");
    Ok(())
}

#[tokio::test]
async fn test_error_kinds_are_distinguishable() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = config_in(temp_dir.path(), &release_env());

    let network = ReleaseNotesGenerator::new(FakeTransport::unreachable("connection refused"))
        .generate(&config)
        .await;
    assert!(matches!(network, Err(GenerateError::Network(ref m)) if m.contains("connection refused")));

    let garbage = ReleaseNotesGenerator::new(FakeTransport::responding(200, "not json"))
        .generate(&config)
        .await;
    assert!(matches!(garbage, Err(GenerateError::Parse(_))));

    let no_choices = ReleaseNotesGenerator::new(FakeTransport::responding(200, r#"{"id":"x"}"#))
        .generate(&config)
        .await;
    assert!(matches!(no_choices, Err(GenerateError::MissingCompletion)));
    assert!(!config.output_path.exists());
    Ok(())
}

#[tokio::test]
async fn test_consecutive_runs_are_identical() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = config_in(temp_dir.path(), &release_env());
    let generator =
        ReleaseNotesGenerator::new(FakeTransport::with_completion("## 🎉 New Features\n- Dark mode"));

    generator.generate_to_file(&config).await?;
    let first = fs::read(&config.output_path)?;
    generator.generate_to_file(&config).await?;
    let second = fs::read(&config.output_path)?;

    assert_eq!(first, second);
    Ok(())
}

#[tokio::test]
async fn test_overwrite_replaces_longer_file() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = config_in(temp_dir.path(), &release_env());
    fs::write(&config.output_path, "a much longer set of stale release notes")?;

    ReleaseNotesGenerator::new(FakeTransport::with_completion("short"))
        .generate_to_file(&config)
        .await?;

    assert_eq!(fs::read_to_string(&config.output_path)?, "short");
    Ok(())
}

#[tokio::test]
async fn test_custom_payload_builder() -> Result<()> {
    fn single_message(
        context: &release_scribe::ReleaseContext,
        _settings: &release_scribe::config::PromptSettings,
        model: &str,
    ) -> CompletionRequest {
        CompletionRequest {
            model: model.to_string(),
            messages: vec![release_scribe::changes::ChatMessage::user(format!(
                "notes for {}",
                context.version
            ))],
        }
    }

    let temp_dir = TempDir::new()?;
    let transport = FakeTransport::with_completion("ok");
    let generator = ReleaseNotesGenerator::with_payload_builder(transport.clone(), single_message);

    generator
        .generate(&config_in(temp_dir.path(), &release_env()))
        .await?;

    let body: CompletionRequest = serde_json::from_str(&transport.requests()[0].body)?;
    assert_eq!(body.messages.len(), 1);
    assert_eq!(body.messages[0].role, Role::User);
    assert_eq!(body.messages[0].content, "notes for 1.2.0");
    Ok(())
}

#[tokio::test]
async fn test_dry_run_sends_nothing() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = config_in(temp_dir.path(), &release_env());
    let transport = FakeTransport::with_completion("unused");
    let generator = ReleaseNotesGenerator::new(transport.clone());

    run_release_notes(
        &generator,
        &config,
        OutputOptions {
            dry_run: true,
            ..Default::default()
        },
    )
    .await?;

    assert!(transport.requests().is_empty());
    assert!(!config.output_path.exists());
    Ok(())
}

#[tokio::test]
async fn test_run_reports_failure_with_context() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let config = config_in(temp_dir.path(), &release_env());
    let generator = ReleaseNotesGenerator::new(FakeTransport::responding(200, completion_body("ok")));

    run_release_notes(&generator, &config, OutputOptions::default()).await?;
    assert_eq!(fs::read_to_string(&config.output_path)?, "ok");

    let failing = ReleaseNotesGenerator::new(FakeTransport::responding(503, "maintenance"));
    let err = run_release_notes(&failing, &config, OutputOptions::default())
        .await
        .expect_err("503 should fail the run");
    let message = format!("{err:#}");
    assert!(message.starts_with("Failed to generate release notes"));
    assert!(message.contains("HTTP 503: maintenance"));
    Ok(())
}

#[test]
fn test_write_into_missing_directory_fails() {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let path = temp_dir.path().join("does-not-exist").join("release_notes.md");

    let err = write_release_notes(&path, "notes").expect_err("parent directory is missing");
    assert!(matches!(err, GenerateError::Write { .. }));
}
