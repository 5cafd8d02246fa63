use super::releasenotes::ReleaseNotesGenerator;
use crate::common::CommonParams;
use crate::config::Config;
use crate::transport::{HttpTransport, Transport};
use crate::ui;
use anyhow::{Context, Result};
use colored::Colorize;

/// How the outcome of a run is reported
#[derive(Clone, Copy, Debug, Default)]
pub struct OutputOptions {
    /// Echo the notes to stdout after writing them
    pub print: bool,
    /// Print the request body instead of sending it
    pub dry_run: bool,
}

/// Handles the release notes generation command.
///
/// Loads configuration from the environment (and `.release-notes.toml` if
/// present), then delegates to [`run_release_notes`] with the real HTTP transport.
pub async fn handle_release_notes_command(
    common: CommonParams,
    options: OutputOptions,
) -> Result<()> {
    let overrides = common.to_overrides()?;
    let config = Config::load(&overrides).context("Failed to load configuration")?;
    let generator = ReleaseNotesGenerator::new(HttpTransport::new());

    run_release_notes(&generator, &config, options).await
}

/// Runs one generation against an already resolved configuration.
///
/// The output file is only touched after the provider answered successfully.
pub async fn run_release_notes<T: Transport>(
    generator: &ReleaseNotesGenerator<T>,
    config: &Config,
    options: OutputOptions,
) -> Result<()> {
    if options.dry_run {
        let request = generator.build_request(config);
        let body = serde_json::to_string_pretty(&request)
            .context("Failed to encode chat completion request")?;
        ui::print_info(&format!("POST {}", config.provider.endpoint()));
        println!("{body}");
        return Ok(());
    }

    let spinner = ui::create_spinner(&format!(
        "Generating release notes with {}...",
        config.provider.model
    ));

    let result = generator.generate_to_file(config).await;
    spinner.finish_and_clear();
    let notes = result.context("Failed to generate release notes")?;

    ui::print_success(&format!(
        "✨ Release notes written to {}",
        config.output_path.display().to_string().bright_green()
    ));

    // An explicit --print wins over --quiet; quiet only drops the borders
    if options.print {
        if ui::is_quiet_mode() {
            println!("{notes}");
        } else {
            ui::print_bordered_content(&notes);
        }
    }

    Ok(())
}
