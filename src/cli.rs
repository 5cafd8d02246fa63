use crate::changes::{OutputOptions, handle_release_notes_command};
use crate::common::CommonParams;
use crate::log_debug;
use crate::providers::Provider;
use crate::ui;
use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, crate_version};
use colored::Colorize;

const LOG_FILE: &str = "release-scribe-debug.log";

/// Command-line surface. Every flag is optional: a bare invocation reads
/// everything from the environment and writes `release_notes.md`.
#[derive(Parser)]
#[command(
    author,
    version = crate_version!(),
    about = "release-scribe: AI-generated release notes from commit history",
    long_about = "Reads the commit history and release metadata from the environment, asks a chat-completion provider for user-friendly release notes, and writes them to release_notes.md.",
    disable_version_flag = true,
    after_help = get_dynamic_help(),
    styles = get_styles(),
)]
#[allow(clippy::struct_excessive_bools)]
pub struct Cli {
    #[command(flatten)]
    pub common: CommonParams,

    /// Also print the generated notes to stdout
    #[arg(short, long, help = "Also print the generated notes to stdout")]
    pub print: bool,

    /// Show the request that would be sent, without sending it
    #[arg(
        long,
        help = "Print the chat completion request body and exit without calling the provider"
    )]
    pub dry_run: bool,

    /// Log debug messages to a file
    #[arg(short = 'l', long = "log", help = "Log debug messages to a file")]
    pub log: bool,

    /// Specify a custom log file path
    #[arg(long = "log-file", help = "Specify a custom log file path")]
    pub log_file: Option<String>,

    /// Suppress non-essential output (spinner, success messages)
    #[arg(short = 'q', long = "quiet", help = "Suppress non-essential output")]
    pub quiet: bool,

    /// Display the version
    #[arg(short = 'v', long = "version", help = "Display the version")]
    pub version: bool,
}

/// Define custom styles for Clap
fn get_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Magenta.on_default().bold())
        .usage(AnsiColor::Cyan.on_default().bold())
        .literal(AnsiColor::Green.on_default().bold())
        .placeholder(AnsiColor::Yellow.on_default())
        .valid(AnsiColor::Blue.on_default().bold())
        .invalid(AnsiColor::Red.on_default().bold())
        .error(AnsiColor::Red.on_default().bold())
}

/// Parse the command-line arguments
pub fn parse_args() -> Cli {
    Cli::parse()
}

/// Help footer listing providers and the environment they read
fn get_dynamic_help() -> String {
    let providers = Provider::ALL
        .iter()
        .map(|p| format!("{} ({})", p.name().bold(), p.api_key_env()))
        .collect::<Vec<_>>()
        .join(" • ");

    format!(
        "\nAvailable providers: {providers}\n\
        Release inputs: COMMITS, GITHUB_REPOSITORY, DOCKERLIKE_RELEASE_NAME, NEW_VERSION"
    )
}

/// Main function to parse arguments and handle the command
pub async fn main() -> anyhow::Result<()> {
    let cli = parse_args();

    if cli.version {
        ui::print_version(crate_version!());
        return Ok(());
    }

    if cli.log || cli.log_file.is_some() {
        let log_file = cli.log_file.as_deref().unwrap_or(LOG_FILE);
        crate::logger::set_log_file(log_file)?;
        log_debug!("Logging to {}", log_file);
    }

    if cli.quiet {
        ui::set_quiet_mode(true);
    }

    let options = OutputOptions {
        print: cli.print,
        dry_run: cli.dry_run,
    };

    handle_release_notes_command(cli.common, options).await
}
