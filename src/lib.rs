//! release-scribe - AI-generated release notes for CI pipelines
//!
//! Turns a commit history plus release metadata into user-friendly release
//! notes by way of a single chat-completion call, and writes them to disk.

#![allow(clippy::uninlined_format_args)] // Style preference
#![allow(clippy::format_push_string)] // Performance improvement but stylistic
#![allow(clippy::return_self_not_must_use)] // Builder pattern is clear enough

pub mod changes;
pub mod cli;
pub mod common;
pub mod config;
pub mod context;
pub mod error;
pub mod logger;
pub mod providers;
pub mod transport;
pub mod ui;

// Re-export important structs and functions for easier testing
pub use changes::{CompletionRequest, ReleaseNotesGenerator};
pub use config::Config;
pub use context::ReleaseContext;
pub use error::GenerateError;
pub use providers::{Provider, ProviderConfig};
pub use transport::{HttpTransport, JsonPost, Transport, TransportResponse};
