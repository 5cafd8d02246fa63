//! Release notes generation
//!
//! Wire types live in `models`, the prompt and payload builder in `prompt`,
//! the generator itself in `releasenotes` and the command glue in `cli`.

pub mod cli;
pub mod models;
pub mod prompt;
pub mod releasenotes;

pub use cli::{OutputOptions, handle_release_notes_command, run_release_notes};
pub use models::{ChatMessage, CompletionRequest, CompletionResponse, Role};
pub use prompt::{PayloadBuilder, build_chat_completion_request};
pub use releasenotes::{ReleaseNotesGenerator, extract_completion, write_release_notes};
