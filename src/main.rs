use release_scribe::{cli, logger, ui};
use std::process;

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(e) = logger::init() {
        eprintln!("Warning: Failed to initialize logger: {e}");
    }

    if let Err(e) = cli::main().await {
        ui::print_error(&format!("Error: {e:#}"));
        process::exit(1);
    }
}
