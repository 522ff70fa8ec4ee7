use gptlite_core::logging;

mod cli;
#[cfg(feature = "webview")]
mod shell;

use crate::cli::Cli;

fn main() {
    // Initialize logging as early as possible; a read-only state dir must not stop the shell.
    if let Err(err) = logging::init_logging() {
        logging::init_logging_stderr();
        tracing::warn!("file logging unavailable, using stderr: {:#}", err);
    }

    // Parse CLI and dispatch.
    if let Err(err) = Cli::run_from_args() {
        tracing::error!("{:#}", err);
        eprintln!("gptlite error: {:#}", err);
        std::process::exit(1);
    }
}
