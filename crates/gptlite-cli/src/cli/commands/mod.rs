//! CLI command handlers, one per file.

mod check;
mod completions;
mod config;
mod run;
mod script;

pub use check::run_check;
pub use completions::{run_completions, run_manpage};
pub use config::run_config;
pub use run::run_shell;
pub use script::run_script;
