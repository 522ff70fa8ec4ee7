//! CLI for the GPT Lite desktop shell.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use gptlite_core::config::{self, ShellConfig};
use std::path::{Path, PathBuf};

use commands::{run_check, run_completions, run_config, run_manpage, run_script, run_shell};

/// Top-level CLI. With no subcommand the shell window is launched.
#[derive(Debug, Parser)]
#[command(name = "gptlite")]
#[command(about = "GPT Lite: lightweight desktop shell for ChatGPT", long_about = None)]
pub struct Cli {
    /// Config file to use instead of ~/.config/gptlite/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<CliCommand>,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Open the shell window (default).
    Run,

    /// Show whether a destination would stay in the window or open in the browser.
    Check {
        /// Destination as a page would request it (absolute or relative).
        destination: String,

        /// Address of the current page, for resolving relative destinations.
        #[arg(long, value_name = "URL")]
        base: Option<String>,

        /// Actually hand the destination to the system browser if it is not contained.
        #[arg(long)]
        open: bool,
    },

    /// Print the config file path and the effective configuration.
    Config,

    /// Print the script injected into the hosted page.
    Script,

    /// Generate shell completions.
    Completions {
        /// Target shell.
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },

    /// Print a roff man page.
    Manpage,
}

impl Cli {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        // Generated output (completions, man page) needs no config file.
        let load = || -> Result<(PathBuf, ShellConfig)> {
            let (path, cfg) = load_config(cli.config.as_deref())?;
            tracing::debug!("loaded config from {}: {:?}", path.display(), cfg);
            Ok((path, cfg))
        };

        match cli.command.as_ref().unwrap_or(&CliCommand::Run) {
            CliCommand::Run => run_shell(load()?.1)?,
            CliCommand::Check {
                destination,
                base,
                open,
            } => run_check(&load()?.1, destination, base.as_deref(), *open)?,
            CliCommand::Config => {
                let (path, cfg) = load()?;
                run_config(&path, &cfg)?;
            }
            CliCommand::Script => run_script(&load()?.1),
            CliCommand::Completions { shell } => run_completions(*shell)?,
            CliCommand::Manpage => run_manpage()?,
        }

        Ok(())
    }
}

/// Explicit `--config` files must exist; the default location is created on first run.
fn load_config(explicit: Option<&Path>) -> Result<(PathBuf, ShellConfig)> {
    match explicit {
        Some(path) => Ok((path.to_path_buf(), config::load_from_path(path)?)),
        None => {
            let path = config::config_path()?;
            let cfg = config::load_or_init_at(&path)?;
            Ok((path, cfg))
        }
    }
}

#[cfg(test)]
mod tests;
