//! `gptlite run` – open the shell window.

use anyhow::Result;
use gptlite_core::config::ShellConfig;

#[cfg(feature = "webview")]
pub fn run_shell(cfg: ShellConfig) -> Result<()> {
    crate::shell::run(cfg)
}

#[cfg(not(feature = "webview"))]
pub fn run_shell(cfg: ShellConfig) -> Result<()> {
    // Still validate the config so `run` reports config errors first.
    cfg.trusted_set()?;
    anyhow::bail!(
        "this build has no window support; rebuild gptlite-cli with `--features webview`"
    )
}
