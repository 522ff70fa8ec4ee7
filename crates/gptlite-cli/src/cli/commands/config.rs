//! `gptlite config` – print config path and effective values.

use anyhow::Result;
use gptlite_core::config::ShellConfig;
use std::path::Path;

pub fn run_config(path: &Path, cfg: &ShellConfig) -> Result<()> {
    println!("# {}", path.display());
    print!("{}", toml::to_string_pretty(cfg)?);
    Ok(())
}
