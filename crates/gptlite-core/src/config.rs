use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::policy::TrustedOriginSet;

/// Phone User-Agent: the "Mobile" token makes the site serve its light bundle.
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Linux; Android 14; Pixel 8) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Mobile Safari/537.36";

pub const DEFAULT_START_URL: &str = "https://chatgpt.com";

/// Window geometry and chrome (optional `[window]` section in config.toml).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    pub width: u32,
    pub height: u32,
    pub min_width: u32,
    pub min_height: u32,
    /// PNG icon for the window; missing or unreadable files are ignored.
    pub icon: Option<PathBuf>,
    /// Hide the native menu bar (where the platform has one per window).
    pub auto_hide_menu_bar: bool,
    /// Enable the webview inspector.
    pub devtools: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "GPT Lite".to_string(),
            width: 800,
            height: 1000,
            min_width: 400,
            min_height: 600,
            icon: None,
            auto_hide_menu_bar: true,
            devtools: false,
        }
    }
}

/// Global configuration loaded from `~/.config/gptlite/config.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShellConfig {
    /// Page loaded when the window opens.
    pub start_url: String,
    /// Origins whose pages stay inside the window; everything else goes to the browser.
    pub trusted_origins: Vec<String>,
    /// User-Agent sent with every request from the webview.
    pub user_agent: String,
    /// Inject the floating refresh button (and F5 binding).
    pub refresh_button: bool,
    /// Platform application identifier (Windows AppUserModelID, Linux app id).
    pub app_id: String,
    pub window: WindowConfig,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            start_url: DEFAULT_START_URL.to_string(),
            trusted_origins: vec![
                "https://chatgpt.com".to_string(),
                "https://auth.openai.com".to_string(),
            ],
            user_agent: DEFAULT_USER_AGENT.to_string(),
            refresh_button: true,
            app_id: "com.prmeta.gpt-lite".to_string(),
            window: WindowConfig::default(),
        }
    }
}

impl ShellConfig {
    /// Validates `trusted_origins` and builds the set used for routing.
    pub fn trusted_set(&self) -> Result<TrustedOriginSet> {
        TrustedOriginSet::new(&self.trusted_origins).context("invalid trusted_origins in config")
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("gptlite")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<ShellConfig> {
    let path = config_path()?;
    load_or_init_at(&path)
}

/// Same as [`load_or_init`] for an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<ShellConfig> {
    if !path.exists() {
        let default_cfg = ShellConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("create config dir: {}", parent.display()))?;
        }
        fs::write(path, toml).with_context(|| format!("write config: {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from_path(path)
}

/// Load an existing configuration file; missing keys take their defaults.
pub fn load_from_path(path: &Path) -> Result<ShellConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config: {}", path.display()))?;
    let cfg: ShellConfig =
        toml::from_str(&data).with_context(|| format!("parse config: {}", path.display()))?;
    Ok(cfg)
}
