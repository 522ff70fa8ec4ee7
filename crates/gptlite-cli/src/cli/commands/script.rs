//! `gptlite script` – print the initialization script.

use gptlite_core::config::ShellConfig;
use gptlite_core::page_script;

pub fn run_script(cfg: &ShellConfig) {
    println!("{}", page_script::initialization_script(cfg));
}
