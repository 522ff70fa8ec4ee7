pub mod config;
pub mod logging;

pub mod context_menu;
pub mod ipc;
pub mod opener;
pub mod page_script;
pub mod policy;
pub mod windows;
