//! `gptlite check <destination>` – show how a navigation would be routed.

use anyhow::Result;
use gptlite_core::config::ShellConfig;
use gptlite_core::opener::SystemOpener;
use gptlite_core::policy::{classify, NavigationDecision, NavigationGate, NavigationRequest};
use std::sync::Arc;

pub fn run_check(cfg: &ShellConfig, destination: &str, base: Option<&str>, open: bool) -> Result<()> {
    let trusted = cfg.trusted_set()?;

    let decision = if open {
        let gate = NavigationGate::new(Arc::new(trusted), Arc::new(SystemOpener));
        gate.route(destination, base)
    } else {
        classify(destination, base, &trusted)
    };

    println!("{}", describe(destination, base, decision));
    Ok(())
}

fn describe(destination: &str, base: Option<&str>, decision: NavigationDecision) -> String {
    let target = match NavigationRequest::resolve(destination, base) {
        Ok(request) => request.into_destination(),
        Err(e) => format!("<{e}>"),
    };
    let place = match decision {
        NavigationDecision::Contain => "opens in the shell window",
        NavigationDecision::Handoff => "opens in the system browser",
    };
    format!("{decision}\t{target}\t({place})")
}
