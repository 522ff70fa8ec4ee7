//! Tests for subcommand and flag parsing.

use super::parse;
use crate::cli::{Cli, CliCommand};
use clap::{CommandFactory, Parser};
use std::path::PathBuf;

#[test]
fn cli_definition_is_consistent() {
    Cli::command().debug_assert();
}

#[test]
fn cli_parse_no_subcommand_defaults_to_shell() {
    let cli = parse(&["gptlite"]);
    assert!(cli.command.is_none());
    assert!(cli.config.is_none());
}

#[test]
fn cli_parse_run() {
    match parse(&["gptlite", "run"]).command {
        Some(CliCommand::Run) => {}
        other => panic!("expected Run, got {other:?}"),
    }
}

#[test]
fn cli_parse_check() {
    match parse(&["gptlite", "check", "https://chatgpt.com/c/1"]).command {
        Some(CliCommand::Check {
            destination,
            base,
            open,
        }) => {
            assert_eq!(destination, "https://chatgpt.com/c/1");
            assert!(base.is_none());
            assert!(!open);
        }
        other => panic!("expected Check, got {other:?}"),
    }
}

#[test]
fn cli_parse_check_with_base_and_open() {
    match parse(&[
        "gptlite",
        "check",
        "/c/2",
        "--base",
        "https://chatgpt.com/",
        "--open",
    ])
    .command
    {
        Some(CliCommand::Check {
            destination,
            base,
            open,
        }) => {
            assert_eq!(destination, "/c/2");
            assert_eq!(base.as_deref(), Some("https://chatgpt.com/"));
            assert!(open);
        }
        other => panic!("expected Check, got {other:?}"),
    }
}

#[test]
fn cli_parse_global_config_after_subcommand() {
    let cli = parse(&["gptlite", "script", "--config", "/tmp/gptlite.toml"]);
    assert_eq!(cli.config, Some(PathBuf::from("/tmp/gptlite.toml")));
    assert!(matches!(cli.command, Some(CliCommand::Script)));
}

#[test]
fn cli_parse_config_and_manpage() {
    assert!(matches!(parse(&["gptlite", "config"]).command, Some(CliCommand::Config)));
    assert!(matches!(parse(&["gptlite", "manpage"]).command, Some(CliCommand::Manpage)));
}

#[test]
fn cli_parse_completions() {
    match parse(&["gptlite", "completions", "bash"]).command {
        Some(CliCommand::Completions { shell }) => {
            assert_eq!(shell, clap_complete::Shell::Bash)
        }
        other => panic!("expected Completions, got {other:?}"),
    }
}

#[test]
fn cli_parse_check_requires_destination() {
    assert!(Cli::try_parse_from(["gptlite", "check"]).is_err());
}

#[test]
fn cli_parse_unknown_subcommand_fails() {
    assert!(Cli::try_parse_from(["gptlite", "browse"]).is_err());
}
