//! Tests for filename, interactive, completions and man subcommands.

use super::parse;
use crate::cli::CliCommand;
use clap_complete::Shell;

#[test]
fn cli_parse_filename() {
    match parse(&["utmqr", "filename", "https://example.com/a", "-c", "spring"]) {
        CliCommand::Filename {
            base,
            campaign,
            ext,
        } => {
            assert_eq!(base, "https://example.com/a");
            assert_eq!(campaign, "spring");
            assert_eq!(ext, "png");
        }
        _ => panic!("expected Filename"),
    }
}

#[test]
fn cli_parse_filename_ext() {
    match parse(&["utmqr", "filename", "example.com", "--ext", "pdf"]) {
        CliCommand::Filename { campaign, ext, .. } => {
            assert_eq!(campaign, "");
            assert_eq!(ext, "pdf");
        }
        _ => panic!("expected Filename with ext"),
    }
}

#[test]
fn cli_parse_interactive() {
    match parse(&["utmqr", "interactive"]) {
        CliCommand::Interactive { out_dir } => assert!(out_dir.is_none()),
        _ => panic!("expected Interactive"),
    }
    match parse(&["utmqr", "interactive", "-o", "out"]) {
        CliCommand::Interactive { out_dir } => {
            assert_eq!(out_dir.as_deref(), Some(std::path::Path::new("out")));
        }
        _ => panic!("expected Interactive with out dir"),
    }
}

#[test]
fn cli_parse_completions() {
    match parse(&["utmqr", "completions", "bash"]) {
        CliCommand::Completions { shell } => assert_eq!(shell, Shell::Bash),
        _ => panic!("expected Completions"),
    }
}

#[test]
fn cli_parse_man() {
    match parse(&["utmqr", "man"]) {
        CliCommand::Man => {}
        _ => panic!("expected Man"),
    }
}

#[test]
fn cli_definition_is_consistent() {
    use clap::CommandFactory;
    crate::cli::Cli::command().debug_assert();
}
