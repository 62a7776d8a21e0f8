//! CLI parse tests.

use super::{Cli, CliCommand};
use clap::Parser;

fn parse(args: &[&str]) -> CliCommand {
    Cli::try_parse_from(args).unwrap().command
}

#[test]
fn batch_with_overrides() {
    let cmd = parse(&[
        "ffm",
        "batch",
        "https://files.fm/u/abc",
        "--batch-size",
        "10",
        "--include-folders",
    ]);
    match cmd {
        CliCommand::Batch {
            url,
            batch_size,
            include_folders,
        } => {
            assert_eq!(url, "https://files.fm/u/abc");
            assert_eq!(batch_size, Some(10));
            assert!(include_folders);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn all_defaults_to_saved_settings() {
    let cmd = parse(&["ffm", "all", "https://files.fm/u/abc"]);
    match cmd {
        CliCommand::All {
            url,
            batch_size,
            include_folders,
        } => {
            assert_eq!(url, "https://files.fm/u/abc");
            assert_eq!(batch_size, None);
            assert!(!include_folders);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn status_url_is_optional() {
    match parse(&["ffm", "status"]) {
        CliCommand::Status { url } => assert!(url.is_none()),
        other => panic!("unexpected command: {other:?}"),
    }
    match parse(&["ffm", "status", "https://files.fm/u/abc"]) {
        CliCommand::Status { url } => assert_eq!(url.as_deref(), Some("https://files.fm/u/abc")),
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn reset_requires_url() {
    assert!(Cli::try_parse_from(["ffm", "reset"]).is_err());
    match parse(&["ffm", "reset", "https://files.fm/u/abc"]) {
        CliCommand::Reset { url } => assert_eq!(url, "https://files.fm/u/abc"),
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn config_takes_explicit_values() {
    match parse(&["ffm", "config", "--batch-size", "25", "--include-folders", "true"]) {
        CliCommand::Config {
            batch_size,
            include_folders,
        } => {
            assert_eq!(batch_size, Some(25));
            assert_eq!(include_folders, Some(true));
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn batch_size_requires_a_value() {
    assert!(Cli::try_parse_from(["ffm", "batch", "https://files.fm/u/abc", "--batch-size"]).is_err());
}
