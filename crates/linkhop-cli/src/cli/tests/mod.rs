//! CLI parse tests.

use super::{Cli, CliCommand, TransportArg};
use clap::Parser;

pub(super) fn parse(args: &[&str]) -> CliCommand {
    let cli = Cli::try_parse_from(args).unwrap();
    cli.command
}


#[test]
fn cli_parse_completions() {
    match parse(&["linkhop", "completions", "bash"]) {
        CliCommand::Completions { shell } => assert_eq!(shell, clap_complete::Shell::Bash),
        _ => panic!("expected Completions"),
    }
}

#[test]
fn cli_parse_man() {
    assert!(matches!(parse(&["linkhop", "man"]), CliCommand::Man));
}

#[test]
fn transport_arg_maps_to_kind() {
    use linkhop_core::TransportKind;
    assert_eq!(TransportKind::from(TransportArg::Curl), TransportKind::Curl);
    assert_eq!(TransportKind::from(TransportArg::Socket), TransportKind::Socket);
}

#[test]
fn cli_definition_is_consistent() {
    use clap::CommandFactory;
    Cli::command().debug_assert();
}
