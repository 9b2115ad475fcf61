//! CLI parse tests.

use super::{Cli, CliCommand, LicenseArgs};
use clap::Parser;

pub(super) fn parse(args: &[&str]) -> CliCommand {
    let cli = Cli::try_parse_from(args).unwrap();
    cli.command
}

fn license_args(cmd: CliCommand) -> LicenseArgs {
    match cmd {
        CliCommand::Activate(a) | CliCommand::Deactivate(a) | CliCommand::Check(a) => a,
        CliCommand::Completions { .. } => panic!("expected a license command"),
    }
}

mod overrides;
