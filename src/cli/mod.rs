//! Command-line surface
//!
//! The command tree is generated from the [`CommandRegistry`]: clap enforces
//! required arguments and rejects unknown commands before any handler runs.

pub mod app;

use clap::error::ErrorKind;
use clap::{ArgMatches, FromArgMatches};
use std::ffi::OsString;

pub use app::{GlobalArgs, build_cli};

use crate::commands::{Invocation, ListParams};
use crate::resource::{ArgValue, ArgValues, CommandRegistry, ResourceCommandDescriptor, Verb};

/// A fully parsed command line
#[derive(Debug, Clone)]
pub struct ParsedCommand {
    pub global: GlobalArgs,
    pub name: String,
    pub descriptor: &'static ResourceCommandDescriptor,
    pub invocation: Invocation,
}

/// Parse a command line against the registry
pub fn parse_command<I, T>(registry: &'static CommandRegistry, args: I) -> Result<ParsedCommand, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    let mut cli = build_cli(registry);
    let matches = cli.try_get_matches_from_mut(args)?;
    let global = GlobalArgs::from_arg_matches(&matches)?;

    let (name, sub_matches) = matches
        .subcommand()
        .ok_or_else(|| cli.error(ErrorKind::MissingSubcommand, "a command is required"))?;
    let descriptor = registry
        .get(name)
        .ok_or_else(|| cli.error(ErrorKind::InvalidSubcommand, format!("unknown command '{}'", name)))?;

    Ok(ParsedCommand {
        global,
        name: name.to_string(),
        descriptor,
        invocation: invocation_from_matches(descriptor, sub_matches),
    })
}

/// Collect argument values of one subcommand, keyed by destination
pub fn invocation_from_matches(descriptor: &ResourceCommandDescriptor, matches: &ArgMatches) -> Invocation {
    let mut values = ArgValues::new();
    for spec in descriptor.argument_specs {
        if spec.repeatable {
            let all: Vec<String> = matches
                .get_many::<String>(spec.dest)
                .map(|occurrences| occurrences.cloned().collect())
                .unwrap_or_default();
            values.insert(spec.dest, ArgValue::Many(all));
        } else if let Some(value) = matches.get_one::<String>(spec.dest) {
            values.insert(spec.dest, ArgValue::Single(value.clone()));
        }
    }

    let id = if descriptor.verb.takes_id() {
        matches.get_one::<String>(app::ID_ARG).cloned()
    } else {
        None
    };

    let list = if descriptor.verb == Verb::List {
        ListParams {
            limit: matches.get_one::<u32>(app::LIMIT_ARG).copied(),
            marker: matches.get_one::<String>(app::MARKER_ARG).cloned(),
            filters: matches
                .get_many::<(String, String)>(app::FILTER_ARG)
                .map(|filters| filters.cloned().collect::<Vec<_>>())
                .unwrap_or_default(),
        }
    } else {
        ListParams::default()
    };

    Invocation { values, id, list }
}
