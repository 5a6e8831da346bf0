use clap::{Arg, ArgAction, Args, Command};
use std::path::PathBuf;

use crate::output::OutputFormat;
use crate::resource::{ArgumentSpec, CommandRegistry, ResourceCommandDescriptor, Verb};

/// Argument id holding the record id of show/delete commands
pub const ID_ARG: &str = "id";
pub const LIMIT_ARG: &str = "limit";
pub const MARKER_ARG: &str = "marker";
pub const FILTER_ARG: &str = "filter";

/// Options shared by every command
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Networking service endpoint (overrides QUARK_URL and the config file)
    #[arg(long = "os-url", global = true, value_name = "URL")]
    pub os_url: Option<String>,

    /// Pre-issued authentication token (overrides QUARK_TOKEN and the config file)
    #[arg(long = "os-token", global = true, value_name = "TOKEN")]
    pub os_token: Option<String>,

    /// Output format
    #[arg(short = 'f', long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Request timeout in seconds
    #[arg(long, global = true, value_name = "SECS")]
    pub timeout: Option<u64>,

    /// Log requests and responses at debug level
    #[arg(long, global = true)]
    pub debug: bool,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Write logs to this file, truncated on each run (overrides QUARK_LOG_FILE)
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

/// Build the full command tree: global options plus one subcommand per descriptor
pub fn build_cli(registry: &CommandRegistry) -> Command {
    let command = Command::new("quark")
        .about("Manage Quark networking extensions: MAC address ranges, routes and IP policies")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true);

    GlobalArgs::augment_args(command).subcommands(
        registry
            .iter()
            .map(|(name, descriptor)| descriptor_command(name, descriptor)),
    )
}

fn descriptor_command(name: &'static str, descriptor: &ResourceCommandDescriptor) -> Command {
    let command = Command::new(name).about(descriptor.about);

    let command = match descriptor.verb {
        Verb::List => command.args(list_args()),
        Verb::Show | Verb::Delete => command.arg(
            Arg::new(ID_ARG)
                .value_name(descriptor.id_metavar())
                .help(format!("ID of the {} to {}", descriptor.resource_singular(), descriptor.verb))
                .required(true),
        ),
        Verb::Create => command,
    };

    command.args(descriptor.argument_specs.iter().map(argument))
}

/// Generic pagination and filter options of list commands
fn list_args() -> [Arg; 3] {
    [
        Arg::new(LIMIT_ARG)
            .long("limit")
            .value_name("N")
            .value_parser(clap::value_parser!(u32))
            .help("Maximum number of records to return"),
        Arg::new(MARKER_ARG)
            .long("marker")
            .value_name("ID")
            .help("ID of the last record of the previous page"),
        Arg::new(FILTER_ARG)
            .long("filter")
            .value_name("KEY=VALUE")
            .value_parser(parse_filter)
            .action(ArgAction::Append)
            .help("Only list records whose KEY equals VALUE (repeatable)"),
    ]
}

fn argument(spec: &ArgumentSpec) -> Arg {
    let mut arg = Arg::new(spec.dest)
        .value_name(spec.metavar)
        .help(spec.help)
        .required(spec.required)
        .action(if spec.repeatable { ArgAction::Append } else { ArgAction::Set });

    if !spec.positional {
        arg = arg.long(spec.name);
        let hyphenated = spec.name.replace('_', "-");
        if hyphenated != spec.name {
            arg = arg.visible_alias(hyphenated);
        }
    }

    arg
}

fn parse_filter(raw: &str) -> Result<(String, String), String> {
    match raw.split_once('=') {
        Some((key, value)) if !key.is_empty() => Ok((key.to_string(), value.to_string())),
        _ => Err(format!("expected KEY=VALUE, got '{}'", raw)),
    }
}
