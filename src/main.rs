use anyhow::{Context, Result};
use colored::*;
use is_terminal::IsTerminal;
use log::{debug, info};
use std::path::Path;
use std::time::Duration;

use quark_cli::api::NeutronClient;
use quark_cli::config::{self, Config};
use quark_cli::{cli, commands, output, resource};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("{} {:#}", "Error:".red().bold(), err);
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let registry = resource::registry()?;
    let parsed = cli::parse_command(registry, std::env::args_os()).unwrap_or_else(|err| err.exit());

    if parsed.global.no_color || !std::io::stdout().is_terminal() {
        colored::control::set_override(false);
    }

    // Load .env file if it exists, so QUARK_LOG_FILE can come from it
    dotenvy::dotenv().ok();
    let log_file = config::log_file(&parsed.global, |key| std::env::var(key).ok());
    init_logging(log_file.as_deref(), parsed.global.debug)?;
    info!("Starting quark-cli: {}", parsed.name);
    debug!("Registered {} resource commands", registry.len());

    let mut config = Config::load()?;
    config.apply_env()?;
    config.apply_args(&parsed.global);

    let client = NeutronClient::with_timeouts(
        config.endpoint()?.to_string(),
        config.token()?.to_string(),
        Duration::from_secs(config.timeout_secs),
        Duration::from_secs(config.connect_timeout_secs),
    )?;
    debug!("Using endpoint {}", client.base_url());

    let result = commands::execute(parsed.descriptor, &parsed.invocation, &client).await?;
    println!("{}", output::render(&result, config.format)?);

    Ok(())
}

fn init_logging(log_file: Option<&Path>, debug: bool) -> Result<()> {
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if debug {
        builder.filter_level(log::LevelFilter::Debug);
    }

    // Log to file (truncate on each run) when requested
    if let Some(path) = log_file {
        let file = std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)
            .with_context(|| format!("Failed to open log file: {}", path.display()))?;
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }

    builder.try_init().context("Failed to initialize logger")
}
