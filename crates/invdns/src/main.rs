// # invdns - Inventory DNS record client
//
// This binary is a THIN integration layer:
// 1. Building the command tree from the record registry
// 2. Reading configuration (file, environment, global flags)
// 3. Initializing tracing and the runtime
// 4. Dispatching exactly one request and printing the response
//
// All field mapping and validation lives in invdns-core.
//
// ## Configuration
//
// - `INVDNS_CONFIG`: Path to a JSON config file (optional)
// - `INVDNS_REMOTE`: Base URL of the inventory server
// - `INVDNS_API_VERSION`: API major version (default: 1)
// - `INVDNS_USERNAME` / `INVDNS_PASSWORD`: Basic auth credentials
// - `INVDNS_MODE`: Set to `dry-run` to build requests without sending
// - `INVDNS_LOG_LEVEL`: trace, debug, info, warn, error (default: warn)
//
// ## Example
//
// ```bash
// export INVDNS_REMOTE=https://inventory.example.com
// export INVDNS_USERNAME=admin
// export INVDNS_PASSWORD=your_password
//
// invdns A create --domain example.com --ip 10.0.0.1 --private
// invdns CNAME detail --pk 42 --format json
// ```

use anyhow::{Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};
use invdns_core::format::render;
use invdns_core::{ClientConfig, Dispatcher, OutputFormat, Registry, record_commands};
use invdns_http::HttpTransport;
use std::env;
use std::process::ExitCode;
use tracing::{Level, debug, error};
use tracing_subscriber::FmtSubscriber;

/// Exit codes for the different failure classes
#[derive(Debug, Clone, Copy)]
enum InvdnsExitCode {
    /// Request succeeded (or help/version was printed)
    Success = 0,
    /// Bad arguments, failed validation or bad configuration
    UsageError = 1,
    /// Non-success HTTP status or transport failure
    RequestFailed = 2,
}

impl From<InvdnsExitCode> for ExitCode {
    fn from(code: InvdnsExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

fn cli(registry: &Registry) -> Command {
    Command::new("invdns")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Manage DNS records in the inventory")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("remote")
                .long("remote")
                .global(true)
                .value_name("URL")
                .help("Base URL of the inventory server (overrides INVDNS_REMOTE)"),
        )
        .arg(
            Arg::new("format")
                .long("format")
                .global(true)
                .value_parser(["text", "json"])
                .help("Output format"),
        )
        .arg(
            Arg::new("dry_run")
                .long("dry-run")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Build and print the request without sending it"),
        )
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log request details to stderr"),
        )
        .subcommands(record_commands(registry))
}

fn log_level(matches: &ArgMatches) -> Level {
    if matches.get_flag("verbose") {
        return Level::DEBUG;
    }

    match env::var("INVDNS_LOG_LEVEL")
        .unwrap_or_default()
        .to_lowercase()
        .as_str()
    {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "error" => Level::ERROR,
        _ => Level::WARN,
    }
}

/// Load configuration and apply global flags on top
///
/// Validation happens when the transport is built.
fn load_config(matches: &ArgMatches) -> Result<ClientConfig> {
    let mut config = ClientConfig::from_env().context("loading configuration")?;

    if let Some(remote) = matches.get_one::<String>("remote") {
        config.remote = remote.clone();
    }
    if let Some(format) = matches.get_one::<String>("format") {
        config.output = format.parse::<OutputFormat>()?;
    }
    if matches.get_flag("dry_run") {
        config.dry_run = true;
    }

    debug!("Configuration: {:?}", config);
    Ok(config)
}

fn main() -> ExitCode {
    let registry = Registry::dns();

    let matches = match cli(&registry).try_get_matches() {
        Ok(matches) => matches,
        Err(e) => {
            let _ = e.print();
            return if e.use_stderr() {
                InvdnsExitCode::UsageError.into()
            } else {
                InvdnsExitCode::Success.into()
            };
        }
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(log_level(&matches))
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return InvdnsExitCode::UsageError.into();
    }

    let config = match load_config(&matches) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Configuration error: {:#}", e);
            return InvdnsExitCode::UsageError.into();
        }
    };

    // One request per process; no need for a multi-threaded runtime
    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return InvdnsExitCode::RequestFailed.into();
        }
    };

    match rt.block_on(run(&registry, &config, &matches)) {
        Ok(output) => {
            println!("{}", output);
            InvdnsExitCode::Success.into()
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            if e.is_usage_error() {
                InvdnsExitCode::UsageError.into()
            } else {
                InvdnsExitCode::RequestFailed.into()
            }
        }
    }
}

/// Dispatch the parsed invocation and render the response
async fn run(
    registry: &Registry,
    config: &ClientConfig,
    matches: &ArgMatches,
) -> invdns_core::Result<String> {
    let transport = HttpTransport::from_config(config)?;
    let dispatcher = Dispatcher::new(registry, &transport, config);
    let dispatched = dispatcher.route(matches).await?;
    Ok(render(&dispatched, config.output))
}
