//! CLI entry point - the composition root.
//!
//! Settings and host providers are wired together via bootstrap; command
//! dispatch routes to handlers.

use std::io::Write;
use std::process::ExitCode;

use clap::CommandFactory;
use tracing_subscriber::EnvFilter;

use hapi_locate_cli::{Cli, CliError, Commands, Host, bootstrap, handlers};
use hapi_locate_core::resolver::SystemEnv;

fn main() -> ExitCode {
    // Parse CLI arguments after loading .env
    let cli = Cli::parse_with_dotenv(None, std::env::args_os());

    // Initialize logging; stdout is reserved for command output
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let code = err
                .downcast_ref::<CliError>()
                .map_or(1, CliError::exit_code);
            eprintln!("Error: {err:#}");
            ExitCode::from(u8::try_from(code).unwrap_or(1))
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    let Some(command) = &cli.command else {
        // No command provided - show help
        Cli::command().print_help().map_err(CliError::from)?;
        return Ok(());
    };

    // Bootstrap the CLI context (composition root)
    let ctx = bootstrap(cli, &SystemEnv)?;
    let host = Host::system();

    let stdout = std::io::stdout();
    let mut out = stdout.lock();

    match command {
        Commands::Resolve { attempts } => {
            handlers::resolve::execute(&ctx, &host, *attempts, &mut out)?;
        }
        Commands::BuildConfig { json } => {
            handlers::build_config::execute(&ctx, &host, *json, &mut out)?;
        }
        Commands::Plan => {
            handlers::plan::execute(&ctx, &mut out)?;
        }
        Commands::Check => {
            handlers::check::execute(&ctx, &host, &mut out)?;
        }
    }

    out.flush().map_err(CliError::from)?;
    Ok(())
}
