mod cli;
mod commands;
mod config;
mod output;

use anyhow::Result;
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};
use output::print_error;

#[tokio::main]
async fn main() {
    init_tracing();
    if let Err(e) = run().await {
        print_error(&format!("{e:#}"));
        std::process::exit(1);
    }
}

/// Diagnostics go to stderr so stdout stays machine-readable. RUST_LOG
/// overrides the default warn level.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let profile = &cli.profile;

    match &cli.command {
        Commands::Fetch(args) => {
            let server = config::resolve_server(&cli.server, profile)?;
            let cfg = config::load_profile(profile)?;
            let format = resolve_format(cli.format, &cfg);
            commands::fetch::fetch(&server, args, cfg.fields.as_deref(), format).await?;
        }
        Commands::Author => {
            let name = fhirtab_core::author();
            if name.is_empty() {
                return Err(
                    fhirtab_core::FetchError::Unimplemented("author attribution is empty").into(),
                );
            }
            println!("{name}");
        }
        Commands::Config(args) => match &args.command {
            cli::ConfigCommands::Show => {
                let cfg = config::load_profile(profile)?;
                println!("{}: {}", "Profile".cyan(), profile);
                println!(
                    "{}: {}",
                    "Server".cyan(),
                    cfg.server.as_deref().unwrap_or("(not set)")
                );
                println!(
                    "{}: {}",
                    "Format".cyan(),
                    cfg.format.as_deref().unwrap_or("pipe")
                );
                println!(
                    "{}: {}",
                    "Fields".cyan(),
                    match &cfg.fields {
                        Some(fields) => fields.join(", "),
                        None => "(defaults)".to_string(),
                    }
                );
            }
            cli::ConfigCommands::Set(set_args) => {
                let mut cfg = config::load_profile(profile)?;
                match set_args.key.as_str() {
                    "server" => cfg.server = Some(set_args.value.clone()),
                    "format" => cfg.format = Some(set_args.value.clone()),
                    "fields" => {
                        cfg.fields = Some(
                            set_args
                                .value
                                .split(',')
                                .map(|s| s.trim().to_string())
                                .collect(),
                        )
                    }
                    other => {
                        anyhow::bail!(
                            "Unknown config key: {other}. Valid keys: server, format, fields"
                        )
                    }
                }
                config::save_profile(profile, &cfg)?;
                output::print_success(&format!("Set {} = {}", set_args.key, set_args.value));
            }
        },
    }

    Ok(())
}

fn resolve_format(flag: Option<cli::OutputFormat>, cfg: &config::ProfileConfig) -> cli::OutputFormat {
    if let Some(format) = flag {
        return format;
    }
    match cfg.format.as_deref() {
        Some("table") => cli::OutputFormat::Table,
        Some("json") => cli::OutputFormat::Json,
        _ => cli::OutputFormat::Pipe,
    }
}
