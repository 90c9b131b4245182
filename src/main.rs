// src/main.rs

use std::sync::Arc;

use clap::{Parser, Subcommand};
use color_eyre::eyre::Result;

use domainpulse::core::resolver::{DnsResolve, SystemResolver};
use domainpulse::core::scanner::{run_blacklist_scan, run_health_scan};

#[derive(Parser)]
#[command(
    name = "domainpulse",
    about = "Multi-source domain diagnostics: blacklist and DNS health checks"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Check a domain against all configured DNS blacklists.
    Blacklist { domain: String },
    /// Run the DNS health checks for a domain.
    Health { domain: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    domainpulse::logging::initialize_logging()?;

    let cli = Cli::parse();
    let resolver: Arc<dyn DnsResolve> = Arc::new(SystemResolver::new());

    match cli.command {
        Command::Blacklist { domain } => {
            let report = run_blacklist_scan(resolver, &domain).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Health { domain } => {
            let report = run_health_scan(resolver.as_ref(), &domain).await?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
