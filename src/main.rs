use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::io::Read;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

use receipt_filter::api;
use receipt_filter::config::Config;
use receipt_filter::processor::ReceiptFilter;
use receipt_filter::telemetry;

#[derive(Debug, Parser)]
#[command(version, about = "Filters streamed blocks down to receipts touching watched addresses")]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Run the webhook server (default)
    Serve {
        /// Overrides BIND_ADDR
        #[arg(long)]
        bind_addr: Option<SocketAddr>,
    },
    /// Filter a single stream payload and print the result as JSON
    Filter {
        /// Payload file; stdin when omitted
        #[arg(long, short)]
        input: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    telemetry::init();

    let cli = Cli::parse();

    match cli.command.unwrap_or(Command::Serve { bind_addr: None }) {
        Command::Serve { bind_addr } => {
            let mut config = Config::from_env()?;
            if let Some(addr) = bind_addr {
                config.bind_addr = addr;
            }
            let filter = Arc::new(ReceiptFilter::new(config.watched_addresses.clone()));
            info!(watched = filter.watched().len(), "Watching addresses");
            api::serve(&config, filter).await
        }
        Command::Filter { input } => {
            // server settings are irrelevant offline
            let filter = ReceiptFilter::new(Config::watched_from_env()?);
            let raw = match &input {
                Some(path) => std::fs::read_to_string(path)
                    .with_context(|| format!("Failed to read payload from {}", path.display()))?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buf)
                        .context("Failed to read payload from stdin")?;
                    buf
                }
            };
            let payload: Value = serde_json::from_str(&raw).context("Payload is not valid JSON")?;
            println!("{}", serde_json::to_string_pretty(&filter.handle(&payload))?);
            Ok(())
        }
    }
}
