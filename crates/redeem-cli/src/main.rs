use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use envconfig::Envconfig;
use tracing_subscriber::EnvFilter;

use redeem_core::app::AppBuilder;
use redeem_core::config::SinkConfig;
use redeem_core::domain::{OutputType, ValidVoucherSet};
use redeem_core::impls::DatabaseSink;

#[derive(Debug, Parser)]
#[command(name = "redeem", about = "Record voucher redemptions to a pluggable sink")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Redeem a voucher and record it on the chosen output
    Consume {
        voucher: String,

        /// CONSOLE, FILE, DATABASE (DB), QUEUE or NULL. Unknown tags use CONSOLE.
        #[arg(short, long, default_value = "CONSOLE")]
        output: String,

        /// A voucher to accept (repeatable)
        #[arg(long = "valid")]
        valid: Vec<String>,

        /// JSON array of vouchers to accept
        #[arg(long)]
        valid_file: Option<PathBuf>,
    },
    /// Check that every sink is reachable
    Health,
}

fn init_tracing() {
    // stdout は ConsoleSink 用に空けておく
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn load_vouchers(
    valid: Vec<String>,
    valid_file: Option<PathBuf>,
) -> anyhow::Result<ValidVoucherSet> {
    let mut vouchers = ValidVoucherSet::new(valid);
    if let Some(path) = valid_file {
        let from_file = ValidVoucherSet::from_json_file(&path)?;
        tracing::debug!(path = %path.display(), count = from_file.len(), "loaded valid vouchers");
        vouchers.extend(from_file);
    }
    Ok(vouchers)
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    init_tracing();
    let cli = Cli::parse();
    let config = SinkConfig::init_from_env().context("invalid sink configuration")?;

    match cli.command {
        Command::Consume {
            voucher,
            output,
            valid,
            valid_file,
        } => {
            let output = OutputType::from_tag(&output);
            if output == OutputType::Database {
                DatabaseSink::new(config.database_path.clone())
                    .setup()
                    .await
                    .context("failed to prepare the vouchers table")?;
            }
            let app = AppBuilder::new(config)
                .valid_vouchers(load_vouchers(valid, valid_file)?)
                .build()?;
            match app.service.consume(&voucher, output).await {
                Ok(record) => {
                    tracing::info!(voucher = record.voucher(), %output, "voucher redeemed");
                    Ok(ExitCode::SUCCESS)
                }
                Err(e) => {
                    tracing::error!(%voucher, %output, error = %e, "redemption failed");
                    Ok(ExitCode::FAILURE)
                }
            }
        }
        Command::Health => {
            let app = AppBuilder::new(config).build()?;
            if app.health.status().await {
                println!("healthy");
                Ok(ExitCode::SUCCESS)
            } else {
                println!("unhealthy");
                Ok(ExitCode::FAILURE)
            }
        }
    }
}
