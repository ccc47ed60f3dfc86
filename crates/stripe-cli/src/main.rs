//! # stripe-wire
//!
//! Decode Stripe response bodies and encode parameter structs from the
//! command line.
//!
//! ## Usage
//!
//! ```bash
//! # Optional settings
//! export STRIPE_LOG_LEVEL=debug
//! export STRIPE_API_VERSION=2024-12-18.acacia
//!
//! # Summarise a charge
//! curl -s -u $STRIPE_SECRET_KEY: https://api.stripe.com/v1/charges/ch_123 \
//!     | stripe-wire decode --kind charge
//!
//! # Build a form body
//! echo '{"amount":2000,"currency":"usd","source":"tok_visa"}' \
//!     | stripe-wire encode --kind charge
//! ```

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use stripe_cli::commands;
use stripe_core::{Codec, Level, LeveledLogger, WireConfig};
use tracing::debug;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Debug, Parser)]
#[command(name = "stripe-wire", version, about = "Stripe wire format decoder and form encoder")]
struct Cli {
    /// Codec log threshold (null, error, warn, info, debug); overrides STRIPE_LOG_LEVEL
    #[arg(long, global = true)]
    log_level: Option<Level>,

    /// TOML file with a [stripe] table, used instead of the environment
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Decode a response body and print a summary
    Decode {
        /// Resource kind, e.g. charge, customer, event
        #[arg(long)]
        kind: String,

        /// Read from this file instead of stdin
        #[arg(long)]
        input: Option<PathBuf>,
    },

    /// Encode JSON parameters as a form body
    Encode {
        /// Params kind, e.g. charge, charge_list, refund
        #[arg(long)]
        kind: String,

        /// Read from this file instead of stdin
        #[arg(long)]
        input: Option<PathBuf>,
    },

    /// List the accepted kinds
    Kinds,
}

fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(
            EnvFilter::builder()
                .with_default_directive(tracing::Level::WARN.into())
                .from_env_lossy(),
        )
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => WireConfig::from_file(path)
            .with_context(|| format!("failed to load {}", path.display()))?,
        None => WireConfig::from_env().context("invalid STRIPE_* environment")?,
    };
    if let Some(level) = cli.log_level {
        config = config.with_log_level(level);
    }
    debug!(api_version = %config.api_version, log_level = %config.log_level, "configured");

    // Codec lines share stderr with tracing so stdout carries only the result
    let logger = LeveledLogger::new(config.log_level).with_stdout(std::io::stderr());
    let codec = Codec::new(Arc::new(logger));

    let output = match cli.command {
        Command::Decode { kind, input } => {
            let body = commands::read_input(input.as_deref())?;
            commands::decode(&codec, &kind, &body)?
        }
        Command::Encode { kind, input } => {
            let body = commands::read_input(input.as_deref())?;
            commands::encode(&codec, &kind, &body)?
        }
        Command::Kinds => kinds_listing(),
    };

    println!("{output}");
    Ok(())
}

fn kinds_listing() -> String {
    format!(
        "resources: {}\nparams: {}",
        stripe_cli::registry::resource_names().collect::<Vec<_>>().join(", "),
        stripe_cli::registry::params_names().collect::<Vec<_>>().join(", ")
    )
}
