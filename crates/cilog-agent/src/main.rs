//! cilog: parse CI job logs into structured findings.
//!
//! JSON results go to stdout; structured logs go to stderr.

use clap::Parser;
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use cilog_agent::cli::{Cli, Command};
use cilog_agent::config::AnalyzerConfig;
use cilog_agent::runner::{self, Overrides};

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    let cli = Cli::parse();
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "cilog starting");

    // ── Load config ─────────────────────────────────────────────
    let config = AnalyzerConfig::load(cli.config.as_deref())?;

    match cli.command {
        Command::Analyze {
            root,
            baseline,
            parallel,
        } => {
            let config = Overrides {
                root,
                baseline,
                parallel,
            }
            .apply(config);
            let report = runner::analyze(&config).await?;
            print_json(&report)?;
        }
        Command::Tools => print_json(&runner::list_tools())?,
        Command::Run { tool, args, root } => {
            let config = Overrides {
                root,
                ..Overrides::default()
            }
            .apply(config);
            let result = runner::run_tool(&config, &tool, &args).await?;
            print_json(&result)?;
        }
    }

    Ok(())
}
