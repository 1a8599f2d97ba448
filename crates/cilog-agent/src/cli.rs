//! Command-line arguments.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "cilog",
    version,
    about = "Structured findings from CI job logs",
    long_about = "Parse CI job logs into structured findings and read large logs safely.\n\nConfiguration precedence: flags > environment > --config file > defaults.",
    arg_required_else_help = true
)]
pub struct Cli {
    /// TOML configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Parse every job log and print the report as JSON
    Analyze {
        /// Results root with one folder per job
        #[arg(long)]
        root: Option<PathBuf>,
        /// CI result before parsing (e.g. success, failure)
        #[arg(long)]
        baseline: Option<String>,
        /// Analyze jobs concurrently
        #[arg(long, action = clap::ArgAction::SetTrue)]
        parallel: bool,
    },
    /// List available tools with their argument schemas
    Tools,
    /// Run one tool with JSON arguments
    Run {
        /// Tool name, see `cilog tools`
        tool: String,
        /// JSON object of arguments
        #[arg(default_value = "{}")]
        args: String,
        /// Results root with one folder per job
        #[arg(long)]
        root: Option<PathBuf>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_analyze() {
        let cli = Cli::parse_from([
            "cilog",
            "--config",
            "cilog.toml",
            "analyze",
            "--root",
            "/ci",
            "--baseline",
            "failure",
            "--parallel",
        ]);
        assert_eq!(cli.config, Some(PathBuf::from("cilog.toml")));
        match cli.command {
            Command::Analyze {
                root,
                baseline,
                parallel,
            } => {
                assert_eq!(root, Some(PathBuf::from("/ci")));
                assert_eq!(baseline.as_deref(), Some("failure"));
                assert!(parallel);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parse_run_with_default_args() {
        let cli = Cli::parse_from(["cilog", "run", "read_job_index"]);
        match cli.command {
            Command::Run { tool, args, root } => {
                assert_eq!(tool, "read_job_index");
                assert_eq!(args, "{}");
                assert!(root.is_none());
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_config_after_subcommand() {
        let cli = Cli::parse_from(["cilog", "tools", "--config", "x.toml"]);
        assert!(matches!(cli.command, Command::Tools));
        assert_eq!(cli.config, Some(PathBuf::from("x.toml")));
    }

    #[test]
    fn cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
