//! CLI argument assembly and top-level parser.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Celo node plugin - deployment descriptors and health checks.
#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Logging configuration.
    #[command(flatten)]
    pub logs: LogArgs,

    /// Plugin configuration file (TOML).
    #[arg(long, global = true, value_name = "PATH", env = "CELO_BPM_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute.
    #[command(subcommand)]
    pub command: Commands,
}

/// Plugin commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the parameter manifest for the node's subtype.
    Parameters(NodeFileArgs),

    /// Print the container plan for the node's subtype.
    Containers(NodeFileArgs),

    /// Print the command, environment and keystore templates.
    Templates(NodeFileArgs),

    /// Initialize the node's data directory from the genesis block.
    InitGenesis(NodeFileArgs),

    /// Verify that the node's container is healthy.
    Test(NodeFileArgs),
}

/// Arguments shared by every command.
#[derive(Debug, Args)]
pub struct NodeFileArgs {
    /// Path to the node file (`node.json`).
    #[arg(value_name = "NODE_FILE")]
    pub node_file: PathBuf,
}

/// Logging configuration.
#[derive(Debug, Args, Clone, Default)]
#[command(next_help_heading = "Logging")]
pub struct LogArgs {
    /// Silence everything below errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Verbose mode (-v, -vv).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbosity: u8,

    /// Log filter directive (e.g., "celo_runtime=debug,bollard=info").
    #[arg(long = "log.filter", global = true, value_name = "DIRECTIVE")]
    pub filter: Option<String>,

    /// Use JSON format for log output.
    #[arg(long = "log.json", global = true)]
    pub json: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_subcommands() {
        let cli = Cli::try_parse_from(["celo-bpm", "-vv", "parameters", "node.json"]).unwrap();
        assert_eq!(cli.logs.verbosity, 2);
        assert!(matches!(cli.command, Commands::Parameters(ref a) if a.node_file == PathBuf::from("node.json")));

        let cli = Cli::try_parse_from([
            "celo-bpm",
            "init-genesis",
            "/nodes/n1/node.json",
            "--config",
            "plugin.toml",
        ])
        .unwrap();
        assert!(matches!(cli.command, Commands::InitGenesis(_)));
        assert_eq!(cli.config, Some(PathBuf::from("plugin.toml")));
    }

    #[test]
    fn test_node_file_is_required() {
        assert!(Cli::try_parse_from(["celo-bpm", "test"]).is_err());
    }
}
