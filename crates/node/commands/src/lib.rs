//! CLI commands for the Celo node plugin.
//!
//! This crate provides the command-line interface:
//! - [`Cli`] - Top-level CLI parser
//! - [`Commands`] - Available subcommands
//! - [`PluginConfig`] / [`NodeFile`] - plugin settings and the node being described
//!
//! Plugin configuration is loaded using Figment with the following priority
//! (highest wins):
//!
//! 1. Environment variables (`CELO_BPM_` prefix)
//! 2. Config file (TOML)
//! 3. Defaults

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod cli;
pub mod commands;
pub mod config;
pub mod logging;
pub mod version;

pub use cli::{Cli, Commands, LogArgs, NodeFileArgs};
pub use config::{ImageOverrides, NodeFile, PluginConfig};

use clap::Parser;
use color_eyre::eyre;
use tracing::debug;

/// Run the plugin with the process's CLI arguments.
///
/// This is the main entry point that should be called from the binary.
pub async fn run() -> eyre::Result<()> {
    // Setup error handling
    color_eyre::install()?;

    let cli = Cli::parse();

    logging::init_logging(&cli.logs)?;

    debug!(
        version = version::VERSION,
        git_sha = version::GIT_SHA,
        built = version::BUILD_TIMESTAMP,
        "celo-bpm starting"
    );

    let plugin = PluginConfig::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Parameters(args) => commands::describe::parameters(&args, &plugin)?,
        Commands::Containers(args) => commands::describe::containers(&args, &plugin)?,
        Commands::Templates(args) => commands::describe::templates(&args, &plugin)?,
        Commands::InitGenesis(args) => commands::genesis::run(&args, &plugin).await?,
        Commands::Test(args) => commands::test::run(&args, &plugin).await?,
    }

    Ok(())
}
