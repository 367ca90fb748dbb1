//! Genesis command - initialize a node's data directory.

use crate::{
    cli::NodeFileArgs,
    config::{NodeFile, PluginConfig},
};
use celo_runtime::{DockerRuntime, init_genesis};
use eyre::{Result, WrapErr};

/// Run `geth init` for the node through the local docker engine.
pub async fn run(args: &NodeFileArgs, plugin: &PluginConfig) -> Result<()> {
    let node = NodeFile::load(&args.node_file)?;
    let ctx = node.context(plugin);
    let config = node.config_map();

    let runtime = DockerRuntime::connect().wrap_err("Failed to connect to docker")?;
    init_genesis(&ctx, &config, &runtime).await.wrap_err("Genesis initialization failed")?;

    println!("genesis initialized for {}", ctx.id());
    Ok(())
}
