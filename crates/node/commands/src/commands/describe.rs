//! Descriptor commands - parameters, containers and templates of a node.

use super::print_json;
use crate::{
    cli::NodeFileArgs,
    config::{NodeFile, PluginConfig},
};
use eyre::{Result, WrapErr};
use tracing::{debug, info};

/// Print the parameter manifest.
pub fn parameters(args: &NodeFileArgs, plugin: &PluginConfig) -> Result<()> {
    let mut descriptor = NodeFile::load(&args.node_file)?.descriptor(plugin)?;
    let parameters = descriptor.parameters();
    info!(
        node = descriptor.context().id(),
        subtype = %descriptor.subtype(),
        count = parameters.len(),
        "derived parameters"
    );
    print_json(&parameters)
}

/// Print the container plan.
pub fn containers(args: &NodeFileArgs, plugin: &PluginConfig) -> Result<()> {
    let descriptor = NodeFile::load(&args.node_file)?.descriptor(plugin)?;
    let containers = descriptor.containers();
    info!(
        node = descriptor.context().id(),
        subtype = %descriptor.subtype(),
        count = containers.len(),
        "planned containers"
    );
    print_json(&containers)
}

/// Print the resolved templates.
pub fn templates(args: &NodeFileArgs, plugin: &PluginConfig) -> Result<()> {
    let mut descriptor = NodeFile::load(&args.node_file)?.descriptor(plugin)?;
    let templates = descriptor.templates().wrap_err("Failed to resolve templates")?;
    for (path, text) in templates.iter() {
        debug!(%path, bytes = text.len(), "template");
    }
    info!(
        node = descriptor.context().id(),
        subtype = %descriptor.subtype(),
        count = templates.len(),
        "resolved templates"
    );
    print_json(&templates)
}
