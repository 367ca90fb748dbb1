//! One-shot data directory initialization from the genesis block.

use crate::{api::ContainerRuntime, error::GenesisError};
use celo_descriptor::{ContainerSpec, Mount, containers::NODE_DATA_DIR};
use celo_primitives::{ConfigMap, NodeContext};
use regex::Regex;
use tracing::info;

/// Suffix of the init container's name, after the node's prefix and id.
pub const GENESIS_CONTAINER: &str = "celoinit";

/// Genesis file baked into the celo-node image.
pub const GENESIS_FILE: &str = "/celo/genesis.json";

/// Pattern geth prints once the genesis state has been written.
pub const GENESIS_SUCCESS_MARKER: &str = r"Successfully\swrote\sgenesis\sstate";

/// The transient container that runs `geth init` against the node's data
/// directory, named `<prefix>-<id>-celoinit`.
pub fn genesis_container(ctx: &NodeContext, config: &ConfigMap) -> ContainerSpec {
    ContainerSpec::transient(
        ctx.container_name(GENESIS_CONTAINER),
        ctx.images().node.clone(),
        ["--nousb", "init", GENESIS_FILE],
    )
    .with_mount(Mount::bind(config.get("data-dir"), NODE_DATA_DIR))
}

/// Initialize the node's data directory.
///
/// A single attempt: runtime failures are returned as is, and output without
/// the success marker is [`GenesisError::MarkerNotFound`].
pub async fn init_genesis<R>(
    ctx: &NodeContext,
    config: &ConfigMap,
    runtime: &R,
) -> Result<bool, GenesisError>
where
    R: ContainerRuntime + ?Sized,
{
    let marker = Regex::new(GENESIS_SUCCESS_MARKER)?;
    let spec = genesis_container(ctx, config);

    info!(image = %spec.image, "initializing genesis state");
    let output = runtime.run_transient(&spec).await?;

    if !marker.is_match(&output) {
        return Err(GenesisError::MarkerNotFound);
    }

    info!("genesis state written");
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        api::{ExecOutput, PortSnapshot},
        error::RuntimeError,
    };
    use async_trait::async_trait;
    use celo_descriptor::{CommandSource, RestartPolicy};
    use celo_primitives::Network;
    use std::sync::Mutex;
    use tokio_util::sync::CancellationToken;

    /// Runtime that returns a canned transient output and records the spec.
    struct Canned {
        output: Option<String>,
        seen: Mutex<Vec<ContainerSpec>>,
    }

    impl Canned {
        fn new(output: Option<&str>) -> Self {
            Self { output: output.map(str::to_string), seen: Mutex::new(Vec::new()) }
        }
    }

    #[async_trait]
    impl ContainerRuntime for Canned {
        async fn is_running(&self, _name: &str) -> Result<bool, RuntimeError> {
            unimplemented!()
        }

        async fn exec(
            &self,
            _name: &str,
            _cmd: &[&str],
            _cancel: &CancellationToken,
        ) -> Result<ExecOutput, RuntimeError> {
            unimplemented!()
        }

        async fn inspect_ports(&self, _name: &str) -> Result<PortSnapshot, RuntimeError> {
            unimplemented!()
        }

        async fn run_transient(&self, spec: &ContainerSpec) -> Result<String, RuntimeError> {
            self.seen.lock().unwrap().push(spec.clone());
            self.output.clone().ok_or_else(|| RuntimeError::NotTransient(spec.name.clone()))
        }
    }

    fn setup() -> (NodeContext, ConfigMap) {
        let ctx = NodeContext::new("n1", "/nodes/n1", Some(Network::Baklava));
        let config = ConfigMap::new().with("data-dir", "/data/n1");
        (ctx, config)
    }

    #[tokio::test]
    async fn test_genesis_success() {
        let (ctx, config) = setup();
        let runtime = Canned::new(Some(
            "INFO [01-01|00:00:00] Successfully wrote genesis state database=chaindata hash=19ea3",
        ));

        assert!(init_genesis(&ctx, &config, &runtime).await.unwrap());

        let seen = runtime.seen.lock().unwrap();
        let spec = &seen[0];
        assert_eq!(spec.name, "bpm-n1-celoinit");
        assert_eq!(spec.image, "us.gcr.io/celo-testnet/celo-node:baklava");
        assert_eq!(spec.restart, RestartPolicy::No);
        assert_eq!(spec.mounts, vec![Mount::bind("/data/n1", NODE_DATA_DIR)]);
        assert_eq!(
            spec.command,
            CommandSource::Inline(vec!["--nousb".into(), "init".into(), GENESIS_FILE.into()])
        );
    }

    #[test]
    fn test_genesis_container_is_node_scoped() {
        let config = ConfigMap::new().with("data-dir", "/data");
        let a = NodeContext::new("node-a", "/nodes/a", Some(Network::Baklava));
        let b = NodeContext::new("node-b", "/nodes/b", Some(Network::Baklava));

        let name_a = genesis_container(&a, &config).name;
        let name_b = genesis_container(&b, &config).name;
        assert_ne!(name_a, name_b);
        assert_eq!(name_a, "bpm-node-a-celoinit");

        let prefixed = a.with_name_prefix("test");
        assert_eq!(genesis_container(&prefixed, &config).name, "test-node-a-celoinit");
    }

    #[tokio::test]
    async fn test_genesis_without_marker_fails() {
        let (ctx, config) = setup();
        let runtime = Canned::new(Some("Fatal: invalid genesis file"));

        let err = init_genesis(&ctx, &config, &runtime).await.unwrap_err();
        assert!(matches!(err, GenesisError::MarkerNotFound));
    }

    #[tokio::test]
    async fn test_genesis_runtime_error_propagates() {
        let (ctx, config) = setup();
        let runtime = Canned::new(None);

        let err = init_genesis(&ctx, &config, &runtime).await.unwrap_err();
        assert!(matches!(err, GenesisError::Runtime(RuntimeError::NotTransient(_))));
        assert_eq!(runtime.seen.lock().unwrap().len(), 1);
    }
}
