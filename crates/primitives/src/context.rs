//! Immutable node identity shared by every descriptor component.

use crate::{Images, Network};
use std::path::{Path, PathBuf};

/// Prefix the host framework puts in front of every container name.
pub const DEFAULT_NAME_PREFIX: &str = "bpm";

/// Identity of the node being described.
///
/// Built once at startup and passed by reference into every call, so nothing
/// downstream reads process-wide state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NodeContext {
    id: String,
    node_dir: PathBuf,
    name_prefix: String,
    network: Option<Network>,
    network_id: String,
    images: Images,
}

impl NodeContext {
    /// Create a context with the network's default network id and images.
    pub fn new(id: impl Into<String>, node_dir: impl Into<PathBuf>, network: Option<Network>) -> Self {
        Self {
            id: id.into(),
            node_dir: node_dir.into(),
            name_prefix: DEFAULT_NAME_PREFIX.to_string(),
            network,
            network_id: network.map(|n| n.network_id().to_string()).unwrap_or_default(),
            images: Images::for_network(network),
        }
    }

    /// Sets the container name prefix.
    pub fn with_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.name_prefix = prefix.into();
        self
    }

    /// Sets the container images.
    pub fn with_images(mut self, images: Images) -> Self {
        self.images = images;
        self
    }

    /// Overrides the resolved network id.
    pub fn with_network_id(mut self, network_id: impl Into<String>) -> Self {
        self.network_id = network_id.into();
        self
    }

    /// The node identifier.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Directory the host framework materializes node files into.
    pub fn node_dir(&self) -> &Path {
        &self.node_dir
    }

    /// The container name prefix.
    pub fn name_prefix(&self) -> &str {
        &self.name_prefix
    }

    /// The selected network, if recognised.
    pub fn network(&self) -> Option<Network> {
        self.network
    }

    /// The resolved network id, empty when the network is unknown.
    pub fn network_id(&self) -> &str {
        &self.network_id
    }

    /// Container images.
    pub fn images(&self) -> &Images {
        &self.images
    }

    /// Full container name for `suffix`: `<prefix>-<id>-<suffix>`.
    pub fn container_name(&self, suffix: impl std::fmt::Display) -> String {
        format!("{}-{}-{}", self.name_prefix, self.id, suffix)
    }

    /// Directory the keystore template is written to.
    pub fn keystore_dir(&self) -> PathBuf {
        self.node_dir.join("configs").join("keystore")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::NodeRole;

    #[test]
    fn test_container_name() {
        let ctx = NodeContext::new("flower-pot-1234", "/nodes/flower", Some(Network::Baklava));
        assert_eq!(
            ctx.container_name(NodeRole::AttestationNode),
            "bpm-flower-pot-1234-attestation-node"
        );
        assert_eq!(ctx.network_id(), "40120");
        assert_eq!(ctx.keystore_dir(), PathBuf::from("/nodes/flower/configs/keystore"));
    }

    #[test]
    fn test_unknown_network_has_no_id() {
        let ctx = NodeContext::new("n", "/tmp", None).with_name_prefix("test");
        assert_eq!(ctx.network_id(), "");
        assert_eq!(ctx.container_name("fullnode"), "test-n-fullnode");
    }
}
