//! Celo networks and the container images that run them.

use serde::{Deserialize, Serialize};

/// Image of the state collector sidecar.
pub const COLLECTOR_IMAGE: &str = "docker.io/blockdaemon/celo-collector:0.0.5";

/// Image of the attestation service database.
pub const POSTGRES_IMAGE: &str = "docker.io/library/postgres:13";

/// Celo network a node joins.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, strum::Display, strum::EnumString, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Network {
    /// Baklava testnet.
    Baklava,

    /// Celo mainnet.
    Mainnet,
}

impl Network {
    /// The chain's network id.
    pub const fn network_id(&self) -> &'static str {
        match self {
            Network::Baklava => "40120",
            Network::Mainnet => "42220",
        }
    }

    /// Default celo-node image for this network.
    pub const fn node_image(&self) -> &'static str {
        match self {
            Network::Baklava => "us.gcr.io/celo-testnet/celo-node:baklava",
            Network::Mainnet => "us.gcr.io/celo-testnet/celo-node:rc1",
        }
    }

    /// Default attestation service image for this network.
    pub const fn attestation_image(&self) -> &'static str {
        match self {
            Network::Baklava => {
                "us.gcr.io/celo-testnet/celo-monorepo:attestation-service-baklava"
            }
            Network::Mainnet => "us.gcr.io/celo-testnet/celo-monorepo:attestation-service-rc1",
        }
    }
}

/// Container images used by the descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Images {
    /// celo-node (geth) image.
    pub node: String,

    /// Attestation service image.
    pub attestation: String,

    /// State collector sidecar image.
    pub collector: String,

    /// Postgres image for the attestation service.
    pub postgres: String,
}

impl Images {
    /// Default images for a network. Without a known network the node and
    /// attestation images are left empty.
    pub fn for_network(network: Option<Network>) -> Self {
        Self {
            node: network.map(|n| n.node_image().to_string()).unwrap_or_default(),
            attestation: network.map(|n| n.attestation_image().to_string()).unwrap_or_default(),
            collector: COLLECTOR_IMAGE.to_string(),
            postgres: POSTGRES_IMAGE.to_string(),
        }
    }
}
