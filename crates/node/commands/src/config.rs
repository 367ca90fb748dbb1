//! Figment-based configuration loading.
//!
//! Plugin configuration priority (highest wins):
//! 1. Environment variables (`CELO_BPM_` prefix, `__` separates nesting)
//! 2. Config file (TOML)
//! 3. Defaults
//!
//! The node file written by the host framework is JSON and is extracted
//! through the same machinery.

use celo_descriptor::NodeDescriptor;
use celo_primitives::{
    ConfigMap, DEFAULT_NAME_PREFIX, Images, Network, NodeContext, Subtype,
};
use eyre::{Result, WrapErr, ensure};
use figment::{
    Figment,
    providers::{Env, Format, Json, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::{
    collections::BTreeMap,
    path::{Path, PathBuf},
    str::FromStr,
};
use tracing::{debug, warn};

/// Settings of the plugin itself, shared by every node it describes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PluginConfig {
    /// Prefix of every container name.
    pub name_prefix: String,

    /// Image overrides; unset images follow the node's network.
    pub images: ImageOverrides,
}

impl Default for PluginConfig {
    fn default() -> Self {
        Self { name_prefix: DEFAULT_NAME_PREFIX.to_string(), images: ImageOverrides::default() }
    }
}

/// Optional replacements for the default container images.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageOverrides {
    pub node: Option<String>,
    pub attestation: Option<String>,
    pub collector: Option<String>,
    pub postgres: Option<String>,
}

impl ImageOverrides {
    fn apply(&self, mut images: Images) -> Images {
        let overrides = [
            (&self.node, &mut images.node),
            (&self.attestation, &mut images.attestation),
            (&self.collector, &mut images.collector),
            (&self.postgres, &mut images.postgres),
        ];
        for (value, image) in overrides {
            if let Some(value) = value {
                image.clone_from(value);
            }
        }
        images
    }
}

impl PluginConfig {
    /// Load configuration from defaults, config file and environment.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(PluginConfig::default()));

        if let Some(path) = config_path {
            if path.exists() {
                figment = figment.merge(Toml::file(path));
            } else {
                warn!(path = %path.display(), "config file not found, using defaults");
            }
        }

        figment
            .merge(Env::prefixed("CELO_BPM_").split("__"))
            .extract()
            .wrap_err("Failed to load plugin configuration")
    }
}

/// A node as persisted by the host framework.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeFile {
    /// Node identifier.
    pub id: String,

    /// Directory holding the node's configs and data.
    pub node_directory: PathBuf,

    /// The node's string parameters.
    #[serde(default)]
    pub str_parameters: BTreeMap<String, String>,
}

impl NodeFile {
    /// Read a node file.
    pub fn load(path: &Path) -> Result<Self> {
        ensure!(path.exists(), "node file {} does not exist", path.display());

        Figment::from(Json::file(path))
            .extract()
            .wrap_err_with(|| format!("Failed to read node file {}", path.display()))
    }

    /// The node's subtype. An absent or empty subtype selects inspect mode.
    pub fn subtype(&self) -> Result<Subtype> {
        let raw = self.str_parameters.get("subtype").map(String::as_str).unwrap_or_default();
        Ok(Subtype::parse(raw)?)
    }

    /// The node's network, `baklava` when unset. `None` for unknown networks.
    pub fn network(&self) -> Option<Network> {
        match self.str_parameters.get("network").map(String::as_str) {
            None | Some("") => Some(Network::Baklava),
            Some(name) => match Network::from_str(name) {
                Ok(network) => Some(network),
                Err(_) => {
                    warn!(network = name, "unknown network, images and network id left empty");
                    None
                }
            },
        }
    }

    /// Build the immutable node context.
    pub fn context(&self, plugin: &PluginConfig) -> NodeContext {
        let network = self.network();
        let mut ctx = NodeContext::new(self.id.clone(), self.node_directory.clone(), network)
            .with_name_prefix(plugin.name_prefix.clone())
            .with_images(plugin.images.apply(Images::for_network(network)));

        if let Some(network_id) = self.str_parameters.get("networkid").filter(|id| !id.is_empty()) {
            ctx = ctx.with_network_id(network_id.clone());
        }

        debug!(node = ctx.id(), network_id = ctx.network_id(), "node context built");
        ctx
    }

    /// The node's parameters as a configuration map.
    pub fn config_map(&self) -> ConfigMap {
        self.str_parameters.iter().map(|(k, v)| (k.clone(), v.clone())).collect()
    }

    /// Bundle context, subtype and parameters into a descriptor.
    pub fn descriptor(&self, plugin: &PluginConfig) -> Result<NodeDescriptor> {
        Ok(NodeDescriptor::new(self.context(plugin), self.subtype()?, self.config_map()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use celo_primitives::NodeRole;
    use std::fs;
    use tempfile::TempDir;

    fn write_node(dir: &TempDir, body: &str) -> PathBuf {
        let path = dir.path().join("node.json");
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn test_default_plugin_config() {
        let config = PluginConfig::default();
        assert_eq!(config.name_prefix, "bpm");
        assert_eq!(config.images, ImageOverrides::default());
    }

    #[test]
    fn test_load_plugin_config_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("plugin.toml");
        fs::write(
            &config_path,
            r#"
name_prefix = "test"

[images]
collector = "registry.local/collector:dev"
"#,
        )
        .unwrap();

        let config = PluginConfig::load(Some(&config_path)).unwrap();
        assert_eq!(config.name_prefix, "test");
        assert_eq!(config.images.collector.as_deref(), Some("registry.local/collector:dev"));
        assert_eq!(config.images.node, None);
    }

    #[test]
    fn test_load_missing_plugin_config_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config = PluginConfig::load(Some(&temp_dir.path().join("nonexistent.toml"))).unwrap();
        assert_eq!(config.name_prefix, "bpm");
    }

    #[test]
    fn test_load_node_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_node(
            &temp_dir,
            r#"{
                "id": "flower-pot-1234",
                "nodeDirectory": "/nodes/flower-pot-1234",
                "strParameters": {"subtype": "validator", "network": "mainnet", "port": "30303"}
            }"#,
        );

        let node = NodeFile::load(&path).unwrap();
        assert_eq!(node.id, "flower-pot-1234");
        assert_eq!(node.subtype().unwrap(), Subtype::Role(NodeRole::Validator));
        assert_eq!(node.network(), Some(Network::Mainnet));
        assert_eq!(node.config_map().get("port"), "30303");

        let plugin = PluginConfig {
            name_prefix: "bpm".to_string(),
            images: ImageOverrides { node: Some("celo:local".to_string()), ..Default::default() },
        };
        let ctx = node.context(&plugin);
        assert_eq!(ctx.network_id(), "42220");
        assert_eq!(ctx.images().node, "celo:local");
        assert_eq!(ctx.images().attestation, Network::Mainnet.attestation_image());
        assert_eq!(ctx.container_name(NodeRole::Validator), "bpm-flower-pot-1234-validator");
    }

    #[test]
    fn test_node_file_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let path = write_node(&temp_dir, r#"{"id": "n1", "nodeDirectory": "/nodes/n1"}"#);

        let node = NodeFile::load(&path).unwrap();
        assert_eq!(node.subtype().unwrap(), Subtype::Inspect);
        assert_eq!(node.network(), Some(Network::Baklava));
        assert!(node.config_map().is_empty());
    }

    #[test]
    fn test_explicit_network_id_wins() {
        let node = NodeFile {
            id: "n1".to_string(),
            node_directory: PathBuf::from("/nodes/n1"),
            str_parameters: BTreeMap::from([
                ("network".to_string(), "devnet".to_string()),
                ("networkid".to_string(), "1101".to_string()),
            ]),
        };

        assert_eq!(node.network(), None);
        let ctx = node.context(&PluginConfig::default());
        assert_eq!(ctx.network_id(), "1101");
        assert_eq!(ctx.images().node, "");
    }

    #[test]
    fn test_unknown_subtype_is_an_error() {
        let node = NodeFile {
            id: "n1".to_string(),
            node_directory: PathBuf::from("/nodes/n1"),
            str_parameters: BTreeMap::from([("subtype".to_string(), "accounts".to_string())]),
        };
        assert!(node.subtype().is_err());
        assert!(node.descriptor(&PluginConfig::default()).is_err());
    }

    #[test]
    fn test_missing_node_file() {
        let temp_dir = TempDir::new().unwrap();
        assert!(NodeFile::load(&temp_dir.path().join("node.json")).is_err());
    }
}
