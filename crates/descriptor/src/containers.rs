//! Container plans.
//!
//! A plan is a fresh projection of the current [`ConfigMap`] onto a fixed set
//! of container templates; nothing is cached between calls.

use celo_primitives::{ConfigMap, NodeContext, NodeRole, Subtype};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Generated file holding the node's command line.
pub const CMD_FILE: &str = "celo.dockercmd";

/// Environment file of the state collector sidecar.
pub const COLLECTOR_ENV_FILE: &str = "configs/collector.env";

/// Environment file of the attestation service.
pub const ATTESTATION_SERVICE_ENV_FILE: &str = "configs/attestation-service.env";

/// Environment file of the attestation postgres container.
pub const POSTGRES_ENV_FILE: &str = "configs/postgres.env";

/// Name of the state collector sidecar.
pub const COLLECTOR_CONTAINER: &str = "collector";

/// Name of the attestation service database container.
pub const POSTGRES_CONTAINER: &str = "attestation-postgres";

/// Data directory of celo-node inside the container.
pub const NODE_DATA_DIR: &str = "/root/.celo";

/// Where the generated `configs` directory is mounted inside the container.
pub const NODE_CONFIGS_DIR: &str = "/root/.celo/configs";

/// Container port celo-node serves JSON-RPC on.
pub const RPC_CONTAINER_PORT: &str = "8545";

/// Configuration key holding the host data directory.
const DATA_DIR: &str = "data-dir";

/// Kind of a container mount.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum MountKind {
    Bind,
    Volume,
}

/// A host path or named volume mounted into a container.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mount {
    #[serde(rename = "type")]
    pub kind: MountKind,
    pub from: String,
    pub to: String,
}

impl Mount {
    /// A bind mount of `from` on the host to `to` in the container.
    pub fn bind(from: impl Into<String>, to: impl Into<String>) -> Self {
        Self { kind: MountKind::Bind, from: from.into(), to: to.into() }
    }
}

/// Transport protocol of a published port.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Protocol {
    Tcp,
    Udp,
}

/// A container port published on the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Port {
    pub host_ip: String,
    pub host_port: String,
    pub container_port: String,
    pub protocol: Protocol,
}

impl Port {
    /// Publish `container_port` as `host_ip:host_port`.
    pub fn new(
        host_ip: impl Into<String>,
        host_port: impl Into<String>,
        container_port: impl Into<String>,
        protocol: Protocol,
    ) -> Self {
        Self {
            host_ip: host_ip.into(),
            host_port: host_port.into(),
            container_port: container_port.into(),
            protocol,
        }
    }

    /// The same mapping on both tcp and udp, bound on all interfaces.
    fn tcp_udp(host_port: &str, container_port: &str) -> [Self; 2] {
        [
            Self::new("0.0.0.0", host_port, container_port, Protocol::Tcp),
            Self::new("0.0.0.0", host_port, container_port, Protocol::Udp),
        ]
    }
}

/// How a container receives its command. Exactly one source is ever set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "value")]
pub enum CommandSource {
    /// Arguments passed verbatim.
    Inline(Vec<String>),

    /// Relative path of a generated command file, one argument per line.
    CmdFile(String),

    /// Relative path of a generated environment file; the image's own
    /// entrypoint runs.
    EnvFile(String),
}

/// Restart policy of a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum RestartPolicy {
    /// Never restart; used for one-shot containers.
    No,

    /// Restart until explicitly stopped.
    #[default]
    UnlessStopped,
}

/// Declarative description of one container to run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContainerSpec {
    pub name: String,
    pub image: String,
    pub command: CommandSource,
    pub mounts: Vec<Mount>,
    pub ports: Vec<Port>,
    pub restart: RestartPolicy,
    pub collect_logs: bool,
}

impl ContainerSpec {
    fn new(name: impl Into<String>, image: impl Into<String>, command: CommandSource) -> Self {
        Self {
            name: name.into(),
            image: image.into(),
            command,
            mounts: Vec::new(),
            ports: Vec::new(),
            restart: RestartPolicy::default(),
            collect_logs: true,
        }
    }

    /// A one-shot container running `args` that is never restarted.
    pub fn transient(
        name: impl Into<String>,
        image: impl Into<String>,
        args: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        let mut spec =
            Self::new(name, image, CommandSource::Inline(args.into_iter().map(Into::into).collect()));
        spec.restart = RestartPolicy::No;
        spec.collect_logs = false;
        spec
    }

    /// Adds a mount.
    pub fn with_mount(mut self, mount: Mount) -> Self {
        self.mounts.push(mount);
        self
    }

    fn with_ports(mut self, ports: impl IntoIterator<Item = Port>) -> Self {
        self.ports.extend(ports);
        self
    }

    fn without_logs(mut self) -> Self {
        self.collect_logs = false;
        self
    }
}

/// Builds the container templates of one plan from a configuration snapshot.
struct Templates<'a> {
    ctx: &'a NodeContext,
    config: &'a ConfigMap,
}

impl Templates<'_> {
    fn node(&self, role: NodeRole) -> ContainerSpec {
        ContainerSpec::new(
            role.to_string(),
            self.ctx.images().node.clone(),
            CommandSource::CmdFile(CMD_FILE.to_string()),
        )
        .with_mount(Mount::bind(self.config.get(DATA_DIR), NODE_DATA_DIR))
    }

    fn proxy(&self) -> ContainerSpec {
        self.node(NodeRole::Proxy)
            .with_ports(Port::tcp_udp("30333", "30333"))
            .with_ports(Port::tcp_udp("30503", "30503"))
    }

    fn validator(&self) -> ContainerSpec {
        let port = self.config.get("port");
        self.node(NodeRole::Validator)
            .with_mount(Mount::bind("./configs", NODE_CONFIGS_DIR))
            .with_ports(Port::tcp_udp(port, port))
    }

    fn fullnode(&self) -> ContainerSpec {
        self.node(NodeRole::Fullnode)
            .with_ports(Port::tcp_udp(self.config.get("port"), "30303"))
            .with_ports([Port::new(
                self.config.get("rpcaddr"),
                self.config.get("rpcport"),
                RPC_CONTAINER_PORT,
                Protocol::Tcp,
            )])
    }

    fn attestation_node(&self) -> ContainerSpec {
        self.node(NodeRole::AttestationNode)
            .with_mount(Mount::bind("./configs", NODE_CONFIGS_DIR))
            .with_ports([Port::new(
                "0.0.0.0",
                self.config.get("rpcport"),
                RPC_CONTAINER_PORT,
                Protocol::Tcp,
            )])
    }

    fn attestation_service(&self) -> ContainerSpec {
        let port = self.config.get("port");
        ContainerSpec::new(
            NodeRole::AttestationService.to_string(),
            self.ctx.images().attestation.clone(),
            CommandSource::EnvFile(ATTESTATION_SERVICE_ENV_FILE.to_string()),
        )
        .with_ports([Port::new("0.0.0.0", port, port, Protocol::Tcp)])
        .without_logs()
    }

    fn collector(&self) -> ContainerSpec {
        ContainerSpec::new(
            COLLECTOR_CONTAINER,
            self.ctx.images().collector.clone(),
            CommandSource::EnvFile(COLLECTOR_ENV_FILE.to_string()),
        )
        .with_mount(Mount::bind("logs", "/data/nodestate"))
    }

    fn postgres(&self) -> ContainerSpec {
        ContainerSpec::new(
            POSTGRES_CONTAINER,
            self.ctx.images().postgres.clone(),
            CommandSource::EnvFile(POSTGRES_ENV_FILE.to_string()),
        )
        .without_logs()
    }
}

/// Build the ordered container plan for `subtype`.
///
/// [`Subtype::Inspect`] yields the single proxy container, the minimal
/// topology shown when no role has been chosen yet.
pub fn plan_containers(ctx: &NodeContext, subtype: Subtype, config: &ConfigMap) -> Vec<ContainerSpec> {
    let t = Templates { ctx, config };

    let plan = match subtype {
        Subtype::Role(NodeRole::Proxy) => vec![t.proxy(), t.collector()],
        Subtype::Role(NodeRole::Validator) => vec![t.validator(), t.collector()],
        Subtype::Role(NodeRole::Fullnode) => vec![t.fullnode(), t.collector()],
        Subtype::Role(NodeRole::AttestationNode) => vec![t.attestation_node()],
        Subtype::Role(NodeRole::AttestationService) => {
            vec![t.postgres(), t.attestation_service()]
        }
        Subtype::Inspect => vec![t.proxy()],
    };

    debug!(%subtype, containers = plan.len(), "planned containers");
    plan
}
