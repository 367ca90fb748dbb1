//! The container runtime boundary.

use crate::error::RuntimeError;
use async_trait::async_trait;
use celo_descriptor::ContainerSpec;
use std::collections::BTreeMap;
use tokio_util::sync::CancellationToken;

/// Output of a command executed inside a running container.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecOutput {
    pub stdout: String,
    pub stderr: String,
    /// Exit code reported by the exec session, if it finished.
    pub exit_code: Option<i64>,
}

impl ExecOutput {
    /// Returns true if the command finished with exit code zero.
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// A host address a container port is published on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HostBinding {
    pub host_ip: String,
    pub host_port: String,
}

/// The network settings of a container relevant to reaching its ports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortSnapshot {
    /// The container's own address on its network, if any.
    pub ip_address: Option<String>,

    /// Exposed ports keyed as `<port>/<protocol>`; an empty list means the
    /// port is exposed but not published on the host.
    pub ports: BTreeMap<String, Vec<HostBinding>>,
}

/// Operations this crate needs from a container engine.
///
/// Implementations open their own connection; nothing is shared between
/// callers.
#[async_trait]
pub trait ContainerRuntime: Send + Sync {
    /// Returns true if a container called `name` is running.
    async fn is_running(&self, name: &str) -> Result<bool, RuntimeError>;

    /// Run `cmd` inside the running container `name` and collect its output.
    ///
    /// Returns [`RuntimeError::Cancelled`] as soon as `cancel` fires.
    async fn exec(
        &self,
        name: &str,
        cmd: &[&str],
        cancel: &CancellationToken,
    ) -> Result<ExecOutput, RuntimeError>;

    /// Inspect how the ports of container `name` are reachable.
    async fn inspect_ports(&self, name: &str) -> Result<PortSnapshot, RuntimeError>;

    /// Run `spec` to completion and return its combined output.
    async fn run_transient(&self, spec: &ContainerSpec) -> Result<String, RuntimeError>;
}
