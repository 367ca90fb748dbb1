//! RPC endpoint discovery from a container's network settings.

use crate::error::{CheckError, RpcError};
use celo_runtime::PortSnapshot;
use reqwest::Url;

/// Addresses that mean "every interface" and are dialled as loopback.
const WILDCARD_HOSTS: &[&str] = &["", "0.0.0.0", "::"];

/// Build the base URL for `port_key` (e.g. `8545/tcp`).
///
/// A port published on the host wins; otherwise the container's own address
/// with the container port is used. A port the container does not expose at
/// all is an error.
pub fn discover_rpc_url(snapshot: &PortSnapshot, port_key: &str) -> Result<Url, CheckError> {
    let bindings = snapshot
        .ports
        .get(port_key)
        .ok_or_else(|| CheckError::MissingPortMapping(port_key.to_string()))?;

    let (host, port) = match bindings.iter().find(|b| !b.host_port.is_empty()) {
        Some(binding) => {
            let host = if WILDCARD_HOSTS.contains(&binding.host_ip.as_str()) {
                "127.0.0.1"
            } else {
                binding.host_ip.as_str()
            };
            (host, binding.host_port.as_str())
        }
        None => {
            let host = snapshot
                .ip_address
                .as_deref()
                .ok_or_else(|| CheckError::MissingPortMapping(port_key.to_string()))?;
            let container_port = port_key.split('/').next().unwrap_or(port_key);
            (host, container_port)
        }
    };

    let raw = if host.contains(':') {
        format!("http://[{host}]:{port}")
    } else {
        format!("http://{host}:{port}")
    };
    Url::parse(&raw).map_err(|_| RpcError::InvalidUrl(raw).into())
}
