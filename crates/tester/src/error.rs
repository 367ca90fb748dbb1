//! Error types for health verification.

use celo_runtime::RuntimeError;

/// Error that prevents a verification pass from starting.
#[derive(Debug, thiserror::Error)]
pub enum TesterError {
    /// No container runtime client could be constructed.
    #[error("failed to connect to the container runtime: {0}")]
    Connect(#[source] RuntimeError),
}

/// Error raised by a single check. Recorded, never propagated out of a pass.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    /// The container is not running.
    #[error("container {0} is not running")]
    NotRunning(String),

    /// The container runtime failed.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    /// A command inside the container exited unsuccessfully.
    #[error("command exited with {code:?}: {stderr}")]
    CommandFailed {
        /// Exit code, if the session reported one.
        code: Option<i64>,
        /// Trimmed stderr of the command.
        stderr: String,
    },

    /// The RPC port has no usable address.
    #[error("no address for port {0}")]
    MissingPortMapping(String),

    /// The JSON-RPC request failed.
    #[error(transparent)]
    Rpc(#[from] RpcError),
}

/// Error returned by an [`RpcTransport`](crate::RpcTransport).
#[derive(Debug, thiserror::Error)]
pub enum RpcError {
    /// The endpoint URL could not be built.
    #[error("invalid rpc url {0}")]
    InvalidUrl(String),

    /// The HTTP request failed or the body was not JSON.
    #[error("http: {0}")]
    Http(#[from] reqwest::Error),
}
