//! Container runtime boundary for Celo nodes.
//!
//! - [`ContainerRuntime`] - the operations the verifier and genesis
//!   initializer need from a container engine
//! - [`DockerRuntime`] - the bollard-backed implementation
//! - [`demux`] - stdout/stderr splitting of attached exec sessions
//! - [`init_genesis`] - one-shot `geth init` of a node's data directory

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod api;
pub mod demux;
mod docker;
mod error;
mod genesis;

pub use api::{ContainerRuntime, ExecOutput, HostBinding, PortSnapshot};
pub use docker::DockerRuntime;
pub use error::{GenesisError, RuntimeError};
pub use genesis::{
    GENESIS_CONTAINER, GENESIS_FILE, GENESIS_SUCCESS_MARKER, genesis_container, init_genesis,
};

// Re-exported so callers can build a cancellation scope without a direct dependency.
pub use tokio_util::sync::CancellationToken;
