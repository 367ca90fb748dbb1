//! Health verification of running Celo nodes.
//!
//! A pass runs three checks in sequence against one node container and
//! records each outcome in a [`TestRunner`]: liveness, peer count through
//! `geth attach`, and an `eth_syncing` probe of the JSON-RPC endpoint for
//! roles that expose one.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod checks;
mod endpoint;
mod error;
mod rpc;
mod runner;

pub use checks::{PEER_COUNT_CHECK, PEER_COUNT_CMD, RPC_CHECK, RUNNING_CHECK, run_checks};
pub use endpoint::discover_rpc_url;
pub use error::{CheckError, RpcError, TesterError};
pub use rpc::{HttpTransport, JsonRpcRequest, RpcTransport, SYNCING_METHOD};
pub use runner::{CheckRecord, Outcome, TestRunner};

use celo_primitives::{NodeContext, NodeRole};
use celo_runtime::{CancellationToken, DockerRuntime};

/// Verifies nodes through the local docker engine and plain HTTP.
#[derive(Debug, Clone)]
pub struct Tester {
    rpc: HttpTransport,
}

impl Default for Tester {
    fn default() -> Self {
        Self::new()
    }
}

impl Tester {
    pub fn new() -> Self {
        Self { rpc: HttpTransport::new() }
    }

    /// Run one verification pass against the `role` container of `ctx`.
    ///
    /// Fails only if the docker engine cannot be reached; individual check
    /// failures are reported in the returned runner.
    pub async fn test(
        &self,
        ctx: &NodeContext,
        role: NodeRole,
        cancel: &CancellationToken,
    ) -> Result<TestRunner, TesterError> {
        let runtime = DockerRuntime::connect().map_err(TesterError::Connect)?;
        Ok(run_checks(&runtime, &self.rpc, ctx, role, cancel).await)
    }
}
