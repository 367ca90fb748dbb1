//! The checks of one verification pass.

use crate::{
    endpoint::discover_rpc_url,
    error::CheckError,
    rpc::{JsonRpcRequest, RpcTransport, SYNCING_METHOD},
    runner::TestRunner,
};
use celo_descriptor::containers::RPC_CONTAINER_PORT;
use celo_primitives::{NodeContext, NodeRole};
use celo_runtime::{CancellationToken, ContainerRuntime};
use tracing::info;

/// Name of the liveness check.
pub const RUNNING_CHECK: &str = "running";

/// Name of the peer count check.
pub const PEER_COUNT_CHECK: &str = "peer count";

/// Name of the RPC responsiveness check.
pub const RPC_CHECK: &str = "rpc";

/// Console command printing the node's peer count.
pub const PEER_COUNT_CMD: [&str; 4] = ["geth", "attach", "--exec", "net.peerCount"];

/// Run liveness, peer count and RPC checks against the `role` container of
/// `ctx`, one after another.
///
/// A failing check is recorded and never stops the ones after it.
pub async fn run_checks<R, T>(
    runtime: &R,
    rpc: &T,
    ctx: &NodeContext,
    role: NodeRole,
    cancel: &CancellationToken,
) -> TestRunner
where
    R: ContainerRuntime + ?Sized,
    T: RpcTransport + ?Sized,
{
    let name = ctx.container_name(role);
    info!(container = %name, "verifying node");

    let mut runner = TestRunner::new();

    runner.run(RUNNING_CHECK, check_running(runtime, &name)).await;
    runner.run(PEER_COUNT_CHECK, check_peer_count(runtime, &name, cancel)).await;

    if role.exposes_rpc() {
        runner.run(RPC_CHECK, check_rpc(runtime, rpc, &name)).await;
    } else {
        runner.skip(RPC_CHECK);
    }

    info!(
        container = %name,
        failed = runner.failed(),
        succeeded = runner.succeeded(),
        skipped = runner.skipped(),
        "verification finished"
    );
    runner
}

async fn check_running<R>(runtime: &R, name: &str) -> Result<String, CheckError>
where
    R: ContainerRuntime + ?Sized,
{
    if runtime.is_running(name).await? {
        Ok(true.to_string())
    } else {
        Err(CheckError::NotRunning(name.to_string()))
    }
}

async fn check_peer_count<R>(
    runtime: &R,
    name: &str,
    cancel: &CancellationToken,
) -> Result<String, CheckError>
where
    R: ContainerRuntime + ?Sized,
{
    let output = runtime.exec(name, &PEER_COUNT_CMD, cancel).await?;
    if !output.success() {
        return Err(CheckError::CommandFailed {
            code: output.exit_code,
            stderr: output.stderr.trim().to_string(),
        });
    }
    Ok(output.stdout.trim().to_string())
}

async fn check_rpc<R, T>(runtime: &R, rpc: &T, name: &str) -> Result<String, CheckError>
where
    R: ContainerRuntime + ?Sized,
    T: RpcTransport + ?Sized,
{
    let snapshot = runtime.inspect_ports(name).await?;
    let url = discover_rpc_url(&snapshot, &format!("{RPC_CONTAINER_PORT}/tcp"))?;

    // Any decodable body counts, whatever the node reports about syncing.
    rpc.call(&url, &JsonRpcRequest::new(SYNCING_METHOD)).await?;
    Ok(true.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::RpcError, runner::Outcome};
    use async_trait::async_trait;
    use celo_descriptor::ContainerSpec;
    use celo_primitives::Network;
    use celo_runtime::{ExecOutput, HostBinding, PortSnapshot, RuntimeError};
    use reqwest::Url;
    use serde_json::{Value, json};
    use std::{collections::BTreeMap, sync::Mutex};

    /// Runtime reporting a fixed state for every container.
    struct Stub {
        running: bool,
        exec: Result<ExecOutput, ()>,
        ports: PortSnapshot,
        execs: Mutex<Vec<Vec<String>>>,
    }

    impl Stub {
        fn new(running: bool) -> Self {
            Self {
                running,
                exec: Ok(ExecOutput {
                    stdout: "4\n".to_string(),
                    stderr: String::new(),
                    exit_code: Some(0),
                }),
                ports: PortSnapshot {
                    ip_address: Some("172.17.0.2".to_string()),
                    ports: BTreeMap::from([(
                        "8545/tcp".to_string(),
                        vec![HostBinding {
                            host_ip: "0.0.0.0".to_string(),
                            host_port: "8545".to_string(),
                        }],
                    )]),
                },
                execs: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ContainerRuntime for Stub {
        async fn is_running(&self, _name: &str) -> Result<bool, RuntimeError> {
            Ok(self.running)
        }

        async fn exec(
            &self,
            _name: &str,
            cmd: &[&str],
            _cancel: &CancellationToken,
        ) -> Result<ExecOutput, RuntimeError> {
            self.execs.lock().unwrap().push(cmd.iter().map(|s| s.to_string()).collect());
            self.exec.clone().map_err(|_| RuntimeError::Cancelled)
        }

        async fn inspect_ports(&self, _name: &str) -> Result<PortSnapshot, RuntimeError> {
            Ok(self.ports.clone())
        }

        async fn run_transient(&self, _spec: &ContainerSpec) -> Result<String, RuntimeError> {
            unimplemented!()
        }
    }

    /// Transport that records requests and answers with a fixed body.
    #[derive(Default)]
    struct Recorder {
        fail: bool,
        calls: Mutex<Vec<(Url, JsonRpcRequest)>>,
    }

    #[async_trait]
    impl RpcTransport for Recorder {
        async fn call(&self, url: &Url, request: &JsonRpcRequest) -> Result<Value, RpcError> {
            self.calls.lock().unwrap().push((url.clone(), request.clone()));
            if self.fail {
                return Err(RpcError::InvalidUrl(url.to_string()));
            }
            Ok(json!({"jsonrpc": "2.0", "id": request.id, "result": false}))
        }
    }

    fn ctx() -> NodeContext {
        NodeContext::new("n1", "/nodes/n1", Some(Network::Mainnet))
    }

    #[tokio::test]
    async fn test_not_running_is_one_failure() {
        let runtime = Stub::new(false);
        let rpc = Recorder::default();
        let cancel = CancellationToken::new();

        let runner = run_checks(&runtime, &rpc, &ctx(), NodeRole::Validator, &cancel).await;

        assert_eq!(runner.result(RUNNING_CHECK), Some("false"));
        assert_eq!(runner.failed(), 1);
        assert_eq!(runner.checks()[0].outcome, Outcome::Failed);
        // Later checks still ran.
        assert_eq!(runner.result(PEER_COUNT_CHECK), Some("4"));
    }

    #[tokio::test]
    async fn test_running_fullnode_passes() {
        let runtime = Stub::new(true);
        let rpc = Recorder::default();
        let cancel = CancellationToken::new();

        let runner = run_checks(&runtime, &rpc, &ctx(), NodeRole::Fullnode, &cancel).await;

        assert_eq!(runner.result(RUNNING_CHECK), Some("true"));
        assert_eq!(runner.result(RPC_CHECK), Some("true"));
        assert_eq!((runner.failed(), runner.succeeded(), runner.skipped()), (0, 3, 0));

        let execs = runtime.execs.lock().unwrap();
        assert_eq!(execs[0], PEER_COUNT_CMD);

        let calls = rpc.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0.as_str(), "http://127.0.0.1:8545/");
        assert_eq!(calls[0].1.method, "eth_syncing");
        assert_eq!(calls[0].1.jsonrpc, "2.0");
    }

    #[tokio::test]
    async fn test_validator_never_calls_rpc() {
        let runtime = Stub::new(true);
        let rpc = Recorder::default();
        let cancel = CancellationToken::new();

        let runner = run_checks(&runtime, &rpc, &ctx(), NodeRole::Validator, &cancel).await;

        assert_eq!(runner.result(RPC_CHECK), Some("false"));
        assert_eq!(runner.skipped(), 1);
        assert!(rpc.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_failing_exec_and_rpc_are_recorded() {
        let mut runtime = Stub::new(true);
        runtime.exec = Err(());
        let rpc = Recorder { fail: true, ..Default::default() };
        let cancel = CancellationToken::new();

        let runner =
            run_checks(&runtime, &rpc, &ctx(), NodeRole::AttestationNode, &cancel).await;

        assert_eq!(runner.result(PEER_COUNT_CHECK), Some("false"));
        assert_eq!(runner.result(RPC_CHECK), Some("false"));
        assert_eq!((runner.failed(), runner.succeeded()), (2, 1));
    }

    #[tokio::test]
    async fn test_nonzero_exit_fails_peer_count() {
        let mut runtime = Stub::new(true);
        runtime.exec = Ok(ExecOutput {
            stdout: String::new(),
            stderr: "Fatal: unable to attach\n".to_string(),
            exit_code: Some(1),
        });
        let rpc = Recorder::default();
        let cancel = CancellationToken::new();

        let runner = run_checks(&runtime, &rpc, &ctx(), NodeRole::Proxy, &cancel).await;

        assert_eq!(runner.result(PEER_COUNT_CHECK), Some("false"));
        assert_eq!(runner.failed(), 1);
    }
}
