//! [`ContainerRuntime`] backed by the local docker engine.

use crate::{
    api::{ContainerRuntime, ExecOutput, HostBinding, PortSnapshot},
    demux::demux_until_cancelled,
    error::RuntimeError,
};
use async_trait::async_trait;
use bollard::{
    Docker,
    container::{
        Config, CreateContainerOptions, InspectContainerOptions, ListContainersOptions, LogOutput,
        LogsOptions, RemoveContainerOptions, StartContainerOptions, WaitContainerOptions,
    },
    exec::{CreateExecOptions, StartExecResults},
    image::CreateImageOptions,
    models::{
        HostConfig, Mount as DockerMount, MountTypeEnum, PortBinding, RestartPolicy as DockerRestart,
        RestartPolicyNameEnum,
    },
};
use celo_descriptor::{CommandSource, ContainerSpec, MountKind, RestartPolicy};
use futures_util::TryStreamExt;
use std::collections::HashMap;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

/// A connection to the docker engine.
#[derive(Debug, Clone)]
pub struct DockerRuntime {
    docker: Docker,
}

impl DockerRuntime {
    /// Connect using the local defaults (`DOCKER_HOST` or the unix socket).
    pub fn connect() -> Result<Self, RuntimeError> {
        Ok(Self { docker: Docker::connect_with_local_defaults()? })
    }

    async fn pull(&self, image: &str) -> Result<(), RuntimeError> {
        debug!(%image, "pulling image");
        self.docker
            .create_image(
                Some(CreateImageOptions { from_image: image, ..Default::default() }),
                None,
                None,
            )
            .try_collect::<Vec<_>>()
            .await?;
        Ok(())
    }

    async fn run_to_completion(&self, id: &str) -> Result<String, RuntimeError> {
        self.docker.start_container(id, None::<StartContainerOptions<String>>).await?;

        // A non-zero exit surfaces as an error here, but the logs are still
        // worth returning to the caller first.
        let waited = self
            .docker
            .wait_container(id, None::<WaitContainerOptions<String>>)
            .try_collect::<Vec<_>>()
            .await;

        let output = self
            .docker
            .logs(id, Some(LogsOptions::<String> { stdout: true, stderr: true, ..Default::default() }))
            .try_fold(String::new(), |mut acc, frame| async move {
                match frame {
                    LogOutput::StdOut { message }
                    | LogOutput::StdErr { message }
                    | LogOutput::Console { message } => {
                        acc.push_str(&String::from_utf8_lossy(&message));
                    }
                    LogOutput::StdIn { .. } => {}
                }
                Ok(acc)
            })
            .await?;

        if let Err(err) = waited {
            debug!(%id, output = %output.trim(), "transient container failed");
            return Err(err.into());
        }
        Ok(output)
    }
}

fn container_config(spec: &ContainerSpec, cmd: &[String]) -> Config<String> {
    let mounts = spec
        .mounts
        .iter()
        .map(|mount| DockerMount {
            source: Some(mount.from.clone()),
            target: Some(mount.to.clone()),
            typ: Some(match mount.kind {
                MountKind::Bind => MountTypeEnum::BIND,
                MountKind::Volume => MountTypeEnum::VOLUME,
            }),
            ..Default::default()
        })
        .collect();

    let mut exposed_ports = HashMap::new();
    let mut port_bindings = HashMap::new();
    for port in &spec.ports {
        let key = format!("{}/{}", port.container_port, port.protocol);
        exposed_ports.insert(key.clone(), HashMap::new());
        port_bindings.insert(
            key,
            Some(vec![PortBinding {
                host_ip: Some(port.host_ip.clone()),
                host_port: Some(port.host_port.clone()),
            }]),
        );
    }

    let restart = match spec.restart {
        RestartPolicy::No => RestartPolicyNameEnum::NO,
        RestartPolicy::UnlessStopped => RestartPolicyNameEnum::UNLESS_STOPPED,
    };

    Config {
        image: Some(spec.image.clone()),
        cmd: Some(cmd.to_vec()),
        exposed_ports: Some(exposed_ports),
        host_config: Some(HostConfig {
            mounts: Some(mounts),
            port_bindings: Some(port_bindings),
            restart_policy: Some(DockerRestart { name: Some(restart), maximum_retry_count: None }),
            ..Default::default()
        }),
        ..Default::default()
    }
}

#[async_trait]
impl ContainerRuntime for DockerRuntime {
    async fn is_running(&self, name: &str) -> Result<bool, RuntimeError> {
        // The name filter matches substrings; docker reports names with a
        // leading slash.
        let filters = HashMap::from([("name".to_string(), vec![name.to_string()])]);
        let containers = self
            .docker
            .list_containers(Some(ListContainersOptions { all: false, filters, ..Default::default() }))
            .await?;

        let wanted = format!("/{name}");
        Ok(containers.iter().any(|container| {
            container.names.iter().flatten().any(|n| *n == wanted)
                && container.state.as_deref() == Some("running")
        }))
    }

    async fn exec(
        &self,
        name: &str,
        cmd: &[&str],
        cancel: &CancellationToken,
    ) -> Result<ExecOutput, RuntimeError> {
        let exec = self
            .docker
            .create_exec(
                name,
                CreateExecOptions {
                    cmd: Some(cmd.to_vec()),
                    attach_stdout: Some(true),
                    attach_stderr: Some(true),
                    ..Default::default()
                },
            )
            .await?;

        let StartExecResults::Attached { output, .. } = self.docker.start_exec(&exec.id, None).await?
        else {
            return Err(RuntimeError::Detached(exec.id));
        };

        let demuxed = demux_until_cancelled(output, cancel).await?;
        let inspect = self.docker.inspect_exec(&exec.id).await?;

        Ok(ExecOutput {
            stdout: String::from_utf8_lossy(&demuxed.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&demuxed.stderr).into_owned(),
            exit_code: inspect.exit_code,
        })
    }

    async fn inspect_ports(&self, name: &str) -> Result<PortSnapshot, RuntimeError> {
        let inspect = self.docker.inspect_container(name, None::<InspectContainerOptions>).await?;
        let Some(settings) = inspect.network_settings else {
            return Ok(PortSnapshot::default());
        };

        let ip_address = settings
            .ip_address
            .filter(|ip| !ip.is_empty())
            .or_else(|| {
                settings
                    .networks
                    .iter()
                    .flat_map(|networks| networks.values())
                    .filter_map(|endpoint| endpoint.ip_address.clone())
                    .find(|ip| !ip.is_empty())
            });

        let ports = settings
            .ports
            .unwrap_or_default()
            .into_iter()
            .map(|(port, bindings)| {
                let bindings = bindings
                    .unwrap_or_default()
                    .into_iter()
                    .map(|binding| HostBinding {
                        host_ip: binding.host_ip.unwrap_or_default(),
                        host_port: binding.host_port.unwrap_or_default(),
                    })
                    .collect();
                (port, bindings)
            })
            .collect();

        Ok(PortSnapshot { ip_address, ports })
    }

    async fn run_transient(&self, spec: &ContainerSpec) -> Result<String, RuntimeError> {
        let CommandSource::Inline(cmd) = &spec.command else {
            return Err(RuntimeError::NotTransient(spec.name.clone()));
        };

        self.pull(&spec.image).await?;

        let created = self
            .docker
            .create_container(
                Some(CreateContainerOptions { name: spec.name.clone(), platform: None }),
                container_config(spec, cmd),
            )
            .await?;
        debug!(id = %created.id, name = %spec.name, "created transient container");

        let result = self.run_to_completion(&created.id).await;

        if let Err(err) = self
            .docker
            .remove_container(
                &created.id,
                Some(RemoveContainerOptions { force: true, ..Default::default() }),
            )
            .await
        {
            warn!(id = %created.id, %err, "failed to remove transient container");
        }

        result
    }
}
