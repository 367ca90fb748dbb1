//! Error types for container runtime operations.

/// Error returned by a [`ContainerRuntime`](crate::ContainerRuntime).
#[derive(Debug, thiserror::Error)]
pub enum RuntimeError {
    /// The docker engine rejected or failed a request.
    #[error("docker: {0}")]
    Docker(#[from] bollard::errors::Error),

    /// An exec session started detached, so there is no output to read.
    #[error("exec session {0} did not attach")]
    Detached(String),

    /// The caller's cancellation scope fired before the command finished.
    #[error("cancelled while reading exec output")]
    Cancelled,

    /// The output demultiplexing worker panicked or was aborted.
    #[error("exec output worker failed: {0}")]
    Worker(#[from] tokio::task::JoinError),

    /// The container spec cannot be run as a one-shot container.
    #[error("container `{0}` needs an inline command to run transiently")]
    NotTransient(String),
}

/// Error returned by [`init_genesis`](crate::init_genesis).
#[derive(Debug, thiserror::Error)]
pub enum GenesisError {
    /// The init container could not be created or run.
    #[error(transparent)]
    Runtime(#[from] RuntimeError),

    /// The init container ran but never reported writing the genesis state.
    #[error("genesis initialization did not report success")]
    MarkerNotFound,

    /// The success marker pattern failed to compile.
    #[error("invalid genesis marker pattern: {0}")]
    Pattern(#[from] regex::Error),
}
