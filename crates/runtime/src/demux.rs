//! Splitting an attached exec stream into stdout and stderr.

use crate::error::RuntimeError;
use bollard::container::LogOutput;
use futures_util::{Stream, StreamExt};
use tokio_util::sync::CancellationToken;
use tracing::trace;

/// Stdout and stderr bytes read from one exec session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Demuxed {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

/// Read `stream` to its end, routing each frame to its buffer.
///
/// Stops with [`RuntimeError::Cancelled`] once `cancel` fires.
pub async fn demux<S>(mut stream: S, cancel: CancellationToken) -> Result<Demuxed, RuntimeError>
where
    S: Stream<Item = Result<LogOutput, bollard::errors::Error>> + Unpin,
{
    let mut out = Demuxed::default();

    loop {
        tokio::select! {
            _ = cancel.cancelled() => return Err(RuntimeError::Cancelled),
            frame = stream.next() => match frame {
                None => return Ok(out),
                // A tty session has no separate stderr.
                Some(Ok(LogOutput::StdOut { message } | LogOutput::Console { message })) => {
                    out.stdout.extend_from_slice(&message);
                }
                Some(Ok(LogOutput::StdErr { message })) => {
                    out.stderr.extend_from_slice(&message);
                }
                Some(Ok(LogOutput::StdIn { .. })) => {}
                Some(Err(err)) => return Err(err.into()),
            },
        }
    }
}

/// Demultiplex `stream` on a worker task while waiting for either the worker
/// or `cancel`.
///
/// The worker runs under a child of `cancel` that is also cancelled when this
/// function returns, so it never outlives the call.
pub async fn demux_until_cancelled<S>(
    stream: S,
    cancel: &CancellationToken,
) -> Result<Demuxed, RuntimeError>
where
    S: Stream<Item = Result<LogOutput, bollard::errors::Error>> + Unpin + Send + 'static,
{
    let scope = cancel.child_token();
    let _guard = scope.clone().drop_guard();
    let mut worker = tokio::spawn(demux(stream, scope));

    tokio::select! {
        joined = &mut worker => joined?,
        _ = cancel.cancelled() => {
            trace!("exec wait cancelled, stopping demux worker");
            Err(RuntimeError::Cancelled)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::stream;
    use std::time::Duration;

    fn frames(
        items: Vec<LogOutput>,
    ) -> impl Stream<Item = Result<LogOutput, bollard::errors::Error>> + Unpin + Send + 'static {
        stream::iter(items.into_iter().map(Ok))
    }

    #[tokio::test]
    async fn test_demux_splits_streams() {
        let stream = frames(vec![
            LogOutput::StdOut { message: "12".into() },
            LogOutput::StdErr { message: "warn: slow\n".into() },
            LogOutput::StdOut { message: "\n".into() },
        ]);

        let out = demux_until_cancelled(stream, &CancellationToken::new()).await.unwrap();
        assert_eq!(out.stdout, b"12\n");
        assert_eq!(out.stderr, b"warn: slow\n");
    }

    #[tokio::test]
    async fn test_cancel_returns_immediately() {
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = demux_until_cancelled(stream::pending(), &cancel).await;
        assert!(matches!(result, Err(RuntimeError::Cancelled)));
    }

    #[tokio::test]
    async fn test_worker_stops_with_scope() {
        let cancel = CancellationToken::new();
        let child = cancel.child_token();
        let worker = tokio::spawn(demux(stream::pending(), child));

        cancel.cancel();
        let result = tokio::time::timeout(Duration::from_secs(1), worker).await.unwrap().unwrap();
        assert!(matches!(result, Err(RuntimeError::Cancelled)));
    }
}
