// src/exec/streams.rs

//! Background readers for the child's stdout and stderr pipes.

use std::io::ErrorKind;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, trace, warn};

const CHUNK_SIZE: usize = 8192;

/// Which of the two redirected output streams an event belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamKind {
    Stdout,
    Stderr,
}

/// Message from a reader to the completion aggregator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    /// Bytes read from the pipe, in arrival order. Never empty.
    Chunk(StreamKind, Vec<u8>),
    /// The pipe reached end-of-file (or failed); no further chunks follow.
    Closed(StreamKind),
}

/// Spawn a task that forwards everything read from `reader` to `tx`.
///
/// Always ends with exactly one [`StreamEvent::Closed`] unless the receiving
/// side has already gone away.
pub fn spawn_reader<R>(
    kind: StreamKind,
    mut reader: R,
    tx: mpsc::Sender<StreamEvent>,
) -> JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut buf = vec![0u8; CHUNK_SIZE];

        loop {
            match reader.read(&mut buf).await {
                // A zero-byte read on a pipe is end-of-file, never an empty chunk.
                Ok(0) => break,
                Ok(n) => {
                    trace!(stream = ?kind, bytes = n, "read chunk");
                    if tx.send(StreamEvent::Chunk(kind, buf[..n].to_vec())).await.is_err() {
                        debug!(stream = ?kind, "aggregator gone; stopping reader");
                        return;
                    }
                }
                Err(e) if e.kind() == ErrorKind::Interrupted => continue,
                Err(e) => {
                    warn!(stream = ?kind, error = %e, "error reading child stream; treating as closed");
                    break;
                }
            }
        }

        let _ = tx.send(StreamEvent::Closed(kind)).await;
    })
}
