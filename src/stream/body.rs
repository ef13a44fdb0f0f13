//! File window bodies
//!
//! A reader task pulls chunks from disk into a channel of capacity one, so at
//! most one chunk is buffered ahead of the client. The task stops when the
//! client disconnects (channel closed), when the client stops draining for
//! longer than the idle timeout, or on a read error. In the last two cases
//! the body ends short of its `Content-Length` and the connection is closed.

use std::io::{self, SeekFrom};
use std::path::{Path, PathBuf};
use std::time::Duration;

use axum::body::Body;
use bytes::Bytes;
use tokio::fs::File;
use tokio::io::{AsyncReadExt, AsyncSeekExt};
use tokio::sync::mpsc::{self, error::SendTimeoutError};
use tokio_stream::wrappers::ReceiverStream;
use tokio_stream::StreamExt;
use tokio_util::io::ReaderStream;

use crate::config::StreamConfig;

type Chunk = io::Result<Bytes>;

/// Open `path` and return a body yielding `len` bytes from `offset`.
///
/// Open and seek failures are returned before any response is produced.
pub async fn open_window(
    path: &Path,
    offset: u64,
    len: u64,
    config: &StreamConfig,
) -> io::Result<Body> {
    let mut file = File::open(path).await?;
    if offset > 0 {
        file.seek(SeekFrom::Start(offset)).await?;
    }

    let (tx, rx) = mpsc::channel::<Chunk>(1);
    let chunks = ReaderStream::with_capacity(file.take(len), config.chunk_size.max(1));
    tokio::spawn(pump(chunks, tx, path.to_path_buf(), config.idle_timeout()));

    Ok(Body::from_stream(ReceiverStream::new(rx)))
}

async fn pump<S>(mut chunks: S, tx: mpsc::Sender<Chunk>, path: PathBuf, idle: Duration)
where
    S: tokio_stream::Stream<Item = Chunk> + Unpin,
{
    loop {
        let chunk = match tokio::time::timeout(idle, chunks.next()).await {
            Ok(Some(chunk)) => chunk,
            Ok(None) => return,
            Err(_) => {
                tracing::error!("Reading {:?} stalled for {:?}, aborting transfer", path, idle);
                let _ = tx.try_send(Err(io::Error::new(
                    io::ErrorKind::TimedOut,
                    "file read stalled",
                )));
                return;
            }
        };

        let failed = chunk.is_err();
        if let Err(e) = &chunk {
            tracing::error!("Error reading file {:?}: {}", path, e);
        }

        match tx.send_timeout(chunk, idle).await {
            Ok(()) => {}
            Err(SendTimeoutError::Timeout(_)) => {
                tracing::warn!("Client stalled on {:?} for {:?}, closing", path, idle);
                return;
            }
            Err(SendTimeoutError::Closed(_)) => {
                tracing::debug!("Client closed transfer of {:?}", path);
                return;
            }
        }

        if failed {
            return;
        }
    }
}
