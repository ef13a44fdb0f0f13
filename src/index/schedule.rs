//! Refresh scheduling
//!
//! Scans run on the blocking pool so directory I/O never stalls request
//! handling. A failed or panicking cycle is logged and the next tick runs as
//! usual.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use super::{Indexer, RefreshReport};

/// Run one refresh on the blocking pool and log the outcome.
pub async fn refresh_now(indexer: Arc<Indexer>) -> Option<RefreshReport> {
    let dir = indexer.library().content_dir.clone();

    match tokio::task::spawn_blocking(move || indexer.refresh()).await {
        Ok(Ok(report)) => {
            tracing::info!(
                "Indexed {:?}: {} files, {} added, {} updated, {} unchanged, {} removed, \
                 {} skipped",
                dir,
                report.scanned,
                report.added,
                report.updated,
                report.unchanged,
                report.removed,
                report.skipped
            );
            Some(report)
        }
        Ok(Err(e)) => {
            tracing::warn!("Refresh of {:?} failed, keeping previous catalog: {}", dir, e);
            None
        }
        Err(e) => {
            tracing::error!("Refresh task of {:?} aborted: {}", dir, e);
            None
        }
    }
}

/// Refresh every `period`, starting one period from now.
pub fn spawn_periodic_refresh(indexer: Arc<Indexer>, period: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = interval_at(Instant::now() + period, period);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        loop {
            interval.tick().await;
            refresh_now(Arc::clone(&indexer)).await;
        }
    })
}
