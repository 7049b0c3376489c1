//! Autosave — background snapshot persistence
//!
//! Rewrites the snapshot on two paths: an explicit trigger fired after
//! every balance-mutating operation, and a fixed interval as a safety net
//! against missed triggers. Both serialize the full current state, so
//! running them back-to-back is harmless.
//!
//! Save failures are logged and retried on the next tick; they never stop
//! the loop or the process.

use crate::snapshot::{FileBackend, Snapshot};
use crate::store::LedgerStore;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{Notify, RwLock};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info};

/// Interval for the safety-net save (5 minutes)
pub const DEFAULT_SAVE_INTERVAL: Duration = Duration::from_secs(300);

/// Handle to control the autosave task
pub struct AutosaveHandle {
    cancel: CancellationToken,
    notify: Arc<Notify>,
    task: JoinHandle<()>,
}

impl AutosaveHandle {
    /// Request a save soon (after a balance-mutating operation).
    ///
    /// Returns immediately; the write happens on the background task so
    /// request handling never blocks on disk I/O.
    pub fn trigger(&self) {
        self.notify.notify_one();
    }

    /// Stop the task, flushing the current state to disk first.
    pub async fn shutdown(self) {
        self.cancel.cancel();
        if let Err(err) = self.task.await {
            error!("Autosave task panicked during shutdown: {err}");
        }
    }
}

/// Spawn the autosave background task
pub fn spawn_autosave(
    store: Arc<RwLock<LedgerStore>>,
    backend: FileBackend,
    interval: Duration,
) -> AutosaveHandle {
    let cancel = CancellationToken::new();
    let notify = Arc::new(Notify::new());

    let task = tokio::spawn(autosave_loop(
        store,
        backend,
        interval,
        cancel.clone(),
        notify.clone(),
    ));

    AutosaveHandle {
        cancel,
        notify,
        task,
    }
}

async fn autosave_loop(
    store: Arc<RwLock<LedgerStore>>,
    backend: FileBackend,
    interval: Duration,
    cancel: CancellationToken,
    notify: Arc<Notify>,
) {
    info!(
        path = %backend.path().display(),
        interval_secs = interval.as_secs(),
        "Autosave loop started"
    );

    let mut ticker = tokio::time::interval(interval);
    // The first tick fires immediately; saving the freshly loaded state is
    // idempotent, so let it.
    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                flush(&store, &backend, "shutdown").await;
                info!("Autosave loop stopped");
                return;
            }
            _ = notify.notified() => {
                flush(&store, &backend, "trigger").await;
            }
            _ = ticker.tick() => {
                flush(&store, &backend, "interval").await;
            }
        }
    }
}

/// Serialize under a read lock, then write without holding it.
async fn flush(store: &Arc<RwLock<LedgerStore>>, backend: &FileBackend, reason: &str) {
    let snapshot = {
        let guard = store.read().await;
        Snapshot::capture(&guard)
    };

    match backend.save(&snapshot).await {
        Ok(()) => debug!(reason, accounts = snapshot.users.len(), "Snapshot saved"),
        // Retried on the next trigger or tick
        Err(err) => error!(reason, "Snapshot save failed: {err}"),
    }
}
