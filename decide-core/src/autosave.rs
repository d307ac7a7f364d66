//! Debounced auto-save.
//!
//! [`AutoSaveController`] watches a stream of data snapshots and, once the
//! data has stopped changing for a quiet period, writes the newest snapshot
//! through the repository as the category's single auto-saved item. A status
//! value is published over a watch channel for UI feedback.
//!
//! All timing lives in one spawned task that owns the debounce timer, so at
//! most one save is ever in flight; a snapshot arriving mid-save is picked up
//! after the save resolves. Save failures downgrade to the `Error` status and
//! a log line, never a panic or a propagated error.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time;

use crate::models::{Category, SavedData};
use crate::repository::SavedItemRepository;
use crate::store::KeyValueStore;

/// Where the controller currently is in its save cycle.
///
/// `Saved` and `Error` are cosmetic resting points that return to `Idle`
/// after a short hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AutoSaveStatus {
    Idle,
    Pending,
    Saving,
    Saved,
    Error,
}

type Predicate = dyn Fn(&SavedData) -> bool + Send + Sync;

/// Timing knobs for the controller.
#[derive(Debug, Clone)]
pub struct AutoSaveConfig {
    /// Quiet period a change must survive before the save fires.
    pub delay: Duration,
    /// Failsafe: a pending cycle that has not started saving within this
    /// window resets to idle.
    pub pending_timeout: Duration,
    /// How long the `Saved` status is shown before returning to idle.
    pub saved_hold: Duration,
    /// How long the `Error` status is shown before returning to idle.
    pub error_hold: Duration,
    /// Name given to the auto-saved item on first creation.
    pub item_name: String,
}

impl Default for AutoSaveConfig {
    fn default() -> Self {
        Self {
            delay: Duration::from_millis(1500),
            pending_timeout: Duration::from_secs(5),
            saved_hold: Duration::from_millis(1500),
            error_hold: Duration::from_millis(2500),
            item_name: "Auto-saved".to_string(),
        }
    }
}

/// Debounced auto-saver for one category.
pub struct AutoSaveController {
    data_tx: watch::Sender<Option<SavedData>>,
    status_rx: watch::Receiver<AutoSaveStatus>,
    enabled: Arc<AtomicBool>,
    shutdown_tx: watch::Sender<bool>,
}

impl AutoSaveController {
    /// Spawns a controller that saves every settled snapshot.
    pub fn new<S: KeyValueStore + 'static>(
        repository: Arc<SavedItemRepository<S>>,
        category: Category,
        config: AutoSaveConfig,
    ) -> Self {
        Self::with_predicate(repository, category, config, |_| true)
    }

    /// Spawns a controller that only saves snapshots the predicate accepts
    /// (e.g. "at least one row is filled in").
    pub fn with_predicate<S, P>(
        repository: Arc<SavedItemRepository<S>>,
        category: Category,
        config: AutoSaveConfig,
        should_save: P,
    ) -> Self
    where
        S: KeyValueStore + 'static,
        P: Fn(&SavedData) -> bool + Send + Sync + 'static,
    {
        let (data_tx, data_rx) = watch::channel(None);
        let (status_tx, status_rx) = watch::channel(AutoSaveStatus::Idle);
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        let enabled = Arc::new(AtomicBool::new(true));

        tokio::spawn(drive(
            repository,
            category,
            config,
            Arc::from(Box::new(should_save) as Box<Predicate>),
            data_rx,
            status_tx,
            shutdown_rx,
            enabled.clone(),
        ));

        Self {
            data_tx,
            status_rx,
            enabled,
            shutdown_tx,
        }
    }

    /// Feeds the latest snapshot. Only the newest unsettled snapshot is ever
    /// saved; calling this repeatedly within the quiet period restarts the
    /// debounce timer.
    pub fn update(&self, data: SavedData) {
        let _ = self.data_tx.send(Some(data));
    }

    /// Enables or disables saving. A pending cycle under a disabled
    /// controller expires without writing anything.
    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }

    /// A receiver for observing status transitions.
    pub fn status(&self) -> watch::Receiver<AutoSaveStatus> {
        self.status_rx.clone()
    }

    /// The status as of now.
    pub fn current_status(&self) -> AutoSaveStatus {
        *self.status_rx.borrow()
    }

    /// Stops the background task. A pending, not-yet-fired save is cancelled.
    pub fn shutdown(&self) {
        let _ = self.shutdown_tx.send(true);
    }
}

impl Drop for AutoSaveController {
    fn drop(&mut self) {
        let _ = self.shutdown_tx.send(true);
    }
}

#[allow(clippy::too_many_arguments)]
async fn drive<S: KeyValueStore>(
    repository: Arc<SavedItemRepository<S>>,
    category: Category,
    config: AutoSaveConfig,
    should_save: Arc<Predicate>,
    mut data_rx: watch::Receiver<Option<SavedData>>,
    status_tx: watch::Sender<AutoSaveStatus>,
    mut shutdown_rx: watch::Receiver<bool>,
    enabled: Arc<AtomicBool>,
) {
    // Serialized form of the last snapshot written, used to skip saves that
    // would change nothing.
    let mut last_saved: Option<String> = None;

    loop {
        if *shutdown_rx.borrow() {
            return;
        }

        tokio::select! {
            changed = data_rx.changed() => {
                if changed.is_err() {
                    return;
                }
            }
            _ = shutdown_rx.changed() => continue,
        }

        let Some(mut snapshot) = data_rx.borrow_and_update().clone() else {
            continue;
        };
        let Some(mut serialized) =
            eligible(&snapshot, &last_saved, should_save.as_ref(), &enabled)
        else {
            continue;
        };

        let _ = status_tx.send(AutoSaveStatus::Pending);
        let pending_deadline = time::Instant::now() + config.pending_timeout;

        // Debounce: each new change restarts the quiet-period timer, bounded
        // by the failsafe deadline.
        let fired = loop {
            tokio::select! {
                _ = time::sleep(config.delay) => break true,
                _ = time::sleep_until(pending_deadline) => break false,
                changed = data_rx.changed() => {
                    if changed.is_err() {
                        break false;
                    }
                    let Some(latest) = data_rx.borrow_and_update().clone() else {
                        break false;
                    };
                    match eligible(&latest, &last_saved, should_save.as_ref(), &enabled) {
                        Some(s) => {
                            snapshot = latest;
                            serialized = s;
                        }
                        None => break false,
                    }
                }
                _ = shutdown_rx.changed() => {
                    let _ = status_tx.send(AutoSaveStatus::Idle);
                    return;
                }
            }
        };

        if !fired || !enabled.load(Ordering::Relaxed) {
            let _ = status_tx.send(AutoSaveStatus::Idle);
            continue;
        }

        let _ = status_tx.send(AutoSaveStatus::Saving);
        match repository
            .save(category, &config.item_name, snapshot, true)
            .await
        {
            Ok(_) => {
                last_saved = Some(serialized);
                let _ = status_tx.send(AutoSaveStatus::Saved);
                time::sleep(config.saved_hold).await;
            }
            Err(e) => {
                tracing::warn!("Auto-save for {} failed: {}", category, e);
                let _ = status_tx.send(AutoSaveStatus::Error);
                time::sleep(config.error_hold).await;
            }
        }
        let _ = status_tx.send(AutoSaveStatus::Idle);
    }
}

/// Returns the snapshot's serialized form when it is worth saving: the
/// controller is enabled, the predicate accepts it, and it differs from the
/// last written snapshot.
fn eligible(
    snapshot: &SavedData,
    last_saved: &Option<String>,
    should_save: &Predicate,
    enabled: &AtomicBool,
) -> Option<String> {
    if !enabled.load(Ordering::Relaxed) || !should_save(snapshot) {
        return None;
    }
    let serialized = match serde_json::to_string(snapshot) {
        Ok(s) => s,
        Err(e) => {
            tracing::warn!("Failed to serialize auto-save snapshot: {}", e);
            return None;
        }
    };
    if last_saved.as_deref() == Some(serialized.as_str()) {
        return None;
    }
    Some(serialized)
}
