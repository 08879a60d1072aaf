use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use crate::config::constants::AUTOSAVE_POLL_INTERVAL_MS;
use crate::traits::draft_store::DraftStore;
use crate::ui::session_manager::SessionManager;

/// Debounced background autosave for a review session.
///
/// Each mutating user action marks the session dirty and restarts the quiet
/// period; once the period elapses, the current draft text is pushed to the
/// persistence endpoint. A save already in flight is never cancelled by a
/// newer edit, so a last-write-wins race between an in-flight save and a
/// fresh local edit is possible; the dirty flag is only cleared after a save
/// succeeds, which keeps the unsaved-changes indicator honest.
pub struct Autosaver {
    store: Arc<dyn DraftStore>,
    session_manager: Arc<SessionManager>,
    session_id: String,
    draft_id: String,
    debounce: Duration,
    dirty_since: Arc<Mutex<Option<Instant>>>,
    stop_sender: Option<mpsc::UnboundedSender<()>>,
    task_handle: Option<JoinHandle<()>>,
}

impl Autosaver {
    pub fn new(
        store: Arc<dyn DraftStore>,
        session_manager: Arc<SessionManager>,
        session_id: &str,
        draft_id: &str,
        debounce_ms: u64,
    ) -> Self {
        Self {
            store,
            session_manager,
            session_id: session_id.to_string(),
            draft_id: draft_id.to_string(),
            debounce: Duration::from_millis(debounce_ms),
            dirty_since: Arc::new(Mutex::new(None)),
            stop_sender: None,
            task_handle: None,
        }
    }

    /// Handle the review server hands out so request handlers can restart
    /// the debounce window.
    pub fn dirty_handle(&self) -> Arc<Mutex<Option<Instant>>> {
        Arc::clone(&self.dirty_since)
    }

    pub fn start(&mut self) {
        let (stop_tx, mut stop_rx) = mpsc::unbounded_channel();
        let store = Arc::clone(&self.store);
        let session_manager = Arc::clone(&self.session_manager);
        let session_id = self.session_id.clone();
        let draft_id = self.draft_id.clone();
        let debounce = self.debounce;
        let dirty_since = Arc::clone(&self.dirty_since);

        let handle = tokio::spawn(async move {
            let mut interval =
                tokio::time::interval(Duration::from_millis(AUTOSAVE_POLL_INTERVAL_MS));

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        let due = {
                            let guard = dirty_since.lock().await;
                            matches!(*guard, Some(since) if since.elapsed() >= debounce)
                        };

                        if !due {
                            continue;
                        }

                        let Some(text) = session_manager.current_text(&session_id) else {
                            continue;
                        };

                        match store.save_draft(&draft_id, &text).await {
                            Ok(()) => {
                                session_manager.mark_saved(&session_id);
                                let mut guard = dirty_since.lock().await;
                                *guard = None;
                            }
                            Err(e) => {
                                // Unsaved state stays visible; retry after
                                // the next quiet period.
                                log::warn!("⚠️ Autosave failed: {}", e.user_message());
                                let mut guard = dirty_since.lock().await;
                                *guard = Some(Instant::now());
                            }
                        }
                    }
                    _ = stop_rx.recv() => {
                        break;
                    }
                }
            }
        });

        self.stop_sender = Some(stop_tx);
        self.task_handle = Some(handle);
    }

    pub async fn stop(&mut self) {
        if let Some(sender) = self.stop_sender.take() {
            let _ = sender.send(());
        }

        if let Some(handle) = self.task_handle.take() {
            let _ = handle.await;
        }
    }
}
