use std::collections::HashMap;
use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::{oneshot, Mutex};
use tokio::time::timeout;
use warp::Filter;
use serde_json::json;
use crate::config::constants::{
    DEFAULT_SERVER_PORT_RANGE_START, DEFAULT_SERVER_PORT_RANGE_END,
    MAX_SESSION_ID_LENGTH, SERVER_SHUTDOWN_GRACE_PERIOD_MS,
    SESSION_COMPLETION_POLL_INTERVAL_MS, timeout_duration, sleep_duration_millis
};
use crate::enums::session_status::SessionStatus;
use crate::errors::{LexlineError, LexlineResult};
use crate::ui::markup_renderer::MarkupRenderer;
use crate::ui::session_manager::SessionManager;

type DirtyHandle = Arc<Mutex<Option<Instant>>>;

/// Browser-facing review surface: serves the redline page and the
/// apply/preview/toggle API over a loopback warp server.
pub struct ReviewServer {
    session_manager: Arc<SessionManager>,
    dirty_handle: Option<DirtyHandle>,
    port: Option<u16>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl ReviewServer {
    pub fn new(session_manager: Arc<SessionManager>) -> Self {
        Self {
            session_manager,
            dirty_handle: None,
            port: None,
            shutdown_tx: None,
        }
    }

    /// Wire in the autosaver's debounce handle; every mutating request will
    /// restart the quiet period.
    pub fn with_autosave(mut self, dirty_handle: DirtyHandle) -> Self {
        self.dirty_handle = Some(dirty_handle);
        self
    }

    pub async fn start(&mut self) -> LexlineResult<u16> {
        let port = self.find_available_port().await?;
        self.port = Some(port);

        let (shutdown_tx, shutdown_rx) = oneshot::channel();
        self.shutdown_tx = Some(shutdown_tx);

        let page_manager = Arc::clone(&self.session_manager);
        let review_route = warp::path::end()
            .and(warp::query::<HashMap<String, String>>())
            .and(warp::any().map(move || Arc::clone(&page_manager)))
            .and_then(serve_review_page);

        let api_routes = self.create_api_routes();

        let routes = review_route
            .or(api_routes)
            .with(warp::cors()
                .allow_origin("http://127.0.0.1")
                .allow_origin("http://localhost")
                .allow_headers(vec!["content-type"])
                .allow_methods(vec!["GET", "POST"]));

        let addr: SocketAddr = ([127, 0, 0, 1], port).into();
        let (_, server) = warp::serve(routes)
            .bind_with_graceful_shutdown(addr, async {
                shutdown_rx.await.ok();
            });

        tokio::spawn(server);

        log::info!("🌐 Review server started on port {}", port);
        Ok(port)
    }

    /// Poll until the reviewer completes or cancels in the browser, or the
    /// timeout elapses. Returns the final draft text on completion.
    pub async fn wait_for_completion(&self, session_id: &str, timeout_minutes: u64) -> LexlineResult<Option<String>> {
        let timeout_dur = timeout_duration(timeout_minutes);

        let result = timeout(timeout_dur, async {
            loop {
                let Some(session) = self.session_manager.get_session(session_id) else {
                    return Err(LexlineError::session_error(session_id, "session disappeared"));
                };

                match session.status {
                    SessionStatus::Completed => {
                        return Ok(Some(session.state.current_text));
                    }
                    SessionStatus::Cancelled => {
                        return Ok(None);
                    }
                    SessionStatus::Active => {
                        tokio::time::sleep(sleep_duration_millis(SESSION_COMPLETION_POLL_INTERVAL_MS)).await;
                    }
                }
            }
        }).await;

        match result {
            Ok(final_text) => final_text,
            Err(_) => {
                log::warn!("⏰ Review session timed out after {} minutes", timeout_minutes);
                Ok(None)
            }
        }
    }

    pub async fn shutdown(&mut self) -> LexlineResult<()> {
        log::info!("🛑 Shutting down review server...");

        if let Some(shutdown_tx) = self.shutdown_tx.take() {
            shutdown_tx.send(()).map_err(|_|
                LexlineError::system_error("shutdown", "Failed to send shutdown signal")
            )?;
        }

        tokio::time::sleep(sleep_duration_millis(SERVER_SHUTDOWN_GRACE_PERIOD_MS)).await;
        log::info!("✅ Review server shutdown complete");

        Ok(())
    }

    fn create_api_routes(
        &self,
    ) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
        let session_manager = Arc::clone(&self.session_manager);
        let session_manager_filter = warp::any().map(move || Arc::clone(&session_manager));
        let dirty_handle = self.dirty_handle.clone();
        let dirty_filter = warp::any().map(move || dirty_handle.clone());

        let get_session = warp::path!("api" / "session" / String)
            .and(warp::get())
            .and(session_manager_filter.clone())
            .and_then(get_session_handler);

        let apply_change = warp::path!("api" / "session" / String / "apply")
            .and(warp::post())
            .and(warp::body::json())
            .and(session_manager_filter.clone())
            .and(dirty_filter.clone())
            .and_then(apply_change_handler);

        let apply_all = warp::path!("api" / "session" / String / "apply-all")
            .and(warp::post())
            .and(session_manager_filter.clone())
            .and(dirty_filter.clone())
            .and_then(apply_all_handler);

        let preview_change = warp::path!("api" / "session" / String / "preview")
            .and(warp::post())
            .and(warp::body::json())
            .and(session_manager_filter.clone())
            .and_then(preview_change_handler);

        let discard_preview = warp::path!("api" / "session" / String / "discard")
            .and(warp::post())
            .and(warp::body::json())
            .and(session_manager_filter.clone())
            .and_then(discard_preview_handler);

        let toggle_markup = warp::path!("api" / "session" / String / "toggle-markup")
            .and(warp::post())
            .and(session_manager_filter.clone())
            .and_then(toggle_markup_handler);

        let complete_session = warp::path!("api" / "session" / String / "complete")
            .and(warp::post())
            .and(session_manager_filter.clone())
            .and_then(complete_session_handler);

        let cancel_session = warp::path!("api" / "session" / String / "cancel")
            .and(warp::post())
            .and(session_manager_filter)
            .and_then(cancel_session_handler);

        get_session
            .or(apply_change)
            .or(apply_all)
            .or(preview_change)
            .or(discard_preview)
            .or(toggle_markup)
            .or(complete_session)
            .or(cancel_session)
    }

    async fn find_available_port(&self) -> LexlineResult<u16> {
        for port in DEFAULT_SERVER_PORT_RANGE_START..DEFAULT_SERVER_PORT_RANGE_END {
            if let Ok(listener) = tokio::net::TcpListener::bind(format!("127.0.0.1:{}", port)).await {
                drop(listener);
                return Ok(port);
            }
        }
        Err(LexlineError::system_error(
            "start review server",
            "No available ports found",
        ))
    }
}

fn sanitize_session_id(session_id: &str) -> String {
    session_id.chars()
        .filter(|c| c.is_alphanumeric() || *c == '-' || *c == '_')
        .take(MAX_SESSION_ID_LENGTH)
        .collect()
}

async fn mark_dirty(dirty_handle: &Option<DirtyHandle>) {
    if let Some(handle) = dirty_handle {
        let mut guard = handle.lock().await;
        *guard = Some(Instant::now());
    }
}

async fn serve_review_page(
    params: HashMap<String, String>,
    session_manager: Arc<SessionManager>,
) -> Result<impl warp::Reply, Infallible> {
    let session_id = params.get("session")
        .map(|s| sanitize_session_id(s))
        .unwrap_or_default();

    let Some(session) = session_manager.get_session(&session_id) else {
        return Ok(warp::reply::html("<h1>Review session not found</h1>".to_string()));
    };

    let segments = session_manager.markup_segments(&session_id).unwrap_or_default();
    let body = if session.state.show_markup {
        MarkupRenderer::render_html(&segments)
    } else {
        MarkupRenderer::escape_html(&session.state.current_text).replace('\n', "<br>")
    };

    let pending_rows: String = session.state.pending_changes.iter()
        .filter(|c| !c.applied)
        .map(|c| format!(
            "<li><code>{}</code> {} <button onclick=\"act('apply','{}')\">Apply</button> \
             <button onclick=\"act('preview','{}')\">Preview</button> \
             <button onclick=\"act('discard','{}')\">Discard preview</button> \
             {}</li>",
            MarkupRenderer::escape_html(&c.change.id),
            MarkupRenderer::escape_html(&c.change.reasoning),
            MarkupRenderer::escape_html(&c.change.id),
            MarkupRenderer::escape_html(&c.change.id),
            MarkupRenderer::escape_html(&c.change.id),
            MarkupRenderer::escape_html(c.change.kind.label()),
        ))
        .collect();

    let html = format!(
        r#"<!DOCTYPE html>
<html>
<head>
<meta charset="utf-8">
<title>Lexline Review - {title}</title>
<style>
body {{ font-family: Georgia, serif; margin: 2rem auto; max-width: 52rem; line-height: 1.6; }}
ins.added {{ background: #e6ffec; color: #116329; text-decoration: none; }}
del.removed {{ background: #ffebe9; color: #82071e; }}
.toolbar {{ margin-bottom: 1rem; }}
.unsaved {{ color: #9a6700; }}
</style>
</head>
<body>
<h1>{title}</h1>
<div class="toolbar">
  <button onclick="act('apply-all')">Apply all</button>
  <button onclick="act('toggle-markup')">Toggle markup</button>
  <button onclick="act('complete')">Done</button>
  <button onclick="act('cancel')">Cancel</button>
  {unsaved}
</div>
<div id="draft">{body}</div>
<h2>Pending changes</h2>
<ul>{pending_rows}</ul>
<script>
async function act(action, changeId) {{
  const opts = {{ method: 'POST', headers: {{ 'content-type': 'application/json' }} }};
  if (changeId) opts.body = JSON.stringify({{ change_id: changeId }});
  await fetch(`/api/session/{session_id}/${{action}}`, opts);
  location.reload();
}}
</script>
</body>
</html>"#,
        title = MarkupRenderer::escape_html(&session.document_name),
        unsaved = if session.state.has_unsaved_changes {
            "<span class=\"unsaved\">● unsaved changes</span>"
        } else {
            ""
        },
        body = body,
        pending_rows = pending_rows,
        session_id = MarkupRenderer::escape_html(&session_id),
    );

    Ok(warp::reply::html(html))
}

async fn get_session_handler(session_id: String, session_manager: Arc<SessionManager>) -> Result<impl warp::Reply, Infallible> {
    let sanitized_session_id = sanitize_session_id(&session_id);
    if sanitized_session_id.is_empty() {
        return Ok(warp::reply::json(&json!({
            "error": "Invalid session ID"
        })));
    }

    match session_manager.get_session(&sanitized_session_id) {
        Some(session) => {
            let segments = session_manager.markup_segments(&sanitized_session_id).unwrap_or_default();
            Ok(warp::reply::json(&json!({
                "session": session,
                "segments": segments,
            })))
        }
        None => Ok(warp::reply::json(&json!({
            "error": "Session not found"
        }))),
    }
}

async fn apply_change_handler(
    session_id: String,
    body: serde_json::Value,
    session_manager: Arc<SessionManager>,
    dirty_handle: Option<DirtyHandle>,
) -> Result<impl warp::Reply, Infallible> {
    let sanitized_session_id = sanitize_session_id(&session_id);
    if sanitized_session_id.is_empty() {
        return Ok(warp::reply::json(&json!({
            "error": "Invalid session ID"
        })));
    }

    let Some(change_id) = body.get("change_id").and_then(|v| v.as_str()) else {
        return Ok(warp::reply::json(&json!({
            "error": "Missing change_id"
        })));
    };

    match session_manager.apply_change(&sanitized_session_id, change_id) {
        Ok(success) => {
            if success {
                mark_dirty(&dirty_handle).await;
            }
            Ok(warp::reply::json(&json!({
                "success": success,
                "message": if success { "Change applied" } else { "Change not found" }
            })))
        }
        Err(e) => Ok(warp::reply::json(&json!({
            "error": format!("Failed to apply change: {}", e)
        }))),
    }
}

async fn apply_all_handler(
    session_id: String,
    session_manager: Arc<SessionManager>,
    dirty_handle: Option<DirtyHandle>,
) -> Result<impl warp::Reply, Infallible> {
    let sanitized_session_id = sanitize_session_id(&session_id);
    if sanitized_session_id.is_empty() {
        return Ok(warp::reply::json(&json!({
            "error": "Invalid session ID"
        })));
    }

    match session_manager.apply_all_changes(&sanitized_session_id) {
        Ok(outcome) => {
            if outcome.applied > 0 {
                mark_dirty(&dirty_handle).await;
            }
            Ok(warp::reply::json(&json!({
                "success": true,
                "applied": outcome.applied,
                "warnings": outcome.warnings,
            })))
        }
        Err(e) => Ok(warp::reply::json(&json!({
            "error": format!("Failed to apply changes: {}", e)
        }))),
    }
}

async fn preview_change_handler(
    session_id: String,
    body: serde_json::Value,
    session_manager: Arc<SessionManager>,
) -> Result<impl warp::Reply, Infallible> {
    let sanitized_session_id = sanitize_session_id(&session_id);
    if sanitized_session_id.is_empty() {
        return Ok(warp::reply::json(&json!({
            "error": "Invalid session ID"
        })));
    }

    let Some(change_id) = body.get("change_id").and_then(|v| v.as_str()) else {
        return Ok(warp::reply::json(&json!({
            "error": "Missing change_id"
        })));
    };

    match session_manager.preview_change(&sanitized_session_id, change_id) {
        Ok(preview_text) => Ok(warp::reply::json(&json!({
            "success": true,
            "preview_text": preview_text,
        }))),
        Err(e) => Ok(warp::reply::json(&json!({
            "error": format!("Failed to preview change: {}", e)
        }))),
    }
}

async fn discard_preview_handler(
    session_id: String,
    body: serde_json::Value,
    session_manager: Arc<SessionManager>,
) -> Result<impl warp::Reply, Infallible> {
    let sanitized_session_id = sanitize_session_id(&session_id);
    if sanitized_session_id.is_empty() {
        return Ok(warp::reply::json(&json!({
            "error": "Invalid session ID"
        })));
    }

    let Some(change_id) = body.get("change_id").and_then(|v| v.as_str()) else {
        return Ok(warp::reply::json(&json!({
            "error": "Missing change_id"
        })));
    };

    session_manager.discard_preview(&sanitized_session_id, change_id);
    Ok(warp::reply::json(&json!({
        "success": true,
        "message": "Preview discarded"
    })))
}

async fn toggle_markup_handler(
    session_id: String,
    session_manager: Arc<SessionManager>,
) -> Result<impl warp::Reply, Infallible> {
    let sanitized_session_id = sanitize_session_id(&session_id);

    match session_manager.toggle_markup(&sanitized_session_id) {
        Some(show_markup) => Ok(warp::reply::json(&json!({
            "success": true,
            "show_markup": show_markup,
        }))),
        None => Ok(warp::reply::json(&json!({
            "error": "Session not found"
        }))),
    }
}

async fn complete_session_handler(
    session_id: String,
    session_manager: Arc<SessionManager>,
) -> Result<impl warp::Reply, Infallible> {
    let sanitized_session_id = sanitize_session_id(&session_id);
    if sanitized_session_id.is_empty() {
        return Ok(warp::reply::json(&json!({
            "error": "Invalid session ID"
        })));
    }

    match session_manager.complete_session(&sanitized_session_id) {
        Ok(_) => Ok(warp::reply::json(&json!({
            "success": true,
            "message": "Session completed"
        }))),
        Err(e) => Ok(warp::reply::json(&json!({
            "error": format!("Failed to complete session: {}", e)
        }))),
    }
}

async fn cancel_session_handler(
    session_id: String,
    session_manager: Arc<SessionManager>,
) -> Result<impl warp::Reply, Infallible> {
    let sanitized_session_id = sanitize_session_id(&session_id);
    if sanitized_session_id.is_empty() {
        return Ok(warp::reply::json(&json!({
            "error": "Invalid session ID"
        })));
    }

    session_manager.cancel_session(&sanitized_session_id);
    Ok(warp::reply::json(&json!({
        "success": true,
        "message": "Session cancelled"
    })))
}
