use std::sync::Arc;
use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;
use crate::enums::session_status::SessionStatus;
use crate::errors::{LexlineError, LexlineResult};
use crate::services::editor_controller::EditorController;
use crate::structs::apply_outcome::ApplyOutcome;
use crate::structs::change_descriptor::ChangeDescriptor;
use crate::structs::diff_segment::DiffSegment;
use crate::structs::editor_state::EditorState;
use crate::structs::review_session::ReviewSession;

/// Concurrent store of review sessions, one editor state per session.
///
/// Request handlers mutate sessions only through the controller operations,
/// so every surface sees the same state-machine semantics.
pub struct SessionManager {
    sessions: Arc<DashMap<String, ReviewSession>>,
}

impl SessionManager {
    pub fn new() -> Self {
        Self {
            sessions: Arc::new(DashMap::new()),
        }
    }

    pub fn create_session(
        &self,
        document_name: &str,
        draft_text: &str,
        changes: Vec<ChangeDescriptor>,
    ) -> String {
        let session_id = Uuid::new_v4().to_string();

        let mut state = EditorState::new(draft_text);
        EditorController::ingest_changes(&mut state, changes);

        let session = ReviewSession {
            id: session_id.clone(),
            document_name: document_name.to_string(),
            state,
            status: SessionStatus::Active,
            created_at: Utc::now(),
        };

        self.sessions.insert(session_id.clone(), session);
        session_id
    }

    pub fn get_session(&self, session_id: &str) -> Option<ReviewSession> {
        self.sessions.get(session_id).map(|entry| entry.clone())
    }

    pub fn current_text(&self, session_id: &str) -> Option<String> {
        self.sessions
            .get(session_id)
            .map(|entry| entry.state.current_text.clone())
    }

    /// The session's redline, recomputed from its state.
    pub fn markup_segments(&self, session_id: &str) -> Option<Vec<DiffSegment>> {
        self.sessions
            .get(session_id)
            .map(|entry| EditorController::markup_segments(&entry.state))
    }

    pub fn apply_change(&self, session_id: &str, change_id: &str) -> LexlineResult<bool> {
        let Some(mut session) = self.sessions.get_mut(session_id) else {
            return Ok(false);
        };

        match EditorController::apply_change(&mut session.state, change_id) {
            Ok(()) => Ok(true),
            Err(LexlineError::ChangeValidationError { .. }) => Ok(false),
            Err(e) => Err(e),
        }
    }

    pub fn apply_all_changes(&self, session_id: &str) -> LexlineResult<ApplyOutcome> {
        let mut session = self
            .sessions
            .get_mut(session_id)
            .ok_or_else(|| LexlineError::session_error(session_id, "session not found"))?;

        Ok(EditorController::apply_all_changes(&mut session.state))
    }

    pub fn preview_change(&self, session_id: &str, change_id: &str) -> LexlineResult<String> {
        let mut session = self
            .sessions
            .get_mut(session_id)
            .ok_or_else(|| LexlineError::session_error(session_id, "session not found"))?;

        EditorController::preview_change(&mut session.state, change_id)
    }

    pub fn discard_preview(&self, session_id: &str, change_id: &str) {
        if let Some(mut session) = self.sessions.get_mut(session_id) {
            EditorController::discard_preview(&mut session.state, change_id);
        }
    }

    pub fn toggle_markup(&self, session_id: &str) -> Option<bool> {
        let mut session = self.sessions.get_mut(session_id)?;
        EditorController::toggle_markup(&mut session.state);
        Some(session.state.show_markup)
    }

    pub fn mark_saved(&self, session_id: &str) {
        if let Some(mut session) = self.sessions.get_mut(session_id) {
            EditorController::mark_saved(&mut session.state);
        }
    }

    /// Close the session and return its final draft text.
    pub fn complete_session(&self, session_id: &str) -> LexlineResult<String> {
        let mut session = self
            .sessions
            .get_mut(session_id)
            .ok_or_else(|| LexlineError::session_error(session_id, "session not found"))?;

        session.status = SessionStatus::Completed;
        Ok(session.state.current_text.clone())
    }

    pub fn cancel_session(&self, session_id: &str) {
        if let Some(mut session) = self.sessions.get_mut(session_id) {
            session.status = SessionStatus::Cancelled;
        }
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new()
    }
}
