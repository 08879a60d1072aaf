use crate::enums::editor_phase::EditorPhase;
use crate::errors::{LexlineError, LexlineResult};
use crate::services::change_applier::ChangeApplier;
use crate::services::segment_builder::SegmentBuilder;
use crate::structs::apply_outcome::ApplyOutcome;
use crate::structs::change_descriptor::ChangeDescriptor;
use crate::structs::diff_segment::DiffSegment;
use crate::structs::editor_state::EditorState;
use crate::structs::pending_change::PendingChange;

/// The single owner of [`EditorState`] transitions.
///
/// Every user action on a draft under review funnels through these
/// operations, so the same engine drives the CLI commands, the review
/// server, and the tests. All diff output is recomputed from state on each
/// call; nothing here caches segments.
pub struct EditorController;

impl EditorController {
    /// Add assistant suggestions to the pending collection.
    ///
    /// Markup display defaults to on as soon as any changes exist.
    pub fn ingest_changes(state: &mut EditorState, changes: Vec<ChangeDescriptor>) {
        for change in changes {
            state.pending_changes.push(PendingChange::new(change));
        }

        if !state.pending_changes.is_empty() {
            state.show_markup = true;
            if state.phase == EditorPhase::Idle {
                state.phase = EditorPhase::PendingChanges;
            }
        }
    }

    /// Compute the text the draft would become if one pending change were
    /// applied, without committing anything.
    ///
    /// Only the change's `preview_mode` flag and the phase move; `applied`
    /// flags and the draft text stay untouched.
    pub fn preview_change(state: &mut EditorState, change_id: &str) -> LexlineResult<String> {
        let current_text = state.current_text.clone();
        let pending = state
            .find_change_mut(change_id)
            .ok_or_else(|| LexlineError::change_error(change_id, "change not found"))?;

        pending.preview_mode = true;
        let preview = ChangeApplier::apply(&current_text, &pending.change);
        state.phase = EditorPhase::Previewing;
        Ok(preview)
    }

    /// Leave preview without applying.
    pub fn discard_preview(state: &mut EditorState, change_id: &str) {
        if let Some(pending) = state.find_change_mut(change_id) {
            pending.preview_mode = false;
        }
        state.phase = if state.pending_changes.iter().any(|c| c.applied) {
            EditorPhase::Applied
        } else if state.pending_changes.is_empty() {
            EditorPhase::Idle
        } else {
            EditorPhase::PendingChanges
        };
    }

    /// Apply one pending change to the draft.
    pub fn apply_change(state: &mut EditorState, change_id: &str) -> LexlineResult<()> {
        let change = state
            .find_change(change_id)
            .ok_or_else(|| LexlineError::change_error(change_id, "change not found"))?
            .change
            .clone();

        for warning in ChangeApplier::validate(&state.current_text, &change).warnings {
            log::warn!("⚠️ {}", warning);
        }

        Self::anchor_original_text(state);
        state.current_text = ChangeApplier::apply(&state.current_text, &change);

        if let Some(pending) = state.find_change_mut(change_id) {
            pending.applied = true;
            pending.preview_mode = false;
        }

        state.has_unsaved_changes = true;
        state.phase = EditorPhase::Applied;
        Ok(())
    }

    /// Apply every unapplied pending change as one batch against the
    /// current text, highest offset first.
    ///
    /// Changes that fail validation outright (inverted ranges) are skipped
    /// and stay pending; clamping and mismatch warnings are collected but do
    /// not block the splice.
    pub fn apply_all_changes(state: &mut EditorState) -> ApplyOutcome {
        let unapplied = state.unapplied_changes();
        let mut outcome = ApplyOutcome::default();

        if unapplied.is_empty() {
            return outcome;
        }

        let mut valid = Vec::new();
        for change in unapplied {
            let report = ChangeApplier::validate(&state.current_text, &change);
            outcome.warnings.extend(report.warnings);
            if report.is_valid {
                valid.push(change);
            } else {
                outcome.warnings.extend(report.errors);
                outcome.skipped += 1;
            }
        }

        if valid.is_empty() {
            return outcome;
        }

        Self::anchor_original_text(state);
        state.current_text = ChangeApplier::apply_all(&state.current_text, &valid);

        for pending in &mut state.pending_changes {
            if !pending.applied && valid.iter().any(|c| c.id == pending.change.id) {
                pending.applied = true;
                pending.preview_mode = false;
                outcome.applied += 1;
            }
        }

        state.has_unsaved_changes = true;
        state.phase = EditorPhase::Applied;
        outcome
    }

    /// Drop the whole pending collection, applied history included. The
    /// draft text itself is untouched.
    pub fn clear_changes(state: &mut EditorState) {
        state.pending_changes.clear();
        state.original_text_before_changes = None;
        state.show_markup = false;
        state.phase = EditorPhase::Idle;
    }

    pub fn toggle_markup(state: &mut EditorState) {
        state.show_markup = !state.show_markup;
    }

    /// The redline for the current state: applied changes rendered against
    /// the pre-change anchor text. Recomputed fresh on every call.
    pub fn markup_segments(state: &EditorState) -> Vec<DiffSegment> {
        SegmentBuilder::build_segments(state.reference_text(), &state.applied_changes())
    }

    /// Record a successful save. A failed save must NOT call this, so the
    /// user is never shown a clean state that only exists remotely.
    pub fn mark_saved(state: &mut EditorState) {
        state.has_unsaved_changes = false;
    }

    // The anchor is set the first time any change lands and survives all
    // later batches, so the redline always compares against the text the
    // user started from.
    fn anchor_original_text(state: &mut EditorState) {
        if state.original_text_before_changes.is_none() {
            state.original_text_before_changes = Some(state.current_text.clone());
        }
    }
}
