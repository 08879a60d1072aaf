use lexline_cli::enums::change_kind::ChangeKind;
use lexline_cli::enums::editor_phase::EditorPhase;
use lexline_cli::enums::segment_kind::SegmentKind;
use lexline_cli::enums::session_status::SessionStatus;
use lexline_cli::helpers::context_builder::build_context_text;
use lexline_cli::services::change_applier::ChangeApplier;
use lexline_cli::services::editor_controller::EditorController;
use lexline_cli::services::line_diff::create_line_diff;
use lexline_cli::services::segment_builder::SegmentBuilder;
use lexline_cli::services::word_diff::create_word_diff;
use lexline_cli::structs::change_descriptor::ChangeDescriptor;
use lexline_cli::structs::editor_state::EditorState;
use lexline_cli::ui::markup_renderer::MarkupRenderer;
use lexline_cli::ui::session_manager::SessionManager;

fn replace(id: &str, start: usize, end: usize, new_text: &str) -> ChangeDescriptor {
    let mut change = ChangeDescriptor::new(ChangeKind::Replace, start, end).with_new_text(new_text);
    change.id = id.to_string();
    change
}

fn insert(id: &str, start: usize, new_text: &str) -> ChangeDescriptor {
    let mut change = ChangeDescriptor::new(ChangeKind::Insert, start, start).with_new_text(new_text);
    change.id = id.to_string();
    change
}

fn delete(id: &str, start: usize, end: usize) -> ChangeDescriptor {
    let mut change = ChangeDescriptor::new(ChangeKind::Delete, start, end);
    change.id = id.to_string();
    change
}

mod applier {
    use super::*;

    #[test]
    fn replace_splices_over_half_open_range() {
        let result = ChangeApplier::apply("0123456789", &replace("c1", 5, 10, "X"));
        assert_eq!(result, "01234X");
    }

    #[test]
    fn insert_splices_at_offset_without_consuming() {
        let result = ChangeApplier::apply("abcdef", &insert("c1", 3, "XYZ"));
        assert_eq!(result, "abcXYZdef");
    }

    #[test]
    fn delete_removes_half_open_range() {
        let result = ChangeApplier::apply("abcdef", &delete("c1", 1, 3));
        assert_eq!(result, "adef");
    }

    #[test]
    fn restructure_behaves_like_replace() {
        let mut change = ChangeDescriptor::new(ChangeKind::Restructure, 0, 3).with_new_text("XY");
        change.id = "c1".to_string();
        assert_eq!(ChangeApplier::apply("abcdef", &change), "XYdef");
    }

    #[test]
    fn noop_replace_returns_identical_text() {
        let text = "the party of the first part";
        let change = replace("c1", 4, 9, "party");
        assert_eq!(ChangeApplier::apply(text, &change), text);
    }

    #[test]
    fn offsets_are_character_offsets_not_bytes() {
        // 'é' and 'ö' are multi-byte in UTF-8; byte slicing here would panic.
        let result = ChangeApplier::apply("héllo wörld", &replace("c1", 1, 2, "e"));
        assert_eq!(result, "hello wörld");

        let result = ChangeApplier::apply("héllo", &delete("c1", 1, 2));
        assert_eq!(result, "hllo");
    }

    #[test]
    fn out_of_range_offsets_are_clamped() {
        assert_eq!(ChangeApplier::apply("abc", &replace("c1", 1, 99, "Z")), "aZ");
        assert_eq!(ChangeApplier::apply("abc", &insert("c1", 99, "Z")), "abcZ");
        assert_eq!(ChangeApplier::apply("abc", &delete("c1", 99, 100)), "abc");
    }

    #[test]
    fn empty_document_boundaries() {
        assert_eq!(ChangeApplier::apply("", &insert("c1", 0, "hello")), "hello");
        assert_eq!(ChangeApplier::apply("", &delete("c1", 0, 5)), "");
        assert_eq!(ChangeApplier::apply("", &replace("c1", 0, 3, "x")), "x");
    }

    #[test]
    fn batch_applies_highest_offset_first() {
        let changes = vec![insert("c1", 8, "Z"), delete("c2", 2, 4)];
        assert_eq!(ChangeApplier::apply_all("abcdefghij", &changes), "abefghZij");
    }

    #[test]
    fn batch_order_in_input_does_not_matter_for_disjoint_changes() {
        let forward = vec![replace("c1", 0, 1, "X"), replace("c2", 5, 6, "Y")];
        let backward = vec![replace("c2", 5, 6, "Y"), replace("c1", 0, 1, "X")];
        assert_eq!(
            ChangeApplier::apply_all("abcdef", &forward),
            ChangeApplier::apply_all("abcdef", &backward)
        );
    }

    #[test]
    fn empty_batch_is_identity() {
        assert_eq!(ChangeApplier::apply_all("abcdef", &[]), "abcdef");
    }

    #[test]
    fn substring_uses_character_offsets() {
        assert_eq!(ChangeApplier::substring("héllo", 1, 3), "él");
        assert_eq!(ChangeApplier::substring("abc", 2, 99), "c");
    }
}

mod validation {
    use super::*;

    #[test]
    fn inverted_range_is_an_error() {
        let report = ChangeApplier::validate("abcdef", &delete("c1", 5, 2));
        assert!(!report.is_valid);
        assert_eq!(report.errors.len(), 1);
    }

    #[test]
    fn insert_ignores_end_index() {
        let change = insert("c1", 3, "x");
        let report = ChangeApplier::validate("abcdef", &change);
        assert!(report.is_valid);
        assert!(report.warnings.is_empty());
    }

    #[test]
    fn out_of_range_is_a_warning_not_an_error() {
        let report = ChangeApplier::validate("abc", &delete("c1", 1, 99));
        assert!(report.is_valid);
        assert_eq!(report.warnings.len(), 1);
    }

    #[test]
    fn original_text_mismatch_is_a_warning_not_an_error() {
        let change = replace("c1", 0, 3, "XYZ").with_original_text("zzz");
        let report = ChangeApplier::validate("abcdef", &change);
        assert!(report.is_valid);
        assert!(report.warnings.iter().any(|w| w.contains("'abc'")));
    }

    #[test]
    fn matching_original_text_produces_no_warning() {
        let change = replace("c1", 0, 3, "XYZ").with_original_text("abc");
        let report = ChangeApplier::validate("abcdef", &change);
        assert!(report.is_valid);
        assert!(report.warnings.is_empty());
    }
}

mod line_diff_tests {
    use super::*;

    fn lines_of(segments: &[lexline_cli::structs::diff_segment::DiffSegment], skip: SegmentKind) -> Vec<String> {
        segments
            .iter()
            .filter(|s| s.kind != skip)
            .map(|s| s.text.clone())
            .collect()
    }

    #[test]
    fn identical_texts_yield_only_unchanged_lines() {
        let text = "clause one\nclause two\nclause three";
        let segments = create_line_diff(text, text);
        assert_eq!(segments.len(), 3);
        assert!(segments.iter().all(|s| s.kind == SegmentKind::Unchanged));
    }

    #[test]
    fn differing_pair_emits_deletion_then_addition() {
        let segments = create_line_diff("old clause\nsame", "new clause\nsame");
        assert_eq!(segments[0].kind, SegmentKind::Deletion);
        assert_eq!(segments[0].text, "old clause");
        assert_eq!(segments[1].kind, SegmentKind::Addition);
        assert_eq!(segments[1].text, "new clause");
        assert_eq!(segments[2].kind, SegmentKind::Unchanged);
    }

    #[test]
    fn trailing_lines_emit_unpaired() {
        let segments = create_line_diff("a", "a\nb\nc");
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[1].kind, SegmentKind::Addition);
        assert_eq!(segments[2].kind, SegmentKind::Addition);

        let segments = create_line_diff("a\nb\nc", "a");
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[1].kind, SegmentKind::Deletion);
        assert_eq!(segments[2].kind, SegmentKind::Deletion);
    }

    #[test]
    fn inserted_line_shifts_later_pairs() {
        // The walk is position-synchronized, not minimal: one inserted first
        // line turns every later pair into a deletion/addition pair.
        let segments = create_line_diff("a\nb", "x\na\nb");
        let kinds: Vec<SegmentKind> = segments.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SegmentKind::Deletion,
                SegmentKind::Addition,
                SegmentKind::Deletion,
                SegmentKind::Addition,
                SegmentKind::Addition,
            ]
        );
    }

    #[test]
    fn blank_lines_in_differing_pairs_are_dropped() {
        let segments = create_line_diff("old", "");
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].kind, SegmentKind::Deletion);

        let segments = create_line_diff("a\n\nb", "a\nx\nb");
        let kinds: Vec<SegmentKind> = segments.iter().map(|s| s.kind).collect();
        // The blank original line is dropped; only the addition survives.
        assert_eq!(
            kinds,
            vec![SegmentKind::Unchanged, SegmentKind::Addition, SegmentKind::Unchanged]
        );
    }

    #[test]
    fn unchanged_blank_lines_are_kept() {
        let text = "a\n\nb";
        let segments = create_line_diff(text, text);
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[1].text, "");
        assert_eq!(segments[1].kind, SegmentKind::Unchanged);
    }

    #[test]
    fn conservation_holds_for_blank_free_inputs() {
        let original = "whereas one\nwhereas two\nwhereas three";
        let modified = "whereas one\nas amended\nwhereas three\nnew tail";
        let segments = create_line_diff(original, modified);

        let rebuilt_modified = lines_of(&segments, SegmentKind::Deletion);
        let rebuilt_original = lines_of(&segments, SegmentKind::Addition);
        assert_eq!(rebuilt_modified.join("\n"), modified);
        assert_eq!(rebuilt_original.join("\n"), original);
    }

    #[test]
    fn empty_inputs_yield_no_segments() {
        assert!(create_line_diff("", "").is_empty());
    }
}

mod word_diff_tests {
    use super::*;

    #[test]
    fn round_trips_both_texts() {
        let original = "the party shall pay within thirty days";
        let modified = "the party must pay within sixty days";
        let segments = create_word_diff(original, modified);

        assert_eq!(SegmentBuilder::modified_text(&segments), modified);
        assert_eq!(SegmentBuilder::reference_text(&segments), original);
    }

    #[test]
    fn identical_texts_have_no_marked_segments() {
        let segments = create_word_diff("same words here", "same words here");
        assert!(segments.iter().all(|s| s.kind == SegmentKind::Unchanged));
    }

    #[test]
    fn empty_inputs_yield_no_segments() {
        assert!(create_word_diff("", "").is_empty());
    }
}

mod segment_builder_tests {
    use super::*;

    #[test]
    fn delete_emits_deletion_from_reference_text() {
        let segments = SegmentBuilder::build_segments("abcdef", &[delete("c1", 1, 3)]);
        assert_eq!(segments.len(), 3);
        assert_eq!(segments[0].kind, SegmentKind::Unchanged);
        assert_eq!(segments[0].text, "a");
        assert_eq!(segments[1].kind, SegmentKind::Deletion);
        assert_eq!(segments[1].text, "bc");
        assert_eq!(segments[1].change_id.as_deref(), Some("c1"));
        assert_eq!(segments[2].text, "def");
    }

    #[test]
    fn insert_emits_addition_without_consuming_reference() {
        let segments = SegmentBuilder::build_segments("abcdef", &[insert("c1", 3, "XYZ")]);
        assert_eq!(SegmentBuilder::modified_text(&segments), "abcXYZdef");
        assert_eq!(SegmentBuilder::reference_text(&segments), "abcdef");
    }

    #[test]
    fn replace_emits_deletion_then_addition() {
        let segments = SegmentBuilder::build_segments("abcdef", &[replace("c1", 2, 4, "ZZ")]);
        let kinds: Vec<SegmentKind> = segments.iter().map(|s| s.kind).collect();
        assert_eq!(
            kinds,
            vec![
                SegmentKind::Unchanged,
                SegmentKind::Deletion,
                SegmentKind::Addition,
                SegmentKind::Unchanged,
            ]
        );
        assert_eq!(segments[1].text, "cd");
        assert_eq!(segments[2].text, "ZZ");
    }

    #[test]
    fn stale_original_text_renders_the_actual_draft_text() {
        let change = delete("c1", 0, 3).with_original_text("zzz");
        let segments = SegmentBuilder::build_segments("abcdef", &[change]);
        assert_eq!(segments[0].kind, SegmentKind::Deletion);
        assert_eq!(segments[0].text, "abc");
    }

    #[test]
    fn overlapping_change_is_skipped_not_duplicated() {
        let changes = vec![replace("c1", 2, 6, "XX"), delete("c2", 4, 8)];
        let segments = SegmentBuilder::build_segments("abcdefghij", &changes);
        assert_eq!(SegmentBuilder::reference_text(&segments), "abcdefghij");
        assert_eq!(SegmentBuilder::modified_text(&segments), "abXXghij");
    }

    #[test]
    fn reconstruction_matches_batch_apply_for_disjoint_changes() {
        let base = "the landlord shall repair the roof";
        let changes = vec![
            replace("c1", 4, 12, "lessor"),
            insert("c2", 18, " promptly"),
            delete("c3", 29, 34),
        ];
        let segments = SegmentBuilder::build_segments(base, &changes);
        assert_eq!(
            SegmentBuilder::modified_text(&segments),
            ChangeApplier::apply_all(base, &changes)
        );
        assert_eq!(SegmentBuilder::reference_text(&segments), base);
    }

    #[test]
    fn no_changes_yields_single_unchanged_segment() {
        let segments = SegmentBuilder::build_segments("abcdef", &[]);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].kind, SegmentKind::Unchanged);
        assert_eq!(segments[0].text, "abcdef");
    }

    #[test]
    fn empty_reference_with_insert() {
        let segments = SegmentBuilder::build_segments("", &[insert("c1", 0, "hello")]);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].kind, SegmentKind::Addition);
        assert_eq!(SegmentBuilder::modified_text(&segments), "hello");
    }

    #[test]
    fn anchored_text_matches_applier_substring() {
        let change = delete("c1", 2, 5);
        assert_eq!(SegmentBuilder::anchored_text("abcdefgh", &change), "cde");
    }
}

mod controller {
    use super::*;

    #[test]
    fn ingest_turns_markup_on_and_moves_to_pending() {
        let mut state = EditorState::new("abcdef");
        assert_eq!(state.phase, EditorPhase::Idle);
        assert!(!state.show_markup);

        EditorController::ingest_changes(&mut state, vec![replace("c1", 0, 1, "X")]);
        assert_eq!(state.phase, EditorPhase::PendingChanges);
        assert!(state.show_markup);
        assert_eq!(state.pending_changes.len(), 1);
    }

    #[test]
    fn ingest_of_nothing_stays_idle() {
        let mut state = EditorState::new("abcdef");
        EditorController::ingest_changes(&mut state, vec![]);
        assert_eq!(state.phase, EditorPhase::Idle);
        assert!(!state.show_markup);
    }

    #[test]
    fn preview_does_not_mutate_applied_state() {
        let mut state = EditorState::new("abcdef");
        EditorController::ingest_changes(&mut state, vec![replace("c1", 0, 3, "XYZ")]);

        let preview = EditorController::preview_change(&mut state, "c1").unwrap();
        assert_eq!(preview, "XYZdef");
        assert_eq!(state.current_text, "abcdef");
        assert_eq!(state.phase, EditorPhase::Previewing);
        assert!(!state.find_change("c1").unwrap().applied);
        assert!(state.find_change("c1").unwrap().preview_mode);
        assert!(!state.has_unsaved_changes);

        EditorController::discard_preview(&mut state, "c1");
        assert_eq!(state.phase, EditorPhase::PendingChanges);
        assert!(!state.find_change("c1").unwrap().preview_mode);
        assert_eq!(state.current_text, "abcdef");
    }

    #[test]
    fn preview_of_unknown_change_is_an_error() {
        let mut state = EditorState::new("abcdef");
        assert!(EditorController::preview_change(&mut state, "nope").is_err());
    }

    #[test]
    fn apply_change_commits_and_anchors_original_text() {
        let mut state = EditorState::new("abcdef");
        EditorController::ingest_changes(&mut state, vec![replace("c1", 0, 3, "XYZ")]);

        EditorController::apply_change(&mut state, "c1").unwrap();
        assert_eq!(state.current_text, "XYZdef");
        assert_eq!(state.original_text_before_changes.as_deref(), Some("abcdef"));
        assert!(state.find_change("c1").unwrap().applied);
        assert!(state.has_unsaved_changes);
        assert_eq!(state.phase, EditorPhase::Applied);
    }

    #[test]
    fn anchor_survives_later_batches() {
        let mut state = EditorState::new("abcdef");
        EditorController::ingest_changes(&mut state, vec![replace("c1", 0, 3, "XYZ")]);
        EditorController::apply_change(&mut state, "c1").unwrap();

        EditorController::ingest_changes(&mut state, vec![insert("c2", 0, "Q")]);
        EditorController::apply_change(&mut state, "c2").unwrap();

        assert_eq!(state.current_text, "QXYZdef");
        assert_eq!(state.original_text_before_changes.as_deref(), Some("abcdef"));
    }

    #[test]
    fn apply_all_applies_only_unapplied_changes() {
        let mut state = EditorState::new("abcdefghij");
        EditorController::ingest_changes(
            &mut state,
            vec![insert("c1", 8, "Z"), delete("c2", 2, 4)],
        );

        let outcome = EditorController::apply_all_changes(&mut state);
        assert_eq!(outcome.applied, 2);
        assert_eq!(state.current_text, "abefghZij");

        // Re-running is a no-op: everything is already applied.
        let outcome = EditorController::apply_all_changes(&mut state);
        assert_eq!(outcome.applied, 0);
        assert_eq!(state.current_text, "abefghZij");
    }

    #[test]
    fn apply_all_skips_invalid_changes_and_keeps_them_pending() {
        let mut state = EditorState::new("abcdef");
        EditorController::ingest_changes(
            &mut state,
            vec![replace("c1", 0, 1, "X"), delete("c2", 5, 2)],
        );

        let outcome = EditorController::apply_all_changes(&mut state);
        assert_eq!(outcome.applied, 1);
        assert_eq!(outcome.skipped, 1);
        assert_eq!(state.current_text, "Xbcdef");
        assert!(state.find_change("c1").unwrap().applied);
        assert!(!state.find_change("c2").unwrap().applied);
        assert!(outcome.warnings.iter().any(|w| w.contains("past end index")));
    }

    #[test]
    fn apply_all_of_only_invalid_changes_leaves_the_state_untouched() {
        let mut state = EditorState::new("abcdef");
        EditorController::ingest_changes(&mut state, vec![delete("c1", 5, 2)]);

        let outcome = EditorController::apply_all_changes(&mut state);
        assert_eq!(outcome.applied, 0);
        assert_eq!(outcome.skipped, 1);
        assert_eq!(state.current_text, "abcdef");
        assert!(state.original_text_before_changes.is_none());
        assert!(!state.has_unsaved_changes);
        assert_eq!(state.phase, EditorPhase::PendingChanges);
    }

    #[test]
    fn markup_segments_render_against_the_anchor() {
        let mut state = EditorState::new("abcdef");
        EditorController::ingest_changes(&mut state, vec![replace("c1", 0, 3, "XYZ")]);
        EditorController::apply_change(&mut state, "c1").unwrap();

        let segments = EditorController::markup_segments(&state);
        assert_eq!(SegmentBuilder::reference_text(&segments), "abcdef");
        assert_eq!(SegmentBuilder::modified_text(&segments), state.current_text);
    }

    #[test]
    fn clear_resets_to_idle_but_keeps_text() {
        let mut state = EditorState::new("abcdef");
        EditorController::ingest_changes(&mut state, vec![replace("c1", 0, 3, "XYZ")]);
        EditorController::apply_change(&mut state, "c1").unwrap();

        EditorController::clear_changes(&mut state);
        assert_eq!(state.phase, EditorPhase::Idle);
        assert!(state.pending_changes.is_empty());
        assert!(state.original_text_before_changes.is_none());
        assert!(!state.show_markup);
        assert_eq!(state.current_text, "XYZdef");
    }

    #[test]
    fn toggle_markup_flips_the_flag_without_losing_segments() {
        let mut state = EditorState::new("abcdef");
        EditorController::ingest_changes(&mut state, vec![replace("c1", 0, 3, "XYZ")]);
        EditorController::apply_change(&mut state, "c1").unwrap();

        assert!(state.show_markup);
        EditorController::toggle_markup(&mut state);
        assert!(!state.show_markup);
        // Markup off hides the redline; the segments are still computable.
        assert!(!EditorController::markup_segments(&state).is_empty());
        EditorController::toggle_markup(&mut state);
        assert!(state.show_markup);
    }

    #[test]
    fn mark_saved_clears_the_dirty_flag() {
        let mut state = EditorState::new("abcdef");
        EditorController::ingest_changes(&mut state, vec![replace("c1", 0, 3, "XYZ")]);
        EditorController::apply_change(&mut state, "c1").unwrap();
        assert!(state.has_unsaved_changes);

        EditorController::mark_saved(&mut state);
        assert!(!state.has_unsaved_changes);
    }
}

mod sessions {
    use super::*;

    #[test]
    fn create_and_fetch_session() {
        let manager = SessionManager::new();
        let session_id = manager.create_session("nda.txt", "abcdef", vec![replace("c1", 0, 1, "X")]);

        let session = manager.get_session(&session_id).unwrap();
        assert_eq!(session.document_name, "nda.txt");
        assert_eq!(session.status, SessionStatus::Active);
        assert_eq!(session.state.pending_changes.len(), 1);
        assert_eq!(manager.current_text(&session_id).as_deref(), Some("abcdef"));
    }

    #[test]
    fn apply_change_through_the_session() {
        let manager = SessionManager::new();
        let session_id = manager.create_session("nda.txt", "abcdef", vec![replace("c1", 0, 3, "XYZ")]);

        assert!(manager.apply_change(&session_id, "c1").unwrap());
        assert_eq!(manager.current_text(&session_id).as_deref(), Some("XYZdef"));

        let segments = manager.markup_segments(&session_id).unwrap();
        assert_eq!(SegmentBuilder::reference_text(&segments), "abcdef");
    }

    #[test]
    fn apply_against_missing_session_is_false_not_an_error() {
        let manager = SessionManager::new();
        assert!(!manager.apply_change("no-such-session", "c1").unwrap());
    }

    #[test]
    fn unknown_change_id_is_false_not_an_error() {
        let manager = SessionManager::new();
        let session_id = manager.create_session("nda.txt", "abcdef", vec![]);
        assert!(!manager.apply_change(&session_id, "nope").unwrap());
    }

    #[test]
    fn discard_preview_returns_to_pending() {
        let manager = SessionManager::new();
        let session_id =
            manager.create_session("nda.txt", "abcdef", vec![replace("c1", 0, 3, "XYZ")]);

        let preview = manager.preview_change(&session_id, "c1").unwrap();
        assert_eq!(preview, "XYZdef");
        let session = manager.get_session(&session_id).unwrap();
        assert_eq!(session.state.phase, EditorPhase::Previewing);
        assert!(session.state.find_change("c1").unwrap().preview_mode);

        manager.discard_preview(&session_id, "c1");
        let session = manager.get_session(&session_id).unwrap();
        assert_eq!(session.state.phase, EditorPhase::PendingChanges);
        assert!(!session.state.find_change("c1").unwrap().preview_mode);
        assert!(!session.state.find_change("c1").unwrap().applied);
        assert_eq!(session.state.current_text, "abcdef");
    }

    #[test]
    fn complete_returns_final_text_and_closes() {
        let manager = SessionManager::new();
        let session_id = manager.create_session("nda.txt", "abcdef", vec![replace("c1", 0, 3, "XYZ")]);
        manager.apply_all_changes(&session_id).unwrap();

        let final_text = manager.complete_session(&session_id).unwrap();
        assert_eq!(final_text, "XYZdef");
        assert_eq!(
            manager.get_session(&session_id).unwrap().status,
            SessionStatus::Completed
        );
    }

    #[test]
    fn cancel_marks_the_session_cancelled() {
        let manager = SessionManager::new();
        let session_id = manager.create_session("nda.txt", "abcdef", vec![]);
        manager.cancel_session(&session_id);
        assert_eq!(
            manager.get_session(&session_id).unwrap().status,
            SessionStatus::Cancelled
        );
    }

    #[test]
    fn toggle_markup_reports_the_new_value() {
        let manager = SessionManager::new();
        let session_id = manager.create_session("nda.txt", "abcdef", vec![replace("c1", 0, 1, "X")]);
        assert_eq!(manager.toggle_markup(&session_id), Some(false));
        assert_eq!(manager.toggle_markup(&session_id), Some(true));
        assert_eq!(manager.toggle_markup("no-such-session"), None);
    }
}

mod autosave {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::time::{Duration, Instant};
    use async_trait::async_trait;
    use lexline_cli::errors::{LexlineError, LexlineResult};
    use lexline_cli::services::autosaver::Autosaver;
    use lexline_cli::traits::draft_store::DraftStore;

    struct FlakyStore {
        calls: Arc<AtomicUsize>,
        fail: bool,
    }

    #[async_trait]
    impl DraftStore for FlakyStore {
        async fn save_draft(&self, _draft_id: &str, _text: &str) -> LexlineResult<()> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                Err(LexlineError::NetworkError {
                    operation: "save draft".to_string(),
                    url: None,
                    status_code: Some(503),
                    reason: "service unavailable".to_string(),
                })
            } else {
                Ok(())
            }
        }
    }

    fn dirty_session(manager: &SessionManager) -> String {
        let session_id =
            manager.create_session("nda.txt", "abcdef", vec![replace("c1", 0, 3, "XYZ")]);
        assert!(manager.apply_change(&session_id, "c1").unwrap());
        assert!(manager.get_session(&session_id).unwrap().state.has_unsaved_changes);
        session_id
    }

    #[tokio::test]
    async fn failed_save_keeps_the_unsaved_flag_and_the_debounce_clock() {
        let manager = Arc::new(SessionManager::new());
        let session_id = dirty_session(&manager);

        let calls = Arc::new(AtomicUsize::new(0));
        let store = Arc::new(FlakyStore { calls: Arc::clone(&calls), fail: true });
        let mut autosaver = Autosaver::new(store, Arc::clone(&manager), &session_id, "42", 10);
        let dirty = autosaver.dirty_handle();
        autosaver.start();

        {
            let mut guard = dirty.lock().await;
            *guard = Some(Instant::now());
        }

        tokio::time::sleep(Duration::from_millis(800)).await;
        autosaver.stop().await;

        assert!(calls.load(Ordering::SeqCst) >= 1);
        let session = manager.get_session(&session_id).unwrap();
        assert!(session.state.has_unsaved_changes);
        // The quiet period restarted instead of clearing, so the next pass
        // retries.
        assert!(dirty.lock().await.is_some());
    }

    #[tokio::test]
    async fn successful_save_clears_the_unsaved_flag() {
        let manager = Arc::new(SessionManager::new());
        let session_id = dirty_session(&manager);

        let calls = Arc::new(AtomicUsize::new(0));
        let store = Arc::new(FlakyStore { calls: Arc::clone(&calls), fail: false });
        let mut autosaver = Autosaver::new(store, Arc::clone(&manager), &session_id, "42", 10);
        let dirty = autosaver.dirty_handle();
        autosaver.start();

        {
            let mut guard = dirty.lock().await;
            *guard = Some(Instant::now());
        }

        tokio::time::sleep(Duration::from_millis(800)).await;
        autosaver.stop().await;

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        let session = manager.get_session(&session_id).unwrap();
        assert!(!session.state.has_unsaved_changes);
        assert!(dirty.lock().await.is_none());
    }
}

mod wire_format {
    use super::*;

    #[test]
    fn descriptor_parses_camel_case_json() {
        let json = r#"{
            "id": "c1",
            "kind": "replace",
            "startIndex": 4,
            "endIndex": 9,
            "originalText": "party",
            "newText": "buyer",
            "reasoning": "defined term"
        }"#;
        let change: ChangeDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(change.id, "c1");
        assert_eq!(change.kind, ChangeKind::Replace);
        assert_eq!(change.start_index, 4);
        assert_eq!(change.end_index, 9);
        assert_eq!(change.original_text.as_deref(), Some("party"));
        assert_eq!(change.new_text.as_deref(), Some("buyer"));
    }

    #[test]
    fn missing_id_gets_generated_and_optional_fields_default() {
        let json = r#"{"kind": "insert", "startIndex": 3, "newText": "XYZ"}"#;
        let change: ChangeDescriptor = serde_json::from_str(json).unwrap();
        assert!(!change.id.is_empty());
        assert_eq!(change.end_index, 0);
        assert!(change.original_text.is_none());
        assert!(change.reasoning.is_empty());
        assert_eq!(ChangeApplier::apply("abcdef", &change), "abcXYZdef");
    }

    #[test]
    fn descriptor_serializes_camel_case() {
        let change = replace("c1", 4, 9, "buyer");
        let json = serde_json::to_string(&change).unwrap();
        assert!(json.contains("\"startIndex\":4"));
        assert!(json.contains("\"endIndex\":9"));
        assert!(json.contains("\"newText\":\"buyer\""));
        assert!(json.contains("\"kind\":\"replace\""));
    }

    #[test]
    fn pending_change_flattens_its_descriptor() {
        let mut state = EditorState::new("abcdef");
        EditorController::ingest_changes(&mut state, vec![replace("c1", 0, 1, "X")]);
        let json = serde_json::to_string(&state.pending_changes[0]).unwrap();
        assert!(json.contains("\"startIndex\":0"));
        assert!(json.contains("\"applied\":false"));
    }

    #[test]
    fn char_delta_per_kind() {
        assert_eq!(insert("c1", 3, "XYZ").char_delta(), 3);
        assert_eq!(delete("c1", 1, 4).char_delta(), -3);
        assert_eq!(replace("c1", 1, 4, "XY").char_delta(), -1);
    }
}

mod rendering {
    use super::*;
    use lexline_cli::structs::diff_segment::DiffSegment;

    #[test]
    fn html_rendering_escapes_segment_text() {
        let segments = vec![
            DiffSegment::unchanged("a < b & "),
            DiffSegment::addition("<script>alert(1)</script>"),
            DiffSegment::deletion("\"old\""),
        ];
        let html = MarkupRenderer::render_html(&segments);
        assert!(!html.contains("<script>"));
        assert!(html.contains("a &lt; b &amp; "));
        assert!(html.contains("<ins class=\"added\">&lt;script&gt;"));
        assert!(html.contains("<del class=\"removed\">&quot;old&quot;"));
    }

    #[test]
    fn html_rendering_turns_newlines_into_breaks() {
        let html = MarkupRenderer::render_html(&[DiffSegment::unchanged("one\ntwo")]);
        assert_eq!(html, "one<br>two");
    }

    #[test]
    fn inline_ansi_marks_additions_and_deletions() {
        let segments = vec![
            DiffSegment::unchanged("keep "),
            DiffSegment::deletion("old"),
            DiffSegment::addition("new"),
        ];
        let out = MarkupRenderer::render_inline_ansi(&segments);
        assert!(out.starts_with("keep "));
        assert!(out.contains("\x1b[32mnew\x1b[0m"));
        assert!(out.contains("\x1b[31m\x1b[9mold\x1b[0m"));
    }

    #[test]
    fn legend_counts_marked_segments() {
        let segments = vec![
            DiffSegment::unchanged("a"),
            DiffSegment::addition("b"),
            DiffSegment::addition("c"),
            DiffSegment::deletion("d"),
        ];
        let legend = MarkupRenderer::render_legend(&segments);
        assert!(legend.contains("+2 additions"));
        assert!(legend.contains("-1 deletions"));
    }
}

mod context {
    use super::*;

    #[test]
    fn short_drafts_pass_through_untouched() {
        assert_eq!(build_context_text("short draft", 100), "short draft");
    }

    #[test]
    fn long_drafts_truncate_on_a_character_boundary() {
        let draft = "é".repeat(50);
        let context = build_context_text(&draft, 10);
        assert!(context.starts_with(&"é".repeat(10)));
        assert!(context.ends_with("[... draft truncated ...]"));
    }
}

mod commands {
    use super::*;
    use lexline_cli::enums::commands::Commands;
    use lexline_cli::workers::command_runner::CommandRunner;

    #[tokio::test]
    async fn apply_command_writes_the_modified_draft() {
        let dir = tempfile::tempdir().unwrap();
        let draft_path = dir.path().join("draft.txt");
        let changes_path = dir.path().join("changes.json");
        let output_path = dir.path().join("out.txt");

        std::fs::write(&draft_path, "Party shall pay.").unwrap();
        std::fs::write(
            &changes_path,
            r#"[{"kind": "replace", "startIndex": 0, "endIndex": 5, "newText": "Buyer"}]"#,
        )
        .unwrap();

        let mut runner = CommandRunner::new();
        runner
            .run_command(Commands::Apply {
                draft: draft_path.clone(),
                changes: changes_path,
                output: Some(output_path.clone()),
            })
            .await
            .unwrap();

        assert_eq!(std::fs::read_to_string(&output_path).unwrap(), "Buyer shall pay.");
        // The source draft is untouched when an output path is given.
        assert_eq!(std::fs::read_to_string(&draft_path).unwrap(), "Party shall pay.");
    }

    #[tokio::test]
    async fn validate_command_rejects_inverted_ranges() {
        let dir = tempfile::tempdir().unwrap();
        let draft_path = dir.path().join("draft.txt");
        let changes_path = dir.path().join("changes.json");

        std::fs::write(&draft_path, "abcdef").unwrap();
        std::fs::write(
            &changes_path,
            r#"[{"kind": "delete", "startIndex": 5, "endIndex": 2}]"#,
        )
        .unwrap();

        let mut runner = CommandRunner::new();
        let result = runner
            .run_command(Commands::Validate { draft: draft_path, changes: changes_path })
            .await;
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn validate_command_accepts_clean_changes() {
        let dir = tempfile::tempdir().unwrap();
        let draft_path = dir.path().join("draft.txt");
        let changes_path = dir.path().join("changes.json");

        std::fs::write(&draft_path, "abcdef").unwrap();
        std::fs::write(
            &changes_path,
            r#"[{"kind": "delete", "startIndex": 1, "endIndex": 3, "originalText": "bc"}]"#,
        )
        .unwrap();

        let mut runner = CommandRunner::new();
        runner
            .run_command(Commands::Validate { draft: draft_path, changes: changes_path })
            .await
            .unwrap();
    }
}

mod properties {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        #[test]
        fn noop_replace_is_identity(base in "[a-zA-Z ]{0,60}", a in 0usize..=60, b in 0usize..=60) {
            let len = base.chars().count();
            let start = a.min(len);
            let end = b.clamp(start, len);
            let original = ChangeApplier::substring(&base, start, end);
            let change = replace("c1", start, end, &original);
            prop_assert_eq!(ChangeApplier::apply(&base, &change), base);
        }

        #[test]
        fn insert_then_delete_round_trips(base in "[a-z ]{0,40}", text in "[A-Z]{1,10}", at in 0usize..=40) {
            let at = at.min(base.chars().count());
            let inserted = ChangeApplier::apply(&base, &insert("c1", at, &text));
            let restored = ChangeApplier::apply(
                &inserted,
                &delete("c2", at, at + text.chars().count()),
            );
            prop_assert_eq!(restored, base);
        }

        #[test]
        fn word_diff_round_trips(a in "[a-z ]{0,60}", b in "[a-z ]{0,60}") {
            let segments = create_word_diff(&a, &b);
            prop_assert_eq!(SegmentBuilder::modified_text(&segments), b);
            prop_assert_eq!(SegmentBuilder::reference_text(&segments), a);
        }

        #[test]
        fn segment_reconstruction_matches_batch_apply(
            base in "[a-z ]{8,60}",
            cuts in proptest::collection::vec(0usize..=100, 4),
            replacement in "[A-Z]{0,8}",
        ) {
            let len = base.chars().count();
            let mut cuts: Vec<usize> = cuts.iter().map(|c| c * len / 100).collect();
            cuts.sort_unstable();
            prop_assume!(cuts[0] < cuts[1] && cuts[1] < cuts[2] && cuts[2] < cuts[3]);

            let changes = vec![
                replace("c1", cuts[0], cuts[1], &replacement),
                delete("c2", cuts[2], cuts[3]),
            ];
            let segments = SegmentBuilder::build_segments(&base, &changes);
            prop_assert_eq!(
                SegmentBuilder::modified_text(&segments),
                ChangeApplier::apply_all(&base, &changes)
            );
            prop_assert_eq!(SegmentBuilder::reference_text(&segments), base);
        }

        #[test]
        fn clamped_offsets_never_panic(
            base in "[a-zé ]{0,30}",
            start in 0usize..=100,
            end in 0usize..=100,
            text in "[a-z]{0,6}",
        ) {
            let change = replace("c1", start, end, &text);
            let _ = ChangeApplier::apply(&base, &change);
            let _ = ChangeApplier::validate(&base, &change);
            let _ = SegmentBuilder::build_segments(&base, &[change]);
        }
    }
}
