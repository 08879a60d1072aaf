use crate::enums::change_kind::ChangeKind;
use crate::services::change_applier::ChangeApplier;
use crate::structs::change_descriptor::ChangeDescriptor;
use crate::structs::diff_segment::DiffSegment;

/// Offset-anchored redline built directly from a change list.
///
/// Preferred over the line and word generators whenever the structured
/// descriptors are available, since every segment carries exact edit
/// provenance through its `change_id`. The walk is over the reference text
/// the descriptors were computed against, not the post-apply text.
pub struct SegmentBuilder;

impl SegmentBuilder {
    /// Build the segment sequence for `applied_changes` against
    /// `reference_text`.
    ///
    /// Changes are walked ascending by `start_index`. Gaps between changes
    /// become unchanged segments; a delete emits one deletion; an insert
    /// emits one addition without consuming reference text; a replace emits
    /// a deletion then an addition. For delete/replace the deleted span is
    /// read from the reference text itself, so a stale `original_text` claim
    /// can never smuggle wrong content into the redline.
    pub fn build_segments(
        reference_text: &str,
        applied_changes: &[ChangeDescriptor],
    ) -> Vec<DiffSegment> {
        let chars: Vec<char> = reference_text.chars().collect();

        let mut sorted: Vec<&ChangeDescriptor> = applied_changes.iter().collect();
        sorted.sort_by_key(|c| c.start_index);

        let mut segments = Vec::new();
        let mut last_index = 0usize;

        for change in sorted {
            let start = change.start_index.min(chars.len());
            let end = change.end_index.clamp(start, chars.len());

            // Changes behind the cursor overlap an earlier one; skip rather
            // than emit reference text twice.
            if start < last_index {
                log::warn!(
                    "⚠️ Change {} overlaps an earlier change and is not rendered",
                    change.id
                );
                continue;
            }

            if start > last_index {
                let gap: String = chars[last_index..start].iter().collect();
                segments.push(DiffSegment::unchanged(&gap));
            }

            match change.kind {
                ChangeKind::Delete => {
                    let removed: String = chars[start..end].iter().collect();
                    Self::warn_on_mismatch(change, &removed);
                    segments.push(DiffSegment::deletion(&removed).with_change_id(&change.id));
                    last_index = end;
                }
                ChangeKind::Insert => {
                    segments.push(
                        DiffSegment::addition(change.new_text()).with_change_id(&change.id),
                    );
                    last_index = start;
                }
                ChangeKind::Replace | ChangeKind::Restructure => {
                    let removed: String = chars[start..end].iter().collect();
                    Self::warn_on_mismatch(change, &removed);
                    segments.push(DiffSegment::deletion(&removed).with_change_id(&change.id));
                    segments.push(
                        DiffSegment::addition(change.new_text()).with_change_id(&change.id),
                    );
                    last_index = end;
                }
            }
        }

        if last_index < chars.len() {
            let tail: String = chars[last_index..].iter().collect();
            segments.push(DiffSegment::unchanged(&tail));
        }

        segments
    }

    fn warn_on_mismatch(change: &ChangeDescriptor, actual: &str) {
        if let Some(claimed) = &change.original_text {
            if claimed != actual {
                log::warn!(
                    "⚠️ Change {} claims original text '{}' but the draft has '{}' - rendering the draft text",
                    change.id,
                    claimed,
                    actual
                );
            }
        }
    }

    /// Reconstruct the post-apply text from a segment sequence by skipping
    /// deletions.
    pub fn modified_text(segments: &[DiffSegment]) -> String {
        segments
            .iter()
            .filter(|s| s.kind != crate::enums::segment_kind::SegmentKind::Deletion)
            .map(|s| s.text.as_str())
            .collect()
    }

    /// Reconstruct the reference text from a segment sequence by skipping
    /// additions.
    pub fn reference_text(segments: &[DiffSegment]) -> String {
        segments
            .iter()
            .filter(|s| s.kind != crate::enums::segment_kind::SegmentKind::Addition)
            .map(|s| s.text.as_str())
            .collect()
    }

    /// Convenience used by validation flows: the actual substring a change
    /// is anchored to.
    pub fn anchored_text(reference_text: &str, change: &ChangeDescriptor) -> String {
        ChangeApplier::substring(reference_text, change.start_index, change.end_index)
    }
}
