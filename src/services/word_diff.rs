use similar::{ChangeTag, TextDiff};
use crate::structs::diff_segment::DiffSegment;

/// Word-level redline between two whole-document snapshots.
///
/// Used for the full-document "show changes" view when no structured change
/// list exists, e.g. comparing an original draft against a wholesale
/// rewrite. Each diff token maps to exactly one segment, so concatenating
/// non-deletion segments reproduces the modified text and non-addition
/// segments the original.
pub fn create_word_diff(original_text: &str, modified_text: &str) -> Vec<DiffSegment> {
    let diff = TextDiff::from_words(original_text, modified_text);
    let mut segments = Vec::new();

    for change in diff.iter_all_changes() {
        let value = change.value();
        match change.tag() {
            ChangeTag::Delete => segments.push(DiffSegment::deletion(value)),
            ChangeTag::Insert => segments.push(DiffSegment::addition(value)),
            ChangeTag::Equal => segments.push(DiffSegment::unchanged(value)),
        }
    }

    segments
}
