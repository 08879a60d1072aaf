use crate::structs::diff_segment::DiffSegment;

/// Greedy line-position-synchronized redline between two draft snapshots.
///
/// This is intentionally not a minimal-edit-distance diff: both texts are
/// walked in lockstep and differing line pairs are emitted as a
/// deletion/addition pair. A single inserted line therefore shifts every
/// later pair into "changed" rather than being recognized as a pure
/// insertion. The trade is determinism and speed, which is acceptable for
/// short legal-opinion sections. Use [`crate::services::word_diff`] when a
/// tighter diff matters.
///
/// Blank lines in differing pairs are dropped rather than tagged, to keep
/// visual noise out of the redline.
pub fn create_line_diff(original_text: &str, modified_text: &str) -> Vec<DiffSegment> {
    let original_lines: Vec<&str> = original_text.lines().collect();
    let modified_lines: Vec<&str> = modified_text.lines().collect();

    let mut segments = Vec::new();
    let mut i = 0;
    let mut j = 0;

    while i < original_lines.len() || j < modified_lines.len() {
        if i < original_lines.len() && j < modified_lines.len() {
            if original_lines[i] == modified_lines[j] {
                segments.push(DiffSegment::unchanged(original_lines[i]));
            } else {
                if !original_lines[i].trim().is_empty() {
                    segments.push(DiffSegment::deletion(original_lines[i]));
                }
                if !modified_lines[j].trim().is_empty() {
                    segments.push(DiffSegment::addition(modified_lines[j]));
                }
            }
            i += 1;
            j += 1;
        } else if j < modified_lines.len() {
            segments.push(DiffSegment::addition(modified_lines[j]));
            j += 1;
        } else {
            segments.push(DiffSegment::deletion(original_lines[i]));
            i += 1;
        }
    }

    segments
}
