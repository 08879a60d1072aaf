use crate::enums::change_kind::ChangeKind;
use crate::structs::change_descriptor::ChangeDescriptor;
use crate::structs::validation_report::ValidationReport;

/// Pure offset-based splicing of [`ChangeDescriptor`]s into draft text.
///
/// Offsets are character offsets, not byte offsets, so splices land on
/// character boundaries no matter what the draft contains. Out-of-range
/// offsets are clamped into `[0, len]` instead of corrupting the text.
pub struct ChangeApplier;

impl ChangeApplier {
    /// Apply a single change to `text`, returning the new text.
    ///
    /// `replace` (and `restructure`, which has no distinct applier
    /// semantics) splices `new_text` over `[start, end)`; `insert` splices
    /// at `start` and ignores `end_index`; `delete` removes `[start, end)`.
    pub fn apply(text: &str, change: &ChangeDescriptor) -> String {
        let chars: Vec<char> = text.chars().collect();
        let (start, end) = Self::clamp_range(change.start_index, change.end_index, chars.len());

        let mut result = String::with_capacity(text.len() + change.new_text().len());
        result.extend(&chars[..start]);

        match change.kind {
            ChangeKind::Insert => {
                result.push_str(change.new_text());
                result.extend(&chars[start..]);
            }
            ChangeKind::Delete => {
                result.extend(&chars[end..]);
            }
            ChangeKind::Replace | ChangeKind::Restructure => {
                result.push_str(change.new_text());
                result.extend(&chars[end..]);
            }
        }

        result
    }

    /// Apply a batch of changes against the same base text.
    ///
    /// Changes are sorted by `start_index` descending and spliced highest
    /// offset first, so lower-offset anchors stay valid throughout the pass.
    /// Overlapping descriptors resolve last-applied-wins in that order; this
    /// mirrors how the suggestions were produced and is deliberate.
    pub fn apply_all(text: &str, changes: &[ChangeDescriptor]) -> String {
        let mut sorted: Vec<&ChangeDescriptor> = changes.iter().collect();
        sorted.sort_by(|a, b| b.start_index.cmp(&a.start_index));

        let mut result = text.to_string();
        for change in sorted {
            result = Self::apply(&result, change);
        }
        result
    }

    /// Check one change against the live text without applying it.
    ///
    /// Out-of-range offsets and `original_text` mismatches are warnings, not
    /// errors: the applier clamps the former and the renderers trust the
    /// actual substring over the descriptor's claim for the latter.
    pub fn validate(text: &str, change: &ChangeDescriptor) -> ValidationReport {
        let mut report = ValidationReport { is_valid: true, ..Default::default() };
        let char_count = text.chars().count();

        if change.kind == ChangeKind::Insert {
            // end_index is ignored for inserts and often omitted on the wire.
            if change.start_index > char_count {
                report.warnings.push(format!(
                    "Change {}: insert offset {} exceeds draft length {} and will be clamped",
                    change.id, change.start_index, char_count
                ));
            }
            return report;
        }

        if change.start_index > change.end_index {
            report.is_valid = false;
            report.errors.push(format!(
                "Change {}: start index {} is past end index {}",
                change.id, change.start_index, change.end_index
            ));
            return report;
        }

        if change.end_index > char_count {
            report.warnings.push(format!(
                "Change {}: range [{}, {}) exceeds draft length {} and will be clamped",
                change.id, change.start_index, change.end_index, char_count
            ));
        }

        if matches!(change.kind, ChangeKind::Replace | ChangeKind::Restructure | ChangeKind::Delete) {
            if let Some(claimed) = &change.original_text {
                let actual = Self::substring(text, change.start_index, change.end_index);
                if claimed != &actual {
                    report.warnings.push(format!(
                        "Change {}: draft text at [{}, {}) is '{}', not '{}' - the actual text will be used",
                        change.id, change.start_index, change.end_index, actual, claimed
                    ));
                }
            }
        }

        report
    }

    /// Character-offset substring with the same clamping as the applier.
    pub fn substring(text: &str, start: usize, end: usize) -> String {
        let chars: Vec<char> = text.chars().collect();
        let (start, end) = Self::clamp_range(start, end, chars.len());
        chars[start..end].iter().collect()
    }

    fn clamp_range(start: usize, end: usize, len: usize) -> (usize, usize) {
        let start = start.min(len);
        let end = end.clamp(start, len);
        (start, end)
    }
}
