use terminal_size::{terminal_size, Width};
use crate::config::constants::FALLBACK_TERMINAL_WIDTH;
use crate::enums::segment_kind::SegmentKind;
use crate::structs::diff_segment::DiffSegment;

/// Presentation layer for redline segments.
///
/// The generators only ever hand over classified text spans; all styling
/// decisions (ANSI colors for the terminal, escaped `ins`/`del` markup for
/// the review page) live here and are swappable without touching the
/// engine.
pub struct MarkupRenderer;

impl MarkupRenderer {

    /// Inline terminal rendering for offset-anchored and word segments:
    /// additions green, deletions red with strikethrough.
    pub fn render_inline_ansi(segments: &[DiffSegment]) -> String {
        let mut out = String::new();
        for segment in segments {
            match segment.kind {
                SegmentKind::Unchanged => out.push_str(&segment.text),
                SegmentKind::Addition => {
                    out.push_str("\x1b[32m");
                    out.push_str(&segment.text);
                    out.push_str("\x1b[0m");
                }
                SegmentKind::Deletion => {
                    out.push_str("\x1b[31m\x1b[9m");
                    out.push_str(&segment.text);
                    out.push_str("\x1b[0m");
                }
            }
        }
        out
    }

    /// Line-oriented terminal rendering for line-diff segments, one segment
    /// per line with a gutter marker.
    pub fn render_lines_ansi(segments: &[DiffSegment]) -> String {
        let mut out = String::new();
        for segment in segments {
            match segment.kind {
                SegmentKind::Unchanged => {
                    out.push_str(&format!("  {}\n", segment.text));
                }
                SegmentKind::Addition => {
                    out.push_str(&format!("\x1b[32m+ {}\x1b[0m\n", segment.text));
                }
                SegmentKind::Deletion => {
                    out.push_str(&format!("\x1b[31m- {}\x1b[0m\n", segment.text));
                }
            }
        }
        out
    }

    /// Addition/deletion tally shown under every redline.
    pub fn render_legend(segments: &[DiffSegment]) -> String {
        let additions = segments.iter().filter(|s| s.kind == SegmentKind::Addition).count();
        let deletions = segments.iter().filter(|s| s.kind == SegmentKind::Deletion).count();
        format!(
            "\x1b[32m+{} additions\x1b[0m  \x1b[31m-{} deletions\x1b[0m",
            additions, deletions
        )
    }

    /// HTML rendering for the review page. Segment text is escaped before it
    /// touches the markup, so diff content can never inject live HTML.
    pub fn render_html(segments: &[DiffSegment]) -> String {
        let mut out = String::new();
        for segment in segments {
            let escaped = Self::escape_html(&segment.text);
            let escaped = escaped.replace('\n', "<br>");
            match segment.kind {
                SegmentKind::Unchanged => out.push_str(&escaped),
                SegmentKind::Addition => {
                    out.push_str("<ins class=\"added\">");
                    out.push_str(&escaped);
                    out.push_str("</ins>");
                }
                SegmentKind::Deletion => {
                    out.push_str("<del class=\"removed\">");
                    out.push_str(&escaped);
                    out.push_str("</del>");
                }
            }
        }
        out
    }

    pub fn escape_html(text: &str) -> String {
        text.replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
            .replace('\'', "&#39;")
    }

    /// Horizontal rule sized to the terminal.
    pub fn rule() -> String {
        let width = terminal_size()
            .map(|(Width(w), _)| w as usize)
            .unwrap_or(FALLBACK_TERMINAL_WIDTH);
        "━".repeat(width.min(FALLBACK_TERMINAL_WIDTH))
    }
}
