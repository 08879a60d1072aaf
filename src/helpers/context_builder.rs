/// Build the context excerpt the assistant sees alongside a chat message.
///
/// The full draft is sent when it fits; otherwise the head of the draft is
/// truncated at a character boundary with an ellipsis marker, so offsets in
/// suggestions always refer to text the assistant actually saw.
pub fn build_context_text(draft_text: &str, max_chars: usize) -> String {
    let char_count = draft_text.chars().count();
    if char_count <= max_chars {
        return draft_text.to_string();
    }

    let truncated: String = draft_text.chars().take(max_chars).collect();
    log::warn!(
        "⚠️ Draft context truncated from {} to {} characters",
        char_count,
        max_chars
    );
    format!("{}\n[... draft truncated ...]", truncated)
}
