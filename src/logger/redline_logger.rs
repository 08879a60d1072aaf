use crate::enums::change_kind::ChangeKind;
use crate::services::change_applier::ChangeApplier;
use crate::structs::assistant_reply::AssistantReply;
use crate::structs::change_descriptor::ChangeDescriptor;

/// User-facing reports for suggested changes, in terminal redline style.
pub struct RedlineLogger;

impl RedlineLogger {

    pub fn print_reply_report(reply: &AssistantReply) {
        println!("\n📋 ASSISTANT REVIEW");
        println!("===================");
        if !reply.summary.trim().is_empty() {
            println!("{}\n", reply.summary.trim());
        }
        if let Some(confidence) = reply.confidence {
            println!("🎯 Confidence: {:.0}%", confidence * 100.0);
        }
        println!("✏️ {} suggested changes", reply.suggestions.len());
    }

    pub fn print_change_report(draft_text: &str, change: &ChangeDescriptor) {
        println!("\n  ✏️ Change {} [{}]", change.id, change.kind.label());
        if !change.reasoning.trim().is_empty() {
            println!("     ❔ {}", change.reasoning);
        }

        let anchored = ChangeApplier::substring(draft_text, change.start_index, change.end_index);

        match change.kind {
            ChangeKind::Insert => {
                println!("\n@@ Insert at offset {} @@", change.start_index);
                println!("\x1b[32m+ {}\x1b[0m", Self::preview(change.new_text()));
            }
            ChangeKind::Delete => {
                println!("\n@@ Delete [{}, {}) @@", change.start_index, change.end_index);
                println!("\x1b[31m- {}\x1b[0m", Self::preview(&anchored));
            }
            ChangeKind::Replace | ChangeKind::Restructure => {
                println!("\n@@ Replace [{}, {}) @@", change.start_index, change.end_index);
                println!("\x1b[31m- {}\x1b[0m", Self::preview(&anchored));
                println!("\x1b[32m+ {}\x1b[0m", Self::preview(change.new_text()));
            }
        }
    }

    fn preview(text: &str) -> String {
        const MAX_PREVIEW_CHARS: usize = 120;
        let flattened = text.replace('\n', "⏎");
        if flattened.chars().count() <= MAX_PREVIEW_CHARS {
            flattened
        } else {
            let head: String = flattened.chars().take(MAX_PREVIEW_CHARS).collect();
            format!("{}…", head)
        }
    }
}
