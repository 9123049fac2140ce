//! CLI output formatting for all commands.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure — no I/O, no side effects.
//!
//! # Output Format
//!
//! ## Preview
//!
//! ```text
//! Previews
//! 001 001-shoe.jpg → previews/001-shoe-preview.jpg
//! 002 broken.jpg
//!     Error: decode failed: ...
//! Wrote 1 preview, 1 skipped
//! ```
//!
//! ## Generate
//!
//! ```text
//! Generated
//! 001 001-shoe.jpg → out/ai_generated_ab12.png
//! 002 002-bag.jpg
//!     Error: server returned 502: model unavailable
//! Saved 1 image, 1 failed
//! ```
//!
//! ## History / chat log
//!
//! ```text
//! 001 2026-01-01 12:00:00  creative/banner
//!     Prompt: red sneakers on a beach
//! ```

use crate::client::{ChatMessage, GenerationRecord};
use crate::process::BatchReport;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// One remote call outcome: a display label for the item, and either a
/// success detail (where the artifact went) or an error message.
#[derive(Debug, Clone)]
pub struct RemoteOutcome {
    pub label: String,
    pub detail: Result<String, String>,
}

/// Pluralize a count: `1 preview`, `3 previews`.
fn count_noun(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("{} {}", n, noun)
    } else {
        format!("{} {}s", n, noun)
    }
}

fn file_label(path: &std::path::Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}

// ============================================================================
// Preview
// ============================================================================

pub fn format_preview_report(report: &BatchReport) -> Vec<String> {
    let mut lines = vec!["Previews".to_string()];

    for (i, item) in report.items.iter().enumerate() {
        let label = file_label(&item.source);
        match &item.outcome {
            Ok(output) => {
                lines.push(format!("{} {} → {}", format_index(i + 1), label, output.display()));
            }
            Err(e) => {
                lines.push(format!("{} {}", format_index(i + 1), label));
                lines.push(format!("    Error: {}", e));
            }
        }
    }

    let mut summary = format!("Wrote {}", count_noun(report.succeeded(), "preview"));
    if report.failed() > 0 {
        summary.push_str(&format!(", {} skipped", report.failed()));
    }
    lines.push(summary);
    lines
}

pub fn print_preview_report(report: &BatchReport) {
    for line in format_preview_report(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Generate (remote calls)
// ============================================================================

pub fn format_generate_report(outcomes: &[RemoteOutcome]) -> Vec<String> {
    let mut lines = vec!["Generated".to_string()];
    let mut saved = 0;

    for (i, outcome) in outcomes.iter().enumerate() {
        match &outcome.detail {
            Ok(detail) => {
                saved += 1;
                lines.push(format!("{} {} → {}", format_index(i + 1), outcome.label, detail));
            }
            Err(e) => {
                lines.push(format!("{} {}", format_index(i + 1), outcome.label));
                lines.push(format!("    Error: {}", e));
            }
        }
    }

    let failed = outcomes.len() - saved;
    let mut summary = format!("Saved {}", count_noun(saved, "image"));
    if failed > 0 {
        summary.push_str(&format!(", {} failed", failed));
    }
    lines.push(summary);
    lines
}

pub fn print_generate_report(outcomes: &[RemoteOutcome]) {
    for line in format_generate_report(outcomes) {
        println!("{}", line);
    }
}

// ============================================================================
// History
// ============================================================================

pub fn format_records(records: &[GenerationRecord]) -> Vec<String> {
    if records.is_empty() {
        return vec!["No generation records".to_string()];
    }

    let mut lines = Vec::new();
    for (i, record) in records.iter().enumerate() {
        let when = record.created_at.as_deref().unwrap_or("unknown time");
        let model = record.model.as_deref().unwrap_or("-");
        let style = record.style.as_deref().unwrap_or("-");
        lines.push(format!(
            "{} {}  {}/{}",
            format_index(i + 1),
            when,
            model,
            style
        ));
        if let Some(prompt) = record.prompt.as_deref().filter(|p| !p.is_empty()) {
            lines.push(format!("    Prompt: {}", prompt));
        }
    }
    lines.push(count_noun(records.len(), "record"));
    lines
}

pub fn print_records(records: &[GenerationRecord]) {
    for line in format_records(records) {
        println!("{}", line);
    }
}

// ============================================================================
// Chat log
// ============================================================================

pub fn format_chat_log(messages: &[ChatMessage]) -> Vec<String> {
    if messages.is_empty() {
        return vec!["No chat messages".to_string()];
    }

    let mut lines = Vec::new();
    for message in messages {
        let when = message.timestamp.as_deref().unwrap_or("");
        lines.push(format!(
            "[{}] {}: {}",
            when, message.message_type, message.content
        ));
    }
    lines
}

pub fn print_chat_log(messages: &[ChatMessage]) {
    for line in format_chat_log(messages) {
        println!("{}", line);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::BackendError;
    use crate::process::ItemReport;
    use std::path::PathBuf;

    #[test]
    fn preview_report_lists_outputs_in_order() {
        let report = BatchReport {
            items: vec![
                ItemReport {
                    source: PathBuf::from("/in/001-shoe.jpg"),
                    outcome: Ok(PathBuf::from("previews/001-shoe-preview.jpg")),
                },
                ItemReport {
                    source: PathBuf::from("/in/002-bag.jpg"),
                    outcome: Ok(PathBuf::from("previews/002-bag-preview.jpg")),
                },
            ],
        };

        let lines = format_preview_report(&report);
        assert_eq!(lines[0], "Previews");
        assert_eq!(lines[1], "001 001-shoe.jpg → previews/001-shoe-preview.jpg");
        assert_eq!(lines[2], "002 002-bag.jpg → previews/002-bag-preview.jpg");
        assert_eq!(lines[3], "Wrote 2 previews");
    }

    #[test]
    fn preview_report_shows_per_item_errors_and_summary() {
        let report = BatchReport {
            items: vec![
                ItemReport {
                    source: PathBuf::from("good.jpg"),
                    outcome: Ok(PathBuf::from("good-preview.jpg")),
                },
                ItemReport {
                    source: PathBuf::from("bad.jpg"),
                    outcome: Err(BackendError::Decode("bad.jpg: truncated".to_string())),
                },
            ],
        };

        let lines = format_preview_report(&report);
        assert_eq!(lines[2], "002 bad.jpg");
        assert_eq!(lines[3], "    Error: decode failed: bad.jpg: truncated");
        assert_eq!(lines[4], "Wrote 1 preview, 1 skipped");
    }

    #[test]
    fn generate_report_counts_saved_and_failed() {
        let outcomes = vec![
            RemoteOutcome {
                label: "001-shoe.jpg".to_string(),
                detail: Ok("out/gen.png".to_string()),
            },
            RemoteOutcome {
                label: "002-bag.jpg".to_string(),
                detail: Err("server returned 502: model unavailable".to_string()),
            },
        ];

        let lines = format_generate_report(&outcomes);
        assert_eq!(lines[0], "Generated");
        assert_eq!(lines[1], "001 001-shoe.jpg → out/gen.png");
        assert_eq!(lines[2], "002 002-bag.jpg");
        assert_eq!(lines[3], "    Error: server returned 502: model unavailable");
        assert_eq!(lines[4], "Saved 1 image, 1 failed");
    }

    #[test]
    fn records_format_with_prompt_lines() {
        let records = vec![GenerationRecord {
            id: 1,
            image_url: "u".to_string(),
            prompt: Some("red sneakers".to_string()),
            model: Some("creative".to_string()),
            style: Some("banner".to_string()),
            created_at: Some("2026-01-01 12:00:00".to_string()),
        }];

        let lines = format_records(&records);
        assert_eq!(lines[0], "001 2026-01-01 12:00:00  creative/banner");
        assert_eq!(lines[1], "    Prompt: red sneakers");
        assert_eq!(lines[2], "1 record");
    }

    #[test]
    fn empty_records_and_chat_get_placeholders() {
        assert_eq!(format_records(&[]), vec!["No generation records"]);
        assert_eq!(format_chat_log(&[]), vec!["No chat messages"]);
    }

    #[test]
    fn chat_log_lines_show_sender_and_content() {
        let messages = vec![ChatMessage {
            session_id: Some("s".to_string()),
            message_type: "user".to_string(),
            content: "make it pop".to_string(),
            timestamp: Some("2026-01-01 12:00:00".to_string()),
        }];

        let lines = format_chat_log(&messages);
        assert_eq!(lines[0], "[2026-01-01 12:00:00] user: make it pop");
    }
}
