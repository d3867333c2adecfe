//! Report derivation: status summaries and the structured meta payload.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::catalog::Issue;
use crate::types::Timestamp;

/// Maximum number of note characters used when the summary falls back to
/// the free-text note.
const NOTE_SUMMARY_CHARS: usize = 100;

/// Placeholder summary when a report somehow carries neither issues nor a
/// note. Submission validation rejects that case up front; this is the
/// last line of defense for the stored column.
const EMPTY_SUMMARY: &str = "Bildirim";

/// Structured payload persisted alongside every feedback row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMeta {
    pub issues: Vec<Issue>,
    pub note: String,
    pub reported_at: Timestamp,
}

/// Derive the human-readable status summary for a report.
///
/// Comma-joined issue labels in submitted order; otherwise the first 100
/// characters of the note; otherwise the literal placeholder.
pub fn status_summary(issues: &[Issue], note: &str) -> String {
    if !issues.is_empty() {
        return issues
            .iter()
            .map(|i| i.label.as_str())
            .collect::<Vec<_>>()
            .join(", ");
    }
    if !note.is_empty() {
        return note.chars().take(NOTE_SUMMARY_CHARS).collect();
    }
    EMPTY_SUMMARY.to_string()
}

/// Parse a stored meta document leniently.
///
/// A row whose payload no longer parses (hand-edited database, legacy
/// variant) degrades to `{ "raw": <stored text> }` instead of failing the
/// listing that contains it.
pub fn parse_meta(raw: Option<&str>) -> Value {
    match raw {
        None => Value::Object(Default::default()),
        Some(text) => serde_json::from_str(text)
            .unwrap_or_else(|_| serde_json::json!({ "raw": text })),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn issue(id: &str, label: &str) -> Issue {
        Issue {
            id: id.to_string(),
            label: label.to_string(),
        }
    }

    #[test]
    fn summary_joins_labels_in_submitted_order() {
        let issues = vec![
            issue("dirty", "Tuvalet genel temizliği gerekli"),
            issue("soap_out", "Sıvı sabun tükenmiş"),
        ];
        assert_eq!(
            status_summary(&issues, ""),
            "Tuvalet genel temizliği gerekli, Sıvı sabun tükenmiş"
        );
    }

    #[test]
    fn summary_prefers_issues_over_note() {
        let issues = vec![issue("dirty", "Genel temizlik gerekli")];
        assert_eq!(status_summary(&issues, "musluk damlatıyor"), "Genel temizlik gerekli");
    }

    #[test]
    fn summary_truncates_note_to_100_chars() {
        // Multibyte Turkish characters must count as characters, not bytes.
        let note = "ç".repeat(150);
        let summary = status_summary(&[], &note);
        assert_eq!(summary.chars().count(), 100);
        assert_eq!(summary, "ç".repeat(100));
    }

    #[test]
    fn summary_falls_back_to_placeholder() {
        assert_eq!(status_summary(&[], ""), "Bildirim");
    }

    #[test]
    fn meta_round_trips_through_json() {
        let meta = ReportMeta {
            issues: vec![issue("paper_out", "Tuvalet kağıdı bitmiş")],
            note: "acil".to_string(),
            reported_at: Utc::now(),
        };
        let text = serde_json::to_string(&meta).unwrap();
        let parsed = parse_meta(Some(&text));
        assert_eq!(parsed["note"], "acil");
        assert_eq!(parsed["issues"][0]["id"], "paper_out");
    }

    #[test]
    fn malformed_meta_degrades_to_raw_field() {
        let parsed = parse_meta(Some("not json {"));
        assert_eq!(parsed["raw"], "not json {");
    }

    #[test]
    fn missing_meta_is_empty_object() {
        assert_eq!(parse_meta(None), serde_json::json!({}));
    }
}
