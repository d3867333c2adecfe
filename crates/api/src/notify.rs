//! Best-effort outward notification on new feedback.
//!
//! Delivery goes to a Telegram chat via the Bot API. The sink is
//! fire-and-forget by contract: it runs on a detached task after the
//! submission has committed, attempts delivery exactly once, and degrades
//! every failure to a log line. A notification outage can never fail a
//! submission.

use serde_json::json;

use crate::config::TelegramConfig;

/// Outward notification channel. Built once at startup and shared through
/// application state.
pub struct Notifier {
    http: reqwest::Client,
    telegram: Option<TelegramConfig>,
}

impl Notifier {
    pub fn new(telegram: Option<TelegramConfig>) -> Self {
        if telegram.is_none() {
            tracing::info!("Telegram credentials not configured, notifications disabled");
        }
        Self {
            http: reqwest::Client::new(),
            telegram,
        }
    }

    /// A sink that never sends anything (tests).
    pub fn disabled() -> Self {
        Self {
            http: reqwest::Client::new(),
            telegram: None,
        }
    }

    /// Dispatch a new-feedback alert on a detached task.
    pub fn notify_feedback(&self, location_name: &str, code: &str, summary: &str, note: &str) {
        let Some(telegram) = self.telegram.clone() else {
            return;
        };

        let text = format!(
            "Yeni bildirim\nLokasyon: {location_name} ({code})\nDurum: {summary}\nNot: {note}"
        );
        let http = self.http.clone();

        tokio::spawn(async move {
            let url = format!(
                "https://api.telegram.org/bot{}/sendMessage",
                telegram.bot_token
            );
            let result = http
                .post(&url)
                .json(&json!({ "chat_id": telegram.chat_id, "text": text }))
                .send()
                .await;

            match result {
                Ok(response) if response.status().is_success() => {
                    tracing::debug!("Feedback notification delivered");
                }
                Ok(response) => {
                    tracing::warn!(status = %response.status(), "Telegram rejected the notification");
                }
                Err(err) => {
                    tracing::warn!(error = %err, "Failed to deliver feedback notification");
                }
            }
        });
    }
}
