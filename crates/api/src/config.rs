use std::path::PathBuf;

use crate::auth::token::SessionConfig;

/// Server configuration loaded from environment variables.
///
/// All fields have development defaults except the session secret and the
/// admin password, which must be set explicitly.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8080`).
    pub port: u16,
    /// Base public URL embedded in QR feedback links.
    pub app_url: String,
    /// Shared admin credential.
    pub admin_user: String,
    pub admin_pass: String,
    /// Session token configuration (signing secret, lifetime).
    pub session: SessionConfig,
    /// Directory QR artifacts are written to.
    pub qr_dir: PathBuf,
    /// Telegram notification sink; `None` disables outward notification.
    pub telegram: Option<TelegramConfig>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
}

/// Credentials for the Telegram Bot API notification channel.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    pub bot_token: String,
    pub chat_id: String,
}

impl AppConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var                | Required | Default                 |
    /// |------------------------|----------|-------------------------|
    /// | `HOST`                 | no       | `0.0.0.0`               |
    /// | `PORT`                 | no       | `8080`                  |
    /// | `APP_URL`              | no       | `http://localhost:8080` |
    /// | `ADMIN_USER`           | no       | `admin`                 |
    /// | `ADMIN_PASS`           | **yes**  | --                      |
    /// | `SESSION_SECRET`       | **yes**  | --                      |
    /// | `SESSION_TTL_HOURS`    | no       | `12`                    |
    /// | `QR_DIR`               | no       | `static/qrcodes`        |
    /// | `TELEGRAM_BOT_TOKEN`   | no       | unset disables the sink |
    /// | `TELEGRAM_CHAT_ID`     | no       | unset disables the sink |
    /// | `REQUEST_TIMEOUT_SECS` | no       | `30`                    |
    ///
    /// # Panics
    ///
    /// Panics if a required variable is missing or a numeric one fails to
    /// parse -- misconfiguration should fail at startup, not at first use.
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "8080".into())
            .parse()
            .expect("PORT must be a valid u16");

        let app_url = std::env::var("APP_URL")
            .unwrap_or_else(|_| "http://localhost:8080".into())
            .trim_end_matches('/')
            .to_string();

        let admin_user = std::env::var("ADMIN_USER").unwrap_or_else(|_| "admin".into());
        let admin_pass =
            std::env::var("ADMIN_PASS").expect("ADMIN_PASS must be set in the environment");
        assert!(!admin_pass.is_empty(), "ADMIN_PASS must not be empty");

        let qr_dir: PathBuf = std::env::var("QR_DIR")
            .unwrap_or_else(|_| "static/qrcodes".into())
            .into();

        // Both credentials must be present for the sink to be active;
        // a partial configuration is treated as unset.
        let telegram = match (
            std::env::var("TELEGRAM_BOT_TOKEN"),
            std::env::var("TELEGRAM_CHAT_ID"),
        ) {
            (Ok(bot_token), Ok(chat_id)) if !bot_token.is_empty() && !chat_id.is_empty() => {
                Some(TelegramConfig { bot_token, chat_id })
            }
            _ => None,
        };

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            host,
            port,
            app_url,
            admin_user,
            admin_pass,
            session: SessionConfig::from_env(),
            qr_dir,
            telegram,
            request_timeout_secs,
        }
    }

    /// The public feedback URL for a location code (the QR payload).
    pub fn feedback_url(&self, code: &str) -> String {
        format!("{}/feedback?loc={}", self.app_url, code)
    }
}
