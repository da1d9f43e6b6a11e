use std::env;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    // Google Sheets
    pub spreadsheet_id: String,
    pub service_account_key_path: String,

    // Telegram
    pub telegram_token: String,
    pub poll_timeout_secs: u64,
}

impl Config {
    /// Load configuration from environment variables.
    /// Panics with a clear message if required vars are missing.
    pub fn from_env() -> Self {
        Self {
            spreadsheet_id: required_env("SPREADSHEET_ID"),
            service_account_key_path: required_env("SERVICE_ACCOUNT_KEY_PATH"),
            telegram_token: required_env("TELEGRAM_TOKEN"),
            poll_timeout_secs: env::var("POLL_TIMEOUT_SECS")
                .unwrap_or_else(|_| "30".to_string())
                .parse()
                .expect("POLL_TIMEOUT_SECS must be a number"),
        }
    }
}

fn required_env(key: &str) -> String {
    env::var(key).unwrap_or_else(|_| panic!("{key} environment variable is required"))
}
