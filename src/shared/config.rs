//! Application configuration. API credentials, sheet target, paths.

use serde::Deserialize;

pub const DEFAULT_SLACK_API_URL: &str = "https://slack.com/api";
pub const DEFAULT_SHEETS_API_URL: &str = "https://sheets.googleapis.com/v4/spreadsheets";
pub const DEFAULT_WORKSHEET_NAME: &str = "Sheet1";
pub const DEFAULT_DATA_DIR: &str = "./data";

#[derive(Debug, Deserialize, Default)]
pub struct AppConfig {
    /// Slack bot token (xoxb-...). Read from STANDUP_SLACK_BOT_TOKEN or SLACK_BOT_TOKEN.
    #[serde(default)]
    pub slack_bot_token: Option<String>,

    /// Slack Web API base URL. Read from STANDUP_SLACK_API_URL.
    #[serde(default)]
    pub slack_api_url: Option<String>,

    /// Standup channel id. Read from STANDUP_CHANNEL_ID or CHANNEL_ID.
    #[serde(default)]
    pub channel_id: Option<String>,

    // ─────────────────────────────────────────────────────────────────────────
    // Spreadsheet Configuration
    // ─────────────────────────────────────────────────────────────────────────
    /// Spreadsheet key. Read from STANDUP_GS_SHEET_KEY or GS_SHEET_KEY.
    #[serde(default)]
    pub gs_sheet_key: Option<String>,

    /// Worksheet (tab) name. Read from STANDUP_GS_WORKSHEET_NAME or GS_WORKSHEET_NAME.
    #[serde(default)]
    pub gs_worksheet_name: Option<String>,

    /// OAuth access token with the spreadsheets scope. Read from
    /// STANDUP_GS_ACCESS_TOKEN or GS_ACCESS_TOKEN. Without it the table is
    /// written to a CSV file instead.
    #[serde(default)]
    pub gs_access_token: Option<String>,

    /// Sheets API base URL. Read from STANDUP_SHEETS_API_URL.
    #[serde(default)]
    pub sheets_api_url: Option<String>,

    /// Directory for rendered reports and CSV exports. Read from STANDUP_DATA_DIR.
    #[serde(default)]
    pub data_dir: Option<String>,
}

/// Per-request parameters handed to the use cases. Keeps them free of
/// environment lookups.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportConfig {
    pub channel_id: String,
    pub sheet_key: String,
    pub worksheet_name: String,
}

fn env_fallback(value: &Option<String>, legacy: &str) -> Option<String> {
    value
        .clone()
        .or_else(|| std::env::var(legacy).ok())
        .filter(|s| !s.trim().is_empty())
}

impl AppConfig {
    pub fn load() -> Result<Self, config::ConfigError> {
        dotenv::dotenv().ok();
        let mut c = config::Config::builder();
        c = c.add_source(config::Environment::with_prefix("STANDUP"));
        if let Ok(path) = std::env::var("STANDUP_CONFIG") {
            c = c.add_source(config::File::with_name(&path));
        }
        c.build()?.try_deserialize()
    }

    /// Returns the Slack bot token from config or SLACK_BOT_TOKEN env.
    pub fn slack_bot_token(&self) -> Option<String> {
        env_fallback(&self.slack_bot_token, "SLACK_BOT_TOKEN")
    }

    /// Returns the Slack API base URL. Defaults to the public Web API.
    pub fn slack_api_url_or_default(&self) -> String {
        self.slack_api_url
            .clone()
            .unwrap_or_else(|| DEFAULT_SLACK_API_URL.to_string())
    }

    /// Returns the channel id from config or CHANNEL_ID env.
    pub fn channel_id(&self) -> Option<String> {
        env_fallback(&self.channel_id, "CHANNEL_ID")
    }

    /// Returns the spreadsheet key from config or GS_SHEET_KEY env.
    pub fn sheet_key(&self) -> Option<String> {
        env_fallback(&self.gs_sheet_key, "GS_SHEET_KEY")
    }

    /// Returns the worksheet name. Defaults to "Sheet1".
    pub fn worksheet_name_or_default(&self) -> String {
        env_fallback(&self.gs_worksheet_name, "GS_WORKSHEET_NAME")
            .unwrap_or_else(|| DEFAULT_WORKSHEET_NAME.to_string())
    }

    /// Returns the Sheets access token from config or GS_ACCESS_TOKEN env.
    pub fn sheets_access_token(&self) -> Option<String> {
        env_fallback(&self.gs_access_token, "GS_ACCESS_TOKEN")
    }

    /// Returns the Sheets API base URL.
    pub fn sheets_api_url_or_default(&self) -> String {
        self.sheets_api_url
            .clone()
            .unwrap_or_else(|| DEFAULT_SHEETS_API_URL.to_string())
    }

    /// Returns true if writing to Google Sheets is possible.
    pub fn is_sheets_configured(&self) -> bool {
        self.sheets_access_token().is_some()
    }

    pub fn data_dir_or_default(&self) -> String {
        self.data_dir
            .clone()
            .unwrap_or_else(|| DEFAULT_DATA_DIR.to_string())
    }

    /// Build the explicit per-request configuration. The sheet key falls
    /// back to "standup" so CSV exports still get a file name.
    pub fn report_config(&self) -> Option<ReportConfig> {
        Some(ReportConfig {
            channel_id: self.channel_id()?,
            sheet_key: self.sheet_key().unwrap_or_else(|| "standup".to_string()),
            worksheet_name: self.worksheet_name_or_default(),
        })
    }
}
