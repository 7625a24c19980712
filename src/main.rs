//! Wiring & DI. Entry point: bootstrap adapters, inject into services, run UI.
//! No business logic here.

use dotenv::dotenv;
use standup_sync::adapters::render::MarkdownRenderer;
use standup_sync::adapters::sheets::{CsvSheetSink, GoogleSheetsSink};
use standup_sync::adapters::slack::SlackGateway;
use standup_sync::adapters::ui::tui::TuiInputPort;
use standup_sync::ports::{ChatSource, InputPort, ProfilePort, RenderPort, SheetSink};
use standup_sync::shared::config::AppConfig;
use standup_sync::usecases::{ExportService, HistoryService, MemberService, PmoReportService};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
    let env_loaded = dotenv();
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    match &env_loaded {
        Ok(path) => info!(path = %path.display(), "loaded .env"),
        Err(_) => info!(cwd = %cwd.display(), "no .env found (check CWD)"),
    }

    standup_sync::adapters::ui::init_ui();

    let cfg = AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "config load failed, using env fallbacks only");
        AppConfig::default()
    });

    let Some(token) = cfg.slack_bot_token() else {
        anyhow::bail!("Set SLACK_BOT_TOKEN (or STANDUP_SLACK_BOT_TOKEN) in env or .env");
    };
    let Some(report_cfg) = cfg.report_config() else {
        anyhow::bail!("Set CHANNEL_ID (or STANDUP_CHANNEL_ID) in env or .env");
    };

    let data_path = PathBuf::from(cfg.data_dir_or_default());
    info!(path = %data_path.display(), "data directory");

    // --- Slack gateway serves both history and profiles ---
    let slack = Arc::new(SlackGateway::new(cfg.slack_api_url_or_default(), token));
    let chat: Arc<dyn ChatSource> = Arc::clone(&slack) as Arc<dyn ChatSource>;
    let profiles: Arc<dyn ProfilePort> = slack as Arc<dyn ProfilePort>;

    // --- Sheet sink: Google Sheets when a token is present, CSV otherwise ---
    let sink: Arc<dyn SheetSink> = if cfg.is_sheets_configured() {
        info!(
            url = %cfg.sheets_api_url_or_default(),
            worksheet = %report_cfg.worksheet_name,
            "Google Sheets export enabled"
        );
        Arc::new(GoogleSheetsSink::new(
            cfg.sheets_api_url_or_default(),
            cfg.sheets_access_token().unwrap_or_default(),
        ))
    } else {
        let exports = data_path.join("exports");
        warn!(dir = %exports.display(), "GS_ACCESS_TOKEN not set, exporting to CSV");
        Arc::new(CsvSheetSink::new(exports))
    };

    let renderer: Arc<dyn RenderPort> = Arc::new(MarkdownRenderer::new(data_path.join("reports")));

    // --- Services ---
    let export = Arc::new(ExportService::new(
        Arc::clone(&chat),
        Arc::clone(&profiles),
        sink,
        Arc::clone(&renderer),
    ));
    let pmo = Arc::new(PmoReportService::new(
        Arc::clone(&chat),
        Arc::clone(&profiles),
        Arc::clone(&renderer),
    ));
    let member = Arc::new(MemberService::new(
        Arc::clone(&chat),
        Arc::clone(&profiles),
        Arc::clone(&renderer),
    ));
    let history = Arc::new(HistoryService::new(chat, profiles, renderer));

    let input_port: Arc<dyn InputPort> = Arc::new(TuiInputPort::new(
        report_cfg, export, pmo, member, history,
    ));

    input_port
        .run()
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    Ok(())
}
