//! Implements InputPort. Inquire-based main menu over the report use cases.

use crate::adapters::ui::progress::spinner;
use crate::domain::DomainError;
use crate::ports::InputPort;
use crate::shared::ReportConfig;
use crate::usecases::{ExportService, HistoryService, MemberService, PmoReportService};
use async_trait::async_trait;
use inquire::ui::{Color, RenderConfig, Styled};
use inquire::{InquireError, Select, Text};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuAction {
    Export,
    PmoReport,
    MemberMessages,
    ChannelHistory,
    Exit,
}

impl MenuAction {
    const ALL: [MenuAction; 5] = [
        MenuAction::Export,
        MenuAction::PmoReport,
        MenuAction::MemberMessages,
        MenuAction::ChannelHistory,
        MenuAction::Exit,
    ];
}

impl fmt::Display for MenuAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            MenuAction::Export => "Export standups to sheet",
            MenuAction::PmoReport => "PMO report",
            MenuAction::MemberMessages => "Member messages",
            MenuAction::ChannelHistory => "Channel history",
            MenuAction::Exit => "Exit",
        };
        f.write_str(label)
    }
}

/// Global prompt theme.
pub fn apply_theme() {
    let mut config = RenderConfig::default_colored();
    config.prompt_prefix = Styled::new("›").with_fg(Color::LightGreen);
    config.highlighted_option_prefix = Styled::new("➤").with_fg(Color::LightGreen);
    inquire::set_global_render_config(config);
}

/// Cancel (Esc) and interrupt (Ctrl+C) both end the session.
fn is_exit(err: &InquireError) -> bool {
    matches!(
        err,
        InquireError::OperationCanceled | InquireError::OperationInterrupted
    )
}

/// TUI adapter. Inquire prompts.
pub struct TuiInputPort {
    report_cfg: ReportConfig,
    export: Arc<ExportService>,
    pmo: Arc<PmoReportService>,
    member: Arc<MemberService>,
    history: Arc<HistoryService>,
}

impl TuiInputPort {
    pub fn new(
        report_cfg: ReportConfig,
        export: Arc<ExportService>,
        pmo: Arc<PmoReportService>,
        member: Arc<MemberService>,
        history: Arc<HistoryService>,
    ) -> Self {
        Self {
            report_cfg,
            export,
            pmo,
            member,
            history,
        }
    }

    async fn dispatch(&self, action: MenuAction) -> Result<Option<PathBuf>, DomainError> {
        let cfg = &self.report_cfg;
        match action {
            MenuAction::Export => {
                let pb = spinner("Exporting standups...");
                let res = self.export.export_and_render(cfg).await;
                pb.finish_and_clear();
                res.map(Some)
            }
            MenuAction::PmoReport => {
                let pb = spinner("Building PMO report...");
                let res = self.pmo.render(cfg).await;
                pb.finish_and_clear();
                res.map(Some)
            }
            MenuAction::MemberMessages => {
                let user_id = match Text::new("Member user ID:").prompt() {
                    Ok(id) => id.trim().to_string(),
                    Err(e) if is_exit(&e) => return Ok(None),
                    Err(e) => return Err(DomainError::Input(e.to_string())),
                };
                if user_id.is_empty() {
                    return Err(DomainError::Input("user ID must not be empty".to_string()));
                }
                let pb = spinner("Collecting member messages...");
                let res = self.member.render(cfg, &user_id).await;
                pb.finish_and_clear();
                res.map(Some)
            }
            MenuAction::ChannelHistory => {
                let pb = spinner("Loading channel history...");
                let res = self.history.render(cfg).await;
                pb.finish_and_clear();
                res.map(Some)
            }
            MenuAction::Exit => Ok(None),
        }
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        loop {
            let action = match Select::new("What next?", MenuAction::ALL.to_vec()).prompt() {
                Ok(a) => a,
                Err(e) if is_exit(&e) => break,
                Err(e) => return Err(DomainError::Input(e.to_string())),
            };
            if action == MenuAction::Exit {
                break;
            }
            match self.dispatch(action).await {
                Ok(Some(path)) => {
                    info!(action = %action, path = %path.display(), "view written");
                    println!("Written: {}", path.display());
                }
                Ok(None) => {}
                Err(e) => {
                    error!(action = %action, error = %e, "action failed");
                    println!("Failed: {}", e);
                }
            }
        }
        info!("bye");
        Ok(())
    }
}
