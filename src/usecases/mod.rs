//! Application use cases. Orchestrate domain logic via ports.

pub mod export_service;
pub mod history_service;
pub mod member_service;
pub mod pmo_report_service;
pub mod profiles;

#[cfg(test)]
pub(crate) mod testing;

pub use export_service::ExportService;
pub use history_service::HistoryService;
pub use member_service::MemberService;
pub use pmo_report_service::PmoReportService;
pub use profiles::ProfileCache;
